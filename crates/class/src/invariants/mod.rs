#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Machine-checkable invariant catalog and proof entrypoints for the class system.
#![allow(dead_code)]

pub(crate) mod catalog;

/// Stubs for rustdoc link targets.
#[cfg(doc)]
pub(crate) mod stubs {
	pub fn test_chain_orders_are_mirror_images() {}
	pub fn test_single_flatten_under_contention() {}
	pub fn test_repeat_init_keeps_block_address() {}
	pub fn test_reinit_after_finalize_allocates_fresh_block() {}
	pub fn test_epoch_wraps_to_first() {}
}

#[cfg(doc)]
pub(crate) use stubs::{
	test_chain_orders_are_mirror_images, test_epoch_wraps_to_first, test_reinit_after_finalize_allocates_fresh_block,
	test_repeat_init_keeps_block_address, test_single_flatten_under_contention,
};

#[cfg(test)]
mod proofs;

#[cfg(test)]
#[allow(unused_imports)]
pub(crate) use proofs::{
	test_chain_orders_are_mirror_images, test_epoch_wraps_to_first, test_reinit_after_finalize_allocates_fresh_block,
	test_repeat_init_keeps_block_address, test_single_flatten_under_contention,
};
