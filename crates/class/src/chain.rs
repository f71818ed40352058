//! Flattened constructor/destructor chains.
//!
//! A [`ChainBlock`] is one contiguous slot array holding both chains back to
//! back:
//!
//! ```text
//! [ ctor(root) .. ctor(self) | None | dtor(self) .. dtor(root) | None ]
//!   ^ construct region                 ^ destruct region
//! ```
//!
//! Each region ends with a `None` sentinel so callers can walk it without
//! knowing its length.

use std::ffi::c_void;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::descriptor::InstanceFn;

/// One flattened chain pair, allocated as a single block.
pub struct ChainBlock {
	class: &'static str,
	slots: Box<[Option<InstanceFn>]>,
	destruct_start: usize,
	released: AtomicBool,
}

impl ChainBlock {
	/// Wraps a filled slot array whose destruct region starts at `destruct_start`.
	pub(crate) fn from_slots(class: &'static str, slots: Box<[Option<InstanceFn>]>, destruct_start: usize) -> Self {
		debug_assert!(destruct_start >= 1 && destruct_start < slots.len());
		debug_assert!(slots[destruct_start - 1].is_none() && slots[slots.len() - 1].is_none());
		Self {
			class,
			slots,
			destruct_start,
			released: AtomicBool::new(false),
		}
	}

	/// Name of the class this block was flattened for.
	pub fn class_name(&self) -> &'static str {
		self.class
	}

	/// Constructors root-to-derived, followed by the sentinel.
	pub fn constructors(&self) -> &[Option<InstanceFn>] {
		&self.slots[..self.destruct_start]
	}

	/// Destructors derived-to-root, followed by the sentinel.
	pub fn destructors(&self) -> &[Option<InstanceFn>] {
		&self.slots[self.destruct_start..]
	}

	/// Total slot count, sentinels included.
	pub fn slot_count(&self) -> usize {
		self.slots.len()
	}

	/// Returns true once the registry has let go of this block.
	///
	/// A released block may still be pinned by a [`Chains`] handle but is
	/// never handed out by a descriptor again.
	pub fn is_released(&self) -> bool {
		self.released.load(Ordering::Acquire)
	}

	pub(crate) fn mark_released(&self) {
		self.released.store(true, Ordering::Release);
	}
}

impl fmt::Debug for ChainBlock {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ChainBlock")
			.field("class", &self.class)
			.field("constructors", &(self.destruct_start - 1))
			.field("destructors", &(self.slots.len() - self.destruct_start - 1))
			.field("released", &self.is_released())
			.finish()
	}
}

/// Walks a sentinel-terminated region up to (not including) the sentinel.
fn until_sentinel(region: &[Option<InstanceFn>]) -> impl Iterator<Item = InstanceFn> + '_ {
	region.iter().map_while(|slot| *slot)
}

/// Handle to the chains of an initialized class.
///
/// Holding a `Chains` keeps its block alive even if the class system is
/// finalized meanwhile; the block is reclaimed once the last handle drops.
#[derive(Clone, Debug)]
pub struct Chains {
	block: Arc<ChainBlock>,
}

impl Chains {
	pub(crate) fn new(block: Arc<ChainBlock>) -> Self {
		Self { block }
	}

	pub fn block(&self) -> &ChainBlock {
		&self.block
	}

	/// Constructors root-to-derived, followed by the sentinel.
	pub fn constructors(&self) -> &[Option<InstanceFn>] {
		self.block.constructors()
	}

	/// Destructors derived-to-root, followed by the sentinel.
	pub fn destructors(&self) -> &[Option<InstanceFn>] {
		self.block.destructors()
	}

	pub fn iter_constructors(&self) -> impl Iterator<Item = InstanceFn> + '_ {
		until_sentinel(self.constructors())
	}

	pub fn iter_destructors(&self) -> impl Iterator<Item = InstanceFn> + '_ {
		until_sentinel(self.destructors())
	}

	/// Address of the underlying block.
	pub fn as_ptr(&self) -> *const ChainBlock {
		Arc::as_ptr(&self.block)
	}

	/// Returns true when both handles refer to the same allocation.
	pub fn ptr_eq(a: &Self, b: &Self) -> bool {
		Arc::ptr_eq(&a.block, &b.block)
	}

	/// Runs every constructor against `instance`, base class first.
	///
	/// # Safety
	///
	/// `instance` must point to storage the constructors of this hierarchy
	/// accept, typically `instance_size` bytes for the class that produced
	/// these chains.
	pub unsafe fn construct(&self, instance: *mut c_void) {
		for ctor in self.iter_constructors() {
			// SAFETY: upheld by the caller.
			unsafe { ctor(instance) };
		}
	}

	/// Runs every destructor against `instance`, most-derived class first.
	///
	/// # Safety
	///
	/// `instance` must have been constructed with the same hierarchy and not
	/// destructed since.
	pub unsafe fn destruct(&self, instance: *mut c_void) {
		for dtor in self.iter_destructors() {
			// SAFETY: upheld by the caller.
			unsafe { dtor(instance) };
		}
	}

	pub(crate) fn downgrade(&self) -> std::sync::Weak<ChainBlock> {
		Arc::downgrade(&self.block)
	}
}
