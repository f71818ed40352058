//! Invariant catalog for [`crate::ClassSystem`].
#![allow(dead_code)]

/// Must order constructors root-to-derived and destructors derived-to-root, each ending in a sentinel.
///
/// - Enforced in: [`crate::flatten::flatten`]
/// - Tested by: [`crate::invariants::test_chain_orders_are_mirror_images`]
/// - Failure symptom: Derived constructors see uninitialized base state, or base teardown runs first.
pub(crate) const CHAIN_ORDERS_ARE_MIRROR_IMAGES: () = ();

/// Must run the flattener at most once per descriptor per epoch.
///
/// - Enforced in: [`crate::ClassSystem::ensure_initialized`] (re-check under the lock)
/// - Tested by: [`crate::invariants::test_single_flatten_under_contention`]
/// - Failure symptom: Extra registry blocks, callers holding chains at different addresses.
pub(crate) const SINGLE_FLATTEN_PER_EPOCH: () = ();

/// Must not allocate when the descriptor is already current.
///
/// - Enforced in: [`crate::descriptor::ClassDescriptor::current_chains`]
/// - Tested by: [`crate::invariants::test_repeat_init_keeps_block_address`]
/// - Failure symptom: Registry grows on every construction.
pub(crate) const CURRENT_DESCRIPTOR_INIT_IS_NOOP: () = ();

/// Must write the epoch stamp last, after depth and published chains.
///
/// - Enforced in: [`crate::descriptor::ClassDescriptor::publish`]
/// - Tested by: [`crate::invariants::test_single_flatten_under_contention`]
/// - Failure symptom: A lock-free reader sees a current stamp with missing chains.
pub(crate) const STAMP_PUBLISHED_LAST: () = ();

/// Must reflatten into a new block after finalize and never hand out a released block.
///
/// - Enforced in: [`crate::ClassSystem::finalize`], [`crate::registry::ChainRegistry::release_all`], [`crate::descriptor::ClassDescriptor::current_chains`]
/// - Tested by: [`crate::invariants::test_reinit_after_finalize_allocates_fresh_block`]
/// - Failure symptom: Constructors read freed memory after a runtime reset.
pub(crate) const FRESH_BLOCK_AFTER_FINALIZE: () = ();

/// Must never advance the epoch to 0.
///
/// - Enforced in: [`crate::Epoch::next`]
/// - Tested by: [`crate::invariants::test_epoch_wraps_to_first`]
/// - Failure symptom: Never-initialized descriptors look current after wraparound.
pub(crate) const EPOCH_SKIPS_ZERO: () = ();
