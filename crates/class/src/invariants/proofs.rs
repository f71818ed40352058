use std::sync::Barrier;

use pretty_assertions::assert_eq;

use crate::test_fixtures::{Trace, addrs, construct_a, construct_b, construct_c, destruct_a, destruct_b, destruct_c, traced_hierarchy};
use crate::{Chains, ClassSystem, Epoch};

/// Invariant: Constructors run root-to-derived, destructors derived-to-root.
#[cfg_attr(test, test)]
pub(crate) fn test_chain_orders_are_mirror_images() {
	traced_hierarchy!(A, B, C);
	let system = ClassSystem::new();
	let chains = system.ensure_initialized(&C);

	assert_eq!(
		addrs(chains.constructors()),
		vec![Some(construct_a as usize), Some(construct_b as usize), Some(construct_c as usize), None]
	);
	assert_eq!(
		addrs(chains.destructors()),
		vec![Some(destruct_c as usize), Some(destruct_b as usize), Some(destruct_a as usize), None]
	);
	assert_eq!(C.depth(), 3);

	let mut trace = Trace::default();
	// SAFETY: fixture functions expect a `Trace`.
	unsafe {
		chains.construct(trace.as_instance());
		chains.destruct(trace.as_instance());
	}
	assert_eq!(
		trace.events,
		["construct a", "construct b", "construct c", "destruct c", "destruct b", "destruct a"]
	);
}

/// Invariant: Concurrent first use of one descriptor flattens it exactly once.
#[cfg_attr(test, test)]
pub(crate) fn test_single_flatten_under_contention() {
	const THREADS: usize = 16;
	traced_hierarchy!(A, B, C);
	let system = ClassSystem::new();
	let barrier = Barrier::new(THREADS);

	let results: Vec<Chains> = std::thread::scope(|scope| {
		let mut handles = Vec::with_capacity(THREADS);
		for _ in 0..THREADS {
			handles.push(scope.spawn(|| {
				barrier.wait();
				system.ensure_initialized(&C)
			}));
		}
		handles.into_iter().map(|handle| handle.join().unwrap()).collect()
	});

	assert_eq!(results.len(), THREADS);
	assert_eq!(system.registered_blocks(), 1);
	assert!(results.iter().all(|chains| Chains::ptr_eq(chains, &results[0])));
	assert_eq!(results[0].iter_constructors().count(), 3);
	assert_eq!(C.initialized_epoch(), Some(system.epoch()));
}

/// Invariant: Initializing a current descriptor again allocates nothing.
#[cfg_attr(test, test)]
pub(crate) fn test_repeat_init_keeps_block_address() {
	traced_hierarchy!(A, B, C);
	let system = ClassSystem::new();

	let first = system.ensure_initialized(&C);
	for _ in 0..5 {
		let again = system.ensure_initialized(&C);
		assert_eq!(again.as_ptr(), first.as_ptr());
	}
	assert_eq!(system.registered_blocks(), 1);
}

/// Invariant: After finalize a descriptor is flattened again into a new block
/// with identical contents, and released blocks are never handed out.
#[cfg_attr(test, test)]
pub(crate) fn test_reinit_after_finalize_allocates_fresh_block() {
	traced_hierarchy!(A, B, C);
	let system = ClassSystem::new();

	let before = system.ensure_initialized(&C);
	let before_ctors = addrs(before.constructors());
	let before_dtors = addrs(before.destructors());
	let stale = before.downgrade();
	drop(before);

	let finalized = system.finalize();
	assert_eq!(finalized.released, 1);
	assert_eq!(finalized.epoch.get(), 2);
	assert!(stale.upgrade().is_none(), "finalize must release the block");
	assert_eq!(C.initialized_epoch().map(Epoch::get), Some(1));

	let after = system.ensure_initialized(&C);
	assert_eq!(addrs(after.constructors()), before_ctors);
	assert_eq!(addrs(after.destructors()), before_dtors);
	assert_eq!(C.initialized_epoch(), Some(finalized.epoch));
	assert_eq!(system.registered_blocks(), 1);
}

/// Invariant: The epoch wraps from its maximum to 1, never 0.
#[cfg_attr(test, test)]
pub(crate) fn test_epoch_wraps_to_first() {
	traced_hierarchy!(A, B, C);
	let system = ClassSystem::new();
	system.set_epoch(Epoch::MAX);
	let pinned = system.ensure_initialized(&C);

	let finalized = system.finalize();
	assert_eq!(finalized.epoch, Epoch::FIRST);
	assert_eq!(system.epoch().get(), 1);

	let fresh = system.ensure_initialized(&C);
	assert!(!Chains::ptr_eq(&pinned, &fresh));
	assert_eq!(C.initialized_epoch(), Some(Epoch::FIRST));
}
