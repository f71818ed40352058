//! Lazy class initialization and bulk finalization.
//!
//! # Purpose
//!
//! [`ClassSystem`] owns the lock, the epoch clock and the chain registry. It
//! flattens each descriptor at most once per epoch and releases every block
//! in one sweep on [`ClassSystem::finalize`].
//!
//! # Concurrency
//!
//! - **Reads:** Lock-free once a class is current (two Acquire loads and a
//!   weak upgrade).
//! - **Writes:** Serialized by one `parking_lot::Mutex`. A descriptor's depth,
//!   published chains and stamp are only written while it is held, and the
//!   stamp is written last with Release ordering.
//!
//! # Invariants
//!
//! - Must flatten a descriptor at most once per epoch.
//!   - Enforced in: [`ClassSystem::ensure_initialized`] (locked re-check).
//!   - Tested by: [`crate::invariants::test_single_flatten_under_contention`]
//!   - Failure symptom: Duplicate blocks in the registry, chains of one class differ by address.
//!
//! - Must never hand out a block that was released.
//!   - Enforced in: [`crate::descriptor::ClassDescriptor::current_chains`] (weak upgrade, released flag), [`crate::chain::Chains`] (holds `Arc`).
//!   - Tested by: [`crate::invariants::test_reinit_after_finalize_allocates_fresh_block`], `system::tests::wrapped_epoch_does_not_reuse_released_block`
//!   - Failure symptom: Use-after-free while running constructors.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::chain::Chains;
use crate::config::ClassSystemConfig;
use crate::descriptor::ClassDescriptor;
use crate::epoch::{Epoch, EpochClock};
use crate::error::fatal;
use crate::flatten::flatten;
use crate::registry::{ChainRegistry, DEFAULT_GROWTH};

static GLOBAL: ClassSystem = ClassSystem::new();

/// Summary of one [`ClassSystem::finalize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finalized {
	/// Epoch in effect after finalizing.
	pub epoch: Epoch,
	/// Number of chain blocks released.
	pub released: usize,
}

/// Process-wide class state: the lock, the epoch and the chain registry.
///
/// A descriptor must only ever be initialized through one `ClassSystem`,
/// normally [`ClassSystem::global`].
#[derive(Debug)]
pub struct ClassSystem {
	epoch: EpochClock,
	registry: Mutex<ChainRegistry>,
}

impl ClassSystem {
	/// Creates a system with default configuration.
	pub const fn new() -> Self {
		Self {
			epoch: EpochClock::new(Epoch::FIRST),
			registry: Mutex::new(ChainRegistry::new(DEFAULT_GROWTH)),
		}
	}

	pub fn with_config(config: &ClassSystemConfig) -> Self {
		Self {
			epoch: EpochClock::new(config.initial_epoch()),
			registry: Mutex::new(ChainRegistry::new(config.registry_growth)),
		}
	}

	/// The process-wide class system.
	pub fn global() -> &'static ClassSystem {
		&GLOBAL
	}

	pub fn epoch(&self) -> Epoch {
		self.epoch.current()
	}

	/// Number of chain blocks recorded since the last finalize.
	pub fn registered_blocks(&self) -> usize {
		self.registry.lock().len()
	}

	/// Registry slots reserved since the last finalize.
	pub fn registry_capacity(&self) -> usize {
		self.registry.lock().capacity()
	}

	/// Makes sure `class` is flattened for the current epoch and returns its chains.
	///
	/// Safe to call from any number of threads. Once a class is current this
	/// takes no lock. Running out of memory while flattening terminates the
	/// process.
	pub fn ensure_initialized(&self, class: &ClassDescriptor) -> Chains {
		match class.current_chains(self.epoch()) {
			Some(chains) => chains,
			None => self.initialize_locked(class),
		}
	}

	#[cold]
	fn initialize_locked(&self, class: &ClassDescriptor) -> Chains {
		let mut registry = self.registry.lock();

		// Another thread may have finished while we waited for the lock.
		let epoch = self.epoch();
		if let Some(chains) = class.current_chains(epoch) {
			tracing::trace!(class = class.name(), %epoch, "class initialized concurrently");
			return chains;
		}

		let flattened = flatten(class).unwrap_or_else(|err| fatal(&err));
		let block = Arc::new(flattened.block);
		if let Err(err) = registry.record(Arc::clone(&block)) {
			fatal(&err);
		}
		let chains = Chains::new(block);
		class.publish(&chains, flattened.depth, epoch);

		tracing::debug!(
			class = class.name(),
			%epoch,
			depth = flattened.depth,
			constructors = chains.iter_constructors().count(),
			destructors = chains.iter_destructors().count(),
			"flattened class hierarchy"
		);
		chains
	}

	/// Advances the epoch and releases every recorded chain block.
	///
	/// Every descriptor becomes stale and is flattened again into a new block
	/// on its next [`ClassSystem::ensure_initialized`]. Calling this when no
	/// class was ever initialized is fine.
	pub fn finalize(&self) -> Finalized {
		let mut registry = self.registry.lock();
		let epoch = self.epoch.advance();
		let released = registry.release_all();
		tracing::debug!(%epoch, released, "finalized class system");
		Finalized { epoch, released }
	}

	#[cfg(test)]
	pub(crate) fn set_epoch(&self, epoch: Epoch) {
		let _registry = self.registry.lock();
		self.epoch.set(epoch);
	}
}

impl Default for ClassSystem {
	fn default() -> Self {
		Self::new()
	}
}

/// Initializes `class` through the global class system.
pub fn ensure_initialized(class: &ClassDescriptor) -> Chains {
	ClassSystem::global().ensure_initialized(class)
}

/// Finalizes the global class system.
pub fn finalize_all() -> Finalized {
	ClassSystem::global().finalize()
}
