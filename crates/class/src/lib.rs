//! Static class descriptors with lazily flattened constructor/destructor chains.
//!
//! Every type in a single-inheritance hierarchy is described by one `static`
//! [`ClassDescriptor`] pointing at its parent. On first use the
//! [`ClassSystem`] walks that parent chain once and produces a [`Chains`]
//! pair: constructors root-to-derived and destructors derived-to-root, each
//! terminated by a `None` sentinel. Building or tearing down an instance is
//! then a linear walk instead of a recursive one.
//!
//! # Lifecycle
//!
//! 1. **Declare:** one `static` descriptor per type, never initialized (stamp 0).
//! 2. **Initialize:** [`ensure_initialized`] flattens the class the first time
//!    it is seen in the current [`Epoch`] and is lock-free afterwards.
//! 3. **Finalize:** [`finalize_all`] advances the epoch and releases every
//!    flattened block at once. Descriptors are not touched; their stale stamps
//!    make the next [`ensure_initialized`] flatten again.
//!
//! # Modules
//!
//! - `descriptor` - [`ClassDescriptor`] and [`OBJECT_CLASS`]
//! - `chain` - [`ChainBlock`] layout and the [`Chains`] handle
//! - `flatten` - Hierarchy flattening
//! - `registry` - Bulk owner of flattened blocks
//! - `epoch` - [`Epoch`] and its clock
//! - `system` - [`ClassSystem`], double-checked initialization and finalize
//! - [`config`] - [`ClassSystemConfig`]

mod chain;
pub mod config;
mod descriptor;
mod epoch;
mod error;
mod flatten;
mod registry;
mod system;

#[cfg(any(test, doc))]
pub(crate) mod invariants;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use chain::{ChainBlock, Chains};
pub use config::{ClassSystemConfig, ConfigError};
pub use descriptor::{ClassDescriptor, InstanceFn, OBJECT_CLASS};
pub use epoch::Epoch;
pub use error::ClassError;
pub use registry::DEFAULT_GROWTH;
pub use system::{ClassSystem, Finalized, ensure_initialized, finalize_all};
