//! Error types for the class system.

use std::collections::TryReserveError;

/// Failures raised while building class bookkeeping.
///
/// None of these are recoverable at the public surface: [`crate::ClassSystem::ensure_initialized`]
/// routes them through [`fatal`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassError {
	/// A chain block or registry expansion could not be allocated.
	#[error("out of memory allocating {what} ({requested} slots): {source}")]
	OutOfMemory {
		what: &'static str,
		requested: usize,
		#[source]
		source: TryReserveError,
	},
}

impl ClassError {
	pub(crate) fn out_of_memory(what: &'static str, requested: usize) -> impl FnOnce(TryReserveError) -> Self {
		move |source| Self::OutOfMemory { what, requested, source }
	}
}

/// Reports `err` to the operator and terminates the process.
///
/// A class system that cannot allocate its own bookkeeping leaves every
/// descriptor in an unusable state, so there is no partial-failure mode.
#[cold]
pub(crate) fn fatal(err: &ClassError) -> ! {
	tracing::error!(error = %err, "class system cannot continue");
	eprintln!("lineage-class: {err}");
	std::process::abort()
}
