use std::fmt;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};

/// Generation of the class system.
///
/// Zero is reserved for "never initialized" stamps, so a live epoch is always
/// non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Epoch(NonZeroU32);

impl Epoch {
	/// Epoch a fresh class system starts at.
	pub const FIRST: Self = Self(NonZeroU32::MIN);

	/// Largest epoch before the counter wraps back to [`Epoch::FIRST`].
	pub const MAX: Self = Self(NonZeroU32::MAX);

	pub const fn new(value: NonZeroU32) -> Self {
		Self(value)
	}

	/// Interprets a raw stamp, mapping 0 to `None`.
	pub const fn from_stamp(stamp: u32) -> Option<Self> {
		match NonZeroU32::new(stamp) {
			Some(value) => Some(Self(value)),
			None => None,
		}
	}

	pub const fn get(self) -> u32 {
		self.0.get()
	}

	/// Returns the following epoch, skipping 0 on overflow.
	pub const fn next(self) -> Self {
		match self.0.checked_add(1) {
			Some(value) => Self(value),
			None => Self::FIRST,
		}
	}
}

impl Default for Epoch {
	fn default() -> Self {
		Self::FIRST
	}
}

impl fmt::Display for Epoch {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// Process-wide epoch counter.
///
/// Reads are lock-free. Advances happen under the class system lock, so there
/// is only ever one writer.
#[derive(Debug)]
pub(crate) struct EpochClock {
	current: AtomicU32,
}

impl EpochClock {
	pub const fn new(initial: Epoch) -> Self {
		Self {
			current: AtomicU32::new(initial.get()),
		}
	}

	/// Returns the current epoch.
	pub fn current(&self) -> Epoch {
		Epoch::from_stamp(self.current.load(Ordering::Acquire)).unwrap_or(Epoch::FIRST)
	}

	/// Moves to the next epoch and returns it.
	pub fn advance(&self) -> Epoch {
		let next = self.current().next();
		self.current.store(next.get(), Ordering::Release);
		next
	}

	#[cfg(test)]
	pub fn set(&self, epoch: Epoch) {
		self.current.store(epoch.get(), Ordering::Release);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clock_starts_at_initial_epoch() {
		let clock = EpochClock::new(Epoch::FIRST);
		assert_eq!(clock.current().get(), 1);
	}

	#[test]
	fn advance_increments_by_one() {
		let clock = EpochClock::new(Epoch::FIRST);
		assert_eq!(clock.advance().get(), 2);
		assert_eq!(clock.advance().get(), 3);
		assert_eq!(clock.current().get(), 3);
	}

	#[test]
	fn advance_wraps_past_max_to_first() {
		let clock = EpochClock::new(Epoch::MAX);
		assert_eq!(clock.advance(), Epoch::FIRST);
	}

	#[test]
	fn zero_stamp_is_never_an_epoch() {
		assert_eq!(Epoch::from_stamp(0), None);
		assert_eq!(Epoch::from_stamp(7).map(Epoch::get), Some(7));
	}
}
