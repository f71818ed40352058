//! Hierarchy flattening.
//!
//! Turns a descriptor's parent chain into one [`ChainBlock`] in two passes:
//! the first counts depth and defined functions, the second fills a single
//! allocation of `constructors + destructors + 2` slots. The walk runs
//! derived-to-root, which is already destruct order; constructors are written
//! back-to-front so they end up root-to-derived.

use crate::chain::ChainBlock;
use crate::descriptor::{ClassDescriptor, InstanceFn};
use crate::error::ClassError;

/// Output of [`flatten`].
#[derive(Debug)]
pub(crate) struct Flattened {
	pub block: ChainBlock,
	pub depth: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Census {
	depth: u32,
	constructors: usize,
	destructors: usize,
}

fn census(class: &ClassDescriptor) -> Census {
	class.ancestors().fold(Census::default(), |mut census, ancestor| {
		census.depth += 1;
		census.constructors += usize::from(ancestor.constructor().is_some());
		census.destructors += usize::from(ancestor.destructor().is_some());
		census
	})
}

/// Flattens `class` and its ancestors into a chain block.
///
/// The parent chain must be acyclic; this is not checked.
pub(crate) fn flatten(class: &ClassDescriptor) -> Result<Flattened, ClassError> {
	let census = census(class);
	let total = census.constructors + census.destructors + 2;

	let mut slots: Vec<Option<InstanceFn>> = Vec::new();
	slots
		.try_reserve_exact(total)
		.map_err(ClassError::out_of_memory("class chain block", total))?;
	slots.resize(total, None);

	// Construct region is [0, constructors] with its sentinel at `constructors`.
	let destruct_start = census.constructors + 1;
	let mut next_ctor = census.constructors;
	let mut next_dtor = destruct_start;

	for ancestor in class.ancestors() {
		if let Some(ctor) = ancestor.constructor() {
			next_ctor -= 1;
			slots[next_ctor] = Some(ctor);
		}
		if let Some(dtor) = ancestor.destructor() {
			slots[next_dtor] = Some(dtor);
			next_dtor += 1;
		}
	}
	debug_assert_eq!(next_ctor, 0);
	debug_assert_eq!(next_dtor, total - 1);

	Ok(Flattened {
		block: ChainBlock::from_slots(class.name(), slots.into_boxed_slice(), destruct_start),
		depth: census.depth,
	})
}
