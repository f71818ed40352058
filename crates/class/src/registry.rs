use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::chain::ChainBlock;
use crate::error::ClassError;

/// Slots added each time the registry fills up.
pub const DEFAULT_GROWTH: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Owner of every chain block flattened in the current epoch.
///
/// Blocks are not indexed by descriptor; the registry only exists so that
/// [`ChainRegistry::release_all`] can drop them in one sweep.
#[derive(Debug)]
pub(crate) struct ChainRegistry {
	blocks: Vec<Arc<ChainBlock>>,
	slots: usize,
	growth: NonZeroUsize,
}

impl ChainRegistry {
	pub const fn new(growth: NonZeroUsize) -> Self {
		Self {
			blocks: Vec::new(),
			slots: 0,
			growth,
		}
	}

	/// Takes ownership of one block, expanding storage by `growth` slots when full.
	pub fn record(&mut self, block: Arc<ChainBlock>) -> Result<(), ClassError> {
		if self.blocks.len() >= self.slots {
			self.expand()?;
		}
		self.blocks.push(block);
		Ok(())
	}

	fn expand(&mut self) -> Result<(), ClassError> {
		let slots = self.slots + self.growth.get();
		self.blocks
			.try_reserve_exact(slots - self.blocks.len())
			.map_err(ClassError::out_of_memory("class registry", slots))?;
		self.slots = slots;
		Ok(())
	}

	/// Drops every recorded block along with the backing storage.
	///
	/// Returns the number of blocks released.
	pub fn release_all(&mut self) -> usize {
		let blocks = std::mem::take(&mut self.blocks);
		for block in &blocks {
			block.mark_released();
		}
		self.slots = 0;
		blocks.len()
	}

	pub fn len(&self) -> usize {
		self.blocks.len()
	}

	pub fn capacity(&self) -> usize {
		self.slots
	}
}
