//! Static class descriptors.
//!
//! Each concrete type declares exactly one `static` [`ClassDescriptor`]
//! naming its parent, so a hierarchy is a singly-linked chain ending at a
//! root with no parent:
//!
//! ```
//! use std::ffi::c_void;
//! use lineage_class::{ClassDescriptor, OBJECT_CLASS};
//!
//! unsafe fn list_construct(_obj: *mut c_void) {}
//!
//! static LIST_CLASS: ClassDescriptor = ClassDescriptor::new("list", Some(&OBJECT_CLASS), Some(list_construct), None, 32);
//!
//! let chains = lineage_class::ensure_initialized(&LIST_CLASS);
//! assert_eq!(chains.iter_constructors().count(), 1);
//! ```

use std::ffi::c_void;
use std::fmt;
use std::sync::Weak;
use std::sync::atomic::{AtomicU32, Ordering};

use arc_swap::ArcSwapOption;

use crate::chain::{ChainBlock, Chains};
use crate::epoch::Epoch;

/// Constructor or destructor for one class, called with the raw instance.
pub type InstanceFn = unsafe fn(*mut c_void);

/// Root descriptor hierarchies may derive from. It has no constructor or destructor.
pub static OBJECT_CLASS: ClassDescriptor = ClassDescriptor::new("object", None, None, None, 0);

/// Metadata for one type in a single-inheritance hierarchy.
///
/// The immutable part (`name`, `parent`, functions, size) is set at
/// declaration. The flattened part (`depth`, published chains, epoch stamp)
/// is only written by [`crate::ClassSystem`] while it holds its lock.
pub struct ClassDescriptor {
	name: &'static str,
	parent: Option<&'static ClassDescriptor>,
	construct: Option<InstanceFn>,
	destruct: Option<InstanceFn>,
	instance_size: usize,
	initialized: AtomicU32,
	depth: AtomicU32,
	published: ArcSwapOption<Weak<ChainBlock>>,
}

impl ClassDescriptor {
	/// Declares a class. The parent chain must be acyclic.
	pub const fn new(
		name: &'static str,
		parent: Option<&'static ClassDescriptor>,
		construct: Option<InstanceFn>,
		destruct: Option<InstanceFn>,
		instance_size: usize,
	) -> Self {
		Self {
			name,
			parent,
			construct,
			destruct,
			instance_size,
			initialized: AtomicU32::new(0),
			depth: AtomicU32::new(0),
			published: ArcSwapOption::const_empty(),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn parent(&self) -> Option<&'static ClassDescriptor> {
		self.parent
	}

	pub fn constructor(&self) -> Option<InstanceFn> {
		self.construct
	}

	pub fn destructor(&self) -> Option<InstanceFn> {
		self.destruct
	}

	/// Size in bytes of an instance of this exact class.
	pub fn instance_size(&self) -> usize {
		self.instance_size
	}

	/// Number of classes from this one up to the root, inclusive.
	///
	/// Zero until the class has been flattened once.
	pub fn depth(&self) -> u32 {
		self.depth.load(Ordering::Acquire)
	}

	/// Epoch of the last flatten, or `None` if never flattened.
	pub fn initialized_epoch(&self) -> Option<Epoch> {
		Epoch::from_stamp(self.initialized.load(Ordering::Acquire))
	}

	/// This class followed by each ancestor up to the root.
	pub fn ancestors(&self) -> impl Iterator<Item = &ClassDescriptor> {
		std::iter::successors(Some(self), |class| class.parent)
	}

	/// Returns true if `other` is this class or one of its ancestors.
	pub fn is_derived_from(&self, other: &ClassDescriptor) -> bool {
		self.ancestors().any(|class| std::ptr::eq(class, other))
	}

	/// Chains published for `epoch`, if the stamp matches and the block is
	/// still registered.
	///
	/// A stamp can match a stale block once the epoch wraps around, so a
	/// block the registry already released is never returned.
	pub(crate) fn current_chains(&self, epoch: Epoch) -> Option<Chains> {
		if self.initialized.load(Ordering::Acquire) != epoch.get() {
			return None;
		}
		let published = self.published.load();
		let block = published.as_ref()?.upgrade()?;
		if block.is_released() {
			return None;
		}
		Some(Chains::new(block))
	}

	/// Publishes freshly flattened chains. The stamp is written last.
	pub(crate) fn publish(&self, chains: &Chains, depth: u32, epoch: Epoch) {
		self.depth.store(depth, Ordering::Relaxed);
		self.published.store(Some(std::sync::Arc::new(chains.downgrade())));
		self.initialized.store(epoch.get(), Ordering::Release);
	}
}

impl fmt::Debug for ClassDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClassDescriptor")
			.field("name", &self.name)
			.field("parent", &self.parent.map(ClassDescriptor::name))
			.field("instance_size", &self.instance_size)
			.field("initialized", &self.initialized_epoch())
			.field("depth", &self.depth())
			.finish_non_exhaustive()
	}
}
