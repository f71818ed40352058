//! Shared descriptors and instance functions for class system tests.

use std::ffi::c_void;

/// Instance type whose constructors and destructors log into `events`.
#[derive(Debug, Default)]
pub(crate) struct Trace {
	pub events: Vec<&'static str>,
}

impl Trace {
	pub fn as_instance(&mut self) -> *mut c_void {
		(self as *mut Trace).cast()
	}
}

unsafe fn push(obj: *mut c_void, event: &'static str) {
	// SAFETY: fixtures are only ever run against a `Trace`.
	unsafe { (*obj.cast::<Trace>()).events.push(event) }
}

pub(crate) unsafe fn construct_a(obj: *mut c_void) {
	unsafe { push(obj, "construct a") }
}

pub(crate) unsafe fn construct_b(obj: *mut c_void) {
	unsafe { push(obj, "construct b") }
}

pub(crate) unsafe fn construct_c(obj: *mut c_void) {
	unsafe { push(obj, "construct c") }
}

pub(crate) unsafe fn destruct_a(obj: *mut c_void) {
	unsafe { push(obj, "destruct a") }
}

pub(crate) unsafe fn destruct_b(obj: *mut c_void) {
	unsafe { push(obj, "destruct b") }
}

pub(crate) unsafe fn destruct_c(obj: *mut c_void) {
	unsafe { push(obj, "destruct c") }
}

/// Function addresses of a chain region, sentinel included.
pub(crate) fn addrs(region: &[Option<crate::InstanceFn>]) -> Vec<Option<usize>> {
	region.iter().map(|slot| slot.map(|f| f as usize)).collect()
}

/// Declares a fresh `$a <- $b <- $c` hierarchy where every level defines both functions.
///
/// Each test needs its own descriptors since a stamp is only meaningful to the
/// system that wrote it.
macro_rules! traced_hierarchy {
	($a:ident, $b:ident, $c:ident) => {
		static $a: $crate::ClassDescriptor = $crate::ClassDescriptor::new(
			"a",
			None,
			Some($crate::test_fixtures::construct_a),
			Some($crate::test_fixtures::destruct_a),
			8,
		);
		static $b: $crate::ClassDescriptor = $crate::ClassDescriptor::new(
			"b",
			Some(&$a),
			Some($crate::test_fixtures::construct_b),
			Some($crate::test_fixtures::destruct_b),
			16,
		);
		static $c: $crate::ClassDescriptor = $crate::ClassDescriptor::new(
			"c",
			Some(&$b),
			Some($crate::test_fixtures::construct_c),
			Some($crate::test_fixtures::destruct_c),
			24,
		);
	};
}

pub(crate) use traced_hierarchy;
