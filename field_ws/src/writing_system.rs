//! The writing system a [`FieldWritingSystemMapping`][crate::FieldWritingSystemMapping] can be built from.

/// Anything that knows the handle, id and name of a writing system.
///
/// These three are read exactly once, when a mapping is created with
/// [`FieldWritingSystemMapping::from_writing_system`][crate::FieldWritingSystemMapping::from_writing_system].
/// The mapping doesn't keep a reference to the implementor.
pub trait WritingSystemInfo {
	/// The numeric handle of the writing system.
	fn handle(&self) -> i32;
	/// The string id of the writing system, for example `"en"` or `"qaa-x-kal"`.
	fn id(&self) -> &str;
	/// The name of the writing system, as shown to the user.
	fn name(&self) -> &str;
}

impl<T: WritingSystemInfo + ?Sized> WritingSystemInfo for &T {
	fn handle(&self) -> i32 {
		(**self).handle()
	}
	fn id(&self) -> &str {
		(**self).id()
	}
	fn name(&self) -> &str {
		(**self).name()
	}
}

impl<T: WritingSystemInfo + ?Sized> WritingSystemInfo for Box<T> {
	fn handle(&self) -> i32 {
		(**self).handle()
	}
	fn id(&self) -> &str {
		(**self).id()
	}
	fn name(&self) -> &str {
		(**self).name()
	}
}

/// A writing system known by all of its handle, id and name.
///
/// ```
/// use field_ws::{WritingSystem, WritingSystemInfo};
///
/// let ws = WritingSystem::new(7, "en", "English");
/// assert_eq!(ws.handle(), 7);
/// assert_eq!(ws.id(), "en");
/// assert_eq!(ws.name(), "English");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WritingSystem {
	pub handle: i32,
	pub id: String,
	pub name: String,
}

impl WritingSystem {
	pub fn new(handle: i32, id: impl Into<String>, name: impl Into<String>) -> WritingSystem {
		WritingSystem {
			handle,
			id: id.into(),
			name: name.into(),
		}
	}
}

impl WritingSystemInfo for WritingSystem {
	fn handle(&self) -> i32 {
		self.handle
	}
	fn id(&self) -> &str {
		&self.id
	}
	fn name(&self) -> &str {
		&self.name
	}
}
