//! The mapping of one field to one writing system, and its xml representation.
//!
//! A mapping is stored as a single `FieldWsInfo` element, with all values in attributes:
//! ```xml
//! <FieldWsInfo FieldName="lexeme" WsId="qaa-x-kal" WsName="Kalaba" Ws="12"/>
//! ```
//! Attributes that are not set are left out.
//!
//! You can read such an element with [`read`] or [`read_str`], and write it with [`write`][fn@write] or
//! [`write_string`]. Whole mapping files are handled by [`crate::mapping_list`].

use std::io::{Read, Write};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use crate::writing_system::WritingSystemInfo;

/// The names of the xml attributes the fields of a [`FieldWritingSystemMapping`] are stored in.
///
/// These must not change, existing mapping files use them.
pub mod attribute {
	pub const FIELD_NAME: &str = "FieldName";
	pub const WRITING_SYSTEM_ID: &str = "WsId";
	pub const WRITING_SYSTEM_NAME: &str = "WsName";
	pub const WRITING_SYSTEM_HANDLE: &str = "Ws";
}

/// Associates the field named [`field_name`][Self::field_name] with a writing system.
///
/// The writing system can be given by [handle][Self::writing_system_handle], by [id][Self::writing_system_id]
/// or by both, depending on how the mapping was created. Nothing keeps these consistent with each other, all
/// fields can be changed freely after creation.
///
/// | field                   | xml attribute | unset value |
/// |-------------------------|---------------|-------------|
/// | `field_name`            | `FieldName`   | `""`        |
/// | `writing_system_id`     | `WsId`        | `None`      |
/// | `writing_system_name`   | `WsName`      | `None`      |
/// | `writing_system_handle` | `Ws`          | `0`         |
///
/// The [`Default`] value has all fields unset, it's what deserialization starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename = "FieldWsInfo")]
pub struct FieldWritingSystemMapping {
	#[serde(rename = "@FieldName", default)]
	pub field_name: String,
	#[serde(rename = "@WsId", default, skip_serializing_if = "Option::is_none")]
	pub writing_system_id: Option<String>,
	#[serde(rename = "@WsName", default, skip_serializing_if = "Option::is_none")]
	pub writing_system_name: Option<String>,
	#[serde(rename = "@Ws", default)]
	pub writing_system_handle: i32,
}

impl FieldWritingSystemMapping {
	/// The name of the xml element a mapping is stored as.
	pub const ELEMENT_NAME: &'static str = "FieldWsInfo";

	/// Creates a mapping from the field to the writing system with the given handle.
	///
	/// ```
	/// use field_ws::FieldWritingSystemMapping;
	///
	/// let mapping = FieldWritingSystemMapping::with_handle("lexeme", 12);
	/// assert_eq!(mapping.field_name, "lexeme");
	/// assert_eq!(mapping.writing_system_handle, 12);
	/// assert_eq!(mapping.writing_system_id, None);
	/// assert_eq!(mapping.writing_system_name, None);
	/// ```
	pub fn with_handle(field_name: impl Into<String>, writing_system_handle: i32) -> FieldWritingSystemMapping {
		FieldWritingSystemMapping {
			field_name: field_name.into(),
			writing_system_id: None,
			writing_system_name: None,
			writing_system_handle,
		}
	}

	/// Creates a mapping from the field to the writing system with the given id.
	///
	/// The handle is left at `0`, meaning unknown.
	pub fn with_id(field_name: impl Into<String>, writing_system_id: impl Into<String>) -> FieldWritingSystemMapping {
		FieldWritingSystemMapping {
			field_name: field_name.into(),
			writing_system_id: Some(writing_system_id.into()),
			writing_system_name: None,
			writing_system_handle: 0,
		}
	}

	/// Creates a mapping from the field to the given writing system, copying its handle, id and name.
	///
	/// If there's no writing system, this is the same as [`with_handle`][Self::with_handle] with a handle
	/// of `0`.
	/// ```
	/// use field_ws::{FieldWritingSystemMapping, WritingSystem};
	///
	/// let ws = WritingSystem::new(12, "qaa-x-kal", "Kalaba");
	/// let mapping = FieldWritingSystemMapping::from_writing_system("lexeme", Some(&ws));
	/// assert_eq!(mapping.writing_system_handle, 12);
	/// assert_eq!(mapping.writing_system_id.as_deref(), Some("qaa-x-kal"));
	/// assert_eq!(mapping.writing_system_name.as_deref(), Some("Kalaba"));
	///
	/// let mapping = FieldWritingSystemMapping::from_writing_system("lexeme", None);
	/// assert_eq!(mapping, FieldWritingSystemMapping::with_handle("lexeme", 0));
	/// ```
	pub fn from_writing_system(
		field_name: impl Into<String>,
		writing_system: Option<&dyn WritingSystemInfo>,
	) -> FieldWritingSystemMapping {
		match writing_system {
			Some(writing_system) => {
				let mut mapping = FieldWritingSystemMapping::with_handle(field_name, writing_system.handle());
				mapping.writing_system_id = Some(writing_system.id().to_owned());
				mapping.writing_system_name = Some(writing_system.name().to_owned());
				mapping
			},
			None => FieldWritingSystemMapping::with_handle(field_name, 0),
		}
	}

	/// Creates a new mapping with the same values.
	///
	/// The two mappings are independent, changing one doesn't change the other. This is the same as
	/// [`Clone::clone`].
	pub fn copy(&self) -> FieldWritingSystemMapping {
		let mut copy = FieldWritingSystemMapping::with_handle(self.field_name.clone(), self.writing_system_handle);
		copy.writing_system_id = self.writing_system_id.clone();
		copy.writing_system_name = self.writing_system_name.clone();
		copy
	}
}

/// Reads a single `FieldWsInfo` element from the given reader.
pub fn read(reader: impl Read) -> Result<FieldWritingSystemMapping> {
	serde_xml_rs::from_reader(reader)
		.with_context(|| anyhow!("failed to read {:?} element", FieldWritingSystemMapping::ELEMENT_NAME))
}

/// Reads a single `FieldWsInfo` element from a string.
///
/// ```
/// use field_ws::mapping;
///
/// let mapping = mapping::read_str(r#"<FieldWsInfo FieldName="gloss" WsId="en" Ws="3"/>"#).unwrap();
/// assert_eq!(mapping.field_name, "gloss");
/// assert_eq!(mapping.writing_system_id.as_deref(), Some("en"));
/// assert_eq!(mapping.writing_system_name, None);
/// assert_eq!(mapping.writing_system_handle, 3);
/// ```
pub fn read_str(string: &str) -> Result<FieldWritingSystemMapping> {
	read(string.as_bytes())
}

/// Writes the mapping as a `FieldWsInfo` element to the given writer.
pub fn write(mapping: &FieldWritingSystemMapping, writer: impl Write) -> Result<()> {
	write_xml(mapping, writer)
		.with_context(|| anyhow!("failed to write mapping for field {:?}", mapping.field_name))
}

/// Serializes the value as xml into the writer, writing tabs as `&#x9;`.
///
/// A literal tab in an attribute value is read back as a space, only the character reference keeps it.
/// The values never contain markup of their own, so every tab in the output is part of an attribute value.
pub(crate) fn write_xml(value: &impl Serialize, mut writer: impl Write) -> Result<()> {
	let mut xml = Vec::new();
	serde_xml_rs::to_writer(&mut xml, value)?;

	for (index, part) in xml.split(|&byte| byte == b'\t').enumerate() {
		if index != 0 {
			writer.write_all(b"&#x9;")?;
		}
		writer.write_all(part)?;
	}
	Ok(())
}

/// Writes the mapping as a `FieldWsInfo` element into a string.
pub fn write_string(mapping: &FieldWritingSystemMapping) -> Result<String> {
	let mut vec = Vec::new();
	write(mapping, &mut vec)?;
	String::from_utf8(vec)
		.with_context(|| anyhow!("written mapping for field {:?} is not valid utf8", mapping.field_name))
}
