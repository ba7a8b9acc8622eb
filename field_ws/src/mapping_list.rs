//! The list of mappings, and functions to read and write it as a mapping file.
//!
//! # Reading
//! You can read a mapping file using [`read_file`], by passing a path. If you already have a [`Read`]er,
//! you can use [`read`], or [`read_str`] for a string.
//!
//! # Writing
//! For writing there are [`write_file`], [`write`][fn@write] and [`write_string`].
//!
//! # Format
//! A mapping file is an `ArrayOfFieldWsInfo` element, containing one `FieldWsInfo` element per mapping (see
//! [`crate::mapping`]), in order:
//! ```xml
//! <ArrayOfFieldWsInfo>
//!     <FieldWsInfo FieldName="lexeme" WsId="qaa-x-kal" WsName="Kalaba" Ws="12"/>
//!     <FieldWsInfo FieldName="gloss" WsId="en"/>
//! </ArrayOfFieldWsInfo>
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use anyhow::{anyhow, Context, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use crate::mapping::FieldWritingSystemMapping;

/// An ordered list of [`FieldWritingSystemMapping`]s.
///
/// Field names are not required to be unique. The lookup methods ([`get`][Self::get],
/// [`insert`][Self::insert], [`remove`][Self::remove]) act on the first mapping with the field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename = "ArrayOfFieldWsInfo")]
pub struct FieldWritingSystemMappings {
	#[serde(rename = "FieldWsInfo", default)]
	mappings: Vec<FieldWritingSystemMapping>,
}

impl FieldWritingSystemMappings {
	/// The name of the root xml element of a mapping file.
	pub const ELEMENT_NAME: &'static str = "ArrayOfFieldWsInfo";

	pub fn new() -> FieldWritingSystemMappings {
		FieldWritingSystemMappings { mappings: Vec::new() }
	}

	pub fn len(&self) -> usize {
		self.mappings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.mappings.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, FieldWritingSystemMapping> {
		self.mappings.iter()
	}

	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, FieldWritingSystemMapping> {
		self.mappings.iter_mut()
	}

	fn position(&self, field_name: &str) -> Option<usize> {
		self.mappings.iter().position(|mapping| mapping.field_name == field_name)
	}

	/// Returns the first mapping for the given field.
	pub fn get(&self, field_name: &str) -> Option<&FieldWritingSystemMapping> {
		self.mappings.iter().find(|mapping| mapping.field_name == field_name)
	}

	/// Returns the first mapping for the given field, mutably.
	pub fn get_mut(&mut self, field_name: &str) -> Option<&mut FieldWritingSystemMapping> {
		self.mappings.iter_mut().find(|mapping| mapping.field_name == field_name)
	}

	/// Adds the mapping.
	///
	/// If there already is a mapping for the same field, it's replaced in place and returned. Otherwise
	/// the mapping is appended at the end.
	/// ```
	/// use field_ws::{FieldWritingSystemMapping, FieldWritingSystemMappings};
	///
	/// let mut list = FieldWritingSystemMappings::new();
	/// assert_eq!(list.insert(FieldWritingSystemMapping::with_handle("lexeme", 1)), None);
	/// assert_eq!(list.insert(FieldWritingSystemMapping::with_id("gloss", "en")), None);
	///
	/// let old = list.insert(FieldWritingSystemMapping::with_handle("lexeme", 2));
	/// assert_eq!(old, Some(FieldWritingSystemMapping::with_handle("lexeme", 1)));
	///
	/// let fields: Vec<_> = list.iter().map(|m| m.field_name.as_str()).collect();
	/// assert_eq!(fields, ["lexeme", "gloss"]);
	/// ```
	pub fn insert(&mut self, mapping: FieldWritingSystemMapping) -> Option<FieldWritingSystemMapping> {
		if let Some(index) = self.position(&mapping.field_name) {
			debug!("replacing mapping for field {:?}", mapping.field_name);
			Some(std::mem::replace(&mut self.mappings[index], mapping))
		} else {
			self.mappings.push(mapping);
			None
		}
	}

	/// Removes the first mapping for the given field, and returns it.
	pub fn remove(&mut self, field_name: &str) -> Option<FieldWritingSystemMapping> {
		self.position(field_name)
			.map(|index| self.mappings.remove(index))
	}

	/// Creates a new list, with every mapping [copied][FieldWritingSystemMapping::copy].
	pub fn copy(&self) -> FieldWritingSystemMappings {
		self.mappings.iter()
			.map(FieldWritingSystemMapping::copy)
			.collect()
	}
}

impl From<Vec<FieldWritingSystemMapping>> for FieldWritingSystemMappings {
	fn from(mappings: Vec<FieldWritingSystemMapping>) -> Self {
		FieldWritingSystemMappings { mappings }
	}
}

impl From<FieldWritingSystemMappings> for Vec<FieldWritingSystemMapping> {
	fn from(value: FieldWritingSystemMappings) -> Self {
		value.mappings
	}
}

impl FromIterator<FieldWritingSystemMapping> for FieldWritingSystemMappings {
	fn from_iter<T: IntoIterator<Item=FieldWritingSystemMapping>>(iter: T) -> Self {
		FieldWritingSystemMappings { mappings: iter.into_iter().collect() }
	}
}

impl Extend<FieldWritingSystemMapping> for FieldWritingSystemMappings {
	fn extend<T: IntoIterator<Item=FieldWritingSystemMapping>>(&mut self, iter: T) {
		for mapping in iter {
			self.insert(mapping);
		}
	}
}

impl IntoIterator for FieldWritingSystemMappings {
	type Item = FieldWritingSystemMapping;
	type IntoIter = std::vec::IntoIter<FieldWritingSystemMapping>;

	fn into_iter(self) -> Self::IntoIter {
		self.mappings.into_iter()
	}
}

impl<'a> IntoIterator for &'a FieldWritingSystemMappings {
	type Item = &'a FieldWritingSystemMapping;
	type IntoIter = std::slice::Iter<'a, FieldWritingSystemMapping>;

	fn into_iter(self) -> Self::IntoIter {
		self.mappings.iter()
	}
}

/// Reads a mapping file, by opening the file given by the path.
pub fn read_file(path: impl AsRef<Path>) -> Result<FieldWritingSystemMappings> {
	let path = path.as_ref();
	trace!("reading mapping file {path:?}");
	File::open(path)
		.map_err(anyhow::Error::from)
		.and_then(|file| read(BufReader::new(file)))
		.with_context(|| anyhow!("failed to read mapping file {path:?}"))
}

/// Reads a mapping file from the given reader.
pub fn read(reader: impl Read) -> Result<FieldWritingSystemMappings> {
	serde_xml_rs::from_reader(reader)
		.with_context(|| anyhow!("failed to read {:?} element", FieldWritingSystemMappings::ELEMENT_NAME))
}

/// Reads a mapping file from a string.
///
/// ```
/// use field_ws::mapping_list;
///
/// let xml = r#"
/// <ArrayOfFieldWsInfo>
///     <FieldWsInfo FieldName="lexeme" Ws="12"/>
///     <FieldWsInfo FieldName="gloss" WsId="en"/>
/// </ArrayOfFieldWsInfo>
/// "#;
///
/// let list = mapping_list::read_str(xml).unwrap();
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.get("gloss").unwrap().writing_system_id.as_deref(), Some("en"));
/// ```
pub fn read_str(string: &str) -> Result<FieldWritingSystemMappings> {
	read(string.as_bytes())
}

/// Writes the mappings to the file given by the path, replacing it if it exists.
pub fn write_file(mappings: &FieldWritingSystemMappings, path: impl AsRef<Path>) -> Result<()> {
	let path = path.as_ref();
	trace!("writing {} mappings to {path:?}", mappings.len());
	File::create(path)
		.map_err(anyhow::Error::from)
		.and_then(|file| {
			let mut writer = BufWriter::new(file);
			write(mappings, &mut writer)?;
			writer.flush()?;
			Ok(())
		})
		.with_context(|| anyhow!("failed to write mapping file {path:?}"))
}

/// Writes the mappings to the given writer.
pub fn write(mappings: &FieldWritingSystemMappings, writer: impl Write) -> Result<()> {
	crate::mapping::write_xml(mappings, writer)
		.with_context(|| anyhow!("failed to write {:?} element", FieldWritingSystemMappings::ELEMENT_NAME))
}

/// Writes the mappings into a string.
pub fn write_string(mappings: &FieldWritingSystemMappings) -> Result<String> {
	let mut vec = Vec::new();
	write(mappings, &mut vec)?;
	String::from_utf8(vec)
		.context("written mapping file is not valid utf8")
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use crate::mapping::FieldWritingSystemMapping;
	use crate::mapping_list::FieldWritingSystemMappings;
	use crate::writing_system::WritingSystem;

	fn example() -> FieldWritingSystemMappings {
		let ws = WritingSystem::new(12, "qaa-x-kal", "Kalaba");
		FieldWritingSystemMappings::from(vec![
			FieldWritingSystemMapping::from_writing_system("lexeme", Some(&ws)),
			FieldWritingSystemMapping::with_id("gloss", "en"),
			FieldWritingSystemMapping::with_handle("note", 3),
		])
	}

	#[test]
	fn get() {
		let list = example();

		assert_eq!(list.get("gloss"), Some(&FieldWritingSystemMapping::with_id("gloss", "en")));
		assert_eq!(list.get("definition"), None);
	}

	#[test]
	fn get_mut() {
		let mut list = example();

		if let Some(mapping) = list.get_mut("note") {
			mapping.writing_system_handle = 4;
		}

		assert_eq!(list.get("note"), Some(&FieldWritingSystemMapping::with_handle("note", 4)));
	}

	#[test]
	fn insert_replaces_in_place() {
		let mut list = example();

		let old = list.insert(FieldWritingSystemMapping::with_handle("gloss", 7));

		assert_eq!(old, Some(FieldWritingSystemMapping::with_id("gloss", "en")));
		assert_eq!(list.len(), 3);
		let fields: Vec<_> = list.iter().map(|m| m.field_name.as_str()).collect();
		assert_eq!(fields, ["lexeme", "gloss", "note"]);
		assert_eq!(list.get("gloss"), Some(&FieldWritingSystemMapping::with_handle("gloss", 7)));
	}

	#[test]
	fn insert_appends() {
		let mut list = example();

		assert_eq!(list.insert(FieldWritingSystemMapping::with_id("definition", "fr")), None);

		assert_eq!(list.len(), 4);
		assert_eq!(list.iter().next_back(), Some(&FieldWritingSystemMapping::with_id("definition", "fr")));
	}

	#[test]
	fn duplicates_act_on_first() {
		let mut list = FieldWritingSystemMappings::from(vec![
			FieldWritingSystemMapping::with_handle("lexeme", 1),
			FieldWritingSystemMapping::with_handle("lexeme", 2),
		]);

		assert_eq!(list.get("lexeme"), Some(&FieldWritingSystemMapping::with_handle("lexeme", 1)));
		assert_eq!(list.remove("lexeme"), Some(FieldWritingSystemMapping::with_handle("lexeme", 1)));
		assert_eq!(list.get("lexeme"), Some(&FieldWritingSystemMapping::with_handle("lexeme", 2)));
		assert_eq!(list.remove("lexeme"), Some(FieldWritingSystemMapping::with_handle("lexeme", 2)));
		assert_eq!(list.remove("lexeme"), None);
		assert!(list.is_empty());
	}

	#[test]
	fn extend_inserts() {
		let mut list = example();

		list.extend([
			FieldWritingSystemMapping::with_handle("lexeme", 1),
			FieldWritingSystemMapping::with_handle("definition", 2),
		]);

		let fields: Vec<_> = (&list).into_iter().map(|m| m.field_name.as_str()).collect();
		assert_eq!(fields, ["lexeme", "gloss", "note", "definition"]);
		assert_eq!(list.get("lexeme"), Some(&FieldWritingSystemMapping::with_handle("lexeme", 1)));
	}

	#[test]
	fn copy_is_independent() {
		let original = example();

		let mut copy = original.copy();
		assert_eq!(copy, original);

		for mapping in copy.iter_mut() {
			mapping.writing_system_handle += 100;
		}
		copy.remove("note");

		assert_eq!(original, example());
		assert_eq!(copy.len(), 2);
		assert_eq!(copy.get("lexeme").map(|m| m.writing_system_handle), Some(112));
	}

	#[test]
	fn read_empty() -> Result<()> {
		assert_eq!(super::read_str("<ArrayOfFieldWsInfo/>")?, FieldWritingSystemMappings::new());
		assert_eq!(super::read_str("<ArrayOfFieldWsInfo></ArrayOfFieldWsInfo>")?, FieldWritingSystemMappings::new());
		Ok(())
	}

	#[test]
	fn read_malformed() {
		assert!(super::read_str("<ArrayOfFieldWsInfo><FieldWsInfo FieldName=\"x\"").is_err());
		assert!(super::read_str("<ArrayOfFieldWsInfo><FieldWsInfo Ws=\"not a number\"/></ArrayOfFieldWsInfo>").is_err());
	}

	#[test]
	fn round_trip() -> Result<()> {
		let mut list = example();
		let mut tabbed = FieldWritingSystemMapping::with_id("tab\tfield", "\tqaa-x-kal\t");
		tabbed.writing_system_name = Some("Kalaba\t(old)".to_owned());
		list.insert(tabbed);

		let xml = super::write_string(&list)?;

		assert!(xml.contains(FieldWritingSystemMappings::ELEMENT_NAME), "{xml}");
		assert_eq!(super::read_str(&xml)?, list, "{xml}");
		Ok(())
	}
}
