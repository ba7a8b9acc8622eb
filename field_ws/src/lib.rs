//! Crate for the mapping between a data field and the writing system its contents are in.
//!
//! The central type is [`FieldWritingSystemMapping`], a plain value associating one field name with one
//! writing system. The writing system may be given by its numeric handle, by its string id, or taken
//! from anything implementing [`WritingSystemInfo`].
//!
//! Mappings are kept in a [`FieldWritingSystemMappings`] list, which is what gets persisted. See the
//! [`mapping_list`] module for reading and writing mapping files, and the [`mapping`] module for the
//! xml representation of a single mapping.

pub mod mapping;
pub mod mapping_list;
pub mod writing_system;

pub use mapping::FieldWritingSystemMapping;
pub use mapping_list::FieldWritingSystemMappings;
pub use writing_system::{WritingSystem, WritingSystemInfo};
