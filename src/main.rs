use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, trace, LevelFilter};
use field_ws::{FieldWritingSystemMapping, FieldWritingSystemMappings};

fn setup_logger(verbose: bool) -> Result<()> {
	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
		})
		.level(if verbose { LevelFilter::Trace } else { LevelFilter::Info })
		.chain(std::io::stderr())
		.apply()
		.context("failed to set up logger")
}

fn read_or_new(path: &Path) -> Result<FieldWritingSystemMappings> {
	match File::open(path) {
		Ok(file) => field_ws::mapping_list::read(BufReader::new(file))
			.with_context(|| anyhow!("failed to read mapping file {path:?}")),
		Err(e) if e.kind() == ErrorKind::NotFound => {
			info!("mapping file {path:?} doesn't exist yet, starting with no mappings");
			Ok(FieldWritingSystemMappings::new())
		},
		Err(e) => Err(e).with_context(|| anyhow!("failed to open mapping file {path:?}")),
	}
}

fn show_optional(value: Option<&str>) -> &str {
	value.unwrap_or("-")
}

fn main() -> Result<()> {
	let cli: Cli = Cli::parse();

	setup_logger(cli.verbose)?;
	trace!("{cli:?}");

	match cli.command {
		Command::Show { file } => {
			let mappings = field_ws::mapping_list::read_file(&file)?;

			for mapping in &mappings {
				println!("{}\t{}\t{}\t{}",
					mapping.field_name,
					mapping.writing_system_handle,
					show_optional(mapping.writing_system_id.as_deref()),
					show_optional(mapping.writing_system_name.as_deref()),
				);
			}
		},
		Command::Set { file, field, handle, id, name } => {
			let mut mappings = read_or_new(&file)?;

			let mut mapping = match id {
				Some(id) => FieldWritingSystemMapping::with_id(field, id),
				None => FieldWritingSystemMapping::with_handle(field, 0),
			};
			if let Some(handle) = handle {
				mapping.writing_system_handle = handle;
			}
			mapping.writing_system_name = name;

			if let Some(old) = mappings.insert(mapping) {
				info!("replaced mapping for field {:?}", old.field_name);
			}

			field_ws::mapping_list::write_file(&mappings, &file)?;
		},
		Command::Remove { file, field } => {
			let mut mappings = field_ws::mapping_list::read_file(&file)?;

			if mappings.remove(&field).is_none() {
				bail!("no mapping for field {field:?} in {file:?}");
			}

			field_ws::mapping_list::write_file(&mappings, &file)?;
		},
		Command::Copy { file, from, to } => {
			let mut mappings = field_ws::mapping_list::read_file(&file)?;

			let mut mapping = mappings.get(&from)
				.with_context(|| anyhow!("no mapping for field {from:?} in {file:?}"))?
				.copy();
			mapping.field_name = to;

			if let Some(old) = mappings.insert(mapping) {
				info!("replaced mapping for field {:?}", old.field_name);
			}

			field_ws::mapping_list::write_file(&mappings, &file)?;
		},
	}

	Ok(())
}

#[derive(Debug, Parser)]
struct Cli {
	/// Be verbose.
	#[arg(short = 'v', long = "verbose")]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Prints all mappings of a mapping file, one per line
	Show {
		file: PathBuf,
	},
	/// Adds a mapping, or replaces the mapping of that field
	///
	/// Creates the mapping file if it doesn't exist.
	Set {
		file: PathBuf,
		field: String,
		/// The handle of the writing system.
		#[arg(long = "ws")]
		handle: Option<i32>,
		/// The id of the writing system.
		#[arg(long = "ws-id")]
		id: Option<String>,
		/// The name of the writing system.
		#[arg(long = "ws-name")]
		name: Option<String>,
	},
	/// Removes the mapping of a field
	Remove {
		file: PathBuf,
		field: String,
	},
	/// Copies the mapping of one field to another field
	Copy {
		file: PathBuf,
		from: String,
		to: String,
	},
}

#[cfg(test)]
mod testing {
	use std::path::PathBuf;
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use field_ws::{FieldWritingSystemMapping, FieldWritingSystemMappings};
	use crate::read_or_new;

	fn temp_path(name: &str) -> PathBuf {
		std::env::temp_dir().join(format!("field_ws_tool_{name}_{}", std::process::id()))
	}

	#[test]
	fn missing_file_is_empty() -> Result<()> {
		let path = temp_path("missing.xml");

		assert_eq!(read_or_new(&path)?, FieldWritingSystemMappings::new());
		Ok(())
	}

	#[test]
	fn existing_file_is_read() -> Result<()> {
		let path = temp_path("existing.xml");
		let mappings = FieldWritingSystemMappings::from(vec![
			FieldWritingSystemMapping::with_id("gloss", "en"),
		]);
		field_ws::mapping_list::write_file(&mappings, &path)?;

		let actual = read_or_new(&path);
		std::fs::remove_file(&path)?;

		assert_eq!(actual?, mappings);
		Ok(())
	}

	#[test]
	fn unopenable_file_is_an_error() -> Result<()> {
		// a file as parent directory makes opening fail with something other than "not found"
		let parent = temp_path("not_a_dir");
		std::fs::write(&parent, "")?;

		let actual = read_or_new(&parent.join("mappings.xml"));
		std::fs::remove_file(&parent)?;

		assert!(actual.is_err(), "{actual:?}");
		Ok(())
	}
}
