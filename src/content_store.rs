use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

pub const DEFAULT_EXTENSION: &str = "sql";

/// Read access to named text contents.
///
/// Implementations must be safe to share between threads.
pub trait ContentSource: Sync {
	fn get(&self, key: &str) -> Option<&str>;

	fn keys(&self) -> Vec<&str>;
}

#[derive(Clone, Debug)]
pub struct LoadOptions {
	/// Files whose name ends with `.<extension>` are loaded. A leading dot is ignored.
	pub extension: String,
	pub follow_links: bool,
}

impl Default for LoadOptions {
	fn default() -> Self {
		LoadOptions {
			extension: DEFAULT_EXTENSION.to_string(),
			follow_links: false,
		}
	}
}

impl LoadOptions {
	fn suffix(&self) -> String {
		format!(".{}", self.extension.trim_start_matches('.'))
	}
}

/// Contents of the matching files of a directory tree, keyed by their path
/// relative to the root, with `/` as separator.
///
/// The store is never modified once loaded, so it can be shared between
/// threads, e.g. behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentStore {
	entries: HashMap<String, String>,
}

impl ContentStore {
	/// Recursively loads the files of `root` matching the options.
	///
	/// Any failure aborts the whole load.
	pub fn load(root: &Path, options: &LoadOptions) -> Result<Self> {
		let metadata = fs::metadata(root).map_err(|err| match err.kind() {
			io::ErrorKind::NotFound => Error::not_found(root, err),
			_ => Error::failed_to_get_metadata(root, err),
		})?;

		if !metadata.is_dir() {
			return Err(Error::not_a_directory(root));
		}

		let entries = scan(root, options)?;
		log::info!(
			"Loaded {} file(s) from '{}'.",
			entries.len(),
			root.to_string_lossy()
		);

		Ok(ContentStore { entries })
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	/// Returns all keys, in no particular order.
	pub fn keys(&self) -> Vec<&str> {
		self.entries.keys().map(String::as_str).collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(key, contents)| (key.as_str(), contents.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn into_sorted(self) -> BTreeMap<String, String> {
		self.entries.into_iter().collect()
	}
}

impl ContentSource for ContentStore {
	fn get(&self, key: &str) -> Option<&str> {
		ContentStore::get(self, key)
	}

	fn keys(&self) -> Vec<&str> {
		ContentStore::keys(self)
	}
}

fn scan(root: &Path, options: &LoadOptions) -> Result<HashMap<String, String>> {
	let suffix = options.suffix();

	WalkDir::new(root)
		.follow_links(options.follow_links)
		.sort_by_file_name()
		.into_iter()
		.filter_map(|entry| match entry {
			Ok(entry) => {
				if is_matching_file(&entry, &suffix) {
					Some(load_entry(root, &entry))
				} else {
					log::debug!("Skipping '{}'.", entry.path().to_string_lossy());
					None
				}
			}
			Err(err) => {
				let path = err.path().unwrap_or(root).to_path_buf();
				Some(Err(Error::failed_to_read_directory(path, err)))
			}
		})
		.collect()
}

fn is_matching_file(entry: &DirEntry, suffix: &str) -> bool {
	entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(suffix)
}

fn load_entry(root: &Path, entry: &DirEntry) -> Result<(String, String)> {
	let path = entry.path();
	let key = to_key(root, path).ok_or_else(|| Error::path_has_invalid_file_name(path))?;
	let contents = fs::read_to_string(path).map_err(|err| Error::failed_to_read(path, err))?;

	log::debug!("Loaded '{}' ({} bytes).", key, contents.len());
	Ok((key, contents))
}

fn to_key(root: &Path, path: &Path) -> Option<String> {
	let relative = path.strip_prefix(root).ok()?;
	let components = relative
		.components()
		.map(|component| component.as_os_str().to_str())
		.collect::<Option<Vec<_>>>()?;
	Some(components.join("/"))
}
