use pouch::settings::Settings;
use pouch::{ContentStore, Error, Result};

pub struct Options<'a> {
	pub key: &'a str,
	pub settings: &'a Settings,
}

pub fn execute(options: &Options) -> Result<()> {
	let store = ContentStore::load(options.settings.input()?, &options.settings.load_options())?;
	print!("{}", lookup(&store, options.key)?);
	Ok(())
}

fn lookup<'a>(store: &'a ContentStore, key: &str) -> Result<&'a str> {
	store.get(key).ok_or_else(|| Error::key_not_found(key))
}

#[cfg(test)]
mod tests {
	use super::*;
	use pouch::{ErrorKind, LoadOptions};
	use std::fs;
	use tempfile::TempDir;

	#[test]
	fn test_lookup() {
		let directory = TempDir::new().unwrap();
		fs::write(directory.path().join("insert.sql"), "INSERT INTO post\r\n").unwrap();
		let store = ContentStore::load(directory.path(), &LoadOptions::default()).unwrap();

		assert_eq!(lookup(&store, "insert.sql").unwrap(), "INSERT INTO post\r\n");

		let err = lookup(&store, "delete.sql").unwrap_err();
		assert!(matches!(err.kind, ErrorKind::KeyNotFound(_)));
	}
}
