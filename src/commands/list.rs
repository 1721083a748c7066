use pouch::settings::Settings;
use pouch::{ContentStore, Error, Result};

pub struct Options<'a> {
	pub json: bool,
	pub settings: &'a Settings,
}

pub fn execute(options: &Options) -> Result<()> {
	let store = ContentStore::load(options.settings.input()?, &options.settings.load_options())?;
	println!("{}", render(&store, options.json)?);
	Ok(())
}

fn render(store: &ContentStore, json: bool) -> Result<String> {
	let mut keys = store.keys();
	keys.sort_unstable();

	if json {
		serde_json::to_string_pretty(&keys)
			.map_err(|err| Error::message(format!("Failed to serialize keys: {}.", err)))
	} else {
		Ok(keys.join("\n"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pouch::LoadOptions;
	use std::fs;
	use tempfile::TempDir;

	fn store() -> (TempDir, ContentStore) {
		let directory = TempDir::new().unwrap();
		fs::create_dir_all(directory.path().join("b")).unwrap();
		fs::write(directory.path().join("b").join("x.sql"), "SELECT 'b'").unwrap();
		fs::write(directory.path().join("a.sql"), "SELECT 'a'").unwrap();
		let store = ContentStore::load(directory.path(), &LoadOptions::default()).unwrap();
		(directory, store)
	}

	#[test]
	fn test_render() {
		let (_directory, store) = store();
		assert_eq!(render(&store, false).unwrap(), "a.sql\nb/x.sql");
	}

	#[test]
	fn test_render_json() {
		let (_directory, store) = store();
		let keys: Vec<String> = serde_json::from_str(&render(&store, true).unwrap()).unwrap();
		assert_eq!(keys, vec!["a.sql", "b/x.sql"]);
	}
}
