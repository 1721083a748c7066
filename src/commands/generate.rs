use pouch::generator::{self, GenerateOptions, Generator};
use pouch::settings::Settings;
use pouch::{ContentStore, Result};
use std::path::PathBuf;

pub struct Options<'a> {
	pub settings: &'a Settings,
}

pub fn execute(options: &Options) -> Result<Vec<PathBuf>> {
	let settings = options.settings;

	let store = ContentStore::load(settings.input()?, &settings.load_options())?;

	let generator = Generator::new()?;
	let files = generator.generate(
		&store,
		&GenerateOptions {
			common_file: settings.common_file.as_deref(),
			directory: &settings.output,
			file: &settings.file,
			name: &settings.name,
		},
	)?;

	generator::write_files(&files)?;

	Ok(files.into_iter().map(|file| file.path).collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use pouch::settings::Overrides;
	use pouch::ErrorKind;
	use std::fs;
	use tempfile::TempDir;

	#[test]
	fn test_execute() {
		let directory = TempDir::new().unwrap();
		let queries = directory.path().join("queries");
		fs::create_dir_all(queries.join("posts")).unwrap();
		fs::write(queries.join("posts").join("insert.sql"), "INSERT INTO post").unwrap();
		fs::write(queries.join("notes.md"), "# Notes").unwrap();
		fs::write(
			directory.path().join("pouch.yml"),
			"input: queries\noutput: src\nname: queries\n",
		)
		.unwrap();

		let settings =
			Settings::load_project(directory.path(), None, Overrides::default()).unwrap();
		let paths = execute(&Options {
			settings: &settings,
		})
		.unwrap();

		let expected_path = directory.path().join("src").join("embedded.rs");
		assert_eq!(paths, vec![expected_path.clone()]);

		let contents = fs::read_to_string(expected_path).unwrap();
		assert!(contents.contains("pub static QUERIES: EmbeddedStore"));
		assert!(contents.contains("(\"posts/insert.sql\", \"INSERT INTO post\"),"));
		assert!(!contents.contains("notes.md"));
	}

	#[test]
	fn test_execute_without_input() {
		let settings = Settings::default();
		let err = execute(&Options {
			settings: &settings,
		})
		.unwrap_err();
		assert!(matches!(err.kind, ErrorKind::Message(_)));
	}
}
