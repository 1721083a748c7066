use crate::content_store::{LoadOptions, DEFAULT_EXTENSION};
use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "pouch.yml";

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
	pub common_file: Option<String>,
	pub extension: String,
	pub file: String,
	pub follow_links: bool,
	pub input: Option<PathBuf>,
	pub name: String,
	pub output: PathBuf,
}

impl Default for Settings {
	fn default() -> Self {
		Settings {
			common_file: None,
			extension: DEFAULT_EXTENSION.to_string(),
			file: "embedded.rs".to_string(),
			follow_links: false,
			input: None,
			name: "gen".to_string(),
			output: PathBuf::from("."),
		}
	}
}

/// Values given on the command line, taking precedence over the settings file.
#[derive(Debug, Default)]
pub struct Overrides {
	pub common_file: Option<String>,
	pub extension: Option<String>,
	pub file: Option<String>,
	pub follow_links: bool,
	pub input: Option<PathBuf>,
	pub name: Option<String>,
	pub output: Option<PathBuf>,
}

impl Settings {
	/// Loads `pouch.yml` from the project directory, falling back to defaults
	/// when there is none.
	pub fn load(project_directory: &Path) -> Result<Self> {
		let path = project_directory.join(SETTINGS_FILE_NAME);

		if !path.exists() {
			return Ok(Settings::default().resolve(project_directory));
		}

		Settings::load_file(&path, project_directory)
	}

	/// Loads the settings of a project, from an explicit settings file if
	/// given, then applies the overrides.
	pub fn load_project(
		project_directory: &Path,
		settings_path: Option<&Path>,
		overrides: Overrides,
	) -> Result<Self> {
		let mut settings = match settings_path {
			Some(path) => Settings::load_file(path, project_directory)?,
			None => Settings::load(project_directory)?,
		};
		settings.apply(overrides);
		Ok(settings)
	}

	pub fn load_file(path: &Path, project_directory: &Path) -> Result<Self> {
		let contents = fs::read_to_string(path).map_err(|err| Error::failed_to_read(path, err))?;
		let settings: Settings = serde_yaml::from_str(&contents)
			.map_err(|err| Error::failed_to_deserialize(path, err))?;

		log::debug!("Loaded settings from '{}'.", path.to_string_lossy());
		Ok(settings.resolve(project_directory))
	}

	fn resolve(mut self, project_directory: &Path) -> Self {
		self.input = self.input.map(|input| project_directory.join(input));
		self.output = project_directory.join(&self.output);
		self
	}

	pub fn apply(&mut self, overrides: Overrides) {
		if overrides.common_file.is_some() {
			self.common_file = overrides.common_file;
		}
		if let Some(extension) = overrides.extension {
			self.extension = extension;
		}
		if let Some(file) = overrides.file {
			self.file = file;
		}
		self.follow_links |= overrides.follow_links;
		if overrides.input.is_some() {
			self.input = overrides.input;
		}
		if let Some(name) = overrides.name {
			self.name = name;
		}
		if let Some(output) = overrides.output {
			self.output = output;
		}
	}

	pub fn input(&self) -> Result<&Path> {
		self.input.as_deref().ok_or_else(|| {
			Error::message(format!(
				"Please provide an input directory, with --input or the input key of {}.",
				SETTINGS_FILE_NAME
			))
		})
	}

	pub fn load_options(&self) -> LoadOptions {
		LoadOptions {
			extension: self.extension.clone(),
			follow_links: self.follow_links,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorKind;
	use tempfile::TempDir;

	#[test]
	fn test_load_without_file() {
		let directory = TempDir::new().unwrap();
		let settings = Settings::load(directory.path()).unwrap();
		assert_eq!(settings.output, directory.path().join("."));
		assert!(settings.input().is_err());
	}

	#[test]
	fn test_output_resolved_with_and_without_file() {
		let directory = TempDir::new().unwrap();
		let without_file =
			Settings::load_project(directory.path(), None, Overrides::default()).unwrap();

		fs::write(directory.path().join(SETTINGS_FILE_NAME), "name: gen\n").unwrap();
		let with_file =
			Settings::load_project(directory.path(), None, Overrides::default()).unwrap();

		assert_eq!(without_file, with_file);
		assert_eq!(without_file.output, directory.path().join("."));
	}

	#[test]
	fn test_load_file() {
		let directory = TempDir::new().unwrap();
		fs::write(
			directory.path().join(SETTINGS_FILE_NAME),
			"input: queries\noutput: src/generated\nname: queries\ncommon-file: embedded_store.rs\n",
		)
		.unwrap();

		let settings = Settings::load(directory.path()).unwrap();

		assert_eq!(settings.input().unwrap(), directory.path().join("queries"));
		assert_eq!(settings.output, directory.path().join("src/generated"));
		assert_eq!(settings.name, "queries");
		assert_eq!(settings.common_file.as_deref(), Some("embedded_store.rs"));
		assert_eq!(settings.extension, DEFAULT_EXTENSION);
		assert_eq!(settings.file, "embedded.rs");
	}

	#[test]
	fn test_load_invalid_file() {
		let directory = TempDir::new().unwrap();
		fs::write(
			directory.path().join(SETTINGS_FILE_NAME),
			"follow-links: sometimes\n",
		)
		.unwrap();

		let err = Settings::load(directory.path()).unwrap_err();
		assert!(matches!(err.kind, ErrorKind::FailedToDeserialize(_)), "{:?}", err);
	}

	#[test]
	fn test_load_project_with_missing_settings_file() {
		let directory = TempDir::new().unwrap();
		let err = Settings::load_project(
			directory.path(),
			Some(directory.path().join("other.yml").as_path()),
			Overrides::default(),
		)
		.unwrap_err();
		assert!(matches!(err.kind, ErrorKind::FailedToRead(_)), "{:?}", err);
	}

	#[test]
	fn test_load_project_prefers_overrides() {
		let directory = TempDir::new().unwrap();
		let settings_path = directory.path().join("other.yml");
		fs::write(&settings_path, "input: queries\nextension: cql\n").unwrap();

		let settings = Settings::load_project(
			directory.path(),
			Some(settings_path.as_path()),
			Overrides {
				input: Some(PathBuf::from("elsewhere")),
				..Overrides::default()
			},
		)
		.unwrap();

		assert_eq!(settings.input().unwrap(), Path::new("elsewhere"));
		assert_eq!(settings.extension, "cql");
	}

	#[test]
	fn test_apply() {
		let mut settings = Settings {
			input: Some(PathBuf::from("queries")),
			name: "queries".to_string(),
			..Settings::default()
		};

		settings.apply(Overrides {
			extension: Some("cql".to_string()),
			follow_links: true,
			output: Some(PathBuf::from("out")),
			..Overrides::default()
		});

		assert_eq!(settings.input().unwrap(), Path::new("queries"));
		assert_eq!(settings.name, "queries");
		assert_eq!(settings.extension, "cql");
		assert_eq!(settings.output, PathBuf::from("out"));

		let options = settings.load_options();
		assert_eq!(options.extension, "cql");
		assert!(options.follow_links);
	}
}
