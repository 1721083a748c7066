use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ErrorKind {
	FailedToCreateDirectory(PathBuf),
	FailedToDeserialize(PathBuf),
	FailedToGetMetadata(PathBuf),
	FailedToRead(PathBuf),
	FailedToReadDirectory(PathBuf),
	FailedToRenderTemplate(String),
	FailedToWrite(PathBuf),
	InvalidIdentifier(String),
	KeyNotFound(String),
	Message(String),
	NotADirectory(PathBuf),
	NotFound(PathBuf),
	PathHasInvalidFileName(PathBuf),
}

#[derive(Debug)]
pub struct Error {
	pub kind: ErrorKind,
	source: Option<Box<dyn StdError + Sync + Send>>,
}

impl Error {
	pub fn failed_to_create_directory(path: impl Into<PathBuf>, source: ::std::io::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToCreateDirectory(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_deserialize(
		path: impl Into<PathBuf>,
		source: impl Into<Box<dyn StdError + Send + Sync>>,
	) -> Self {
		Error {
			kind: ErrorKind::FailedToDeserialize(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_get_metadata(path: impl Into<PathBuf>, source: ::std::io::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToGetMetadata(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_read(path: impl Into<PathBuf>, source: ::std::io::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToRead(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_read_directory(
		path: impl Into<PathBuf>,
		source: impl Into<Box<dyn StdError + Send + Sync>>,
	) -> Self {
		Error {
			kind: ErrorKind::FailedToReadDirectory(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_render_template(name: &str, source: tera::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToRenderTemplate(name.to_string()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_write(path: impl Into<PathBuf>, source: ::std::io::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToWrite(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn invalid_identifier(identifier: impl ToString) -> Self {
		Error {
			kind: ErrorKind::InvalidIdentifier(identifier.to_string()),
			source: None,
		}
	}

	pub fn key_not_found(key: impl ToString) -> Self {
		Error {
			kind: ErrorKind::KeyNotFound(key.to_string()),
			source: None,
		}
	}

	pub fn message(text: impl ToString) -> Self {
		Self {
			kind: ErrorKind::Message(text.to_string()),
			source: None,
		}
	}

	pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
		Error {
			kind: ErrorKind::NotADirectory(path.into()),
			source: None,
		}
	}

	pub fn not_found(path: impl Into<PathBuf>, source: ::std::io::Error) -> Self {
		Error {
			kind: ErrorKind::NotFound(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn path_has_invalid_file_name(path: impl Into<PathBuf>) -> Self {
		Error {
			kind: ErrorKind::PathHasInvalidFileName(path.into()),
			source: None,
		}
	}

	/// Whether the error comes from filesystem access while loading contents.
	pub fn is_io(&self) -> bool {
		matches!(
			self.kind,
			ErrorKind::FailedToGetMetadata(_)
				| ErrorKind::FailedToRead(_)
				| ErrorKind::FailedToReadDirectory(_)
				| ErrorKind::PathHasInvalidFileName(_)
		)
	}

	/// Formats the error followed by each of its sources.
	pub fn describe(&self) -> String {
		let mut description = self.to_string();
		let mut source = self.source();
		while let Some(err) = source {
			description.push_str(&format!(" {}", err));
			source = err.source();
		}
		description
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match &self.kind {
			ErrorKind::FailedToCreateDirectory(path) => write!(
				f,
				"Failed to create directory '{}'.",
				path.to_string_lossy(),
			),
			ErrorKind::FailedToDeserialize(path) => {
				write!(f, "Failed to deserialize '{}'.", path.to_string_lossy())
			}
			ErrorKind::FailedToGetMetadata(path) => {
				write!(f, "Failed to get metadata '{}'.", path.to_string_lossy())
			}
			ErrorKind::FailedToRead(path) => {
				write!(f, "Failed to read '{}'.", path.to_string_lossy())
			}
			ErrorKind::FailedToReadDirectory(path) => {
				write!(f, "Failed to read directory '{}'.", path.to_string_lossy())
			}
			ErrorKind::FailedToRenderTemplate(name) => {
				write!(f, "Failed to render template '{}'.", name)
			}
			ErrorKind::FailedToWrite(path) => {
				write!(f, "Failed to write '{}'.", path.to_string_lossy())
			}
			ErrorKind::InvalidIdentifier(identifier) => {
				write!(f, "'{}' is not a valid identifier.", identifier)
			}
			ErrorKind::KeyNotFound(key) => write!(f, "Key '{}' not found.", key),
			ErrorKind::Message(message) => write!(f, "{}", message),
			ErrorKind::NotADirectory(path) => {
				write!(f, "'{}' is not a directory.", path.to_string_lossy())
			}
			ErrorKind::NotFound(path) => {
				write!(f, "'{}' does not exist.", path.to_string_lossy())
			}
			ErrorKind::PathHasInvalidFileName(path) => {
				write!(f, "Path '{}' has invalid filename.", path.to_string_lossy())
			}
		}
	}
}

impl StdError for Error {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		self.source
			.as_ref()
			.map(|c| &**c as &(dyn StdError + 'static))
	}
}

impl From<&str> for Error {
	fn from(text: &str) -> Self {
		Self::message(text)
	}
}

impl From<String> for Error {
	fn from(text: String) -> Self {
		Self::message(text)
	}
}

pub type Result<T> = ::std::result::Result<T, Error>;
