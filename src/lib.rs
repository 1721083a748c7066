#[macro_use]
extern crate lazy_static;

macro_rules! template_enum {
	(
		$($variant:ident: $filename:expr),*,
	) => {
		#[allow(dead_code, non_camel_case_types)]
		enum Template {
			$($variant),*
		}

		impl Template {
			fn as_array() -> Vec<(&'static str, &'static str)> {
				vec![
					$((stringify!($variant), include_str!(concat!("templates/", $filename, ".tera")))),*
				]
			}

			fn name(&self) -> &'static str {
				match self {
					$(Template::$variant => stringify!($variant)),*
				}
			}
		}
	};
}

pub mod content_store;
mod errors;
pub mod generator;
pub mod settings;

pub use content_store::{ContentSource, ContentStore, LoadOptions};
pub use errors::{Error, ErrorKind, Result};
