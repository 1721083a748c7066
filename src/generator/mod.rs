use crate::content_store::ContentSource;
use crate::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera, Value};

template_enum! {
	Static: "static",
	StoreType: "store_type",
}

pub const TYPE_NAME: &str = "EmbeddedStore";

const KEYWORDS: &[&str] = &[
	"as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
	"extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
	"mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
	"unsafe", "use", "where", "while",
];

#[derive(Serialize)]
struct Entry<'a> {
	key: &'a str,
	contents: &'a str,
}

#[derive(Serialize)]
struct StoreTypeContext {
	type_name: &'static str,
}

#[derive(Serialize)]
struct StaticContext<'a> {
	common_module: Option<&'a str>,
	entries: &'a [Entry<'a>],
	static_name: &'a str,
	type_name: &'static str,
}

pub struct GenerateOptions<'a> {
	/// When set, the store type is written to this file and the data file
	/// imports it from the sibling module.
	pub common_file: Option<&'a str>,
	pub directory: &'a Path,
	pub file: &'a str,
	/// Upper-cased to form the name of the generated static.
	pub name: &'a str,
}

#[derive(Debug, PartialEq)]
pub struct GeneratedFile {
	pub path: PathBuf,
	pub contents: String,
}

pub struct Generator {
	tera: Tera,
}

impl Generator {
	pub fn new() -> Result<Self> {
		let mut tera = Tera::default();

		tera.add_raw_templates(Template::as_array())
			.map_err(|err| Error::message(format!("Failed to load templates: {}.", err)))?;

		tera.register_filter("rust_literal", rust_literal);

		Ok(Generator { tera })
	}

	/// Renders Rust sources embedding every entry of `source`, sorted by key.
	pub fn generate(
		&self,
		source: &dyn ContentSource,
		options: &GenerateOptions,
	) -> Result<Vec<GeneratedFile>> {
		let static_name = options.name.to_uppercase();
		check_identifier(&static_name)?;

		let common_module = options
			.common_file
			.map(|common_file| {
				if common_file == options.file {
					return Err(Error::message(format!(
						"The common file must differ from the output file '{}'.",
						options.file
					)));
				}
				let stem = Path::new(common_file)
					.file_stem()
					.and_then(|stem| stem.to_str())
					.ok_or_else(|| Error::path_has_invalid_file_name(common_file))?;
				check_identifier(stem)?;
				Ok(stem)
			})
			.transpose()?;

		let sorted = source
			.keys()
			.into_iter()
			.filter_map(|key| match source.get(key) {
				Some(contents) => Some((key, contents)),
				None => {
					log::warn!("Unable to get '{}', skipping.", key);
					None
				}
			})
			.collect::<BTreeMap<_, _>>();
		let entries = sorted
			.into_iter()
			.map(|(key, contents)| Entry { key, contents })
			.collect::<Vec<_>>();

		let store_type = self.render_template(
			Template::StoreType,
			&StoreTypeContext {
				type_name: TYPE_NAME,
			},
		)?;

		let statics = self.render_template(
			Template::Static,
			&StaticContext {
				common_module,
				entries: &entries,
				static_name: &static_name,
				type_name: TYPE_NAME,
			},
		)?;

		let path = options.directory.join(options.file);
		let files = match options.common_file {
			Some(common_file) => vec![
				GeneratedFile {
					path: options.directory.join(common_file),
					contents: store_type,
				},
				GeneratedFile {
					path,
					contents: statics,
				},
			],
			None => vec![GeneratedFile {
				path,
				contents: format!("{}\n{}", store_type, statics),
			}],
		};

		Ok(files)
	}

	fn render_template<T: Serialize>(&self, template: Template, context: &T) -> Result<String> {
		let name = template.name();
		let context = Context::from_serialize(context)
			.map_err(|err| Error::failed_to_render_template(name, err))?;
		self.tera
			.render(name, &context)
			.map_err(|err| Error::failed_to_render_template(name, err))
	}
}

pub fn write_files(files: &[GeneratedFile]) -> Result<()> {
	for file in files {
		if let Some(parent) = file.path.parent() {
			fs::create_dir_all(parent)
				.map_err(|err| Error::failed_to_create_directory(parent, err))?;
		}

		fs::write(&file.path, &file.contents)
			.map_err(|err| Error::failed_to_write(&file.path, err))?;

		log::info!("Wrote '{}'.", file.path.to_string_lossy());
	}
	Ok(())
}

/// Formats a string as a Rust string literal reproducing it exactly.
fn rust_literal(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
	match value {
		Value::String(contents) => Ok(Value::String(format!("{:?}", contents))),
		_ => Err(tera::Error::from("rust_literal expects a string")),
	}
}

fn check_identifier(identifier: &str) -> Result<()> {
	lazy_static! {
		static ref IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Bad regex.");
	}

	if identifier == "_"
		|| KEYWORDS.iter().any(|keyword| *keyword == identifier)
		|| !IDENTIFIER_RE.is_match(identifier)
	{
		return Err(Error::invalid_identifier(identifier));
	}
	Ok(())
}
