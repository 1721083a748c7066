mod commands {
	pub mod generate;
	pub mod list;
	pub mod show;
}

use pouch::settings::{Overrides, Settings};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, Default, StructOpt)]
struct SourceArgs {
	/// Directory of the input files.
	#[structopt(short, long)]
	input: Option<PathBuf>,
	/// Extension of the files to load [default: sql].
	#[structopt(short, long)]
	extension: Option<String>,
	/// Follows symbolic links while walking the input directory.
	#[structopt(long)]
	follow_links: bool,
}

#[derive(Debug, Default, StructOpt)]
struct OutputArgs {
	/// Directory of the generated files [default: .].
	#[structopt(short, long)]
	output: Option<PathBuf>,
	/// Name of the generated file [default: embedded.rs].
	#[structopt(short, long)]
	file: Option<String>,
	/// Name of the generated static, upper-cased [default: gen].
	#[structopt(short, long)]
	name: Option<String>,
	/// Writes the store type to this separate file.
	#[structopt(long)]
	common_file: Option<String>,
}

#[derive(Debug, StructOpt)]
enum Command {
	/// Generates Rust sources embedding the input files (default).
	Generate {
		#[structopt(flatten)]
		source: SourceArgs,
		#[structopt(flatten)]
		output: OutputArgs,
	},
	/// Lists the keys of the input files.
	List {
		#[structopt(flatten)]
		source: SourceArgs,
		#[structopt(long)]
		json: bool,
	},
	/// Prints the contents stored under a key.
	Show {
		#[structopt(flatten)]
		source: SourceArgs,
		key: String,
	},
}

impl Default for Command {
	fn default() -> Self {
		Command::Generate {
			source: SourceArgs::default(),
			output: OutputArgs::default(),
		}
	}
}

#[derive(Debug, StructOpt)]
#[structopt(about)]
struct Args {
	#[structopt(subcommand)]
	command: Option<Command>,

	#[structopt(short, long, default_value = ".")]
	project_directory: PathBuf,

	/// Settings file to use instead of pouch.yml in the project directory.
	#[structopt(short, long)]
	settings: Option<PathBuf>,
}

fn to_overrides(source: SourceArgs, output: OutputArgs) -> Overrides {
	Overrides {
		common_file: output.common_file,
		extension: source.extension,
		file: output.file,
		follow_links: source.follow_links,
		input: source.input,
		name: output.name,
		output: output.output,
	}
}

fn run(args: Args) -> pouch::Result<()> {
	let Args {
		command,
		project_directory,
		settings: settings_path,
	} = args;

	let load_settings = |overrides: Overrides| {
		Settings::load_project(&project_directory, settings_path.as_deref(), overrides)
	};

	let command = command.unwrap_or_else(Command::default);
	match command {
		Command::Generate { source, output } => {
			let settings = load_settings(to_overrides(source, output))?;
			let paths = commands::generate::execute(&commands::generate::Options {
				settings: &settings,
			})?;
			for path in paths {
				println!("Generated {}", path.to_string_lossy());
			}
			Ok(())
		}

		Command::List { source, json } => {
			let settings = load_settings(to_overrides(source, OutputArgs::default()))?;
			commands::list::execute(&commands::list::Options {
				json,
				settings: &settings,
			})
		}

		Command::Show { source, key } => {
			let settings = load_settings(to_overrides(source, OutputArgs::default()))?;
			commands::show::execute(&commands::show::Options {
				key: &key,
				settings: &settings,
			})
		}
	}
}

fn main() -> Result<(), String> {
	env_logger::Builder::from_env(env_logger::Env::new().filter_or("POUCH_LOG", "info"))
		.format_timestamp(None)
		.init();

	let args = Args::from_args();

	run(args).map_err(|err| err.describe())
}
