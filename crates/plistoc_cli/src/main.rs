#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

use cmd::util::FormatArg;
use plistoc::plist::ReadFormat;

#[derive(Parser)]
#[command(name = "plistoc", about = "Property list inspection and conversion tools")]
struct Cli {
	/// Decoder to use when reading input files.
	#[arg(long, global = true, value_enum, default_value_t = FormatArg::Auto)]
	format: FormatArg,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Show detected format and binary layout details.
	Info(cmd::info::Args),
	/// Print the decoded value tree.
	Print(cmd::print::Args),
	/// Re-encode a property list as XML or binary.
	Convert(cmd::convert::Args),
	/// List typed preference entries of a dictionary root.
	Prefs(cmd::prefs::Args),
}

fn main() {
	pretty_env_logger::init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> plistoc::plist::Result<()> {
	let cli = Cli::parse();
	let format = ReadFormat::from(cli.format);

	match cli.command {
		Commands::Info(args) => cmd::info::run(args, format),
		Commands::Print(args) => cmd::print::run(args, format),
		Commands::Convert(args) => cmd::convert::run(args, format),
		Commands::Prefs(args) => cmd::prefs::run(args, format),
	}
}
