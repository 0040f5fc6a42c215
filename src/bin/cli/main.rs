use clap::Parser;
use command::{Cli, Command};
use goldberries::context::Error;
use goldberries::logs::init_logging;

mod command;
mod commands;
mod context;

fn main() -> Result<(), Error> {
	init_logging();

	let cli = Cli::parse();
	match cli.command {
		Command::List(args) => {
			commands::list::run(args)?;
		}
		Command::Recap(args) => {
			commands::recap::run(args)?;
		}
		Command::Stats => {
			commands::stats::run()?;
		}
		Command::Import(args) => {
			commands::import::run(args)?;
		}
	}

	Ok(())
}
