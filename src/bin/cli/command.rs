#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Command,
}

#[derive(clap::Subcommand)]
pub enum Command {
	/// Prints the top golden list
	List(crate::commands::list::Args),

	/// Prints the recap of a month
	Recap(crate::commands::recap::Args),

	/// Prints overall statistics
	Stats,

	/// Replaces the database content with a json snapshot
	Import(crate::commands::import::Args),
}
