// {{{ Imports
use std::path::PathBuf;

use goldberries::context::import::{import_snapshot, read_snapshot_file};
use goldberries::context::Error;

use crate::context::CliContext;
// }}}

#[derive(clap::Args)]
pub struct Args {
	/// Json snapshot to import
	file: PathBuf,
}

pub fn run(args: Args) -> Result<(), Error> {
	let ctx = CliContext::new()?;
	let data = read_snapshot_file(&args.file)?;
	let mut conn = ctx.data.db.get()?;
	import_snapshot(&mut conn, &data)?;
	tracing::info!(file = ?args.file, "Import finished");
	Ok(())
}
