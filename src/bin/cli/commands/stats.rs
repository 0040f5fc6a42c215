use goldberries::celeste::stats::overall;
use goldberries::context::Error;

use crate::context::CliContext;

pub fn run() -> Result<(), Error> {
	let ctx = CliContext::new()?;
	let snapshot = ctx.data.snapshot()?;
	ctx.print(&overall(&snapshot))
}
