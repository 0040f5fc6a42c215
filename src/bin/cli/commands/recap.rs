// {{{ Imports
use goldberries::celeste::recap::{get_monthly_recap, Month, RecapQuery};
use goldberries::context::Error;

use crate::context::CliContext;
// }}}

#[derive(clap::Args)]
pub struct Args {
	/// The month to recap, as YYYY-MM
	month: String,

	/// Clears at or above this tier-sort are listed individually
	#[arg(long, default_value_t = RecapQuery::DEFAULT_ALL_CLEARS_TIER_SORT)]
	all_clears_tier_sort: i32,

	/// Challenges at or above this tier-sort are checked for first clears
	#[arg(long, default_value_t = RecapQuery::DEFAULT_FIRST_CLEARS_TIER_SORT)]
	first_clears_tier_sort: i32,
}

pub fn run(args: Args) -> Result<(), Error> {
	let query = RecapQuery::new(
		Month::parse(&args.month)?,
		args.all_clears_tier_sort,
		args.first_clears_tier_sort,
	)?;

	let ctx = CliContext::new()?;
	let snapshot = ctx.data.snapshot()?;
	ctx.print(&get_monthly_recap(&snapshot, &query)?)
}
