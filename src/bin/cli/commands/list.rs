// {{{ Imports
use goldberries::celeste::list::{get_tiered_view, ListFilter, ListRequest, Scope, ViewOptions};
use goldberries::context::Error;

use crate::context::CliContext;
// }}}

#[derive(clap::Args)]
pub struct Args {
	/// One of `global`, `campaign:<id>` or `player:<id>`
	#[arg(default_value = "global")]
	scope: Scope,

	/// Place challenges by suggested difficulty (player lists only)
	#[arg(long)]
	use_suggested: bool,

	#[arg(long)]
	hide_empty_tiers: bool,

	/// Leave out challenges on archived maps
	#[arg(long)]
	no_archived: bool,

	/// Leave out arbitrary challenges
	#[arg(long)]
	no_arbitrary: bool,

	#[arg(long, value_delimiter = ',')]
	hide_objectives: Vec<u32>,
}

pub fn run(args: Args) -> Result<(), Error> {
	let request = ListRequest {
		scope: args.scope,
		filter: ListFilter {
			archived: !args.no_archived,
			arbitrary: !args.no_arbitrary,
			hide_objectives: args.hide_objectives,
		},
		options: ViewOptions {
			use_suggested: args.use_suggested,
			hide_empty_tiers: args.hide_empty_tiers,
		},
	};

	let ctx = CliContext::new()?;
	let snapshot = ctx.data.snapshot()?;
	ctx.print(&get_tiered_view(&snapshot, &request)?)
}
