use anyhow::Context;
use context::AppContext;
use goldberries::context::paths::get_var;
use goldberries::context::{DataContext, Error};
use goldberries::logs::init_logging;
use routes::stats::get_stats;
use routes::top_golden_list::get_top_golden_list;

mod context;
mod error;
mod routes;

#[tokio::main]
async fn main() -> Result<(), Error> {
	init_logging();
	let ctx = Box::leak(Box::new(DataContext::new()?));

	let app = axum::Router::new()
		.route("/top_golden_list", axum::routing::get(get_top_golden_list))
		.route("/stats", axum::routing::get(get_stats))
		.with_state(AppContext::new(ctx));

	let port: u32 = get_var("GOLDBERRIES_SERVER_PORT")?
		.parse()
		.context("$GOLDBERRIES_SERVER_PORT is not a valid port")?;
	let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

	tracing::info!("listening on {}", listener.local_addr()?);

	axum::serve(listener, app).await?;

	Ok(())
}
