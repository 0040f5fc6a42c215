// {{{ Imports
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use goldberries::celeste::error::RankingError;
use goldberries::celeste::recap::{get_monthly_recap, MonthlyRecapReport, RecapQuery};
use goldberries::celeste::stats::{overall, OverallStats};

use crate::context::AppContext;
use crate::error::AppError;
// }}}

#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
	#[serde(rename = "type")]
	pub kind: Option<String>,
	pub month: Option<String>,

	// Kept as strings so malformed values are reported by name
	pub all_clears_tier_sort: Option<String>,
	pub first_clears_tier_sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsKind {
	Overall,
	MonthlyRecap,
}

impl StatsParams {
	pub fn stats_kind(&self) -> Result<StatsKind, RankingError> {
		match self.kind.as_deref().unwrap_or("all") {
			"all" => Ok(StatsKind::Overall),
			"monthly_recap" => Ok(StatsKind::MonthlyRecap),
			other => Err(RankingError::invalid(
				"type",
				format!("Unknown stats type `{other}`"),
			)),
		}
	}

	pub fn recap_query(&self) -> Result<RecapQuery, RankingError> {
		let month = self
			.month
			.as_deref()
			.ok_or_else(|| RankingError::invalid("month", "Missing month"))?;

		RecapQuery::parse(
			month,
			self.all_clears_tier_sort.as_deref(),
			self.first_clears_tier_sort.as_deref(),
		)
	}
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StatsResponse {
	Overall(OverallStats),
	MonthlyRecap(MonthlyRecapReport),
}

pub async fn get_stats(
	State(state): State<AppContext>,
	Query(params): Query<StatsParams>,
) -> Result<Json<StatsResponse>, AppError> {
	let response = match params.stats_kind()? {
		StatsKind::Overall => StatsResponse::Overall(overall(&state.ctx.snapshot()?)),
		StatsKind::MonthlyRecap => {
			// Parameters are checked before touching the database
			let query = params.recap_query()?;
			let snapshot = state.ctx.snapshot()?;
			StatsResponse::MonthlyRecap(get_monthly_recap(&snapshot, &query)?)
		}
	};

	Ok(Json(response))
}

#[cfg(test)]
mod stats_tests {
	use super::*;

	fn params(kind: &str, month: Option<&str>, all: Option<&str>) -> StatsParams {
		StatsParams {
			kind: Some(kind.to_owned()),
			month: month.map(str::to_owned),
			all_clears_tier_sort: all.map(str::to_owned),
			first_clears_tier_sort: None,
		}
	}

	#[test]
	fn stats_kinds() {
		assert_eq!(StatsParams::default().stats_kind().unwrap(), StatsKind::Overall);
		assert_eq!(
			params("monthly_recap", None, None).stats_kind().unwrap(),
			StatsKind::MonthlyRecap
		);
		assert!(params("weekly", None, None).stats_kind().is_err());
	}

	#[test]
	fn recap_params_are_validated() {
		assert!(params("monthly_recap", None, None).recap_query().is_err());
		assert!(params("monthly_recap", Some("2024-13"), None).recap_query().is_err());
		assert!(params("monthly_recap", Some("2024-06"), Some("6")).recap_query().is_err());
		assert!(params("monthly_recap", Some("2024-06"), Some("ten")).recap_query().is_err());

		let query = params("monthly_recap", Some("2024-06"), Some("12"))
			.recap_query()
			.unwrap();
		assert_eq!(query.all_clears_tier_sort, 12);
		assert_eq!(query.first_clears_tier_sort, 7);
	}
}
