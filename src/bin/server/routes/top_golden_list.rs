// {{{ Imports
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use goldberries::celeste::error::RankingError;
use goldberries::celeste::list::{get_tiered_view, ListFilter, ListRequest, Scope, TieredView, ViewOptions};

use crate::context::AppContext;
use crate::error::AppError;
// }}}

#[derive(Debug, Default, Deserialize)]
pub struct TopGoldenListParams {
	#[serde(rename = "type")]
	pub kind: Option<String>,
	pub id: Option<u32>,
	pub use_suggested: Option<bool>,
	pub hide_empty_tiers: Option<bool>,
	pub archived: Option<bool>,
	pub arbitrary: Option<bool>,

	/// Comma separated objective ids.
	pub hide_objectives: Option<String>,
}

/// Parses a comma separated list of ids. Empty items are ignored.
pub fn parse_id_list(field: &'static str, raw: &str) -> Result<Vec<u32>, RankingError> {
	raw.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(|s| {
			s.parse()
				.map_err(|_| RankingError::invalid(field, format!("`{s}` is not an id")))
		})
		.collect()
}

impl TopGoldenListParams {
	pub fn to_request(&self) -> Result<ListRequest, RankingError> {
		let defaults = ListFilter::default();
		let scope = Scope::from_query(self.kind.as_deref().unwrap_or("all"), self.id)?;

		Ok(ListRequest {
			scope,
			filter: ListFilter {
				archived: self.archived.unwrap_or(defaults.archived),
				arbitrary: self.arbitrary.unwrap_or(defaults.arbitrary),
				hide_objectives: match &self.hide_objectives {
					Some(raw) => parse_id_list("hide_objectives", raw)?,
					None => defaults.hide_objectives,
				},
			},
			options: ViewOptions {
				use_suggested: self.use_suggested.unwrap_or(false),
				hide_empty_tiers: self.hide_empty_tiers.unwrap_or(false),
			},
		})
	}
}

pub async fn get_top_golden_list(
	State(state): State<AppContext>,
	Query(params): Query<TopGoldenListParams>,
) -> Result<Json<TieredView>, AppError> {
	let request = params.to_request()?;
	let snapshot = state.ctx.snapshot()?;
	let view = get_tiered_view(&snapshot, &request)?;
	Ok(Json(view))
}

#[cfg(test)]
mod top_golden_list_tests {
	use super::*;

	#[test]
	fn params_default_to_the_global_list() {
		let request = TopGoldenListParams::default().to_request().unwrap();
		assert_eq!(request, ListRequest::new(Scope::Global));
	}

	#[test]
	fn params_build_player_requests() {
		let params = TopGoldenListParams {
			kind: Some("player".to_owned()),
			id: Some(7),
			use_suggested: Some(true),
			archived: Some(false),
			hide_objectives: Some("2, 3,".to_owned()),
			..TopGoldenListParams::default()
		};

		let request = params.to_request().unwrap();
		assert_eq!(request.scope, Scope::Player(7));
		assert!(request.options.use_suggested);
		assert!(!request.filter.archived);
		assert!(request.filter.arbitrary);
		assert_eq!(request.filter.hide_objectives, vec![2, 3]);
	}

	#[test]
	fn bad_params_are_rejected() {
		let params = TopGoldenListParams {
			kind: Some("campaign".to_owned()),
			..TopGoldenListParams::default()
		};
		assert!(params.to_request().is_err());

		let params = TopGoldenListParams {
			hide_objectives: Some("1,x".to_owned()),
			..TopGoldenListParams::default()
		};
		assert!(matches!(
			params.to_request(),
			Err(RankingError::InvalidParameter {
				field: "hide_objectives",
				..
			})
		));
	}
}
