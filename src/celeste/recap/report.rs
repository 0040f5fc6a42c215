// {{{ Imports
use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::celeste::difficulty::Difficulty;
use crate::celeste::error::{RankingError, SkippedEntry};
use crate::celeste::model::{Change, Snapshot};
use crate::timed;

use super::aggregate::{collect, ClearRef};
use super::dedup::{deduplicate, FirstClear};
use super::query::{Month, RecapQuery};
// }}}

// {{{ Report rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecapSubmission {
	pub submission_id: u32,
	pub challenge_id: u32,
	pub player_id: u32,
	pub player_name: Option<String>,
	pub name: String,
	pub difficulty: &'static Difficulty,
	pub date_created: Option<NaiveDateTime>,
	pub is_fc: bool,
	pub proof_url: Option<String>,
}

impl RecapSubmission {
	fn new(snapshot: &Snapshot, clear: &ClearRef<'_>) -> Self {
		let submission = clear.submission;
		Self {
			submission_id: submission.id,
			challenge_id: clear.challenge.id,
			player_id: submission.player_id,
			player_name: snapshot
				.lookup_player(submission.player_id)
				.map(|p| p.name.clone()),
			name: snapshot.challenge_display_name(clear.challenge).to_owned(),
			difficulty: clear.difficulty,
			date_created: submission.date_created,
			is_fc: submission.is_fc,
			proof_url: submission.proof_url.clone(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewlyCleared {
	pub challenge_id: u32,
	pub name: String,
	pub description: Option<String>,
	pub difficulty: &'static Difficulty,
	pub first_submission_id: u32,
	pub first_player_id: u32,
	pub first_cleared_at: NaiveDateTime,
}

impl NewlyCleared {
	fn new(snapshot: &Snapshot, cleared: &FirstClear<'_>) -> Self {
		Self {
			challenge_id: cleared.challenge.id,
			name: snapshot.challenge_display_name(cleared.challenge).to_owned(),
			description: cleared.challenge.description.clone(),
			difficulty: cleared.difficulty,
			first_submission_id: cleared.first_submission_id,
			first_player_id: cleared.first_player_id,
			first_cleared_at: cleared.first_cleared_at,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeChange {
	pub change_id: u32,
	pub challenge_id: Option<u32>,
	pub name: Option<String>,
	pub description: String,
	pub date: NaiveDateTime,
}
// }}}
// {{{ Challenge changes
/// Placement changes ("Moved ...") dated inside the month, in input order.
pub fn moved_changes<'a>(changes: &'a [Change], month: Month) -> impl Iterator<Item = &'a Change> {
	changes.iter().filter(move |c| {
		month.contains(c.date)
			&& c.description
				.get(..5)
				.is_some_and(|prefix| prefix.eq_ignore_ascii_case("moved"))
	})
}

fn challenge_change(snapshot: &Snapshot, change: &Change) -> ChallengeChange {
	let name = change
		.challenge_id
		.and_then(|id| snapshot.lookup_challenge(id))
		.map(|c| snapshot.challenge_display_name(c).to_owned());

	ChallengeChange {
		change_id: change.id,
		challenge_id: change.challenge_id,
		name,
		description: change.description.clone(),
		date: change.date,
	}
}
// }}}
// {{{ Report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRecapReport {
	pub month: Month,
	pub all_clears_tier_sort: i32,
	pub first_clears_tier_sort: i32,
	pub tier_clears: BTreeMap<u32, u32>,
	pub submissions_t0: Vec<RecapSubmission>,
	pub challenge_changes: Vec<ChallengeChange>,
	pub newly_cleared_t3: Vec<NewlyCleared>,
	pub skipped: Vec<SkippedEntry>,
}

pub fn get_monthly_recap(
	snapshot: &Snapshot,
	query: &RecapQuery,
) -> Result<MonthlyRecapReport, RankingError> {
	timed!("monthly_recap", {
		let rows = collect(snapshot.challenges(), query);
		let deduplicated = deduplicate(
			&rows.submissions_t3,
			rows.submissions_t0,
			query.month,
			snapshot,
		);

		tracing::debug!(
			month = %query.month,
			newly_cleared = deduplicated.newly_cleared.len(),
			removed = deduplicated.removed.len(),
			"Deduplicated first clears"
		);

		Ok(MonthlyRecapReport {
			month: query.month,
			all_clears_tier_sort: query.all_clears_tier_sort,
			first_clears_tier_sort: query.first_clears_tier_sort,
			tier_clears: rows.tier_clears,
			submissions_t0: deduplicated
				.submissions_t0
				.iter()
				.map(|c| RecapSubmission::new(snapshot, c))
				.collect(),
			challenge_changes: moved_changes(snapshot.changes(), query.month)
				.map(|c| challenge_change(snapshot, c))
				.collect(),
			newly_cleared_t3: deduplicated
				.newly_cleared
				.iter()
				.map(|c| NewlyCleared::new(snapshot, c))
				.collect(),
			skipped: rows.skipped,
		})
	})
}
// }}}
// {{{ Tests
#[cfg(test)]
mod report_tests {
	use super::*;
	use crate::context::testing::*;

	fn fixture() -> Snapshot {
		let mut data = snapshot(
			vec![campaign(1, "Spring Collab")],
			vec![map(10, 1, "Reverie"), map(11, 1, "abyss")],
			vec![player(1, "alice"), player(2, "bob")],
			vec![
				// Player A clears C in May, player B in June
				on_map(
					challenge(
						1,
						10,
						vec![
							submission(1, 1, 1, "2024-05-10"),
							submission(2, 1, 2, "2024-06-01"),
						],
					),
					10,
				),
				// D is first cleared in June
				on_map(challenge(2, 12, vec![submission(3, 2, 2, "2024-06-15")]), 11),
			],
		)
		.into_data();

		data.changes = vec![
			change(1, Some(1), "Moved from Mid Tier 3 to High Tier 3", "2024-06-03"),
			change(2, Some(2), "moved to Low Tier 3", "2024-06-30"),
			change(3, Some(2), "Created challenge", "2024-06-10"),
			change(4, Some(1), "Moved from Tier 4 to Mid Tier 3", "2024-05-20"),
			change(5, None, "Mov", "2024-06-10"),
		];

		Snapshot::new(data)
	}

	#[test]
	fn recap_keeps_repeat_clears_and_promotes_first_clears() {
		let query = RecapQuery::parse("2024-06", Some("7"), Some("7")).unwrap();
		let report = get_monthly_recap(&fixture(), &query).unwrap();

		let t0: Vec<_> = report.submissions_t0.iter().map(|s| s.submission_id).collect();
		assert_eq!(t0, vec![2]);
		assert_eq!(report.submissions_t0[0].player_name.as_deref(), Some("bob"));

		let cleared: Vec<_> = report.newly_cleared_t3.iter().map(|c| c.challenge_id).collect();
		assert_eq!(cleared, vec![2]);
		assert_eq!(report.newly_cleared_t3[0].name, "abyss");
		assert_eq!(report.newly_cleared_t3[0].first_submission_id, 3);

		let expected: BTreeMap<u32, u32> = [(10, 1), (12, 1)].into_iter().collect();
		assert_eq!(report.tier_clears, expected);
		assert!(report.skipped.is_empty());
	}

	#[test]
	fn only_moves_of_the_month_are_reported() {
		let query = RecapQuery::parse("2024-06", None, None).unwrap();
		let report = get_monthly_recap(&fixture(), &query).unwrap();

		let ids: Vec<_> = report.challenge_changes.iter().map(|c| c.change_id).collect();
		assert_eq!(ids, vec![1, 2]);
		assert_eq!(report.challenge_changes[0].name.as_deref(), Some("Reverie"));
	}

	#[test]
	fn default_thresholds_only_list_the_hardest_clears() {
		let query = RecapQuery::parse("2024-06", None, None).unwrap();
		let report = get_monthly_recap(&fixture(), &query).unwrap();

		// Nothing reaches tier-sort 17
		assert!(report.submissions_t0.is_empty());
		assert_eq!(report.newly_cleared_t3.len(), 1);
	}

	#[test]
	fn quiet_months_are_empty() {
		let query = RecapQuery::parse("2023-01", None, None).unwrap();
		let report = get_monthly_recap(&fixture(), &query).unwrap();
		assert!(report.tier_clears.is_empty());
		assert!(report.submissions_t0.is_empty());
		assert!(report.newly_cleared_t3.is_empty());
		assert!(report.challenge_changes.is_empty());
	}

	#[test]
	fn reports_serialize_month_tokens() {
		let query = RecapQuery::parse("2024-06", None, None).unwrap();
		let report = get_monthly_recap(&fixture(), &query).unwrap();
		let json = serde_json::to_value(&report).unwrap();
		assert_eq!(json["month"], "2024-06");
		assert_eq!(json["tier_clears"]["10"], 1);
	}
}
// }}}
