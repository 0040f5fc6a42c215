use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::celeste::difficulty::{self, Difficulty};
use crate::celeste::error::SkippedEntry;
use crate::celeste::model::{Challenge, Submission};

use super::query::RecapQuery;

// {{{ Rows
/// A submission together with the challenge it clears.
#[derive(Debug, Clone, Copy)]
pub struct ClearRef<'a> {
	pub submission: &'a Submission,
	pub challenge: &'a Challenge,

	/// The challenge's current difficulty.
	pub difficulty: &'static Difficulty,
}

#[derive(Debug, Clone, Default)]
pub struct RecapRows<'a> {
	/// Verified clears of the month, keyed by difficulty id.
	pub tier_clears: BTreeMap<u32, u32>,

	/// Clears at or above the all clears threshold, newest first.
	pub submissions_t0: Vec<ClearRef<'a>>,

	/// Clears at or above the first clears threshold, newest first.
	pub submissions_t3: Vec<ClearRef<'a>>,

	pub skipped: Vec<SkippedEntry>,
}
// }}}
// {{{ Collection
#[inline]
fn newest_first(rows: &mut [ClearRef<'_>]) {
	rows.sort_by_key(|r| Reverse((r.submission.date_created, r.submission.id)));
}

pub fn collect<'a>(challenges: &'a [Challenge], query: &RecapQuery) -> RecapRows<'a> {
	let mut rows = RecapRows::default();

	for challenge in challenges {
		let mut in_month = challenge
			.submissions
			.iter()
			.filter(|s| s.is_verified())
			.filter(|s| s.date_created.is_some_and(|d| query.month.contains(d)))
			.peekable();

		if in_month.peek().is_none() {
			continue;
		}

		let difficulty = match difficulty::lookup(challenge.difficulty_id) {
			Ok(difficulty) => difficulty,
			Err(_) => {
				SkippedEntry::record(&mut rows.skipped, challenge.id, challenge.difficulty_id);
				continue;
			}
		};

		for submission in in_month {
			*rows.tier_clears.entry(difficulty.id).or_default() += 1;

			// Submissions moved over to another challenge are only counted
			if submission.is_moved() {
				continue;
			}

			let clear = ClearRef {
				submission,
				challenge,
				difficulty,
			};

			if difficulty.sort >= query.all_clears_tier_sort {
				rows.submissions_t0.push(clear);
			}

			if difficulty.sort >= query.first_clears_tier_sort {
				rows.submissions_t3.push(clear);
			}
		}
	}

	newest_first(&mut rows.submissions_t0);
	newest_first(&mut rows.submissions_t3);

	rows
}
// }}}
// {{{ Tests
#[cfg(test)]
mod aggregate_tests {
	use super::*;
	use crate::context::testing::*;

	fn ids(rows: &[ClearRef<'_>]) -> Vec<u32> {
		rows.iter().map(|r| r.submission.id).collect()
	}

	fn query(all: i32, first: i32) -> RecapQuery {
		RecapQuery::parse("2024-06", Some(&all.to_string()), Some(&first.to_string())).unwrap()
	}

	fn challenges() -> Vec<Challenge> {
		vec![
			// Tier-sort 19
			challenge(
				1,
				1,
				vec![
					submission(1, 1, 1, "2024-06-03"),
					submission(2, 1, 2, "2024-06-20"),
					submission(3, 1, 3, "2024-07-01"),
				],
			),
			// Tier-sort 10
			challenge(
				2,
				10,
				vec![
					submission(4, 2, 1, "2024-05-31"),
					submission(5, 2, 2, "2024-06-20"),
					submission(6, 2, 3, "2024-06-21").unverified(),
				],
			),
			// Tier-sort 5
			challenge(
				3,
				15,
				vec![
					submission(7, 3, 1, "2024-06-10"),
					submission(8, 3, 2, "2024-06-11").moved(1),
					submission(9, 3, 3, "2024-06-12").undated(),
				],
			),
		]
	}

	#[test]
	fn tier_clears_count_verified_clears_of_the_month() {
		let challenges = challenges();
		let rows = collect(&challenges, &query(17, 7));

		let expected: BTreeMap<u32, u32> = [(1, 2), (10, 1), (15, 2)].into_iter().collect();
		assert_eq!(rows.tier_clears, expected);
	}

	#[test]
	fn threshold_sets_are_newest_first() {
		let challenges = challenges();
		let rows = collect(&challenges, &query(10, 3));

		// 2 & 5 share a date, so the higher id comes first
		assert_eq!(ids(&rows.submissions_t0), vec![5, 2, 1]);
		assert_eq!(ids(&rows.submissions_t3), vec![5, 2, 7, 1]);
	}

	#[test]
	fn thresholds_are_inclusive() {
		let challenges = challenges();
		let rows = collect(&challenges, &query(19, 10));
		assert_eq!(ids(&rows.submissions_t0), vec![2, 1]);
		assert_eq!(ids(&rows.submissions_t3), vec![5, 2, 1]);
	}

	#[test]
	fn moved_submissions_are_left_out_of_threshold_sets() {
		let challenges = challenges();
		let rows = collect(&challenges, &query(7, 3));
		assert!(rows.submissions_t3.iter().all(|r| r.submission.id != 8));
		assert_eq!(rows.tier_clears[&15], 2);
	}

	#[test]
	fn unknown_difficulties_are_skipped() {
		let mut challenges = challenges();
		challenges.push(challenge(4, 0, vec![submission(10, 4, 1, "2024-06-05")]));
		challenges.push(challenge(5, 99, vec![submission(11, 5, 1, "2023-06-05")]));

		let rows = collect(&challenges, &query(7, 3));
		assert_eq!(
			rows.skipped,
			vec![SkippedEntry {
				challenge_id: 4,
				difficulty_id: 0
			}]
		);
		assert!(!rows.tier_clears.contains_key(&0));
	}
}
// }}}
