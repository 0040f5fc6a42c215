//! Groups challenges into the tier → subtier hierarchy.
//!
//! Every challenge is resolved to a single [EffectiveDifficulty] up front,
//! and placed into the bucket of that difficulty. Buckets exist for the whole
//! catalog even when empty.

use serde::Serialize;

use super::difficulty::{self, Difficulty, Tier};
use super::error::{RankingError, SkippedEntry};
use super::model::Challenge;

// {{{ Effective difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "difficulty", rename_all = "snake_case")]
pub enum EffectiveDifficulty {
	Assigned(&'static Difficulty),
	Suggested(&'static Difficulty),
}

impl EffectiveDifficulty {
	/// With `use_suggested`, the suggestion attached to the first submission
	/// wins over the assigned difficulty.
	pub fn resolve(challenge: &Challenge, use_suggested: bool) -> Result<Self, RankingError> {
		let suggestion = challenge
			.first_submission()
			.and_then(|s| s.suggested_difficulty_id)
			.filter(|_| use_suggested);

		match suggestion {
			Some(id) => Ok(Self::Suggested(difficulty::lookup(id)?)),
			None => Ok(Self::Assigned(difficulty::lookup(challenge.difficulty_id)?)),
		}
	}

	#[inline]
	pub fn difficulty(self) -> &'static Difficulty {
		match self {
			Self::Assigned(d) | Self::Suggested(d) => d,
		}
	}

	#[inline]
	pub fn is_suggested(self) -> bool {
		matches!(self, Self::Suggested(_))
	}
}

/// Extracts the difficulty id a failed resolution complained about.
#[inline]
fn unknown_id(error: &RankingError, fallback: u32) -> u32 {
	match error {
		RankingError::UnknownDifficulty(id) => *id,
		_ => fallback,
	}
}
// }}}
// {{{ Buckets
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
	pub challenge: &'a Challenge,
	pub effective: EffectiveDifficulty,
}

#[derive(Debug, Clone)]
pub struct SubtierBucket<'a> {
	pub difficulty: &'static Difficulty,
	pub challenges: Vec<Placed<'a>>,
}

impl<'a> SubtierBucket<'a> {
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.challenges.is_empty()
	}
}

#[derive(Debug, Clone)]
pub struct TierBucket<'a> {
	pub tier: Tier,
	pub subtiers: Vec<SubtierBucket<'a>>,
}

impl<'a> TierBucket<'a> {
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.subtiers.iter().all(|s| s.is_empty())
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.subtiers.iter().map(|s| s.challenges.len()).sum()
	}
}

#[derive(Debug, Clone)]
pub struct Buckets<'a> {
	pub tiers: Vec<TierBucket<'a>>,

	/// Challenges left out because of an unknown difficulty.
	pub skipped: Vec<SkippedEntry>,
}

impl<'a> Buckets<'a> {
	#[inline]
	pub fn subtiers(&self) -> impl Iterator<Item = &SubtierBucket<'a>> {
		self.tiers.iter().flat_map(|t| t.subtiers.iter())
	}

	#[inline]
	pub fn subtier(&self, difficulty_id: u32) -> Option<&SubtierBucket<'a>> {
		self.subtiers().find(|s| s.difficulty.id == difficulty_id)
	}

	/// The amount of placed challenges.
	#[inline]
	pub fn len(&self) -> usize {
		self.tiers.iter().map(|t| t.len()).sum()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
// }}}
// {{{ Bucketing
pub fn bucket<'a>(
	challenges: impl IntoIterator<Item = &'a Challenge>,
	use_suggested: bool,
) -> Buckets<'a> {
	let mut by_difficulty: Vec<Vec<Placed<'a>>> = vec![Vec::new(); Difficulty::COUNT];
	let mut skipped = Vec::new();

	for challenge in challenges {
		match EffectiveDifficulty::resolve(challenge, use_suggested) {
			Ok(effective) => {
				by_difficulty[effective.difficulty().to_index()].push(Placed {
					challenge,
					effective,
				});
			}
			Err(e) => {
				let id = unknown_id(&e, challenge.difficulty_id);
				SkippedEntry::record(&mut skipped, challenge.id, id);
			}
		}
	}

	let tiers = Tier::TIERS
		.iter()
		.map(|&tier| TierBucket {
			tier,
			subtiers: tier
				.difficulties()
				.map(|difficulty| SubtierBucket {
					difficulty,
					challenges: std::mem::take(&mut by_difficulty[difficulty.to_index()]),
				})
				.collect(),
		})
		.collect();

	Buckets { tiers, skipped }
}
// }}}
// {{{ Tests
#[cfg(test)]
mod bucket_tests {
	use super::*;
	use crate::context::testing::*;

	fn sample() -> Vec<Challenge> {
		vec![
			challenge(1, 3, vec![submission(10, 1, 1, "2024-01-01").suggest(5)]),
			challenge(2, 3, vec![submission(11, 2, 1, "2024-01-02")]),
			challenge(3, 13, vec![submission(12, 3, 1, "2024-01-03").suggest(12)]),
			challenge(4, 19, vec![]),
			challenge(5, 14, vec![submission(13, 5, 2, "2024-02-01").suggest(14)]),
		]
	}

	#[test]
	fn every_challenge_lands_in_exactly_one_bucket() {
		let challenges = sample();
		for use_suggested in [false, true] {
			let buckets = bucket(&challenges, use_suggested);
			assert_eq!(buckets.len(), challenges.len());
			assert!(buckets.skipped.is_empty());

			for c in &challenges {
				let hits = buckets
					.subtiers()
					.flat_map(|s| s.challenges.iter())
					.filter(|p| p.challenge.id == c.id)
					.count();
				assert_eq!(hits, 1, "challenge {} placed {hits} times", c.id);
			}
		}
	}

	#[test]
	fn buckets_cover_the_whole_catalog() {
		let buckets = bucket(&[], false);
		assert!(buckets.is_empty());
		assert_eq!(buckets.tiers.len(), Tier::TIERS.len());

		let ids: Vec<_> = buckets.subtiers().map(|s| s.difficulty.id).collect();
		assert_eq!(ids, (1..=19).collect::<Vec<_>>());
	}

	#[test]
	fn suggestions_only_move_challenges_around() {
		let challenges = sample();
		let assigned = bucket(&challenges, false);
		let suggested = bucket(&challenges, true);

		assert_eq!(assigned.len(), suggested.len());
		assert_eq!(assigned.subtier(3).unwrap().challenges.len(), 2);
		assert_eq!(suggested.subtier(3).unwrap().challenges.len(), 1);
		assert_eq!(suggested.subtier(5).unwrap().challenges.len(), 1);
		assert_eq!(suggested.subtier(12).unwrap().challenges.len(), 1);
		assert!(suggested.subtier(13).unwrap().is_empty());
	}

	#[test]
	fn missing_suggestion_falls_back_to_assignment() {
		let challenges = sample();
		let buckets = bucket(&challenges, true);

		let placed = buckets.subtier(3).unwrap().challenges[0];
		assert_eq!(placed.challenge.id, 2);
		assert_eq!(placed.effective, EffectiveDifficulty::Assigned(difficulty::lookup(3).unwrap()));

		// No submissions at all
		let placed = buckets.subtier(19).unwrap().challenges[0];
		assert!(!placed.effective.is_suggested());
	}

	#[test]
	fn suggestion_matching_assignment_is_still_a_suggestion() {
		let challenges = sample();
		let buckets = bucket(&challenges, true);
		let placed = buckets.subtier(14).unwrap().challenges[0];
		assert!(placed.effective.is_suggested());
	}

	#[test]
	fn unknown_difficulties_are_skipped_and_reported() {
		let mut challenges = sample();
		challenges.push(challenge(6, 42, vec![]));
		challenges.push(challenge(7, 2, vec![submission(20, 7, 1, "2024-01-01").suggest(0)]));

		let buckets = bucket(&challenges, false);
		assert_eq!(buckets.len(), 6);
		assert_eq!(buckets.skipped, vec![SkippedEntry { challenge_id: 6, difficulty_id: 42 }]);

		let buckets = bucket(&challenges, true);
		assert_eq!(buckets.len(), 5);
		assert_eq!(buckets.skipped.len(), 2);
		assert_eq!(buckets.skipped[1], SkippedEntry { challenge_id: 7, difficulty_id: 0 });
		assert_eq!(buckets.len() + buckets.skipped.len(), challenges.len());
	}
}
// }}}
