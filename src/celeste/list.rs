//! The Top Golden List: every selected challenge, placed into the tier
//! hierarchy and ordered for display.

// {{{ Imports
use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use super::bucket::{bucket, EffectiveDifficulty, Placed, SubtierBucket};
use super::difficulty::{Difficulty, Tier};
use super::error::{RankingError, SkippedEntry};
use super::model::{Challenge, Snapshot};
use super::sort::{arrange, hosts_farewell, sort_by_name, ListEntry};
// }}}

/// Challenges used as placement references for their difficulty.
pub const REFERENCE_CHALLENGES: [u32; 4] = [1834, 1920, 2070, 2093];

// {{{ Request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Scope {
	Global,
	Campaign(u32),
	Player(u32),
}

impl Scope {
	/// Builds a scope out of the `type` & `id` query parameters.
	pub fn from_query(kind: &str, id: Option<u32>) -> Result<Self, RankingError> {
		let require_id = || id.ok_or_else(|| RankingError::invalid("id", "Missing id"));
		match kind {
			"all" | "global" => Ok(Self::Global),
			"campaign" => Ok(Self::Campaign(require_id()?)),
			"player" => Ok(Self::Player(require_id()?)),
			other => Err(RankingError::invalid(
				"type",
				format!("Unknown list type `{other}`"),
			)),
		}
	}

	#[inline]
	pub fn is_player(self) -> bool {
		matches!(self, Self::Player(_))
	}

	#[inline]
	pub fn is_global(self) -> bool {
		self == Self::Global
	}
}

impl FromStr for Scope {
	type Err = RankingError;

	/// Parses `global`, `campaign:<id>` or `player:<id>`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (kind, id) = match s.split_once(':') {
			Some((kind, id)) => {
				let id = id
					.trim()
					.parse()
					.map_err(|_| RankingError::invalid("id", format!("`{id}` is not an id")))?;
				(kind, Some(id))
			}
			None => (s, None),
		};

		if kind == "global" && id.is_some() {
			return Err(RankingError::invalid("id", "The global list takes no id"));
		}

		Self::from_query(kind.trim(), id)
	}
}

impl Display for Scope {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Global => write!(f, "global"),
			Self::Campaign(id) => write!(f, "campaign:{id}"),
			Self::Player(id) => write!(f, "player:{id}"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
	/// Include challenges on archived maps.
	pub archived: bool,

	/// Include arbitrary challenges.
	pub arbitrary: bool,

	pub hide_objectives: Vec<u32>,
}

impl Default for ListFilter {
	fn default() -> Self {
		Self {
			archived: true,
			arbitrary: true,
			hide_objectives: Vec::new(),
		}
	}
}

/// Display preferences. These never change which challenges are selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
	/// Place challenges by the suggestion on their first submission.
	/// Only honored for player lists.
	pub use_suggested: bool,
	pub hide_empty_tiers: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
	pub scope: Scope,
	pub filter: ListFilter,
	pub options: ViewOptions,
}

impl ListRequest {
	#[inline]
	pub fn new(scope: Scope) -> Self {
		Self {
			scope,
			filter: ListFilter::default(),
			options: ViewOptions::default(),
		}
	}
}
// }}}
// {{{ View
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeRow {
	pub challenge_id: u32,
	pub campaign_id: Option<u32>,
	pub map_id: Option<u32>,
	pub name: String,
	pub suffix: Option<String>,

	/// The difficulty the challenge is assigned to.
	pub difficulty_id: u32,
	pub placement: EffectiveDifficulty,
	pub suggested_difficulty_id: Option<u32>,

	pub submission_count: usize,
	pub first_submission_id: Option<u32>,
	pub requires_fc: bool,
	pub has_fc: bool,
	pub is_reference: bool,
	pub is_personal: bool,
}

impl ChallengeRow {
	fn new(snapshot: &Snapshot, placed: Placed<'_>) -> Self {
		let challenge = placed.challenge;
		let first = challenge.first_submission();

		Self {
			challenge_id: challenge.id,
			campaign_id: snapshot.challenge_campaign(challenge).map(|c| c.id),
			map_id: challenge.map_id,
			name: snapshot.challenge_display_name(challenge).to_owned(),
			suffix: challenge
				.description
				.as_deref()
				.map(str::trim)
				.filter(|d| !d.is_empty())
				.map(str::to_owned),
			difficulty_id: challenge.difficulty_id,
			placement: placed.effective,
			suggested_difficulty_id: first.and_then(|s| s.suggested_difficulty_id),
			submission_count: challenge.submissions.len(),
			first_submission_id: first.map(|s| s.id),
			requires_fc: challenge.requires_fc,
			has_fc: challenge.has_fc,
			is_reference: REFERENCE_CHALLENGES.contains(&challenge.id),
			is_personal: first.is_some_and(|s| s.is_personal),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtierView {
	pub difficulty: &'static Difficulty,
	pub group_color_key: u32,
	pub entries: Vec<ListEntry<ChallengeRow>>,
}

impl SubtierView {
	#[inline]
	pub fn rows(&self) -> impl Iterator<Item = &ChallengeRow> {
		self.entries.iter().filter_map(|e| e.challenge())
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierView {
	pub tier: Tier,
	pub name: &'static str,
	pub challenge_count: usize,
	pub subtiers: Vec<SubtierView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TieredView {
	pub scope: Scope,
	pub challenge_count: usize,
	pub tiers: Vec<TierView>,
	pub skipped: Vec<SkippedEntry>,
}

impl TieredView {
	#[inline]
	pub fn subtiers(&self) -> impl Iterator<Item = &SubtierView> {
		self.tiers.iter().flat_map(|t| t.subtiers.iter())
	}

	#[inline]
	pub fn entries(&self) -> impl Iterator<Item = &ListEntry<ChallengeRow>> {
		self.subtiers().flat_map(|s| s.entries.iter())
	}

	#[inline]
	pub fn rows(&self) -> impl Iterator<Item = &ChallengeRow> {
		self.subtiers().flat_map(|s| s.rows())
	}
}
// }}}
// {{{ Selection
/// Picks the challenges making up a list, with their submissions restricted
/// to the ones the list is about.
pub fn select(snapshot: &Snapshot, request: &ListRequest) -> Result<Vec<Challenge>, RankingError> {
	match request.scope {
		Scope::Global => {}
		Scope::Campaign(id) => {
			snapshot
				.lookup_campaign(id)
				.ok_or_else(|| RankingError::invalid("id", format!("No campaign with id {id}")))?;
		}
		Scope::Player(id) => {
			snapshot
				.lookup_player(id)
				.ok_or_else(|| RankingError::invalid("id", format!("No player with id {id}")))?;
		}
	}

	let filter = &request.filter;
	let selected = snapshot
		.challenges()
		.iter()
		.filter(|c| filter.arbitrary || !c.is_arbitrary)
		.filter(|c| !filter.hide_objectives.contains(&c.objective_id))
		.filter(|c| {
			filter.archived || !snapshot.challenge_map(c).is_some_and(|m| m.is_archived)
		})
		.filter(|c| match request.scope {
			Scope::Campaign(id) => snapshot.challenge_campaign(c).is_some_and(|c| c.id == id),
			_ => true,
		})
		.filter_map(|c| {
			let submissions: Vec<_> = c
				.submissions
				.iter()
				.filter(|s| s.is_verified())
				.filter(|s| match request.scope {
					Scope::Player(id) => s.player_id == id,
					_ => true,
				})
				.cloned()
				.collect();

			if submissions.is_empty() {
				return None;
			}

			Some(Challenge {
				submissions,
				..c.clone()
			})
		})
		.collect();

	Ok(selected)
}
// }}}
// {{{ Arrangement
fn arrange_subtier(
	snapshot: &Snapshot,
	subtier: &SubtierBucket<'_>,
	previous_had_entries: bool,
	is_overall_list: bool,
) -> SubtierView {
	let mut placed = subtier.challenges.clone();
	sort_by_name(&mut placed, |p| snapshot.challenge_display_name(p.challenge));

	let rows = placed
		.into_iter()
		.map(|p| ChallengeRow::new(snapshot, p))
		.collect();

	let difficulty = subtier.difficulty;
	SubtierView {
		difficulty,
		group_color_key: difficulty.group_color_key(),
		entries: arrange(
			difficulty.tier,
			difficulty.subtier,
			rows,
			previous_had_entries,
			is_overall_list,
		),
	}
}

pub fn get_tiered_view(snapshot: &Snapshot, request: &ListRequest) -> Result<TieredView, RankingError> {
	let selected = select(snapshot, request)?;
	let use_suggested = request.options.use_suggested && request.scope.is_player();
	let is_overall_list = request.scope.is_global();
	let buckets = bucket(&selected, use_suggested);

	let mut tiers = Vec::with_capacity(buckets.tiers.len());
	for tier in &buckets.tiers {
		let has_farewell = is_overall_list
			&& tier
				.subtiers
				.iter()
				.any(|s| hosts_farewell(tier.tier, s.difficulty.subtier));

		if request.options.hide_empty_tiers && tier.is_empty() && !has_farewell {
			continue;
		}

		let subtiers = tier
			.subtiers
			.iter()
			.enumerate()
			.map(|(i, subtier)| {
				let previous_had_entries = i > 0 && !tier.subtiers[i - 1].is_empty();
				arrange_subtier(snapshot, subtier, previous_had_entries, is_overall_list)
			})
			.collect();

		tiers.push(TierView {
			tier: tier.tier,
			name: Tier::TIER_STRINGS[tier.tier.to_index()],
			challenge_count: tier.len(),
			subtiers,
		});
	}

	tracing::debug!(
		scope = %request.scope,
		challenges = buckets.len(),
		skipped = buckets.skipped.len(),
		"Built tiered view"
	);

	Ok(TieredView {
		scope: request.scope,
		challenge_count: buckets.len(),
		tiers,
		skipped: buckets.skipped,
	})
}
// }}}
