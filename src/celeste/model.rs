use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// {{{ Campaign & map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
	pub id: u32,
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
	pub id: u32,
	pub campaign_id: u32,
	pub name: String,

	#[serde(default)]
	pub is_archived: bool,
}
// }}}
// {{{ Player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
	pub id: u32,
	pub name: String,
}
// }}}
// {{{ Submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verification {
	#[default]
	Pending,
	Verified,
	Rejected,
}

impl Verification {
	/// Submissions store verification as a nullable boolean.
	#[inline]
	pub fn from_db(is_verified: Option<bool>) -> Self {
		match is_verified {
			None => Self::Pending,
			Some(true) => Self::Verified,
			Some(false) => Self::Rejected,
		}
	}

	#[inline]
	pub fn to_db(self) -> Option<bool> {
		match self {
			Self::Pending => None,
			Self::Verified => Some(true),
			Self::Rejected => Some(false),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
	pub id: u32,
	pub challenge_id: u32,
	pub player_id: u32,

	/// Missing when the date could not be resolved from the proof.
	pub date_created: Option<NaiveDateTime>,

	#[serde(default)]
	pub verification: Verification,

	#[serde(default)]
	pub suggested_difficulty_id: Option<u32>,

	#[serde(default)]
	pub is_personal: bool,

	#[serde(default)]
	pub is_fc: bool,

	/// Set once the submission has been moved over to a challenge request
	/// which supersedes the one it was filed under.
	#[serde(default)]
	pub new_challenge_id: Option<u32>,

	#[serde(default)]
	pub proof_url: Option<String>,
}

impl Submission {
	#[inline]
	pub fn is_verified(&self) -> bool {
		self.verification == Verification::Verified
	}

	#[inline]
	pub fn is_moved(&self) -> bool {
		self.new_challenge_id.is_some()
	}
}
// }}}
// {{{ Challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
	pub id: u32,

	/// Only set for full-game challenges, which have no map.
	#[serde(default)]
	pub campaign_id: Option<u32>,
	#[serde(default)]
	pub map_id: Option<u32>,

	#[serde(default = "default_objective")]
	pub objective_id: u32,
	pub difficulty_id: u32,

	/// Disambiguates challenges sharing a map.
	#[serde(default)]
	pub description: Option<String>,

	#[serde(default)]
	pub requires_fc: bool,
	#[serde(default)]
	pub has_fc: bool,
	#[serde(default)]
	pub is_arbitrary: bool,

	/// Ordered by date, oldest first.
	#[serde(default)]
	pub submissions: Vec<Submission>,
}

#[inline]
fn default_objective() -> u32 {
	1
}

impl Challenge {
	#[inline]
	pub fn first_submission(&self) -> Option<&Submission> {
		first_submission(&self.submissions)
	}
}

/// The earliest submission of a history. Undated submissions come last,
/// and ids break ties.
pub fn first_submission(history: &[Submission]) -> Option<&Submission> {
	history
		.iter()
		.min_by_key(|s| (s.date_created.is_none(), s.date_created, s.id))
}
// }}}
// {{{ Change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
	pub id: u32,
	#[serde(default)]
	pub campaign_id: Option<u32>,
	#[serde(default)]
	pub map_id: Option<u32>,
	#[serde(default)]
	pub challenge_id: Option<u32>,
	#[serde(default)]
	pub player_id: Option<u32>,
	pub description: String,
	pub date: NaiveDateTime,
}
// }}}
// {{{ Snapshot
/// Every record the core needs, as handed over by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotData {
	#[serde(default)]
	pub campaigns: Vec<Campaign>,
	#[serde(default)]
	pub maps: Vec<Map>,
	#[serde(default)]
	pub players: Vec<Player>,
	#[serde(default)]
	pub challenges: Vec<Challenge>,
	#[serde(default)]
	pub changes: Vec<Change>,
}

/// An immutable, indexed view over [SnapshotData].
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
	data: SnapshotData,
	campaigns: HashMap<u32, usize>,
	maps: HashMap<u32, usize>,
	players: HashMap<u32, usize>,
	challenges: HashMap<u32, usize>,
}

impl Snapshot {
	pub fn new(data: SnapshotData) -> Self {
		fn index<T>(items: &[T], id: impl Fn(&T) -> u32) -> HashMap<u32, usize> {
			items.iter().enumerate().map(|(i, item)| (id(item), i)).collect()
		}

		Self {
			campaigns: index(&data.campaigns, |c| c.id),
			maps: index(&data.maps, |m| m.id),
			players: index(&data.players, |p| p.id),
			challenges: index(&data.challenges, |c| c.id),
			data,
		}
	}

	#[inline]
	pub fn data(&self) -> &SnapshotData {
		&self.data
	}

	#[inline]
	pub fn into_data(self) -> SnapshotData {
		self.data
	}

	// {{{ Iterators
	#[inline]
	pub fn campaigns(&self) -> &[Campaign] {
		&self.data.campaigns
	}

	#[inline]
	pub fn maps(&self) -> &[Map] {
		&self.data.maps
	}

	#[inline]
	pub fn players(&self) -> &[Player] {
		&self.data.players
	}

	#[inline]
	pub fn challenges(&self) -> &[Challenge] {
		&self.data.challenges
	}

	#[inline]
	pub fn changes(&self) -> &[Change] {
		&self.data.changes
	}
	// }}}
	// {{{ Lookups
	#[inline]
	pub fn lookup_campaign(&self, id: u32) -> Option<&Campaign> {
		self.campaigns.get(&id).map(|&i| &self.data.campaigns[i])
	}

	#[inline]
	pub fn lookup_map(&self, id: u32) -> Option<&Map> {
		self.maps.get(&id).map(|&i| &self.data.maps[i])
	}

	#[inline]
	pub fn lookup_player(&self, id: u32) -> Option<&Player> {
		self.players.get(&id).map(|&i| &self.data.players[i])
	}

	#[inline]
	pub fn lookup_challenge(&self, id: u32) -> Option<&Challenge> {
		self.challenges.get(&id).map(|&i| &self.data.challenges[i])
	}
	// }}}
	// {{{ Display helpers
	#[inline]
	pub fn challenge_map(&self, challenge: &Challenge) -> Option<&Map> {
		challenge.map_id.and_then(|id| self.lookup_map(id))
	}

	/// The campaign owning a challenge, either through its map or directly
	/// for full-game challenges.
	pub fn challenge_campaign(&self, challenge: &Challenge) -> Option<&Campaign> {
		match self.challenge_map(challenge) {
			Some(map) => self.lookup_campaign(map.campaign_id),
			None => challenge.campaign_id.and_then(|id| self.lookup_campaign(id)),
		}
	}

	/// The map name, or the campaign name for full-game challenges.
	pub fn challenge_display_name(&self, challenge: &Challenge) -> &str {
		if let Some(map) = self.challenge_map(challenge) {
			return &map.name;
		}

		match self.challenge_campaign(challenge) {
			Some(campaign) => &campaign.name,
			None => {
				tracing::warn!(
					challenge_id = challenge.id,
					"Challenge has neither a map nor a campaign"
				);
				""
			}
		}
	}
	// }}}
}

impl From<SnapshotData> for Snapshot {
	fn from(data: SnapshotData) -> Self {
		Self::new(data)
	}
}
// }}}
// {{{ Tests
#[cfg(test)]
mod model_tests {
	use super::*;
	use crate::context::testing::*;

	#[test]
	fn first_submission_ordering() {
		let history = vec![
			submission(3, 1, 1, "2024-01-02").undated(),
			submission(5, 1, 1, "2024-01-02"),
			submission(4, 1, 1, "2024-01-02"),
		];
		assert_eq!(first_submission(&history).unwrap().id, 4);

		let history = vec![submission(3, 1, 1, "2024-01-02").undated()];
		assert_eq!(first_submission(&history).unwrap().id, 3);
		assert!(first_submission(&[]).is_none());
	}

	#[test]
	fn first_submission_ignores_input_order() {
		let challenge = challenge(
			1,
			3,
			vec![
				submission(7, 1, 2, "2024-03-01").suggest(5),
				submission(2, 1, 1, "2024-01-01").undated(),
				submission(9, 1, 1, "2024-02-01").suggest(8),
			],
		);

		assert_eq!(challenge.first_submission().unwrap().id, 9);
		assert_eq!(
			challenge.first_submission().map(|s| s.id),
			first_submission(&challenge.submissions).map(|s| s.id)
		);
	}
}
// }}}
