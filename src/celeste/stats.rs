use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::difficulty;
use super::model::Snapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverallCounts {
	pub campaigns: usize,
	pub maps: usize,
	pub challenges: usize,
	pub submissions: usize,
	pub players: usize,

	/// Campaigns made up of more than one map.
	pub real_campaigns: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverallStats {
	pub overall: OverallCounts,

	/// Submissions per difficulty id, by the current difficulty of their
	/// challenge.
	pub difficulty: BTreeMap<u32, usize>,
}

pub fn overall(snapshot: &Snapshot) -> OverallStats {
	let mut maps_per_campaign: HashMap<u32, usize> = HashMap::new();
	for map in snapshot.maps() {
		if snapshot.lookup_campaign(map.campaign_id).is_some() {
			*maps_per_campaign.entry(map.campaign_id).or_default() += 1;
		}
	}

	let mut per_difficulty: BTreeMap<u32, usize> = BTreeMap::new();
	for challenge in snapshot.challenges() {
		if challenge.submissions.is_empty() || difficulty::lookup(challenge.difficulty_id).is_err() {
			continue;
		}

		*per_difficulty.entry(challenge.difficulty_id).or_default() += challenge.submissions.len();
	}

	OverallStats {
		overall: OverallCounts {
			campaigns: snapshot.campaigns().len(),
			maps: snapshot.maps().len(),
			challenges: snapshot.challenges().len(),
			submissions: snapshot
				.challenges()
				.iter()
				.map(|c| c.submissions.len())
				.sum(),
			players: snapshot.players().len(),
			real_campaigns: maps_per_campaign.values().filter(|&&n| n > 1).count(),
		},
		difficulty: per_difficulty,
	}
}

// }}}
