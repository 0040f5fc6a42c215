use std::fmt::Display;
use std::sync::LazyLock;

use serde::Serialize;

use super::error::RankingError;

// {{{ Tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
	Tier0,
	Tier1,
	Tier2,
	Tier3,
	Tier4,
	Tier5,
	Tier6,
	Tier7,
	Standard,
	Undetermined,
}

impl Tier {
	pub const TIERS: [Self; 10] = [
		Self::Tier0,
		Self::Tier1,
		Self::Tier2,
		Self::Tier3,
		Self::Tier4,
		Self::Tier5,
		Self::Tier6,
		Self::Tier7,
		Self::Standard,
		Self::Undetermined,
	];

	pub const TIER_STRINGS: [&'static str; 10] = [
		"Tier 0",
		"Tier 1",
		"Tier 2",
		"Tier 3",
		"Tier 4",
		"Tier 5",
		"Tier 6",
		"Tier 7",
		"Standard",
		"Undetermined",
	];

	#[inline]
	pub fn to_index(self) -> usize {
		self as usize
	}

	/// The difficulties making up this tier, hardest first.
	#[inline]
	pub fn difficulties(self) -> impl Iterator<Item = &'static Difficulty> {
		SCALE.entries.iter().filter(move |d| d.tier == self)
	}
}

impl Display for Tier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", Self::TIER_STRINGS[self.to_index()])
	}
}
// }}}
// {{{ Subtier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subtier {
	High,
	Mid,
	Low,
	Guard,
	None,
}

impl Subtier {
	pub const SUBTIER_STRINGS: [&'static str; 5] = ["high", "mid", "low", "guard", "none"];

	#[inline]
	pub fn to_index(self) -> usize {
		self as usize
	}
}

impl Display for Subtier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", Self::SUBTIER_STRINGS[self.to_index()])
	}
}
// }}}
// {{{ Difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Difficulty {
	pub id: u32,
	pub tier: Tier,
	pub subtier: Subtier,

	/// Threshold rank. Higher is harder.
	pub sort: i32,
	pub name: &'static str,
}

impl Difficulty {
	pub const MIN_ID: u32 = 1;
	pub const MAX_ID: u32 = 19;
	pub const COUNT: usize = (Self::MAX_ID - Self::MIN_ID + 1) as usize;

	/// The difficulty whose colour is used for the whole group.
	#[inline]
	pub fn group_color_key(&self) -> u32 {
		GROUP_COLOR_KEYS[self.to_index()]
	}

	#[inline]
	pub fn to_index(&self) -> usize {
		(self.id - Self::MIN_ID) as usize
	}
}

impl Display for Difficulty {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name)
	}
}

const fn difficulty(id: u32, tier: Tier, subtier: Subtier, name: &'static str) -> Difficulty {
	Difficulty {
		id,
		tier,
		subtier,
		sort: 20 - id as i32,
		name,
	}
}

pub static DIFFICULTIES: [Difficulty; Difficulty::COUNT] = [
	difficulty(1, Tier::Tier0, Subtier::High, "High Tier 0"),
	difficulty(2, Tier::Tier0, Subtier::Mid, "Mid Tier 0"),
	difficulty(3, Tier::Tier0, Subtier::Low, "Low Tier 0"),
	difficulty(4, Tier::Tier1, Subtier::High, "High Tier 1"),
	difficulty(5, Tier::Tier1, Subtier::Mid, "Mid Tier 1"),
	difficulty(6, Tier::Tier1, Subtier::Low, "Low Tier 1"),
	difficulty(7, Tier::Tier2, Subtier::High, "High Tier 2"),
	difficulty(8, Tier::Tier2, Subtier::Mid, "Mid Tier 2"),
	difficulty(9, Tier::Tier2, Subtier::Low, "Low Tier 2"),
	difficulty(10, Tier::Tier3, Subtier::High, "High Tier 3"),
	difficulty(11, Tier::Tier3, Subtier::Mid, "Mid Tier 3"),
	difficulty(12, Tier::Tier3, Subtier::Low, "Low Tier 3"),
	difficulty(13, Tier::Tier3, Subtier::Guard, "Guard Tier 3"),
	difficulty(14, Tier::Tier4, Subtier::None, "Tier 4"),
	difficulty(15, Tier::Tier5, Subtier::None, "Tier 5"),
	difficulty(16, Tier::Tier6, Subtier::None, "Tier 6"),
	difficulty(17, Tier::Tier7, Subtier::None, "Tier 7"),
	difficulty(18, Tier::Standard, Subtier::None, "Standard"),
	difficulty(19, Tier::Undetermined, Subtier::None, "Undetermined"),
];

const GROUP_COLOR_KEYS: [u32; Difficulty::COUNT] =
	[2, 2, 2, 5, 5, 5, 8, 8, 8, 11, 11, 11, 11, 14, 15, 16, 17, 18, 19];
// }}}
// {{{ Scale
/// The difficulty catalog, checked for totality when first used.
#[derive(Debug)]
pub struct DifficultyScale {
	entries: &'static [Difficulty],
}

impl DifficultyScale {
	pub fn new(entries: &'static [Difficulty]) -> Result<Self, String> {
		if entries.len() != Difficulty::COUNT {
			return Err(format!(
				"Expected {} difficulties, found {}",
				Difficulty::COUNT,
				entries.len()
			));
		}

		for (i, entry) in entries.iter().enumerate() {
			let expected_id = Difficulty::MIN_ID + i as u32;
			if entry.id != expected_id {
				return Err(format!(
					"Difficulty at position {i} has id {} instead of {expected_id}",
					entry.id
				));
			}

			if let Some(prev) = i.checked_sub(1).map(|j| &entries[j]) {
				if prev.tier > entry.tier {
					return Err(format!("Tier of difficulty {} is out of order", entry.id));
				}

				if prev.tier == entry.tier && prev.subtier >= entry.subtier {
					return Err(format!("Subtier of difficulty {} is out of order", entry.id));
				}

				if prev.sort <= entry.sort {
					return Err(format!("Sort of difficulty {} is not decreasing", entry.id));
				}
			}

			let group_key = GROUP_COLOR_KEYS[i];
			let group_entry = entries
				.get((group_key - Difficulty::MIN_ID) as usize)
				.ok_or_else(|| format!("Group key {group_key} is outside the catalog"))?;
			if group_entry.tier != entry.tier {
				return Err(format!(
					"Group key {group_key} of difficulty {} belongs to another tier",
					entry.id
				));
			}
		}

		for tier in Tier::TIERS {
			if !entries.iter().any(|d| d.tier == tier) {
				return Err(format!("{tier} has no difficulties"));
			}
		}

		Ok(Self { entries })
	}

	#[inline]
	pub fn lookup(&self, id: u32) -> Result<&'static Difficulty, RankingError> {
		id.checked_sub(Difficulty::MIN_ID)
			.and_then(|i| self.entries.get(i as usize))
			.ok_or(RankingError::UnknownDifficulty(id))
	}
}

pub static SCALE: LazyLock<DifficultyScale> = LazyLock::new(|| {
	DifficultyScale::new(&DIFFICULTIES).expect("Difficulty catalog is inconsistent")
});
// }}}
// {{{ Lookups
#[inline]
pub fn lookup(id: u32) -> Result<&'static Difficulty, RankingError> {
	SCALE.lookup(id)
}

#[inline]
pub fn tier_of(id: u32) -> Result<Tier, RankingError> {
	Ok(lookup(id)?.tier)
}

#[inline]
pub fn subtier_of(id: u32) -> Result<Subtier, RankingError> {
	Ok(lookup(id)?.subtier)
}

#[inline]
pub fn group_color_key(id: u32) -> Result<u32, RankingError> {
	Ok(lookup(id)?.group_color_key())
}
// }}}
