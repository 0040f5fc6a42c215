use std::cmp::Ordering;

use serde::Serialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::difficulty::{Subtier, Tier};

// {{{ Name comparison
/// Compares display names the way a browser's `localeCompare` roughly would.
///
/// Base letters are compared first, ignoring both case and accents. Ties are
/// broken by accents (unaccented first), then by case (lowercase first).
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
	#[inline]
	fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
		s.nfd()
			.filter(|c| !is_combining_mark(*c))
			.flat_map(char::to_lowercase)
	}

	#[inline]
	fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
		s.nfd().flat_map(char::to_lowercase)
	}

	#[inline]
	fn case(s: &str) -> impl Iterator<Item = bool> + '_ {
		s.nfd().map(char::is_uppercase)
	}

	base_letters(a)
		.cmp(base_letters(b))
		.then_with(|| accented(a).cmp(accented(b)))
		.then_with(|| case(a).cmp(case(b)))
}

/// Sorts by display name, ascending. Equal names keep their relative order.
#[inline]
pub fn sort_by_name<'n, T>(items: &mut [T], name: impl Fn(&T) -> &'n str) {
	items.sort_by(|a, b| locale_cmp(name(a), name(b)));
}
// }}}
// {{{ Farewell
/// The Farewell golden list lives in an external sheet and is too large to
/// track as individual challenges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FarewellRow {
	pub name: &'static str,
	pub clears: &'static str,
	pub requires_fc: bool,
	pub has_fc: bool,
	pub url: &'static str,
}

pub const FAREWELL: FarewellRow = FarewellRow {
	name: "Farewell",
	clears: "650+",
	requires_fc: false,
	has_fc: true,
	url: "https://docs.google.com/spreadsheets/d/1FesTb6qkgMz-dCn7YdioRydToWSQNTg1axFEIHU4FF8/edit#gid=583834938",
};

/// Whether the Farewell row closes the subtier of the given placement.
#[inline]
pub fn hosts_farewell(tier: Tier, subtier: Subtier) -> bool {
	tier == Tier::Tier3 && subtier == Subtier::Guard
}
// }}}
// {{{ Entries
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListItem<R> {
	Challenge(R),
	Farewell(FarewellRow),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry<R> {
	/// Set on the first entry of a subtier directly following a populated one.
	pub divider: bool,

	#[serde(flatten)]
	pub item: ListItem<R>,
}

impl<R> ListEntry<R> {
	#[inline]
	pub fn challenge(&self) -> Option<&R> {
		match &self.item {
			ListItem::Challenge(row) => Some(row),
			ListItem::Farewell(_) => None,
		}
	}

	#[inline]
	pub fn is_farewell(&self) -> bool {
		matches!(self.item, ListItem::Farewell(_))
	}
}

/// Turns the (already sorted) rows of a subtier into list entries.
///
/// `previous_had_entries` refers to the subtier shown right above this one
/// inside the same tier. The Farewell row is only added to overall lists.
pub fn arrange<R>(
	tier: Tier,
	subtier: Subtier,
	rows: Vec<R>,
	previous_had_entries: bool,
	is_overall_list: bool,
) -> Vec<ListEntry<R>> {
	let mut entries: Vec<_> = rows
		.into_iter()
		.enumerate()
		.map(|(i, row)| ListEntry {
			divider: i == 0 && previous_had_entries,
			item: ListItem::Challenge(row),
		})
		.collect();

	if is_overall_list && hosts_farewell(tier, subtier) {
		entries.push(ListEntry {
			divider: true,
			item: ListItem::Farewell(FAREWELL),
		});
	}

	entries
}
// }}}
// {{{ Tests
#[cfg(test)]
mod sort_tests {
	use super::*;

	#[test]
	fn names_compare_case_insensitively() {
		assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
		assert_eq!(locale_cmp("Zip", "abyss"), Ordering::Greater);
		assert_eq!(locale_cmp("abc", "ABC"), Ordering::Less);
		assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
		assert_eq!(locale_cmp("", "a"), Ordering::Less);
	}

	#[test]
	fn accents_only_break_ties() {
		let mut names = vec!["Zebra", "Éclair", "Eclipse"];
		sort_by_name(&mut names, |n| *n);
		assert_eq!(names, vec!["Éclair", "Eclipse", "Zebra"]);

		assert_eq!(locale_cmp("resume", "résumé"), Ordering::Less);
		assert_eq!(locale_cmp("résumé", "Resume"), Ordering::Greater);
		assert_eq!(locale_cmp("écho", "Écho"), Ordering::Less);

		// Precomposed and decomposed forms are the same name
		assert_eq!(locale_cmp("\u{e9}t\u{e9}", "e\u{301}te\u{301}"), Ordering::Equal);
	}

	#[test]
	fn sorting_is_stable_for_equal_names() {
		let mut items = vec![
			("Spring Collab", 1),
			("Abyss", 2),
			("Spring Collab", 3),
			("abyss", 4),
			("Spring Collab", 5),
		];
		sort_by_name(&mut items, |i| i.0);
		let order: Vec<_> = items.iter().map(|i| i.1).collect();
		assert_eq!(order, vec![4, 2, 1, 3, 5]);

		// Same values, different starting order
		let mut items = vec![
			("Spring Collab", 5),
			("Spring Collab", 1),
			("abyss", 4),
			("Spring Collab", 3),
			("Abyss", 2),
		];
		sort_by_name(&mut items, |i| i.0);
		let order: Vec<_> = items.iter().map(|i| i.1).collect();
		assert_eq!(order, vec![4, 2, 5, 1, 3]);
	}

	#[test]
	fn divider_only_on_first_row() {
		let entries = arrange(Tier::Tier0, Subtier::Mid, vec![1, 2, 3], true, true);
		let dividers: Vec<_> = entries.iter().map(|e| e.divider).collect();
		assert_eq!(dividers, vec![true, false, false]);

		let entries = arrange(Tier::Tier0, Subtier::Mid, vec![1, 2], false, true);
		assert!(entries.iter().all(|e| !e.divider));
	}

	#[test]
	fn farewell_closes_guard_tier_three_of_overall_lists() {
		let entries = arrange(Tier::Tier3, Subtier::Guard, vec![1], false, true);
		assert_eq!(entries.len(), 2);
		assert!(entries[1].is_farewell());
		assert!(entries[1].divider);

		let entries = arrange::<u32>(Tier::Tier3, Subtier::Guard, vec![], false, true);
		assert_eq!(entries.len(), 1);

		let entries = arrange(Tier::Tier3, Subtier::Guard, vec![1], false, false);
		assert!(entries.iter().all(|e| !e.is_farewell()));

		let entries = arrange(Tier::Tier3, Subtier::Low, vec![1], false, true);
		assert!(entries.iter().all(|e| !e.is_farewell()));
	}
}
// }}}
