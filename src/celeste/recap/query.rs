// {{{ Imports
use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;

use crate::celeste::error::RankingError;
// }}}

// {{{ Month
/// A UTC calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
	first_day: NaiveDate,
}

impl Month {
	pub fn new(year: i32, month: u32) -> Result<Self, RankingError> {
		let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
			RankingError::invalid("month", format!("{year:04}-{month:02} is not a month"))
		})?;

		Ok(Self { first_day })
	}

	/// Parses a `YYYY-MM` token.
	pub fn parse(token: &str) -> Result<Self, RankingError> {
		static MONTH_REGEX: LazyLock<Regex> =
			LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("Invalid month regex"));

		if !MONTH_REGEX.is_match(token) {
			return Err(RankingError::invalid(
				"month",
				format!("`{token}` is not of the form YYYY-MM"),
			));
		}

		let (year, month) = token.split_at(4);
		let year = year
			.parse()
			.map_err(|_| RankingError::invalid("month", format!("Invalid year in `{token}`")))?;
		let month = month[1..]
			.parse()
			.map_err(|_| RankingError::invalid("month", format!("Invalid month in `{token}`")))?;

		Self::new(year, month)
	}

	#[inline]
	pub fn first_day(&self) -> NaiveDate {
		self.first_day
	}

	#[inline]
	pub fn start(&self) -> NaiveDateTime {
		self.first_day.and_time(chrono::NaiveTime::MIN)
	}

	/// Midnight on the first day of the following month.
	#[inline]
	pub fn end(&self) -> NaiveDateTime {
		self.next().start()
	}

	pub fn next(&self) -> Self {
		let (year, month) = match self.first_day.month() {
			12 => (self.first_day.year() + 1, 1),
			m => (self.first_day.year(), m + 1),
		};

		Self {
			first_day: NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX),
		}
	}

	#[inline]
	pub fn contains(&self, date: NaiveDateTime) -> bool {
		self.start() <= date && date < self.end()
	}
}

impl FromStr for Month {
	type Err = RankingError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl Display for Month {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.first_day.format("%Y-%m"))
	}
}

impl Serialize for Month {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}
// }}}
// {{{ Query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecapQuery {
	pub month: Month,

	/// Submissions at or above this tier-sort are listed individually.
	pub all_clears_tier_sort: i32,

	/// Challenges at or above this tier-sort are checked for first clears.
	pub first_clears_tier_sort: i32,
}

impl RecapQuery {
	pub const DEFAULT_ALL_CLEARS_TIER_SORT: i32 = 17;
	pub const DEFAULT_FIRST_CLEARS_TIER_SORT: i32 = 7;

	/// Guard tier 3 through high tier 0.
	pub const ALL_CLEARS_BOUNDS: (i32, i32) = (7, 19);

	/// Tier 7 through high tier 0.
	pub const FIRST_CLEARS_BOUNDS: (i32, i32) = (3, 19);

	pub fn new(
		month: Month,
		all_clears_tier_sort: i32,
		first_clears_tier_sort: i32,
	) -> Result<Self, RankingError> {
		check_bounds(
			"all_clears_tier_sort",
			all_clears_tier_sort,
			Self::ALL_CLEARS_BOUNDS,
		)?;
		check_bounds(
			"first_clears_tier_sort",
			first_clears_tier_sort,
			Self::FIRST_CLEARS_BOUNDS,
		)?;

		if first_clears_tier_sort > all_clears_tier_sort {
			tracing::debug!(
				all_clears_tier_sort,
				first_clears_tier_sort,
				"First clear threshold is stricter than the all clears one"
			);
		}

		Ok(Self {
			month,
			all_clears_tier_sort,
			first_clears_tier_sort,
		})
	}

	/// Builds a query out of raw request parameters. Absent thresholds take
	/// their defaults.
	pub fn parse(
		month: &str,
		all_clears_tier_sort: Option<&str>,
		first_clears_tier_sort: Option<&str>,
	) -> Result<Self, RankingError> {
		let month = Month::parse(month)?;
		let all = parse_threshold(
			"all_clears_tier_sort",
			all_clears_tier_sort,
			Self::DEFAULT_ALL_CLEARS_TIER_SORT,
		)?;
		let first = parse_threshold(
			"first_clears_tier_sort",
			first_clears_tier_sort,
			Self::DEFAULT_FIRST_CLEARS_TIER_SORT,
		)?;

		Self::new(month, all, first)
	}
}

fn parse_threshold(field: &'static str, raw: Option<&str>, default: i32) -> Result<i32, RankingError> {
	match raw {
		None => Ok(default),
		Some(raw) => raw
			.trim()
			.parse()
			.map_err(|_| RankingError::invalid(field, format!("`{raw}` is not an integer"))),
	}
}

fn check_bounds(field: &'static str, value: i32, (min, max): (i32, i32)) -> Result<(), RankingError> {
	if value < min {
		Err(RankingError::invalid(field, format!("Has to be at least {min}")))
	} else if value > max {
		Err(RankingError::invalid(field, format!("Has to be at most {max}")))
	} else {
		Ok(())
	}
}
// }}}
// {{{ Tests
#[cfg(test)]
mod query_tests {
	use super::*;

	fn field_of(err: RankingError) -> &'static str {
		match err {
			RankingError::InvalidParameter { field, .. } => field,
			other => panic!("Expected an invalid parameter, got {other:?}"),
		}
	}

	#[test]
	fn months_parse() {
		let month = Month::parse("2024-06").unwrap();
		assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
		assert_eq!(month.to_string(), "2024-06");
		assert_eq!(month.next().to_string(), "2024-07");
		assert_eq!(Month::parse("2024-12").unwrap().next().to_string(), "2025-01");
	}

	#[test]
	fn malformed_months_are_rejected() {
		for token in ["2024-13", "24-01", "2024-00", "2024-1", "2024/01", " 2024-01", ""] {
			let err = Month::parse(token).unwrap_err();
			assert_eq!(field_of(err), "month", "{token:?} was accepted");
		}
	}

	#[test]
	fn month_bounds_are_half_open() {
		let month = Month::parse("2024-02").unwrap();
		let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();

		assert!(month.contains(at("2024-02-01 00:00:00")));
		assert!(month.contains(at("2024-02-29 23:59:59")));
		assert!(!month.contains(at("2024-03-01 00:00:00")));
		assert!(!month.contains(at("2024-01-31 23:59:59")));
	}

	#[test]
	fn thresholds_default() {
		let query = RecapQuery::parse("2024-06", None, None).unwrap();
		assert_eq!(query.all_clears_tier_sort, 17);
		assert_eq!(query.first_clears_tier_sort, 7);
	}

	#[test]
	fn thresholds_are_bounded() {
		let err = RecapQuery::parse("2024-06", Some("6"), None).unwrap_err();
		assert_eq!(field_of(err), "all_clears_tier_sort");

		let err = RecapQuery::parse("2024-06", Some("20"), None).unwrap_err();
		assert_eq!(field_of(err), "all_clears_tier_sort");

		let err = RecapQuery::parse("2024-06", None, Some("2")).unwrap_err();
		assert_eq!(field_of(err), "first_clears_tier_sort");

		let err = RecapQuery::parse("2024-06", None, Some("abc")).unwrap_err();
		assert_eq!(field_of(err), "first_clears_tier_sort");

		assert!(RecapQuery::parse("2024-06", Some("7"), Some("3")).is_ok());
		assert!(RecapQuery::parse("2024-06", Some("19"), Some("19")).is_ok());
	}

	#[test]
	fn inverted_thresholds_are_allowed() {
		let query = RecapQuery::parse("2024-06", Some("8"), Some("15")).unwrap();
		assert_eq!(query.all_clears_tier_sort, 8);
		assert_eq!(query.first_clears_tier_sort, 15);
	}
}
// }}}
