//! Reconciles the two threshold sets of a recap.
//!
//! A challenge whose earliest ever submission lands in the recapped month is
//! reported once as newly cleared, and that first submission is no longer
//! listed among the month's regular clears.

use chrono::NaiveDateTime;

use crate::celeste::difficulty::Difficulty;
use crate::celeste::model::{first_submission, Challenge, Snapshot, Submission};

use super::aggregate::ClearRef;
use super::query::Month;

// {{{ History
/// Gives access to every submission ever recorded for a challenge.
pub trait SubmissionHistory {
	fn history(&self, challenge_id: u32) -> Option<&[Submission]>;
}

impl SubmissionHistory for Snapshot {
	#[inline]
	fn history(&self, challenge_id: u32) -> Option<&[Submission]> {
		self.lookup_challenge(challenge_id).map(|c| c.submissions.as_slice())
	}
}

impl SubmissionHistory for [Challenge] {
	fn history(&self, challenge_id: u32) -> Option<&[Submission]> {
		self.iter()
			.find(|c| c.id == challenge_id)
			.map(|c| c.submissions.as_slice())
	}
}
// }}}
// {{{ Deduplication
#[derive(Debug, Clone, Copy)]
pub struct FirstClear<'a> {
	pub challenge: &'a Challenge,
	pub difficulty: &'static Difficulty,
	pub first_submission_id: u32,
	pub first_player_id: u32,
	pub first_cleared_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default)]
pub struct Deduplicated<'a> {
	pub newly_cleared: Vec<FirstClear<'a>>,
	pub submissions_t0: Vec<ClearRef<'a>>,

	/// Ids of the submissions taken out of the all clears set.
	pub removed: Vec<u32>,
}

pub fn deduplicate<'a, H: SubmissionHistory + ?Sized>(
	submissions_t3: &[ClearRef<'a>],
	mut submissions_t0: Vec<ClearRef<'a>>,
	month: Month,
	history: &H,
) -> Deduplicated<'a> {
	let mut newly_cleared: Vec<FirstClear<'a>> = Vec::new();

	for clear in submissions_t3 {
		let challenge = clear.challenge;
		if newly_cleared.iter().any(|c| c.challenge.id == challenge.id) {
			continue;
		}

		let Some(first) = history.history(challenge.id).and_then(first_submission) else {
			tracing::warn!(challenge_id = challenge.id, "No submission history found");
			continue;
		};

		let Some(first_cleared_at) = first.date_created else {
			continue;
		};

		if first_cleared_at.date() >= month.first_day() {
			newly_cleared.push(FirstClear {
				challenge,
				difficulty: clear.difficulty,
				first_submission_id: first.id,
				first_player_id: first.player_id,
				first_cleared_at,
			});
		}
	}

	let mut removed = Vec::new();
	for cleared in &newly_cleared {
		let position = submissions_t0
			.iter()
			.position(|s| s.submission.id == cleared.first_submission_id);

		if let Some(position) = position {
			removed.push(submissions_t0.remove(position).submission.id);
		}
	}

	Deduplicated {
		newly_cleared,
		submissions_t0,
		removed,
	}
}
// }}}
