use serde::Serialize;

// {{{ Error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Something the caller can fix by changing the request.
	User,
	Internal,
}
// }}}
// {{{ Ranking error
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
	#[error("Invalid parameter `{field}`: {reason}")]
	InvalidParameter { field: &'static str, reason: String },

	#[error("Unknown difficulty id {0}")]
	UnknownDifficulty(u32),

	#[error("Data source unavailable: {0:#}")]
	UpstreamUnavailable(#[source] anyhow::Error),
}

impl RankingError {
	#[inline]
	pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
		Self::InvalidParameter {
			field,
			reason: reason.into(),
		}
	}

	#[inline]
	pub fn upstream(error: impl Into<anyhow::Error>) -> Self {
		Self::UpstreamUnavailable(error.into())
	}

	#[inline]
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidParameter { .. } | Self::UnknownDifficulty(_) => ErrorKind::User,
			Self::UpstreamUnavailable(_) => ErrorKind::Internal,
		}
	}
}
// }}}
// {{{ Skipped entries
/// A record excluded from a computation because it references a difficulty
/// outside the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
	pub challenge_id: u32,
	pub difficulty_id: u32,
}

impl SkippedEntry {
	/// Records the entry and logs it. Returns `false` when the challenge was
	/// already recorded.
	pub fn record(skipped: &mut Vec<SkippedEntry>, challenge_id: u32, difficulty_id: u32) -> bool {
		if skipped.iter().any(|s| s.challenge_id == challenge_id) {
			return false;
		}

		tracing::warn!(
			challenge_id,
			difficulty_id,
			"Skipping challenge with unknown difficulty"
		);
		skipped.push(SkippedEntry {
			challenge_id,
			difficulty_id,
		});

		true
	}
}
// }}}
