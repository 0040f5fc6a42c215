// {{{ Imports
use db::{connect_db, SqlitePool};
use std::ops::Deref;

use crate::celeste::error::RankingError;
use crate::celeste::model::Snapshot;
use crate::context::paths::GoldberriesPaths;
use crate::context::snapshot::load_snapshot;
use crate::timed;
// }}}

pub mod db;
pub mod hash;
pub mod import;
pub mod paths;
pub mod snapshot;

// {{{ Common types
pub type Error = anyhow::Error;
// }}}
// {{{ DataContext
/// Everything needed to answer requests: the database and the paths it
/// lives at.
#[derive(Clone)]
pub struct DataContext {
	pub db: SqlitePool,
	pub paths: GoldberriesPaths,
}

impl DataContext {
	#[inline]
	pub fn new() -> Result<Self, Error> {
		timed!("create_context", { Self::with_paths(GoldberriesPaths::new()?) })
	}

	pub fn with_paths(paths: GoldberriesPaths) -> Result<Self, Error> {
		let db = connect_db(&paths)?;
		Ok(Self { db, paths })
	}

	/// Reads a consistent snapshot of every record.
	pub fn snapshot(&self) -> Result<Snapshot, RankingError> {
		timed!("load_snapshot", {
			let load = || -> Result<Snapshot, Error> {
				let conn = self.db.get()?;
				Ok(Snapshot::new(load_snapshot(conn.deref())?))
			};

			load().map_err(|e| {
				tracing::error!("Could not load snapshot: {e:#}");
				RankingError::upstream(e)
			})
		})
	}
}
// }}}
