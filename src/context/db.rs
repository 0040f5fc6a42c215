// {{{ Imports
use anyhow::{anyhow, Context};
use include_dir::{include_dir, Dir};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use rusqlite_migration::Migrations;
use std::sync::LazyLock;

use crate::context::hash::hash_file;
use crate::context::import::{import_snapshot, read_snapshot_file};
use crate::context::paths::GoldberriesPaths;
// }}}

pub type SqlitePool = r2d2::Pool<SqliteConnectionManager>;

pub fn connect_db(paths: &GoldberriesPaths) -> anyhow::Result<SqlitePool> {
	let db_path = paths.db_path();
	let mut conn = Connection::open(&db_path).with_context(|| "Could not connect to sqlite database")?;
	conn.pragma_update(None, "journal_mode", "WAL")?;
	conn.pragma_update(None, "foreign_keys", "ON")?;

	// {{{ Run migrations
	static MIGRATIONS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/migrations");
	static MIGRATIONS: LazyLock<Migrations> = LazyLock::new(|| {
		Migrations::from_directory(&MIGRATIONS_DIR).expect("Could not load migrations")
	});

	MIGRATIONS
		.to_latest(&mut conn)
		.with_context(|| "Could not run migrations")?;
	tracing::info!("Ensured db schema is up to date");
	// }}}
	// {{{ Check if we need to re-import the seed
	if let Some(seed_path) = paths.seed_path() {
		let current_seed_hash = hash_file(seed_path)
			.with_context(|| format!("Could not hash seed file `{seed_path:?}`"))?;

		let prev_seed_hash: String = conn
			.query_row("SELECT seed_hash FROM metadata", (), |row| row.get(0))
			.with_context(|| anyhow!("No metadata row found"))?;

		if current_seed_hash != prev_seed_hash {
			tracing::info!(path = ?seed_path, "Seed hash mismatch. Re-importing everything");

			let data = read_snapshot_file(seed_path)?;
			import_snapshot(&mut conn, &data).context("Failed to import seed file")?;
			conn.execute("UPDATE metadata SET seed_hash=?", [current_seed_hash])?;
		} else {
			tracing::info!("Seed hash matches. Skipping import");
		}
	}
	// }}}

	let manager = SqliteConnectionManager::file(&db_path)
		.with_init(|conn| conn.pragma_update(None, "foreign_keys", "ON"));

	Pool::new(manager).with_context(|| "Could not open sqlite database.")
}

// }}}
