// {{{ Imports
use std::collections::HashMap;

use rusqlite::{Connection, Row};

use crate::celeste::model::{
	Campaign, Challenge, Change, Map, Player, SnapshotData, Submission, Verification,
};
// }}}

// {{{ Row conversions
fn challenge_from_row(row: &Row) -> rusqlite::Result<Challenge> {
	Ok(Challenge {
		id: row.get("id")?,
		campaign_id: row.get("campaign_id")?,
		map_id: row.get("map_id")?,
		objective_id: row.get("objective_id")?,
		difficulty_id: row.get("difficulty_id")?,
		description: row.get("description")?,
		requires_fc: row.get("requires_fc")?,
		has_fc: row.get("has_fc")?,
		is_arbitrary: row.get("is_arbitrary")?,
		submissions: Vec::new(),
	})
}

fn submission_from_row(row: &Row) -> rusqlite::Result<Submission> {
	Ok(Submission {
		id: row.get("id")?,
		challenge_id: row.get("challenge_id")?,
		player_id: row.get("player_id")?,
		date_created: row.get("date_created")?,
		verification: Verification::from_db(row.get("is_verified")?),
		suggested_difficulty_id: row.get("suggested_difficulty_id")?,
		is_personal: row.get("is_personal")?,
		is_fc: row.get("is_fc")?,
		new_challenge_id: row.get("new_challenge_id")?,
		proof_url: row.get("proof_url")?,
	})
}

fn change_from_row(row: &Row) -> rusqlite::Result<Change> {
	Ok(Change {
		id: row.get("id")?,
		campaign_id: row.get("campaign_id")?,
		map_id: row.get("map_id")?,
		challenge_id: row.get("challenge_id")?,
		player_id: row.get("player_id")?,
		description: row.get("description")?,
		date: row.get("date")?,
	})
}
// }}}

/// Reads the whole database. Submissions are nested under their challenge,
/// oldest first, with undated ones last.
pub fn load_snapshot(conn: &Connection) -> anyhow::Result<SnapshotData> {
	let campaigns = conn
		.prepare_cached("SELECT id, name FROM campaigns ORDER BY id")?
		.query_map((), |row| {
			Ok(Campaign {
				id: row.get("id")?,
				name: row.get("name")?,
			})
		})?
		.collect::<Result<Vec<_>, _>>()?;

	let maps = conn
		.prepare_cached("SELECT id, campaign_id, name, is_archived FROM maps ORDER BY id")?
		.query_map((), |row| {
			Ok(Map {
				id: row.get("id")?,
				campaign_id: row.get("campaign_id")?,
				name: row.get("name")?,
				is_archived: row.get("is_archived")?,
			})
		})?
		.collect::<Result<Vec<_>, _>>()?;

	let players = conn
		.prepare_cached("SELECT id, name FROM players ORDER BY id")?
		.query_map((), |row| {
			Ok(Player {
				id: row.get("id")?,
				name: row.get("name")?,
			})
		})?
		.collect::<Result<Vec<_>, _>>()?;

	let mut challenges = conn
		.prepare_cached("SELECT * FROM challenges ORDER BY id")?
		.query_map((), challenge_from_row)?
		.collect::<Result<Vec<_>, _>>()?;

	// {{{ Nest submissions
	let positions: HashMap<u32, usize> = challenges
		.iter()
		.enumerate()
		.map(|(i, c)| (c.id, i))
		.collect();

	let submissions = conn
		.prepare_cached(
			"
        SELECT * FROM submissions
        ORDER BY date_created IS NULL, date_created, id
      ",
		)?
		.query_map((), submission_from_row)?
		.collect::<Result<Vec<_>, _>>()?;

	for submission in submissions {
		match positions.get(&submission.challenge_id) {
			Some(&i) => challenges[i].submissions.push(submission),
			None => tracing::warn!(
				submission_id = submission.id,
				challenge_id = submission.challenge_id,
				"Submission references a missing challenge"
			),
		}
	}
	// }}}

	let changes = conn
		.prepare_cached("SELECT * FROM changes ORDER BY date, id")?
		.query_map((), change_from_row)?
		.collect::<Result<Vec<_>, _>>()?;

	Ok(SnapshotData {
		campaigns,
		maps,
		players,
		challenges,
		changes,
	})
}

// }}}
