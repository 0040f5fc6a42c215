// {{{ Imports
use anyhow::Context;
use rusqlite::Connection;

use crate::celeste::model::SnapshotData;
// }}}

/// Replaces the entire content of the database with the given snapshot.
pub fn import_snapshot(conn: &mut Connection, data: &SnapshotData) -> anyhow::Result<()> {
	let transaction = conn.transaction()?;

	// {{{ Clear previous content
	transaction.execute_batch(
		"
      DELETE FROM submissions;
      DELETE FROM changes;
      DELETE FROM challenges;
      DELETE FROM maps;
      DELETE FROM campaigns;
      DELETE FROM players;
    ",
	)?;
	// }}}
	// {{{ Campaigns, maps & players
	{
		let mut statement =
			transaction.prepare_cached("INSERT INTO campaigns(id, name) VALUES (?,?)")?;
		for campaign in &data.campaigns {
			statement
				.execute((campaign.id, &campaign.name))
				.with_context(|| format!("Could not import campaign {}", campaign.id))?;
		}

		let mut statement = transaction
			.prepare_cached("INSERT INTO maps(id, campaign_id, name, is_archived) VALUES (?,?,?,?)")?;
		for map in &data.maps {
			statement
				.execute((map.id, map.campaign_id, &map.name, map.is_archived))
				.with_context(|| format!("Could not import map {}", map.id))?;
		}

		let mut statement = transaction.prepare_cached("INSERT INTO players(id, name) VALUES (?,?)")?;
		for player in &data.players {
			statement
				.execute((player.id, &player.name))
				.with_context(|| format!("Could not import player {}", player.id))?;
		}
	}
	// }}}
	// {{{ Challenges & submissions
	{
		let mut challenge_statement = transaction.prepare_cached(
			"
        INSERT INTO challenges(
          id, campaign_id, map_id, objective_id, difficulty_id,
          description, requires_fc, has_fc, is_arbitrary
        ) VALUES (?,?,?,?,?,?,?,?,?)
      ",
		)?;

		let mut submission_statement = transaction.prepare_cached(
			"
        INSERT INTO submissions(
          id, challenge_id, player_id, is_verified, date_created,
          suggested_difficulty_id, is_personal, is_fc, new_challenge_id, proof_url
        ) VALUES (?,?,?,?,?,?,?,?,?,?)
      ",
		)?;

		for challenge in &data.challenges {
			challenge_statement
				.execute((
					challenge.id,
					challenge.campaign_id,
					challenge.map_id,
					challenge.objective_id,
					challenge.difficulty_id,
					&challenge.description,
					challenge.requires_fc,
					challenge.has_fc,
					challenge.is_arbitrary,
				))
				.with_context(|| format!("Could not import challenge {}", challenge.id))?;

			for submission in &challenge.submissions {
				submission_statement
					.execute((
						submission.id,
						challenge.id,
						submission.player_id,
						submission.verification.to_db(),
						submission.date_created,
						submission.suggested_difficulty_id,
						submission.is_personal,
						submission.is_fc,
						submission.new_challenge_id,
						&submission.proof_url,
					))
					.with_context(|| format!("Could not import submission {}", submission.id))?;
			}
		}
	}
	// }}}
	// {{{ Changes
	{
		let mut statement = transaction.prepare_cached(
			"
        INSERT INTO changes(
          id, campaign_id, map_id, challenge_id, player_id, description, date
        ) VALUES (?,?,?,?,?,?,?)
      ",
		)?;

		for change in &data.changes {
			statement
				.execute((
					change.id,
					change.campaign_id,
					change.map_id,
					change.challenge_id,
					change.player_id,
					&change.description,
					change.date,
				))
				.with_context(|| format!("Could not import change {}", change.id))?;
		}
	}
	// }}}

	transaction.commit()?;

	tracing::info!(
		campaigns = data.campaigns.len(),
		maps = data.maps.len(),
		challenges = data.challenges.len(),
		"Imported snapshot"
	);

	Ok(())
}

/// Reads a json snapshot from disk.
pub fn read_snapshot_file(path: &std::path::Path) -> anyhow::Result<SnapshotData> {
	let raw = std::fs::read(path).with_context(|| format!("Could not read `{path:?}`"))?;
	serde_json::from_slice(&raw).with_context(|| format!("Could not parse `{path:?}`"))
}
