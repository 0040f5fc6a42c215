//! This module provides helpers for working with environment
//! variables and paths, together with a struct
//! that keeps track of all the runtime-relevant paths.

use anyhow::Context;
use std::{path::Path, path::PathBuf, str::FromStr};

/// Wrapper around [std::env::var] which adds [anyhow] context around errors.
pub fn get_var(name: &str) -> anyhow::Result<String> {
	std::env::var(name).with_context(|| format!("Missing ${name} environment variable"))
}

/// Reads an environment variable containing a directory path,
/// creating the directory if it doesn't exist.
pub fn get_env_dir_path(name: &str, default_to: Option<&str>) -> anyhow::Result<PathBuf> {
	let var = get_var(name);
	let var = match default_to {
		None => var?,
		Some(other) => var.or_else(|_| get_var(other))?,
	};

	let path = PathBuf::from_str(&var).with_context(|| format!("${name} is not a valid path"))?;

	if !path.exists() {
		std::fs::create_dir_all(&path).with_context(|| format!("Could not create ${name}"))?;
	}

	Ok(path)
}

#[derive(Clone, Debug)]
pub struct GoldberriesPaths {
	/// This directory contains files that are entirely managed
	/// by the runtime of the app, like the database.
	data_dir: PathBuf,

	/// A json snapshot the database gets seeded from.
	seed_file: Option<PathBuf>,
}

impl GoldberriesPaths {
	/// Gets all the standard paths from the environment,
	/// creating every involved directory in the process.
	pub fn new() -> anyhow::Result<Self> {
		let res = Self {
			data_dir: get_env_dir_path("GOLDBERRIES_DATA_DIR", Some("STATE_DIRECTORY"))?,
			seed_file: get_var("GOLDBERRIES_SEED_FILE").ok().map(PathBuf::from),
		};

		Ok(res)
	}

	/// Paths rooted at an explicit directory, without a seed file.
	pub fn at(data_dir: &Path) -> Self {
		Self {
			data_dir: data_dir.to_path_buf(),
			seed_file: None,
		}
	}

	pub fn with_seed_file(mut self, seed_file: impl Into<PathBuf>) -> Self {
		self.seed_file = Some(seed_file.into());
		self
	}

	pub fn db_path(&self) -> PathBuf {
		self.data_dir.join("db.sqlite")
	}

	pub fn seed_path(&self) -> Option<&Path> {
		self.seed_file.as_deref()
	}
}
