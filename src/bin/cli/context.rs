use serde::Serialize;

use goldberries::context::{DataContext, Error};

/// Results are printed to the standard output as pretty json.
pub struct CliContext {
	pub data: DataContext,
}

impl CliContext {
	pub fn new() -> Result<Self, Error> {
		Ok(Self {
			data: DataContext::new()?,
		})
	}

	pub fn print<T: Serialize>(&self, value: &T) -> Result<(), Error> {
		println!("{}", serde_json::to_string_pretty(value)?);
		Ok(())
	}
}
