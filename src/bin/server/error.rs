use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
};
use goldberries::celeste::error::{ErrorKind, RankingError};

pub struct AppError {
	pub error: anyhow::Error,
	pub status_code: StatusCode,
}

impl AppError {
	pub fn new(error: anyhow::Error, status_code: StatusCode) -> Self {
		Self { error, status_code }
	}
}

/// The status a failure of the ranking core is reported with.
pub fn ranking_status(error: &RankingError) -> StatusCode {
	match error {
		RankingError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
		RankingError::UnknownDifficulty(_) => StatusCode::UNPROCESSABLE_ENTITY,
		RankingError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		if self.status_code.is_server_error() {
			tracing::error!("Request failed: {:#}", self.error);
		}

		(
			self.status_code,
			format!("Something went wrong: {}", self.error),
		)
			.into_response()
	}
}

impl<E> From<E> for AppError
where
	E: Into<anyhow::Error>,
{
	fn from(err: E) -> Self {
		let error = err.into();
		let status_code = match error.downcast_ref::<RankingError>() {
			Some(e) => ranking_status(e),
			None => StatusCode::INTERNAL_SERVER_ERROR,
		};

		Self::new(error, status_code)
	}
}

#[cfg(test)]
mod error_tests {
	use super::*;

	#[test]
	fn ranking_errors_keep_their_status() {
		let cases = [
			(RankingError::invalid("month", "nope"), StatusCode::BAD_REQUEST),
			(RankingError::UnknownDifficulty(42), StatusCode::UNPROCESSABLE_ENTITY),
			(
				RankingError::upstream(anyhow::anyhow!("db is gone")),
				StatusCode::SERVICE_UNAVAILABLE,
			),
		];

		for (error, status) in cases {
			let kind = error.kind();
			let app_error = AppError::from(error);
			assert_eq!(app_error.status_code, status);
			assert_eq!(kind == ErrorKind::User, status.is_client_error());
		}

		let app_error = AppError::from(anyhow::anyhow!("oops"));
		assert_eq!(app_error.status_code, StatusCode::INTERNAL_SERVER_ERROR);
	}
}
