use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use ::api::contact::ContactResp;

pub mod api;
pub mod svc;

// adapted from https://github.com/tokio-rs/axum/blob/main/examples/anyhow-error-response/src/main.rs
//
// unlike the example, the error itself is only logged; the caller gets the
// same generic body no matter what went wrong inside the relay
struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!({ error = %self.0 }, "internal error while handling request");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ContactResp::failed("internal server error")),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
