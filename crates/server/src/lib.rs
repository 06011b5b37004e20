use api_types::{ApiError, Envelope, codes};
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{ServerState, router, run, run_with_listener};

mod orders;
mod report;
mod server;
mod transactions;
mod wallets;

/// Handler error. Rendered as the `error` half of the response envelope.
#[derive(Debug)]
pub struct ServerError(EngineError);

type ServerResult<T> = Result<Json<Envelope<T>>, ServerError>;

fn ok<T>(data: T) -> ServerResult<T> {
    Ok(Json(Envelope::data(data)))
}

fn code_for_engine_error(err: &EngineError) -> &'static str {
    match err {
        EngineError::WalletNotFound(_) => codes::WALLET_NOT_FOUND,
        EngineError::InsufficientFunds(_) => codes::NOT_ENOUGH_CASH,
        EngineError::OrderNotFound(_) => codes::ORDER_NOT_FOUND,
        EngineError::ExistingOrder(_) => codes::ORDER_ALREADY_RESERVED,
        EngineError::InvalidOrderState(_) => codes::INVALID_ORDER_STATE,
        EngineError::InvalidAmount(_) | EngineError::InvalidPeriod(_) => codes::INVALID_REQUEST,
        EngineError::Payload(_) | EngineError::Database { .. } => codes::INTERNAL_ERROR,
    }
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    if err.is_internal() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}

fn message_for_engine_error(err: &EngineError) -> String {
    if err.is_internal() {
        tracing::error!("internal error: {err}");
        return "internal server error".to_string();
    }
    err.to_string()
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let error = ApiError {
            code: code_for_engine_error(&self.0).to_string(),
            message: message_for_engine_error(&self.0),
        };
        let body: Envelope<()> = Envelope::error(error);
        (status_for_engine_error(&self.0), Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_keep_status_200() {
        for err in [
            EngineError::WalletNotFound(1),
            EngineError::InsufficientFunds("x".to_string()),
            EngineError::OrderNotFound("x".to_string()),
            EngineError::InvalidOrderState("x".to_string()),
            EngineError::InvalidAmount("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::OK);
        }
    }

    #[test]
    fn internal_errors_map_to_500() {
        let res = ServerError::from(EngineError::Payload("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn engine_errors_map_to_stable_codes() {
        assert_eq!(
            code_for_engine_error(&EngineError::WalletNotFound(1)),
            "wallet_not_found"
        );
        assert_eq!(
            code_for_engine_error(&EngineError::InsufficientFunds("x".to_string())),
            "not_enough_cash"
        );
        assert_eq!(
            code_for_engine_error(&EngineError::OrderNotFound("x".to_string())),
            "order_not_found"
        );
        assert_eq!(
            code_for_engine_error(&EngineError::InvalidPeriod("x".to_string())),
            "invalid_request"
        );
        assert_eq!(
            code_for_engine_error(&EngineError::Payload("x".to_string())),
            "internal_error"
        );
    }

    #[test]
    fn internal_details_stay_in_the_log() {
        let err = EngineError::Payload("secret detail".to_string());
        assert_eq!(message_for_engine_error(&err), "internal server error");
        assert_eq!(
            message_for_engine_error(&EngineError::WalletNotFound(4)),
            "wallet not found for user 4"
        );
    }
}
