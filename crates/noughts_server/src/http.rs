//! REST surface for the leaderboard.
//!
//! - `GET /api/leaderboard` returns the ranked top entries.
//! - `POST /api/leaderboard` with `{playerName, result}` records one game.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tracing::{error, info, instrument, warn};

use crate::leaderboard::{GameResult, LeaderboardStore, PlayerRecord};

const MISSING_FIELDS: &str = "Player name and result are required";
const FETCH_FAILED: &str = "Failed to fetch leaderboard";
const SUBMIT_FAILED: &str = "Failed to submit score";

/// Message returned with a successful submission.
pub const SUBMIT_OK: &str = "Score submitted successfully";

/// Body of `POST /api/leaderboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    /// Player display name.
    pub player_name: Option<String>,
    /// One of `win`, `loss`, `draw`.
    pub result: Option<String>,
}

/// Successful response to `POST /api/leaderboard`.
#[derive(Debug, Clone, Serialize, Deserialize, new)]
pub struct SubmitScoreResponse {
    /// Confirmation text.
    pub message: String,
    /// The player's updated record.
    pub player: PlayerRecord,
}

/// Error body returned with any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

#[derive(Debug, Clone, new)]
struct AppState {
    store: Arc<LeaderboardStore>,
    top_n: usize,
}

/// Builds the leaderboard router, with request logging.
#[instrument(skip(store))]
pub fn router(store: Arc<LeaderboardStore>, top_n: usize) -> Router {
    info!("Building leaderboard router");
    Router::new()
        .route("/api/leaderboard", get(get_leaderboard).post(submit_score))
        .with_state(AppState::new(store, top_n))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
}

#[instrument(skip(state))]
async fn get_leaderboard(State(state): State<AppState>) -> Response {
    match state.store.query_top(state.top_n).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to read leaderboard");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED)
        }
    }
}

#[instrument(skip(state, payload))]
async fn submit_score(
    State(state): State<AppState>,
    payload: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected submission body");
            return error_response(StatusCode::BAD_REQUEST, MISSING_FIELDS);
        }
    };

    let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());
    let (Some(name), Some(tag)) = (non_empty(request.player_name), non_empty(request.result))
    else {
        warn!("Submission missing player name or result");
        return error_response(StatusCode::BAD_REQUEST, MISSING_FIELDS);
    };

    let result = match GameResult::parse_tag(&tag) {
        Ok(result) => result,
        Err(e) => {
            warn!(tag = %tag, "Invalid result tag");
            return error_response(StatusCode::BAD_REQUEST, e.message());
        }
    };

    match state.store.record_result(&name, result).await {
        Ok(player) => Json(SubmitScoreResponse::new(SUBMIT_OK.to_string(), player)).into_response(),
        Err(e) if e.is_validation() => {
            warn!(error = %e, "Submission failed validation");
            error_response(StatusCode::BAD_REQUEST, e.message())
        }
        Err(e) => {
            error!(error = %e, "Failed to record result");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, SUBMIT_FAILED)
        }
    }
}
