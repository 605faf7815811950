//! HTTP routes.

use crate::Rejection;
use crate::engine::play;
use crate::rules::{MAX_SIDE, MIN_SIDE};
use axum::body::{Body, Bytes};
use axum::http::Request;
use axum::routing::{get, post};
use axum::{Json, Router};
use tictac_protocol::{Board, HealthResponse, MoveOutcome, NewGameRequest, NewGameResponse};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument};

/// Builds the mover router: `GET /health`, `POST /api/new`, `POST /api/move`.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/new", post(new_game))
        .route("/api/move", post(submit_move))
        .layer(ServiceBuilder::new().map_request(log_request))
}

fn log_request(req: Request<Body>) -> Request<Body> {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Starts a game. An empty body means the default size.
#[instrument(skip(body))]
async fn new_game(body: Bytes) -> Result<Json<NewGameResponse>, Rejection> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        NewGameRequest::default()
    } else {
        serde_json::from_slice::<NewGameRequest>(&body).map_err(|e| {
            debug!(error = %e, "Undecodable new-game body");
            Rejection::InvalidBoardSize
        })?
    };

    let side = request.side();
    if !(MIN_SIDE..=MAX_SIDE).contains(&side) {
        return Err(Rejection::InvalidBoardSize);
    }

    info!(side, "New game");
    Ok(Json(NewGameResponse {
        board: Board::empty(side),
    }))
}

#[instrument(skip(body))]
async fn submit_move(body: Bytes) -> Result<Json<MoveOutcome>, Rejection> {
    let (board, index) = decode_move(&body)?;
    play(&board, index).map(Json)
}

/// Decodes a move body field by field so a bad board and a bad index get
/// distinct rejections.
fn decode_move(body: &[u8]) -> Result<(Board, usize), Rejection> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| Rejection::InvalidBoard)?;

    let board = value
        .get("board")
        .cloned()
        .and_then(|board| serde_json::from_value::<Board>(board).ok())
        .ok_or(Rejection::InvalidBoard)?;

    let index = value
        .get("move")
        .and_then(serde_json::Value::as_u64)
        .and_then(|index| usize::try_from(index).ok())
        .ok_or(Rejection::InvalidMoveIndex)?;

    Ok((board, index))
}
