//! Move protocol client.
//!
//! Two remote operations, no retries, no game rules. The only local checks are
//! syntactic: the index must be on the board and the cell must be empty.

use crate::config::ClientConfig;
use async_trait::async_trait;
use derive_more::{Display, Error};
use reqwest::StatusCode;
use std::time::Duration;
use tictac_protocol::{
    Board, ErrorBody, HealthResponse, MoveOutcome, MoveRequest, MoveResponse, NewGameRequest,
    NewGameResponse,
};
use tracing::{debug, info, instrument, warn};

/// Failure of a remote call.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ProtocolError {
    /// Endpoint unreachable, timed out, or the body could not be read.
    #[display("transport failure: {message}")]
    Transport {
        /// Underlying error text.
        message: String,
    },
    /// Non-success HTTP status without an error payload.
    #[display("server answered HTTP {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Raw response body.
        body: String,
    },
    /// The mover refused the request with an `{error}` payload.
    #[display("{message}")]
    Rejected {
        /// Reason given by the mover.
        message: String,
    },
    /// Response did not decode or lacked a required field.
    #[display("malformed response: {message}")]
    Malformed {
        /// What was wrong with the response.
        message: String,
    },
    /// Request failed the local syntactic checks and was never sent.
    #[display("invalid request: {message}")]
    Invalid {
        /// Which check failed.
        message: String,
    },
}

impl ProtocolError {
    /// True for a move or game refused by the mover.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ProtocolError::Rejected { .. })
    }
}

impl From<reqwest::Error> for ProtocolError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProtocolError::Malformed {
                message: err.to_string(),
            }
        } else {
            ProtocolError::Transport {
                message: err.to_string(),
            }
        }
    }
}

/// The two remote operations of the remote mover.
#[async_trait]
pub trait MoveService: Send + Sync {
    /// Starts a game with the given side length and returns its empty board.
    async fn new_game(&self, size: usize) -> Result<Board, ProtocolError>;

    /// Sends the full current board and the chosen cell; returns the board
    /// and status after the mover's reply.
    async fn submit_move(&self, board: &Board, index: usize)
    -> Result<MoveOutcome, ProtocolError>;
}

/// HTTP client for the remote mover.
#[derive(Debug, Clone)]
pub struct HttpMoveClient {
    /// Base URL without trailing slash.
    base_url: String,
    /// HTTP client.
    client: reqwest::Client,
}

impl HttpMoveClient {
    /// Creates a client for `base_url` with a per-request timeout.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, ProtocolError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::from)?;
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        info!(base_url = %base_url, "Created move client");
        Ok(Self { base_url, client })
    }

    /// Creates a client from the endpoint and timeout in `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ProtocolError> {
        Self::new(config.api_url(), config.request_timeout())
    }

    /// Base URL of the mover.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probes `GET /health`.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn health(&self) -> Result<HealthResponse, ProtocolError> {
        let response = self.client.get(self.endpoint("/health")).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProtocolError::Status {
                code: status.as_u16(),
                body,
            });
        }
        decode(&body)
    }
}

#[async_trait]
impl MoveService for HttpMoveClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn new_game(&self, size: usize) -> Result<Board, ProtocolError> {
        debug!("Requesting new game");

        let response = self
            .client
            .post(self.endpoint("/api/new"))
            .json(&NewGameRequest { size: Some(size) })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, body = %body, "New game response");

        if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(&body) {
            warn!(error = %error, "New game refused");
            return Err(ProtocolError::Rejected { message: error });
        }
        check_status(status, &body)?;

        let NewGameResponse { board } = decode(&body)?;
        info!(board = %board, "New game started");
        Ok(board)
    }

    #[instrument(skip(self, board), fields(base_url = %self.base_url, board = %board))]
    async fn submit_move(
        &self,
        board: &Board,
        index: usize,
    ) -> Result<MoveOutcome, ProtocolError> {
        precheck(board, index)?;
        debug!("Submitting move");

        let request = MoveRequest {
            board: board.clone(),
            index,
        };
        let response = self
            .client
            .post(self.endpoint("/api/move"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, body = %body, "Move response");

        match serde_json::from_str::<MoveResponse>(&body) {
            Ok(MoveResponse::Rejected(ErrorBody { error })) => {
                warn!(error = %error, "Move rejected");
                Err(ProtocolError::Rejected { message: error })
            }
            Ok(MoveResponse::Outcome(outcome)) => {
                check_status(status, &body)?;
                info!(board = %outcome.board, status = %outcome.status, "Move applied");
                Ok(outcome)
            }
            Err(e) => {
                check_status(status, &body)?;
                Err(ProtocolError::Malformed {
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Local syntactic checks before a move leaves the client.
fn precheck(board: &Board, index: usize) -> Result<(), ProtocolError> {
    if index >= board.len() {
        return Err(ProtocolError::Invalid {
            message: format!("cell {} is off a board of {} cells", index, board.len()),
        });
    }
    if !board.is_cell_empty(index) {
        return Err(ProtocolError::Invalid {
            message: format!("cell {} is not empty", index),
        });
    }
    Ok(())
}

fn check_status(status: StatusCode, body: &str) -> Result<(), ProtocolError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ProtocolError::Status {
            code: status.as_u16(),
            body: body.to_string(),
        })
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ProtocolError> {
    serde_json::from_str(body).map_err(|e| ProtocolError::Malformed {
        message: e.to_string(),
    })
}
