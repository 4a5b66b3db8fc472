use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meet_core::MeetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("room and name must not be empty")]
    InvalidPath,

    #[error("name '{name}' is already taken in room '{room}'")]
    NameTaken { room: String, name: String },

    #[error("room '{0}' does not exist")]
    RoomNotFound(String),

    #[error("recipient '{0}' is not in the room")]
    RecipientNotFound(String),

    #[error("payload claims sender '{claimed}' but the socket belongs to '{actual}'")]
    SenderMismatch { claimed: String, actual: String },

    #[error("'{0}' tried to send a roster, only the relay may")]
    RosterFromClient(String),

    #[error("participant '{0}' is no longer connected")]
    ParticipantGone(String),

    #[error(transparent)]
    Message(#[from] MeetError),
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidPath => StatusCode::BAD_REQUEST,
            ServerError::NameTaken { .. } => StatusCode::CONFLICT,
            ServerError::RoomNotFound(_) | ServerError::RecipientNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ServerError::SenderMismatch { .. } | ServerError::RosterFromClient(_) => {
                StatusCode::FORBIDDEN
            }
            ServerError::ParticipantGone(_) => StatusCode::GONE,
            ServerError::Message(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
