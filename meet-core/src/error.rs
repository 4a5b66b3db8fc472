use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeetError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid data channel frame: {0}")]
    Frame(#[from] postcard::Error),

    #[error("no connection for peer {0}")]
    UnknownPeer(String),

    #[error("unexpected answer from {0}: no offer outstanding")]
    UnexpectedAnswer(String),

    #[error("expected {expected} description from {peer}")]
    WrongDescription { peer: String, expected: &'static str },
}
