pub mod error;
pub mod model;
pub mod negotiation;
pub mod utils;

pub use error::MeetError;
pub use model::*;
pub use negotiation::{Command, Negotiator};
