mod participant;
mod room_service;

pub use participant::*;
pub use room_service::*;
