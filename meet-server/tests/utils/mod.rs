pub mod signal_helpers;
pub mod test_client;
pub mod test_server;

pub use rtc_peer::*;
pub use signal_helpers::*;
pub use test_client::*;
pub use test_server::*;
