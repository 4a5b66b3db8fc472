use clap::Parser;
use meet_core::{IceServerConfig, default_ice_servers};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Signaling relay for meet rooms.
#[derive(Debug, Clone, Parser)]
#[command(name = "meet-server", version)]
pub struct ServerConfig {
    /// Address the HTTP/WebSocket listener binds to.
    #[arg(long, env = "MEET_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Directory holding the client page and wasm bundle.
    #[arg(long, env = "MEET_STATIC_DIR", default_value = "meet-client/static")]
    pub static_dir: PathBuf,

    /// STUN server URLs handed to clients. Public defaults are used when empty.
    #[arg(long = "stun-url", env = "MEET_STUN_URLS", value_delimiter = ',')]
    pub stun_urls: Vec<String>,

    #[arg(long, env = "TURN_URL")]
    pub turn_url: Option<String>,

    #[arg(long, env = "TURN_USERNAME", requires = "turn_url")]
    pub turn_username: Option<String>,

    #[arg(long, env = "TURN_CREDENTIAL", requires = "turn_url")]
    pub turn_credential: Option<String>,
}

impl ServerConfig {
    pub fn ice_servers(&self) -> Vec<IceServerConfig> {
        let mut servers = if self.stun_urls.is_empty() {
            default_ice_servers()
        } else {
            vec![IceServerConfig {
                urls: self.stun_urls.clone(),
                username: None,
                credential: None,
            }]
        };

        if let Some(turn_url) = &self.turn_url {
            servers.push(IceServerConfig {
                urls: vec![turn_url.clone()],
                username: self.turn_username.clone(),
                credential: self.turn_credential.clone(),
            });
        }
        servers
    }
}
