// src/config.rs
use anyhow::{anyhow, Context};
use ed25519_dalek::VerifyingKey;
use std::{fmt, net::SocketAddr};

pub const DEFAULT_DISCORD_API_URL: &str = "https://discord.com/api/v10";
pub const DEFAULT_SCHEMATICS_DIR: &str = "/plugins/WorldEdit/schematics";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Process configuration, read once at startup and shared by reference.
#[derive(Clone)]
pub struct Config {
    pub public_key: VerifyingKey,
    pub bot_token: String,
    pub application_id: String,
    pub discord_api_url: String,
    pub panel_url: String,
    pub panel_token: String,
    pub server_id: String,
    pub schematics_dir: String,
    pub listen_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> anyhow::Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow!("missing required environment variable {key}"))
        };
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let public_key = parse_public_key(&required("PUBLIC_KEY")?).context("PUBLIC_KEY")?;
        let listen_addr = optional("LISTEN_ADDR", DEFAULT_LISTEN_ADDR)
            .parse()
            .context("LISTEN_ADDR is not a socket address")?;

        Ok(Self {
            public_key,
            bot_token: required("BOT_TOKEN")?,
            application_id: required("APPLICATION_ID")?,
            discord_api_url: trim_base(optional("DISCORD_API_URL", DEFAULT_DISCORD_API_URL)),
            panel_url: trim_base(required("PTERODACTYL_URL")?),
            panel_token: required("PTERODACTYL_TOKEN")?,
            server_id: required("SERVER_ID")?,
            schematics_dir: optional("SCHEMATICS_DIR", DEFAULT_SCHEMATICS_DIR)
                .trim_end_matches('/')
                .to_string(),
            listen_addr,
        })
    }

    /// Remote path of a schematic by display name.
    pub fn schematic_path(&self, name: &str) -> String {
        format!("{}/{name}.schematic", self.schematics_dir)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("public_key", &hex::encode(self.public_key.as_bytes()))
            .field("bot_token", &"[REDACTED]")
            .field("application_id", &self.application_id)
            .field("discord_api_url", &self.discord_api_url)
            .field("panel_url", &self.panel_url)
            .field("panel_token", &"[REDACTED]")
            .field("server_id", &self.server_id)
            .field("schematics_dir", &self.schematics_dir)
            .field("listen_addr", &self.listen_addr)
            .finish()
    }
}

pub fn parse_public_key(hex_key: &str) -> anyhow::Result<VerifyingKey> {
    use core::convert::TryFrom;

    let bytes = hex::decode(hex_key.trim()).context("public key is not valid hex")?;
    VerifyingKey::try_from(&bytes[..]).map_err(|e| anyhow!("invalid public key: {e}"))
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
