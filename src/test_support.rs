// src/test_support.rs
use axum::http::HeaderMap;
use ed25519_dalek::{Signer, SigningKey};
use std::collections::HashMap;

use crate::config::Config;
use crate::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER};

pub const TIMESTAMP: &str = "1700000000";

pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[7u8; 32])
}

pub fn sign(timestamp: &str, body: &[u8]) -> String {
    let message = [timestamp.as_bytes(), body].concat();
    hex::encode(signing_key().sign(&message).to_bytes())
}

pub fn signed_headers(body: &[u8]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(SIGNATURE_HEADER, sign(TIMESTAMP, body).parse().unwrap());
    headers.insert(TIMESTAMP_HEADER, TIMESTAMP.parse().unwrap());
    headers
}

pub fn test_config(discord_url: &str, panel_url: &str) -> Config {
    let public_key = hex::encode(signing_key().verifying_key().as_bytes());
    let vars: HashMap<&str, String> = HashMap::from([
        ("PUBLIC_KEY", public_key),
        ("BOT_TOKEN", "bot-token".to_string()),
        ("APPLICATION_ID", "app1".to_string()),
        ("DISCORD_API_URL", discord_url.to_string()),
        ("PTERODACTYL_URL", panel_url.to_string()),
        ("PTERODACTYL_TOKEN", "panel-token".to_string()),
        ("SERVER_ID", "srv1".to_string()),
        ("SCHEMATICS_DIR", "/schematics".to_string()),
    ]);
    Config::from_lookup(|k| vars.get(k).cloned()).unwrap()
}
