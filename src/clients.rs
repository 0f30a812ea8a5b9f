// src/clients.rs
use anyhow::Context;
use reqwest::{multipart, Client};
use serde_json::json;

use crate::config::Config;
use crate::types::{CommandSchema, FileEntry, FileListRes, SignedUrlRes};

// ---------- chat platform ---------- //

#[derive(Clone)]
pub struct DiscordClient {
    http: Client,
    base_url: String,
    token: String,
    application_id: String,
}

impl DiscordClient {
    pub fn new(http: Client, cfg: &Config) -> Self {
        Self {
            http,
            base_url: cfg.discord_api_url.clone(),
            token: cfg.bot_token.clone(),
            application_id: cfg.application_id.clone(),
        }
    }

    fn auth(&self) -> String {
        format!("Bot {}", self.token)
    }

    pub async fn register_commands(&self, schema: &CommandSchema) -> anyhow::Result<()> {
        self.http
            .post(format!(
                "{}/applications/{}/commands",
                self.base_url, self.application_id
            ))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(schema)
            .send()
            .await
            .context("register commands")?
            .error_for_status()
            .context("register commands")?;
        Ok(())
    }

    pub async fn post_message(&self, channel_id: &str, content: &str) -> anyhow::Result<()> {
        self.http
            .post(format!("{}/channels/{channel_id}/messages", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&json!({ "content": content }))
            .send()
            .await
            .context("post message")?
            .error_for_status()
            .context("post message")?;
        Ok(())
    }

    pub async fn post_file(
        &self,
        channel_id: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<()> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new().part("files[0]", part);

        self.http
            .post(format!("{}/channels/{channel_id}/messages", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .multipart(form)
            .send()
            .await
            .context("post file")?
            .error_for_status()
            .context("post file")?;
        Ok(())
    }
}

// ---------- file host ---------- //

#[derive(Clone)]
pub struct PanelClient {
    http: Client,
    base_url: String,
    token: String,
    server_id: String,
}

impl PanelClient {
    pub fn new(http: Client, cfg: &Config) -> Self {
        Self {
            http,
            base_url: cfg.panel_url.clone(),
            token: cfg.panel_token.clone(),
            server_id: cfg.server_id.clone(),
        }
    }

    fn files_url(&self, action: &str) -> String {
        format!(
            "{}/api/client/servers/{}/files/{action}",
            self.base_url, self.server_id
        )
    }

    /// Pre-signed, time-limited URL for a single file.
    pub async fn download_link(&self, path: &str) -> anyhow::Result<String> {
        let res: SignedUrlRes = self
            .http
            .get(self.files_url("download"))
            .bearer_auth(&self.token)
            .query(&[("file", path)])
            .send()
            .await
            .context("request download link")?
            .error_for_status()
            .context("request download link")?
            .json()
            .await
            .context("decode download link")?;
        Ok(res.attributes.url)
    }

    pub async fn list_directory(&self, path: &str) -> anyhow::Result<Vec<FileEntry>> {
        let res: FileListRes = self
            .http
            .get(self.files_url("list"))
            .bearer_auth(&self.token)
            .query(&[("directory", path)])
            .send()
            .await
            .context("list directory")?
            .error_for_status()
            .context("list directory")?
            .json()
            .await
            .context("decode directory listing")?;
        Ok(res.data.into_iter().map(|f| f.attributes).collect())
    }

    pub async fn write_file(&self, path: &str, bytes: Vec<u8>) -> anyhow::Result<()> {
        self.http
            .post(self.files_url("write"))
            .bearer_auth(&self.token)
            .query(&[("file", path)])
            .body(bytes)
            .send()
            .await
            .context("write file")?
            .error_for_status()
            .context("write file")?;
        Ok(())
    }
}

/// Plain GET without credentials, for pre-signed links and user attachments.
pub async fn fetch_bytes(http: &Client, url: &str) -> anyhow::Result<Vec<u8>> {
    let bytes = http
        .get(url)
        .send()
        .await
        .with_context(|| format!("fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("fetch {url}"))?
        .bytes()
        .await
        .context("read body")?;
    Ok(bytes.to_vec())
}
