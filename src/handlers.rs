// src/handlers.rs
//
// Subcommand handlers. Each one owns its failure path: whatever goes wrong
// against the file host or the chat platform is logged here and turned into
// a fixed reply, so nothing propagates back to the pipeline.

use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::chunk::{chunk, MAX_CHUNK_SIZE};
use crate::clients::{fetch_bytes, DiscordClient, PanelClient};
use crate::commands::Subcommand;
use crate::config::Config;
use crate::interaction::CommandInvocation;

pub const SCHEMATIC_EXT: &str = "schematic";

pub const DOWNLOAD_FAILED: &str = "Failed to download the schematic file.";
pub const UPLOAD_FAILED: &str = "Failed to upload the schematic file.";
pub const LIST_FAILED: &str = "Failed to list the schematic files.";
pub const INVALID_EXTENSION: &str = "Invalid file extension. Please upload a schematic file.";
pub const INVALID_NAME: &str = "Invalid schematic name.";
pub const LIST_HEADER: &str = "Schematics on the server:";

/// Per-request collaborators, built only after the request is authenticated.
pub struct CommandContext<'a> {
    pub config: &'a Config,
    pub http: &'a Client,
    pub discord: &'a DiscordClient,
    pub panel: &'a PanelClient,
    pub name_gen: fn() -> String,
}

pub async fn run(sub: Subcommand, ctx: &CommandContext<'_>, inv: &CommandInvocation) -> String {
    match sub {
        Subcommand::Download => download(ctx, inv).await,
        Subcommand::Upload => upload(ctx, inv).await,
        Subcommand::List => list(ctx, inv).await,
    }
}

// ---------- download ---------- //

pub async fn download(ctx: &CommandContext<'_>, inv: &CommandInvocation) -> String {
    let Some(name) = inv.argument("name") else {
        warn!("download invoked without a name");
        return DOWNLOAD_FAILED.into();
    };
    if !is_safe_name(name) {
        warn!(name, "rejected schematic name");
        return INVALID_NAME.into();
    }

    let filename = format!("{name}.{SCHEMATIC_EXT}");
    debug!(file = %filename, "schematic download start");

    let res: anyhow::Result<()> = async {
        let link = ctx.panel.download_link(&ctx.config.schematic_path(name)).await?;
        // the chat platform fetches links eagerly, which would burn the one-time URL
        let bytes = fetch_bytes(ctx.http, &link).await?;
        ctx.discord.post_file(&inv.channel_id, &filename, bytes).await
    }
    .await;

    match res {
        Ok(()) => {
            info!(file = %filename, channel_id = %inv.channel_id, "schematic downloaded");
            format!("Downloaded the schematic file: `{filename}`")
        }
        Err(e) => {
            error!(file = %filename, error = ?e, "schematic download failed");
            DOWNLOAD_FAILED.into()
        }
    }
}

/// A user-supplied name must stay inside the schematics directory.
pub fn is_safe_name(name: &str) -> bool {
    !name.trim().is_empty()
        && !name.contains(['/', '\\'])
        && !name.contains("..")
        && !name.chars().any(char::is_control)
}

// ---------- upload ---------- //

pub async fn upload(ctx: &CommandContext<'_>, inv: &CommandInvocation) -> String {
    let Some(attachment) = inv.attachment("file") else {
        warn!("upload invoked without a resolved attachment");
        return UPLOAD_FAILED.into();
    };
    if file_extension(&attachment.url) != Some(SCHEMATIC_EXT) {
        warn!(url = %attachment.url, "upload rejected: invalid file extension");
        return INVALID_EXTENSION.into();
    }

    debug!(url = %attachment.url, "schematic upload start");
    let name = (ctx.name_gen)();
    let filename = format!("{name}.{SCHEMATIC_EXT}");

    let res: anyhow::Result<()> = async {
        let bytes = fetch_bytes(ctx.http, &attachment.url).await?;
        ctx.panel
            .write_file(&ctx.config.schematic_path(&name), bytes)
            .await
    }
    .await;

    match res {
        Ok(()) => {
            info!(file = %filename, "schematic uploaded");
            format!("Uploaded the schematic file: `{filename}`")
        }
        Err(e) => {
            error!(file = %filename, error = ?e, "schematic upload failed");
            UPLOAD_FAILED.into()
        }
    }
}

/// Extension of the last path segment, ignoring any query string or fragment.
pub fn file_extension(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment.rsplit_once('.').map(|(_, ext)| ext)
}

// ---------- list ---------- //

pub async fn list(ctx: &CommandContext<'_>, inv: &CommandInvocation) -> String {
    debug!("schematic list start");

    let res: anyhow::Result<usize> = async {
        let entries = ctx.panel.list_directory(&ctx.config.schematics_dir).await?;
        let suffix = format!(".{SCHEMATIC_EXT}");
        let names: Vec<&str> = entries
            .iter()
            .filter(|e| e.is_file)
            .filter_map(|e| e.name.strip_suffix(suffix.as_str()))
            .collect();

        let pages = chunk(&names, MAX_CHUNK_SIZE);
        // sequential on purpose: channel order must match page order
        for page in &pages {
            ctx.discord
                .post_message(&inv.channel_id, &format!("```{page}```"))
                .await?;
        }
        Ok(names.len())
    }
    .await;

    match res {
        Ok(count) => {
            info!(count, channel_id = %inv.channel_id, "schematics listed");
            LIST_HEADER.into()
        }
        Err(e) => {
            error!(error = ?e, "schematic list failed");
            LIST_FAILED.into()
        }
    }
}
