// src/pipeline.rs
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    body::Bytes,
    response::{IntoResponse, Response},
    Json,
};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::clients::{DiscordClient, PanelClient};
use crate::commands::{schematic_command, CommandTable, Route};
use crate::config::Config;
use crate::handlers::{self, CommandContext};
use crate::interaction::{classify, Interaction};
use crate::names::generate_name;
use crate::signature;
use crate::types::{InteractionResponse, MessageData, RESPONSE_CHANNEL_MESSAGE, RESPONSE_PONG};

pub const GROUP_NOT_FOUND: &str = "CommandGroup not found";
pub const COMMAND_NOT_FOUND: &str = "Command not found";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
    pub commands: Arc<CommandTable>,
    pub name_gen: fn() -> String,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            http: Client::new(),
            commands: Arc::new(CommandTable::new()),
            name_gen: generate_name,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Pong,
    ChannelMessage(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Unauthenticated,
    BadRequest,
    Reply(Reply),
}

impl Outcome {
    fn message(content: impl Into<String>) -> Self {
        Outcome::Reply(Reply::ChannelMessage(content.into()))
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Unauthenticated => StatusCode::UNAUTHORIZED.into_response(),
            Outcome::BadRequest => StatusCode::BAD_REQUEST.into_response(),
            Outcome::Reply(Reply::Pong) => Json(InteractionResponse {
                kind: RESPONSE_PONG,
                data: None,
            })
            .into_response(),
            Outcome::Reply(Reply::ChannelMessage(content)) => Json(InteractionResponse {
                kind: RESPONSE_CHANNEL_MESSAGE,
                data: Some(MessageData { content }),
            })
            .into_response(),
        }
    }
}

/// axum entry point; takes the body as raw bytes so the signature is checked
/// against exactly what was sent.
pub async fn interactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Outcome {
    handle(&state, &headers, &body).await
}

pub async fn handle(state: &AppState, headers: &HeaderMap, raw_body: &[u8]) -> Outcome {
    let signed = match signature::extract_headers(headers) {
        Ok(s) => s,
        Err(e) => {
            debug!(reason = %e, "interaction rejected before verification");
            return Outcome::Unauthenticated;
        }
    };
    if !signature::verify(
        raw_body,
        signed.signature,
        signed.timestamp,
        &state.config.public_key,
    ) {
        debug!("interaction failed verification");
        return Outcome::Unauthenticated;
    }

    let discord = DiscordClient::new(state.http.clone(), &state.config);

    match classify(raw_body) {
        Interaction::Handshake => {
            debug!("interaction: ping");
            spawn_registration(discord);
            Outcome::Reply(Reply::Pong)
        }
        Interaction::Unknown => {
            warn!("interaction: unknown type");
            Outcome::BadRequest
        }
        Interaction::Command(inv) => {
            debug!(command = %inv.name, subcommand = ?inv.subcommand, "interaction: application command");
            let sub = match state.commands.resolve(&inv.name, inv.subcommand.as_deref()) {
                Route::Handler(sub) => sub,
                Route::UnknownGroup => return Outcome::message(GROUP_NOT_FOUND),
                Route::UnknownSubcommand => return Outcome::message(COMMAND_NOT_FOUND),
            };

            let panel = PanelClient::new(state.http.clone(), &state.config);
            let ctx = CommandContext {
                config: &state.config,
                http: &state.http,
                discord: &discord,
                panel: &panel,
                name_gen: state.name_gen,
            };
            Outcome::message(handlers::run(sub, &ctx, &inv).await)
        }
    }
}

/// Re-register the command schema without holding up the pong.
fn spawn_registration(discord: DiscordClient) {
    tokio::spawn(async move {
        match discord.register_commands(&schematic_command()).await {
            Ok(()) => info!("commands registered"),
            Err(e) => error!(error = ?e, "command registration failed"),
        }
    });
}
