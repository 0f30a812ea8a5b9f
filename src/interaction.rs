// src/interaction.rs
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use crate::types::{
    Attachment, CommandOption, CommandPayload, INTERACTION_APPLICATION_COMMAND, INTERACTION_PING,
};

#[derive(Debug)]
pub enum Interaction {
    Handshake,
    Command(CommandInvocation),
    Unknown,
}

#[derive(Debug)]
pub struct CommandInvocation {
    pub name: String,
    pub subcommand: Option<String>,
    pub arguments: Vec<CommandOption>,
    pub channel_id: String,
    pub attachments: HashMap<String, Attachment>,
}

impl CommandInvocation {
    /// String value of a subcommand option by name.
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|o| o.name == name)
            .and_then(|o| o.value.as_ref())
            .and_then(Value::as_str)
    }

    /// Attachment referenced by an attachment-typed option.
    pub fn attachment(&self, option: &str) -> Option<&Attachment> {
        self.argument(option)
            .and_then(|id| self.attachments.get(id))
    }
}

/// Parse the raw (already verified) body into an interaction. Never fails;
/// anything that does not look like a known interaction is `Unknown`.
pub fn classify(raw_body: &[u8]) -> Interaction {
    let body: Value = match serde_json::from_slice(raw_body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "interaction body is not json");
            return Interaction::Unknown;
        }
    };

    let kind = body.get("type").and_then(Value::as_u64);
    match kind {
        Some(INTERACTION_PING) => Interaction::Handshake,
        Some(INTERACTION_APPLICATION_COMMAND) => match serde_json::from_value::<CommandPayload>(body) {
            Ok(payload) => Interaction::Command(into_invocation(payload)),
            Err(e) => {
                warn!(error = %e, "malformed application command");
                Interaction::Unknown
            }
        },
        _ => Interaction::Unknown,
    }
}

fn into_invocation(payload: CommandPayload) -> CommandInvocation {
    let CommandPayload { channel_id, data } = payload;
    if channel_id.is_empty() {
        warn!(command = %data.name, "application command without channel_id");
    }
    let (subcommand, arguments) = match data.options.into_iter().next() {
        Some(sub) => (Some(sub.name), sub.options),
        None => (None, Vec::new()),
    };
    CommandInvocation {
        name: data.name,
        subcommand,
        arguments,
        channel_id,
        attachments: data.resolved.unwrap_or_default().attachments,
    }
}
