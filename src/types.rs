// src/types.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const INTERACTION_PING: u64 = 1;
pub const INTERACTION_APPLICATION_COMMAND: u64 = 2;

pub const RESPONSE_PONG: u8 = 1;
pub const RESPONSE_CHANNEL_MESSAGE: u8 = 4;

pub const OPTION_SUB_COMMAND: u8 = 1;
pub const OPTION_STRING: u8 = 3;
pub const OPTION_ATTACHMENT: u8 = 11;

// ---------- inbound interaction payload ---------- //

#[derive(Debug, Deserialize)]
pub struct CommandPayload {
    #[serde(default)]
    pub channel_id: String,
    pub data: CommandData,
}

#[derive(Debug, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
    #[serde(default)]
    pub resolved: Option<Resolved>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Resolved {
    #[serde(default)]
    pub attachments: HashMap<String, Attachment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    pub url: String,
}

// ---------- interaction response ---------- //

#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
}

#[derive(Debug, Serialize)]
pub struct MessageData {
    pub content: String,
}

// ---------- command registration ---------- //

#[derive(Debug, Clone, Serialize)]
pub struct CommandSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<OptionSchema>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionSchema {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionSchema>>,
}

// ---------- file host ---------- //

#[derive(Debug, Deserialize)]
pub struct SignedUrlRes {
    pub attributes: SignedUrl,
}

#[derive(Debug, Deserialize)]
pub struct SignedUrl {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct FileListRes {
    #[serde(default)]
    pub data: Vec<FileObject>,
}

#[derive(Debug, Deserialize)]
pub struct FileObject {
    pub attributes: FileEntry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(default = "default_true")]
    pub is_file: bool,
}

fn default_true() -> bool {
    true
}
