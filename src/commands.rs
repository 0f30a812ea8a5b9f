// src/commands.rs
use std::collections::HashMap;

use crate::types::{CommandSchema, OptionSchema, OPTION_ATTACHMENT, OPTION_STRING, OPTION_SUB_COMMAND};

pub const SCHEMATIC_COMMAND: &str = "schematic";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcommand {
    Download,
    Upload,
    List,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Route {
    Handler(Subcommand),
    UnknownGroup,
    UnknownSubcommand,
}

/// `(command, subcommand) -> handler`, built once at startup.
#[derive(Debug, Clone)]
pub struct CommandTable {
    groups: HashMap<&'static str, HashMap<&'static str, Subcommand>>,
}

impl CommandTable {
    pub fn new() -> Self {
        let subcommands = HashMap::from([
            ("download", Subcommand::Download),
            ("upload", Subcommand::Upload),
            ("list", Subcommand::List),
        ]);
        Self {
            groups: HashMap::from([(SCHEMATIC_COMMAND, subcommands)]),
        }
    }

    pub fn resolve(&self, command: &str, subcommand: Option<&str>) -> Route {
        let Some(group) = self.groups.get(command) else {
            return Route::UnknownGroup;
        };
        match subcommand.and_then(|s| group.get(s)) {
            Some(handler) => Route::Handler(*handler),
            None => Route::UnknownSubcommand,
        }
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Payload registered with the chat platform on every handshake.
pub fn schematic_command() -> CommandSchema {
    CommandSchema {
        name: SCHEMATIC_COMMAND,
        description: "Download/Upload/List schematics on the server",
        options: vec![
            OptionSchema {
                kind: OPTION_SUB_COMMAND,
                name: "upload",
                description: "Upload schematics onto the server (will be assigned a random name)",
                required: false,
                options: Some(vec![OptionSchema {
                    kind: OPTION_ATTACHMENT,
                    name: "file",
                    description: "The schematic file to upload",
                    required: true,
                    options: None,
                }]),
            },
            OptionSchema {
                kind: OPTION_SUB_COMMAND,
                name: "list",
                description: "List schematics on the server",
                required: false,
                options: Some(vec![]),
            },
            OptionSchema {
                kind: OPTION_SUB_COMMAND,
                name: "download",
                description: "Download a schematic on the server",
                required: false,
                options: Some(vec![OptionSchema {
                    kind: OPTION_STRING,
                    name: "name",
                    description: "Name of the schematic (excluding file ending)",
                    required: true,
                    options: None,
                }]),
            },
        ],
    }
}
