use portal::LoadState;
use serde::Serialize;

use crate::error::ExitStatus;

pub mod contact;
pub mod render;
pub mod search;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandResult {
    PageRendered {
        location: String,
        state: LoadState,
        body: Vec<String>,
        mounts: Vec<render::MountView>,
    },
    SearchResults {
        term: String,
        matches: Vec<search::SearchMatch>,
    },
    ContactFormatted {
        html: String,
        links: Vec<contact::LinkView>,
    },
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            CommandResult::PageRendered { state, .. } => match state {
                LoadState::Ready => ExitStatus::Ok,
                LoadState::Loading | LoadState::Error => ExitStatus::Data,
            },
            _ => ExitStatus::Ok,
        }
    }
}
