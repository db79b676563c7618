use std::process::ExitCode;

use portal::LoadState;

use crate::commands::CommandResult;
use crate::error::{CliError, ExitStatus};

pub enum OutputFormat {
    Text,
    Json,
}

/// Prints `result` as text or a single JSON line and maps it to an exit code.
pub fn emit_result(result: CommandResult, format: OutputFormat) -> Result<ExitCode, CliError> {
    match format {
        OutputFormat::Text => print_text(&result),
        OutputFormat::Json => print_json(&result)?,
    };
    Ok(ExitCode::from(result.exit_status().code()))
}

fn print_text(result: &CommandResult) {
    match result {
        CommandResult::PageRendered {
            location,
            state,
            body,
            mounts,
        } => {
            let state = match state {
                LoadState::Loading => "loading",
                LoadState::Ready => "ready",
                LoadState::Error => "error",
            };
            println!("Page {location} ({state})");
            if !body.is_empty() {
                println!("body: {}", body.join(" "));
            }
            for mount in mounts {
                let html = mount.element.inner_html();
                if html.is_empty() {
                    continue;
                }
                let classes: Vec<&str> = mount.element.classes().iter().collect();
                if classes.is_empty() {
                    println!("== {} ==", mount.selector);
                } else {
                    println!("== {} [{}] ==", mount.selector, classes.join(" "));
                }
                if mount.element.is_hidden() {
                    println!("(hidden)");
                }
                println!("{html}");
            }
        }
        CommandResult::SearchResults { term, matches } => {
            if matches.is_empty() {
                println!("No matches for \"{term}\"");
            } else {
                println!("Matches for \"{term}\" ({}):", matches.len());
            }
            for hit in matches {
                println!(
                    "  [{}] {} - {} (score {:.2})",
                    hit.tipo, hit.id, hit.title, hit.score
                );
            }
        }
        CommandResult::ContactFormatted { html, .. } => {
            println!("{html}");
        }
    }
}

fn print_json(result: &CommandResult) -> Result<(), CliError> {
    let line = serde_json::to_string(result).map_err(|err| {
        CliError::new(
            format!("failed to serialize result: {err}"),
            ExitStatus::Software,
        )
    })?;
    println!("{line}");
    Ok(())
}
