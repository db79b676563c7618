use clap::{Arg, ArgMatches, Command};
use portal::{format_contact, parse_contacts};
use serde::Serialize;

use crate::commands::CommandResult;
use crate::error::CliError;

#[derive(Clone, Debug, Serialize)]
pub struct LinkView {
    pub label: Option<String>,
    pub email: String,
    pub href: String,
}

pub fn command() -> Command {
    Command::new("contact")
        .about("Format a free-text contact string into mailto links")
        .arg(
            Arg::new("text")
                .value_name("TEXT")
                .required(true)
                .help("Contact text, e.g. \"Ventas: ventas@acme.com\""),
        )
        .arg(
            Arg::new("topic")
                .long("topic")
                .value_name("TOPIC")
                .default_value("")
                .help("Service name appended to the email subject"),
        )
}

pub fn run(matches: &ArgMatches) -> Result<CommandResult, CliError> {
    let text = matches
        .get_one::<String>("text")
        .map(String::as_str)
        .unwrap_or_default();
    let topic = matches
        .get_one::<String>("topic")
        .map(String::as_str)
        .unwrap_or_default();

    let links = parse_contacts(text)
        .into_iter()
        .map(|link| LinkView {
            href: link.href(topic),
            label: link.label,
            email: link.email,
        })
        .collect();

    Ok(CommandResult::ContactFormatted {
        html: format_contact(text, topic),
        links,
    })
}
