use clap::{Arg, ArgMatches, Command};
use portal::{Element, Page};
use serde::Serialize;

use crate::commands::CommandResult;
use crate::context::CliSession;
use crate::error::CliError;
use crate::util;

const DEFAULT_PAGE: &str = "index.html";

#[derive(Debug, Serialize)]
pub struct MountView {
    pub selector: String,
    #[serde(flatten)]
    pub element: Element,
}

pub fn command() -> Command {
    Command::new("render")
        .about("Boot a page against the site data and print the resulting markup")
        .arg(
            Arg::new("page")
                .value_name("PAGE")
                .default_value(DEFAULT_PAGE)
                .help("Site-relative page, e.g. laboratorio_template.html?id=suelos"),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .value_name("TERM")
                .help("Type TERM into the search box and submit it after loading"),
        )
}

pub fn run(session: &CliSession, matches: &ArgMatches) -> Result<CommandResult, CliError> {
    let page_arg = matches
        .get_one::<String>("page")
        .map(String::as_str)
        .unwrap_or(DEFAULT_PAGE);
    util::validate_page(page_arg)?;

    let location = session.source.page_location(page_arg)?;
    let mut page = if session.config.is_entity_page(location.path()) {
        Page::entity(location)
    } else {
        Page::listing(location)
    };

    let mut portal = session.portal()?;
    let state = session.block_on(portal.boot(&mut page))?;
    if session.verbosity.verbose {
        tracing::info!(page = page_arg, state = ?state, source = %session.source.describe(), "page booted");
    }

    if let Some(term) = matches.get_one::<String>("search") {
        page.type_search(term);
        portal.on_search_submit(&mut page)?;
    }

    Ok(CommandResult::PageRendered {
        location: page.location().to_string(),
        state,
        body: page.body().iter().map(str::to_string).collect(),
        mounts: page
            .elements()
            .map(|(selector, element)| MountView {
                selector: selector.to_string(),
                element: element.clone(),
            })
            .collect(),
    })
}
