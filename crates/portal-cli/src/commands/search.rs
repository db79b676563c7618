use clap::{Arg, ArgMatches, Command};
use portal::{LoadState, Page, Summary, Tipo};
use serde::Serialize;

use crate::commands::CommandResult;
use crate::context::CliSession;
use crate::error::CliError;

#[derive(Clone, Debug, Serialize)]
pub struct SearchMatch {
    pub tipo: Tipo,
    pub id: String,
    pub title: String,
    pub score: f64,
}

pub fn command() -> Command {
    Command::new("search")
        .about("Query the combined catalogs and list ranked matches")
        .arg(
            Arg::new("term")
                .value_name("TERM")
                .required(true)
                .help("Search term; accents and case are ignored"),
        )
}

pub fn run(session: &CliSession, matches: &ArgMatches) -> Result<CommandResult, CliError> {
    let term = matches
        .get_one::<String>("term")
        .map(|term| term.trim().to_string())
        .unwrap_or_default();

    let mut portal = session.portal()?;
    let mut page = Page::parse("index.html")?;
    if session.block_on(portal.init(&mut page))? != LoadState::Ready {
        return Err(CliError::data(format!(
            "catalogs unavailable from {}",
            session.source.describe()
        )));
    }

    let matches = portal
        .index()
        .map(|index| {
            index
                .search(&term)
                .into_iter()
                .map(|hit| SearchMatch {
                    tipo: hit.record.tipo(),
                    id: hit.record.id().to_string(),
                    title: hit.record.title().to_string(),
                    score: hit.score,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(CommandResult::SearchResults { term, matches })
}
