use serde::Serialize;

use super::{CARD_GRID, NO_RESULTS, RESULT_LIST, RESULTS, Renderer, record_href, snippet};
use crate::config::SiteConfig;
use crate::error::PortalError;
use crate::links::setup_anchor_links;
use crate::page::{Page, selectors};
use crate::record::{Record, Summary, Tipo};

#[derive(Serialize)]
struct ResultRow<'a> {
    href: String,
    icon: &'static str,
    tag: &'static str,
    title: &'a str,
    snippet: String,
}

#[derive(Serialize)]
struct ResultList<'a> {
    results: Vec<ResultRow<'a>>,
}

/// Icon class and category tag shown for each record type.
pub fn category(tipo: Tipo) -> (&'static str, &'static str) {
    match tipo {
        Tipo::Laboratorios => ("fas fa-flask", "LABORATORIO"),
        Tipo::Agencias => ("fas fa-map-marker-alt", "AGENCIA"),
        _ => ("fas fa-cogs", "SERVICIO"),
    }
}

pub fn results_heading(term: &str) -> String {
    format!("Resultados para \"{term}\"")
}

/// Renders mixed-type search matches as a vertical list.
pub fn render_list_results<'a>(
    page: &mut Page,
    renderer: &Renderer,
    config: &SiteConfig,
    items: impl IntoIterator<Item = &'a Record>,
    term: &str,
) -> Result<(), PortalError> {
    if !page.exists(selectors::GRID) {
        return Ok(());
    }
    let rows: Vec<ResultRow<'a>> = items
        .into_iter()
        .map(|record| {
            let (icon, tag) = category(record.tipo());
            ResultRow {
                href: record_href(config, record),
                icon,
                tag,
                title: record.title(),
                snippet: snippet(record.description(), config.snippet_length),
            }
        })
        .collect();

    if let Some(title) = page.element_mut(selectors::SECTION_TITLE) {
        title.set_inner_html(results_heading(term));
    }
    if let Some(description) = page.element_mut(selectors::DESCRIPTION) {
        description.set_hidden(true);
    }

    if rows.is_empty() {
        if let Some(grid) = page.element_mut(selectors::GRID) {
            grid.set_inner_html(NO_RESULTS);
            grid.classes_mut().remove(CARD_GRID);
        }
        return Ok(());
    }

    let count = rows.len();
    let html = renderer.render(RESULTS, &ResultList { results: rows })?;
    if let Some(grid) = page.element_mut(selectors::GRID) {
        grid.classes_mut().remove(CARD_GRID);
        grid.classes_mut().add(RESULT_LIST);
        grid.set_inner_html(html);
    }
    setup_anchor_links(page);
    tracing::debug!(count, term, "rendered search results");
    Ok(())
}
