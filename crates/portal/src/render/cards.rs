use serde::Serialize;

use super::{CARD_GRID, CARDS, NO_DATA, RESULT_LIST, Renderer, SERVICES_TITLE, detail_href};
use crate::config::SiteConfig;
use crate::error::PortalError;
use crate::links::setup_anchor_links;
use crate::page::{Page, selectors};
use crate::record::{Record, Summary, Tipo};

#[derive(Serialize)]
struct Card<'a> {
    href: String,
    image: &'a str,
    title: &'a str,
}

#[derive(Serialize)]
struct CardGrid<'a> {
    cards: Vec<Card<'a>>,
}

/// Renders `items` as a grid of cards linking to the detail template with `tipo`.
pub fn render_cards<'a>(
    page: &mut Page,
    renderer: &Renderer,
    config: &SiteConfig,
    items: impl IntoIterator<Item = &'a Record>,
    tipo: Tipo,
) -> Result<(), PortalError> {
    if !page.exists(selectors::GRID) {
        return Ok(());
    }
    let cards: Vec<Card<'a>> = items
        .into_iter()
        .map(|record| Card {
            href: detail_href(config, record.id(), tipo.as_str()),
            image: record.image().unwrap_or(""),
            title: record.title(),
        })
        .collect();

    if let Some(title) = page.element_mut(selectors::SECTION_TITLE) {
        title.set_inner_html(SERVICES_TITLE);
    }
    if let Some(description) = page.element_mut(selectors::DESCRIPTION) {
        description.set_hidden(false);
    }

    if cards.is_empty() {
        page.set_inner_html(selectors::GRID, NO_DATA);
        return Ok(());
    }

    let count = cards.len();
    let html = renderer.render(CARDS, &CardGrid { cards })?;
    if let Some(grid) = page.element_mut(selectors::GRID) {
        grid.classes_mut().add(CARD_GRID);
        grid.classes_mut().remove(RESULT_LIST);
        grid.set_inner_html(html);
    }
    setup_anchor_links(page);
    tracing::debug!(count, tipo = %tipo, "rendered cards");
    Ok(())
}
