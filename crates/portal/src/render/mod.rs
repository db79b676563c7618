//! Markup for the card grid, the search result list and the detail view.

use handlebars::Handlebars;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::error::PortalError;
use crate::record::{Descripcion, Record, Summary};

pub mod cards;
pub mod detail;
pub mod list;

pub use cards::render_cards;
pub use detail::render_detail;
pub use list::render_list_results;

const CARDS_TEMPLATE: &str = include_str!("../../templates/cards.hbs");
const RESULTS_TEMPLATE: &str = include_str!("../../templates/results.hbs");
const DETAIL_TEMPLATE: &str = include_str!("../../templates/detail.hbs");

pub(crate) const CARDS: &str = "cards";
pub(crate) const RESULTS: &str = "results";
pub(crate) const DETAIL: &str = "detail";

pub const SERVICES_TITLE: &str = "Nuestros Servicios";
pub const NO_DATA: &str =
    r#"<p class="no-results-message">No se encontraron datos para mostrar.</p>"#;
pub const NO_RESULTS: &str = r#"<p class="no-results-message">No se encontraron resultados para esta búsqueda. Intente con otros términos.</p>"#;
pub const LOAD_ERROR: &str = "<p>Error al cargar los datos. Intente más tarde.</p>";
pub const NOT_FOUND: &str = "<p>Lo sentimos, no se encontró la información solicitada.</p>";
pub const SNIPPET_PLACEHOLDER: &str = "Haga clic para ver los detalles completos.";
const ELLIPSIS: &str = "...";

/// Grid class for the card layout.
pub const CARD_GRID: &str = "card-grid";
/// Grid class for the search result layout.
pub const RESULT_LIST: &str = "search-results-list-pro";

/// Handlebars registry preloaded with the embedded templates.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, PortalError> {
        let mut registry = Handlebars::new();
        // Catalog text is trusted markup and is emitted verbatim.
        registry.register_escape_fn(handlebars::no_escape);
        for (name, source) in [
            (CARDS, CARDS_TEMPLATE),
            (RESULTS, RESULTS_TEMPLATE),
            (DETAIL, DETAIL_TEMPLATE),
        ] {
            registry
                .register_template_string(name, source)
                .map_err(|err| PortalError::Template(format!("{name}: {err}")))?;
        }
        Ok(Self { registry })
    }

    pub(crate) fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String, PortalError> {
        self.registry
            .render(name, context)
            .map_err(|err| PortalError::from(err).context(name))
    }
}

/// Link to the detail template for `id`, tagged with `tipo`.
pub fn detail_href(config: &SiteConfig, id: &str, tipo: &str) -> String {
    format!("{}?id={id}&tipo={tipo}", config.detail_page)
}

/// First `limit` characters of the description, with an ellipsis when cut.
pub fn snippet(description: Option<&Descripcion>, limit: usize) -> String {
    let text = description.map(Descripcion::text).unwrap_or_default();
    if text.is_empty() {
        return SNIPPET_PLACEHOLDER.to_string();
    }
    if text.chars().count() > limit {
        let mut cut: String = text.chars().take(limit).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        text
    }
}

pub(crate) fn record_href(config: &SiteConfig, record: &Record) -> String {
    detail_href(config, record.id(), record.tipo().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_descriptions_are_cut_at_limit() {
        let text = "a".repeat(150);
        let snippet = snippet(Some(&Descripcion::Text(text)), 120);
        assert_eq!(snippet, format!("{}...", "a".repeat(120)));
    }

    #[test]
    fn short_descriptions_are_unchanged() {
        let exact = "b".repeat(120);
        assert_eq!(snippet(Some(&Descripcion::Text(exact.clone())), 120), exact);
        assert_eq!(snippet(Some(&Descripcion::Text("corta".into())), 120), "corta");
    }

    #[test]
    fn missing_descriptions_use_placeholder() {
        assert_eq!(snippet(None, 120), SNIPPET_PLACEHOLDER);
        assert_eq!(snippet(Some(&Descripcion::Text(String::new())), 120), SNIPPET_PLACEHOLDER);
    }

    #[test]
    fn truncation_counts_characters() {
        let text = "ñ".repeat(121);
        let snippet = snippet(Some(&Descripcion::Text(text)), 120);
        assert_eq!(snippet.chars().count(), 123);
        assert!(snippet.starts_with(&"ñ".repeat(120)));
    }

    #[test]
    fn templates_register() {
        assert!(Renderer::new().is_ok());
    }

    #[test]
    fn detail_href_carries_id_and_tipo() {
        let config = SiteConfig::default();
        assert_eq!(
            detail_href(&config, "suelos", "laboratorios"),
            "laboratorio_template.html?id=suelos&tipo=laboratorios"
        );
    }
}
