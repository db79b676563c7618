//! Page lifecycle: boot, catalog loading, search and cache-restored re-entry.

use serde::Serialize;

use crate::catalog::Catalogs;
use crate::config::SiteConfig;
use crate::error::PortalError;
use crate::fetch::Fetcher;
use crate::fragments::load_fragments;
use crate::links::{FADE_OUT, LOADED, setup_anchor_links};
use crate::loader::load_catalogs;
use crate::menu::setup_menu_toggle;
use crate::page::{Handler, Page, selectors};
use crate::record::Tipo;
use crate::render::{
    LOAD_ERROR, NOT_FOUND, Renderer, render_cards, render_detail, render_list_results,
};
use crate::search::{SearchIndex, SearchOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Ready,
    Error,
}

struct Loaded {
    catalogs: Catalogs,
    index: SearchIndex,
}

/// Owns everything one load cycle produces. Nothing is shared between pages
/// except through an explicit [`Portal::init`].
pub struct Portal<F: Fetcher> {
    fetcher: F,
    config: SiteConfig,
    renderer: Renderer,
    state: LoadState,
    loaded: Option<Loaded>,
}

impl<F: Fetcher> Portal<F> {
    pub fn new(fetcher: F, config: SiteConfig) -> Result<Self, PortalError> {
        config.validate()?;
        Ok(Self {
            fetcher,
            config,
            renderer: Renderer::new()?,
            state: LoadState::Loading,
            loaded: None,
        })
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn catalogs(&self) -> Option<&Catalogs> {
        self.loaded.as_ref().map(|loaded| &loaded.catalogs)
    }

    pub fn index(&self) -> Option<&SearchIndex> {
        self.loaded.as_ref().map(|loaded| &loaded.index)
    }

    /// Drops the catalogs and the index and returns to `Loading`.
    pub fn reset(&mut self) {
        self.state = LoadState::Loading;
        self.loaded = None;
    }

    /// First display of a page: shared chrome, link transitions, then data.
    pub async fn boot(&mut self, page: &mut Page) -> Result<LoadState, PortalError> {
        page.body_mut().add(LOADED);
        setup_menu_toggle(page);
        setup_anchor_links(page);
        let fragments = load_fragments(&self.fetcher, page, &self.config).await;
        tracing::debug!(fragments, page = page.pathname(), "page chrome loaded");
        self.init(page).await
    }

    /// Loads the three catalogs and renders whatever the page has room for.
    ///
    /// A catalog failure is reported on the page and yields [`LoadState::Error`];
    /// only rendering failures are returned as errors.
    pub async fn init(&mut self, page: &mut Page) -> Result<LoadState, PortalError> {
        self.reset();
        let Some(catalogs) = load_catalogs(&self.fetcher, &self.config.data).await else {
            self.state = LoadState::Error;
            page.set_inner_html(selectors::DETAILS, LOAD_ERROR);
            page.set_inner_html(selectors::GRID, LOAD_ERROR);
            tracing::warn!(page = page.pathname(), "catalogs unavailable");
            return Ok(self.state);
        };

        let index = SearchIndex::build(
            catalogs.corpus(),
            SearchOptions {
                threshold: self.config.search_threshold,
            },
        );
        self.loaded = Some(Loaded { catalogs, index });
        self.state = LoadState::Ready;
        tracing::info!(page = page.pathname(), "portal ready");

        if page.exists(selectors::GRID) {
            for (selector, handler) in [
                (selectors::SEARCH_INPUT, Handler::SearchInput),
                (selectors::SEARCH_FORM, Handler::SearchSubmit),
            ] {
                if let Some(element) = page.element_mut(selector) {
                    element.add_listener(handler);
                }
            }
            self.render_services(page)?;
        }

        if let Some(id) = page.query_param("id") {
            if page.exists(selectors::DETAILS) {
                self.show_detail(page, &id)?;
            }
        }
        Ok(self.state)
    }

    fn render_services(&self, page: &mut Page) -> Result<(), PortalError> {
        let Some(loaded) = &self.loaded else {
            return Ok(());
        };
        render_cards(
            page,
            &self.renderer,
            &self.config,
            loaded.catalogs.servicios(),
            Tipo::Servicios,
        )
    }

    fn show_detail(&self, page: &mut Page, id: &str) -> Result<(), PortalError> {
        let record = self.catalogs().and_then(|catalogs| catalogs.find(id));
        match record {
            Some(record) => {
                render_detail(page, &self.renderer, record)?;
            }
            None => {
                tracing::warn!(id, "no record with this id");
                page.set_inner_html(selectors::DETAILS, NOT_FOUND);
            }
        }
        Ok(())
    }

    /// Empty terms restore the service cards; anything else lists ranked matches,
    /// even when there are none.
    pub fn handle_search(&self, page: &mut Page, term: &str) -> Result<(), PortalError> {
        let Some(loaded) = &self.loaded else {
            return Ok(());
        };
        let term = term.trim();
        if term.is_empty() {
            return self.render_services(page);
        }
        let hits = loaded.index.search(term);
        tracing::info!(term, matches = hits.len(), "search");
        render_list_results(
            page,
            &self.renderer,
            &self.config,
            hits.iter().map(|hit| hit.record),
            term,
        )
    }

    /// Input event on the search box. Returns false when search is not wired.
    pub fn on_search_input(&self, page: &mut Page) -> Result<bool, PortalError> {
        self.dispatch_search(page, selectors::SEARCH_INPUT, Handler::SearchInput)
    }

    /// Submit event on the search form; the page never reloads.
    pub fn on_search_submit(&self, page: &mut Page) -> Result<bool, PortalError> {
        self.dispatch_search(page, selectors::SEARCH_FORM, Handler::SearchSubmit)
    }

    fn dispatch_search(
        &self,
        page: &mut Page,
        selector: &str,
        handler: Handler,
    ) -> Result<bool, PortalError> {
        let wired = page
            .element(selector)
            .is_some_and(|element| element.has_listener(handler));
        if !wired {
            return Ok(false);
        }
        let term = page
            .element(selectors::SEARCH_INPUT)
            .map(|input| input.value().to_string())
            .unwrap_or_default();
        self.handle_search(page, &term)?;
        Ok(true)
    }

    /// Page shown again, possibly from the back/forward cache. Restored pages
    /// lose their fade-out and reload everything.
    pub async fn page_show(&mut self, page: &mut Page, persisted: bool) -> Result<LoadState, PortalError> {
        page.body_mut().remove(FADE_OUT);
        page.body_mut().add(LOADED);
        if !persisted {
            return Ok(self.state);
        }
        tracing::debug!(page = page.pathname(), "page restored from cache, re-initializing");
        self.init(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use crate::render::{CARD_GRID, NO_RESULTS, RESULT_LIST, SERVICES_TITLE};
    use url::Url;

    const LABS: &str = r#"[
        {"id": "compartido", "titulo": "Laboratorio de Suelos", "descripcion": "Análisis de suelos",
         "detalles": [{"titulo": "Fertilidad", "contacto": "Ventas: ventas@acme.com"}]}
    ]"#;
    const AGENCIAS: &str = r#"[{"id": "norte", "titulo": "Agencia Norte", "descripcion": "Extensión rural"}]"#;
    const SERVICIOS: &str = r#"[
        {"id": "compartido", "titulo": "Servicio Duplicado"},
        {"id": "riego", "titulo": "Riego", "imagen": "img/riego.png"}
    ]"#;

    fn fetcher() -> MemoryFetcher {
        MemoryFetcher::new()
            .with("laboratorios.json", LABS)
            .with("agencias.json", AGENCIAS)
            .with("servicios.json", SERVICIOS)
    }

    fn portal(fetcher: MemoryFetcher) -> Portal<MemoryFetcher> {
        Portal::new(fetcher, SiteConfig::default()).unwrap()
    }

    fn listing() -> Page {
        Page::listing(Url::parse("http://localhost/index.html").unwrap())
    }

    fn entity(id: &str) -> Page {
        Page::entity(
            Url::parse(&format!("http://localhost/laboratorio_template.html?id={id}")).unwrap(),
        )
    }

    #[tokio::test]
    async fn listing_page_shows_service_cards() {
        let mut portal = portal(fetcher());
        let mut page = listing();
        assert_eq!(portal.init(&mut page).await.unwrap(), LoadState::Ready);

        let grid = page.element(selectors::GRID).unwrap();
        assert!(grid.classes().contains(CARD_GRID));
        assert!(grid.inner_html().contains("id=riego&tipo=servicios"));
        assert!(!grid.inner_html().contains("Laboratorio de Suelos"));
        assert_eq!(portal.index().unwrap().len(), 4);
        assert!(page.element(selectors::SEARCH_INPUT).unwrap().has_listener(Handler::SearchInput));
        assert!(page.element(selectors::SEARCH_FORM).unwrap().has_listener(Handler::SearchSubmit));
    }

    #[tokio::test]
    async fn unmatched_term_uses_list_layout() {
        let mut portal = portal(fetcher());
        let mut page = listing();
        portal.init(&mut page).await.unwrap();

        page.type_search("xqzwvk");
        assert!(portal.on_search_input(&mut page).unwrap());
        let grid = page.element(selectors::GRID).unwrap();
        assert_eq!(grid.inner_html(), NO_RESULTS);
        assert!(!grid.classes().contains(CARD_GRID));
    }

    #[tokio::test]
    async fn blank_term_restores_service_cards() {
        let mut portal = portal(fetcher());
        let mut page = listing();
        portal.init(&mut page).await.unwrap();

        page.type_search("suelos");
        portal.on_search_submit(&mut page).unwrap();
        assert!(page.element(selectors::GRID).unwrap().classes().contains(RESULT_LIST));

        page.type_search("   ");
        portal.on_search_submit(&mut page).unwrap();
        let grid = page.element(selectors::GRID).unwrap();
        assert!(grid.classes().contains(CARD_GRID));
        assert_eq!(grid.inner_html().matches(r#"class="card""#).count(), 2);
        assert_eq!(page.inner_html(selectors::SECTION_TITLE), Some(SERVICES_TITLE));
    }

    #[tokio::test]
    async fn search_results_span_catalogs() {
        let mut portal = portal(fetcher());
        let mut page = listing();
        portal.init(&mut page).await.unwrap();

        portal.handle_search(&mut page, " extension ").unwrap();
        let html = page.inner_html(selectors::GRID).unwrap();
        assert!(html.contains("AGENCIA"));
        assert!(html.contains("id=norte&tipo=agencias"));
        assert_eq!(
            page.inner_html(selectors::SECTION_TITLE),
            Some("Resultados para \"extension\"")
        );
    }

    #[tokio::test]
    async fn duplicate_id_renders_laboratory() {
        let mut portal = portal(fetcher());
        let mut page = entity("compartido");
        portal.init(&mut page).await.unwrap();

        let html = page.inner_html(selectors::DETAILS).unwrap();
        assert!(html.contains("Laboratorio de Suelos"));
        assert!(!html.contains("Servicio Duplicado"));
        assert!(html.contains("mailto:ventas@acme.com"));
    }

    #[tokio::test]
    async fn unknown_id_shows_not_found() {
        let mut portal = portal(fetcher());
        let mut page = entity("nada");
        assert_eq!(portal.init(&mut page).await.unwrap(), LoadState::Ready);
        assert_eq!(page.inner_html(selectors::DETAILS), Some(NOT_FOUND));
    }

    #[tokio::test]
    async fn any_catalog_failure_is_total() {
        let mut failing = fetcher();
        failing.remove("agencias.json");
        let mut portal = portal(failing);

        let mut page = listing().with_mount(selectors::DETAILS);
        assert_eq!(portal.init(&mut page).await.unwrap(), LoadState::Error);
        assert_eq!(page.inner_html(selectors::GRID), Some(LOAD_ERROR));
        assert_eq!(page.inner_html(selectors::DETAILS), Some(LOAD_ERROR));
        assert!(portal.catalogs().is_none());
        assert!(!page.element(selectors::SEARCH_INPUT).unwrap().has_listener(Handler::SearchInput));
    }

    #[tokio::test]
    async fn search_is_inert_before_wiring() {
        let portal = portal(fetcher());
        let mut page = listing();
        page.type_search("riego");
        assert!(!portal.on_search_input(&mut page).unwrap());
        assert_eq!(page.inner_html(selectors::GRID), Some(""));
    }

    #[tokio::test]
    async fn boot_loads_chrome_then_data() {
        let fetcher = fetcher()
            .with("header.html", r#"<nav class="main-nav"><ul><li><a href="index.html">INICIO</a></li></ul></nav>"#)
            .with("footer.html", "<p>pie</p>");
        let mut portal = portal(fetcher);
        let mut page = listing();

        assert_eq!(portal.boot(&mut page).await.unwrap(), LoadState::Ready);
        assert!(page.body().contains(LOADED));
        assert_eq!(page.inner_html(selectors::FOOTER), Some("<p>pie</p>"));
        assert_eq!(page.element(selectors::HEADER).unwrap().wired_anchors().len(), 1);
        assert!(page.element(selectors::MENU_TOGGLE).unwrap().has_listener(Handler::MenuToggle));
    }

    #[tokio::test]
    async fn restored_page_is_reinitialized() {
        let mut portal = portal(fetcher());
        let mut page = listing();
        portal.init(&mut page).await.unwrap();
        page.body_mut().add(FADE_OUT);
        page.set_inner_html(selectors::GRID, "stale");

        portal.page_show(&mut page, false).await.unwrap();
        assert!(!page.body().contains(FADE_OUT));
        assert_eq!(page.inner_html(selectors::GRID), Some("stale"));

        assert_eq!(portal.page_show(&mut page, true).await.unwrap(), LoadState::Ready);
        assert!(page.inner_html(selectors::GRID).unwrap().contains("id=riego"));
    }
}
