use crate::config::SiteConfig;
use crate::error::PortalError;
use crate::fetch::Fetcher;
use crate::links::setup_anchor_links;
use crate::markup;
use crate::page::Page;

/// Loads `source` into the `target` mount. Failures are logged and leave the
/// mount untouched; anchors are re-wired either way.
pub async fn load_fragment<F: Fetcher>(
    fetcher: &F,
    page: &mut Page,
    config: &SiteConfig,
    source: &str,
    target: &str,
) -> bool {
    let loaded = match inject(fetcher, page, config, source, target).await {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(fragment = source, mount = target, error = %err, "failed to load fragment");
            false
        }
    };
    setup_anchor_links(page);
    loaded
}

async fn inject<F: Fetcher>(
    fetcher: &F,
    page: &mut Page,
    config: &SiteConfig,
    source: &str,
    target: &str,
) -> Result<(), PortalError> {
    let html = fetcher.fetch(source).await?;
    if !page.set_inner_html(target, html) {
        return Err(PortalError::Config(format!("mount point {target} not found")));
    }
    if config.is_entity_page(page.pathname()) {
        hide_entity_nav(page, &config.hidden_nav_labels);
    }
    Ok(())
}

fn hide_entity_nav(page: &mut Page, labels: &[String]) {
    for (_, element) in page.elements_mut() {
        let html = markup::hide_nav_entries(element.inner_html(), labels);
        if html != element.inner_html() {
            element.set_inner_html(html);
        }
    }
}

/// Loads every fragment listed in the site configuration, in order.
pub async fn load_fragments<F: Fetcher>(fetcher: &F, page: &mut Page, config: &SiteConfig) -> usize {
    let mut loaded = 0;
    for fragment in &config.fragments {
        if load_fragment(fetcher, page, config, &fragment.source, &fragment.target).await {
            loaded += 1;
        }
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use crate::page::selectors;

    const HEADER: &str = r#"<nav class="main-nav"><ul><li><a href="index.html">INICIO</a></li><li><a href="labs.html">LABORATORIOS</a></li></ul></nav>"#;

    #[tokio::test]
    async fn fragment_is_injected_and_links_wired() {
        let fetcher = MemoryFetcher::new().with("header.html", HEADER);
        let mut page = Page::parse("index.html").unwrap().with_mount(selectors::HEADER);
        let config = SiteConfig::default();

        assert!(load_fragment(&fetcher, &mut page, &config, "header.html", selectors::HEADER).await);
        let header = page.element(selectors::HEADER).unwrap();
        assert_eq!(header.inner_html(), HEADER);
        assert_eq!(header.wired_anchors().len(), 2);
    }

    #[tokio::test]
    async fn entity_pages_hide_catalog_entries() {
        let fetcher = MemoryFetcher::new().with("header.html", HEADER);
        let mut page = Page::parse("agencia_template.html?id=1")
            .unwrap()
            .with_mount(selectors::HEADER);
        let config = SiteConfig::default();

        load_fragment(&fetcher, &mut page, &config, "header.html", selectors::HEADER).await;
        let html = page.inner_html(selectors::HEADER).unwrap();
        assert!(html.contains(r#"<li style="display: none"><a href="labs.html">LABORATORIOS</a></li>"#));
        assert!(html.contains(r#"<li><a href="index.html">INICIO</a></li>"#));
    }

    #[tokio::test]
    async fn failed_fragment_leaves_mount_unchanged() {
        let fetcher = MemoryFetcher::new();
        let mut page = Page::parse("index.html")
            .unwrap()
            .with_mount(selectors::FOOTER)
            .with_mount(selectors::GRID);
        page.set_inner_html(selectors::FOOTER, "placeholder");
        page.set_inner_html(selectors::GRID, r#"<a href="x.html">x</a>"#);

        let config = SiteConfig::default();
        assert!(!load_fragment(&fetcher, &mut page, &config, "footer.html", selectors::FOOTER).await);
        assert_eq!(page.inner_html(selectors::FOOTER), Some("placeholder"));
        assert_eq!(page.element(selectors::GRID).unwrap().wired_anchors().len(), 1);
    }

    #[tokio::test]
    async fn load_fragments_counts_successes() {
        let fetcher = MemoryFetcher::new().with("header.html", HEADER);
        let mut page = Page::parse("index.html")
            .unwrap()
            .with_mount(selectors::HEADER)
            .with_mount(selectors::FOOTER);
        assert_eq!(load_fragments(&fetcher, &mut page, &SiteConfig::default()).await, 1);
    }
}
