//! Fade-out page transitions for internal links.

use tokio::sync::oneshot;
use url::Url;

use crate::markup;
use crate::page::Page;

/// Body class that starts the fade-out animation.
pub const FADE_OUT: &str = "fade-out";
/// Body class applied once the page is shown.
pub const LOADED: &str = "loaded";

/// Whether setup attaches the transition handler to an anchor with this `href`.
pub fn should_wire(href: &str) -> bool {
    !href.starts_with("mailto:") && href != "#" && !href.contains("javascript:void(0)")
}

/// Whether a wired handler lets the browser follow `href` itself.
fn navigates_natively(href: &str) -> bool {
    href.is_empty() || href.starts_with('#') || href.starts_with("http") || href.starts_with("mailto:")
}

/// Wires every eligible anchor currently in the page. Safe to call repeatedly.
pub fn setup_anchor_links(page: &mut Page) {
    let mut wired = 0usize;
    for (_, element) in page.elements_mut() {
        let hrefs = markup::anchor_hrefs(element.inner_html());
        for (ordinal, href) in hrefs.into_iter().enumerate() {
            if let Some(href) = href.filter(|href| should_wire(href)) {
                element.wire_anchor(ordinal, href);
                wired += 1;
            }
        }
    }
    tracing::trace!(wired, "anchor links wired");
}

/// Navigation deferred until the fade-out animation completes.
#[derive(Debug)]
pub struct PendingNavigation {
    href: String,
    done: oneshot::Receiver<Url>,
}

impl PendingNavigation {
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Resolves with the destination once the animation-completion event fires.
    /// Returns `None` when the page is dropped first.
    pub async fn arrived(self) -> Option<Url> {
        self.done.await.ok()
    }
}

/// Outcome of clicking an anchor.
#[derive(Debug)]
pub enum LinkClick {
    /// The default action runs untouched.
    Native { href: Option<String> },
    /// Default prevented; the body fades out before navigating.
    Deferred(PendingNavigation),
}

/// Dispatches a click on the `ordinal`-th anchor inside the `mount` element.
pub fn click_link(page: &mut Page, mount: &str, ordinal: usize) -> LinkClick {
    let Some(element) = page.element(mount) else {
        return LinkClick::Native { href: None };
    };
    let href = markup::anchor_hrefs(element.inner_html())
        .into_iter()
        .nth(ordinal)
        .flatten();
    let wired = element.wired_anchors().get(&ordinal).cloned();

    match wired {
        Some(target) if !navigates_natively(&target) => {
            page.body_mut().add(FADE_OUT);
            let done = page.on_animation_end(target.clone());
            tracing::debug!(href = %target, "deferring navigation until fade-out completes");
            LinkClick::Deferred(PendingNavigation { href: target, done })
        }
        _ => LinkClick::Native { href },
    }
}
