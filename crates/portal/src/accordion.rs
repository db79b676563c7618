//! Expand/collapse wiring for the nested items of the detail view.

use crate::markup;
use crate::page::{Page, selectors};

/// State class applied to an open item's panel and indicator icon.
pub const EXPANDED: &str = "active";

/// Wires every accordion header rendered in the detail container.
pub fn setup_accordion(page: &mut Page) -> usize {
    let Some(container) = page.element_mut(selectors::DETAILS) else {
        return 0;
    };
    let headers = markup::accordion_headers(container.inner_html());
    for item in &headers {
        container.wire_accordion(*item);
    }
    headers.len()
}

/// Clicks the header of `item`. Returns the new expanded state, or `None`
/// when no wired header exists for it.
pub fn click_accordion(page: &mut Page, item: usize) -> Option<bool> {
    let container = page.element_mut(selectors::DETAILS)?;
    if !container.accordion_items().contains(&item) {
        return None;
    }
    let toggled = markup::toggle_item_class(container.inner_html(), item, EXPANDED);
    let expanded = is_expanded_in(&toggled, item);
    let accordion = container.accordion_items().clone();
    let anchors = container.wired_anchors().clone();
    container.set_inner_html(toggled);
    // A class flip keeps the same nodes, so their listeners stay attached.
    for wired in accordion {
        container.wire_accordion(wired);
    }
    for (ordinal, href) in anchors {
        container.wire_anchor(ordinal, href);
    }
    Some(expanded)
}

pub fn is_expanded(page: &Page, item: usize) -> bool {
    page.inner_html(selectors::DETAILS)
        .is_some_and(|html| is_expanded_in(html, item))
}

fn is_expanded_in(html: &str, item: usize) -> bool {
    let classes = markup::item_classes(html, item);
    !classes.is_empty() && classes.iter().all(|list| list.iter().any(|c| c == EXPANDED))
}
