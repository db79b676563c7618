//! In-memory page document: mount points, body state, wired listeners and
//! the navigation log.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tokio::sync::oneshot;
use url::Url;

use crate::error::PortalError;

/// Mount points the portal reads or writes.
pub mod selectors {
    pub const DETAILS: &str = "#lab-details-container";
    pub const GRID: &str = "#service-grid";
    pub const SEARCH_INPUT: &str = "#search-input";
    pub const SEARCH_FORM: &str = "#search-form";
    pub const NAV: &str = ".main-nav";
    pub const MENU_TOGGLE: &str = ".menu-toggle";
    pub const SECTION_TITLE: &str = ".main-content .section-title";
    pub const DESCRIPTION: &str = ".main-content .description";
    pub const HEADER: &str = "#header-placeholder";
    pub const FOOTER: &str = "#footer-placeholder";
}

/// Base used to resolve relative page locations.
const LOCAL_ORIGIN: &str = "http://localhost/";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassList(BTreeSet<String>);

impl ClassList {
    pub fn add(&mut self, class: &str) {
        self.0.insert(class.to_string());
    }

    pub fn remove(&mut self, class: &str) {
        self.0.remove(class);
    }

    /// Flips `class` and returns whether it is now present.
    pub fn toggle(&mut self, class: &str) -> bool {
        if self.0.remove(class) {
            false
        } else {
            self.0.insert(class.to_string());
            true
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Handlers attached directly to a mount point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Handler {
    SearchInput,
    SearchSubmit,
    MenuToggle,
}

/// One mount point and the state of the markup it holds.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Element {
    inner_html: String,
    classes: ClassList,
    hidden: bool,
    value: String,
    listeners: BTreeSet<Handler>,
    /// Wired anchors inside `inner_html`, by ordinal.
    anchors: BTreeMap<usize, String>,
    /// Wired accordion headers inside `inner_html`, by item index.
    accordion: BTreeSet<usize>,
}

impl Element {
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Replaces the markup. Listeners wired on the previous children go with it.
    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.inner_html = html.into();
        self.anchors.clear();
        self.accordion.clear();
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut ClassList {
        &mut self.classes
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn has_listener(&self, handler: Handler) -> bool {
        self.listeners.contains(&handler)
    }

    pub fn add_listener(&mut self, handler: Handler) {
        self.listeners.insert(handler);
    }

    pub fn wired_anchors(&self) -> &BTreeMap<usize, String> {
        &self.anchors
    }

    pub(crate) fn wire_anchor(&mut self, ordinal: usize, href: String) {
        self.anchors.insert(ordinal, href);
    }

    pub fn accordion_items(&self) -> &BTreeSet<usize> {
        &self.accordion
    }

    pub(crate) fn wire_accordion(&mut self, item: usize) {
        self.accordion.insert(item);
    }
}

struct AnimationListener {
    href: String,
    done: oneshot::Sender<Url>,
}

/// The document the portal renders into.
pub struct Page {
    location: Url,
    body: ClassList,
    elements: BTreeMap<String, Element>,
    animation_listeners: Vec<AnimationListener>,
    navigations: Vec<Url>,
}

impl Page {
    pub fn new(location: Url) -> Self {
        Self {
            location,
            body: ClassList::default(),
            elements: BTreeMap::new(),
            animation_listeners: Vec::new(),
            navigations: Vec::new(),
        }
    }

    /// Accepts an absolute URL or a site-relative path such as `index.html?id=x`.
    pub fn parse(location: &str) -> Result<Self, PortalError> {
        let parsed = match Url::parse(location) {
            Ok(url) => url,
            Err(_) => Url::parse(LOCAL_ORIGIN)
                .and_then(|base| base.join(location))
                .map_err(|err| PortalError::Config(format!("invalid page location {location}: {err}")))?,
        };
        Ok(Self::new(parsed))
    }

    /// Listing page: search box, card grid and introductory text.
    pub fn listing(location: Url) -> Self {
        Self::new(location).with_mounts([
            selectors::HEADER,
            selectors::FOOTER,
            selectors::NAV,
            selectors::MENU_TOGGLE,
            selectors::SECTION_TITLE,
            selectors::DESCRIPTION,
            selectors::SEARCH_FORM,
            selectors::SEARCH_INPUT,
            selectors::GRID,
        ])
    }

    /// Entity page: a single detail container.
    pub fn entity(location: Url) -> Self {
        Self::new(location).with_mounts([
            selectors::HEADER,
            selectors::FOOTER,
            selectors::NAV,
            selectors::MENU_TOGGLE,
            selectors::DETAILS,
        ])
    }

    pub fn with_mount(mut self, selector: &str) -> Self {
        self.mount(selector);
        self
    }

    pub fn with_mounts<'a>(mut self, selectors: impl IntoIterator<Item = &'a str>) -> Self {
        for selector in selectors {
            self.mount(selector);
        }
        self
    }

    pub fn mount(&mut self, selector: &str) -> &mut Element {
        self.elements.entry(selector.to_string()).or_default()
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn pathname(&self) -> &str {
        self.location.path()
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        self.location
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    pub fn body(&self) -> &ClassList {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut ClassList {
        &mut self.body
    }

    pub fn exists(&self, selector: &str) -> bool {
        self.elements.contains_key(selector)
    }

    pub fn element(&self, selector: &str) -> Option<&Element> {
        self.elements.get(selector)
    }

    pub fn element_mut(&mut self, selector: &str) -> Option<&mut Element> {
        self.elements.get_mut(selector)
    }

    pub fn elements(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.elements.iter().map(|(key, element)| (key.as_str(), element))
    }

    pub(crate) fn elements_mut(&mut self) -> impl Iterator<Item = (&str, &mut Element)> {
        self.elements
            .iter_mut()
            .map(|(key, element)| (key.as_str(), element))
    }

    pub fn inner_html(&self, selector: &str) -> Option<&str> {
        self.element(selector).map(Element::inner_html)
    }

    /// Returns false when the mount point does not exist.
    pub fn set_inner_html(&mut self, selector: &str, html: impl Into<String>) -> bool {
        match self.element_mut(selector) {
            Some(element) => {
                element.set_inner_html(html);
                true
            }
            None => false,
        }
    }

    /// Types into the search box without dispatching any event.
    pub fn type_search(&mut self, value: &str) {
        if let Some(input) = self.element_mut(selectors::SEARCH_INPUT) {
            input.set_value(value);
        }
    }

    /// Registers a one-shot navigation to `href`, completed by the next [`Page::animation_end`].
    pub(crate) fn on_animation_end(&mut self, href: String) -> oneshot::Receiver<Url> {
        let (done, receiver) = oneshot::channel();
        self.animation_listeners.push(AnimationListener { href, done });
        receiver
    }

    pub fn pending_animations(&self) -> usize {
        self.animation_listeners.len()
    }

    /// Fires the body's animation-completion event. Each registered listener
    /// runs once and is dropped.
    pub fn animation_end(&mut self) {
        let listeners = std::mem::take(&mut self.animation_listeners);
        for listener in listeners {
            match self.assign(&listener.href) {
                Ok(url) => {
                    let _ = listener.done.send(url);
                }
                Err(err) => {
                    tracing::error!(href = %listener.href, error = %err, "navigation failed");
                }
            }
        }
    }

    /// Navigates to `href`, resolved against the current location.
    pub fn assign(&mut self, href: &str) -> Result<Url, PortalError> {
        let target = self
            .location
            .join(href)
            .map_err(|err| PortalError::Config(format!("invalid navigation target {href}: {err}")))?;
        tracing::debug!(from = %self.location, to = %target, "navigating");
        self.navigations.push(target.clone());
        self.location = target.clone();
        Ok(target)
    }

    pub fn navigations(&self) -> &[Url] {
        &self.navigations
    }
}
