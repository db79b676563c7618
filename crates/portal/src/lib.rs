pub mod accordion;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod fetch;
pub mod fragments;
pub mod links;
pub mod loader;
pub mod markup;
pub mod menu;
pub mod page;
pub mod portal;
pub mod record;
pub mod render;
pub mod search;

pub use accordion::{click_accordion, is_expanded, setup_accordion};
pub use catalog::Catalogs;
pub use config::{CONFIG_FILE, DataFiles, FragmentMount, SiteConfig};
pub use contact::{ContactLink, format_contact, parse_contacts};
pub use error::PortalError;
pub use fetch::{DirectoryFetcher, Fetcher, HttpFetcher, MemoryFetcher};
pub use fragments::{load_fragment, load_fragments};
pub use links::{LinkClick, PendingNavigation, click_link, setup_anchor_links};
pub use loader::{load_catalogs, load_data};
pub use menu::{click_menu_toggle, setup_menu_toggle};
pub use page::{ClassList, Element, Handler, Page, selectors};
pub use portal::{LoadState, Portal};
pub use record::{
    Agency, Descripcion, Detail, DetailView, Entry, Laboratory, Record, Service, Summary, Tipo,
};
pub use render::{Renderer, render_cards, render_detail, render_list_results};
pub use search::{SearchHit, SearchIndex, SearchOptions};
