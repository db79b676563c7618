use std::future::Future;
use std::path::PathBuf;

use portal::{
    DirectoryFetcher, Fetcher, HttpFetcher, Page, Portal, PortalError, SiteConfig,
};
use tokio::runtime::Runtime;
use url::Url;

use crate::error::CliError;
use crate::util::Verbosity;

/// Where site files are read from.
#[derive(Clone, Debug)]
pub enum SiteSource {
    Directory(DirectoryFetcher),
    Http(HttpFetcher),
}

impl SiteSource {
    pub fn describe(&self) -> String {
        match self {
            SiteSource::Directory(fetcher) => fetcher.root().display().to_string(),
            SiteSource::Http(fetcher) => fetcher.base().to_string(),
        }
    }

    /// Location of `page` as the browser would see it.
    pub fn page_location(&self, page: &str) -> Result<Url, CliError> {
        let location = match self {
            SiteSource::Directory(_) => Page::parse(page).map(|page| page.location().clone())?,
            SiteSource::Http(fetcher) => fetcher.base().join(page).map_err(|err| {
                CliError::usage(format!("invalid page '{page}': {err}"))
            })?,
        };
        Ok(location)
    }
}

impl Fetcher for SiteSource {
    async fn fetch(&self, path: &str) -> Result<String, PortalError> {
        match self {
            SiteSource::Directory(fetcher) => fetcher.fetch(path).await,
            SiteSource::Http(fetcher) => fetcher.fetch(path).await,
        }
    }
}

pub struct CliSession {
    pub source: SiteSource,
    pub config: SiteConfig,
    pub verbosity: Verbosity,
    runtime: Runtime,
}

impl CliSession {
    pub fn bootstrap(
        site_override: Option<String>,
        base_url: Option<String>,
        verbosity: Verbosity,
    ) -> Result<Self, CliError> {
        let (source, config) = match base_url {
            Some(raw) => {
                let mut base = Url::parse(&raw).map_err(|err| {
                    CliError::usage(format!("invalid base URL '{raw}': {err}"))
                })?;
                if !base.path().ends_with('/') {
                    base.set_path(&format!("{}/", base.path()));
                }
                (SiteSource::Http(HttpFetcher::new(base)), SiteConfig::default())
            }
            None => {
                let root = match site_override {
                    Some(path) => PathBuf::from(path),
                    None => std::env::current_dir()?,
                };
                if !root.is_dir() {
                    return Err(CliError::usage(format!(
                        "site directory {} does not exist",
                        root.display()
                    )));
                }
                let config = SiteConfig::from_site_dir(&root)?;
                (SiteSource::Directory(DirectoryFetcher::new(root)), config)
            }
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            source,
            config,
            verbosity,
            runtime,
        })
    }

    pub fn portal(&self) -> Result<Portal<SiteSource>, CliError> {
        Ok(Portal::new(self.source.clone(), self.config.clone())?)
    }

    /// Drives `future` to completion on the session's single-threaded runtime.
    pub fn block_on<T>(&self, future: impl Future<Output = T>) -> T {
        self.runtime.block_on(future)
    }
}
