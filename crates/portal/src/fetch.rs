use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::error::PortalError;

/// Retrieves site resources (catalog JSON, markup fragments) by relative path.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, PortalError>> + Send;
}

/// HTTP fetcher backed by `reqwest`, resolving paths against a base URL.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn resolve(&self, path: &str) -> Result<Url, PortalError> {
        self.base
            .join(path)
            .map_err(|err| PortalError::Fetch(format!("invalid resource {path}: {err}")))
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<String, PortalError> {
        let url = self.resolve(path)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| PortalError::Fetch(format!("failed to fetch {url}: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::Status {
                resource: url.to_string(),
                status: status.as_u16(),
            });
        }
        response
            .text()
            .await
            .map_err(|err| PortalError::Fetch(format!("failed reading body from {url}: {err}")))
    }
}

/// Reads resources from a local site directory.
#[derive(Clone, Debug)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, PortalError> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir))
        {
            return Err(PortalError::Fetch(format!(
                "resource {path} escapes site root {}",
                self.root.display()
            )));
        }
        Ok(self.root.join(relative))
    }
}

impl Fetcher for DirectoryFetcher {
    async fn fetch(&self, path: &str) -> Result<String, PortalError> {
        let full = self.resolve(path)?;
        tokio::fs::read_to_string(&full).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                PortalError::Status {
                    resource: full.display().to_string(),
                    status: 404,
                }
            } else {
                PortalError::Io(err).context(full.display())
            }
        })
    }
}

/// In-memory resources keyed by path.
#[derive(Clone, Debug, Default)]
pub struct MemoryFetcher {
    resources: BTreeMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, body: impl Into<String>) {
        self.resources.insert(path.into(), body.into());
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.resources.remove(path)
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch(&self, path: &str) -> Result<String, PortalError> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| PortalError::Status {
                resource: path.to_string(),
                status: 404,
            })
    }
}
