use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// File looked up in a site root to override the defaults.
pub const CONFIG_FILE: &str = "portal.yaml";

/// Static file names for the three catalogs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DataFiles {
    pub laboratorios: String,
    pub agencias: String,
    pub servicios: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            laboratorios: "laboratorios.json".into(),
            agencias: "agencias.json".into(),
            servicios: "servicios.json".into(),
        }
    }
}

/// A shared markup fragment and the mount point it is injected into.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FragmentMount {
    pub source: String,
    pub target: String,
}

/// Site-level knobs. Every field has a default matching the published site layout.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub data: DataFiles,
    /// Template every card and result row links to.
    pub detail_page: String,
    /// Pages that render a single entity; navigation entries are trimmed on them.
    pub entity_pages: Vec<String>,
    pub hidden_nav_labels: Vec<String>,
    pub fragments: Vec<FragmentMount>,
    pub snippet_length: usize,
    pub search_threshold: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data: DataFiles::default(),
            detail_page: "laboratorio_template.html".into(),
            entity_pages: vec![
                "laboratorio_template.html".into(),
                "agencia_template.html".into(),
            ],
            hidden_nav_labels: vec!["LABORATORIOS".into(), "AGENCIAS DE EXTENSIÓN".into()],
            fragments: vec![
                FragmentMount {
                    source: "header.html".into(),
                    target: "#header-placeholder".into(),
                },
                FragmentMount {
                    source: "footer.html".into(),
                    target: "#footer-placeholder".into(),
                },
            ],
            snippet_length: 120,
            search_threshold: 0.4,
        }
    }
}

impl SiteConfig {
    /// Parses a YAML document; missing keys fall back to defaults.
    pub fn from_yaml(raw: &str) -> Result<Self, PortalError> {
        let config: SiteConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PortalError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        Self::from_yaml(&raw).map_err(|err| err.context(path.display()))
    }

    /// Loads `portal.yaml` from the site root, or the defaults when the file is absent.
    pub fn from_site_dir(root: impl AsRef<Path>) -> Result<Self, PortalError> {
        let candidate = root.as_ref().join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), PortalError> {
        if !(0.0..=1.0).contains(&self.search_threshold) {
            return Err(PortalError::Config(format!(
                "search_threshold must be within 0..=1, got {}",
                self.search_threshold
            )));
        }
        if self.snippet_length == 0 {
            return Err(PortalError::Config(
                "snippet_length must be greater than zero".into(),
            ));
        }
        if self.detail_page.trim().is_empty() {
            return Err(PortalError::Config("detail_page must not be empty".into()));
        }
        Ok(())
    }

    /// True when `pathname` belongs to one of the entity templates.
    pub fn is_entity_page(&self, pathname: &str) -> bool {
        self.entity_pages
            .iter()
            .any(|page| pathname.contains(page.as_str()))
    }
}
