use serde::de::DeserializeOwned;

use crate::catalog::Catalogs;
use crate::config::DataFiles;
use crate::error::PortalError;
use crate::fetch::Fetcher;
use crate::record::Entry;

/// Fetches `path` and parses it as JSON. Any transport or parse failure is
/// logged and collapses to `None`.
pub async fn load_data<T, F>(fetcher: &F, path: &str) -> Option<T>
where
    T: DeserializeOwned,
    F: Fetcher,
{
    match fetch_json(fetcher, path).await {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!(resource = path, error = %err, "failed to load data file");
            None
        }
    }
}

async fn fetch_json<T, F>(fetcher: &F, path: &str) -> Result<T, PortalError>
where
    T: DeserializeOwned,
    F: Fetcher,
{
    let body = fetcher.fetch(path).await?;
    serde_json::from_str(&body).map_err(|err| PortalError::from(err).context(path))
}

/// Loads the three catalogs concurrently. Returns `None` when any one of them
/// is unavailable; partial results are discarded.
pub async fn load_catalogs<F: Fetcher>(fetcher: &F, files: &DataFiles) -> Option<Catalogs> {
    let (laboratorios, agencias, servicios) = tokio::join!(
        load_data::<Vec<Entry>, F>(fetcher, &files.laboratorios),
        load_data::<Vec<Entry>, F>(fetcher, &files.agencias),
        load_data::<Vec<Entry>, F>(fetcher, &files.servicios),
    );

    match (laboratorios, agencias, servicios) {
        (Some(laboratorios), Some(agencias), Some(servicios)) => {
            let catalogs = Catalogs::new(laboratorios, agencias, servicios);
            tracing::debug!(
                laboratorios = catalogs.laboratorios().len(),
                agencias = catalogs.agencias().len(),
                servicios = catalogs.servicios().len(),
                "catalogs loaded"
            );
            Some(catalogs)
        }
        _ => None,
    }
}
