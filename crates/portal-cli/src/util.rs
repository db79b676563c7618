use crate::error::CliError;

#[derive(Clone, Copy, Debug, Default)]
pub struct Verbosity {
    pub json: bool,
    pub verbose: bool,
}

/// Page arguments are site-relative paths with an optional query string.
pub fn validate_page(value: &str) -> Result<(), CliError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CliError::usage("page must not be empty"));
    }
    if trimmed.contains("://") || trimmed.starts_with('/') {
        return Err(CliError::usage(format!(
            "page '{trimmed}' must be relative to the site root"
        )));
    }
    let path = trimmed.split(['?', '#']).next().unwrap_or_default();
    if path.split('/').any(|segment| segment == "..") {
        return Err(CliError::usage(format!(
            "page '{trimmed}' must not traverse parent directories (..)"
        )));
    }
    Ok(())
}
