use std::fmt;
use std::process::ExitCode;

use portal::PortalError;

/// `sysexits.h` codes the previewer exits with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Ok = 0,
    Usage = 64,
    Data = 65,
    Software = 70,
    Io = 71,
    Config = 78,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A message for stderr and the status the process exits with.
#[derive(Debug)]
pub struct CliError {
    message: String,
    status: ExitStatus,
}

impl CliError {
    pub fn new(message: impl Into<String>, status: ExitStatus) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Bad arguments or an unusable page or site location.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(message, ExitStatus::Usage)
    }

    /// Site data that is missing, malformed or has nothing to show.
    pub fn data(message: impl Into<String>) -> Self {
        Self::new(message, ExitStatus::Data)
    }

    pub fn status(&self) -> ExitStatus {
        self.status
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status.code())
    }

    pub fn print(&self) {
        if !self.message.is_empty() {
            eprintln!("{self}");
        }
    }
}

impl From<PortalError> for CliError {
    fn from(err: PortalError) -> Self {
        let status = match &err {
            PortalError::Fetch(_) | PortalError::Status { .. } | PortalError::Parse(_) => {
                ExitStatus::Data
            }
            PortalError::Config(_) => ExitStatus::Config,
            PortalError::Template(_) => ExitStatus::Software,
            PortalError::Io(_) => ExitStatus::Io,
        };
        Self::new(err.to_string(), status)
    }
}

/// Help and version requests are printed here and exit cleanly.
impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        if err.use_stderr() {
            return Self::usage(err.to_string());
        }
        let _ = err.print();
        Self::new(String::new(), ExitStatus::Ok)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string(), ExitStatus::Io)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portal_errors_map_to_sysexits() {
        let missing = CliError::from(PortalError::Status {
            resource: "servicios.json".into(),
            status: 404,
        });
        assert_eq!(missing.status(), ExitStatus::Data);

        let config = CliError::from(PortalError::Config("bad threshold".into()));
        assert_eq!(config.status().code(), 78);
        assert_eq!(config.to_string(), PortalError::Config("bad threshold".into()).to_string());
    }

    #[test]
    fn help_exits_cleanly_and_bad_flags_are_usage_errors() {
        let command = clap::Command::new("portal").arg(clap::Arg::new("site").long("site"));
        let help = command.clone().try_get_matches_from(["portal", "--help"]).unwrap_err();
        assert_eq!(CliError::from(help).status(), ExitStatus::Ok);

        let unknown = command.try_get_matches_from(["portal", "--nope"]).unwrap_err();
        let err = CliError::from(unknown);
        assert_eq!(err.status(), ExitStatus::Usage);
        assert_eq!(err.exit_code(), ExitCode::from(64));
    }
}
