use std::process::ExitCode;

fn main() -> ExitCode {
    portal_cli::run()
}
