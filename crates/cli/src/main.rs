use std::process::ExitCode;

fn main() -> ExitCode {
    avenue_cli::run()
}
