use std::process::ExitCode;

fn main() -> ExitCode {
    activator_cli::run_cli()
}
