use std::process::ExitCode;

fn main() -> ExitCode {
    pangea::cli::run()
}
