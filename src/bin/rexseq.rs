use std::process::ExitCode;

fn main() -> ExitCode {
    rexseq::cli::run()
}
