//! `html2pptx` binary entry point. All argument parsing and dispatch lives
//! in `html2pptx::cli`; this stays a thin shell so the library crate remains
//! fully testable without a process boundary.

use html2pptx::cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = cli::main() {
        eprintln!("html2pptx: {err}");
        std::process::exit(1);
    }
}
