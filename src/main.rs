use clap::Parser;
use tack::cli::commands::Cli;
use tack::cli::handlers;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
