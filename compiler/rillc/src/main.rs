//! Rill CLI.

use rillc::commands::{run_file, tokens_file};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let code = match args[1].as_str() {
        "run" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: rill run <file.rill>");
                std::process::exit(1);
            };
            run_file(path)
        }
        "tokens" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: rill tokens <file.rill>");
                std::process::exit(1);
            };
            tokens_file(path)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        other => {
            eprintln!("error: unknown command `{other}`");
            print_usage();
            1
        }
    };

    std::process::exit(code);
}

/// Initialise tracing from the `RILL_LOG` env filter (default: warn).
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("RILL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    eprintln!("Usage: rill <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <file.rill>      Run a Rill source file");
    eprintln!("  tokens <file.rill>   Dump the token stream");
    eprintln!("  help                 Show this message");
}
