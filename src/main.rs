use std::io::Read;
use std::process;

use clap::Parser;
use scriptkeeper::cli::{Cli, Command};
use scriptkeeper::config::Config;
use scriptkeeper::report::{self, Order};
use scriptkeeper::store::{FileStore, Outcome};
use scriptkeeper::{Session, StoreError};
use tracing::Level;

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(context: &str, e: StoreError) -> ! {
    eprintln!("{context}: {e}");
    process::exit(1);
}

fn open_session(store: FileStore, config: &Config) -> Session {
    Session::open(store, &config.default_file).unwrap_or_else(|e| fail("Error opening store", e))
}

fn read_content(from: Option<&std::path::Path>) -> std::io::Result<String> {
    match from {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_cli(&cli).unwrap_or_else(|e| fail("Error loading config", e));
    let store = FileStore::from_config(&config);

    match cli.command {
        Command::Save(args) => {
            let content = read_content(args.from.as_deref())
                .unwrap_or_else(|e| fail("Error reading script content", e.into()));

            let outcome = Outcome::from_save(store.save(Some(content.as_str()), &args.name, &args.message));
            if outcome.ok {
                println!("{}", outcome.message);
            } else {
                eprintln!("{}", outcome.message);
                process::exit(1);
            }
        }
        Command::History(args) => {
            let entries = store
                .list_history()
                .unwrap_or_else(|e| fail("Error loading history", e));
            let order = if args.oldest_first {
                Order::OldestFirst
            } else {
                Order::NewestFirst
            };
            report::print_history(&entries, order, args.json);
        }
        Command::ClearHistory => match store.clear_history() {
            Ok(message) => println!("{message}"),
            Err(e) => fail("Error clearing history", e),
        },
        Command::Stats(args) => {
            let stats = store
                .history_stats()
                .unwrap_or_else(|e| fail("Error loading history", e));
            report::print_stats(&stats, args.json);
        }
        Command::Ls => {
            let scripts = store
                .list_scripts()
                .unwrap_or_else(|e| fail("Error listing files", e));

            if scripts.is_empty() {
                println!("No script files found in {}", store.root().display());
            } else {
                let default = store.normalize(&config.default_file).ok();
                for name in scripts {
                    let marker = if Some(&name) == default.as_ref() { "*" } else { " " };
                    println!("{marker} {name}");
                }
            }
        }
        Command::Show(args) => {
            let mut session = open_session(store, &config);
            let loaded = match &args.name {
                Some(name) => session.select(name),
                None => session.reload().map(|_| ()),
            };
            loaded.unwrap_or_else(|e| fail("Error loading file", e));

            print!("{}", session.buffer);
            if !session.buffer.ends_with('\n') {
                println!();
            }
        }
        Command::New(args) => {
            let mut session = open_session(store, &config);
            match session.create(&args.name) {
                Ok(message) => println!("{message}"),
                Err(e) => fail("Error creating file", e),
            }
        }
    }
}
