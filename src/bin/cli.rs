//! OhNoDB CLI
//!
//! Command-line interface for a local OhNoDB store.

use clap::{Parser, Subcommand};
use ohnodb::{Config, Encoding, Payload, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// OhNoDB CLI
#[derive(Parser, Debug)]
#[command(name = "ohnodb-cli")]
#[command(about = "CLI for the OhNoDB embedded record store")]
#[command(version)]
struct Args {
    /// Store root directory
    #[arg(short, long, default_value = "./ohnodb_data")]
    data_dir: String,

    /// Treat values as raw text instead of JSON
    #[arg(short, long)]
    text: bool,

    /// fsync record files after writing
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new record
    Create {
        table: String,
        name: String,
        /// JSON document (or raw text with --text)
        value: String,
    },

    /// Print a record
    Fetch { table: String, name: String },

    /// Overwrite an existing record
    Update {
        table: String,
        name: String,
        /// JSON document (or raw text with --text)
        value: String,
    },

    /// List tables
    Tables,

    /// List record names in a table
    Names { table: String },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ohnodb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> ohnodb::Result<()> {
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .sync_writes(args.sync)
        .build();
    let mut store = Store::open_with_config(config)?;

    let encoding = if args.text {
        Encoding::Text
    } else {
        Encoding::Structured
    };

    match args.command {
        Commands::Create { table, name, value } => {
            store.create(&table, &name, parse_value(&value, encoding)?)?;
        }
        Commands::Update { table, name, value } => {
            store.update(&table, &name, parse_value(&value, encoding)?)?;
        }
        Commands::Fetch { table, name } => {
            let payload = store.fetch(&table, &name, encoding)?;
            println!("{}", payload.into_text()?);
        }
        Commands::Tables => {
            for table in store.tables() {
                println!("{table}");
            }
        }
        Commands::Names { table } => {
            for name in store.names(&table)? {
                println!("{name}");
            }
        }
    }

    Ok(())
}

fn parse_value(value: &str, encoding: Encoding) -> ohnodb::Result<Payload> {
    Payload::decode(value.as_bytes(), encoding)
}
