use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use pcs_store::{PowerStatusRecord, PowerStatusRepository, PowerStatusStore, StoreConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pcs-store")]
#[command(about = "Inspect and edit stored component power status")]
struct Cli {
    /// Backend URL (`http://host:port` or `mem:`); defaults to ETCD_HOST/ETCD_PORT
    #[arg(long)]
    url: Option<String>,

    /// Connection attempts before giving up
    #[arg(long, default_value_t = 5)]
    retries: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write and delete a throwaway key
    Ping,
    /// Print one record
    Get { xname: String },
    /// Store a record given as JSON
    Put {
        json: String,
        /// Stamp lastUpdated with the current time
        #[arg(long)]
        touch: bool,
    },
    /// Delete one record
    Delete { xname: String },
    /// Print every record as `{"status": [...]}`
    List,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.url.as_deref() {
        Some(url) => StoreConfig::from_url(url)?,
        None => StoreConfig::from_env(),
    }
    .retries(cli.retries);
    let repo = PowerStatusRepository::open(&config).context("Failed to open storage backend")?;

    match cli.command {
        Command::Ping => {
            repo.ping()?;
            println!("ok");
        }
        Command::Get { xname } => {
            let record = repo.get_power_status(&xname)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Put { json, touch } => {
            let mut record: PowerStatusRecord =
                serde_json::from_str(&json).context("Record is not valid JSON")?;
            if touch {
                record.touch();
            }
            repo.store_power_status(&record)?;
        }
        Command::Delete { xname } => repo.delete_power_status(&xname)?,
        Command::List => {
            let outcome = repo.get_all_power_status()?;
            for failure in &outcome.failures {
                eprintln!("skipped {}: {}", failure.key, failure.error);
            }
            let collection: pcs_store::PowerStatusCollection =
                outcome.records.into_iter().collect();
            println!("{}", serde_json::to_string_pretty(&collection)?);
            if let Some(err) = outcome.failures.last() {
                return Err(anyhow!(
                    "{} record(s) could not be decoded, last: {}",
                    outcome.failures.len(),
                    err.error
                ));
            }
        }
    }
    Ok(())
}
