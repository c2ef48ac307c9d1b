#[macro_use]
extern crate strum_macros;

mod cache;
mod emit;
mod error;
mod extract;
mod fetch;
mod report;

use std::path::PathBuf;
use structopt::StructOpt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::cache::CacheDir;

#[derive(Debug, StructOpt)]
#[structopt(name = "opscrape", about = "Generate 65c816 opcode table entries from the sneslab wiki")]
enum Opt {
    /// Download the opcode matrix and cache every instruction page it links to
    Fetch {
        #[structopt(long, default_value = "https://sneslab.net/wiki/65c816_Opcode_Matrix")]
        index_url: Url,
        #[structopt(long, default_value = "ops", parse(from_os_str))]
        cache_dir: PathBuf,
    },
    /// Print opcode table entries for every cached instruction page
    Extract {
        #[structopt(long, default_value = "ops", parse(from_os_str))]
        cache_dir: PathBuf,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match Opt::from_args() {
        Opt::Fetch { index_url, cache_dir } => {
            let cache = CacheDir::new(cache_dir);
            let mut source = fetch::HttpSource::new()?;
            let fetched = fetch::run(&mut source, &index_url, &cache, &mut out)?;
            info!(pages = fetched.len(), dir = %cache.root().display(), "fetch done");
        }
        Opt::Extract { cache_dir } => {
            let cache = CacheDir::new(cache_dir);
            let (labels, table) = extract::run(&cache, &mut out)?;
            for label in labels.missing() {
                warn!(label = %label, "addressing mode label missing from table");
            }
            info!(
                entries = table.len(),
                duplicates = table.duplicates().len(),
                labels = labels.len(),
                "extract done"
            );
        }
    }
    Ok(())
}
