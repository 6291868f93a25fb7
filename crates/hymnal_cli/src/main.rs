//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open a hymnal store from the command line and print its contents.
//! - Seed bundled assets into a store by hand.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hymnal_core::{
    core_version, seed_bundled_books, CatalogService, HymnalConfig, HymnalType, HymnsDao,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hymnal")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the store file
    #[arg(short, long, global = true, default_value = ".")]
    data_dir: PathBuf,

    /// Log level written under `<data-dir>/logs`
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List stored hymn books
    Books,
    /// Print a book summary or one hymn
    Show {
        #[arg(value_enum)]
        hymnal: HymnalArg,
        /// Hymn number to print
        #[arg(short, long)]
        number: Option<i32>,
    },
    /// Load bundled `sdah*.json` assets into the store
    Seed { assets_dir: PathBuf },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum HymnalArg {
    English,
    EnglishOld,
    Spanish,
}

impl From<HymnalArg> for HymnalType {
    fn from(value: HymnalArg) -> Self {
        match value {
            HymnalArg::English => HymnalType::English,
            HymnalArg::EnglishOld => HymnalType::EnglishOld,
            HymnalArg::Spanish => HymnalType::Spanish,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = std::path::absolute(&cli.data_dir)
        .with_context(|| format!("failed to resolve `{}`", cli.data_dir.display()))?;
    let mut config = HymnalConfig::new(data_dir);
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level.as_str());
        config.init_logging().map_err(|err| anyhow!(err))?;
    }

    let database = config
        .open_database()
        .with_context(|| format!("failed to open `{}`", config.db_path().display()))?;
    let dao = database.hymns_dao();
    log::info!("event=cli_start module=cli status=ok version={}", core_version());

    match cli.command {
        Command::Books => {
            for book in dao.get_all_books()? {
                println!(
                    "{}\t{}\t{}\t{} hymns",
                    book.kind.as_db(),
                    book.name,
                    book.language,
                    book.len()
                );
            }
        }
        Command::Show { hymnal, number } => {
            let kind = HymnalType::from(hymnal);
            let catalog = CatalogService::new(dao);
            match number {
                Some(number) => {
                    let hymn = catalog
                        .hymn(kind, number)?
                        .ok_or_else(|| anyhow!("hymn {number} not found in {kind}"))?;
                    println!("{}. {}\n\n{}", hymn.number, hymn.title, hymn.content);
                }
                None => {
                    let book = catalog
                        .book(kind)?
                        .ok_or_else(|| anyhow!("{kind} is not stored"))?;
                    println!("{} ({}): {} hymns", book.name, book.language, book.len());
                }
            }
        }
        Command::Seed { assets_dir } => {
            let written = seed_bundled_books(&dao, &assets_dir)
                .with_context(|| format!("failed to seed from `{}`", assets_dir.display()))?;
            println!("seeded {written} books");
        }
    }

    Ok(())
}
