use std::{error::Error, io::Write};

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{Engine, ExportFormat, TransactionFilter};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "okozukai_admin")]
#[command(about = "Admin utilities for Okozukai (journals, tags, demo data, exports)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./okozukai.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Journal(Journal),
    Tag(Tag),
    /// Load the demo journal when the database has no transactions.
    Seed,
    /// Write a journal's transactions to stdout.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct Journal {
    #[command(subcommand)]
    command: JournalCommand,
}

#[derive(Subcommand, Debug)]
enum JournalCommand {
    Create(JournalCreateArgs),
    List,
}

#[derive(Args, Debug)]
struct JournalCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "USD")]
    currency: String,
}

#[derive(Args, Debug)]
struct Tag {
    #[command(subcommand)]
    command: TagCommand,
}

#[derive(Subcommand, Debug)]
enum TagCommand {
    Create(TagCreateArgs),
    List,
}

#[derive(Args, Debug)]
struct TagCreateArgs {
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(long)]
    journal_id: Uuid,
    /// `json` or `csv`.
    #[arg(long, default_value = "json")]
    format: String,
    /// Inclusive lower bound, RFC 3339.
    #[arg(long)]
    from: Option<DateTime<Utc>>,
    /// Inclusive upper bound, RFC 3339.
    #[arg(long)]
    to: Option<DateTime<Utc>>,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Journal(Journal {
            command: JournalCommand::Create(args),
        }) => {
            let journal = engine.create_journal(&args.name, &args.currency).await?;
            println!(
                "created journal: {} ({}) in {}",
                journal.name(),
                journal.id(),
                journal.primary_currency()
            );
        }
        Command::Journal(Journal {
            command: JournalCommand::List,
        }) => {
            for journal in engine.journals().await? {
                let state = if journal.is_closed() { "closed" } else { "open" };
                println!(
                    "{}\t{}\t{}\t{state}",
                    journal.id(),
                    journal.primary_currency(),
                    journal.name()
                );
            }
        }
        Command::Tag(Tag {
            command: TagCommand::Create(args),
        }) => {
            let tag = engine.create_tag(&args.name).await?;
            println!("created tag: {} ({}) {}", tag.name(), tag.id(), tag.color());
        }
        Command::Tag(Tag {
            command: TagCommand::List,
        }) => {
            for tag in engine.tags().await? {
                println!("{}\t{}\t{}", tag.id(), tag.color(), tag.name());
            }
        }
        Command::Seed => {
            if engine.seed_demo_data().await? {
                println!("demo data created");
            } else {
                println!("database already has transactions, nothing to do");
            }
        }
        Command::Export(args) => {
            if let (Some(from), Some(to)) = (args.from, args.to)
                && from > to
            {
                eprintln!("--from must be earlier than or equal to --to");
                std::process::exit(2);
            }
            let format = ExportFormat::try_from(args.format.as_str())?;
            let mut filter = TransactionFilter::default();
            filter.from = args.from;
            filter.to = args.to;

            let export = engine.export(args.journal_id, &filter, format).await?;
            let mut out = std::io::stdout().lock();
            out.write_all(&export.content)?;
            out.flush()?;
        }
    }

    Ok(())
}
