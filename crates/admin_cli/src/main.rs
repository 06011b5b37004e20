use std::error::Error;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{Engine, EngineError, Period, TransactionPage};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "wallet_admin")]
#[command(about = "Operator utilities for the wallet service (top-ups, history, revenue reports)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./wallet.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending migrations and exit.
    Migrate,
    Wallet(Wallet),
    Transactions(TransactionsArgs),
    Report(Report),
}

#[derive(Args, Debug)]
struct Wallet {
    #[command(subcommand)]
    command: WalletCommand,
}

#[derive(Subcommand, Debug)]
enum WalletCommand {
    /// Top up a wallet, creating it if needed.
    Add(WalletAddArgs),
    /// Print balance and reservation.
    Show(WalletShowArgs),
}

#[derive(Args, Debug)]
struct WalletAddArgs {
    #[arg(long)]
    user: i64,
    /// Amount in minor units.
    #[arg(long)]
    amount: i64,
}

#[derive(Args, Debug)]
struct WalletShowArgs {
    #[arg(long)]
    user: i64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortBy {
    Amount,
    Date,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Direction {
    Asc,
    Desc,
}

#[derive(Args, Debug)]
struct TransactionsArgs {
    #[arg(long)]
    user: i64,
    #[arg(long, default_value_t = 20)]
    limit: u64,
    #[arg(long, default_value_t = 0)]
    offset: u64,
    #[arg(long, value_enum, default_value = "date")]
    sort_by: SortBy,
    #[arg(long, value_enum, default_value = "desc")]
    direction: Direction,
    /// RFC 3339 lower bound; switches to the time-range listing.
    #[arg(long, requires = "until")]
    since: Option<DateTime<Utc>>,
    /// RFC 3339 upper bound (inclusive).
    #[arg(long, requires = "since")]
    until: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
struct Report {
    #[command(subcommand)]
    command: ReportCommand,
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Print revenue per service for a month.
    Show(ReportShowArgs),
    /// Add a manual correction to a month's revenue.
    Add(ReportAddArgs),
}

#[derive(Args, Debug)]
struct ReportShowArgs {
    /// `YYYY-MM`.
    #[arg(long, value_parser = parse_period)]
    period: Period,
}

#[derive(Args, Debug)]
struct ReportAddArgs {
    #[arg(long, value_parser = parse_period)]
    period: Period,
    #[arg(long)]
    service: i64,
    #[arg(long)]
    amount: i64,
}

fn parse_period(raw: &str) -> Result<Period, String> {
    raw.parse().map_err(|err: EngineError| err.to_string())
}

fn page(args: &TransactionsArgs) -> TransactionPage {
    TransactionPage::new(args.limit)
        .offset(args.offset)
        .sort_by(match args.sort_by {
            SortBy::Amount => engine::SortBy::Amount,
            SortBy::Date => engine::SortBy::Date,
        })
        .direction(match args.direction {
            Direction::Asc => engine::Direction::Asc,
            Direction::Desc => engine::Direction::Desc,
        })
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Business errors are reported and end the process with status 1.
fn or_exit<T>(result: Result<T, EngineError>) -> Result<T, Box<dyn Error + Send + Sync>> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if !err.is_internal() => {
            eprintln!("{err}");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Migrate => println!("database is up to date"),
        Command::Wallet(Wallet {
            command: WalletCommand::Add(args),
        }) => {
            let balance = or_exit(engine.add(args.user, args.amount).await)?;
            println!("user {}: balance {balance}", args.user);
        }
        Command::Wallet(Wallet {
            command: WalletCommand::Show(args),
        }) => {
            let wallet = or_exit(engine.wallet(args.user).await)?;
            println!(
                "user {}: balance {} reserved {} (wallet {})",
                wallet.user_id, wallet.balance, wallet.reservation, wallet.id
            );
        }
        Command::Transactions(args) => {
            let transactions = match (args.since, args.until) {
                (Some(since), Some(until)) => {
                    or_exit(engine.transactions_by_time(args.user, since, until).await)?
                }
                _ => or_exit(engine.transactions(args.user, &page(&args)).await)?,
            };
            for tx in transactions {
                println!(
                    "{}\t{:>10}\t{}",
                    tx.created_at.to_rfc3339(),
                    tx.amount,
                    tx.description
                );
            }
        }
        Command::Report(Report {
            command: ReportCommand::Show(args),
        }) => {
            let rows = or_exit(engine.report(args.period).await)?;
            println!("period {}", args.period);
            for row in rows {
                println!(
                    "{}\t{}\t{}",
                    row.service_id, row.service_name, row.total_revenue
                );
            }
        }
        Command::Report(Report {
            command: ReportCommand::Add(args),
        }) => {
            let total = or_exit(
                engine
                    .add_report_record(args.service, args.amount, args.period)
                    .await,
            )?;
            println!(
                "period {} service {}: total revenue {total}",
                args.period, args.service
            );
        }
    }

    Ok(())
}
