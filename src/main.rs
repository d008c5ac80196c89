use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fintrack::AppCommand;
use fintrack::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Record, amend and list expenses
    #[command(subcommand)]
    Expense(ExpenseCommand),
    /// Record, amend and list investments
    #[command(subcommand)]
    Investment(InvestmentCommand),
    /// Display totals and breakdowns, optionally converted
    Stats {
        /// Currency to convert totals into
        #[arg(short, long)]
        target_currency: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List selectable currencies
    Currencies {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ExpenseCommand {
    /// Add an expense
    Add {
        /// Category, e.g. food, rent, travel
        #[arg(long)]
        category: String,
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value = "")]
        note: String,
        /// Currency code, defaults to USD
        #[arg(long)]
        currency: Option<String>,
    },
    /// Show all expenses
    List,
    /// Change an expense by its position in the list
    Update {
        index: usize,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete an expense by its position in the list
    Delete { index: usize },
}

#[derive(Subcommand)]
enum InvestmentCommand {
    /// Add an investment
    Add {
        /// Investment type, e.g. stocks, crypto, mutual fund
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        amount: f64,
        /// Expected returns, e.g. 10%
        #[arg(long, default_value = "")]
        returns: String,
        #[arg(long, default_value = "")]
        note: String,
        /// Currency code, defaults to USD
        #[arg(long)]
        currency: Option<String>,
    },
    /// Show all investments
    List,
    /// Change an investment by its position in the list
    Update {
        index: usize,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        returns: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete an investment by its position in the list
    Delete { index: usize },
}

impl From<ExpenseCommand> for AppCommand {
    fn from(cmd: ExpenseCommand) -> AppCommand {
        match cmd {
            ExpenseCommand::Add {
                category,
                amount,
                note,
                currency,
            } => AppCommand::AddExpense {
                category,
                amount,
                note,
                currency,
            },
            ExpenseCommand::List => AppCommand::ListExpenses,
            ExpenseCommand::Update {
                index,
                category,
                amount,
                note,
            } => AppCommand::UpdateExpense {
                index,
                category,
                amount,
                note,
            },
            ExpenseCommand::Delete { index } => AppCommand::DeleteExpense { index },
        }
    }
}

impl From<InvestmentCommand> for AppCommand {
    fn from(cmd: InvestmentCommand) -> AppCommand {
        match cmd {
            InvestmentCommand::Add {
                kind,
                amount,
                returns,
                note,
                currency,
            } => AppCommand::AddInvestment {
                kind,
                amount,
                returns,
                note,
                currency,
            },
            InvestmentCommand::List => AppCommand::ListInvestments,
            InvestmentCommand::Update {
                index,
                kind,
                amount,
                returns,
                note,
            } => AppCommand::UpdateInvestment {
                index,
                kind,
                amount,
                returns,
                note,
            },
            InvestmentCommand::Delete { index } => AppCommand::DeleteInvestment { index },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => fintrack::cli::setup::setup().map(|path| {
            println!("Created default configuration at {}", path.display());
        }),
        Some(Commands::Expense(cmd)) => fintrack::run_command(cmd.into(), config_path).await,
        Some(Commands::Investment(cmd)) => fintrack::run_command(cmd.into(), config_path).await,
        Some(Commands::Stats {
            target_currency,
            json,
        }) => {
            fintrack::run_command(
                AppCommand::Stats {
                    target_currency,
                    json,
                },
                config_path,
            )
            .await
        }
        Some(Commands::Currencies { json }) => {
            fintrack::run_command(AppCommand::Currencies { json }, config_path).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
