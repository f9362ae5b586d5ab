use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use expense_tracker_client::models::{FilterUpdate, TransactionInput, TransactionType};
use expense_tracker_client::notify::ToastLevel;
use expense_tracker_client::router::{self, ROUTES};
use expense_tracker_client::utils::{Align, Table};
use expense_tracker_client::{App, ClientConfig};

#[derive(Parser)]
#[command(name = "expense-tracker", version, about = "Command-line client for the Expense Tracker API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List transactions, newest first
    List {
        /// Zero-based page number
        #[arg(short, long, default_value_t = 0)]
        page: u32,
        #[arg(long)]
        category: Option<i64>,
        /// EXPENSE or INCOME
        #[arg(long = "type")]
        kind: Option<TransactionType>,
        /// Earliest transaction date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest transaction date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Record a new transaction
    Add(TransactionArgs),
    /// Replace an existing transaction
    Update {
        id: i64,
        #[command(flatten)]
        fields: TransactionArgs,
    },
    /// Delete a transaction
    Delete { id: i64 },
    /// Income/expense summary for a month, or a whole year with --year only
    Summary {
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// List categories
    Categories,
    /// Budget status and alerts for a month
    Budgets {
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Store a bearer token for subsequent requests
    Login { token: String },
    /// Forget the stored token
    Logout,
    /// Show the signed-in user's profile
    Whoami,
    /// Print the route table with page titles
    Routes,
}

#[derive(Args)]
struct TransactionArgs {
    amount: Decimal,
    #[arg(long)]
    category: i64,
    #[arg(long = "type", default_value = "EXPENSE")]
    kind: TransactionType,
    /// Defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    description: Option<String>,
}

impl TransactionArgs {
    fn into_input(self) -> TransactionInput {
        TransactionInput {
            amount: self.amount,
            description: self.description,
            transaction_date: self.date.unwrap_or_else(|| Local::now().date_naive()),
            category_id: self.category,
            kind: self.kind,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("expense_tracker_client=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    debug!("Loaded configuration: {:?}", config);

    let app = App::new(config)?;
    let result = run(&app, cli.command).await;

    for toast in app.toasts.drain() {
        match toast.level {
            ToastLevel::Success => eprintln!("✅ {}", toast.message),
            ToastLevel::Error => eprintln!("❌ {}", toast.message),
        }
    }
    if app.router.current_path() == router::LOGIN_PATH {
        eprintln!("Session expired. Run `expense-tracker login <token>` to sign in again.");
    }

    result
}

async fn run(app: &App, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let user_id = app.user_id();
    let today = Local::now().date_naive();

    match command {
        Command::List { page, category, kind, from, to } => {
            app.router.push("/transactions")?;
            app.transactions.set_filters(
                FilterUpdate::default()
                    .category(category)
                    .kind(kind)
                    .start_date(from)
                    .end_date(to),
            );
            app.transactions.fetch(user_id, page).await;
            if let Some(message) = app.transactions.error() {
                return Err(message.into());
            }

            let state = app.transactions.snapshot();
            let mut table = Table::new(&["ID", "Date", "Type", "Amount", "Category", "Description"])
                .align(3, Align::Right);
            for t in &state.transactions {
                table.add_row(vec![
                    t.id.to_string(),
                    t.transaction_date.to_string(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                    t.category_name().to_string(),
                    t.description.clone().unwrap_or_default(),
                ]);
            }
            if table.is_empty() {
                println!("No transactions found.");
            } else {
                println!("{}", table.render());
            }
            let pagination = state.pagination;
            println!(
                "Page {} of {} ({} total) | Income: {} | Expenses: {}",
                pagination.page + 1,
                pagination.total_pages.max(1),
                pagination.total,
                state.total_income(),
                state.total_expenses()
            );
        }
        Command::Add(fields) => {
            let created = app.transactions.create(user_id, &fields.into_input()).await?;
            info!("Transaction {} recorded", created.id);
            println!("{} {} on {} ({})", created.kind, created.amount, created.transaction_date, created.category_name());
        }
        Command::Update { id, fields } => {
            let updated = app.transactions.update(user_id, id, &fields.into_input()).await?;
            println!("{} {} on {} ({})", updated.kind, updated.amount, updated.transaction_date, updated.category_name());
        }
        Command::Delete { id } => {
            app.transactions.delete(user_id, id).await?;
        }
        Command::Summary { month, year } => {
            app.router.push("/reports")?;
            match (month, year) {
                (None, Some(year)) => {
                    let summary = app.api.yearly_summary(user_id, year).await?;
                    println!(
                        "{} | Income: {} | Expenses: {} | Balance: {}",
                        summary.year, summary.total_income, summary.total_expenses, summary.balance
                    );
                    println!("Average monthly expense: {}", summary.average_monthly_expense);
                }
                (month, year) => {
                    let month = month.unwrap_or_else(|| today.month());
                    let year = year.unwrap_or_else(|| today.year());
                    let summary = app.api.monthly_summary(user_id, month, year).await?;
                    println!(
                        "{:04}-{:02} | Income: {} | Expenses: {} | Balance: {}",
                        summary.year, summary.month, summary.total_income, summary.total_expenses, summary.balance
                    );
                    let mut table = Table::new(&["Category", "Spent"]).align(1, Align::Right);
                    for spending in &summary.category_breakdown {
                        table.add_row(vec![spending.category_name.clone(), spending.total.to_string()]);
                    }
                    if !table.is_empty() {
                        println!("{}", table.render());
                    }
                }
            }
        }
        Command::Categories => {
            app.router.push("/categories")?;
            app.categories.fetch().await;
            if let Some(message) = app.categories.error() {
                return Err(message.into());
            }
            let mut table = Table::new(&["ID", "Name", "System", "Description"]);
            for c in app.categories.categories() {
                table.add_row(vec![
                    c.id.to_string(),
                    c.name,
                    if c.is_system { "yes" } else { "" }.to_string(),
                    c.description.unwrap_or_default(),
                ]);
            }
            println!("{}", table.render());
        }
        Command::Budgets { month, year } => {
            app.router.push("/budgets")?;
            let month = month.unwrap_or_else(|| today.month());
            let year = year.unwrap_or_else(|| today.year());
            app.budgets.fetch_monthly(user_id, month, year).await;
            app.budgets.fetch_alerts(user_id).await;

            let state = app.budgets.snapshot();
            if let Some(message) = state.error() {
                return Err(message.to_string().into());
            }
            let mut table = Table::new(&["Category", "Budget", "Spent", "Remaining", "%"])
                .align(1, Align::Right)
                .align(2, Align::Right)
                .align(3, Align::Right)
                .align(4, Align::Right);
            for status in &state.monthly {
                let category = status.budget.category.as_ref().map(|c| c.name.clone()).unwrap_or_default();
                table.add_row(vec![
                    category,
                    status.budget.amount.to_string(),
                    status.spent.to_string(),
                    status.remaining.to_string(),
                    status.percentage.round_dp(1).to_string(),
                ]);
            }
            if table.is_empty() {
                println!("No budgets for {:04}-{:02}.", year, month);
            } else {
                println!("{}", table.render());
            }
            for alert in &state.alerts {
                println!("⚠️  {:?}: {}", alert.severity, alert.message);
            }
        }
        Command::Login { token } => {
            app.session.login(&token)?;
            println!("Token saved.");
        }
        Command::Logout => {
            app.session.logout();
            println!("Logged out.");
        }
        Command::Whoami => {
            app.router.push("/settings")?;
            let user = app.session.refresh(&app.api).await?;
            println!("{} <{}> (@{}, id {})", user.name, user.email, user.username, user.id);
        }
        Command::Routes => {
            let mut table = Table::new(&["Path", "Name", "Title"]);
            for route in ROUTES.iter() {
                table.add_row(vec![
                    route.path.to_string(),
                    route.name.to_string(),
                    router::page_title(Some(route)),
                ]);
            }
            println!("{}", table.render());
        }
    }

    Ok(())
}
