//! Custody ledger command line.
//!
//! Records expenses against employees' custody balances and runs the
//! two-party custody transfer workflow on a local store.

mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use custody_core::custody::NewCustodyRequest;
use custody_core::expense::{EntryKind, NewExpense};
use custody_core::views::summarize;
use custody_shared::types::{CustodyRequestId, EmployeeId};
use custody_shared::{AppConfig, AppError, AppResult, LogSettings, StoreBackend};
use custody_store::{CustodyTransfers, Store, StoreConfig, StoreError};

use crate::commands::{Cli, Command, ExpenseCommand, TransferCommand};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => return Ok(report(&AppError::Configuration(e.to_string()))),
    };

    init_tracing(&config.log)?;

    match run(cli, &config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => Ok(report(&err)),
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(log: &LogSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            log.json
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!log.json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .try_init()?;
    Ok(())
}

fn report(err: &AppError) -> ExitCode {
    eprintln!("error[{}]: {err}", err.error_code());
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}

async fn run(cli: Cli, config: &AppConfig) -> AppResult<()> {
    let mut settings = config.store.clone();
    if cli.memory {
        settings.backend = StoreBackend::Memory;
    } else if let Some(dir) = cli.data_dir {
        settings.backend = StoreBackend::Fs;
        settings.root = dir;
    }
    debug!(backend = ?settings.backend, root = %settings.root.display(), "store settings");

    let store = Store::open(StoreConfig::from(&settings)).await?;
    let result = dispatch(&store, cli.command, cli.json).await;
    store.close().await;
    result
}

async fn dispatch(store: &Store, command: Command, json: bool) -> AppResult<()> {
    let text = match command {
        Command::Employees => {
            let roster = store.employees().list().await?;
            render(json, roster.as_slice(), output::employees)?
        }
        Command::Summary { employee } => {
            let found = store
                .employees()
                .get(&employee)
                .await?
                .ok_or_else(|| StoreError::not_found("employee", &employee))?;
            let expenses = store.expenses().list().await?;
            let requests = store.custody().list().await?;
            let summary = summarize(&found, &expenses, &requests);
            render(json, &summary, output::summary)?
        }
        Command::Expense(command) => expense(store, command, json).await?,
        Command::Transfer(command) => transfer(store, command, json).await?,
    };

    print!("{text}");
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

async fn expense(store: &Store, command: ExpenseCommand, json: bool) -> AppResult<String> {
    let ledger = store.expenses();
    let record = match command {
        ExpenseCommand::List { employee, status } => {
            let mut expenses = match employee {
                Some(employee) => ledger.list_for(&employee).await?,
                None => ledger.list().await?,
            };
            if let Some(status) = status {
                expenses.retain(|e| e.status == status);
            }
            return render(json, expenses.as_slice(), output::expenses);
        }
        ExpenseCommand::Add {
            employee,
            amount,
            kind,
            notes,
            created_by,
            created_by_name,
        } => {
            let amount = kind.map_or(amount, |k| EntryKind::from(k).signed_amount(amount));
            let mut input = NewExpense::new(employee, amount);
            if let Some(notes) = notes {
                input = input.with_notes(notes);
            }
            if let Some(created_by) = created_by {
                input = input.with_creator(created_by, created_by_name);
            }
            input.validate().map_err(StoreError::from)?;
            ledger.add(input).await?
        }
        ExpenseCommand::Confirm { id } => ledger.confirm(id).await?,
        ExpenseCommand::Reject { id } => ledger.reject(id).await?,
        ExpenseCommand::Remove { id } => ledger.remove(id).await?,
    };
    render(json, &record, output::expense)
}

async fn transfer(store: &Store, command: TransferCommand, json: bool) -> AppResult<String> {
    let custody = store.custody();
    let record = match command {
        TransferCommand::List { employee, status } => {
            let mut requests = match employee {
                Some(employee) => custody.list_involving(&employee).await?,
                None => custody.list().await?,
            };
            if let Some(status) = status {
                requests.retain(|r| r.status == status);
            }
            return render(json, requests.as_slice(), output::requests);
        }
        TransferCommand::Create {
            from,
            to,
            amount,
            notes,
            requested_by,
        } => {
            let mut input = NewCustodyRequest::new(from, to, amount);
            input.notes = notes;
            input.requested_by = requested_by;
            input.validate().map_err(StoreError::from)?;
            custody.create(input).await?
        }
        TransferCommand::Confirm { id, acting } => {
            ensure_receiver(&custody, id, &acting).await?;
            custody.confirm(id).await?
        }
        TransferCommand::Reject { id, acting } => {
            ensure_receiver(&custody, id, &acting).await?;
            custody.reject(id).await?
        }
        TransferCommand::Remove { id } => custody.remove(id).await?,
    };
    render(json, &record, output::request)
}

/// Refuses anyone but the receiver before a request is answered.
async fn ensure_receiver(
    custody: &CustodyTransfers,
    id: CustodyRequestId,
    acting: &EmployeeId,
) -> AppResult<()> {
    let request = custody
        .get(id)
        .await?
        .ok_or_else(|| StoreError::not_found("custody request", id))?;
    request.ensure_receiver(acting).map_err(StoreError::from)?;
    Ok(())
}

fn render<T, F>(json: bool, value: &T, text: F) -> AppResult<String>
where
    T: serde::Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    if json {
        output::to_json(value)
    } else {
        Ok(text(value))
    }
}
