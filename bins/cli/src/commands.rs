//! Command line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use custody_core::custody::CustodyStatus;
use custody_core::expense::{EntryKind, ExpenseStatus};
use custody_shared::types::{CustodyRequestId, EmployeeId, ExpenseId};
use rust_decimal::Decimal;

/// Employee custody ledger.
#[derive(Parser, Debug)]
#[command(name = "custody", version, about)]
pub struct Cli {
    /// Keep the collections under this directory (filesystem backend).
    #[arg(long, global = true, conflicts_with = "memory")]
    pub data_dir: Option<PathBuf>,

    /// Use a throwaway in-memory store.
    #[arg(long, global = true)]
    pub memory: bool,

    /// Print records as JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List employees and their custody balances.
    Employees,
    /// Balance, expense count and pending incoming transfers of one employee.
    Summary {
        /// Employee id.
        employee: EmployeeId,
    },
    /// Expense ledger.
    #[command(subcommand)]
    Expense(ExpenseCommand),
    /// Custody transfers between employees.
    #[command(subcommand)]
    Transfer(TransferCommand),
}

/// `expense` subcommands.
#[derive(Subcommand, Debug)]
pub enum ExpenseCommand {
    /// List expenses, newest first.
    List {
        /// Only expenses of this employee.
        #[arg(long)]
        employee: Option<EmployeeId>,
        /// Only expenses in this status (pending, paid, rejected).
        #[arg(long, value_parser = expense_status)]
        status: Option<ExpenseStatus>,
    },
    /// Record an expense against an employee.
    Add {
        /// Owning employee.
        employee: EmployeeId,
        /// Amount; signed unless `--kind` is given.
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
        /// Treat the amount as a magnitude of this kind.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        /// Free-form notes.
        #[arg(long)]
        notes: Option<String>,
        /// Who records the entry.
        #[arg(long)]
        created_by: Option<String>,
        /// Display name of the recorder.
        #[arg(long, requires = "created_by")]
        created_by_name: Option<String>,
    },
    /// Employee confirms a pending expense.
    Confirm {
        /// Expense id.
        id: ExpenseId,
    },
    /// Employee rejects a pending expense.
    Reject {
        /// Expense id.
        id: ExpenseId,
    },
    /// Delete an expense and reverse its balance effect.
    Remove {
        /// Expense id.
        id: ExpenseId,
    },
}

/// `transfer` subcommands.
#[derive(Subcommand, Debug)]
pub enum TransferCommand {
    /// List transfer requests, newest first.
    List {
        /// Only requests sent or received by this employee.
        #[arg(long)]
        employee: Option<EmployeeId>,
        /// Only requests in this status (pending, confirmed, rejected).
        #[arg(long, value_parser = custody_status)]
        status: Option<CustodyStatus>,
    },
    /// Ask another employee to take over part of a custody balance.
    Create {
        /// Sender.
        from: EmployeeId,
        /// Receiver.
        to: EmployeeId,
        /// Amount to move.
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
        /// Free-form notes.
        #[arg(long)]
        notes: Option<String>,
        /// Who raises the request; defaults to the sender.
        #[arg(long)]
        requested_by: Option<String>,
    },
    /// Receiver accepts a pending request.
    Confirm {
        /// Request id.
        id: CustodyRequestId,
        /// Employee answering; must be the receiver.
        #[arg(long = "as", value_name = "EMPLOYEE")]
        acting: EmployeeId,
    },
    /// Receiver declines a pending request.
    Reject {
        /// Request id.
        id: CustodyRequestId,
        /// Employee answering; must be the receiver.
        #[arg(long = "as", value_name = "EMPLOYEE")]
        acting: EmployeeId,
    },
    /// Delete an answered request.
    Remove {
        /// Request id.
        id: CustodyRequestId,
    },
}

/// `--kind` values.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    /// Cash paid out; debits the balance.
    Disbursement,
    /// Cash returned; credits the balance.
    Settlement,
}

impl From<KindArg> for EntryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Disbursement => Self::Disbursement,
            KindArg::Settlement => Self::Settlement,
        }
    }
}

fn expense_status(raw: &str) -> Result<ExpenseStatus, String> {
    ExpenseStatus::parse(raw)
        .ok_or_else(|| format!("unknown expense status `{raw}` (pending, paid, rejected)"))
}

fn custody_status(raw: &str) -> Result<CustodyStatus, String> {
    CustodyStatus::parse(raw)
        .ok_or_else(|| format!("unknown request status `{raw}` (pending, confirmed, rejected)"))
}
