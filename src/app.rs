use std::io::{BufWriter, Write, stdout};

use tracing::info;

use crate::{
    common::{config::Config, error::AppError, logging},
    domain::{balance::BalanceOptions, ledger::Ledger},
    io::{loader::load_from_file, writer},
};

pub const USAGE: &str = "usage: gnc-ledger <command>

commands:
  accounts [--name NAME | --type TYPE]
  account ID
  accounttypes
  balance ID [--from YYYY-MM-DD] [--to YYYY-MM-DD] [--type NUM] [--norecursive]

environment:
  GNUCASH_FILE_PATH  GnuCash file to query (required)
  LOG_FILE_PATH      append logs to this file instead of stderr";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountFilter {
    All,
    Name(String),
    Type(String),
}

/// One query against the loaded ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Accounts(AccountFilter),
    Account(String),
    AccountTypes,
    Balance { id: String, options: BalanceOptions },
}

impl Command {
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, AppError> {
        let mut args = args.iter().map(|arg| arg.as_ref());
        let usage = |msg: &str| AppError::Usage(msg.to_string());

        let command = match args.next() {
            Some("accounts") => match (args.next(), args.next()) {
                (None, _) => Command::Accounts(AccountFilter::All),
                (Some("--name"), Some(name)) => Command::Accounts(AccountFilter::Name(name.into())),
                (Some("--type"), Some(kind)) => Command::Accounts(AccountFilter::Type(kind.into())),
                _ => return Err(usage("accounts takes one of --name NAME or --type TYPE")),
            },
            Some("account") => match args.next() {
                Some(id) => Command::Account(id.into()),
                None => return Err(usage("account needs an ID")),
            },
            Some("accounttypes") => Command::AccountTypes,
            Some("balance") => {
                let id = args.next().ok_or_else(|| usage("balance needs an account ID"))?;
                let mut options = BalanceOptions {
                    recursive: true,
                    ..Default::default()
                };
                while let Some(flag) = args.next() {
                    let mut value = || {
                        args.next()
                            .map(str::to_string)
                            .ok_or_else(|| usage(&format!("{flag} needs a value")))
                    };
                    match flag {
                        "--from" => options.from = Some(value()?),
                        "--to" => options.to = Some(value()?),
                        "--type" => options.num = Some(value()?),
                        "--norecursive" => options.recursive = false,
                        other => return Err(usage(&format!("unknown option {other}"))),
                    }
                }
                Command::Balance {
                    id: id.into(),
                    options,
                }
            }
            Some(other) => return Err(usage(&format!("unknown command {other}"))),
            None => return Err(usage("missing command")),
        };

        match args.next() {
            Some(extra) => Err(usage(&format!("unexpected argument {extra}"))),
            None => Ok(command),
        }
    }
}

pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    let command = Command::parse(args.get(1..).unwrap_or_default())?;

    let config = Config::from_env()?;
    logging::init(config.log_file.as_deref())?;

    let ledger = load_from_file(&config.ledger_path)?;
    info!(?command, "running query");

    let stdout = stdout();
    let mut out = BufWriter::new(stdout.lock());
    execute(&ledger, &command, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Runs `command` against `ledger` and writes the CSV result to `out`.
pub fn execute<W: Write>(ledger: &Ledger, command: &Command, out: W) -> Result<(), AppError> {
    let root = ledger.root();
    let lookup = |id: &str| {
        root.find_by_id(id)
            .ok_or_else(|| AppError::AccountNotFound(id.to_string()))
    };

    match command {
        Command::Accounts(AccountFilter::All) => writer::write_accounts(out, &root.descendants())?,
        Command::Accounts(AccountFilter::Name(name)) => {
            writer::write_accounts(out, &root.find_by_name(name))?
        }
        Command::Accounts(AccountFilter::Type(kind)) => {
            writer::write_accounts(out, &root.find_by_type(kind))?
        }
        Command::Account(id) => writer::write_accounts(out, &[lookup(id)?])?,
        Command::AccountTypes => writer::write_account_types(out, &root.type_counts())?,
        Command::Balance { id, options } => {
            let account = lookup(id)?;
            writer::write_balance(out, account, &account.balance(options))?
        }
    }
    Ok(())
}
