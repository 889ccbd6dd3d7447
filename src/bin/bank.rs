use std::io;
use std::process;

use clap::Parser;
use ledger_desk::features::Ledger;
use ledger_desk::shell::{bank, Console};
use log::error;

/// Toy banking ledger: open accounts, deposit, withdraw and check balances.
/// Nothing is kept once the program exits.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {}

fn main() {
    env_logger::init();
    Cli::parse();

    if let Err(e) = run() {
        error!("{e:#}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut ledger = Ledger::new();

    bank::run(&mut console, &mut ledger)
}
