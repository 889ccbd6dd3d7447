use std::io;
use std::process;

use clap::Parser;
use ledger_desk::features::Roster;
use ledger_desk::shell::{employees, Console};
use log::error;

/// Toy employee records: add, update, search, payroll and vacation tracking.
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
    let mut roster = Roster::new();

    employees::run(&mut console, &mut roster)
}
