use super::{parse_amount, parse_number, Console, InputError, ShellError, ShellResult};
use crate::features::{currency, Account, AccountError, AccountNumber, Ledger, Withdrawal};
use std::io::{BufRead, Write};

const MENU: &str = "\
Simple Banking Application
1. Create account
2. Deposit
3. Withdraw
4. Check balance
5. Display account details
6. List accounts
7. Exit (or press 0)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Create,
    Deposit,
    Withdraw,
    Balance,
    Details,
    List,
    Exit,
}

impl Command {
    fn from_choice(choice: &str) -> Option<Self> {
        use Command::*;

        match choice {
            "1" => Some(Create),
            "2" => Some(Deposit),
            "3" => Some(Withdraw),
            "4" => Some(Balance),
            "5" => Some(Details),
            "6" => Some(List),
            "7" | "0" => Some(Exit),
            _ => None,
        }
    }
}

/// Runs the banking menu until the user exits or input runs out.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    ledger: &mut Ledger,
) -> anyhow::Result<()> {
    loop {
        console.say("")?;
        console.say(MENU)?;
        let choice = match console.prompt("Select an option: ")? {
            Some(choice) => choice,
            None => break,
        };

        let outcome = match Command::from_choice(&choice) {
            Some(Command::Exit) => break,
            Some(command) => dispatch(command, console, ledger),
            None => Err(InputError::UnknownMenuNumber.into()),
        };
        console.settle(outcome)?;
    }

    console.say("Goodbye.")?;
    Ok(())
}

fn dispatch<R: BufRead, W: Write>(
    command: Command,
    console: &mut Console<R, W>,
    ledger: &mut Ledger,
) -> ShellResult {
    use Command::*;

    match command {
        Create => create(console, ledger),
        Deposit => deposit(console, ledger),
        Withdraw => withdraw(console, ledger),
        Balance => balance(console, ledger),
        Details => details(console, ledger),
        List => list(console, ledger),
        Exit => Ok(()),
    }
}

/// Prompts for an account number and checks it exists.
fn known_account<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    ledger: &Ledger,
) -> ShellResult<AccountNumber> {
    let input = console.ask("Enter account number: ")?;
    let number = parse_number(&input, InputError::InvalidAccountNumber)?;
    Ok(Account::find_by_number(number, ledger)?.number())
}

fn create<R: BufRead, W: Write>(console: &mut Console<R, W>, ledger: &mut Ledger) -> ShellResult {
    let holder = console.ask("Enter holder name: ")?;
    if holder.is_empty() {
        return Err(AccountError::BlankHolder.into());
    }

    let initial = parse_amount(&console.ask("Initial deposit (or leave empty for 0): ")?)?;
    let account = Account::open(&holder, initial, ledger)?;

    console.say(format!(
        "Account created successfully. Account Number: {}",
        account.number()
    ))?;
    Ok(())
}

fn deposit<R: BufRead, W: Write>(console: &mut Console<R, W>, ledger: &mut Ledger) -> ShellResult {
    let number = known_account(console, ledger)?;
    let amount = parse_amount(&console.ask("Enter deposit amount: ")?)?;

    let balance = Account::deposit(number, amount, ledger).map_err(|source| {
        ShellError::Rejected {
            action: "Deposit",
            source,
        }
    })?;

    console.say(format!(
        "Deposited {} to account {number}. New balance: {}",
        currency(amount),
        currency(balance)
    ))?;
    Ok(())
}

fn withdraw<R: BufRead, W: Write>(console: &mut Console<R, W>, ledger: &mut Ledger) -> ShellResult {
    let number = known_account(console, ledger)?;
    let amount = parse_amount(&console.ask("Enter withdrawal amount: ")?)?;

    let outcome = Account::withdraw(number, amount, ledger).map_err(|source| {
        ShellError::Rejected {
            action: "Withdrawal",
            source,
        }
    })?;

    match outcome {
        Withdrawal::Completed { amount, balance } => console.say(format!(
            "Withdrew {}. New balance: {}",
            currency(amount),
            currency(balance)
        ))?,
        Withdrawal::Declined { .. } => console.say("Insufficient funds.")?,
    }
    Ok(())
}

fn balance<R: BufRead, W: Write>(console: &mut Console<R, W>, ledger: &Ledger) -> ShellResult {
    let number = known_account(console, ledger)?;
    let balance = Account::balance_of(number, ledger)?;

    console.say(format!("Account {number} balance: {}", currency(balance)))?;
    Ok(())
}

fn details<R: BufRead, W: Write>(console: &mut Console<R, W>, ledger: &Ledger) -> ShellResult {
    let number = known_account(console, ledger)?;
    console.say(Account::display(number, ledger)?)?;
    Ok(())
}

fn list<R: BufRead, W: Write>(console: &mut Console<R, W>, ledger: &Ledger) -> ShellResult {
    console.say("Accounts:")?;
    for account in Account::list_all(ledger) {
        console.say(format!(
            "- {}: {} ({})",
            account.number(),
            account.holder(),
            currency(account.balance())
        ))?;
    }
    Ok(())
}
