use super::money::{currency, round_serialize};
use super::store::{snapshot, RecordId, Store};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct AccountNumber(i32);

impl AccountNumber {
    pub fn new(number: i32) -> Self {
        Self(number)
    }
}

impl RecordId for AccountNumber {
    const FIRST: Self = AccountNumber(1001);

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// All accounts opened during this run.
pub type Ledger = Store<AccountNumber, Account>;

#[derive(Error, Debug, PartialEq)]
pub enum AccountError {
    #[error("Holder name cannot be empty.")]
    BlankHolder,

    #[error("Initial deposit cannot be negative ({0}).")]
    NegativeOpeningDeposit(Decimal),

    #[error("Deposit amount must be positive.")]
    InvalidDeposit(Decimal),

    #[error("Withdrawal amount must be positive.")]
    InvalidWithdrawal(Decimal),

    #[error("Balance of account {0} cannot hold that much.")]
    BalanceOverflow(AccountNumber),

    #[error("Account not found.")]
    NotFound(AccountNumber),
}

pub type AccountResult<T> = Result<T, AccountError>;

/// Outcome of a withdrawal that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Withdrawal {
    Completed { amount: Decimal, balance: Decimal },

    /// Not enough funds. The balance is left untouched.
    Declined {
        requested: Decimal,
        available: Decimal,
    },
}

impl Withdrawal {
    pub fn is_completed(&self) -> bool {
        matches!(self, Withdrawal::Completed { .. })
    }
}

/// Bank account
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Account {
    number: AccountNumber,

    holder: String,

    /// Never negative
    #[serde(serialize_with = "round_serialize")]
    balance: Decimal,
}

impl Account {
    /// Opens an account with the next free number.
    pub fn open(
        holder: &str,
        initial_deposit: Decimal,
        ledger: &mut Ledger,
    ) -> AccountResult<Account> {
        let holder = holder.trim();
        if holder.is_empty() {
            return Err(AccountError::BlankHolder);
        }
        if initial_deposit < dec!(0) {
            return Err(AccountError::NegativeOpeningDeposit(initial_deposit));
        }

        let account = ledger
            .insert_new(|number| Account {
                number,
                holder: holder.to_owned(),
                balance: initial_deposit,
            })
            .clone();

        info!("opened account {} for {}", account.number, account.holder);
        debug!("{}", snapshot(&account));
        Ok(account)
    }

    pub fn find_by_number(number: AccountNumber, ledger: &Ledger) -> AccountResult<&Account> {
        ledger.get(number).ok_or(AccountError::NotFound(number))
    }

    fn find_mut(number: AccountNumber, ledger: &mut Ledger) -> AccountResult<&mut Account> {
        ledger.get_mut(number).ok_or(AccountError::NotFound(number))
    }

    /// Credits `amount` and returns the new balance.
    pub fn deposit(
        number: AccountNumber,
        amount: Decimal,
        ledger: &mut Ledger,
    ) -> AccountResult<Decimal> {
        let account = Self::find_mut(number, ledger)?;
        if amount <= dec!(0) {
            return Err(AccountError::InvalidDeposit(amount));
        }

        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow(number))?;

        info!("deposited {amount} to account {number}");
        debug!("{}", snapshot(&*account));
        Ok(account.balance)
    }

    pub fn withdraw(
        number: AccountNumber,
        amount: Decimal,
        ledger: &mut Ledger,
    ) -> AccountResult<Withdrawal> {
        let account = Self::find_mut(number, ledger)?;
        if amount <= dec!(0) {
            return Err(AccountError::InvalidWithdrawal(amount));
        }

        if account.balance < amount {
            info!(
                "declined withdrawal of {amount} from account {number}, {} available",
                account.balance
            );
            return Ok(Withdrawal::Declined {
                requested: amount,
                available: account.balance,
            });
        }

        account.balance -= amount;

        info!("withdrew {amount} from account {number}");
        debug!("{}", snapshot(&*account));
        Ok(Withdrawal::Completed {
            amount,
            balance: account.balance,
        })
    }

    pub fn balance_of(number: AccountNumber, ledger: &Ledger) -> AccountResult<Decimal> {
        Self::find_by_number(number, ledger).map(Account::balance)
    }

    /// Renders the account card.
    pub fn display(number: AccountNumber, ledger: &Ledger) -> AccountResult<String> {
        Self::find_by_number(number, ledger).map(Account::to_string)
    }

    /// Every account, in the order they were opened.
    pub fn list_all(ledger: &Ledger) -> impl Iterator<Item = &Account> + '_ {
        ledger.values()
    }

    /// Get the account's number.
    pub fn number(&self) -> AccountNumber {
        self.number
    }

    /// Get the account's holder.
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Get the account's balance.
    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "-----------------------------";
        writeln!(f, "{RULE}")?;
        writeln!(f, "Account Number: {}", self.number)?;
        writeln!(f, "Holder Name:    {}", self.holder)?;
        writeln!(f, "Balance:        {}", currency(self.balance))?;
        write!(f, "{RULE}")
    }
}
