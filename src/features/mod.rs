mod account;
mod employee;
mod money;
mod store;

pub use self::{
    account::{Account, AccountError, AccountNumber, AccountResult, Ledger, Withdrawal},
    employee::{Employee, EmployeeError, EmployeeId, EmployeeResult, Roster},
    money::currency,
    store::{RecordId, Store},
};
