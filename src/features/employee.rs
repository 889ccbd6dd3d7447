use super::money::{currency, round_serialize};
use super::store::{snapshot, RecordId, Store};
use rust_decimal::prelude::*;
use serde::Serialize;
use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct EmployeeId(i32);

impl EmployeeId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }
}

impl RecordId for EmployeeId {
    const FIRST: Self = EmployeeId(1);

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Everyone on staff during this run.
pub type Roster = Store<EmployeeId, Employee>;

#[derive(Error, Debug, PartialEq)]
pub enum EmployeeError {
    #[error("Employee not found.")]
    NotFound(EmployeeId),
}

pub type EmployeeResult<T> = Result<T, EmployeeError>;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    position: String,

    /// May go negative, nothing guards it
    #[serde(serialize_with = "round_serialize")]
    salary: Decimal,

    vacation_days: i32,
}

impl Employee {
    pub fn add(name: &str, position: &str, salary: Decimal, roster: &mut Roster) -> Employee {
        let employee = roster
            .insert_new(|id| Employee {
                id,
                name: name.to_owned(),
                position: position.to_owned(),
                salary,
                vacation_days: 0,
            })
            .clone();

        info!("added employee {} ({})", employee.id, employee.name);
        debug!("{}", snapshot(&employee));
        employee
    }

    pub fn find_by_id(id: EmployeeId, roster: &Roster) -> EmployeeResult<&Employee> {
        roster.get(id).ok_or(EmployeeError::NotFound(id))
    }

    fn find_mut(id: EmployeeId, roster: &mut Roster) -> EmployeeResult<&mut Employee> {
        roster.get_mut(id).ok_or(EmployeeError::NotFound(id))
    }

    /// Overwrites name, position and salary. Callers fill in unchanged fields.
    pub fn update(
        id: EmployeeId,
        name: &str,
        position: &str,
        salary: Decimal,
        roster: &mut Roster,
    ) -> EmployeeResult<Employee> {
        let employee = Self::find_mut(id, roster)?;
        employee.name = name.to_owned();
        employee.position = position.to_owned();
        employee.salary = salary;

        info!("updated employee {id}");
        debug!("{}", snapshot(&*employee));
        Ok(employee.clone())
    }

    pub fn adjust_salary(
        id: EmployeeId,
        salary: Decimal,
        roster: &mut Roster,
    ) -> EmployeeResult<Employee> {
        let employee = Self::find_mut(id, roster)?;
        let previous = std::mem::replace(&mut employee.salary, salary);

        info!("salary of employee {id} changed from {previous} to {salary}");
        Ok(employee.clone())
    }

    /// Returns whether the employee existed.
    pub fn delete(id: EmployeeId, roster: &mut Roster) -> bool {
        let removed = roster.remove(id);
        if removed {
            info!("deleted employee {id}");
        }
        removed
    }

    /// Case-insensitive substring match on the name. An empty query matches everyone.
    pub fn search_by_name<'a>(query: &str, roster: &'a Roster) -> Vec<&'a Employee> {
        let query = query.to_lowercase();
        roster
            .values()
            .filter(|employee| employee.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Unknown ids are ignored.
    pub fn add_vacation_days(id: EmployeeId, days: i32, roster: &mut Roster) {
        match roster.get_mut(id) {
            Some(employee) => {
                employee.vacation_days = employee.vacation_days.saturating_add(days);
                info!(
                    "employee {id} now has {} vacation days",
                    employee.vacation_days
                );
            }
            None => debug!("no employee {id}, vacation days not added"),
        }
    }

    /// Ascending id order.
    pub fn list_all(roster: &Roster) -> impl Iterator<Item = &Employee> + '_ {
        roster.values()
    }

    /// Get the employee's id.
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Get the employee's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the employee's position.
    pub fn position(&self) -> &str {
        &self.position
    }

    /// Get the employee's salary.
    pub fn salary(&self) -> Decimal {
        self.salary
    }

    /// Get the employee's vacation days.
    pub fn vacation_days(&self) -> i32 {
        self.vacation_days
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "----------------------------------------";
        writeln!(f, "{RULE}")?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Position: {}", self.position)?;
        writeln!(f, "Salary: {}", currency(self.salary))?;
        writeln!(f, "Vacation Days: {}", self.vacation_days)?;
        write!(f, "{RULE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn roster_of(names: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for name in names {
            Employee::add(name, "Clerk", dec!(1000), &mut roster);
        }
        roster
    }

    fn names(found: &[&Employee]) -> Vec<String> {
        found.iter().map(|e| e.name().to_owned()).collect()
    }

    #[test]
    fn ids_start_at_one() {
        let mut roster = Roster::new();
        let first = Employee::add("Anna", "Engineer", dec!(5000), &mut roster);
        let second = Employee::add("Bob", "Sales", dec!(4000), &mut roster);

        assert_eq!(first.id(), EmployeeId::new(1));
        assert_eq!(second.id(), EmployeeId::new(2));
        assert_eq!(first.vacation_days(), 0);
    }

    #[test]
    fn add_accepts_anything() {
        let mut roster = Roster::new();
        let nobody = Employee::add("", "", dec!(-10), &mut roster);

        assert_eq!(nobody.name(), "");
        assert_eq!(nobody.salary(), dec!(-10));
    }

    #[test]
    fn deleted_id_is_never_reused() {
        let mut roster = roster_of(&["Anna", "Bob"]);
        assert!(Employee::delete(EmployeeId::new(2), &mut roster));

        let next = Employee::add("Carl", "Clerk", dec!(1), &mut roster);
        assert_eq!(next.id(), EmployeeId::new(3));
    }

    #[test]
    fn delete_existing_then_lookup_fails() {
        let mut roster = roster_of(&["Anna"]);
        let id = EmployeeId::new(1);

        assert!(Employee::delete(id, &mut roster));
        assert_eq!(
            Employee::find_by_id(id, &roster).unwrap_err(),
            EmployeeError::NotFound(id)
        );
    }

    #[test]
    fn delete_unknown_leaves_roster() {
        let mut roster = roster_of(&["Anna", "Bob"]);

        assert!(!Employee::delete(EmployeeId::new(9), &mut roster));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn update_overwrites_all_fields() {
        let mut roster = roster_of(&["Anna"]);
        let id = EmployeeId::new(1);
        let updated = Employee::update(id, "Anna Smith", "Lead", dec!(7000), &mut roster).unwrap();

        assert_eq!(updated.name(), "Anna Smith");
        assert_eq!(updated.position(), "Lead");
        assert_eq!(updated.salary(), dec!(7000));
        assert_eq!(Employee::find_by_id(id, &roster).unwrap(), &updated);
    }

    #[test]
    fn update_unknown_is_not_found() {
        let mut roster = roster_of(&["Anna"]);
        let missing = EmployeeId::new(5);

        assert_eq!(
            Employee::update(missing, "x", "y", dec!(1), &mut roster).unwrap_err(),
            EmployeeError::NotFound(missing)
        );
    }

    #[test]
    fn adjust_salary_keeps_other_fields() {
        let mut roster = roster_of(&["Anna"]);
        let adjusted =
            Employee::adjust_salary(EmployeeId::new(1), dec!(1200.5), &mut roster).unwrap();

        assert_eq!(adjusted.salary(), dec!(1200.5));
        assert_eq!(adjusted.name(), "Anna");
        assert_eq!(adjusted.position(), "Clerk");
    }

    #[test_case("ann", &["Anna", "Hannah"] ; "substring")]
    #[test_case("ANN", &["Anna", "Hannah"] ; "case insensitive")]
    #[test_case("bob", &["Bob"] ; "whole name")]
    #[test_case("zed", &[] ; "no match")]
    #[test_case("", &["Anna", "Hannah", "Bob"] ; "empty query matches all")]
    fn search_by_name(query: &str, expected: &[&str]) {
        let roster = roster_of(&["Anna", "Hannah", "Bob"]);
        let found = Employee::search_by_name(query, &roster);

        assert_eq!(names(&found), expected);
    }

    #[test]
    fn vacation_days_accumulate() {
        let mut roster = roster_of(&["Anna"]);
        let id = EmployeeId::new(1);

        Employee::add_vacation_days(id, 5, &mut roster);
        Employee::add_vacation_days(id, 3, &mut roster);
        Employee::add_vacation_days(id, -2, &mut roster);

        assert_eq!(Employee::find_by_id(id, &roster).unwrap().vacation_days(), 6);
    }

    #[test]
    fn vacation_days_for_unknown_id_is_ignored() {
        let mut roster = roster_of(&["Anna"]);
        let before: Vec<Employee> = Employee::list_all(&roster).cloned().collect();

        Employee::add_vacation_days(EmployeeId::new(7), 5, &mut roster);

        let after: Vec<Employee> = Employee::list_all(&roster).cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn list_all_by_ascending_id() {
        let mut roster = roster_of(&["Carl", "Anna", "Bob"]);
        Employee::delete(EmployeeId::new(2), &mut roster);
        Employee::add("Dora", "Clerk", dec!(1), &mut roster);

        let ids: Vec<_> = Employee::list_all(&roster).map(Employee::id).collect();
        assert_eq!(ids, vec![EmployeeId::new(1), EmployeeId::new(3), EmployeeId::new(4)]);
    }

    #[test]
    fn card_shows_all_fields() {
        let mut roster = roster_of(&["Anna"]);
        Employee::add_vacation_days(EmployeeId::new(1), 4, &mut roster);
        let card = Employee::find_by_id(EmployeeId::new(1), &roster).unwrap().to_string();

        assert!(card.contains("ID: 1\n"));
        assert!(card.contains("Name: Anna\n"));
        assert!(card.contains("Position: Clerk\n"));
        assert!(card.contains("Salary: $1,000.00\n"));
        assert!(card.contains("Vacation Days: 4\n"));
    }
}
