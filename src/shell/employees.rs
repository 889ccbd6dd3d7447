use super::{parse_number, parse_salary, Console, InputError, ShellError, ShellResult};
use crate::features::{currency, Employee, EmployeeError, EmployeeId, Roster};
use std::io::{BufRead, Write};

const MENU: &str = "\
Employee Management System
1. Add new employee
2. Update employee details
3. Delete employee
4. Search by ID or name
5. Display all employees
6. Payroll menu
7. Vacation menu
0. Exit";

const SEARCH_MENU: &str = "\
a) Search by ID
b) Search by name";

const PAYROLL_MENU: &str = "\
Payroll Menu
1. List payroll (all employees and salaries)
2. Pay an employee (simulate)
3. Adjust salary";

const VACATION_MENU: &str = "\
Vacation Menu
1. Add vacation days to employee
2. View employee vacation days";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Add,
    Update,
    Delete,
    Search,
    DisplayAll,
    Payroll,
    Vacation,
    Exit,
}

impl Command {
    fn from_choice(choice: &str) -> Option<Self> {
        use Command::*;

        match choice {
            "1" => Some(Add),
            "2" => Some(Update),
            "3" => Some(Delete),
            "4" => Some(Search),
            "5" => Some(DisplayAll),
            "6" => Some(Payroll),
            "7" => Some(Vacation),
            "0" => Some(Exit),
            _ => None,
        }
    }
}

/// Runs the employee menu until the user exits or input runs out.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    roster: &mut Roster,
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
            Some(command) => dispatch(command, console, roster),
            None => Err(InputError::UnknownOption.into()),
        };
        console.settle(outcome)?;
    }

    console.say("Exiting Employee Management System.")?;
    Ok(())
}

fn dispatch<R: BufRead, W: Write>(
    command: Command,
    console: &mut Console<R, W>,
    roster: &mut Roster,
) -> ShellResult {
    use Command::*;

    match command {
        Add => add(console, roster),
        Update => update(console, roster),
        Delete => delete(console, roster),
        Search => search(console, roster),
        DisplayAll => display_all(console, roster),
        Payroll => payroll(console, roster),
        Vacation => vacation(console, roster),
        Exit => Ok(()),
    }
}

fn ask_id<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    label: &str,
) -> ShellResult<EmployeeId> {
    let input = console.ask(label)?;
    Ok(parse_number(&input, InputError::InvalidId)?)
}

/// Every lookup except update answers a plain `Not found.`
fn lookup(id: EmployeeId, roster: &Roster) -> ShellResult<&Employee> {
    Employee::find_by_id(id, roster).map_err(|EmployeeError::NotFound(id)| {
        debug!("no employee {id}");
        ShellError::NotFound
    })
}

fn add<R: BufRead, W: Write>(console: &mut Console<R, W>, roster: &mut Roster) -> ShellResult {
    let name = console.ask("Name: ")?;
    let position = console.ask("Position: ")?;
    let salary = parse_salary(&console.ask("Salary: ")?)?;

    let employee = Employee::add(&name, &position, salary, roster);
    console.say(format!("Added employee with ID {}.", employee.id()))?;
    Ok(())
}

/// Blank answers keep the current value.
fn update<R: BufRead, W: Write>(console: &mut Console<R, W>, roster: &mut Roster) -> ShellResult {
    let id = ask_id(console, "Employee ID to update: ")?;
    let current = Employee::find_by_id(id, roster)?.clone();

    let name = console.ask(&format!("Name ({}): ", current.name()))?;
    let name = if name.is_empty() {
        current.name()
    } else {
        name.as_str()
    };

    let position = console.ask(&format!("Position ({}): ", current.position()))?;
    let position = if position.is_empty() {
        current.position()
    } else {
        position.as_str()
    };

    let salary = console.ask(&format!("Salary ({}): ", current.salary()))?;
    let salary = if salary.is_empty() {
        current.salary()
    } else {
        parse_salary(&salary)?
    };

    Employee::update(id, name, position, salary, roster)?;
    console.say("Employee updated.")?;
    Ok(())
}

fn delete<R: BufRead, W: Write>(console: &mut Console<R, W>, roster: &mut Roster) -> ShellResult {
    let id = ask_id(console, "Employee ID to delete: ")?;
    if !Employee::delete(id, roster) {
        return Err(ShellError::NotFound);
    }

    console.say("Deleted.")?;
    Ok(())
}

fn search<R: BufRead, W: Write>(console: &mut Console<R, W>, roster: &Roster) -> ShellResult {
    console.say(SEARCH_MENU)?;
    let choice = console.ask("Choice: ")?.to_lowercase();

    match choice.as_str() {
        "a" => {
            let id = ask_id(console, "ID: ")?;
            console.say(lookup(id, roster)?)?;
        }
        "b" => {
            let query = console.ask("Name query: ")?;
            let matches = Employee::search_by_name(&query, roster);
            if matches.is_empty() {
                console.say("No matches.")?;
            }
            for employee in matches {
                console.say(employee)?;
            }
        }
        _ => return Err(InputError::UnknownChoice.into()),
    }
    Ok(())
}

fn display_all<R: BufRead, W: Write>(console: &mut Console<R, W>, roster: &Roster) -> ShellResult {
    if roster.is_empty() {
        console.say("No employees.")?;
    }
    for employee in Employee::list_all(roster) {
        console.say(employee)?;
    }
    Ok(())
}

fn payroll<R: BufRead, W: Write>(console: &mut Console<R, W>, roster: &mut Roster) -> ShellResult {
    console.say(PAYROLL_MENU)?;

    match console.ask("Choice: ")?.as_str() {
        "1" => {
            for employee in Employee::list_all(roster) {
                console.say(format!(
                    "{}: {} - {}",
                    employee.id(),
                    employee.name(),
                    currency(employee.salary())
                ))?;
            }
        }
        "2" => {
            let id = ask_id(console, "Employee ID to pay: ")?;
            let employee = lookup(id, roster)?;
            info!("simulated payment of {} to employee {id}", employee.salary());
            console.say(format!(
                "Paid {} {} (simulated).",
                employee.name(),
                currency(employee.salary())
            ))?;
        }
        "3" => {
            let id = ask_id(console, "Employee ID to adjust: ")?;
            let current = lookup(id, roster)?.salary();
            let label = format!("Current salary {}. New salary: ", currency(current));
            let salary = parse_salary(&console.ask(&label)?)?;

            Employee::adjust_salary(id, salary, roster)?;
            console.say("Salary updated.")?;
        }
        _ => return Err(InputError::UnknownChoice.into()),
    }
    Ok(())
}

fn vacation<R: BufRead, W: Write>(console: &mut Console<R, W>, roster: &mut Roster) -> ShellResult {
    console.say(VACATION_MENU)?;

    match console.ask("Choice: ")?.as_str() {
        "1" => {
            let id = ask_id(console, "Employee ID: ")?;
            let days = parse_number(&console.ask("Days to add: ")?, InputError::InvalidNumber)?;

            Employee::add_vacation_days(id, days, roster);
            console.say("Added (if employee exists).")?;
        }
        "2" => {
            let id = ask_id(console, "Employee ID: ")?;
            let employee = lookup(id, roster)?;
            console.say(format!(
                "{} has {} vacation days.",
                employee.name(),
                employee.vacation_days()
            ))?;
        }
        _ => return Err(InputError::UnknownChoice.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1" => Some(Command::Add) ; "add")]
    #[test_case("7" => Some(Command::Vacation) ; "vacation")]
    #[test_case("0" => Some(Command::Exit) ; "exit")]
    #[test_case("8" => None ; "out of range")]
    #[test_case("exit" => None ; "words are not options")]
    fn menu_choices(choice: &str) -> Option<Command> {
        Command::from_choice(choice)
    }
}
