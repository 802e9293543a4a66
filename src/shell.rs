//! Line-oriented menu shell.
//!
//! Two states: awaiting selection and terminated. Empty input (or end of
//! input) terminates; "1" runs the create-project flow; anything else is an
//! invalid selection. Domain errors from a flow are caught here, reported,
//! and the loop continues.

use std::io::{BufRead, Write};

use rust_decimal::Decimal;

use crate::models::Project;
use crate::service::ProjectService;
use crate::{Error, Result};

pub struct Shell<R, W> {
    service: ProjectService,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(service: ProjectService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            match line.trim() {
                "" => break,
                "1" => {
                    if let Err(err) = self.create_project() {
                        tracing::error!("Create project failed: {err}");
                        writeln!(self.output, "\nError: {err} Try again.")?;
                    }
                }
                other => {
                    writeln!(self.output, "\n{other} is not a valid selection. Try again.")?;
                }
            }
        }

        writeln!(self.output, "Exiting the menu.")?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "These are the available selections. Press the Enter key to quit:"
        )?;
        writeln!(self.output, "   1) Add a project")?;
        Ok(())
    }

    fn create_project(&mut self) -> Result<()> {
        let project_name = self.prompt_string("Enter the project name")?;
        let estimated_hours = self.prompt_decimal("Enter the estimated hours")?;
        let actual_hours = self.prompt_decimal("Enter the actual hours")?;
        let difficulty = self.prompt_difficulty()?;
        let notes = self.prompt_string("Enter the project notes")?;

        let project = Project {
            project_name,
            estimated_hours,
            actual_hours,
            difficulty: Some(difficulty),
            notes,
            ..Project::default()
        };

        let created = self.service.add_project(project)?;
        writeln!(
            self.output,
            "You have successfully created project:{created}"
        )?;
        Ok(())
    }

    /// Prompt for free text. Blank input means "no value".
    fn prompt_string(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        let line = self
            .read_line()?
            .ok_or_else(|| Error::InvalidInput("unexpected end of input".to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    /// Prompt for a decimal with at most two decimal places; accepted values
    /// are rescaled to exactly two. A parse failure is a domain error caught
    /// by the outer loop.
    fn prompt_decimal(&mut self, prompt: &str) -> Result<Option<Decimal>> {
        let Some(text) = self.prompt_string(prompt)? else {
            return Ok(None);
        };

        let mut value: Decimal = text
            .parse()
            .map_err(|_| Error::InvalidInput(format!("{text} is not a valid decimal number.")))?;
        if value.scale() > 2 {
            return Err(Error::InvalidInput(format!(
                "{text} has more than two decimal places."
            )));
        }
        value.rescale(2);
        Ok(Some(value))
    }

    /// Prompt for the difficulty rating, re-prompting without bound until an
    /// integer in [1,5] is supplied. Bad input here never raises; it is
    /// recovered locally.
    fn prompt_difficulty(&mut self) -> Result<i32> {
        loop {
            write!(self.output, "Enter the project difficulty (1-5): ")?;
            self.output.flush()?;

            let line = self
                .read_line()?
                .ok_or_else(|| Error::InvalidInput("unexpected end of input".to_string()))?;
            let text = line.trim();

            match text.parse::<i32>() {
                Ok(value @ 1..=5) => return Ok(value),
                _ => writeln!(
                    self.output,
                    "{text} is not a valid difficulty. Enter a number from 1 to 5."
                )?,
            }
        }
    }

    /// Read one line; `None` means end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::db::Database;

    fn run_shell(input: &str) -> (ProjectService, String) {
        let db = Database::open_memory().expect("in-memory database");
        db.migrate().expect("migrations");
        let service = ProjectService::new(db);

        let mut output = Vec::new();
        let mut shell = Shell::new(service.clone(), Cursor::new(input.to_string()), &mut output);
        shell.run().expect("shell run");

        (service, String::from_utf8(output).expect("utf8 output"))
    }

    #[test]
    fn empty_input_exits() {
        let (_, output) = run_shell("\n");
        assert!(output.contains("Exiting the menu."));
    }

    #[test]
    fn invalid_selection_reports_and_redisplays_menu() {
        let (_, output) = run_shell("9\n\n");
        assert!(output.contains("9 is not a valid selection."));
        // Menu printed once for the bad selection and once more before quit.
        assert_eq!(output.matches("1) Add a project").count(), 2);
    }

    #[test]
    fn more_than_two_decimal_places_is_rejected() {
        let input = "1\nHang a door\n4.125\n\n";
        let (service, output) = run_shell(input);

        assert!(output.contains("4.125 has more than two decimal places."));
        assert!(service.fetch_project(1).expect("fetch").is_none());
    }

    #[test]
    fn decimal_input_is_rescaled_to_two_places() {
        let input = "1\nHang a door\n4.5\n3\n3\nnotes\n\n";
        let (service, _) = run_shell(input);

        let created = service.fetch_project(1).expect("fetch").expect("project");
        assert_eq!(created.estimated_hours, Some("4.50".parse().unwrap()));
        assert_eq!(created.actual_hours, Some("3.00".parse().unwrap()));
    }

    #[test]
    fn blank_text_input_is_stored_as_no_value() {
        // Notes left blank; the insert binds a typed null.
        let input = "1\nHang a door\n4\n3\n3\n\n\n";
        let (service, _) = run_shell(input);

        let created = service.fetch_project(1).expect("fetch").expect("project");
        assert_eq!(created.notes, None);
    }
}
