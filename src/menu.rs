//! The interactive numbered menu.
//!
//! The menu reads from any `BufRead` and writes to any `Write`, so `main` wires it to stdin and
//! stdout while tests drive it with in-memory buffers. Every choice maps to one command handler.
//! Choosing Exit, or reaching the end of input, saves the journal and returns. A failed save is
//! written to `output` as well as logged.

use crate::args::{ActivityArgs, DeleteArgs, UpdateArgs};
use crate::commands::{self, Out};
use crate::error::{ErrorType, IntoResult};
use crate::{App, Result};
use anyhow::Context;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::io::{BufRead, Write};
use tracing::{debug, error, trace};

const MENU: &str = "\
Wellness Journal
1. Add Wellness Activity
2. View Wellness Activities
3. Update Wellness Activity
4. Delete Wellness Activity
5. Summarize Activities
6. Exit";

/// Runs the menu until the user exits or input ends.
///
/// Command failures (a bad index, an unparseable date) are written to `output` and the menu
/// continues. Only a failure to read from `input` or write to `output` is returned.
pub fn run(app: &mut App, input: impl BufRead, output: impl Write) -> Result<()> {
    Menu { app, input, output }.run()
}

struct Menu<'a, R, W> {
    app: &'a mut App,
    input: R,
    output: W,
}

impl<R, W> Menu<'_, R, W>
where
    R: BufRead,
    W: Write,
{
    fn run(&mut self) -> Result<()> {
        loop {
            self.say(format!("\n{MENU}"))?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                debug!("End of input, exiting");
                break;
            };
            trace!("Menu choice '{choice}'");
            let keep_going = match choice.trim() {
                "1" => self.add()?,
                "2" => {
                    let out = commands::list(self.app);
                    self.report(out)?;
                    true
                }
                "3" => self.update()?,
                "4" => self.delete()?,
                "5" => {
                    let out = commands::summary(self.app);
                    self.report(out)?;
                    true
                }
                "6" => false,
                _ => {
                    self.say("Invalid choice. Please try again.")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        if let Err(e) = self.app.save() {
            error!("Error saving activity data: {e}");
            self.say(format!("Error saving activity data: {e}"))?;
        }
        self.say("Exiting the application...")
    }

    /// Each action returns `false` when input ran out part way through.
    fn add(&mut self) -> Result<bool> {
        let type_prompt = "Enter Activity Type (Exercise, Study, Meditation, etc.): ";
        let Some(args) = self.read_activity(type_prompt, "")? else {
            return Ok(false);
        };
        let out = commands::add(self.app, args);
        self.report(out)?;
        Ok(true)
    }

    fn update(&mut self) -> Result<bool> {
        let Some(index) = self.read_index("Enter Activity Index to Update: ")? else {
            return Ok(false);
        };
        let Some(index) = index else {
            return Ok(true);
        };
        let Some(args) = self.read_activity("Enter New Activity Type: ", "New ")? else {
            return Ok(false);
        };
        let out = commands::update(self.app, UpdateArgs::new(index, args));
        self.report(out)?;
        Ok(true)
    }

    fn delete(&mut self) -> Result<bool> {
        let Some(index) = self.read_index("Enter Activity Index to Delete: ")? else {
            return Ok(false);
        };
        if let Some(index) = index {
            let out = commands::delete(self.app, DeleteArgs::new(index));
            self.report(out)?;
        }
        Ok(true)
    }

    fn read_activity(&mut self, type_prompt: &str, new: &str) -> Result<Option<ActivityArgs>> {
        let Some(activity_type) = self.prompt(type_prompt)? else {
            return Ok(None);
        };
        let Some(duration) = self.prompt(&format!("Enter {new}Duration (in minutes): "))? else {
            return Ok(None);
        };
        let Some(date) = self.prompt(&format!("Enter {new}Date (dd.MM.yyyy): "))? else {
            return Ok(None);
        };
        let Some(notes) = self.prompt(&format!("Enter {new}Notes: "))? else {
            return Ok(None);
        };
        Ok(Some(ActivityArgs::new(
            activity_type,
            duration.trim(),
            date.trim(),
            notes,
        )))
    }

    /// `None` on end of input, `Some(None)` if the index was not a number (already reported).
    fn read_index(&mut self, prompt: &str) -> Result<Option<Option<i64>>> {
        let Some(line) = self.prompt(prompt)? else {
            return Ok(None);
        };
        match line.trim().parse::<i64>() {
            Ok(index) => Ok(Some(Some(index))),
            Err(_) => {
                self.say(format!("Error: Invalid index '{}', expected a number", line.trim()))?;
                Ok(Some(None))
            }
        }
    }

    fn report<T>(&mut self, out: Result<Out<T>>) -> Result<()>
    where
        T: Serialize + Clone + Debug,
    {
        match out {
            Ok(out) => self.say(out.message()),
            Err(e) => {
                debug!("Command failed: {e:?}");
                self.say(format!("Error: {e}"))
            }
        }
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")
            .and_then(|_| self.output.flush())
            .context("Unable to write to the terminal")
            .pub_result(ErrorType::Io)?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Unable to read from the terminal")
            .pub_result(ErrorType::Io)?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")
            .context("Unable to write to the terminal")
            .pub_result(ErrorType::Io)
    }
}
