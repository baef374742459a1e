//! Interactive numbered menu over a [`CourseStore`].
//!
//! Input is consumed a line at a time and only the first blank-separated
//! token of each line is used; blank lines are skipped. End of input
//! behaves like choosing Exit.
//!
//! When the registration file could not be read at start, the automatic
//! saves (after a delete, on Exit) are off until the user saves with 6,
//! so an unread file is never overwritten by accident.

use std::io::{self, BufRead, Write};

use coursereg_core::CourseId;
use coursereg_storage::CourseStore;

use crate::render;

const MENU: &str = "\
Course Registration System
1. Add course
2. Display all courses
3. Search by ID
4. Update course
5. Delete course
6. Save to file
7. Exit (auto-save)";

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    /// Exit was chosen (or input ended) and the file was saved.
    Saved,
    /// Exit was chosen but the final save failed.
    SaveFailed,
    /// Exit was chosen with automatic saving off; nothing was written.
    Unsaved,
    /// A menu choice was not a number; the session ends without saving.
    InvalidInput,
}

enum Step {
    Continue,
    Quit(ShellExit),
}

pub struct Shell<'a, R, W> {
    store: &'a mut CourseStore,
    input: R,
    out: W,
    autosave: bool,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a mut CourseStore, input: R, out: W) -> Self {
        Shell {
            store,
            input,
            out,
            autosave: true,
        }
    }

    /// Turns off saving on delete and on Exit until an explicit save.
    pub fn without_autosave(mut self) -> Self {
        self.autosave = false;
        self
    }

    /// Runs the menu until Exit, end of input, or an unreadable choice.
    pub fn run(mut self) -> io::Result<ShellExit> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "{MENU}")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return self.exit();
            };
            let Ok(choice) = choice.parse::<i32>() else {
                writeln!(self.out, "Invalid input.")?;
                return Ok(ShellExit::InvalidInput);
            };

            let step = match choice {
                1 => self.add()?,
                2 => self.display()?,
                3 => self.search()?,
                4 => self.update()?,
                5 => self.delete()?,
                6 => self.save()?,
                7 => return self.exit(),
                _ => {
                    writeln!(self.out, "Invalid choice. Please select 1..7.")?;
                    Step::Continue
                }
            };
            if let Step::Quit(exit) = step {
                return Ok(exit);
            }
        }
    }

    fn add(&mut self) -> io::Result<Step> {
        let Some(id) = self.prompt_id("Enter ID (integer): ")? else {
            return Ok(Step::Continue);
        };
        let Some(code) = self.prompt("Enter course code (no spaces): ")? else {
            return Ok(Step::Continue);
        };
        let Some(status) =
            self.prompt("Enter status (no spaces, e.g., Active/Closed): ")?
        else {
            return Ok(Step::Continue);
        };

        match self.store.add(id, &code, &status) {
            Ok(()) => writeln!(self.out, "Course added.")?,
            Err(err) => writeln!(self.out, "{}", render::core_error(&err))?,
        }
        Ok(Step::Continue)
    }

    fn display(&mut self) -> io::Result<Step> {
        render::write_table(&mut self.out, self.store.table().as_slice())?;
        Ok(Step::Continue)
    }

    fn search(&mut self) -> io::Result<Step> {
        let Some(id) = self.prompt_id("Enter ID to search: ")? else {
            return Ok(Step::Continue);
        };
        match self.store.search(id) {
            Ok(course) => writeln!(self.out, "{}", render::found(&course))?,
            Err(err) => writeln!(self.out, "{}", render::core_error(&err))?,
        }
        Ok(Step::Continue)
    }

    fn update(&mut self) -> io::Result<Step> {
        let Some(id) = self.prompt_id("Enter ID to update: ")? else {
            return Ok(Step::Continue);
        };
        if self.store.find_by_id(id).is_none() {
            writeln!(self.out, "Course with ID {id} not found.")?;
            return Ok(Step::Continue);
        }
        let Some(code) = self.prompt("Enter new course code (no spaces): ")? else {
            return Ok(Step::Continue);
        };
        let Some(status) = self.prompt("Enter new status (no spaces): ")? else {
            return Ok(Step::Continue);
        };

        match self.store.update(id, &code, &status) {
            Ok(()) => writeln!(self.out, "Course updated.")?,
            Err(err) => writeln!(self.out, "{}", render::core_error(&err))?,
        }
        Ok(Step::Continue)
    }

    /// Deletions are written to disk straight away.
    fn delete(&mut self) -> io::Result<Step> {
        let Some(id) = self.prompt_id("Enter ID to delete: ")? else {
            return Ok(Step::Continue);
        };
        match self.store.delete(id) {
            Ok(_) => {
                writeln!(self.out, "Course deleted.")?;
                if !self.autosave {
                    writeln!(self.out, "Not saved yet; choose 6 to write the file.")?;
                } else if let Err(err) = self.store.save() {
                    writeln!(self.out, "{}", render::storage_error(&err))?;
                }
            }
            Err(err) => writeln!(self.out, "{}", render::core_error(&err))?,
        }
        Ok(Step::Continue)
    }

    fn save(&mut self) -> io::Result<Step> {
        match self.store.save() {
            Ok(saved) => {
                self.autosave = true;
                writeln!(
                    self.out,
                    "Saved {saved} record(s) to '{}'.",
                    self.store.path().display()
                )?;
            }
            Err(err) => writeln!(self.out, "{}", render::storage_error(&err))?,
        }
        Ok(Step::Continue)
    }

    fn exit(&mut self) -> io::Result<ShellExit> {
        if !self.autosave {
            writeln!(
                self.out,
                "Not saved: '{}' could not be read at start. Goodbye!",
                self.store.path().display()
            )?;
            return Ok(ShellExit::Unsaved);
        }
        match self.store.save() {
            Ok(saved) => {
                writeln!(self.out, "Saved {saved} record(s). Goodbye!")?;
                Ok(ShellExit::Saved)
            }
            Err(err) => {
                writeln!(self.out, "{}", render::storage_error(&err))?;
                Ok(ShellExit::SaveFailed)
            }
        }
    }

    /// Prints `label` and returns the first token of the next non-blank
    /// line, or `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                return Ok(None);
            }
            if let Some(token) = line.split_whitespace().next() {
                return Ok(Some(token.to_string()));
            }
        }
    }

    fn prompt_id(&mut self, label: &str) -> io::Result<Option<CourseId>> {
        let Some(token) = self.prompt(label)? else {
            return Ok(None);
        };
        match token.parse::<CourseId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.out, "Invalid ID.")?;
                Ok(None)
            }
        }
    }
}
