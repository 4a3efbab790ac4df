use std::io::{BufRead, Write};

use anyhow::Result;
use scale_core::{Good, Session};
use tracing::debug;

use crate::display::{print_catalog, print_history, Formatter};
use crate::intent::{Intent, HELP};

/// Line oriented front end for a [`Session`].
pub struct Shell<R, W> {
    session: Session,
    fmt: Formatter,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(session: Session, fmt: Formatter, input: R, out: W) -> Self {
        Self {
            session,
            fmt,
            input,
            out,
        }
    }

    /// Reads and applies intents until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "{} goods loaded. Type `help` for commands.",
            self.session.catalog().len()
        )?;

        loop {
            self.prompt()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                break;
            }

            match line.parse::<Intent>() {
                Ok(intent) => {
                    debug!(?intent, "applying intent");
                    if !self.apply(intent)? {
                        break;
                    }
                }
                Err(e) => writeln!(self.out, "{}", e)?,
            }
        }

        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        match self.session.active_good() {
            Some(good) => write!(
                self.out,
                "[{} | {}] > ",
                good.name,
                self.fmt.input_label(good, self.session.mode())
            )?,
            None => write!(self.out, "[no goods] > ")?,
        }
        self.out.flush()?;

        Ok(())
    }

    fn find(&mut self, query: &str) -> Result<Option<Good>> {
        let good = self.session.find_good(query).cloned();
        if good.is_none() {
            writeln!(self.out, "No good matches {:?}.", query)?;
        }

        Ok(good)
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.out, "{} [y/N] ", question)?;
        self.out.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    fn show_result(&mut self) -> Result<()> {
        let result = self.session.live_result();
        write!(self.out, "= {}", self.fmt.result(result.as_ref()))?;

        if self.session.can_commit() {
            writeln!(self.out, "  (`save` adds it to history)")?;
        } else {
            writeln!(self.out, "  (enter a positive amount)")?;
        }

        Ok(())
    }

    /// Returns `false` once the user asks to leave.
    fn apply(&mut self, intent: Intent) -> Result<bool> {
        match intent {
            Intent::Noop => {}
            Intent::Quit => return Ok(false),
            Intent::Help => writeln!(self.out, "{}", HELP)?,
            Intent::Goods => {
                let active = self.session.active_good().map(|good| good.id);
                print_catalog(&mut self.out, &self.fmt, self.session.catalog(), active)?;
            }
            Intent::Select(query) => {
                if let Some(good) = self.find(&query)? {
                    self.session.select_good(good.id);
                    writeln!(self.out, "Selected {} at {}.", good.name, self.fmt.unit_price(&good))?;
                }
            }
            Intent::Mode(mode) => {
                match mode {
                    Some(mode) => self.session.set_mode(mode),
                    None => {
                        self.session.toggle_mode();
                    }
                }
                writeln!(self.out, "Mode: {}.", self.session.mode())?;
            }
            Intent::Input(raw) => {
                self.session.set_pending_input(&raw);
                self.show_result()?;
            }
            Intent::Save => match self.session.commit_conversion() {
                Some(tx) => writeln!(
                    self.out,
                    "Saved {}: {} -> {}.",
                    tx.good_name,
                    self.fmt.amount(tx.input_value, tx.input_unit),
                    self.fmt.amount(tx.result_value, tx.result_unit),
                )?,
                None => writeln!(self.out, "Nothing to save, enter a positive amount first.")?,
            },
            Intent::History => {
                if self.session.history().is_empty() {
                    writeln!(self.out, "No transactions yet.")?;
                } else {
                    print_history(&mut self.out, &self.fmt, self.session.history())?;
                }
            }
            Intent::Clear => {
                self.session.clear_history();
                writeln!(self.out, "History cleared.")?;
            }
            Intent::New {
                name,
                price,
                unit,
                color,
            } => match self.session.add_good(&name, price, unit, color) {
                Ok(good) => writeln!(
                    self.out,
                    "Added {} at {}.",
                    good.name,
                    self.fmt.unit_price(&good)
                )?,
                Err(e) => writeln!(self.out, "Not added: {}.", e)?,
            },
            Intent::Price { good, price } => {
                if let Some(good) = self.find(&good)? {
                    match self.session.update_good_price(good.id, price) {
                        Ok(true) => writeln!(
                            self.out,
                            "{} now costs {}.",
                            good.name,
                            self.fmt.unit_price(&Good {
                                price_per_unit: price,
                                ..good.clone()
                            })
                        )?,
                        Ok(false) => writeln!(self.out, "No good matches {:?}.", good.name)?,
                        Err(e) => writeln!(self.out, "Not updated: {}.", e)?,
                    }
                }
            }
            Intent::Delete(query) => {
                if let Some(good) = self.find(&query)? {
                    if self.confirm(&format!("Delete {}?", good.name))? {
                        self.session.remove_good(good.id);
                        writeln!(self.out, "Deleted {}.", good.name)?;
                    } else {
                        writeln!(self.out, "Kept {}.", good.name)?;
                    }
                }
            }
            Intent::State => {
                let json = serde_json::to_string_pretty(&self.session.snapshot())?;
                writeln!(self.out, "{}", json)?;
            }
        }

        Ok(true)
    }
}
