//! Interactive line-oriented front end over a [`Session`].
//!
//! Every command is translated into one session call and the result is
//! printed; no catalog logic lives here.

pub(crate) mod render;

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use wooprice_core::{parse_price_input, RowKey, ValidationError};

use crate::session::{Catalog, CommitReport, Refresh, Session, SessionError};

const PROMPT: &str = "wooprice> ";

const HELP: &str = "\
commands:
  search <text>           find products whose name contains <text>
  edit <#row|id> [price]  stage a new price (prompts when price is omitted);
                          #2 is the second row, 12 or 12_34 is a product or
                          variation id
  commit                  push staged prices to the store
  show                    print the current rows
  help                    print this message
  quit | exit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Empty,
    Search(String),
    Edit {
        target: Option<String>,
        price: Option<String>,
    },
    Commit,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(h, r)| (h, r.trim()));

        match head.to_lowercase().as_str() {
            "" => Command::Empty,
            "search" | "s" => Command::Search(rest.to_string()),
            "edit" | "e" => {
                let mut parts = rest.split_whitespace();
                Command::Edit {
                    target: parts.next().map(str::to_string),
                    price: parts.next().map(str::to_string),
                }
            }
            "commit" => Command::Commit,
            "show" | "ls" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(head.to_string()),
        }
    }
}

pub(crate) struct Shell<C, W> {
    session: Session<C>,
    out: W,
}

impl<C: Catalog, W: Write> Shell<C, W> {
    pub(crate) fn new(session: Session<C>, out: W) -> Self {
        Self { session, out }
    }

    /// Reads commands from `input` until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Only I/O failures on `input` or the output end the loop early;
    /// catalog and validation failures are printed and the loop continues.
    pub(crate) async fn run<R>(&mut self, input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        self.prompt(PROMPT)?;
        while let Some(line) = lines.next_line().await? {
            match Command::parse(&line) {
                Command::Quit => break,
                command => self.dispatch(command, &mut lines).await?,
            }
            self.prompt(PROMPT)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    async fn dispatch<R>(&mut self, command: Command, lines: &mut Lines<R>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        match command {
            Command::Empty | Command::Quit => Ok(()),
            Command::Search(query) => self.search(&query).await,
            Command::Edit { target, price } => {
                self.edit(target.as_deref(), price.as_deref(), lines).await
            }
            Command::Commit => self.commit().await,
            Command::Show => self.show(),
            Command::Help => writeln!(self.out, "{HELP}"),
            Command::Unknown(word) => {
                writeln!(self.out, "warning: unknown command '{word}' (try 'help')")
            }
        }
    }

    async fn search(&mut self, query: &str) -> io::Result<()> {
        match self.session.search(query).await {
            Ok(rows) if rows.is_empty() => writeln!(self.out, "ok: no matching products"),
            Ok(rows) => render::table(&mut self.out, &rows),
            Err(e) => self.report(&e),
        }
    }

    async fn edit<R>(
        &mut self,
        target: Option<&str>,
        price: Option<&str>,
        lines: &mut Lines<R>,
    ) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let Some(target) = target else {
            return writeln!(self.out, "warning: usage: edit <#row|id> [price]");
        };
        let Some(row) = self.resolve(target).and_then(|key| self.session.row(key)) else {
            return writeln!(self.out, "warning: no row '{target}' in the current results");
        };

        let answer;
        let raw = match price {
            Some(raw) => raw,
            None => {
                self.prompt(&format!("New price for {}: ", render::describe(&row)))?;
                match lines.next_line().await? {
                    Some(line) if !line.trim().is_empty() => {
                        answer = line;
                        answer.as_str()
                    }
                    _ => return writeln!(self.out, "ok: edit cancelled"),
                }
            }
        };

        let staged = parse_price_input(raw)
            .map_err(SessionError::from)
            .and_then(|price| self.session.stage_edit(row.row.key, price));
        match staged {
            Ok(row) => writeln!(
                self.out,
                "ok: {} {}: {} -> {}",
                row.row.key,
                render::describe(&row),
                row.row.old_price,
                row.new_price.unwrap_or_default()
            ),
            Err(e) => self.report(&e),
        }
    }

    async fn commit(&mut self) -> io::Result<()> {
        match self.session.commit().await {
            Ok(CommitReport { applied, refresh }) => {
                writeln!(self.out, "ok: prices updated ({} item(s))", applied.len())?;
                match refresh {
                    Refresh::Skipped => Ok(()),
                    Refresh::Done(count) => {
                        tracing::debug!(count, "results reloaded after commit");
                        render::table(&mut self.out, &self.session.rows())
                    }
                    Refresh::Failed(e) => writeln!(
                        self.out,
                        "error: prices were updated but reloading the results failed: {e}"
                    ),
                }
            }
            Err(e) => writeln!(self.out, "error: {e}"),
        }
    }

    fn show(&mut self) -> io::Result<()> {
        if self.session.last_query().is_none() {
            return writeln!(self.out, "warning: nothing to show yet; try 'search <text>'");
        }
        render::table(&mut self.out, &self.session.rows())?;
        writeln!(self.out, "ok: {} staged edit(s)", self.session.pending())
    }

    /// `#N` names the N-th displayed row; anything else must be a row key
    /// (`pid` or `pid_vid`).
    fn resolve(&self, target: &str) -> Option<RowKey> {
        match target.strip_prefix('#') {
            Some(number) => number.parse().ok().and_then(|n| self.session.key_at(n)),
            None => target.parse().ok(),
        }
    }

    fn report(&mut self, error: &SessionError) -> io::Result<()> {
        match error {
            SessionError::Validation(e @ ValidationError::EmptyQuery) => {
                writeln!(self.out, "warning: {e}")
            }
            other => writeln!(self.out, "error: {other}"),
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &Session<C> {
        &self.session
    }
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
