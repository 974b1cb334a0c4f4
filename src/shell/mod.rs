//! Interactive front end for poking at a B-tree of `i64` keys
//!
//! A line is parsed into a [`Command`] and executed against the shell's
//! tree; the result comes back as rendered text so the binary only has to
//! print it.

mod error;
mod parser;

pub use error::{ShellError, ShellResult};
pub use parser::{Arg, parser};

use std::path::{Path, PathBuf};

use chumsky::Parser;
use csv::{ReaderBuilder, Trim};
use prettytable::{Table, row};

use crate::btree::{BTree, BTreeError};

pub const HELP: &str = "\
Commands:
  insert <key>...   insert keys (alias: i)
  delete <key>...   delete keys (alias: d)
  search <key>...   look keys up (alias: s)
  print             show the tree level by level
  dump              show the tree as JSON
  check             verify the B-tree invariants
  stats             degree, key count, height and node count
  load <file>       insert every field of a CSV file
  clear             remove every key
  help              show this message
  exit              leave the shell";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Insert(Vec<i64>),
    Delete(Vec<i64>),
    Search(Vec<i64>),
    Print,
    Dump,
    Check,
    Stats,
    Load(PathBuf),
    Clear,
    Help,
    Exit,
}

impl Command {
    pub fn parse(line: &str) -> ShellResult<Self> {
        let (name, args) = parser().parse(line).into_result().map_err(|errs| {
            let messages: Vec<String> = errs.iter().map(ToString::to_string).collect();
            ShellError::Syntax(messages.join("; "))
        })?;

        let command = name.to_ascii_lowercase();
        match command.as_str() {
            "insert" | "i" => Ok(Command::Insert(keys(&command, args)?)),
            "delete" | "d" => Ok(Command::Delete(keys(&command, args)?)),
            "search" | "s" => Ok(Command::Search(keys(&command, args)?)),
            "print" => no_args(&command, args, Command::Print),
            "dump" => no_args(&command, args, Command::Dump),
            "check" => no_args(&command, args, Command::Check),
            "stats" => no_args(&command, args, Command::Stats),
            "clear" => no_args(&command, args, Command::Clear),
            "help" => no_args(&command, args, Command::Help),
            "exit" | "quit" => no_args(&command, args, Command::Exit),
            "load" => match args.as_slice() {
                [path] => Ok(Command::Load(PathBuf::from(path.text()))),
                _ => Err(ShellError::Arity {
                    command: "load".to_string(),
                    expected: "a single file path",
                }),
            },
            _ => Err(ShellError::UnknownCommand(name.to_string())),
        }
    }
}

fn keys(command: &str, args: Vec<Arg<'_>>) -> ShellResult<Vec<i64>> {
    if args.is_empty() {
        return Err(ShellError::Arity {
            command: command.to_string(),
            expected: "at least one integer key",
        });
    }

    args.into_iter()
        .map(|arg| match arg {
            Arg::Integer(key, _) => Ok(key),
            Arg::Text(text) => Err(ShellError::InvalidKey(text.to_string())),
        })
        .collect()
}

fn no_args(command: &str, args: Vec<Arg<'_>>, parsed: Command) -> ShellResult<Command> {
    if !args.is_empty() {
        return Err(ShellError::Arity {
            command: command.to_string(),
            expected: "no arguments",
        });
    }
    Ok(parsed)
}

/// What the caller should do after a command ran
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Print the text and keep reading commands
    Continue(String),
    Exit,
}

/// Summary of a CSV load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub inserted: usize,
    pub duplicates: usize,
}

pub struct Shell {
    tree: BTree<i64>,
}

impl Shell {
    pub fn new(degree: usize) -> ShellResult<Self> {
        Ok(Self {
            tree: BTree::new(degree)?,
        })
    }

    pub fn tree(&self) -> &BTree<i64> {
        &self.tree
    }

    /// Parse and run one line of input
    pub fn execute_line(&mut self, line: &str) -> ShellResult<Outcome> {
        let command = Command::parse(line)?;
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> ShellResult<Outcome> {
        let output = match command {
            Command::Insert(keys) => self.apply(&keys, "inserted", |tree, key| tree.insert(key)),
            Command::Delete(keys) => self.apply(&keys, "deleted", |tree, key| tree.delete(&key)),
            Command::Search(keys) => self.search(&keys),
            Command::Print => self.tree.to_string(),
            Command::Dump => self.dump_json()?,
            Command::Check => {
                self.tree.check_invariants()?;
                format!("ok: {} keys, height {}", self.tree.len(), self.tree.height())
            }
            Command::Stats => self.stats(),
            Command::Load(path) => {
                let report = self.load_csv(&path)?;
                format!(
                    "loaded {} keys ({} duplicates skipped)",
                    report.inserted, report.duplicates
                )
            }
            Command::Clear => {
                self.tree.clear();
                "cleared".to_string()
            }
            Command::Help => HELP.to_string(),
            Command::Exit => return Ok(Outcome::Exit),
        };

        Ok(Outcome::Continue(output))
    }

    /// Run a per-key tree operation, reporting each key's outcome
    fn apply<F>(&mut self, keys: &[i64], done: &str, mut op: F) -> String
    where
        F: FnMut(&mut BTree<i64>, i64) -> Result<(), BTreeError>,
    {
        let mut table = Table::new();
        table.set_titles(row!["Key", "Result"]);

        for &key in keys {
            let result = match op(&mut self.tree, key) {
                Ok(()) => done.to_string(),
                Err(err) => err.to_string(),
            };
            table.add_row(row![key, result]);
        }

        table.to_string()
    }

    fn search(&self, keys: &[i64]) -> String {
        let mut table = Table::new();
        table.set_titles(row!["Key", "Found", "Node"]);

        for &key in keys {
            match self.tree.search(&key) {
                Some(node) => {
                    let values: Vec<String> = node.values().iter().map(ToString::to_string).collect();
                    table.add_row(row![key, "yes", format!("[{}]", values.join(" "))]);
                }
                None => {
                    table.add_row(row![key, "no", "-"]);
                }
            }
        }

        table.to_string()
    }

    fn stats(&self) -> String {
        let mut table = Table::new();
        table.set_titles(row!["Metric", "Value"]);
        table.add_row(row!["degree", self.tree.degree()]);
        table.add_row(row!["keys", self.tree.len()]);
        table.add_row(row!["height", self.tree.height()]);
        table.add_row(row!["nodes", self.tree.node_count()]);
        table.add_row(row![
            "min",
            self.tree.min().map_or("-".to_string(), ToString::to_string)
        ]);
        table.add_row(row![
            "max",
            self.tree.max().map_or("-".to_string(), ToString::to_string)
        ]);
        table.to_string()
    }

    /// Render the whole tree as pretty-printed JSON
    pub fn dump_json(&self) -> ShellResult<String> {
        Ok(serde_json::to_string_pretty(&self.tree)?)
    }

    /// Insert every field of a headerless CSV file as a key
    ///
    /// Keys already in the tree are counted and skipped; a field that is not
    /// an integer aborts the load (keys before it stay inserted).
    pub fn load_csv(&mut self, path: &Path) -> ShellResult<LoadReport> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // Allow varying number of fields per row
            .trim(Trim::All)
            .from_path(path)?;

        let mut report = LoadReport::default();

        for record in reader.records() {
            let record = record?;
            for field in record.iter().filter(|field| !field.is_empty()) {
                let key = field
                    .parse::<i64>()
                    .map_err(|_| ShellError::InvalidKey(field.to_string()))?;

                match self.tree.insert(key) {
                    Ok(()) => report.inserted += 1,
                    Err(BTreeError::DuplicateKey) => report.duplicates += 1,
                    Err(err) => return Err(err.into()),
                }
            }
        }

        eprintln!(
            "Loaded {} keys from file {} ({} duplicates skipped)",
            report.inserted,
            path.display(),
            report.duplicates
        );

        Ok(report)
    }
}
