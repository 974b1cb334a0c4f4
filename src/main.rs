use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use classicds::btree::DEFAULT_DEGREE;
use classicds::shell::{Outcome, Shell, ShellResult};

/// Interactive B-tree shell
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Minimum degree of the tree (at least 2)
    #[arg(short, long, default_value_t = DEFAULT_DEGREE)]
    degree: usize,

    /// CSV file of integer keys to insert before anything else
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Run a command and exit instead of starting the prompt (repeatable)
    #[arg(short, long = "exec")]
    exec: Vec<String>,

    /// Print the final tree as JSON on exit
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> ShellResult<()> {
    let mut shell = Shell::new(args.degree)?;

    if let Some(path) = &args.load {
        shell.load_csv(path)?;
    }

    if args.exec.is_empty() {
        repl(&mut shell);
    } else {
        for line in &args.exec {
            if !execute(&mut shell, line) {
                break;
            }
        }
    }

    if args.json {
        println!("{}", shell.dump_json()?);
    }

    Ok(())
}

/// Run one line, printing its output; returns false once the shell should stop
fn execute(shell: &mut Shell, line: &str) -> bool {
    match shell.execute_line(line) {
        Ok(Outcome::Continue(output)) => {
            println!("{}", output);
            true
        }
        Ok(Outcome::Exit) => false,
        Err(e) => {
            eprintln!("Error: {}", e);
            true
        }
    }
}

fn repl(shell: &mut Shell) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to start line editor: {}", e);
            return;
        }
    };

    println!("B-tree shell (degree {}), type 'help' for commands", shell.tree().degree());

    loop {
        match rl.readline("btree> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                if !execute(shell, line) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue, // Ctrl-C clears the line
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }
}
