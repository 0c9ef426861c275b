//! Cheese++ CLI

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cheesepp", version, about = "Cheese++ - a cheese-themed toy language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a Cheese++ source file
    Run {
        /// Source file to execute
        file: PathBuf,
    },
    /// Start an interactive session
    Repl,
    /// Parse and dump AST (debug)
    Parse {
        /// Source file to parse
        file: PathBuf,
    },
    /// Tokenize and dump tokens (debug)
    Tokens {
        /// Source file to tokenize
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run { file } => run_file(&file),
        Command::Repl => run_repl(),
        Command::Parse { file } => parse_file(&file),
        Command::Tokens { file } => tokenize_file(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Load a file and run the whole pipeline on it, reporting front-end
/// errors with source labels
fn load_program(
    path: &PathBuf,
) -> Result<Option<(cheesepp::ast::Program, String)>, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();

    let program = cheesepp::lexer::tokenize(&source).and_then(cheesepp::parser::parse);
    match program {
        Ok(program) => Ok(Some((program, source))),
        Err(err) => {
            cheesepp::error::report_error(&filename, &source, &err);
            Ok(None)
        }
    }
}

fn run_file(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let Some((program, source)) = load_program(path)? else {
        std::process::exit(1);
    };

    let mut interpreter = cheesepp::interp::Interpreter::new(std::io::stdout());
    interpreter.run(&program, &source)?;
    Ok(())
}

fn run_repl() -> Result<(), Box<dyn std::error::Error>> {
    cheesepp::repl::Repl::new()?.run()?;
    Ok(())
}

fn parse_file(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let Some((program, _)) = load_program(path)? else {
        std::process::exit(1);
    };

    println!("{}", serde_json::to_string_pretty(&program)?);
    Ok(())
}

fn tokenize_file(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;

    let tokens = cheesepp::lexer::tokenize(&source)?;
    for (tok, span) in &tokens {
        println!("{:?} @ {}..{}", tok, span.start, span.end);
    }

    Ok(())
}
