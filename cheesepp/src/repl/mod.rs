//! REPL (Read-Eval-Print Loop) for Cheese++

use crate::error::report_error;
use crate::interp::Interpreter;
use crate::lexer::tokenize;
use crate::parser::parse;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::io::Stdout;
use std::path::PathBuf;

const PROMPT: &str = "cheese> ";
const HISTORY_FILE: &str = ".cheesepp_history";

/// REPL state. The interpreter (and with it the variable environment)
/// lives for the whole session, so later submissions see earlier
/// bindings.
pub struct Repl {
    editor: DefaultEditor,
    interpreter: Interpreter<Stdout>,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Create a new REPL
    pub fn new() -> RlResult<Self> {
        let editor = DefaultEditor::new()?;
        let interpreter = Interpreter::new(std::io::stdout());
        let history_path = home_dir().map(|h| h.join(HISTORY_FILE));

        let mut repl = Repl {
            editor,
            interpreter,
            history_path,
        };

        if let Some(ref path) = repl.history_path {
            let _ = repl.editor.load_history(path);
        }

        Ok(repl)
    }

    /// Run the REPL
    pub fn run(&mut self) -> RlResult<()> {
        println!("Cheese++ REPL");
        println!("Type :help for help, :quit to exit.\n");

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(line);

                    if line.starts_with(':') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.eval_input(line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = self.editor.save_history(path);
        }

        Ok(())
    }

    /// Handle REPL commands (starting with :). Returns true to exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":quit" | ":q" | ":exit" => {
                println!("Goodbye!");
                true
            }
            ":help" | ":h" | ":?" => {
                self.print_help();
                false
            }
            ":env" => {
                self.print_env();
                false
            }
            ":reset" => {
                self.interpreter.reset();
                println!("Environment cleared.");
                false
            }
            ":clear" => {
                print!("\x1B[2J\x1B[1;1H");
                false
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type :help for help.");
                false
            }
        }
    }

    fn print_help(&self) {
        println!("Cheese++ REPL Commands:");
        println!("  :help, :h, :?   Show this help");
        println!("  :env            Show all variable bindings");
        println!("  :reset          Clear the environment");
        println!("  :clear          Clear the screen");
        println!("  :quit, :q       Exit the REPL");
        println!();
        println!("You can enter:");
        println!("  - Whole programs: Cheese Glyn(a) = 5; NoCheese");
        println!("  - Bare statements, bracketed for you: Glyn(a) = 5;");
        println!("  - Expressions: Glyn(a) + 2, 3 times 4");
        println!();
        println!("Variables persist between submissions.");
    }

    fn print_env(&self) {
        let bindings = self.interpreter.env().bindings();
        if bindings.is_empty() {
            println!("(no variables)");
            return;
        }
        let mut names: Vec<_> = bindings.keys().collect();
        names.sort();
        for name in names {
            println!("{name} = {}", bindings[name]);
        }
    }

    /// Parse and evaluate one submission, printing any error instead of
    /// aborting the session
    fn eval_input(&mut self, input: &str) {
        // Bracket bare input so `Glyn(a) = 5;` works as-is
        let source = if input.trim_start().starts_with("Cheese") {
            input.to_string()
        } else {
            format!("Cheese\n{input}\nNoCheese")
        };

        let program = match tokenize(&source).and_then(parse) {
            Ok(program) => program,
            Err(err) => {
                report_error("<repl>", &source, &err);
                return;
            }
        };

        match self.interpreter.run(&program, &source) {
            Ok(Some(value)) => println!("=> {value}"),
            Ok(None) => {}
            Err(err) => eprintln!("{err}"),
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
