// src/main.rs

// FloatRPN
// An interactive reverse-Polish calculator: every word typed is a button press.

use clap::Parser as ClapParser;
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use float_rpn::{Engine, ProgramStore};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// File the program stack is persisted to between sessions.
    #[arg(long, default_value = "calculator.json")]
    program: PathBuf,

    /// Neither load nor save the program stack.
    #[arg(long)]
    no_persist: bool,

    /// Replay these words, print the result and exit instead of starting the REPL.
    #[arg(long, num_args = 1.., allow_hyphen_values = true)]
    eval: Option<Vec<String>>,
}

const HELP: &str = "\
Words are pushed left to right: numbers are operands, operator symbols apply,
anything else is a variable.
  :undo            remove the last token
  :reset           clear the stack
  :set NAME VALUE  assign a variable
  :get NAME        show a variable or constant
  :clear-vars      forget every variable
  :program         show the stack as stored
  :ops             list operator symbols
  quit | exit";

/// ASCII spellings for keys that are awkward to type.
fn alias(word: &str) -> &str {
    match word {
        "*" => "×",
        "/" => "÷",
        "-" => "−",
        "sqrt" => "√",
        "neg" => "±",
        "pi" => "π",
        other => other,
    }
}

/// Presses one button. Same fallback chain as restoring a stored program.
fn press(engine: &mut Engine, word: &str) {
    let word = alias(word);
    if engine.knows_operation(word) {
        engine.perform_operation(word);
        return;
    }
    match word.parse::<f64>() {
        Ok(value) => engine.push_operand(value),
        Err(_) => engine.push_variable(word),
    }
}

/// What the display would show: an absent result reads as 0.
fn display_value(engine: &Engine) -> String {
    engine.evaluate().unwrap_or(0.0).to_string()
}

fn print_state(engine: &Engine) {
    println!("{} = {}", engine.description(), display_value(engine));
}

enum Outcome {
    Mutated,
    Unchanged,
    Quit,
}

fn run_command(engine: &mut Engine, line: &str) -> Result<Outcome, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Outcome::Unchanged);
    };
    match command {
        "quit" | "exit" => Ok(Outcome::Quit),
        ":help" => {
            println!("{}", HELP);
            Ok(Outcome::Unchanged)
        }
        ":undo" => {
            engine.undo();
            Ok(Outcome::Mutated)
        }
        ":reset" => {
            engine.reset();
            Ok(Outcome::Mutated)
        }
        ":set" => {
            let name = words.next().ok_or(":set needs a name")?;
            let value = words
                .next()
                .ok_or(":set needs a value")?
                .parse::<f64>()
                .map_err(|e| format!("invalid value: {}", e))?;
            engine.set_variable(alias(name), value);
            Ok(Outcome::Unchanged)
        }
        ":get" => {
            let name = words.next().ok_or(":get needs a name")?;
            match engine.get_variable(alias(name)) {
                Some(value) => println!("{} = {}", name, value),
                None => println!("{} is not set", name),
            }
            Ok(Outcome::Unchanged)
        }
        ":clear-vars" => {
            engine.clear_variables();
            Ok(Outcome::Unchanged)
        }
        ":program" => {
            println!("{:?}", engine.program());
            Ok(Outcome::Unchanged)
        }
        ":ops" => {
            println!("{}", engine.operator_symbols().join(" "));
            Ok(Outcome::Unchanged)
        }
        other if other.starts_with(':') => Err(format!("unknown command '{}', try :help", other)),
        _ => {
            for word in line.split_whitespace() {
                press(engine, word);
            }
            Ok(Outcome::Mutated)
        }
    }
}

fn save(store: Option<&ProgramStore>, engine: &Engine) {
    if let Some(store) = store {
        if let Err(e) = store.save(&engine.program()) {
            warn!("{}", e);
        }
    }
}

pub fn repl(engine: &mut Engine, store: Option<&ProgramStore>) {
    println!("FloatRPN REPL");
    println!("Enter words, ':help', or 'quit'");
    print_state(engine);

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }

        match run_command(engine, input.trim()) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Mutated) => {
                save(store, engine);
                print_state(engine);
            }
            Ok(Outcome::Unchanged) => print_state(engine),
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut engine = Engine::new();
    let store = (!cli.no_persist).then(|| ProgramStore::new(cli.program.clone()));

    if let Some(store) = &store {
        match store.load() {
            Ok(Some(program)) => engine.set_program(program.as_slice()),
            Ok(None) => {}
            Err(e) => {
                eprintln!("Fatal Error loading program: {}", e);
                std::process::exit(1);
            }
        }
    }

    match cli.eval {
        Some(words) => {
            for word in &words {
                press(&mut engine, word);
            }
            print_state(&engine);
            save(store.as_ref(), &engine);
        }
        None => repl(&mut engine, store.as_ref()),
    }
}
