//! Simple REPL (Read-Eval-Print Loop) for Monkey
//!
//! Usage: cargo run --bin monkey-repl

use std::io::{self, BufRead, Write};

use anyhow::Context;
use monkey::{Evaluator, Lexer, Object, Parser};

const PROMPT: &str = ">> ";

fn main() -> anyhow::Result<()> {
    println!("Monkey REPL v{}", monkey::VERSION);
    println!("Type expressions and press Enter. ':help' for commands, ':quit' to exit.");
    println!();

    let evaluator = Evaluator::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", PROMPT);
        stdout.flush().context("failed to flush prompt")?;

        let mut input = String::new();
        let read = stdin
            .lock()
            .read_line(&mut input)
            .context("failed to read from stdin")?;
        if read == 0 {
            break; // EOF
        }

        let input = input.trim();
        match input {
            "" => continue,
            ":quit" | ":q" => break,
            ":help" => {
                print_help();
                continue;
            }
            _ => {}
        }

        if let Some(source) = input.strip_prefix(":ast") {
            print_ast(source)?;
            continue;
        }

        execute_line(&evaluator, input);
    }

    Ok(())
}

fn execute_line(evaluator: &Evaluator, source: &str) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        print_parser_errors(&parser.error_messages());
        return;
    }

    let result = evaluator.eval(&program);
    match result {
        Object::Error(_) => eprintln!("{}", result.inspect()),
        _ => println!("{}", result.inspect()),
    }
}

fn print_ast(source: &str) -> anyhow::Result<()> {
    let mut parser = Parser::new(Lexer::new(source.trim()));
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        print_parser_errors(&parser.error_messages());
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&program).context("failed to serialize AST")?;
    println!("{}", json);
    Ok(())
}

fn print_parser_errors(messages: &[String]) {
    eprintln!("parser errors:");
    for message in messages {
        eprintln!("\t{}", message);
    }
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  :help        - Show this help");
    println!("  :ast <expr>  - Print the parsed program as JSON");
    println!("  :quit        - Exit REPL");
    println!();
    println!("Examples:");
    println!("  5 + 5 * 2");
    println!("  !(1 < 2) == false");
    println!("  if (10 > 1) {{ return 10; }} else {{ 20 }}");
    println!();
    println!("  Note: Each line is a complete program.");
    println!();
}
