use mython::frontend::{parse_program, Lexer};
use mython::runtime::{execute_program, Closure, WriterContext};

use std::io::Read;
use std::{env, fs, io, process};

type RunResult = Result<(), String>;

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => run_stdin(),
        2 => run_file(&args[1]),
        _ => {
            eprintln!("Usage: mython [script]");
            process::exit(64);
        }
    }
}

fn run_stdin() {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .expect("Failed to read stdin.");

    match run(&source) {
        Ok(_) => {}
        Err(e) => report_error(&e),
    }
}

fn run_file(filename: &str) {
    let source = fs::read_to_string(filename).expect("Failed to read file.");
    match run(&source) {
        Ok(_) => {}
        Err(e) => report_error(&e),
    }
}

fn run(source: &str) -> RunResult {
    let lexer = Lexer::new(source).map_err(|e| e.to_string())?;
    let program = parse_program(lexer).map_err(|e| e.to_string())?;

    let mut globals = Closure::new();
    let mut context = WriterContext::new(io::stdout());
    execute_program(&program, &mut globals, &mut context).map_err(|e| e.to_string())
}

fn report_error(error_message: &str) {
    eprintln!("An error: {}", error_message);
    process::exit(70);
}
