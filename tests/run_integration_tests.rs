use mython::frontend::{parse_program, Lexer};
use mython::runtime::{execute_program, Closure, WriterContext};

use regex::Regex;
use test_generator::test_resources;

#[derive(Debug, PartialEq)]
struct Output {
    output: Vec<String>,
    runtime_error: Option<String>,
}

#[test_resources("tests/mython_test_cases/**/*.my")]
fn test_interpreter(file: &str) {
    let source = std::fs::read_to_string(file).unwrap();

    let expected_output = get_expected_output(&source);
    let output = run_interpreter_on_source(&source);

    assert_eq!(expected_output, output);
}

fn run_interpreter_on_source(source: &str) -> Output {
    let lexer = Lexer::new(source).unwrap();
    let program = parse_program(lexer).unwrap();

    let mut context = WriterContext::new(Vec::new());
    let mut globals = Closure::new();
    let result = execute_program(&program, &mut globals, &mut context);

    let output = String::from_utf8(context.into_inner())
        .unwrap()
        .lines()
        .map(|l| l.to_owned())
        .collect();

    Output {
        output,
        runtime_error: result.err().map(|e| e.to_string()),
    }
}

fn get_expected_output(source: &str) -> Output {
    let output_regexer = Regex::new(r"# expect: (.*)$").unwrap();
    let error_regexer = Regex::new(r"# expect runtime error: (.*)$").unwrap();

    let mut result = Output {
        output: vec![],
        runtime_error: None,
    };

    for line in source.lines() {
        if let Some(r) = output_regexer.captures(line) {
            result.output.push(r.get(1).unwrap().as_str().to_owned());
        }
        if let Some(r) = error_regexer.captures(line) {
            result
                .runtime_error
                .replace(r.get(1).unwrap().as_str().to_owned());
        }
    }

    result
}
