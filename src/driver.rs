/*
    This module reads batches of grammars, transforms each one and collects
    the results
*/

use std::fmt::Display;
use std::io::{BufRead, Write};

use itertools::Itertools;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error_handling::*;
use crate::formatter::render;
use crate::grammar::DEFAULT_START_SYMBOL;
use crate::parser::parse_numbered;
use crate::transform::{self, TransformError};

#[derive(Debug)]
pub enum DriverErrorType {
    // A case or rule count was expected but the input ended
    MissingCount(&'static str),
    // A count line did not hold a number
    InvalidCount(String),
    // The input ended part way through a case
    UnexpectedEof { expected: usize, found: usize },
    // There was an issue with reading the input
    FileError(std::io::Error),
}

impl ErrorType for DriverErrorType {}

impl PartialEq for DriverErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DriverErrorType::MissingCount(a), DriverErrorType::MissingCount(b)) => a == b,
            (DriverErrorType::InvalidCount(a), DriverErrorType::InvalidCount(b)) => a == b,
            (
                DriverErrorType::UnexpectedEof { expected: a, found: b },
                DriverErrorType::UnexpectedEof { expected: c, found: d }
            ) => a == c && b == d,
            (DriverErrorType::FileError(a), DriverErrorType::FileError(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

impl Display for DriverErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverErrorType::MissingCount(what) => write!(f, "Expected the number of {}", what),
            DriverErrorType::InvalidCount(text) => write!(f, "Expected a count, found `{}`", text),
            DriverErrorType::UnexpectedEof { expected, found } => write!(f, "Expected {} production rule(s), input ended after {}", expected, found),
            DriverErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type DriverError = Error<DriverErrorType>;
pub type DriverResult<T> = std::result::Result<T, DriverError>;

pub fn io_error(error: std::io::Error, location: &Location) -> DriverError {
    DriverError {
        location: location.clone(),
        error: DriverErrorType::FileError(error)
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    // Placed first when ordering nonterminals
    pub start_symbol: String,
    // The input is one grammar, without case or rule counts
    pub single: bool,
    // Print prompts while reading
    pub interactive: bool,
    // Transform cases on the rayon thread pool
    pub parallel: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            start_symbol: DEFAULT_START_SYMBOL.to_string(),
            single: false,
            interactive: false,
            parallel: false,
        }
    }
}

// One grammar's worth of input lines, numbered as in the input
#[derive(Debug, PartialEq)]
pub struct Case {
    pub number: usize,
    pub lines: Vec<(usize, String)>,
}

#[derive(Debug)]
pub struct BatchOutput {
    // The transformed grammars, separated by blank lines
    pub text: String,
    pub failures: Vec<TransformError>,
}

struct Input<'a, R, W> {
    lines: std::iter::Enumerate<std::io::Lines<R>>,
    prompt: &'a mut W,
    interactive: bool,
    location: Location,
    last_line: usize,
}

impl<'a, R: BufRead, W: Write> Input<'a, R, W> {
    fn new(reader: R, prompt: &'a mut W, interactive: bool, location: &Location) -> Self {
        Input {
            lines: reader.lines().enumerate(),
            prompt,
            interactive,
            location: location.clone(),
            last_line: 0,
        }
    }

    fn say(&mut self, text: impl Display) -> DriverResult<()> {
        if self.interactive {
            writeln!(self.prompt, "{}", text).map_err(|e| io_error(e, &self.location))?;
        }
        Ok(())
    }

    fn ask(&mut self, text: impl Display) -> DriverResult<()> {
        if self.interactive {
            write!(self.prompt, "{}", text)
                .and_then(|_| self.prompt.flush())
                .map_err(|e| io_error(e, &self.location))?;
        }
        Ok(())
    }

    fn next_line(&mut self) -> DriverResult<Option<(usize, String)>> {
        match self.lines.next() {
            Some((num, line)) => {
                self.last_line = num + 1;
                let line = line.map_err(|e| io_error(e, &self.location.at_line(num + 1)))?;
                Ok(Some((num + 1, line.trim().to_string())))
            }
            None => Ok(None),
        }
    }

    // Blank lines before a count are skipped
    fn next_count(&mut self, what: &'static str) -> DriverResult<usize> {
        loop {
            match self.next_line()? {
                Some((_, line)) if line.is_empty() => continue,
                Some((num, line)) => {
                    return line.parse().map_err(|_| DriverError {
                        location: self.location.at_line(num),
                        error: DriverErrorType::InvalidCount(line)
                    });
                }
                None => {
                    return Err(DriverError {
                        location: self.location.at_line(self.last_line),
                        error: DriverErrorType::MissingCount(what)
                    });
                }
            }
        }
    }

    fn read_case(&mut self, number: usize) -> DriverResult<Case> {
        self.say(format_args!("\n--- Case {} ---", number))?;
        self.say("Enter the number of nonterminals:")?;
        let count = self.next_count("nonterminals")?;

        self.say(format_args!("Enter {} production rule(s) in format: <NONTERMINAL> -> <production1> <production2> ...", count))?;
        self.say("Example: S -> Sa b")?;

        let mut lines = Vec::with_capacity(count);
        for i in 0..count {
            self.ask(format_args!("  Production {}: ", i + 1))?;
            match self.next_line()? {
                Some(line) => lines.push(line),
                None => {
                    return Err(DriverError {
                        location: self.location.for_case(number).at_line(self.last_line),
                        error: DriverErrorType::UnexpectedEof { expected: count, found: i }
                    });
                }
            }
        }

        Ok(Case { number, lines })
    }

    fn read_single(&mut self) -> DriverResult<Case> {
        self.say("Enter production rules, one per line, and end the input when done:")?;

        let mut lines = Vec::new();
        while let Some(line) = self.next_line()? {
            lines.push(line);
        }

        Ok(Case { number: 1, lines })
    }
}

pub fn read_cases<R: BufRead, W: Write>(reader: R, prompt: &mut W, options: &Options, location: &Location) -> DriverResult<Vec<Case>> {
    let mut input = Input::new(reader, prompt, options.interactive, location);

    input.say("=== Left Recursion Elimination ===")?;
    input.say("Based on Aho et al. 2006, Section 4.3.3\n")?;

    if options.single {
        return Ok(vec![input.read_single()?]);
    }

    input.say("Enter the number of test cases:")?;
    let count = input.next_count("test cases")?;

    (1..=count).map(|number| input.read_case(number)).collect()
}

// Parses and transforms one case. Skipped lines are logged, a failed
// transformation produces no output at all.
pub fn process_case(case: &Case, options: &Options, location: &Location) -> Result<String, TransformError> {
    let location = location.for_case(case.number);

    let parsed = parse_numbered(
        case.lines.iter().map(|(num, line)| (*num, line)),
        &options.start_symbol,
        &location
    );
    for error in &parsed.errors {
        warn!(location = %error.location, "{}", error.error);
    }

    let grammar = transform::run(parsed.grammar)
        .map_err(|error| TransformError { location: location.clone(), error })?;

    info!(
        case = case.number,
        nonterminals = grammar.len(),
        generated = grammar.generated.len(),
        "transformed grammar"
    );

    Ok(render(&grammar))
}

// Cases share nothing, so they can be transformed in any order. Results come
// back in case order either way.
pub fn process_cases(cases: &[Case], options: &Options, location: &Location) -> Vec<Result<String, TransformError>> {
    if options.parallel {
        cases.par_iter().map(|case| process_case(case, options, location)).collect()
    } else {
        cases.iter().map(|case| process_case(case, options, location)).collect()
    }
}

pub fn run_batch<R: BufRead, W: Write>(reader: R, prompt: &mut W, options: &Options, location: &Location) -> DriverResult<BatchOutput> {
    let cases = read_cases(reader, prompt, options, location)?;
    let (outputs, failures): (Vec<_>, Vec<_>) = process_cases(&cases, options, location)
        .into_iter()
        .partition_result();

    if options.interactive {
        let rule = "=".repeat(50);
        writeln!(prompt, "\n{}\nRESULTS\n{}\n", rule, rule).map_err(|e| io_error(e, location))?;
    }

    Ok(BatchOutput {
        text: outputs.join("\n\n"),
        failures
    })
}
