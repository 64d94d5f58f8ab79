/*
    This module parses grammars written as `<NONTERMINAL> -> <alt1> <alt2> ...`
*/

pub mod lexer;

use std::cmp::Reverse;
use std::fmt::Display;

use itertools::Itertools;
use tracing::warn;

use crate::grammar::*;
use crate::error_handling::*;
use lexer::*;

#[derive(Debug, PartialEq)]
pub enum ParseErrorType {
    // A line which should contain a rule has no `->`
    MalformedLine,
    // The rule does not start with a single nonterminal
    MissingNonterminal,
    // A rule has more than one `->`
    UnexpectedArrow,
}

impl ErrorType for ParseErrorType {}

impl Display for ParseErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorType::MalformedLine => write!(f, "Expected `{}` after nonterminal, skipping line", ARROW),
            ParseErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal, skipping line"),
            ParseErrorType::UnexpectedArrow => write!(f, "Unexpected `{}` encountered, skipping line", ARROW),
        }
    }
}

pub type ParseError = Error<ParseErrorType>;
pub type ParseErrors = Errors<ParseErrorType>;

pub type Result<T> = std::result::Result<T, ParseErrorType>;
pub type LineResult<T> = std::result::Result<T, ParseError>;

// A grammar along with the lines that had to be skipped to build it
#[derive(Debug)]
pub struct Parsed {
    pub grammar: Grammar,
    pub errors: ParseErrors,
}

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    alternatives: Vec<String>,
    location: Location
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    if !tokens.contains(&Token::Arrow) {
        return Err(ParseErrorType::MalformedLine);
    }

    let symbol = match tokens {
        [Token::Word(s), Token::Arrow, ..] if classify(s) == SymbolKind::Nonterminal => s.clone(),
        _ => return Err(ParseErrorType::MissingNonterminal),
    };

    let alternatives = tokens[2..].iter()
        .map(|t| match t {
            Token::Word(s) => Ok(s.clone()),
            Token::Arrow => Err(ParseErrorType::UnexpectedArrow),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Rule {
        symbol,
        alternatives,
        location
    })
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    parse_line(&lex_line(line), location.clone())
        .map_err(|error| ParseError { location, error })
}

fn is_rule_line(line: &str) -> bool {
    !line.trim().is_empty()
}

// Alternatives can only be split into symbols once every nonterminal name is
// known, so this happens after all lines are read
fn grammar_from_rules(rules: Vec<Rule>, start_symbol: &str) -> Grammar {
    let nonterminals = rules.iter()
        .map(|rule| rule.symbol.as_str())
        .unique()
        .sorted_by_key(|symbol| Reverse(symbol.len()))
        .collect_vec();

    let mut grammar = Grammar::new(start_symbol);
    for rule in &rules {
        let rewrite = rule.alternatives.iter()
            .map(|alternative| lex_alternative(alternative, &nonterminals))
            .collect();

        if grammar.insert(rule.symbol.clone(), rewrite).is_some() {
            warn!(location = %rule.location, nonterminal = %rule.symbol, "nonterminal defined twice, keeping the last definition");
        }
    }

    grammar
}

// Parses lines paired with their line numbers. Lines that are not rules are
// skipped and reported in `Parsed::errors`.
pub fn parse_numbered<I, S>(lines: I, start_symbol: &str, location: &Location) -> Parsed
where
    I: IntoIterator<Item = (usize, S)>,
    S: AsRef<str>,
{
    let (rules, errors): (Vec<_>, Vec<_>) = lines.into_iter()
        .filter(|(_, line)| is_rule_line(line.as_ref()))
        .map(|(num, line)| parse_lex_line(line.as_ref(), location.at_line(num)))
        .partition_result();

    Parsed {
        grammar: grammar_from_rules(rules, start_symbol),
        errors
    }
}

pub fn parse<S: AsRef<str>>(lines: &[S], start_symbol: &str) -> Parsed {
    parse_numbered(
        lines.iter().enumerate().map(|(num, line)| (num + 1, line)),
        start_symbol,
        &Location::default()
    )
}
