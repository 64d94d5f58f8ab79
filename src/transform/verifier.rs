use itertools::Itertools;
use tracing::debug;

use super::{Result, TransformErrorType::UndefinedNonterminal};
use crate::grammar::{Grammar, Production, Rewrite, Symbol::Nonterminal};

fn get_production_undefined_symbols<'a>(production: &'a Production, grammar: &'a Grammar) -> impl Iterator<Item = &'a String> + 'a {
    // Filter out everything but nonterminals and unwrap the text from the
    // nonterminals. Then filter out all the defined nonterminals.
    production.iter()
        .filter_map(|symbol| match symbol {
            Nonterminal(symbol) => Some(symbol),
            _ => None
        })
        .filter(|symbol| !grammar.contains(symbol))
}

fn get_rewrite_undefined_symbols<'a>(rewrite: &'a Rewrite, grammar: &'a Grammar) -> impl Iterator<Item = &'a String> + 'a {
    rewrite.iter()
        .flat_map(|production| get_production_undefined_symbols(production, grammar))
}

// Every undefined nonterminal once, looked for in processing order
pub fn get_undefined_symbols(grammar: &Grammar) -> Vec<String> {
    grammar.ordering()
        .iter()
        .chain(grammar.generated())
        .filter_map(|nonterminal| grammar.productions(nonterminal))
        .flat_map(|rewrite| get_rewrite_undefined_symbols(rewrite, grammar))
        .unique()
        .cloned()
        .collect()
}

pub fn verify_rules(grammar: &Grammar) -> Result<()> {
    let undefined = get_undefined_symbols(grammar);

    if undefined.len() > 1 {
        debug!(?undefined, "grammar has several undefined nonterminals");
    }

    match undefined.into_iter().next() {
        Some(nonterminal) => Err(UndefinedNonterminal(nonterminal)),
        None => Ok(())
    }
}
