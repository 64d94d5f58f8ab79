/*
    This module removes left recursion from grammars
*/

pub mod allocator;
pub mod immediate;
mod verifier;

use std::fmt::Display;

use itertools::Itertools;
use tracing::debug;

use crate::error_handling::*;
use crate::grammar::*;
use allocator::SymbolAllocator;
use immediate::{eliminate, Elimination};

#[derive(Debug, PartialEq)]
pub enum TransformErrorType {
    // A production refers to a nonterminal that has no rule
    UndefinedNonterminal(String),
    // Every one and two letter name is already taken
    SymbolSpaceExhausted,
}

impl ErrorType for TransformErrorType {}

impl Display for TransformErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            TransformErrorType::SymbolSpaceExhausted => write!(f, "Ran out of names for new nonterminals"),
        }
    }
}

pub type TransformError = Error<TransformErrorType>;
pub type Result<T> = std::result::Result<T, TransformErrorType>;

// Replaces every production of the form `source γ` with `δ γ` for each
// alternative `δ` of `source`. Other productions are kept where they are.
pub fn substitute(target: &[Production], source: &str, expansions: &[Production]) -> Rewrite {
    target.iter()
        .flat_map(|production| match strip_leading(production, source) {
            Some(gamma) => expansions.iter()
                .map(|delta| delta.iter().chain(gamma).cloned().collect::<Production>())
                .collect_vec(),
            None => vec![production.clone()],
        })
        .collect()
}

// Removes all left recursion, processing the original nonterminals in the
// grammar's own ordering
pub fn run(grammar: Grammar) -> Result<Grammar> {
    let ordering = grammar.ordering();
    run_with_ordering(grammar, &ordering)
}

pub fn run_with_ordering(mut grammar: Grammar, ordering: &[String]) -> Result<Grammar> {
    verifier::verify_rules(&grammar)?;

    let mut allocator = SymbolAllocator::from_grammar(&grammar);

    for (i, a_i) in ordering.iter().enumerate() {
        let mut productions = lookup(&grammar, a_i)?.clone();

        // Only nonterminals before a_i are substituted, and those are
        // already free of immediate left recursion
        for a_j in &ordering[..i] {
            let expansions = lookup(&grammar, a_j)?;
            if productions.iter().any(|p| strip_leading(p, a_j).is_some()) {
                debug!(nonterminal = %a_i, source = %a_j, "substituting");
            }
            productions = substitute(&productions, a_j, expansions);
        }

        match eliminate(a_i, &productions, &mut allocator)? {
            Some(Elimination { rewrite, auxiliary }) => {
                grammar.insert(a_i.clone(), rewrite);
                if let Some((name, auxiliary_rewrite)) = auxiliary {
                    debug!(nonterminal = %a_i, auxiliary = %name, "eliminated immediate left recursion");
                    grammar.insert_generated(name, auxiliary_rewrite);
                }
            }
            None => {
                grammar.insert(a_i.clone(), productions);
            }
        }
    }

    Ok(grammar)
}

fn lookup<'a>(grammar: &'a Grammar, nonterminal: &str) -> Result<&'a Rewrite> {
    grammar.productions(nonterminal)
        .ok_or_else(|| TransformErrorType::UndefinedNonterminal(nonterminal.to_string()))
}
