use itertools::{Either, Itertools};
use tracing::warn;

use super::allocator::SymbolAllocator;
use super::Result;
use crate::grammar::*;

// The rewritten alternatives of a nonterminal plus the auxiliary nonterminal
// that now carries its recursion, if one was needed
#[derive(Debug, PartialEq)]
pub struct Elimination {
    pub rewrite: Rewrite,
    pub auxiliary: Option<(String, Rewrite)>,
}

// Turns
//     A -> Aα1 | ... | Aαm | β1 | ... | βn
// into
//     A  -> β1A' | ... | βnA'
//     A' -> α1A' | ... | αmA' | e
//
// Returns `None` when `nonterminal` is not immediately left recursive.
pub fn eliminate(nonterminal: &str, productions: &[Production], allocator: &mut SymbolAllocator) -> Result<Option<Elimination>> {
    if !has_immediate_left_recursion(nonterminal, productions) {
        return Ok(None);
    }

    let (alphas, mut betas): (Vec<&[Symbol]>, Vec<Production>) = productions.iter()
        .partition_map(|production| match strip_leading(production, nonterminal) {
            Some(alpha) => Either::Left(alpha),
            None => Either::Right(production.clone()),
        });

    // `A -> A` derives nothing new, drop it rather than turn it into `A' -> A'`
    let cycles = alphas.iter().filter(|alpha| alpha.is_empty()).count();
    if cycles > 0 {
        warn!(nonterminal, cycles, "dropping alternatives that only derive the nonterminal itself");
    }
    let alphas = alphas.into_iter().filter(|alpha| !alpha.is_empty()).collect_vec();

    if alphas.is_empty() {
        return Ok(Some(Elimination {
            rewrite: betas,
            auxiliary: None,
        }));
    }

    if betas.is_empty() {
        warn!(nonterminal, "every alternative is left recursive, substituting the empty string");
        betas.push(epsilon());
    }

    let auxiliary = allocator.allocate()?;
    let auxiliary_symbol = Symbol::Nonterminal(auxiliary.clone());

    let rewrite = betas.into_iter()
        .map(|mut beta| {
            beta.push(auxiliary_symbol.clone());
            beta
        })
        .collect();

    let auxiliary_rewrite = alphas.into_iter()
        .map(|alpha| alpha.iter().chain([&auxiliary_symbol]).cloned().collect::<Production>())
        .chain([epsilon()])
        .collect();

    Ok(Some(Elimination {
        rewrite,
        auxiliary: Some((auxiliary, auxiliary_rewrite)),
    }))
}
