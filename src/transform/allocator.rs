use std::collections::HashSet;

use itertools::Itertools;

use super::{Result, TransformErrorType};
use crate::grammar::Grammar;

// Single letter names, furthest from the usual ones first. `S` and `A` are
// left out since grammars tend to use them already.
const PRIORITY: &str = "ZYXWVUTRQPONMLKJIHGFEDCB";

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// Hands out nonterminal names that are not used anywhere in one grammar.
// Every name it returns is recorded so it is never handed out twice.
#[derive(Debug, Clone, Default)]
pub struct SymbolAllocator {
    used: HashSet<String>,
}

impl SymbolAllocator {
    pub fn new(used: impl IntoIterator<Item = String>) -> Self {
        SymbolAllocator {
            used: used.into_iter().collect(),
        }
    }

    pub fn from_grammar(grammar: &Grammar) -> Self {
        Self::new(grammar.rules.keys().cloned())
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    pub fn allocate(&mut self) -> Result<String> {
        let name = self.next_unused().ok_or(TransformErrorType::SymbolSpaceExhausted)?;
        self.used.insert(name.clone());
        Ok(name)
    }

    fn next_unused(&self) -> Option<String> {
        let single = PRIORITY.chars().map(String::from);
        let double = ALPHABET.chars()
            .cartesian_product(ALPHABET.chars())
            .map(|(first, second)| [first, second].iter().collect::<String>());

        single.chain(double).find(|name| !self.is_used(name))
    }
}
