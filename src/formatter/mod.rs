/*
    This module writes grammars back out
*/

use itertools::Itertools;

use crate::grammar::*;

// Every nonterminal exactly once: the originals in processing order, then
// the generated ones in ascending order
pub fn format(grammar: &Grammar) -> Vec<(&str, &Rewrite)> {
    grammar.ordering()
        .into_iter()
        .chain(grammar.generated().cloned())
        .filter_map(|nonterminal| grammar.rules.get_key_value(&nonterminal))
        .map(|(nonterminal, rewrite)| (nonterminal.as_str(), rewrite))
        .collect()
}

pub fn format_rule(nonterminal: &str, rewrite: &[Production]) -> String {
    format!("{} -> {}", nonterminal, rewrite.iter().map(|p| production_text(p)).join(" "))
}

pub fn render(grammar: &Grammar) -> String {
    format(grammar)
        .into_iter()
        .map(|(nonterminal, rewrite)| format_rule(nonterminal, rewrite))
        .join("\n")
}
