/*
    This module is for storing and manipulating grammars
*/

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

use itertools::Itertools;

// The alternative that stands for the empty string
pub const EPSILON: &str = "e";

// The conventional start symbol, ordered before every other nonterminal
pub const DEFAULT_START_SYMBOL: &str = "S";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SymbolKind {
    Terminal,
    Nonterminal,
}

// A symbol is a nonterminal exactly when its first character is uppercase
pub fn classify(symbol: &str) -> SymbolKind {
    match symbol.chars().next() {
        Some(c) if c.is_uppercase() => SymbolKind::Nonterminal,
        _ => SymbolKind::Terminal,
    }
}

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        match classify(&text) {
            SymbolKind::Terminal => Symbol::Terminal(text),
            SymbolKind::Nonterminal => Symbol::Nonterminal(text),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Symbol::Terminal(t) | Symbol::Nonterminal(t) => t,
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Terminal(_) => SymbolKind::Terminal,
            Symbol::Nonterminal(_) => SymbolKind::Nonterminal,
        }
    }

    pub fn is_nonterminal(&self, name: &str) -> bool {
        matches!(self, Symbol::Nonterminal(n) if n == name)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

// The symbols in a single alternative
pub type Production = Vec<Symbol>;

// The alternatives of a nonterminal, in input order
pub type Rewrite = Vec<Production>;

pub fn epsilon() -> Production {
    vec![Symbol::Terminal(EPSILON.to_string())]
}

pub fn is_epsilon(production: &[Symbol]) -> bool {
    matches!(production, [Symbol::Terminal(t)] if t == EPSILON)
}

// If `production` begins with `nonterminal`, returns what follows it
pub fn strip_leading<'a>(production: &'a [Symbol], nonterminal: &str) -> Option<&'a [Symbol]> {
    match production.split_first() {
        Some((first, rest)) if first.is_nonterminal(nonterminal) => Some(rest),
        _ => None,
    }
}

pub fn has_immediate_left_recursion(nonterminal: &str, productions: &[Production]) -> bool {
    productions.iter().any(|p| strip_leading(p, nonterminal).is_some())
}

// Writes a production back out as a single token
pub fn production_text(production: &[Symbol]) -> String {
    production.iter().map(Symbol::text).collect()
}

#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    pub start_symbol: String,
    pub rules: HashMap<String, Rewrite>,
    // Nonterminals introduced by the transformation rather than the input
    pub generated: BTreeSet<String>,
}

impl Grammar {
    pub fn new(start_symbol: impl Into<String>) -> Self {
        Grammar {
            start_symbol: start_symbol.into(),
            rules: HashMap::new(),
            generated: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, nonterminal: impl Into<String>, rewrite: Rewrite) -> Option<Rewrite> {
        self.rules.insert(nonterminal.into(), rewrite)
    }

    pub fn insert_generated(&mut self, nonterminal: impl Into<String>, rewrite: Rewrite) {
        let nonterminal = nonterminal.into();
        self.generated.insert(nonterminal.clone());
        self.rules.insert(nonterminal, rewrite);
    }

    pub fn productions(&self, nonterminal: &str) -> Option<&Rewrite> {
        self.rules.get(nonterminal)
    }

    pub fn contains(&self, nonterminal: &str) -> bool {
        self.rules.contains_key(nonterminal)
    }

    pub fn is_generated(&self, nonterminal: &str) -> bool {
        self.generated.contains(nonterminal)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    // Original nonterminals: the start symbol first if present, then the
    // rest in ascending lexical order
    pub fn ordering(&self) -> Vec<String> {
        let (start, rest): (Vec<_>, Vec<_>) = self.rules
            .keys()
            .filter(|nonterminal| !self.is_generated(nonterminal))
            .cloned()
            .sorted()
            .partition(|nonterminal| *nonterminal == self.start_symbol);

        start.into_iter().chain(rest).collect()
    }

    // Generated nonterminals in ascending lexical order
    pub fn generated(&self) -> impl Iterator<Item = &String> {
        self.generated.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    fn s_terminal(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    #[test]
    fn classify_by_first_character() {
        let symbols = vec!["S", "Z", "AB", "a", "e", "+", "(", "ÉA"];
        let answers = vec![
            SymbolKind::Nonterminal,
            SymbolKind::Nonterminal,
            SymbolKind::Nonterminal,
            SymbolKind::Terminal,
            SymbolKind::Terminal,
            SymbolKind::Terminal,
            SymbolKind::Terminal,
            SymbolKind::Nonterminal,
        ];

        for (symbol, answer) in zip(symbols, answers) {
            assert_eq!(classify(symbol), answer, "classifying `{}`", symbol);
            assert_eq!(Symbol::new(symbol).kind(), answer);
        }
    }

    #[test]
    fn recognise_epsilon() {
        assert!(is_epsilon(&epsilon()));
        assert!(!is_epsilon(&[s_terminal("e"), s_nonterminal("Z")]));
        assert!(!is_epsilon(&[s_terminal("a")]));
        assert!(!is_epsilon(&[]));
    }

    #[test]
    fn strip_leading_nonterminal() {
        let production = vec![s_nonterminal("S"), s_terminal("a"), s_nonterminal("B")];

        assert_eq!(
            strip_leading(&production, "S"),
            Some(&[s_terminal("a"), s_nonterminal("B")][..])
        );
        assert_eq!(strip_leading(&production, "B"), None);
        assert_eq!(strip_leading(&[s_terminal("S")], "S"), None);
        assert_eq!(strip_leading(&[], "S"), None);
    }

    #[test]
    fn detect_immediate_left_recursion() {
        let productions = vec![
            vec![s_terminal("b")],
            vec![s_nonterminal("S"), s_terminal("a")],
        ];

        assert!(has_immediate_left_recursion("S", &productions));
        assert!(!has_immediate_left_recursion("A", &productions));
    }

    #[test]
    fn order_start_symbol_first() {
        let mut grammar = Grammar::new("S");
        for nonterminal in ["C", "A", "S", "B"] {
            grammar.insert(nonterminal, vec![vec![s_terminal("a")]]);
        }
        grammar.insert_generated("Z", vec![epsilon()]);

        assert_eq!(grammar.ordering(), vec!["S", "A", "B", "C"]);
        assert_eq!(grammar.generated().collect_vec(), vec!["Z"]);
        assert_eq!(grammar.len(), 5);
    }

    #[test]
    fn order_without_start_symbol() {
        let mut grammar = Grammar::new("S");
        for nonterminal in ["T", "E", "F"] {
            grammar.insert(nonterminal, Vec::new());
        }

        assert_eq!(grammar.ordering(), vec!["E", "F", "T"]);
    }

    #[test]
    fn production_text_concatenates() {
        let production = vec![s_terminal("b"), s_nonterminal("AB"), s_terminal("e")];
        assert_eq!(production_text(&production), "bABe");
    }
}
