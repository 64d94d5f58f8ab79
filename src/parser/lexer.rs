use crate::grammar::{epsilon, Production, Symbol, EPSILON};

pub const ARROW: &str = "->";

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Word(String)
}

// Splits off the next word, which ends at whitespace or an arrow
fn split_word(text: &str) -> (&str, &str) {
    let end = text.char_indices()
        .find(|&(i, c)| c.is_whitespace() || (i > 0 && text[i..].starts_with(ARROW)))
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    text.split_at(end)
}

pub fn lex_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = line.trim_start();

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(ARROW) {
            tokens.push(Token::Arrow);
            rest = after;
        } else {
            let (word, after) = split_word(rest);
            tokens.push(Token::Word(word.to_string()));
            rest = after;
        }
        rest = rest.trim_start();
    }

    tokens
}

// Splits an alternative into symbols. `nonterminals` must be sorted longest
// first so that a defined name like `AB` wins over `A` followed by `B`.
pub fn lex_alternative(word: &str, nonterminals: &[&str]) -> Production {
    if word == EPSILON {
        return epsilon();
    }

    let mut symbols = Vec::new();
    let mut rest = word;

    while let Some(c) = rest.chars().next() {
        let text = nonterminals.iter()
            .find(|nonterminal| rest.starts_with(**nonterminal))
            .copied()
            .unwrap_or(&rest[..c.len_utf8()]);

        symbols.push(Symbol::new(text));
        rest = &rest[text.len()..];
    }

    symbols
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn word(text: &str) -> Token {
        Token::Word(text.to_string())
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "S -> Sa b",
            "  E->E+T   T ",
            "A -> e",
            "T -> T-F F"
        ];
        let answers = vec![
            vec![word("S"), Token::Arrow, word("Sa"), word("b")],
            vec![word("E"), Token::Arrow, word("E+T"), word("T")],
            vec![word("A"), Token::Arrow, word("e")],
            vec![word("T"), Token::Arrow, word("T-F"), word("F")]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line), answer)
        }
    }

    #[test]
    fn lex_odd_lines() {
        assert_eq!(lex_line(""), Vec::<Token>::new());
        assert_eq!(lex_line("S Sa b"), vec![word("S"), word("Sa"), word("b")]);
        assert_eq!(lex_line("-> a"), vec![Token::Arrow, word("a")]);
        assert_eq!(lex_line("S -> a -> b"), vec![word("S"), Token::Arrow, word("a"), Token::Arrow, word("b")]);
        assert_eq!(lex_line("S -> a->b"), vec![word("S"), Token::Arrow, word("a"), Token::Arrow, word("b")]);
    }

    #[test]
    fn lex_single_letter_alternatives() {
        let nonterminals = ["S", "A"];
        let words = vec!["Sa", "b", "aSA", "e", "eZ", "(E)"];
        let answers = vec![
            vec![Symbol::new("S"), Symbol::new("a")],
            vec![Symbol::new("b")],
            vec![Symbol::new("a"), Symbol::new("S"), Symbol::new("A")],
            epsilon(),
            vec![Symbol::new("e"), Symbol::new("Z")],
            vec![Symbol::new("("), Symbol::new("E"), Symbol::new(")")]
        ];

        for (word, answer) in zip(words, answers) {
            assert_eq!(lex_alternative(word, &nonterminals), answer);
        }
    }

    #[test]
    fn lex_longest_nonterminal() {
        let nonterminals = ["AB", "A", "B"];

        assert_eq!(
            lex_alternative("ABaBA", &nonterminals),
            vec![Symbol::new("AB"), Symbol::new("a"), Symbol::new("B"), Symbol::new("A")]
        );
        assert_eq!(
            lex_alternative("AAB", &nonterminals),
            vec![Symbol::new("A"), Symbol::new("AB")]
        );
    }
}
