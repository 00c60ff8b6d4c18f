use crate::error::{Error, Result};

/// Binding strength of an operator symbol. Higher binds tighter.
///
/// Anything that is not one of the four operators, including both
/// parentheses, has a precedence of `0`. That is what keeps an open
/// parenthesis on the operator stack while operators are pushed above it.
pub fn precedence(c: char) -> u8 {
    match c {
        '*' => 50,
        '.' => 40,
        '+' => 35,
        '|' => 30,
        _ => 0,
    }
}

/// Whether `c` is an operator recognized by the precedence table.
pub fn is_operator(c: char) -> bool {
    precedence(c) > 0
}

/// A single element of a postfix sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A symbol matched verbatim.
    Literal(char),
    /// `.`
    Concat,
    /// `|`
    Alternate,
    /// `*`
    Star,
    /// `+`
    Plus,
}

impl Token {
    /// Classify a raw postfix character.
    pub fn from_char(c: char) -> Token {
        match c {
            '.' => Token::Concat,
            '|' => Token::Alternate,
            '*' => Token::Star,
            '+' => Token::Plus,
            c => Token::Literal(c),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Token::Literal(c) => c,
            Token::Concat => '.',
            Token::Alternate => '|',
            Token::Star => '*',
            Token::Plus => '+',
        }
    }
}

/// A regular expression in postfix (reverse Polish) order.
///
/// Produced left-to-right by [`to_postfix`] and consumed left-to-right by the
/// [`Compiler`](crate::Compiler). Its `Display` form is the familiar postfix
/// string, e.g. `abd|.c*.` for `a.(b|d).c*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postfix {
    tokens: Vec<Token>,
}

impl Postfix {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn push(&mut self, c: char) {
        self.tokens.push(Token::from_char(c));
    }
}

impl From<Vec<Token>> for Postfix {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl std::str::FromStr for Postfix {
    type Err = std::convert::Infallible;

    /// Every character of a postfix string is either an operator or a symbol,
    /// so this never fails. Whether the result compiles is a separate matter.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self {
            tokens: s.chars().map(Token::from_char).collect(),
        })
    }
}

impl IntoIterator for Postfix {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl std::fmt::Display for Postfix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;

        for token in &self.tokens {
            f.write_char(token.as_char())?;
        }
        Ok(())
    }
}

/// Convert an infix pattern to postfix with the shunting-yard algorithm.
///
/// Concatenation must be written explicitly as `.`; nothing is inserted
/// implicitly. All operators are treated as left-associative, so an operator
/// on the stack with precedence greater than or equal to the incoming one is
/// emitted first.
pub fn to_postfix(infix: &str) -> Result<Postfix> {
    let mut output = Postfix::default();
    // Each entry remembers its offset so an unclosed '(' can be reported.
    let mut stack: Vec<(char, usize)> = Vec::new();

    for (pos, c) in infix.chars().enumerate() {
        match c {
            '(' => stack.push((c, pos)),
            ')' => loop {
                match stack.pop() {
                    Some(('(', _)) => break,
                    Some((op, _)) => output.push(op),
                    None => return Err(Error::UnbalancedParentheses { pos }),
                }
            },
            c if is_operator(c) => {
                while let Some(&(top, _)) = stack.last() {
                    if precedence(top) < precedence(c) {
                        break;
                    }
                    output.push(top);
                    stack.pop();
                }
                stack.push((c, pos));
            }
            c => output.push(c),
        }
    }

    while let Some((op, pos)) = stack.pop() {
        if op == '(' {
            return Err(Error::UnbalancedParentheses { pos });
        }
        output.push(op);
    }

    debug!("converted {:?} to postfix {:?}", infix, output.to_string());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postfix(infix: &str) -> String {
        to_postfix(infix).unwrap().to_string()
    }

    #[test]
    fn test_precedence_table() {
        assert_eq!(precedence('*'), 50);
        assert_eq!(precedence('.'), 40);
        assert_eq!(precedence('+'), 35);
        assert_eq!(precedence('|'), 30);
        assert_eq!(precedence('('), 0);
        assert_eq!(precedence('a'), 0);
        assert!(is_operator('+'));
        assert!(!is_operator(')'));
    }

    #[test]
    fn test_simple_operators() {
        assert_eq!(postfix("a"), "a");
        assert_eq!(postfix("a.b"), "ab.");
        assert_eq!(postfix("a|b"), "ab|");
        assert_eq!(postfix("a*"), "a*");
    }

    #[test]
    fn test_precedence_ordering() {
        assert_eq!(postfix("a|b.c*"), "abc*.|");
        assert_eq!(postfix("a.b|c"), "ab.c|");
        assert_eq!(postfix("a*.b*"), "a*b*.");
        // '+' binds looser than '.', so it applies to the whole concatenation.
        assert_eq!(postfix("a.b+"), "ab.+");
        assert_eq!(postfix("a.(b.c.d)+"), "abc.d..+");
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(postfix("a.b.c"), "ab.c.");
        assert_eq!(postfix("a|b|c"), "ab|c|");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(postfix("a.b.c*"), "ab.c*.");
        assert_eq!(postfix("a.(b|d).c*"), "abd|.c*.");
        assert_eq!(postfix("(a.(b|d))*"), "abd|.*");
        assert_eq!(postfix("a.(b.b)*.c"), "abb.*.c.");
        assert_eq!(postfix("(a|b)*.c"), "ab|*c.");
    }

    #[test]
    fn test_tokens_are_classified() {
        let tokens = to_postfix("x.(y|z)*").unwrap();
        assert_eq!(
            tokens.tokens(),
            &[
                Token::Literal('x'),
                Token::Literal('y'),
                Token::Literal('z'),
                Token::Alternate,
                Token::Star,
                Token::Concat,
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert!(to_postfix("").unwrap().is_empty());
        assert!(to_postfix("()").unwrap().is_empty());
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(to_postfix("(a.b"), Err(Error::UnbalancedParentheses { pos: 0 }));
        assert_eq!(to_postfix("a.b)"), Err(Error::UnbalancedParentheses { pos: 3 }));
        assert_eq!(to_postfix("(a|(b)"), Err(Error::UnbalancedParentheses { pos: 0 }));
        assert_eq!(to_postfix(")("), Err(Error::UnbalancedParentheses { pos: 0 }));
    }

    #[test]
    fn test_from_str() {
        let parsed: Postfix = "ab|*c.".parse().unwrap();
        assert_eq!(parsed, to_postfix("(a|b)*.c").unwrap());
        assert_eq!(parsed.len(), 6);
    }
}
