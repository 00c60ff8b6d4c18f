use crate::{
    error::{Malformed, Result},
    nfa::{Fragment, Nfa, State, StateId},
    postfix::{Postfix, Token},
};

/// How the compiler treats the `+` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlusSemantics {
    /// One-or-more repetition. `X+` accepts what `X.X*` accepts.
    #[default]
    OneOrMore,
    /// Match a literal `+` character. The precedence table still ranks `+`
    /// as an operator, so it moves during postfix conversion like any other.
    Literal,
}

/// Compiler configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    plus: PlusSemantics,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how `+` is compiled. Defaults to [`PlusSemantics::OneOrMore`].
    pub fn plus(mut self, plus: PlusSemantics) -> Self {
        self.plus = plus;
        self
    }
}

/// Compiler that converts a postfix sequence to a Thompson NFA.
///
/// A compiler is consumed by [`Compiler::compile`]; every pattern gets a
/// fresh state arena and nothing is shared between compilations.
#[derive(Debug)]
pub struct Compiler {
    config: Config,
    states: Vec<State>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            states: Vec::new(),
        }
    }

    /// Compile a postfix sequence into an NFA.
    ///
    /// Fails if an operator finds fewer fragments on the stack than it
    /// consumes, or if the sequence leaves anything other than exactly one
    /// fragment behind.
    pub fn compile(mut self, postfix: &Postfix) -> Result<Nfa> {
        let mut stack: Vec<Fragment> = Vec::new();

        for (pos, &token) in postfix.tokens().iter().enumerate() {
            let missing = Malformed::MissingOperand {
                op: token.as_char(),
                pos,
            };
            let fragment = match token {
                Token::Concat => {
                    let (nfa1, nfa2) = pop_pair(&mut stack).ok_or(missing)?;
                    self.compile_concat(nfa1, nfa2)
                }
                Token::Alternate => {
                    let (nfa1, nfa2) = pop_pair(&mut stack).ok_or(missing)?;
                    self.compile_alternation(nfa1, nfa2)
                }
                Token::Star => {
                    let nfa1 = stack.pop().ok_or(missing)?;
                    self.compile_star(nfa1)
                }
                Token::Plus => match self.config.plus {
                    PlusSemantics::OneOrMore => {
                        let nfa1 = stack.pop().ok_or(missing)?;
                        self.compile_plus(nfa1)
                    }
                    PlusSemantics::Literal => self.compile_literal('+'),
                },
                Token::Literal(c) => self.compile_literal(c),
            };
            stack.push(fragment);
        }

        let fragment = match stack.len() {
            0 => return Err(Malformed::Empty.into()),
            1 => stack[0],
            fragments => return Err(Malformed::Leftover { fragments }.into()),
        };

        debug!(
            "compiled postfix {:?} into {} states (initial {}, accept {})",
            postfix.to_string(),
            self.states.len(),
            fragment.initial,
            fragment.accept
        );
        Ok(Nfa::new(self.states, fragment))
    }

    /// Add a new state and return its ID
    fn add_state(&mut self, state: State) -> StateId {
        let id = self.states.len();
        self.states.push(state);
        id
    }

    /// Attach an epsilon transition from `from` to `to`, filling `edge1`
    /// first and `edge2` second.
    fn connect(&mut self, from: StateId, to: StateId) {
        // Only accept states are ever patched, and each is patched at most
        // twice before it stops being an accept state.
        match &mut self.states[from] {
            State::Epsilon { edge1, edge2 } => {
                let edge = if edge1.is_none() { edge1 } else { edge2 };
                debug_assert!(edge.is_none(), "state {} has no free edge", from);
                *edge = Some(to);
            }
            State::Literal { .. } => debug_assert!(false, "cannot patch labeled state {}", from),
        }
    }

    /// One labeled state pointing at a fresh terminal accept state.
    fn compile_literal(&mut self, label: char) -> Fragment {
        let accept = self.add_state(State::terminal());
        let initial = self.add_state(State::Literal {
            label,
            next: accept,
        });
        Fragment { initial, accept }
    }

    fn compile_concat(&mut self, nfa1: Fragment, nfa2: Fragment) -> Fragment {
        self.connect(nfa1.accept, nfa2.initial);
        Fragment {
            initial: nfa1.initial,
            accept: nfa2.accept,
        }
    }

    fn compile_alternation(&mut self, nfa1: Fragment, nfa2: Fragment) -> Fragment {
        let accept = self.add_state(State::terminal());
        let initial = self.add_state(State::Epsilon {
            edge1: Some(nfa1.initial),
            edge2: Some(nfa2.initial),
        });
        self.connect(nfa1.accept, accept);
        self.connect(nfa2.accept, accept);
        Fragment { initial, accept }
    }

    fn compile_star(&mut self, nfa1: Fragment) -> Fragment {
        let accept = self.add_state(State::terminal());
        let initial = self.add_state(State::Epsilon {
            edge1: Some(nfa1.initial),
            edge2: Some(accept),
        });
        // Loop back first, then exit.
        self.connect(nfa1.accept, nfa1.initial);
        self.connect(nfa1.accept, accept);
        Fragment { initial, accept }
    }

    /// Like `compile_star` without the edge that skips `nfa1` entirely.
    fn compile_plus(&mut self, nfa1: Fragment) -> Fragment {
        let accept = self.add_state(State::terminal());
        let initial = self.add_state(State::Epsilon {
            edge1: Some(nfa1.initial),
            edge2: None,
        });
        self.connect(nfa1.accept, nfa1.initial);
        self.connect(nfa1.accept, accept);
        Fragment { initial, accept }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Pop the two topmost fragments, returned in the order they were pushed.
fn pop_pair(stack: &mut Vec<Fragment>) -> Option<(Fragment, Fragment)> {
    if stack.len() < 2 {
        return None;
    }
    let nfa2 = stack.pop()?;
    let nfa1 = stack.pop()?;
    Some((nfa1, nfa2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, postfix::to_postfix};

    fn compile(postfix: &str) -> Result<Nfa> {
        Compiler::new().compile(&postfix.parse::<Postfix>().unwrap())
    }

    #[test]
    fn test_literal_shape() {
        let nfa = compile("a").unwrap();
        assert_eq!(nfa.state_count(), 2);
        assert_eq!(
            *nfa.state(nfa.initial()),
            State::Literal {
                label: 'a',
                next: nfa.accept()
            }
        );
        assert_eq!(*nfa.state(nfa.accept()), State::terminal());
    }

    #[test]
    fn test_concat_shape() {
        let nfa = compile("ab.").unwrap();
        // a: accept 0, initial 1; b: accept 2, initial 3.
        assert_eq!(nfa.initial(), 1);
        assert_eq!(nfa.accept(), 2);
        assert_eq!(nfa.state(0).edges(), (Some(3), None));
    }

    #[test]
    fn test_alternation_shape() {
        let nfa = compile("ab|").unwrap();
        assert_eq!(nfa.state_count(), 6);
        assert_eq!(nfa.state(nfa.initial()).edges(), (Some(1), Some(3)));
        assert_eq!(nfa.state(0).edges(), (Some(nfa.accept()), None));
        assert_eq!(nfa.state(2).edges(), (Some(nfa.accept()), None));
        assert_eq!(*nfa.state(nfa.accept()), State::terminal());
    }

    #[test]
    fn test_star_shape() {
        let nfa = compile("a*").unwrap();
        assert_eq!(nfa.state(nfa.initial()).edges(), (Some(1), Some(nfa.accept())));
        // Old accept loops back to the old initial, then exits.
        assert_eq!(nfa.state(0).edges(), (Some(1), Some(nfa.accept())));
    }

    #[test]
    fn test_plus_shape() {
        let nfa = compile("a+").unwrap();
        assert_eq!(nfa.state(nfa.initial()).edges(), (Some(1), None));
        assert_eq!(nfa.state(0).edges(), (Some(1), Some(nfa.accept())));
    }

    #[test]
    fn test_plus_as_literal() {
        let config = Config::new().plus(PlusSemantics::Literal);
        let nfa = Compiler::with_config(config)
            .compile(&"+".parse::<Postfix>().unwrap())
            .unwrap();
        assert_eq!(nfa.state(nfa.initial()).label(), Some('+'));

        // The reference behavior leaves two fragments for this pattern.
        let postfix = to_postfix("a.b.c.d+").unwrap();
        assert_eq!(postfix.to_string(), "ab.c.d.+");
        assert_eq!(
            Compiler::with_config(config).compile(&postfix),
            Err(Error::MalformedPattern(Malformed::Leftover { fragments: 2 }))
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(compile(""), Err(Error::MalformedPattern(Malformed::Empty)));
        assert_eq!(
            Compiler::new().compile(&to_postfix("").unwrap()),
            Err(Error::MalformedPattern(Malformed::Empty))
        );
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            compile("a."),
            Err(Error::MalformedPattern(Malformed::MissingOperand { op: '.', pos: 1 }))
        );
        assert_eq!(
            compile("|"),
            Err(Error::MalformedPattern(Malformed::MissingOperand { op: '|', pos: 0 }))
        );
        assert_eq!(
            compile("*"),
            Err(Error::MalformedPattern(Malformed::MissingOperand { op: '*', pos: 0 }))
        );
        assert_eq!(
            compile("+"),
            Err(Error::MalformedPattern(Malformed::MissingOperand { op: '+', pos: 0 }))
        );
    }

    #[test]
    fn test_leftover() {
        assert_eq!(
            compile("abc."),
            Err(Error::MalformedPattern(Malformed::Leftover { fragments: 2 }))
        );
        // Missing explicit concatenation leaves one fragment per symbol.
        let postfix = to_postfix("abc").unwrap();
        assert_eq!(
            Compiler::new().compile(&postfix),
            Err(Error::MalformedPattern(Malformed::Leftover { fragments: 3 }))
        );
    }
}
