use crate::nfa::{Nfa, State, StateId};
use std::collections::HashSet;

/// A matcher that simulates a Thompson NFA against input.
///
/// All active states are tracked at once, so each subject symbol is read
/// exactly once and no backtracking happens.
pub struct Matcher<'a> {
    nfa: &'a Nfa,
}

impl<'a> Matcher<'a> {
    /// Create a new matcher for the given NFA
    pub fn new(nfa: &'a Nfa) -> Self {
        Self { nfa }
    }

    /// Check if the entire input matches.
    ///
    /// Matching is implicitly anchored at both ends of `input`.
    pub fn is_match(&self, input: &str) -> bool {
        let mut current = self.nfa.epsilon_closure(self.nfa.initial());

        for symbol in input.chars() {
            current = self.step(&current, symbol);
            trace!("after {:?}: {} active states", symbol, current.len());

            if current.is_empty() {
                return false;
            }
        }

        self.nfa.is_accepting(&current)
    }

    /// The states reachable from `current` by consuming `symbol`, closed
    /// under epsilon transitions.
    fn step(&self, current: &HashSet<StateId>, symbol: char) -> HashSet<StateId> {
        let mut next = HashSet::new();

        for &id in current {
            if let State::Literal { label, next: target } = *self.nfa.state(id) {
                if label == symbol {
                    self.nfa.add_closure(target, &mut next);
                }
            }
        }

        next
    }
}
