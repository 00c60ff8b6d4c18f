use std::collections::HashSet;

/// A state ID in the NFA. Always a valid index into [`Nfa::states`].
pub type StateId = usize;

/// A Thompson NFA state.
///
/// A labeled state has exactly one outgoing transition, taken on consuming
/// its label. An unlabeled state has up to two epsilon transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Consume `label` and move to `next`.
    Literal { label: char, next: StateId },

    /// Epsilon transitions (no input consumed). An accept state on the
    /// construction stack has neither edge set.
    Epsilon {
        edge1: Option<StateId>,
        edge2: Option<StateId>,
    },
}

impl State {
    /// A state with no label and no outgoing edges.
    pub fn terminal() -> Self {
        State::Epsilon {
            edge1: None,
            edge2: None,
        }
    }

    pub fn label(&self) -> Option<char> {
        match *self {
            State::Literal { label, .. } => Some(label),
            State::Epsilon { .. } => None,
        }
    }

    /// The `(edge1, edge2)` pair. For a labeled state `edge1` is the labeled
    /// transition and `edge2` is always `None`.
    pub fn edges(&self) -> (Option<StateId>, Option<StateId>) {
        match *self {
            State::Literal { next, .. } => (Some(next), None),
            State::Epsilon { edge1, edge2 } => (edge1, edge2),
        }
    }
}

/// An automaton under construction, identified by its initial and accept
/// states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub initial: StateId,
    pub accept: StateId,
}

/// A Thompson NFA whose states live in a single arena.
///
/// Repetition introduces cycles in the state graph. Because states refer to
/// each other by index, those cycles need no shared ownership: the whole
/// arena is dropped at once together with the `Nfa`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    states: Vec<State>,
    initial: StateId,
    accept: StateId,
}

impl Nfa {
    pub(crate) fn new(states: Vec<State>, fragment: Fragment) -> Self {
        Self {
            states,
            initial: fragment.initial,
            accept: fragment.accept,
        }
    }

    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    pub fn fragment(&self) -> Fragment {
        Fragment {
            initial: self.initial,
            accept: self.accept,
        }
    }

    /// # Panics
    ///
    /// When `id` does not belong to this automaton, e.g. an ID taken from a
    /// different `Nfa`.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Number of allocated states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// The set of states reachable from `start` through zero or more epsilon
    /// transitions, `start` included.
    pub fn epsilon_closure(&self, start: StateId) -> HashSet<StateId> {
        let mut closure = HashSet::new();
        self.add_closure(start, &mut closure);
        closure
    }

    /// Union the epsilon closure of `start` into `set`.
    ///
    /// States already in `set` are not expanded again. This is what makes the
    /// walk terminate on epsilon cycles such as the one in `(a*)*`.
    pub fn add_closure(&self, start: StateId, set: &mut HashSet<StateId>) {
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            if !set.insert(id) {
                continue;
            }

            // Labeled states contribute only themselves.
            if let State::Epsilon { edge1, edge2 } = self.states[id] {
                // edge2 first so edge1 is expanded first.
                stack.extend(edge2);
                stack.extend(edge1);
            }
        }
    }

    /// Check if the accept state is in the set.
    pub fn is_accepting(&self, states: &HashSet<StateId>) -> bool {
        states.contains(&self.accept)
    }
}

impl std::fmt::Display for Nfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (id, state) in self.states.iter().enumerate() {
            let marker = match id {
                id if id == self.initial => ">",
                id if id == self.accept => "*",
                _ => " ",
            };
            write!(f, "{}{:>3}: ", marker, id)?;
            match *state {
                State::Literal { label, next } => writeln!(f, "{:?} -> {}", label, next)?,
                State::Epsilon {
                    edge1: None,
                    edge2: None,
                } => writeln!(f, "ε")?,
                State::Epsilon { edge1, edge2 } => {
                    let targets: Vec<StateId> = edge1.into_iter().chain(edge2).collect();
                    writeln!(f, "ε -> {:?}", targets)?
                }
            }
        }
        Ok(())
    }
}
