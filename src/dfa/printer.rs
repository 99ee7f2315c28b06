// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;                          // Formatter, Display, write!

use crate::dfa::core::{Automaton, Role, State, Target};

/// Name the sink is printed with.
pub const REJECT: &str = "reject";

/// How a state is written in the transition table.
///
/// The start state gets a leading backtick when it is the source of an edge,
/// accepting states are wrapped in brackets, and the sink is always written
/// `reject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// The start state, as the source of an edge.
    Start {
        /// The state is accepting.
        accepting: bool,
    },
    /// Any other state of the automaton.
    State {
        /// Number of the state.
        id: usize,
        /// The state is accepting.
        accepting: bool,
    },
    /// The shared sink.
    Reject,
}

impl Label {
    /// Label of `state` on the left-hand side of an edge.
    pub fn source(state: &State) -> Label {
        match state.role() {
            Role::Start => Label::Start{accepting: state.is_final()},
            Role::Sink => Label::Reject,
            Role::Normal => Label::State{id: state.id(), accepting: state.is_final()},
        }
    }

    /// Label of `dest` on the right-hand side of an edge.
    pub fn target(dfa: &Automaton, dest: Target) -> Label {
        match dest {
            Target::Sink => Label::Reject,
            Target::State(id) => Label::State{
                id: id.id(),
                accepting: dfa.state(id).map_or(false, State::is_final),
            },
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Label::Start{accepting: false} => write!(f, "`q0"),
            Label::Start{accepting: true} => write!(f, "[`q0]"),
            Label::State{id, accepting: false} => write!(f, "q{}", id),
            Label::State{id, accepting: true} => write!(f, "[q{}]", id),
            Label::Reject => write!(f, "{}", REJECT),
        }
    }
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Source state.
    pub src  : Label,
    /// Symbol read.
    pub symb : char,
    /// Destination state.
    pub dest : Label,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}) -> {}", self.src, self.symb, self.dest)
    }
}

/// Every edge of `dfa`: states in creation order, and within a state symbols
/// by ascending code point. The sink's own loops are not listed.
pub fn edges<'a>(dfa: &'a Automaton) -> impl Iterator<Item = Edge> + 'a {
    dfa.states().iter().flat_map(move |state| {
        let src = Label::source(state);
        state.transitions()
             .iter()
             .map(move |(symb, dest)| Edge{src: src, symb: symb, dest: Label::target(dfa, dest)})
    })
}

/// Renders the transition table of `dfa`, one line per edge.
///
/// # Examples
///
/// ```
/// use re2dfa::dfa::core::{new_sink, Automaton};
/// use re2dfa::dfa::{printer, totalize};
/// use re2dfa::pattern::compiler::compile;
///
/// let mut dfa = Automaton::new(new_sink());
/// compile(&mut dfa, "0*").unwrap();
/// totalize::totalize(&mut dfa);
/// assert_eq!(printer::render(&dfa),
///            vec!["([`q0], 0) -> [q1]",
///                 "([`q0], 1) -> reject",
///                 "([q1], 0) -> [q1]",
///                 "([q1], 1) -> reject"]);
/// ```
pub fn render(dfa: &Automaton) -> Vec<String> {
    edges(dfa).map(|edge| edge.to_string()).collect()
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for edge in edges(self) {
            writeln!(f, "{}", edge)?;
        }
        Ok(())
    }
}
