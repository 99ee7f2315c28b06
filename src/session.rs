// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::rc::Rc;

use log::debug;

use crate::dfa::core::{new_sink, Automaton, State};
use crate::dfa::printer;
use crate::dfa::totalize::totalize;
use crate::pattern::compiler::{compile, Result};

/// A `Session` compiles patterns one after the other. Each pattern gets a
/// brand new automaton; only the reject state is kept from one pattern to the
/// next.
///
/// # Examples
///
/// ```
/// use re2dfa::session::Session;
///
/// let mut session = Session::new();
/// let lines = session.compile_and_render("(0)*").unwrap();
/// assert_eq!(lines,
///            vec!["([`q0], 0) -> [q1]",
///                 "([`q0], 1) -> [q1]",
///                 "([q1], 0) -> [q1]",
///                 "([q1], 1) -> [q1]"]);
///
/// assert!(session.compile_and_render("(0").is_err());
/// // the partial automaton is still available
/// assert_eq!(session.automaton().unwrap().to_string(),
///            "(`q0, 0) -> reject\n(`q0, 1) -> reject\n");
/// ```
#[derive(Debug, Default)]
pub struct Session {
    sink      : Option<Rc<State>>,
    automaton : Option<Automaton>,
}

impl Session {
    /// Creates a session. The sink is created with the first automaton.
    pub fn new() -> Session {
        Session{sink: None, automaton: None}
    }

    /// Drops the current automaton and returns a fresh one holding only a
    /// start state.
    pub fn new_automaton(&mut self) -> &mut Automaton {
        self.automaton = None;
        let sink = Rc::clone(self.sink.get_or_insert_with(new_sink));
        self.automaton.insert(Automaton::new(sink))
    }

    /// Compiles `pattern` into a fresh automaton, completes it with reject
    /// edges and renders its transition table.
    ///
    /// # Errors
    ///
    /// Returns the compile error for unbalanced parentheses. The partial
    /// automaton is totalized anyway and stays available through
    /// [`Session::automaton`].
    pub fn compile_and_render(&mut self, pattern: &str) -> Result<Vec<String>> {
        let dfa = self.new_automaton();
        let compiled = compile(dfa, pattern);
        let added = totalize(dfa);
        debug!("{:?}: {} states, {} reject edges", pattern, dfa.len(), added);
        compiled.map(|()| printer::render(dfa))
    }

    /// The automaton of the last pattern.
    pub fn automaton(&self) -> Option<&Automaton> {
        self.automaton.as_ref()
    }

    /// The reject state, once the first automaton has been created.
    pub fn sink(&self) -> Option<&Rc<State>> {
        self.sink.as_ref()
    }
}
