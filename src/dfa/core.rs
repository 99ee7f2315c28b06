// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeMap;
use std::fmt;                          // Formatter, Display, write!
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use itertools::Itertools;              // merge_by
use log::trace;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(0);

/// The two symbols for which every state gets a transition after totalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bit {
    /// The symbol `'0'`.
    Zero,
    /// The symbol `'1'`.
    One,
}

impl Bit {
    /// Both alphabet symbols, in code point order.
    pub const ALL: [Bit; 2] = [Bit::Zero, Bit::One];

    /// Returns the alphabet symbol matching `symb`, if any.
    pub fn from_symbol(symb: char) -> Option<Bit> {
        match symb {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }

    /// The character this symbol is written with.
    pub fn symbol(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// The role of a state. The start and the sink are told apart by this tag,
/// never by their id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Root of the chain built for the current pattern.
    Start,
    /// The absorbing reject state shared by every pattern of a session.
    Sink,
    /// Any state allocated while compiling.
    Normal,
}

/// Handle on a state of one `Automaton`.
///
/// A handle remembers the automaton that allocated it, so a handle kept from
/// a discarded automaton never resolves in a later one even when both print
/// the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId {
    generation : u64,
    index      : usize,
}

impl StateId {
    /// The number the state is printed with (`0` for the start state).
    pub fn id(self) -> usize {
        self.index
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "q{}", self.index)
    }
}

/// Destination of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// A state of the automaton owning the edge.
    State(StateId),
    /// The shared reject state.
    Sink,
}

/// Outgoing edges of one state: a fixed slot per alphabet symbol, and a side
/// table for any other literal seen in a pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transitions {
    binary : [Option<Target>; 2],
    others : BTreeMap<char, Target>,
}

impl Transitions {
    /// Destination of the edge labelled `symb`.
    pub fn get(&self, symb: char) -> Option<Target> {
        match Bit::from_symbol(symb) {
            Some(bit) => self.binary[bit.slot()],
            None => self.others.get(&symb).cloned(),
        }
    }

    /// Sets the edge labelled `symb`, returning the destination it replaces.
    pub fn insert(&mut self, symb: char, dest: Target) -> Option<Target> {
        match Bit::from_symbol(symb) {
            Some(bit) => self.binary[bit.slot()].replace(dest),
            None => self.others.insert(symb, dest),
        }
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.binary.iter().filter(|t| t.is_some()).count() + self.others.len()
    }

    /// `true` when the state has no outgoing edge.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Edges ordered by symbol code point.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (char, Target)> + 'a {
        let binary = IntoIterator::into_iter(Bit::ALL)
            .filter_map(move |bit| self.binary[bit.slot()].map(|dest| (bit.symbol(), dest)));
        let others = self.others.iter().map(|(&symb, &dest)| (symb, dest));
        binary.merge_by(others, |a, b| a.0 <= b.0)
    }
}

/// A state of the automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    id          : usize,
    role        : Role,
    accepting   : bool,
    transitions : Transitions,
}

impl State {
    fn new(id: usize, role: Role, accepting: bool) -> State {
        State{id: id, role: role, accepting: accepting, transitions: Transitions::default()}
    }

    /// Number of the state inside its automaton. Meaningless for the sink.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Role of the state.
    pub fn role(&self) -> Role {
        self.role
    }

    /// `true` for an accepting state.
    pub fn is_final(&self) -> bool {
        self.accepting
    }

    /// Outgoing edges.
    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    /// Destination of the edge labelled `symb`.
    pub fn next(&self, symb: char) -> Option<Target> {
        self.transitions.get(symb)
    }

    pub(crate) fn transitions_mut(&mut self) -> &mut Transitions {
        &mut self.transitions
    }
}

/// Creates the reject state: not final, looping on itself for both alphabet
/// symbols. A session creates it once and shares it with every automaton.
pub fn new_sink() -> Rc<State> {
    let mut sink = State::new(0, Role::Sink, false);
    for bit in Bit::ALL.iter() {
        sink.transitions.insert(bit.symbol(), Target::Sink);
    }
    Rc::new(sink)
}

/// The states built for one pattern, stored in creation order. The start
/// state is always the first one.
///
/// # Examples
///
/// ```
/// use re2dfa::dfa::core::*;
///
/// let mut dfa = Automaton::new(new_sink());
/// let start = dfa.start();
/// let q1 = dfa.allocate_state(true);
/// dfa.add_edge(start, '0', Target::State(q1));
/// assert_eq!(dfa.len(), 2);
/// assert_eq!(dfa.next(start, '0'), Some(Target::State(q1)));
/// assert_eq!(dfa.next(start, '1'), None);
/// ```
#[derive(Debug)]
pub struct Automaton {
    generation : u64,
    states     : Vec<State>,
    sink       : Rc<State>,
}

impl Automaton {
    /// Creates an automaton holding only a fresh start state, sharing `sink`.
    pub fn new(sink: Rc<State>) -> Automaton {
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        Automaton{generation: generation, states: vec![State::new(0, Role::Start, false)], sink: sink}
    }

    /// The start state.
    pub fn start(&self) -> StateId {
        StateId{generation: self.generation, index: 0}
    }

    /// The shared reject state.
    pub fn sink(&self) -> &Rc<State> {
        &self.sink
    }

    /// Allocates a state numbered after the last one.
    pub fn allocate_state(&mut self, accepting: bool) -> StateId {
        let index = self.states.len();
        self.states.push(State::new(index, Role::Normal, accepting));
        trace!("allocated q{} (final: {})", index, accepting);
        StateId{generation: self.generation, index: index}
    }

    /// Looks up a state. Returns `None` for a handle of another automaton.
    pub fn state(&self, id: StateId) -> Option<&State> {
        if id.generation != self.generation {
            return None;
        }
        self.states.get(id.index)
    }

    /// States in creation order, start first.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub(crate) fn states_mut(&mut self) -> &mut [State] {
        &mut self.states
    }

    /// Number of states, the start included and the sink excluded.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`: the start state exists from creation.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Sets the edge `src --symb--> dest`, returning the destination it
    /// replaces.
    ///
    /// # Panics
    ///
    /// Panics if `src` (or `dest`) was not allocated by this automaton.
    pub fn add_edge(&mut self, src: StateId, symb: char, dest: Target) -> Option<Target> {
        if let Target::State(dest) = dest {
            self.check(dest);
        }
        let index = self.check(src);
        self.states[index].transitions.insert(symb, dest)
    }

    /// Marks `state` as accepting.
    ///
    /// # Panics
    ///
    /// Panics if `state` was not allocated by this automaton.
    pub fn mark_final(&mut self, state: StateId) {
        let index = self.check(state);
        self.states[index].accepting = true;
    }

    /// Destination of the edge labelled `symb` leaving `state`.
    pub fn next(&self, state: StateId, symb: char) -> Option<Target> {
        self.state(state).and_then(|s| s.next(symb))
    }

    fn check(&self, id: StateId) -> usize {
        assert!(id.generation == self.generation && id.index < self.states.len(),
                "state {} does not belong to this automaton", id);
        id.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_automaton() {
        let dfa = Automaton::new(new_sink());
        assert_eq!(dfa.len(), 1);
        let start = dfa.state(dfa.start()).unwrap();
        assert_eq!(start.role(), Role::Start);
        assert_eq!(start.id(), 0);
        assert!(!start.is_final());
        assert!(start.transitions().is_empty());
    }

    #[test]
    fn test_allocate_state_sequential_ids() {
        let mut dfa = Automaton::new(new_sink());
        let ids: Vec<usize> = (0..4).map(|_| dfa.allocate_state(false).id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(dfa.states().iter().skip(1).all(|s| s.role() == Role::Normal));
    }

    #[test]
    fn test_sink_self_loops() {
        let sink = new_sink();
        assert_eq!(sink.role(), Role::Sink);
        assert!(!sink.is_final());
        assert_eq!(sink.next('0'), Some(Target::Sink));
        assert_eq!(sink.next('1'), Some(Target::Sink));
        assert_eq!(sink.transitions().len(), 2);
    }

    #[test]
    fn test_edge_replacement() {
        let mut dfa = Automaton::new(new_sink());
        let start = dfa.start();
        let q1 = dfa.allocate_state(false);
        let q2 = dfa.allocate_state(false);
        assert_eq!(dfa.add_edge(start, '0', Target::State(q1)), None);
        assert_eq!(dfa.add_edge(start, '0', Target::State(q2)), Some(Target::State(q1)));
        assert_eq!(dfa.next(start, '0'), Some(Target::State(q2)));
        assert_eq!(dfa.state(start).unwrap().transitions().len(), 1);
    }

    #[test]
    fn test_transitions_code_point_order() {
        let mut trans = Transitions::default();
        trans.insert('a', Target::Sink);
        trans.insert('1', Target::Sink);
        trans.insert('#', Target::Sink);
        trans.insert('0', Target::Sink);
        trans.insert('U', Target::Sink);
        let symbs: String = trans.iter().map(|(symb, _)| symb).collect();
        assert_eq!(symbs, "#01Ua");
    }

    #[test]
    fn test_foreign_handle_does_not_resolve() {
        let sink = new_sink();
        let mut first = Automaton::new(sink.clone());
        let old = first.allocate_state(true);
        let mut second = Automaton::new(sink);
        let new = second.allocate_state(true);
        assert_eq!(old.id(), new.id());
        assert_ne!(old, new);
        assert!(second.state(old).is_none());
        assert!(second.state(first.start()).is_none());
    }

    #[test]
    #[should_panic]
    fn test_add_edge_foreign_handle() {
        let sink = new_sink();
        let mut first = Automaton::new(sink.clone());
        let old = first.allocate_state(false);
        let mut second = Automaton::new(sink);
        let start = second.start();
        second.add_edge(start, '0', Target::State(old));
    }
}
