// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::result;

use log::{debug, warn};
use thiserror::Error;

use crate::dfa::core::{Automaton, Bit, StateId, Target};

/// The `CompileError` type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The `(` at `position` (counted in characters) has no matching `)`.
    #[error("Unmatched parentheses at position {position}.")]
    UnbalancedParentheses {
        /// Index of the opening parenthesis.
        position: usize,
    },
}

/// Alias for result::Result<T,CompileError>.
pub type Result<T> = result::Result<T, CompileError>;

/// Compiles `pattern` into `dfa`, starting from its start state.
///
/// The pattern is read once, left to right:
///
/// * any character other than `(` and `*` is a literal and adds a state
///   reached by that character;
/// * a group `(...)` adds a state reached by either `0` or `1`; what is
///   inside the parentheses is not looked at;
/// * a `*` right after a literal or a group makes the added state accepting
///   and looping on the same symbol(s), and the chain goes on from the state
///   it was added to;
/// * any other `*` is ignored.
///
/// The state reached at the end of the pattern is accepting.
///
/// # Errors
///
/// Returns `CompileError::UnbalancedParentheses` when a `(` is never closed.
/// The states added before the faulty group are kept.
///
/// # Examples
///
/// ```
/// use re2dfa::dfa::core::{new_sink, Automaton, Target};
/// use re2dfa::pattern::compiler::compile;
///
/// let mut dfa = Automaton::new(new_sink());
/// compile(&mut dfa, "(01)").unwrap();
/// let q1 = dfa.next(dfa.start(), '0').unwrap();
/// assert_eq!(dfa.next(dfa.start(), '1'), Some(q1));
/// assert_eq!(dfa.len(), 2);
/// ```
pub fn compile(dfa: &mut Automaton, pattern: &str) -> Result<()> {
    let symbs: Vec<char> = pattern.chars().collect();
    let mut current = dfa.start();
    let mut i = 0;
    while i < symbs.len() {
        i = match symbs[i] {
            '(' => {
                let close = match closing_parenthesis(&symbs, i) {
                    Some(close) => close,
                    None => {
                        warn!("unmatched parenthesis at {} in {:?}", i, pattern);
                        return Err(CompileError::UnbalancedParentheses{position: i});
                    },
                };
                let n = dfa.allocate_state(false);
                for bit in Bit::ALL.iter() {
                    link(dfa, current, bit.symbol(), n);
                }
                if starred(&symbs, close) {
                    dfa.mark_final(n);
                    for bit in Bit::ALL.iter() {
                        link(dfa, n, bit.symbol(), n);
                    }
                    close + 2
                } else {
                    current = n;
                    close + 1
                }
            },
            '*' => i + 1,
            symb => {
                let n = dfa.allocate_state(false);
                link(dfa, current, symb, n);
                if starred(&symbs, i) {
                    dfa.mark_final(n);
                    link(dfa, n, symb, n);
                    i + 2
                } else {
                    current = n;
                    i + 1
                }
            },
        };
    }
    dfa.mark_final(current);
    debug!("compiled {:?} into {} states", pattern, dfa.len());
    Ok(())
}

/// Index of the `)` closing the `(` at `open`.
fn closing_parenthesis(symbs: &[char], open: usize) -> Option<usize> {
    let mut balance = 0usize;
    for (i, &symb) in symbs.iter().enumerate().skip(open) {
        match symb {
            '(' => balance += 1,
            ')' => {
                balance -= 1;
                if balance == 0 {
                    return Some(i);
                }
            },
            _ => {},
        }
    }
    None
}

fn starred(symbs: &[char], i: usize) -> bool {
    symbs.get(i + 1) == Some(&'*')
}

fn link(dfa: &mut Automaton, src: StateId, symb: char, dest: StateId) {
    if let Some(old) = dfa.add_edge(src, symb, Target::State(dest)) {
        debug!("edge ({}, {}) moved from {:?} to {}", src, symb, old, dest);
    }
}
