// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use log::debug;

use crate::dfa::core::{Automaton, Bit, Role, Target};

/// Routes every missing `0` or `1` edge to the sink and returns how many
/// edges were added.
///
/// Every state of the automaton is completed, including states no longer
/// reachable from the start after an edge was replaced. Existing edges are
/// left untouched, so a second call adds nothing. Edges on other symbols are
/// never added.
pub fn totalize(dfa: &mut Automaton) -> usize {
    let mut added = 0;
    for state in dfa.states_mut().iter_mut().filter(|s| s.role() != Role::Sink) {
        for bit in Bit::ALL.iter() {
            if state.next(bit.symbol()).is_none() {
                state.transitions_mut().insert(bit.symbol(), Target::Sink);
                added += 1;
            }
        }
    }
    debug!("totalized {} states with {} reject edges", dfa.len(), added);
    added
}

/// `true` when every state has an edge on both `0` and `1`.
pub fn is_total(dfa: &Automaton) -> bool {
    dfa.states()
       .iter()
       .all(|s| Bit::ALL.iter().all(|bit| s.next(bit.symbol()).is_some()))
}
