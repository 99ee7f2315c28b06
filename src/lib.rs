// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

#![deny(missing_docs)]

//! Compiles binary patterns (`0`, `1`, groups and Kleene stars) into
//! deterministic automata over {0,1} and prints their transition tables.

/// dfa api
pub mod dfa;
/// pattern api
pub mod pattern;
/// session api
pub mod session;

pub use crate::pattern::compiler::CompileError;
pub use crate::session::Session;
