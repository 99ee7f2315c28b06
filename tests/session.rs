// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::rc::Rc;

use re2dfa::dfa::core::{new_sink, Automaton, Role, Target};
use re2dfa::dfa::totalize::{is_total, totalize};
use re2dfa::pattern::compiler::compile;
use re2dfa::pattern::reader::PatternReader;
use re2dfa::{CompileError, Session};

#[test]
fn binary_literals_form_a_path() {
    let samples = vec!["0", "1", "01", "110", "0101101"];
    let mut session = Session::new();
    for pattern in samples {
        let lines = session.compile_and_render(pattern).unwrap();
        let dfa = session.automaton().unwrap();
        assert_eq!(dfa.len(), pattern.len() + 1);

        let mut state = dfa.start();
        for symb in pattern.chars() {
            let other = if symb == '0' { '1' } else { '0' };
            assert_eq!(dfa.next(state, other), Some(Target::Sink));
            state = match dfa.next(state, symb) {
                Some(Target::State(next)) => next,
                other => panic!("edge expected, got {:?}", other),
            };
        }
        assert_eq!(dfa.next(state, '0'), Some(Target::Sink));
        assert_eq!(dfa.next(state, '1'), Some(Target::Sink));

        let finals: Vec<usize> = dfa.states().iter().filter(|s| s.is_final()).map(|s| s.id()).collect();
        assert_eq!(finals, vec![pattern.len()]);
        assert_eq!(lines.len(), 2 * (pattern.len() + 1));
        assert_eq!(lines.iter().filter(|l| l.ends_with("reject")).count(), pattern.len() + 2);
    }
}

#[test]
fn totalization_is_idempotent() {
    let mut dfa = Automaton::new(new_sink());
    compile(&mut dfa, "0(1)*1a*").unwrap();
    assert!(totalize(&mut dfa) > 0);
    assert!(is_total(&dfa));
    let once = dfa.states().to_vec();
    assert_eq!(totalize(&mut dfa), 0);
    assert_eq!(dfa.states(), &once[..]);
}

#[test]
fn kleene_star_and_groups() {
    let mut session = Session::new();
    let samples =
        vec![("0*", vec!["([`q0], 0) -> [q1]",
                         "([`q0], 1) -> reject",
                         "([q1], 0) -> [q1]",
                         "([q1], 1) -> reject"]),
             ("(01)", vec!["(`q0, 0) -> [q1]",
                           "(`q0, 1) -> [q1]",
                           "([q1], 0) -> reject",
                           "([q1], 1) -> reject"]),
             ("(0)*", vec!["([`q0], 0) -> [q1]",
                           "([`q0], 1) -> [q1]",
                           "([q1], 0) -> [q1]",
                           "([q1], 1) -> [q1]"]),
             ("1(0)*1", vec!["(`q0, 0) -> reject",
                             "(`q0, 1) -> q1",
                             "(q1, 0) -> [q2]",
                             "(q1, 1) -> [q3]",
                             "([q2], 0) -> [q2]",
                             "([q2], 1) -> [q2]",
                             "([q3], 0) -> reject",
                             "([q3], 1) -> reject"]),];

    for (pattern, expected) in samples {
        assert_eq!(session.compile_and_render(pattern).unwrap(), expected, "pattern {:?}", pattern);
    }
}

#[test]
fn unbalanced_group() {
    let mut session = Session::new();
    match session.compile_and_render("(0") {
        Err(CompileError::UnbalancedParentheses{position}) => assert_eq!(position, 0),
        _ => assert!(false, "UnbalancedParentheses expected."),
    }
    let dfa = session.automaton().unwrap();
    assert_eq!(dfa.len(), 1);
    assert_eq!(dfa.next(dfa.start(), '0'), Some(Target::Sink));
    assert_eq!(dfa.next(dfa.start(), '1'), Some(Target::Sink));
}

#[test]
fn union_symbol_is_a_literal() {
    let mut session = Session::new();
    let lines = session.compile_and_render("0U1").unwrap();
    assert!(lines.contains(&"(q1, U) -> q2".to_owned()));
    assert_eq!(session.automaton().unwrap().len(), 4);
}

#[test]
fn rebuild_keeps_only_the_sink() {
    let mut session = Session::new();
    session.compile_and_render("(1)*0").unwrap();
    let old_start = session.automaton().unwrap().start();
    assert_eq!(session.automaton().unwrap().len(), 3);
    let old_sink = Rc::clone(session.sink().unwrap());

    session.compile_and_render("1").unwrap();
    let dfa = session.automaton().unwrap();
    assert!(dfa.state(old_start).is_none());
    assert_eq!(dfa.len(), 2);
    assert!(Rc::ptr_eq(&old_sink, dfa.sink()));
    assert_eq!(dfa.sink().role(), Role::Sink);
    assert_eq!(dfa.sink().transitions().len(), 2);
    assert!(dfa.sink().transitions().iter().all(|(_, dest)| dest == Target::Sink));
}

#[test]
fn reader_feeds_session() {
    let input = "0*\r\n(0\n\n1\nSTOP\n11\n";
    let mut session = Session::new();
    let mut outcomes = Vec::new();
    for pattern in PatternReader::from_string(input) {
        let pattern = pattern.unwrap();
        outcomes.push(session.compile_and_render(&pattern).map(|lines| lines.len()));
    }
    assert_eq!(outcomes,
               vec![Ok(4),
                    Err(CompileError::UnbalancedParentheses{position: 0}),
                    Ok(2),
                    Ok(4)]);
}
