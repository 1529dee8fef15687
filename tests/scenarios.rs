//! End-to-end scenarios driving the public API the way a consumer would:
//! build a grammar, build a table, parse, print the tree.

use canon_lr1::first::FirstSets;
use canon_lr1::follow::FollowSets;
use canon_lr1::grammar::{Grammar, Rule};
use canon_lr1::lr1::Lr1Builder;
use canon_lr1::parser::{self, Token};
use canon_lr1::symbol::Symbol;
use canon_lr1::table::{AbortOnConflict, Action, LrConflict, TableError};

fn sym(name: &str) -> Symbol {
    Symbol::auto(name)
}

fn tok(name: &str) -> Token {
    Token::new(sym(name), name)
}

/// Dragon book figure 4.42: S' -> S ; S -> C C ; C -> c C | d. The canonical
/// collection has exactly ten states.
#[test]
fn canonical_collection_matches_the_classic_ten_state_example() {
    env_logger::try_init().ok();
    let rules = vec![
        Rule::new(sym("S'"), vec![sym("S")]).unwrap(),
        Rule::new(sym("S"), vec![sym("C"), sym("C")]).unwrap(),
        Rule::new(sym("C"), vec![sym("c"), sym("C")]).unwrap(),
        Rule::new(sym("C"), vec![sym("d")]).unwrap(),
    ];
    let grammar = Grammar::new(sym("S'"), rules).unwrap();
    let builder = Lr1Builder::new(&grammar);
    assert_eq!(builder.state_count(), 10);

    let table = builder.build_table(&mut AbortOnConflict).unwrap();
    let tree = parser::parse(&table, vec![tok("c"), tok("d"), tok("d"), tok("$")]).unwrap();
    assert_eq!(tree.label(), "S'");
    assert_eq!(tree.children()[0].children().len(), 2);
}

/// A small expression grammar parses `id + id * id` into a tree that
/// reflects `*` binding tighter than `+`, using the left-recursive grammar
/// `{S'->E, E->E+T, E->T, T->T*F, T->F, F->(E), F->x}`.
#[test]
fn expression_grammar_respects_precedence_in_the_tree_shape() {
    env_logger::try_init().ok();
    let rules = vec![
        Rule::new(sym("S'"), vec![sym("E")]).unwrap(),
        Rule::new(sym("E"), vec![sym("E"), sym("+"), sym("T")]).unwrap(),
        Rule::new(sym("E"), vec![sym("T")]).unwrap(),
        Rule::new(sym("T"), vec![sym("T"), sym("*"), sym("F")]).unwrap(),
        Rule::new(sym("T"), vec![sym("F")]).unwrap(),
        Rule::new(sym("F"), vec![sym("("), sym("E"), sym(")")]).unwrap(),
        Rule::new(sym("F"), vec![sym("x")]).unwrap(),
    ];
    let grammar = Grammar::new(sym("S'"), rules).unwrap();
    let builder = Lr1Builder::new(&grammar);
    let table = builder.build_table(&mut AbortOnConflict).unwrap();

    let tokens = vec![tok("x"), tok("*"), tok("x"), tok("+"), tok("x"), tok("$")];
    let tree = parser::parse(&table, tokens).unwrap();

    let mut printed = String::new();
    tree.write_pretty(&mut printed).unwrap();
    assert_eq!(
        printed,
        "S'\n  E\n    E\n      T\n        T\n          F\n            x\n        *\n        F\n          x\n    +\n    T\n      F\n        x\n"
    );
}

/// An ε-heavy derivation still produces a CST: epsilon alternatives show up
/// as childless interior nodes rather than being skipped.
#[test]
fn single_token_input_still_walks_every_epsilon_alternative() {
    env_logger::try_init().ok();
    let rules = vec![
        Rule::new(sym("E'"), vec![sym("E")]).unwrap(),
        Rule::new(sym("E"), vec![sym("T"), sym("Ep")]).unwrap(),
        Rule::new(sym("Ep"), vec![sym("+"), sym("T"), sym("Ep")]).unwrap(),
        Rule::new(sym("Ep"), vec![]).unwrap(),
        Rule::new(sym("T"), vec![sym("F"), sym("Tp")]).unwrap(),
        Rule::new(sym("Tp"), vec![sym("*"), sym("F"), sym("Tp")]).unwrap(),
        Rule::new(sym("Tp"), vec![]).unwrap(),
        Rule::new(sym("F"), vec![sym("("), sym("E"), sym(")")]).unwrap(),
        Rule::new(sym("F"), vec![sym("id")]).unwrap(),
    ];
    let grammar = Grammar::new(sym("E'"), rules).unwrap();
    let builder = Lr1Builder::new(&grammar);
    let table = builder.build_table(&mut AbortOnConflict).unwrap();

    let tree = parser::parse(&table, vec![tok("id"), tok("$")]).unwrap();
    let mut printed = String::new();
    tree.write_pretty(&mut printed).unwrap();
    assert_eq!(
        printed,
        "E'\n  E\n    T\n      F\n        id\n      Tp\n    Ep\n"
    );
}

/// A grammar with a genuine ambiguity is rejected rather than silently
/// picking a winner: `{S'->E, E->E+E, E->x}` is ambiguous about
/// associativity, which shows up as a shift/reduce conflict on `+`.
#[test]
fn ambiguous_grammar_is_rejected_with_a_conflict_error() {
    env_logger::try_init().ok();
    let rules = vec![
        Rule::new(sym("S'"), vec![sym("E")]).unwrap(),
        Rule::new(sym("E"), vec![sym("E"), sym("+"), sym("E")]).unwrap(),
        Rule::new(sym("E"), vec![sym("x")]).unwrap(),
    ];
    let grammar = Grammar::new(sym("S'"), rules).unwrap();
    let builder = Lr1Builder::new(&grammar);
    match builder.build_table(&mut AbortOnConflict) {
        Err(TableError::Conflict(LrConflict::ShiftReduce { lookahead, .. })) => {
            assert_eq!(lookahead, sym("+"));
        }
        other => panic!("expected a shift/reduce conflict on `+`, got {other:?}"),
    }
}

/// Feeding a token the grammar never expects in a given state is a
/// `ParseError`, not a panic.
#[test]
fn malformed_input_is_a_parse_error_not_a_panic() {
    env_logger::try_init().ok();
    let rules = vec![
        Rule::new(sym("S'"), vec![sym("S")]).unwrap(),
        Rule::new(sym("S"), vec![sym("a"), sym("b")]).unwrap(),
    ];
    let grammar = Grammar::new(sym("S'"), rules).unwrap();
    let builder = Lr1Builder::new(&grammar);
    let table = builder.build_table(&mut AbortOnConflict).unwrap();

    let err = parser::parse(&table, vec![tok("a"), tok("a"), tok("$")]).unwrap_err();
    match err {
        parser::ParseError::UnexpectedToken { lookahead, .. } => {
            assert_eq!(lookahead, sym("a"));
        }
    }
}

/// FIRST and FOLLOW agree with the textbook sets for the classic arithmetic
/// grammar (Dragon book, example 4.26).
#[test]
fn first_and_follow_match_the_textbook_arithmetic_grammar() {
    env_logger::try_init().ok();
    let rules = vec![
        Rule::new(sym("E'"), vec![sym("E")]).unwrap(),
        Rule::new(sym("E"), vec![sym("T"), sym("Ep")]).unwrap(),
        Rule::new(sym("Ep"), vec![sym("+"), sym("T"), sym("Ep")]).unwrap(),
        Rule::new(sym("Ep"), vec![]).unwrap(),
        Rule::new(sym("T"), vec![sym("F"), sym("Tp")]).unwrap(),
        Rule::new(sym("Tp"), vec![sym("*"), sym("F"), sym("Tp")]).unwrap(),
        Rule::new(sym("Tp"), vec![]).unwrap(),
        Rule::new(sym("F"), vec![sym("("), sym("E"), sym(")")]).unwrap(),
        Rule::new(sym("F"), vec![sym("id")]).unwrap(),
    ];
    let grammar = Grammar::new(sym("E'"), rules).unwrap();
    let first = FirstSets::solve(&grammar);
    let follow = FollowSets::solve(&grammar, &first);

    for nt in ["E", "T", "F"] {
        let firsts = first.of_symbol(&sym(nt));
        assert!(firsts.contains(&sym("(")));
        assert!(firsts.contains(&sym("id")));
        assert_eq!(firsts.len(), 2);
    }

    let follow_e = follow.of(&sym("E"));
    assert!(follow_e.contains(&sym(")")));
    assert!(follow_e.contains(&Symbol::end_of_input()));
    assert_eq!(follow_e.len(), 2);

    assert_eq!(follow.of(&sym("Ep")), follow.of(&sym("E")));
    assert_eq!(follow.of(&sym("Tp")), follow.of(&sym("T")));
}

/// The accept action only ever appears on `$`, and exactly one state
/// produces it.
#[test]
fn accept_is_unique_and_keyed_on_end_of_input() {
    env_logger::try_init().ok();
    let rules = vec![
        Rule::new(sym("S'"), vec![sym("S")]).unwrap(),
        Rule::new(sym("S"), vec![sym("a")]).unwrap(),
    ];
    let grammar = Grammar::new(sym("S'"), rules).unwrap();
    let builder = Lr1Builder::new(&grammar);
    let table = builder.build_table(&mut AbortOnConflict).unwrap();

    let accept_states: Vec<usize> = (0..table.state_count())
        .filter(|&s| matches!(table.action(s, &Symbol::end_of_input()), Some(Action::Accept)))
        .collect();
    assert_eq!(accept_states.len(), 1);
}
