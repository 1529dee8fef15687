//! FIRST-set solver: another monotone fixpoint, layered on [`Nullable`].

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use log::{debug, trace};

use crate::grammar::Grammar;
use crate::nullable::Nullable;
use crate::symbol::Symbol;

/// FIRST(X) for every grammar symbol, plus the shared [`Nullable`] table used
/// to extend FIRST across a sequence.
pub struct FirstSets {
    table: BTreeMap<Symbol, BTreeSet<Symbol>>,
    nullable: Nullable,
}

impl FirstSets {
    pub fn solve(grammar: &Grammar) -> FirstSets {
        let nullable = Nullable::solve(grammar);
        let mut table: BTreeMap<Symbol, BTreeSet<Symbol>> = BTreeMap::new();
        for terminal in grammar.terminals() {
            table
                .entry(terminal.clone())
                .or_default()
                .insert(terminal.clone());
        }
        for non_terminal in grammar.non_terminals() {
            table.entry(non_terminal.clone()).or_default();
        }

        loop {
            let mut changed = false;
            for rule in grammar.rules() {
                let mut added = BTreeSet::new();
                for symbol in rule.body() {
                    let symbol_first = table.get(symbol).cloned().unwrap_or_default();
                    added.extend(symbol_first);
                    if !nullable.is_nullable(symbol) {
                        break;
                    }
                }
                let head_first = table.entry(rule.head().clone()).or_default();
                let before = head_first.len();
                head_first.extend(added);
                if head_first.len() != before {
                    trace!("first: grew FIRST({}) via `{}`", rule.head(), rule);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        debug!("first: solved FIRST for {} symbols", table.len());
        check_empty_sets(grammar, &table, &nullable);
        FirstSets { table, nullable }
    }

    pub fn nullable(&self) -> &Nullable {
        &self.nullable
    }

    /// FIRST(X) for a single symbol. Non-terminals never seen in the grammar
    /// report an empty set rather than panicking, since callers may probe
    /// symbols built ad hoc (e.g. while constructing a lookahead).
    pub fn of_symbol(&self, symbol: &Symbol) -> BTreeSet<Symbol> {
        if symbol.is_terminal() {
            let mut set = BTreeSet::new();
            set.insert(symbol.clone());
            return set;
        }
        self.table.get(symbol).cloned().unwrap_or_default()
    }

    /// FIRST(alpha) for a symbol sequence, per the standard concatenation
    /// rule: union FIRST of each symbol in turn, stopping at the first
    /// non-nullable one. ε is never a member of the result; a fully
    /// nullable sequence simply reports the union collected so far.
    pub fn of_sequence(&self, symbols: &[Symbol]) -> BTreeSet<Symbol> {
        self.of_sequence_with_nullability(symbols).0
    }

    /// FIRST(alpha a) used when building lookaheads for LR(1) items: FIRST of
    /// the sequence with `lookahead` appended as if it always terminated the
    /// sequence.
    pub fn of_sequence_with_lookahead(&self, symbols: &[Symbol], lookahead: &Symbol) -> BTreeSet<Symbol> {
        let (mut result, sequence_nullable) = self.of_sequence_with_nullability(symbols);
        if sequence_nullable {
            result.insert(lookahead.clone());
        }
        result
    }

    /// FIRST(alpha) plus whether the whole sequence is nullable, computed in
    /// one pass so callers needing both never reconstruct nullability by
    /// probing for a sentinel in the returned set.
    fn of_sequence_with_nullability(&self, symbols: &[Symbol]) -> (BTreeSet<Symbol>, bool) {
        let mut result = BTreeSet::new();
        for symbol in symbols {
            result.extend(self.of_symbol(symbol));
            if !self.nullable.is_nullable(symbol) {
                return (result, false);
            }
        }
        (result, true)
    }
}

/// A non-terminal with an empty FIRST set that is also not nullable can
/// never start deriving a terminal: either nothing in the grammar has it
/// as a head, or every one of its alternatives recurses without a
/// terminal base case.
fn check_empty_sets(grammar: &Grammar, table: &BTreeMap<Symbol, BTreeSet<Symbol>>, nullable: &Nullable) {
    for non_terminal in grammar.non_terminals() {
        let is_empty = table.get(non_terminal).map_or(true, BTreeSet::is_empty);
        if is_empty && !nullable.is_nullable(non_terminal) {
            panic!(
                "FIRST set empty for grammar symbol `{non_terminal}`.\n\
                 An infinite recursion on the grammar symbol."
            );
        }
    }
}
