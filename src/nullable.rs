//! Nullable-symbol solver: a monotone fixpoint over the grammar's
//! non-terminals (Dragon book, section 4.4).

use std::collections::BTreeSet;

use log::{debug, trace};

use crate::grammar::Grammar;
use crate::symbol::Symbol;

/// The set of non-terminals that can derive ε, computed once and held
/// immutable afterward.
pub struct Nullable {
    set: BTreeSet<Symbol>,
}

impl Nullable {
    pub fn solve(grammar: &Grammar) -> Nullable {
        let mut set = BTreeSet::new();
        loop {
            let mut changed = false;
            for rule in grammar.rules() {
                if set.contains(rule.head()) {
                    continue;
                }
                let derives_epsilon =
                    rule.is_epsilon() || rule.body().iter().all(|s| set.contains(s));
                if derives_epsilon {
                    trace!("nullable: {} derives ε via `{}`", rule.head(), rule);
                    set.insert(rule.head().clone());
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        let total = grammar.non_terminals().count();
        debug!("nullable: {} of {} non-terminals are nullable", set.len(), total);
        Nullable { set }
    }

    pub fn is_nullable(&self, symbol: &Symbol) -> bool {
        symbol.is_epsilon() || (symbol.is_non_terminal() && self.set.contains(symbol))
    }

    pub fn is_nullable_sequence(&self, symbols: &[Symbol]) -> bool {
        symbols.iter().all(|s| self.is_nullable(s))
    }
}
