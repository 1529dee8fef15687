//! FOLLOW-set solver. Not used by the canonical LR(1) core itself (LR(1)
//! lookaheads are carried per-item instead), but kept as a public utility for
//! callers who want classic FOLLOW sets, e.g. to sanity-check a grammar.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use log::{debug, trace};

use crate::first::FirstSets;
use crate::grammar::Grammar;
use crate::symbol::Symbol;

pub struct FollowSets {
    table: BTreeMap<Symbol, BTreeSet<Symbol>>,
}

impl FollowSets {
    pub fn solve(grammar: &Grammar, first: &FirstSets) -> FollowSets {
        let mut table: BTreeMap<Symbol, BTreeSet<Symbol>> = BTreeMap::new();
        for non_terminal in grammar.non_terminals() {
            table.entry(non_terminal.clone()).or_default();
        }
        table
            .entry(grammar.start().clone())
            .or_default()
            .insert(Symbol::end_of_input());

        loop {
            let mut changed = false;
            for rule in grammar.rules() {
                let body = rule.body();
                for (i, symbol) in body.iter().enumerate() {
                    if symbol.is_terminal() {
                        continue;
                    }
                    let rest = &body[i + 1..];
                    let contribution = first.of_sequence(rest);
                    let rest_nullable = first.nullable().is_nullable_sequence(rest);

                    let entry = table.entry(symbol.clone()).or_default();
                    let before = entry.len();
                    entry.extend(contribution);
                    if before != entry.len() {
                        changed = true;
                    }

                    if rest_nullable {
                        let head_follow = table.get(rule.head()).cloned().unwrap_or_default();
                        let entry = table.entry(symbol.clone()).or_default();
                        let before = entry.len();
                        entry.extend(head_follow);
                        if before != entry.len() {
                            trace!("follow: grew FOLLOW({}) via `{}`", symbol, rule);
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }

        debug!("follow: solved FOLLOW for {} non-terminals", table.len());
        FollowSets { table }
    }

    pub fn of(&self, non_terminal: &Symbol) -> BTreeSet<Symbol> {
        self.table.get(non_terminal).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Rule;

    fn sym(name: &str) -> Symbol {
        Symbol::auto(name)
    }

    fn classic_grammar() -> Grammar {
        let rules = vec![
            Rule::new(sym("E"), vec![sym("T"), sym("Ep")]).unwrap(),
            Rule::new(sym("Ep"), vec![sym("+"), sym("T"), sym("Ep")]).unwrap(),
            Rule::new(sym("Ep"), vec![]).unwrap(),
            Rule::new(sym("T"), vec![sym("F"), sym("Tp")]).unwrap(),
            Rule::new(sym("Tp"), vec![sym("*"), sym("F"), sym("Tp")]).unwrap(),
            Rule::new(sym("Tp"), vec![]).unwrap(),
            Rule::new(sym("F"), vec![sym("("), sym("E"), sym(")")]).unwrap(),
            Rule::new(sym("F"), vec![sym("id")]).unwrap(),
        ];
        Grammar::new(sym("E"), rules).unwrap()
    }

    #[test]
    fn follow_of_start_symbol_contains_end_of_input() {
        let grammar = classic_grammar();
        let first = FirstSets::solve(&grammar);
        let follow = FollowSets::solve(&grammar, &first);
        assert!(follow.of(&sym("E")).contains(&Symbol::end_of_input()));
    }

    #[test]
    fn follow_of_e_includes_close_paren_and_end_of_input() {
        let grammar = classic_grammar();
        let first = FirstSets::solve(&grammar);
        let follow = FollowSets::solve(&grammar, &first);
        let follow_e = follow.of(&sym("E"));
        assert!(follow_e.contains(&sym(")")));
        assert!(follow_e.contains(&Symbol::end_of_input()));
    }

    #[test]
    fn follow_of_ep_equals_follow_of_e() {
        let grammar = classic_grammar();
        let first = FirstSets::solve(&grammar);
        let follow = FollowSets::solve(&grammar, &first);
        assert_eq!(follow.of(&sym("Ep")), follow.of(&sym("E")));
    }
}
