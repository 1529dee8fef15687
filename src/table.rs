//! The ACTION/GOTO table built from a canonical LR(1) collection, and the
//! pluggable policy for resolving shift/reduce and reduce/reduce conflicts.

use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use log::warn;

use crate::grammar::Rule;
use crate::lr1::{Lr1Builder, State};
use crate::symbol::Symbol;

/// One parser action: shift into a state, reduce by a rule, or accept.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Action {
    Shift(State),
    Reduce(Rc<Rule>),
    Accept,
}

/// The finished ACTION/GOTO table: one [`Action`] per (state, terminal) and
/// one successor state per (state, non-terminal).
pub struct ParseTable {
    action: IndexMap<(State, Symbol), Action>,
    goto: IndexMap<(State, Symbol), State>,
    state_count: usize,
    start_rule: Rc<Rule>,
}

impl ParseTable {
    pub fn action(&self, state: State, terminal: &Symbol) -> Option<&Action> {
        self.action.get(&(state, terminal.clone()))
    }

    pub fn goto(&self, state: State, non_terminal: &Symbol) -> Option<State> {
        self.goto.get(&(state, non_terminal.clone())).copied()
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// The augmenting rule `S' -> S` the table was built from. `ACCEPT`
    /// carries no rule of its own (it is not a normal reduction: there is no
    /// GOTO column for `S'`), so the driver consults this to build the CST's
    /// root node once parsing accepts.
    pub fn start_rule(&self) -> &Rc<Rule> {
        &self.start_rule
    }
}

/// A pair of actions that both claim the same (state, lookahead) cell.
#[derive(Clone, Debug)]
pub enum LrConflict {
    ShiftReduce {
        state: State,
        lookahead: Symbol,
        shift: State,
        reduce: Rc<Rule>,
    },
    ReduceReduce {
        state: State,
        lookahead: Symbol,
        first: Rc<Rule>,
        second: Rc<Rule>,
    },
}

impl fmt::Display for LrConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LrConflict::ShiftReduce {
                state,
                lookahead,
                shift,
                reduce,
            } => write!(
                f,
                "shift/reduce conflict in state {state} on `{lookahead}`: shift to {shift} or reduce by `{reduce}`"
            ),
            LrConflict::ReduceReduce {
                state,
                lookahead,
                first,
                second,
            } => write!(
                f,
                "reduce/reduce conflict in state {state} on `{lookahead}`: reduce by `{first}` or `{second}`"
            ),
        }
    }
}

impl StdError for LrConflict {}

#[derive(Debug)]
pub enum TableError {
    Conflict(LrConflict),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Conflict(c) => write!(f, "{c}"),
        }
    }
}

impl StdError for TableError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            TableError::Conflict(c) => Some(c),
        }
    }
}

/// Policy invoked whenever two distinct actions claim the same cell. Called
/// only after the two candidates have already been checked for equality, so
/// implementations never see a call where `existing == incoming`.
pub trait ConflictResolver {
    fn resolve(
        &mut self,
        state: State,
        lookahead: &Symbol,
        existing: &Action,
        incoming: &Action,
    ) -> Result<Action, LrConflict>;
}

/// The strict default policy: every genuine conflict is reported as an
/// error rather than silently broken one way or another.
pub struct AbortOnConflict;

impl ConflictResolver for AbortOnConflict {
    fn resolve(
        &mut self,
        state: State,
        lookahead: &Symbol,
        existing: &Action,
        incoming: &Action,
    ) -> Result<Action, LrConflict> {
        Err(conflict_from(state, lookahead.clone(), existing, incoming))
    }
}

fn conflict_from(state: State, lookahead: Symbol, existing: &Action, incoming: &Action) -> LrConflict {
    match (existing, incoming) {
        (Action::Shift(shift), Action::Reduce(reduce))
        | (Action::Reduce(reduce), Action::Shift(shift)) => LrConflict::ShiftReduce {
            state,
            lookahead,
            shift: *shift,
            reduce: reduce.clone(),
        },
        (Action::Reduce(first), Action::Reduce(second)) => LrConflict::ReduceReduce {
            state,
            lookahead,
            first: first.clone(),
            second: second.clone(),
        },
        _ => LrConflict::ReduceReduce {
            state,
            lookahead,
            first: existing_as_rule(existing),
            second: existing_as_rule(incoming),
        },
    }
}

/// Only reached for the degenerate Accept-vs-other case, which the builder
/// never actually produces (Accept only ever claims `$` in the state
/// reached from the augmenting item, which owns no other action).
fn existing_as_rule(action: &Action) -> Rc<Rule> {
    match action {
        Action::Reduce(rule) => rule.clone(),
        _ => unreachable!("accept never shares a cell with another action"),
    }
}

pub(crate) fn build(
    builder: &Lr1Builder,
    resolver: &mut dyn ConflictResolver,
) -> Result<ParseTable, TableError> {
    let mut action: IndexMap<(State, Symbol), Action> = IndexMap::new();
    let mut goto: IndexMap<(State, Symbol), State> = IndexMap::new();

    for (state, symbol, target) in builder.transitions() {
        if symbol.is_terminal() {
            set_action(&mut action, resolver, state, symbol.clone(), Action::Shift(target))?;
        } else {
            goto.insert((state, symbol.clone()), target);
        }
    }

    let start_rule = builder.grammar().start_rule();
    for state in 0..builder.state_count() {
        for item in builder.item_set(state).iter() {
            if !item.is_complete() {
                continue;
            }
            if item.rule() == start_rule && item.lookahead().is_end_of_input() {
                set_action(
                    &mut action,
                    resolver,
                    state,
                    Symbol::end_of_input(),
                    Action::Accept,
                )?;
            } else {
                set_action(
                    &mut action,
                    resolver,
                    state,
                    item.lookahead().clone(),
                    Action::Reduce(item.rule().clone()),
                )?;
            }
        }
    }

    Ok(ParseTable {
        action,
        goto,
        state_count: builder.state_count(),
        start_rule: start_rule.clone(),
    })
}

fn set_action(
    action: &mut IndexMap<(State, Symbol), Action>,
    resolver: &mut dyn ConflictResolver,
    state: State,
    symbol: Symbol,
    new_action: Action,
) -> Result<(), TableError> {
    match action.get(&(state, symbol.clone())) {
        None => {
            action.insert((state, symbol), new_action);
            Ok(())
        }
        Some(existing) if *existing == new_action => Ok(()),
        Some(existing) => match resolver.resolve(state, &symbol, existing, &new_action) {
            Ok(resolved) => {
                action.insert((state, symbol), resolved);
                Ok(())
            }
            Err(conflict) => {
                warn!("table: conflict in state {state} on `{symbol}`: {conflict}");
                Err(TableError::Conflict(conflict))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Grammar, Rule};

    fn sym(name: &str) -> Symbol {
        Symbol::auto(name)
    }

    fn augmented_grammar() -> Grammar {
        let rules = vec![
            Rule::new(sym("S'"), vec![sym("S")]).unwrap(),
            Rule::new(sym("S"), vec![sym("C"), sym("C")]).unwrap(),
            Rule::new(sym("C"), vec![sym("c"), sym("C")]).unwrap(),
            Rule::new(sym("C"), vec![sym("d")]).unwrap(),
        ];
        Grammar::new(sym("S'"), rules).unwrap()
    }

    #[test]
    fn accept_action_only_appears_on_end_of_input() {
        let grammar = augmented_grammar();
        let builder = Lr1Builder::new(&grammar);
        let table = builder.build_table(&mut AbortOnConflict).unwrap();
        let start = builder.start_state();
        assert!(table.action(start, &Symbol::end_of_input()).is_none());
        let has_accept = (0..table.state_count())
            .any(|s| matches!(table.action(s, &Symbol::end_of_input()), Some(Action::Accept)));
        assert!(has_accept);
    }

    #[test]
    fn ambiguous_grammar_reports_a_reduce_reduce_conflict() {
        // S -> A | B ; A -> a ; B -> a: after shifting `a` the parser cannot
        // tell whether to reduce to A or to B.
        let rules = vec![
            Rule::new(sym("S'"), vec![sym("S")]).unwrap(),
            Rule::new(sym("S"), vec![sym("A")]).unwrap(),
            Rule::new(sym("S"), vec![sym("B")]).unwrap(),
            Rule::new(sym("A"), vec![sym("a")]).unwrap(),
            Rule::new(sym("B"), vec![sym("a")]).unwrap(),
        ];
        let grammar = Grammar::new(sym("S'"), rules).unwrap();
        let builder = Lr1Builder::new(&grammar);
        let err = builder.build_table(&mut AbortOnConflict).unwrap_err();
        assert!(matches!(
            err,
            TableError::Conflict(LrConflict::ReduceReduce { .. })
        ));
    }
}
