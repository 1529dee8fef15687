//! The canonical LR(1) automaton builder: closure, GOTO, and the worklist
//! that assembles the canonical collection into dense state handles.

use indexmap::IndexMap;
use log::{debug, trace};

use crate::first::FirstSets;
use crate::grammar::Grammar;
use crate::item::{Item, ItemSet};
use crate::symbol::Symbol;
use crate::table::{self, ConflictResolver, ParseTable, TableError};

/// A dense handle into the canonical collection, assigned in discovery
/// order by the worklist so state `0` is always the start state.
pub type State = usize;

/// Builds the canonical collection of LR(1) item sets for a grammar and
/// turns it into an [`ParseTable`].
///
/// Borrows the grammar for its whole lifetime: every [`Item`] it produces
/// holds an `Rc<Rule>` cloned from the grammar's own rule list, so the
/// states it builds stay valid even if the caller drops this builder.
pub struct Lr1Builder<'g> {
    grammar: &'g Grammar,
    first: FirstSets,
    states: Vec<ItemSet>,
    transitions: IndexMap<(State, Symbol), State>,
}

impl<'g> Lr1Builder<'g> {
    pub fn new(grammar: &'g Grammar) -> Lr1Builder<'g> {
        let first = FirstSets::solve(grammar);
        let mut builder = Lr1Builder {
            grammar,
            first,
            states: Vec::new(),
            transitions: IndexMap::new(),
        };
        builder.build();
        builder
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn first_sets(&self) -> &FirstSets {
        &self.first
    }

    pub fn start_state(&self) -> State {
        0
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn item_set(&self, state: State) -> &ItemSet {
        &self.states[state]
    }

    pub fn transition(&self, state: State, symbol: &Symbol) -> Option<State> {
        self.transitions.get(&(state, symbol.clone())).copied()
    }

    pub fn transitions(&self) -> impl Iterator<Item = (State, &Symbol, State)> {
        self.transitions
            .iter()
            .map(|((state, symbol), target)| (*state, symbol, *target))
    }

    fn build(&mut self) {
        let mut start_items = ItemSet::new();
        start_items.insert(Item::start(
            self.grammar.start_rule().clone(),
            Symbol::end_of_input(),
        ));
        let start = self.closure(start_items);

        let mut index_of: IndexMap<ItemSet, State> = IndexMap::new();
        index_of.insert(start.clone(), 0);
        self.states.push(start);

        let mut worklist: Vec<State> = vec![0];
        while let Some(state) = worklist.pop() {
            for symbol in self.grammar.symbols() {
                if symbol.is_epsilon() || symbol.is_end_of_input() {
                    continue;
                }
                let target_items = self.goto(&self.states[state], symbol);
                if target_items.is_empty() {
                    continue;
                }
                let target_state = if let Some(&existing) = index_of.get(&target_items) {
                    existing
                } else {
                    let new_state = self.states.len();
                    index_of.insert(target_items.clone(), new_state);
                    self.states.push(target_items);
                    worklist.push(new_state);
                    new_state
                };
                self.transitions
                    .insert((state, symbol.clone()), target_state);
            }
        }

        debug!(
            "lr1: canonical collection has {} states, {} transitions",
            self.states.len(),
            self.transitions.len()
        );
    }

    /// Closes an item set under the standard LR(1) closure rule: for every
    /// item `[A -> α·Bβ, a]` with `B` a non-terminal, add `[B -> ·γ, b]` for
    /// every production `B -> γ` and every `b` in FIRST(βa).
    fn closure(&self, mut items: ItemSet) -> ItemSet {
        loop {
            let mut additions = Vec::new();
            for item in items.iter() {
                let Some(current) = item.current() else {
                    continue;
                };
                if current.is_terminal() {
                    continue;
                }
                let lookaheads = self
                    .first
                    .of_sequence_with_lookahead(item.rest(), item.lookahead());
                for rule in self.grammar.rules_for(current) {
                    for lookahead in &lookaheads {
                        let new_item = Item::start(rule.clone(), lookahead.clone());
                        if !items.contains(&new_item) {
                            additions.push(new_item);
                        }
                    }
                }
            }
            if additions.is_empty() {
                break;
            }
            for item in additions {
                items.insert(item);
            }
        }
        items
    }

    /// GOTO(I, X): advance every item of `I` whose current symbol is `X`,
    /// then close the result.
    fn goto(&self, items: &ItemSet, symbol: &Symbol) -> ItemSet {
        let advanced: ItemSet = items
            .iter()
            .filter(|item| item.current() == Some(symbol))
            .map(Item::advance)
            .collect();
        if advanced.is_empty() {
            return advanced;
        }
        self.closure(advanced)
    }

    /// Builds the ACTION/GOTO table from the canonical collection, invoking
    /// `resolver` whenever a state would otherwise get two actions for the
    /// same lookahead.
    pub fn build_table(&self, resolver: &mut dyn ConflictResolver) -> Result<ParseTable, TableError> {
        trace!("lr1: building parse table from {} states", self.states.len());
        table::build(self, resolver)
    }
}
