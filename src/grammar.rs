//! Grammar: the symbol/rule model that every solver and the LR(1) builder
//! borrows for the duration of their computation.

use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

use crate::symbol::Symbol;

/// A production `head -> body`.
///
/// An empty body, or a body consisting of the single ε terminal, both encode
/// an ε-production; [`Rule::is_epsilon`] treats them identically and
/// [`Rule::body`] normalizes away the explicit ε so callers never have to
/// special-case it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rule {
    head: Symbol,
    body: Vec<Symbol>,
}

impl Rule {
    pub fn new(head: Symbol, body: Vec<Symbol>) -> Result<Rule, GrammarError> {
        if !head.is_non_terminal() {
            return Err(GrammarError::HeadNotNonTerminal(head));
        }
        let body = if body.len() == 1 && body[0].is_epsilon() {
            Vec::new()
        } else {
            body
        };
        for symbol in &body {
            if symbol.is_epsilon() || symbol.is_end_of_input() {
                return Err(GrammarError::ReservedSymbolInBody(symbol.clone()));
            }
        }
        Ok(Rule { head, body })
    }

    pub fn head(&self) -> &Symbol {
        &self.head
    }

    /// The production's right-hand side, with any explicit ε already
    /// stripped; an ε-production reports an empty slice here.
    pub fn body(&self) -> &[Symbol] {
        &self.body
    }

    pub fn is_epsilon(&self) -> bool {
        self.body.is_empty()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.head)?;
        if self.body.is_empty() {
            write!(f, " ε")?;
        } else {
            for symbol in &self.body {
                write!(f, " {}", symbol)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A validated, immutable context-free grammar.
///
/// Symbols are indexed in first-appearance order (start symbol, then each
/// rule's head and body in the order the rules were supplied) so that every
/// solver and the LR(1) builder iterate symbols deterministically without
/// recomputing an order of their own.
pub struct Grammar {
    start: Symbol,
    rules: Vec<Rc<Rule>>,
    rules_by_head: IndexMap<Symbol, Vec<Rc<Rule>>>,
    symbols: IndexSet<Symbol>,
    terminals: IndexSet<Symbol>,
    non_terminals: IndexSet<Symbol>,
}

impl Grammar {
    pub fn new(start: Symbol, rules: Vec<Rule>) -> Result<Grammar, GrammarError> {
        if !start.is_non_terminal() {
            return Err(GrammarError::StartNotNonTerminal(start));
        }
        if !rules.iter().any(|rule| *rule.head() == start) {
            return Err(GrammarError::StartHasNoRule(start));
        }

        let mut symbols = IndexSet::new();
        let mut terminals = IndexSet::new();
        let mut non_terminals = IndexSet::new();
        symbols.insert(start.clone());
        non_terminals.insert(start.clone());

        let mut rules_by_head: IndexMap<Symbol, Vec<Rc<Rule>>> = IndexMap::new();
        let mut owned_rules = Vec::with_capacity(rules.len());
        for rule in rules {
            symbols.insert(rule.head().clone());
            non_terminals.insert(rule.head().clone());
            for symbol in rule.body() {
                symbols.insert(symbol.clone());
                if symbol.is_terminal() {
                    terminals.insert(symbol.clone());
                } else {
                    non_terminals.insert(symbol.clone());
                }
            }
            let rule = Rc::new(rule);
            rules_by_head
                .entry(rule.head().clone())
                .or_default()
                .push(rule.clone());
            owned_rules.push(rule);
        }

        let start_rule = &rules_by_head[&start][0];
        if start_rule.is_epsilon() || start_rule.body().len() != 1 {
            return Err(GrammarError::StartRuleWrongArity(start_rule.clone()));
        }

        terminals.insert(Symbol::end_of_input());
        symbols.insert(Symbol::end_of_input());

        Ok(Grammar {
            start,
            rules: owned_rules,
            rules_by_head,
            symbols,
            terminals,
            non_terminals,
        })
    }

    pub fn start(&self) -> &Symbol {
        &self.start
    }

    /// The sole rule `S' -> S` used to seed the canonical collection.
    pub fn start_rule(&self) -> &Rc<Rule> {
        &self.rules_by_head[&self.start][0]
    }

    pub fn rules(&self) -> &[Rc<Rule>] {
        &self.rules
    }

    pub fn rules_for(&self, head: &Symbol) -> &[Rc<Rule>] {
        self.rules_by_head
            .get(head)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All symbols in first-appearance order, including the synthetic `$`.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn terminals(&self) -> impl Iterator<Item = &Symbol> {
        self.terminals.iter()
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &Symbol> {
        self.non_terminals.iter()
    }
}

/// Rejections raised while validating a [`Grammar`] or a [`Rule`] before it
/// becomes part of one.
#[derive(Debug, Clone)]
pub enum GrammarError {
    StartNotNonTerminal(Symbol),
    StartHasNoRule(Symbol),
    StartRuleWrongArity(Rc<Rule>),
    HeadNotNonTerminal(Symbol),
    ReservedSymbolInBody(Symbol),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::StartNotNonTerminal(s) => {
                write!(f, "start symbol `{s}` is not a non-terminal")
            }
            GrammarError::StartHasNoRule(s) => {
                write!(f, "start symbol `{s}` has no rule with it as head")
            }
            GrammarError::StartRuleWrongArity(r) => write!(
                f,
                "start rule `{r}` must have exactly one non-epsilon body symbol"
            ),
            GrammarError::HeadNotNonTerminal(s) => {
                write!(f, "rule head `{s}` is not a non-terminal")
            }
            GrammarError::ReservedSymbolInBody(s) => write!(
                f,
                "reserved symbol `{s}` (ε or end-of-input) cannot appear in a rule body"
            ),
        }
    }
}

impl StdError for GrammarError {}
