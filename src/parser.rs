//! The shift/reduce driver: walks a token stream against a [`ParseTable`]
//! and assembles a [`Node`] concrete syntax tree.

use std::error::Error as StdError;
use std::fmt;

use log::trace;

use crate::cst::Node;
use crate::symbol::Symbol;
use crate::table::{Action, ParseTable};

/// One input token: the terminal it matches plus the text the lexer read
/// for it, which becomes a leaf node's label.
#[derive(Clone, Debug)]
pub struct Token {
    pub symbol: Symbol,
    pub text: String,
}

impl Token {
    pub fn new(symbol: Symbol, text: impl Into<String>) -> Token {
        Token {
            symbol,
            text: text.into(),
        }
    }
}

/// Drives `table` over `tokens`, shifting and reducing until Accept,
/// returning the root of the resulting concrete syntax tree.
///
/// `tokens` must end with an explicit end-of-input token (built from
/// [`Symbol::end_of_input`]); the driver never fabricates one on the
/// caller's behalf.
pub fn parse(
    table: &ParseTable,
    tokens: impl IntoIterator<Item = Token>,
) -> Result<Node, ParseError> {
    let mut tokens = tokens.into_iter();
    let mut state_stack: Vec<usize> = vec![0];
    let mut node_stack: Vec<Node> = Vec::new();
    let mut lookahead = next_token(&mut tokens);

    loop {
        let state = *state_stack.last().expect("state stack is never empty");
        let action = table
            .action(state, &lookahead.symbol)
            .ok_or_else(|| ParseError::UnexpectedToken {
                state,
                lookahead: lookahead.symbol.clone(),
            })?
            .clone();

        match action {
            Action::Shift(next) => {
                trace!("parse: shift `{}` -> state {next}", lookahead.symbol);
                node_stack.push(Node::leaf(lookahead.text.clone()));
                state_stack.push(next);
                lookahead = next_token(&mut tokens);
            }
            Action::Reduce(rule) => {
                trace!("parse: reduce by `{rule}` in state {state}");
                let arity = rule.body().len();
                let children = if arity == 0 {
                    Vec::new()
                } else {
                    let split_at = node_stack.len() - arity;
                    node_stack.split_off(split_at)
                };
                state_stack.truncate(state_stack.len() - arity);
                let exposed = *state_stack.last().expect("state stack is never empty");
                let goto = table.goto(exposed, rule.head()).expect(
                    "a reduce the table produced always has a matching GOTO for its exposed state",
                );
                node_stack.push(Node::interior(rule.head().name(), children));
                state_stack.push(goto);
            }
            Action::Accept => {
                trace!("parse: accept");
                // ACCEPT is not a normal reduce (there is no GOTO column for
                // the augmenting head), but the CST still roots at it: wrap
                // the single remaining node as the start rule's head.
                let start_rule = table.start_rule();
                let root = node_stack
                    .pop()
                    .expect("accept leaves exactly one node on the stack");
                return Ok(Node::interior(start_rule.head().name(), vec![root]));
            }
        }
    }
}

fn next_token(tokens: &mut impl Iterator<Item = Token>) -> Token {
    tokens.next().expect(
        "token stream exhausted without an explicit end-of-input token; the caller must supply one",
    )
}

/// A parse that could not continue.
#[derive(Clone, Debug)]
pub enum ParseError {
    /// `state`'s row has no action for `lookahead`.
    UnexpectedToken { state: usize, lookahead: Symbol },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { state, lookahead } => {
                write!(f, "no action for `{lookahead}` in state {state}")
            }
        }
    }
}

impl StdError for ParseError {}
