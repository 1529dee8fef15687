//! Canonical LR(1) parser table construction and a shift/reduce driver.
//!
//! Build a [`grammar::Grammar`], hand it to [`lr1::Lr1Builder`] to compute
//! the canonical collection of LR(1) item sets, turn that into a
//! [`table::ParseTable`], and drive it over a token stream with
//! [`parser::parse`] to get back a [`cst::Node`] concrete syntax tree.
//!
//! ```
//! use canon_lr1::grammar::{Grammar, Rule};
//! use canon_lr1::lr1::Lr1Builder;
//! use canon_lr1::parser::{self, Token};
//! use canon_lr1::symbol::Symbol;
//! use canon_lr1::table::AbortOnConflict;
//!
//! let rules = vec![
//!     Rule::new(Symbol::auto("S'"), vec![Symbol::auto("S")]).unwrap(),
//!     Rule::new(Symbol::auto("S"), vec![Symbol::auto("a")]).unwrap(),
//! ];
//! let grammar = Grammar::new(Symbol::auto("S'"), rules).unwrap();
//! let builder = Lr1Builder::new(&grammar);
//! let table = builder.build_table(&mut AbortOnConflict).unwrap();
//! let tokens = vec![
//!     Token::new(Symbol::auto("a"), "a"),
//!     Token::new(Symbol::end_of_input(), "$"),
//! ];
//! let tree = parser::parse(&table, tokens).unwrap();
//! assert_eq!(tree.label(), "S'");
//! ```

pub mod cst;
pub mod first;
pub mod follow;
pub mod grammar;
pub mod item;
pub mod lr1;
pub mod nullable;
pub mod parser;
pub mod symbol;
pub mod table;
