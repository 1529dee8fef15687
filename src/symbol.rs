//! Grammar symbols: terminals and non-terminals.

use std::fmt;

/// Whether a [`Symbol`] is consumed from the input (a terminal) or defined by
/// productions (a non-terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

/// An immutable grammar symbol: a name paired with its kind.
///
/// A terminal with an empty name is ε. The terminal named `$` is the
/// end-of-input marker. Equality, ordering and hashing are structural over
/// both fields, so a terminal and a non-terminal that happen to share a name
/// are distinct symbols.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    name: Box<str>,
    kind: SymbolKind,
}

impl Symbol {
    pub fn terminal(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into().into_boxed_str(),
            kind: SymbolKind::Terminal,
        }
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into().into_boxed_str(),
            kind: SymbolKind::NonTerminal,
        }
    }

    /// The empty-string terminal.
    pub fn epsilon() -> Self {
        Symbol::terminal("")
    }

    /// The reserved end-of-input terminal.
    pub fn end_of_input() -> Self {
        Symbol::terminal("$")
    }

    /// Builds a symbol from a bare name, guessing its kind from the leading
    /// character: upper-case starts a non-terminal, anything else (including
    /// punctuation, and the empty string) is a terminal.
    ///
    /// This is purely a convenience for constructing grammars in examples and
    /// tests; the authoritative kind always comes from [`Symbol::kind`], never
    /// from re-parsing a name.
    pub fn auto(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.chars().next() {
            Some(c) if c.is_uppercase() => Symbol::non_terminal(name),
            _ => Symbol::terminal(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, SymbolKind::Terminal)
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self.kind, SymbolKind::NonTerminal)
    }

    pub fn is_epsilon(&self) -> bool {
        self.is_terminal() && self.name.is_empty()
    }

    pub fn is_end_of_input(&self) -> bool {
        self.is_terminal() && &*self.name == "$"
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_epsilon() {
            return write!(f, "ε");
        }
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
