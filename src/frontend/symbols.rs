//! 符号环境
//!
//! Bookkeeping table of defined preprocessor-style symbols. Nothing here
//! expands a symbol; callers outside the translator consult the table.
//!
//! Mutation takes `&mut self`; callers sharing one table across threads
//! supply their own lock.

use indexmap::IndexSet;
use thiserror::Error;
use tracing::debug;

/// Symbol table misuse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("Symbol '{symbol}' is already defined")]
    AlreadyDefined { symbol: String },

    #[error("Symbol '{symbol}' is not defined")]
    NotDefined { symbol: String },
}

/// Defined symbols, in definition order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolEnvironment {
    symbols: IndexSet<String>,
}

impl SymbolEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `symbol`; defining it twice is an error
    pub fn define(
        &mut self,
        symbol: impl Into<String>,
    ) -> Result<(), SymbolError> {
        let symbol = symbol.into();
        if self.symbols.contains(&symbol) {
            return Err(SymbolError::AlreadyDefined { symbol });
        }
        debug!("Defining symbol {}", symbol);
        self.symbols.insert(symbol);
        Ok(())
    }

    /// Remove `symbol`; removing an absent symbol is an error
    pub fn undefine(
        &mut self,
        symbol: &str,
    ) -> Result<(), SymbolError> {
        if !self.symbols.shift_remove(symbol) {
            return Err(SymbolError::NotDefined {
                symbol: symbol.to_string(),
            });
        }
        debug!("Undefined symbol {}", symbol);
        Ok(())
    }

    pub fn is_defined(
        &self,
        symbol: &str,
    ) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}
