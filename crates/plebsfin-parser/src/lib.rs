//! Bank statement parser
//!
//! Best-effort extraction of `{date, description, amount}` candidates from
//! uploaded CSV/TSV-like text. No bank-specific schema: each line is scanned
//! for its first date-shaped and first amount-shaped token.

use std::sync::Arc;

pub mod parser;
pub mod types;

pub use parser::{SimpleStatementParser, StatementTransactions};
pub use types::StatementTransaction;

// ==================== Parser Trait ====================

/// Parser reference type
pub type ParserRef = Arc<dyn StatementParserTrait>;

/// Trait for statement parsers
pub trait StatementParserTrait: Send + Sync {
    /// Parse statement text into transaction candidates
    fn parse(&self, content: &str) -> Vec<StatementTransaction>;

    /// Parse raw uploaded bytes. Invalid UTF-8 is replaced, never rejected.
    fn parse_bytes(&self, bytes: &[u8]) -> Vec<StatementTransaction> {
        self.parse(&String::from_utf8_lossy(bytes))
    }
}

/// Default parser implementation
#[derive(Debug, Default)]
pub struct DefaultStatementParser;

impl StatementParserTrait for DefaultStatementParser {
    fn parse(&self, content: &str) -> Vec<StatementTransaction> {
        SimpleStatementParser::parse(content)
    }
}
