//! Types produced by the statement parser

use serde::{Deserialize, Serialize};

/// One transaction candidate extracted from a statement line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTransaction {
    /// Date exactly as it appeared in the line (no normalisation)
    pub date: String,
    /// Whatever is left of the line once the date and amount are cut out
    pub description: String,
    /// Unsigned; a leading minus stays in the description
    pub amount: f64,
}
