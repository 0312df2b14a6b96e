//! Statement line parser implementation

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::StatementTransaction;

/// `D{1,2}[/-]D{1,2}[/-]D{2,4}` over ASCII digits, e.g. `01/15/2024` or `1-5-24`
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4}").expect("date pattern is valid")
});

/// Optional `$`, then ASCII digits with optional thousands commas and fraction
static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$?([0-9][0-9,]*\.?[0-9]*)").expect("amount pattern is valid")
});

/// Simple line-based parser for uploaded statement text
pub struct SimpleStatementParser;

impl SimpleStatementParser {
    /// Parse every line of `content` and collect the candidates
    pub fn parse(content: &str) -> Vec<StatementTransaction> {
        Self::transactions(content).collect()
    }

    /// Lazily parse `content`, yielding candidates in line order
    pub fn transactions(content: &str) -> StatementTransactions<'_> {
        StatementTransactions {
            lines: content.split('\n'),
        }
    }

    /// Parse a single line. Returns `None` when the line is blank, has no
    /// date, has no amount, or the amount does not parse.
    pub fn parse_line(line: &str) -> Option<StatementTransaction> {
        if line.trim().is_empty() {
            return None;
        }

        let date = DATE_PATTERN.find(line)?;
        // Search for the amount with the date cut out, otherwise the day or
        // month digits would be taken as the amount.
        let rest = splice_out(line, date.start(), date.end());

        let caps = AMOUNT_PATTERN.captures(&rest)?;
        let whole = caps.get(0)?;
        let digits = caps.get(1)?;

        let amount: f64 = digits.as_str().replace(',', "").parse().ok()?;
        if !amount.is_finite() {
            return None;
        }

        let description = splice_out(&rest, whole.start(), whole.end()).trim().to_string();

        Some(StatementTransaction {
            date: date.as_str().to_string(),
            description,
            amount,
        })
    }
}

fn splice_out(s: &str, start: usize, end: usize) -> String {
    let mut out = String::with_capacity(s.len() - (end - start));
    out.push_str(&s[..start]);
    out.push_str(&s[end..]);
    out
}

/// Iterator over the transaction candidates of one statement
pub struct StatementTransactions<'a> {
    lines: std::str::Split<'a, char>,
}

impl<'a> Iterator for StatementTransactions<'a> {
    type Item = StatementTransaction;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.by_ref().find_map(SimpleStatementParser::parse_line)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dollar_amount() {
        let txn = SimpleStatementParser::parse_line("01/15/2024 Grocery Store $45.67").unwrap();
        assert_eq!(txn.date, "01/15/2024");
        assert_eq!(txn.description, "Grocery Store");
        assert_eq!(txn.amount, 45.67);
    }

    #[test]
    fn test_line_without_date_is_skipped() {
        assert!(SimpleStatementParser::parse_line("Grocery Store $45.67").is_none());
    }

    #[test]
    fn test_thousands_separator_is_stripped() {
        let txn = SimpleStatementParser::parse_line("12-01-2023 Refund 1,234.50").unwrap();
        assert_eq!(txn.date, "12-01-2023");
        assert_eq!(txn.description, "Refund");
        assert_eq!(txn.amount, 1234.50);
    }

    #[test]
    fn test_line_without_amount_is_skipped() {
        assert!(SimpleStatementParser::parse_line("01/15/2024 Opening balance").is_none());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let input = "\n   \n\t\n01/02/24 Coffee 4.50\n\n";
        let txns = SimpleStatementParser::parse(input);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].date, "01/02/24");
        assert_eq!(txns[0].description, "Coffee");
        assert_eq!(txns[0].amount, 4.5);
    }

    #[test]
    fn test_csv_columns_in_any_order() {
        let input = "Description,Date,Amount\n\
                     \"Power bill\",3/4/2024,120.00\n\
                     45.10,05/04/2024,Petrol\n";
        let txns = SimpleStatementParser::parse(input);
        assert_eq!(txns.len(), 2);

        assert_eq!(txns[0].date, "3/4/2024");
        assert_eq!(txns[0].amount, 120.0);
        assert_eq!(txns[0].description, "\"Power bill\",,");

        assert_eq!(txns[1].date, "05/04/2024");
        assert_eq!(txns[1].amount, 45.10);
        assert_eq!(txns[1].description, ",,Petrol");
    }

    #[test]
    fn test_first_amount_wins() {
        let txn = SimpleStatementParser::parse_line("01/01/2024 Transfer 10.00 20.00").unwrap();
        assert_eq!(txn.date, "01/01/2024");
        assert_eq!(txn.amount, 10.0);
        assert_eq!(txn.description, "Transfer  20.00");
    }

    #[test]
    fn test_second_date_misfires_as_amount() {
        let txn = SimpleStatementParser::parse_line("01/01/2024 02/01/2024 Transfer 10.00").unwrap();
        assert_eq!(txn.date, "01/01/2024");
        assert_eq!(txn.amount, 2.0);
        assert_eq!(txn.description, "/01/2024 Transfer 10.00");
    }

    #[test]
    fn test_crlf_line_endings() {
        let txns = SimpleStatementParser::parse("01/15/2024\tRent\t$1,500.00\r\n01/16/2024\tBus\t$3.20\r\n");
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].description, "Rent");
        assert_eq!(txns[0].amount, 1500.0);
        assert_eq!(txns[1].description, "Bus");
    }

    #[test]
    fn test_minus_sign_stays_in_description() {
        let txn = SimpleStatementParser::parse_line("01/15/2024 Card fee -2.50").unwrap();
        assert_eq!(txn.amount, 2.5);
        assert_eq!(txn.description, "Card fee -");
    }

    #[test]
    fn test_iterator_matches_collected_output() {
        let input = "01/15/2024 A 1.00\nnoise\n01/16/2024 B 2.00\n";
        let lazy: Vec<_> = SimpleStatementParser::transactions(input).collect();
        assert_eq!(lazy, SimpleStatementParser::parse(input));
        assert_eq!(lazy.len(), 2);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let input = "01/15/2024 Grocery Store $45.67\n12-01-2023 Refund 1,234.50\nheader line";
        assert_eq!(SimpleStatementParser::parse(input), SimpleStatementParser::parse(input));
    }

    #[test]
    fn test_only_ascii_digits_count() {
        // Arabic-Indic digits form neither a date nor an amount
        assert!(SimpleStatementParser::parse_line("١٥/٠١/٢٠٢٤ Coffee 4.50").is_none());

        let txn = SimpleStatementParser::parse_line("01/15/2024 Ref ٤٥ Coffee 4.50").unwrap();
        assert_eq!(txn.date, "01/15/2024");
        assert_eq!(txn.amount, 4.5);
        assert_eq!(txn.description, "Ref ٤٥ Coffee");
    }
}
