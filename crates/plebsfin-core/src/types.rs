//! Basic enumerations shared by the models

use serde::{Deserialize, Serialize};

/// Data category; each maps to one document in the key-value store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Cashflow,
    CreditCards,
    Expenses,
    Bills,
    Goals,
    Profile,
    Pin,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Cashflow,
        Category::CreditCards,
        Category::Expenses,
        Category::Bills,
        Category::Goals,
        Category::Profile,
        Category::Pin,
    ];

    /// Storage key of the category document
    pub fn key(&self) -> &'static str {
        match self {
            Category::Cashflow => "cashflow",
            Category::CreditCards => "credit-cards",
            Category::Expenses => "expenses",
            Category::Bills => "bills",
            Category::Goals => "goals",
            Category::Profile => "user:profile",
            Category::Pin => "user:pin",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Direction of a cashflow entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashflowType {
    Income,
    Expense,
}

impl std::str::FromStr for CashflowType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(CashflowType::Income),
            "expense" => Ok(CashflowType::Expense),
            _ => Err(format!("Invalid cashflow type: {}", s)),
        }
    }
}

impl std::fmt::Display for CashflowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CashflowType::Income => write!(f, "income"),
            CashflowType::Expense => write!(f, "expense"),
        }
    }
}

/// Repeat interval of a recurring expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl std::str::FromStr for Frequency {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(format!("Invalid frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Yearly => write!(f, "yearly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys_are_distinct() {
        let keys: std::collections::HashSet<_> = Category::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), Category::ALL.len());
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_enum_round_trip_strings() {
        assert_eq!("Income".parse::<CashflowType>().unwrap(), CashflowType::Income);
        assert_eq!(Frequency::Monthly.to_string(), "monthly");
        assert!("fortnightly".parse::<Frequency>().is_err());
        assert_eq!(serde_json::to_value(CashflowType::Expense).unwrap(), "expense");
    }
}
