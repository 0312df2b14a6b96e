//! Finance record models
//!
//! Each list category has three shapes: the stored record, the draft a client
//! submits to create one (no `id`/`createdAt`; the store stamps those), and,
//! where the category supports it, a typed patch whose `None` fields leave the
//! stored value untouched.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use plebsfin_utils::{generate_id, iso_timestamp};

use crate::types::{CashflowType, Category, Frequency};

// ==================== Record traits ====================

/// Server-assigned identity of a new record
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    pub id: String,
    pub created_at: String,
}

impl Stamp {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(now),
            created_at: iso_timestamp(now),
        }
    }
}

/// A record stored in a list category document
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Client-submitted shape used by `append`
    type Draft: Send;

    const CATEGORY: Category;

    fn id(&self) -> &str;

    fn from_draft(draft: Self::Draft, stamp: Stamp) -> Self;
}

/// Partial update of a record
pub trait RecordPatch<R: Record>: Send {
    fn apply_to(self, record: &mut R);
}

/// Deserialize a present field (including `null`) as `Some`, so a missing
/// field and an explicit `null` can be told apart.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ==================== Cashflow ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowEntry {
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: CashflowType,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCashflowEntry {
    pub date: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: CashflowType,
}

impl Record for CashflowEntry {
    type Draft = NewCashflowEntry;
    const CATEGORY: Category = Category::Cashflow;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: NewCashflowEntry, stamp: Stamp) -> Self {
        Self {
            id: stamp.id,
            date: draft.date,
            description: draft.description,
            amount: draft.amount,
            kind: draft.kind,
            created_at: stamp.created_at,
        }
    }
}

// ==================== Credit cards ====================

/// Interest-free instalment plan on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub amount: f64,
    pub interest_free_months: u32,
    pub interest_free_end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_payment: Option<f64>,
}

/// Cards carry no `createdAt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plans: Vec<CreditCardPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCreditCard {
    pub name: String,
    #[serde(default)]
    pub plans: Vec<CreditCardPlan>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plans: Option<Vec<CreditCardPlan>>,
}

impl Record for CreditCard {
    type Draft = NewCreditCard;
    const CATEGORY: Category = Category::CreditCards;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: NewCreditCard, stamp: Stamp) -> Self {
        Self {
            id: stamp.id,
            name: draft.name,
            plans: draft.plans,
        }
    }
}

impl RecordPatch<CreditCard> for CreditCardPatch {
    fn apply_to(self, card: &mut CreditCard) {
        if let Some(name) = self.name {
            card.name = name;
        }
        if let Some(plans) = self.plans {
            card.plans = plans;
        }
    }
}

// ==================== Expenses ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurring {
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurring>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub recurring: Option<Recurring>,
}

impl Record for Expense {
    type Draft = NewExpense;
    const CATEGORY: Category = Category::Expenses;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: NewExpense, stamp: Stamp) -> Self {
        Self {
            id: stamp.id,
            description: draft.description,
            amount: draft.amount,
            date: draft.date,
            recurring: draft.recurring,
            created_at: stamp.created_at,
        }
    }
}

// ==================== Bills ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub due_date: String,
    pub paid: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub description: String,
    pub amount: f64,
    pub due_date: String,
    #[serde(default)]
    pub paid: bool,
}

impl Record for Bill {
    type Draft = NewBill;
    const CATEGORY: Category = Category::Bills;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: NewBill, stamp: Stamp) -> Self {
        Self {
            id: stamp.id,
            description: draft.description,
            amount: draft.amount,
            due_date: draft.due_date,
            paid: draft.paid,
            created_at: stamp.created_at,
        }
    }
}

// ==================== Goals ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default)]
    pub target_date: Option<String>,
}

/// `targetDate: null` clears the date; an absent `targetDate` keeps it
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub target_amount: Option<f64>,
    #[serde(default)]
    pub current_amount: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub target_date: Option<Option<String>>,
}

impl Record for Goal {
    type Draft = NewGoal;
    const CATEGORY: Category = Category::Goals;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(draft: NewGoal, stamp: Stamp) -> Self {
        Self {
            id: stamp.id,
            name: draft.name,
            target_amount: draft.target_amount,
            current_amount: draft.current_amount,
            target_date: draft.target_date,
            created_at: stamp.created_at,
        }
    }
}

impl RecordPatch<Goal> for GoalPatch {
    fn apply_to(self, goal: &mut Goal) {
        if let Some(name) = self.name {
            goal.name = name;
        }
        if let Some(target_amount) = self.target_amount {
            goal.target_amount = target_amount;
        }
        if let Some(current_amount) = self.current_amount {
            goal.current_amount = current_amount;
        }
        if let Some(target_date) = self.target_date {
            goal.target_date = target_date;
        }
    }
}

// ==================== Profile ====================

/// Singleton user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub picture: String,
    pub currency: String,
    pub timezone: String,
}

impl UserProfile {
    /// Empty profile with the given currency and timezone
    pub fn with_defaults(currency: &str, timezone: &str) -> Self {
        Self {
            name: String::new(),
            picture: String::new(),
            currency: currency.to_string(),
            timezone: timezone.to_string(),
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::with_defaults("NZD", "Pacific/Auckland")
    }
}
