//! Finance records, storage and the PIN gate

pub mod error;
pub mod models;
pub mod pin;
pub mod records;
pub mod reports;
pub mod store;
pub mod types;

pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use models::{
    Bill, CashflowEntry, CreditCard, CreditCardPatch, CreditCardPlan, Expense, Goal, GoalPatch,
    NewBill, NewCashflowEntry, NewCreditCard, NewExpense, NewGoal, Record, RecordPatch, Recurring,
    UserProfile,
};
pub use pin::{PinGate, PinState, Verification};
pub use records::RecordStore;
pub use reports::{BillSummary, CashflowSummary};
pub use store::{open_store, FileStore, KvStore, MemoryStore, StoreRef};
pub use types::{CashflowType, Category, Frequency};
