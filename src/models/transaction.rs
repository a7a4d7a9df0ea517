//! Transaction model
//!
//! Represents a single income or expense record. The sign of the stored
//! amount always follows the transaction type: expenses are negative and
//! income is positive.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::{Money, MoneyParseError};

/// Category used when none is supplied
pub const DEFAULT_CATEGORY: &str = "Misc";

/// Date format used for input and display
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Kind of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    /// Give a magnitude the sign this type requires
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount.abs(),
            Self::Expense => -amount.abs(),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Signed amount (negative for expenses)
    pub amount: Money,

    /// Free-text category label
    pub category: String,

    /// Transaction date
    pub date: NaiveDate,

    /// Optional notes
    #[serde(default)]
    pub notes: Option<String>,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified, if ever
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Create a new transaction
    ///
    /// `magnitude` is taken as an absolute value; the stored sign comes from
    /// `kind`.
    pub fn new(
        id: TransactionId,
        kind: TransactionType,
        magnitude: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            kind,
            amount: kind.signed(magnitude),
            category: category.into(),
            date,
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Check if this is an inflow (positive amount)
    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if the stored sign agrees with the type
    pub fn sign_matches_type(&self) -> bool {
        match self.kind {
            TransactionType::Income => self.amount.is_positive(),
            TransactionType::Expense => self.amount.is_negative(),
        }
    }

    /// Year-month key (`YYYY-MM`) used by the monthly summary
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Merge a patch into this transaction and stamp `updated_at`
    pub fn apply(&mut self, patch: &TransactionPatch, now: DateTime<Utc>) {
        let (kind, amount) = resolve_amount(self.kind, self.amount, patch.kind, patch.amount);
        self.kind = kind;
        self.amount = amount;

        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }

        self.updated_at = Some(now);
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {}",
            self.id,
            self.date.format(DATE_FORMAT),
            self.category,
            self.amount.format_signed()
        )
    }
}

/// Work out the type and signed amount after an update
///
/// A new amount is signed by the resulting type. Without a new amount, the
/// stored amount is negated only when the type actually changes; resupplying
/// the current type leaves the amount as stored.
pub fn resolve_amount(
    current_kind: TransactionType,
    current_amount: Money,
    new_kind: Option<TransactionType>,
    new_amount: Option<Money>,
) -> (TransactionType, Money) {
    let kind = new_kind.unwrap_or(current_kind);

    let amount = match (new_kind, new_amount) {
        (_, Some(magnitude)) => kind.signed(magnitude),
        (Some(requested), None) if requested != current_kind => -current_amount,
        _ => current_amount,
    };

    (kind, amount)
}

/// A partial update: each `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub kind: Option<TransactionType>,
    /// Positive magnitude; the sign is derived from the resulting type
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Unvalidated text for each updatable field, blank meaning "keep"
#[derive(Debug, Clone, Copy, Default)]
pub struct RawUpdate<'a> {
    pub kind: &'a str,
    pub amount: &'a str,
    pub category: &'a str,
    pub date: &'a str,
    pub notes: &'a str,
}

/// Why a supplied update value was ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchWarning {
    InvalidType(String),
    InvalidAmount(MoneyParseError),
    NonPositiveAmount(String),
    InvalidDate(String),
}

impl fmt::Display for PatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidType(s) => write!(f, "Invalid type '{}'. Keeping current.", s),
            Self::InvalidAmount(e) => write!(f, "{}. Keeping old amount.", e),
            Self::NonPositiveAmount(s) => {
                write!(f, "Amount must be > 0 (got {}). Keeping old amount.", s)
            }
            Self::InvalidDate(s) => write!(f, "Invalid date '{}'. Keeping old date.", s),
        }
    }
}

impl TransactionPatch {
    /// Build a patch from raw user input
    ///
    /// Unusable values are dropped from the patch and reported as warnings.
    pub fn from_raw(raw: RawUpdate<'_>) -> (Self, Vec<PatchWarning>) {
        let mut patch = Self::default();
        let mut warnings = Vec::new();

        let kind = raw.kind.trim();
        if !kind.is_empty() {
            match kind.parse() {
                Ok(kind) => patch.kind = Some(kind),
                Err(_) => warnings.push(PatchWarning::InvalidType(kind.to_string())),
            }
        }

        let amount = raw.amount.trim();
        if !amount.is_empty() {
            match Money::parse(amount) {
                Ok(value) if value.is_positive() => patch.amount = Some(value),
                Ok(_) => warnings.push(PatchWarning::NonPositiveAmount(amount.to_string())),
                Err(e) => warnings.push(PatchWarning::InvalidAmount(e)),
            }
        }

        let category = raw.category.trim();
        if !category.is_empty() {
            patch.category = Some(category.to_string());
        }

        let date = raw.date.trim();
        if !date.is_empty() {
            match parse_date(date) {
                Some(date) => patch.date = Some(date),
                None => warnings.push(PatchWarning::InvalidDate(date.to_string())),
            }
        }

        let notes = raw.notes.trim();
        if !notes.is_empty() {
            patch.notes = Some(notes.to_string());
        }

        (patch, warnings)
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
