//! Persisted account data models

use serde::{Deserialize, Serialize};

/// The single persisted account record.
///
/// The plaintext password is never stored; `password_hash` holds the hex
/// digest under the JSON key `"password"` for compatibility with the
/// on-disk document layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub dob: String,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    pub phone: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl UserRecord {
    /// All five identity fields must be present together or the record is
    /// treated as absent/corrupt.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty()
            && !self.dob.is_empty()
            && !self.email.is_empty()
            && !self.password_hash.is_empty()
            && !self.phone.is_empty()
    }
}

/// A simulated trade, immutable once appended.
///
/// Serialized as the 6-element array
/// `[timestamp, kind, symbol, shares, price, total]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TransactionTuple", into = "TransactionTuple")]
pub struct Transaction {
    pub timestamp: String,
    pub kind: String,
    pub symbol: String,
    pub shares: i64,
    pub price: f64,
    pub total: f64,
}

type TransactionTuple = (String, String, String, i64, f64, f64);

impl Transaction {
    /// Build a transaction stamped with the current UTC time;
    /// `total` is derived from shares and price.
    pub fn new(kind: impl Into<String>, symbol: impl Into<String>, shares: i64, price: f64) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            kind: kind.into(),
            symbol: symbol.into(),
            shares,
            price,
            total: shares as f64 * price,
        }
    }
}

impl From<TransactionTuple> for Transaction {
    fn from((timestamp, kind, symbol, shares, price, total): TransactionTuple) -> Self {
        Self {
            timestamp,
            kind,
            symbol,
            shares,
            price,
            total,
        }
    }
}

impl From<Transaction> for TransactionTuple {
    fn from(tx: Transaction) -> Self {
        (tx.timestamp, tx.kind, tx.symbol, tx.shares, tx.price, tx.total)
    }
}
