// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(FinanceError::InvalidTransactionType(s.to_string())),
        }
    }
}

impl TryFrom<String> for TransactionType {
    type Error = FinanceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TransactionType> for String {
    fn from(t: TransactionType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status. Display-only; no report looks at it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TransactionStatus {
    #[default]
    Paid,
    Pending,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Paid => "paid",
            TransactionStatus::Pending => "pending",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(TransactionStatus::Paid),
            "pending" => Ok(TransactionStatus::Pending),
            _ => Err(FinanceError::InvalidStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for TransactionStatus {
    type Error = FinanceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TransactionStatus> for String {
    fn from(s: TransactionStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: Option<i64>,
    /// Denormalized from the linked category at read time.
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TransactionStatus,
}

impl Transaction {
    /// Amount with the sign it has on the balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// A transaction as entered, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: Option<i64>,
    pub description: String,
    pub status: TransactionStatus,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.category_id.is_none() {
            return Err(FinanceError::Validation("Category is required".into()));
        }
        if self.description.trim().is_empty() {
            return Err(FinanceError::Validation("Description is required".into()));
        }
        if self.amount < Decimal::ZERO {
            return Err(FinanceError::Validation(format!(
                "Amount must not be negative, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}
