// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Domain errors raised by the models and the aggregation engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FinanceError {
    #[error("InvalidTransactionType: '{0}' is neither income nor expense")]
    InvalidTransactionType(String),
    #[error("Invalid status '{0}', expected paid|pending")]
    InvalidStatus(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("{0}")]
    Validation(String),
}

pub type FinanceResult<T> = Result<T, FinanceError>;
