use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("invalid principal amount: {amount}")]
    InvalidPrincipal { amount: Money },

    #[error("invalid template configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("template serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
