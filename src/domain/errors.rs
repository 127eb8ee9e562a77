use super::models::OrderField;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Required field is empty: {0}")]
    MissingField(OrderField),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Order submission failed: {0}")]
    Submission(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
