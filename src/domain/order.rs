//! Order snapshots and the boundary they are submitted through.

use super::errors::{DomainError, DomainResult};
use super::models::OrderForm;
use super::services::{OrderSummary, SummaryLine};
use serde::Serialize;
use std::fmt::Debug;

pub const ORDER_ACKNOWLEDGMENT: &str = "Спасибо за заказ! Мы свяжемся с вами в ближайшее время.";

/// Everything a customer submitted: priced lines plus contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub lines: Vec<SummaryLine>,
    pub item_count: u64,
    pub total: u64,
    pub customer: OrderForm,
}

impl Order {
    /// Builds an order from a priced summary and the filled-in form.
    ///
    /// Fails when the summary has no units or a required field is empty.
    pub fn new(summary: OrderSummary, customer: OrderForm) -> DomainResult<Self> {
        if summary.item_count == 0 {
            return Err(DomainError::EmptyCart);
        }
        if let Some(field) = customer.first_missing_field() {
            return Err(DomainError::MissingField(field));
        }

        Ok(Self {
            lines: summary.lines,
            item_count: summary.item_count,
            total: summary.total,
            customer,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub order_number: u64,
    pub message: String,
}

/// Collaborator that takes ownership of submitted orders.
pub trait OrderSink: Debug {
    fn submit(&mut self, order: &Order) -> DomainResult<Receipt>;
}

/// Accepts every order without transmitting it anywhere.
#[derive(Debug, Default)]
pub struct AcknowledgeOnly {
    submitted: u64,
}

impl OrderSink for AcknowledgeOnly {
    fn submit(&mut self, _order: &Order) -> DomainResult<Receipt> {
        self.submitted += 1;
        Ok(Receipt {
            order_number: self.submitted,
            message: ORDER_ACKNOWLEDGMENT.to_string(),
        })
    }
}
