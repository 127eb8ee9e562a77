use crate::domain::{DomainError, DomainResult, Order, OrderSink, Receipt, ORDER_ACKNOWLEDGMENT};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

#[derive(Serialize)]
struct JournalEntry<'a> {
    order_number: u64,
    submitted_at: DateTime<Utc>,
    order: &'a Order,
}

/// Appends every submitted order to a JSON-lines file.
#[derive(Debug)]
pub struct OrderJournal {
    path: PathBuf,
    submitted: u64,
}

impl OrderJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            submitted: 0,
        }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")
    }
}

impl OrderSink for OrderJournal {
    fn submit(&mut self, order: &Order) -> DomainResult<Receipt> {
        let order_number = self.submitted + 1;
        let entry = JournalEntry {
            order_number,
            submitted_at: Utc::now(),
            order,
        };

        let line = serde_json::to_string(&entry)
            .map_err(|e| DomainError::Submission(format!("Serialization failed: {e}")))?;
        self.append(&line).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to append order");
            DomainError::Submission(e.to_string())
        })?;

        self.submitted = order_number;
        tracing::info!(order_number, path = %self.path.display(), "order written to journal");
        Ok(Receipt {
            order_number,
            message: ORDER_ACKNOWLEDGMENT.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cart, CartPricer, Catalog, OrderField, OrderForm};
    use tempfile::tempdir;

    fn sample_order() -> Order {
        let catalog = Catalog::default();
        let mut cart = Cart::default();
        cart.add("chicken-eggs");
        cart.add("chicken-eggs");
        cart.add("duck-meat");
        let mut form = OrderForm::default();
        form.set(OrderField::Name, "Мария Ивановна");
        form.set(OrderField::Phone, "+7 900 000-00-00");
        form.set(OrderField::Address, "Деревня Традиции, д. 7");
        Order::new(CartPricer::new(&catalog).summarize(&cart), form).unwrap()
    }

    #[test]
    fn test_journal_appends_one_line_per_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("orders.jsonl");
        let mut journal = OrderJournal::new(&path);
        let order = sample_order();

        let first = journal.submit(&order).unwrap();
        let second = journal.submit(&order).unwrap();

        assert_eq!(first.order_number, 1);
        assert_eq!(second.order_number, 2);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let entry: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(entry["order_number"], 2);
        assert_eq!(entry["order"]["total"], 610);
        assert_eq!(entry["order"]["customer"]["name"], "Мария Ивановна");

        let stamp = entry["submitted_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn test_journal_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("orders.jsonl");
        let mut journal = OrderJournal::new(&path);

        journal.submit(&sample_order()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_journal_write_failure_reports_submission_error() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened for appending.
        let mut journal = OrderJournal::new(dir.path());

        let result = journal.submit(&sample_order());

        assert!(matches!(result, Err(DomainError::Submission(_))));
        let retry = journal.submit(&sample_order());
        assert!(retry.is_err());
    }
}
