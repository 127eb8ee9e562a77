//! Pricing services that resolve a cart against the catalog.
//!
//! The cart only stores product ids and quantities; everything shown in the
//! order panel or handed to an order sink is derived here on demand.

use super::catalog::Catalog;
use super::models::Cart;
use serde::Serialize;

/// One priced line of an order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub product_id: String,
    pub name: String,
    pub unit: String,
    pub unit_price: u32,
    pub quantity: u32,
    pub line_total: u64,
}

/// A cart resolved against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub item_count: u64,
    pub total: u64,
}

impl OrderSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Computes derived cart views against a catalog.
///
/// # Examples
///
/// ```
/// use farmstand::domain::{Cart, CartPricer, Catalog};
///
/// let catalog = Catalog::default();
/// let mut cart = Cart::default();
/// cart.add("chicken-eggs");
/// cart.add("chicken-eggs");
/// cart.add("duck-meat");
///
/// let pricer = CartPricer::new(&catalog);
/// assert_eq!(pricer.total_price(&cart), 610);
/// assert_eq!(pricer.summarize(&cart).lines.len(), 2);
/// ```
pub struct CartPricer<'a> {
    catalog: &'a Catalog,
}

impl<'a> CartPricer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Total price of the cart in roubles.
    ///
    /// Lines referring to products missing from the catalog count as zero.
    pub fn total_price(&self, cart: &Cart) -> u64 {
        cart.total_price(self.catalog)
    }

    /// Total number of units in the cart.
    pub fn item_count(&self, cart: &Cart) -> u64 {
        cart.item_count()
    }

    /// Resolves every cart line into a priced summary line.
    ///
    /// Lines whose product is unknown are left out of `lines`, matching the
    /// zero they contribute to the total. `item_count` still counts every
    /// unit in the cart.
    pub fn summarize(&self, cart: &Cart) -> OrderSummary {
        let lines: Vec<SummaryLine> = cart
            .lines()
            .iter()
            .filter_map(|line| {
                let product = self.catalog.find(&line.product_id)?;
                Some(SummaryLine {
                    product_id: product.id.to_string(),
                    name: product.name.to_string(),
                    unit: product.unit.to_string(),
                    unit_price: product.price,
                    quantity: line.quantity,
                    line_total: u64::from(product.price) * u64::from(line.quantity),
                })
            })
            .collect();

        OrderSummary {
            total: lines.iter().map(|line| line.line_total).sum(),
            item_count: cart.item_count(),
            lines,
        }
    }
}
