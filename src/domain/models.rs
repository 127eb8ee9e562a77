use super::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    Egg,
    Bird,
    Grape,
    TreePine,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Egg => "🥚",
            Icon::Bird => "🦆",
            Icon::Grape => "🍇",
            Icon::TreePine => "🌲",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u32,
    pub unit: &'static str,
    pub description: &'static str,
    pub icon: Icon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Review {
    pub author: &'static str,
    pub text: &'static str,
    pub rating: u8,
}

impl Review {
    pub const MAX_RATING: u8 = 5;

    pub fn stars(&self) -> String {
        "★".repeat(self.rating.clamp(1, Self::MAX_RATING) as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

/// Selected quantities keyed by product id.
///
/// Lines keep the order in which products were first added. A line never
/// holds a zero quantity: removing the last unit drops the line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn add(&mut self, product_id: &str) {
        match self.lines.iter_mut().find(|line| line.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product_id: product_id.to_string(),
                quantity: 1,
            }),
        }
    }

    pub fn remove(&mut self, product_id: &str) {
        let Some(index) = self.lines.iter().position(|line| line.product_id == product_id) else {
            return;
        };

        if self.lines[index].quantity > 1 {
            self.lines[index].quantity -= 1;
        } else {
            self.lines.remove(index);
        }
    }

    pub fn quantity(&self, product_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sums price times quantity over all lines. A line whose product is not
    /// in the catalog contributes nothing.
    pub fn total_price(&self, catalog: &Catalog) -> u64 {
        self.lines
            .iter()
            .map(|line| {
                catalog
                    .find(&line.product_id)
                    .map(|product| u64::from(product.price) * u64::from(line.quantity))
                    .unwrap_or(0)
            })
            .sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    Name,
    Phone,
    Address,
    Comment,
}

impl OrderField {
    pub const ALL: [OrderField; 4] = [
        OrderField::Name,
        OrderField::Phone,
        OrderField::Address,
        OrderField::Comment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderField::Name => "Имя",
            OrderField::Phone => "Телефон",
            OrderField::Address => "Адрес доставки",
            OrderField::Comment => "Комментарий",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            OrderField::Name => "Ваше имя",
            OrderField::Phone => "+7 (XXX) XXX-XX-XX",
            OrderField::Address => "Адрес для доставки",
            OrderField::Comment => "Дополнительные пожелания",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, OrderField::Comment)
    }

    pub fn next(self) -> OrderField {
        match self {
            OrderField::Name => OrderField::Phone,
            OrderField::Phone => OrderField::Address,
            OrderField::Address => OrderField::Comment,
            OrderField::Comment => OrderField::Name,
        }
    }

    pub fn previous(self) -> OrderField {
        match self {
            OrderField::Name => OrderField::Comment,
            OrderField::Phone => OrderField::Name,
            OrderField::Address => OrderField::Phone,
            OrderField::Comment => OrderField::Address,
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub comment: String,
}

impl OrderForm {
    pub fn get(&self, field: OrderField) -> &str {
        match field {
            OrderField::Name => &self.name,
            OrderField::Phone => &self.phone,
            OrderField::Address => &self.address,
            OrderField::Comment => &self.comment,
        }
    }

    pub fn get_mut(&mut self, field: OrderField) -> &mut String {
        match field {
            OrderField::Name => &mut self.name,
            OrderField::Phone => &mut self.phone,
            OrderField::Address => &mut self.address,
            OrderField::Comment => &mut self.comment,
        }
    }

    pub fn set(&mut self, field: OrderField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    pub fn first_missing_field(&self) -> Option<OrderField> {
        OrderField::ALL
            .into_iter()
            .find(|field| field.is_required() && self.get(*field).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
