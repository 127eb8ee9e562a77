//! Static storefront tables: the product catalog, customer reviews and the
//! farm's contact details.
//!
//! All of it is fixed at compile time and never mutated at runtime.

use super::models::{Icon, Product, Review};

pub const PRODUCTS: &[Product] = &[
    Product {
        id: "chicken-eggs",
        name: "Яйцо куриное",
        price: 80,
        unit: "десяток",
        description: "Свежие домашние куриные яйца от кур свободного выгула",
        icon: Icon::Egg,
    },
    Product {
        id: "quail-eggs",
        name: "Яйцо перепелиное",
        price: 120,
        unit: "20 шт",
        description: "Диетические перепелиные яйца, богатые витаминами",
        icon: Icon::Egg,
    },
    Product {
        id: "duck-meat",
        name: "Мясо уток",
        price: 450,
        unit: "кг",
        description: "Нежное мясо домашних уток, выращенных на натуральных кормах",
        icon: Icon::Bird,
    },
    Product {
        id: "berry-juice",
        name: "Морсы ягодные",
        price: 150,
        unit: "1л",
        description: "Натуральные морсы из лесных ягод собственного сбора",
        icon: Icon::Grape,
    },
    Product {
        id: "mushrooms",
        name: "Грибы лесные",
        price: 200,
        unit: "кг",
        description: "Свежие лесные грибы: белые, подосиновики, лисички",
        icon: Icon::TreePine,
    },
];

pub const REVIEWS: &[Review] = &[
    Review {
        author: "Мария Ивановна",
        text: "Покупаю яйца уже полгода. Очень свежие, желток ярко-желтый! Качество отличное.",
        rating: 5,
    },
    Review {
        author: "Алексей П.",
        text: "Утятина просто тает во рту. Видно, что птица росла в хороших условиях. Рекомендую!",
        rating: 5,
    },
    Review {
        author: "Елена С.",
        text: "Морсы очень вкусные, натуральные. Дети пьют с удовольствием. Спасибо за качество!",
        rating: 5,
    },
];

/// Contact and branding details shown around the storefront.
#[derive(Debug, Clone, Copy)]
pub struct FarmInfo {
    pub title: &'static str,
    pub tagline: &'static str,
    pub phone: &'static str,
    pub address: &'static str,
    pub hours: &'static str,
}

pub const FARM: FarmInfo = FarmInfo {
    title: "Фермерское хозяйство \"Русские традиции\"",
    tagline: "Натуральные продукты с душой",
    phone: "+7 (XXX) XXX-XX-XX",
    address: "Деревня Традиции, д. 15",
    hours: "Ежедневно с 8:00 до 20:00",
};

/// Read-only product lookup over a fixed product table.
///
/// # Examples
///
/// ```
/// use farmstand::domain::Catalog;
///
/// let catalog = Catalog::default();
/// assert_eq!(catalog.find("duck-meat").map(|p| p.price), Some(450));
/// assert!(catalog.find("goat-cheese").is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    products: &'static [Product],
    reviews: &'static [Review],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(PRODUCTS, REVIEWS)
    }
}

impl Catalog {
    pub fn new(products: &'static [Product], reviews: &'static [Review]) -> Self {
        Self { products, reviews }
    }

    /// Looks up a product by its stable id.
    pub fn find(&self, product_id: &str) -> Option<&'static Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    pub fn products(&self) -> &'static [Product] {
        self.products
    }

    pub fn reviews(&self) -> &'static [Review] {
        self.reviews
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
