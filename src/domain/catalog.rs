use super::money::Price;
use serde::{Deserialize, Serialize};

/// A product offered by the kiosk.
///
/// Identity for ordering purposes is the display `name`; there is no SKU.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Product {
    pub name: String,
    pub price: Price,
    /// Key of the product image, resolved by whoever renders it.
    #[serde(rename = "image")]
    pub image_ref: String,
}

impl Product {
    pub fn new(name: impl Into<String>, price: u64, image_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: Price::new(price),
            image_ref: image_ref.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Category {
    pub name: String,
    pub products: Vec<Product>,
}

/// Products grouped by category, in the order they were supplied.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Products of the named category, or `None` if no such category exists.
    pub fn products_in(&self, category: &str) -> Option<&[Product]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.products.as_slice())
    }

    /// First product with the given name, searching categories in order.
    pub fn find_product(&self, name: &str) -> Option<&Product> {
        self.categories
            .iter()
            .flat_map(|c| c.products.iter())
            .find(|p| p.name == name)
    }

    pub fn product_count(&self) -> usize {
        self.categories.iter().map(|c| c.products.len()).sum()
    }
}
