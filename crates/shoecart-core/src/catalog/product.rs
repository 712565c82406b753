//! Product types.

use crate::ids::ProductId;
use crate::money::format_price;
use serde::{Deserialize, Serialize};

/// A product as served by the catalog API.
///
/// Apart from `id`, the fields are carried through to the cart for display
/// and never interpreted by it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
        }
    }

    /// Unit price formatted for display.
    pub fn price_formatted(&self) -> String {
        format_price(self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_json_shape() {
        let json = r#"{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/tenis1.jpg"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.title, "Tênis de Caminhada Leve Confortável");
        assert_eq!(product.price, 179.9);
    }

    #[test]
    fn test_price_formatted() {
        let product = Product::new(ProductId::new(1), "Tênis", 179.9, "img.jpg");
        assert_eq!(product.price_formatted(), "179,90\u{a0}Mts");
    }
}
