//! Product record types mirroring the mock catalog API wire format.

use serde::{Deserialize, Serialize};

use luxe_core::{Price, ProductId};

/// A product record as returned by the catalog API.
///
/// Unknown fields in the response (e.g. `rating`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    /// Image URI.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

/// Request body for creating or updating a product.
///
/// Identical to [`Product`] minus the server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub price: Price,
    pub description: String,
    pub image: String,
    pub category: String,
}

impl From<Product> for NewProduct {
    fn from(product: Product) -> Self {
        Self {
            title: product.title,
            price: product.price,
            description: product.description,
            image: product.image,
            category: product.category,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_record() {
        // Shape of a real fakestoreapi.com response, extra fields included
        let json = r#"{
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Fits 15 inch laptops",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(10995));
        assert_eq!(product.category, "men's clothing");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{ "id": 2, "title": "Bare", "price": 5.0 }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.description.is_empty());
        assert!(product.image.is_empty());
        assert!(product.category.is_empty());
    }
}
