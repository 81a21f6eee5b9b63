use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

/// A stored product. Fields beyond `name` and `price` are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /products`
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewProduct {
    /// Attach a server-generated id. A caller-supplied `id` is discarded.
    pub fn into_product(mut self, id: Uuid) -> Product {
        self.extra.remove("id");
        Product {
            id,
            name: self.name,
            price: self.price,
            extra: self.extra,
        }
    }
}

/// Body of `PATCH /products/:id`.
///
/// A field is applied when it is present and not null; `price: 0` and
/// `name: ""` are real updates. Any other field in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Number>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
    }
}
