//! In-memory [`Catalog`] used by the session and shell tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use wooprice_client::WooError;
use wooprice_core::{Attribute, Product, ProductType, RowKey, Variation};

use super::Catalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Search(String, u32),
    Variations(u64),
    Push(RowKey, i64, i64),
}

/// In-memory store. Applied pushes change the prices later searches see.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    pub(crate) products: Mutex<Vec<Product>>,
    pub(crate) variations: Mutex<HashMap<u64, Vec<Variation>>>,
    pub(crate) fail_search: bool,
    pub(crate) fail_variations: HashSet<u64>,
    pub(crate) fail_push: HashSet<RowKey>,
    pub(crate) calls: Mutex<Vec<Call>>,
}

pub(crate) fn server_error(status: u16) -> WooError {
    WooError::UnexpectedStatus {
        status,
        url: "http://fake.test/wp-json/wc/v3/products".to_string(),
        detail: "boom".to_string(),
    }
}

impl FakeCatalog {
    pub(crate) fn with_product(self, product: Product) -> Self {
        self.products.lock().unwrap().push(product);
        self
    }

    pub(crate) fn with_variations(self, product_id: u64, variations: Vec<Variation>) -> Self {
        self.variations
            .lock()
            .unwrap()
            .insert(product_id, variations);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn pushes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Push(..)))
            .collect()
    }
}

impl Catalog for FakeCatalog {
    async fn search_products(&self, query: &str, per_page: u32) -> Result<Vec<Product>, WooError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Search(query.to_string(), per_page));
        if self.fail_search {
            return Err(server_error(500));
        }
        Ok(self.products.lock().unwrap().clone())
    }

    async fn list_variations(&self, product_id: u64) -> Result<Vec<Variation>, WooError> {
        self.calls.lock().unwrap().push(Call::Variations(product_id));
        if self.fail_variations.contains(&product_id) {
            return Err(server_error(503));
        }
        Ok(self
            .variations
            .lock()
            .unwrap()
            .get(&product_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn push_price(&self, key: RowKey, new_price: i64, old_price: i64) -> Result<(), WooError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Push(key, new_price, old_price));
        if self.fail_push.contains(&key) {
            return Err(server_error(400));
        }
        match key.variation_id {
            Some(vid) => {
                if let Some(v) = self
                    .variations
                    .lock()
                    .unwrap()
                    .get_mut(&key.product_id)
                    .and_then(|vs| vs.iter_mut().find(|v| v.id == vid))
                {
                    v.price = new_price;
                }
            }
            None => {
                if let Some(p) = self
                    .products
                    .lock()
                    .unwrap()
                    .iter_mut()
                    .find(|p| p.id == key.product_id)
                {
                    p.price = new_price;
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn simple(id: u64, name: &str, price: i64) -> Product {
    Product {
        id,
        name: name.to_string(),
        product_type: ProductType::Simple,
        price,
    }
}

pub(crate) fn variable(id: u64, name: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        product_type: ProductType::Variable,
        price: 0,
    }
}

pub(crate) fn colored(id: u64, parent_id: u64, color: &str, price: i64) -> Variation {
    Variation {
        id,
        parent_id,
        price,
        attributes: vec![Attribute {
            name: "Color".to_string(),
            option: color.to_string(),
        }],
    }
}

pub(crate) fn shirt_store() -> FakeCatalog {
    FakeCatalog::default()
        .with_product(variable(1, "Shirt"))
        .with_variations(1, vec![colored(11, 1, "red", 200), colored(12, 1, "blue", 220)])
}
