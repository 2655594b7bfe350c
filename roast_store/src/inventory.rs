//! Green bean stock tracking.

use std::collections::HashMap;

use roast_traits::{BoxError, Inventory};

use crate::error::StoreError;

/// In-process bean inventory keyed by bean id, stock in kilograms.
#[derive(Debug, Default)]
pub struct MemoryInventory {
    stock_kg: HashMap<String, f64>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_stock(&mut self, bean_id: &str, kilograms: f64) {
        self.stock_kg.insert(bean_id.to_owned(), kilograms);
    }

    pub fn stock(&self, bean_id: &str) -> Option<f64> {
        self.stock_kg.get(bean_id).copied()
    }
}

impl Inventory for MemoryInventory {
    fn deduct(&mut self, bean_id: &str, kilograms: f64) -> Result<(), BoxError> {
        let stock = self
            .stock_kg
            .get_mut(bean_id)
            .ok_or_else(|| StoreError::UnknownBean(bean_id.to_owned()))?;
        let next = *stock - kilograms;
        if next < 0.0 {
            tracing::warn!(bean_id, stock = *stock, deduct = kilograms, "stock underflow, clamping to 0");
            *stock = 0.0;
        } else {
            *stock = next;
        }
        Ok(())
    }
}
