//! Market price source for the scorer

use std::collections::HashMap;

/// Latest known market price per quintal for a crop
pub trait PriceLookup {
    fn latest_price(&self, crop: &str) -> Option<f64>;
}

/// No market data; every crop uses its fallback price
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMarketData;

impl PriceLookup for NoMarketData {
    fn latest_price(&self, _crop: &str) -> Option<f64> {
        None
    }
}

/// Prices fetched ahead of scoring so the scorer itself stays synchronous
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSnapshot {
    prices: HashMap<String, f64>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, crop: impl Into<String>, price: f64) {
        self.prices.insert(crop.into(), price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl FromIterator<(String, f64)> for PriceSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

impl PriceLookup for PriceSnapshot {
    fn latest_price(&self, crop: &str) -> Option<f64> {
        self.prices.get(crop).copied()
    }
}

impl<T: PriceLookup + ?Sized> PriceLookup for &T {
    fn latest_price(&self, crop: &str) -> Option<f64> {
        (**self).latest_price(crop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_lookup() {
        let snapshot: PriceSnapshot = vec![("wheat".to_string(), 2250.0)].into_iter().collect();
        assert_eq!(snapshot.latest_price("wheat"), Some(2250.0));
        assert_eq!(snapshot.latest_price("rice"), None);
        assert_eq!(NoMarketData.latest_price("wheat"), None);
    }
}
