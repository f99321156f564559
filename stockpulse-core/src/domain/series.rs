//! Series: chronologically ascending sequence of price points.

use super::price_point::PricePoint;
use serde::{Deserialize, Serialize};

/// Ordered price history. Indicators depend on position, not on dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [PricePoint] {
        &mut self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Point `n` positions before the last one (`from_end(0)` is the last point).
    pub fn from_end(&self, n: usize) -> Option<&PricePoint> {
        let idx = self.points.len().checked_sub(n + 1)?;
        self.points.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    /// The `price` column, in order.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(PricePoint::price).collect()
    }

    /// Copy of this series with every derived field cleared.
    pub fn stripped(&self) -> Self {
        self.points
            .iter()
            .map(|p| p.clone().with_indicators(Default::default()))
            .collect()
    }
}

impl FromIterator<PricePoint> for Series {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_series;

    #[test]
    fn from_end_indexes_backwards() {
        let s = make_series(&[1.0, 2.0, 3.0]);
        assert_eq!(s.from_end(0).map(|p| p.price()), Some(3.0));
        assert_eq!(s.from_end(2).map(|p| p.price()), Some(1.0));
        assert!(s.from_end(3).is_none());
    }

    #[test]
    fn prices_in_order() {
        let s = make_series(&[5.0, 6.0, 7.0]);
        assert_eq!(s.prices(), vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn empty_series() {
        let s = Series::default();
        assert!(s.is_empty());
        assert!(s.last().is_none());
        assert!(s.from_end(0).is_none());
    }

    #[test]
    fn serializes_as_plain_array() {
        let s = make_series(&[1.0]);
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.is_array());
    }
}
