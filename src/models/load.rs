//! Per-commodity quantity vector used for demands, capacities, and carried loads.

use serde::{Deserialize, Serialize};

/// A vector of integer quantities, one entry per commodity.
///
/// Missing trailing entries read as zero, so a hub or waypoint may carry an
/// empty vector.
///
/// # Examples
///
/// ```
/// use u_fleet::models::Load;
///
/// let load = Load::zero(2)
///     .checked_add(&Load::from(vec![1, 2]))
///     .and_then(|l| l.checked_add(&Load::from(vec![1, 0])))
///     .unwrap();
/// assert_eq!(load.as_slice(), &[2, 2]);
/// assert!(load.checked_add(&Load::from(vec![i32::MAX, 0])).is_none());
/// assert!(load.fits_within(&Load::from(vec![2, 3])));
/// assert_eq!(load.first_exceeded(&Load::from(vec![1, 3])), Some(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Load(Vec<i32>);

impl Load {
    /// Creates a load from explicit per-commodity values.
    pub fn new(values: Vec<i32>) -> Self {
        Self(values)
    }

    /// Creates an all-zero load for `commodities` commodities.
    pub fn zero(commodities: usize) -> Self {
        Self(vec![0; commodities])
    }

    /// Number of stored commodity entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Quantity of `commodity`, zero when the entry is absent.
    pub fn get(&self, commodity: usize) -> i32 {
        self.0.get(commodity).copied().unwrap_or(0)
    }

    /// Raw per-commodity values.
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    /// Iterates over per-commodity values.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    /// Sum over all commodities.
    pub fn total(&self) -> i64 {
        self.0.iter().map(|&q| i64::from(q)).sum()
    }

    /// Returns `true` if every entry is zero (or there are none).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&q| q == 0)
    }

    /// Index of the first negative entry, if any.
    pub fn first_negative(&self) -> Option<usize> {
        self.0.iter().position(|&q| q < 0)
    }

    /// Index of the first commodity whose quantity exceeds `capacity`.
    pub fn first_exceeded(&self, capacity: &Load) -> Option<usize> {
        (0..self.len().max(capacity.len())).find(|&c| self.get(c) > capacity.get(c))
    }

    /// Returns `true` if every commodity fits within `capacity`.
    pub fn fits_within(&self, capacity: &Load) -> bool {
        self.first_exceeded(capacity).is_none()
    }

    /// Per-commodity sum, widened to the longer operand.
    ///
    /// Returns `None` if any entry leaves the `i32` range. No capacity can
    /// hold such a sum, so callers treat it as over capacity.
    pub fn checked_add(&self, rhs: &Load) -> Option<Load> {
        (0..self.len().max(rhs.len()))
            .map(|c| self.get(c).checked_add(rhs.get(c)))
            .collect::<Option<Vec<i32>>>()
            .map(Load)
    }
}

impl From<Vec<i32>> for Load {
    fn from(values: Vec<i32>) -> Self {
        Self(values)
    }
}
