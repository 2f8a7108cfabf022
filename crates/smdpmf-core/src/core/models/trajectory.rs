use crate::core::numerics::ordering::{is_non_decreasing, order_by_distance};
use crate::core::numerics::{NumericsError, ensure_same_length};

/// One steered-pulling run: paired extension (nm) and force (kJ/mol/nm) samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    index: u64,
    condition: String,
    distance: Vec<f64>,
    force: Vec<f64>,
}

impl Trajectory {
    pub fn new(
        index: u64,
        condition: impl Into<String>,
        distance: Vec<f64>,
        force: Vec<f64>,
    ) -> Result<Self, NumericsError> {
        ensure_same_length(&distance, &force)?;
        Ok(Self {
            index,
            condition: condition.into(),
            distance,
            force,
        })
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn distance(&self) -> &[f64] {
        &self.distance
    }

    pub fn force(&self) -> &[f64] {
        &self.force
    }

    pub fn len(&self) -> usize {
        self.distance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    pub fn is_distance_ordered(&self) -> bool {
        is_non_decreasing(&self.distance)
    }

    /// A copy of this trajectory with samples in ascending distance order.
    pub fn ordered_by_distance(&self) -> Result<Self, NumericsError> {
        let (distance, force) = order_by_distance(&self.distance, &self.force)?;
        Ok(Self {
            index: self.index,
            condition: self.condition.clone(),
            distance,
            force,
        })
    }
}
