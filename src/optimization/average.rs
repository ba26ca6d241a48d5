//! Weighted running averages over scalars and vectors.
//!
//! Both keep the pair `(weights_sum, average)` and fold each observation
//! in as `average += (value − average) · (weight / weights_sum')`, where
//! `weights_sum'` already includes the new weight. With unit weights this
//! is the exact cumulative mean; the averaging and adaptive stochastic
//! solvers build on it.
use ndarray::Array1;

use crate::optimization::types::Scalar;

/// Weighted running average of a scalar sequence.
#[derive(Debug, Clone, Default)]
pub struct RunningScalar {
    weights: Scalar,
    average: Scalar,
}

impl RunningScalar {
    pub fn new() -> Self {
        Self { weights: 0.0, average: 0.0 }
    }

    /// Fold in one observation with the given weight.
    pub fn update(&mut self, value: Scalar, weight: Scalar) {
        self.weights += weight;
        self.average += (value - self.average) * (weight / self.weights);
    }

    /// Current average; 0.0 before the first update.
    pub fn average(&self) -> Scalar {
        self.average
    }

    /// Sum of the weights folded in so far.
    pub fn weights_sum(&self) -> Scalar {
        self.weights
    }

    pub fn reset(&mut self) {
        self.weights = 0.0;
        self.average = 0.0;
    }
}

/// Weighted running average of a vector sequence, component-wise.
#[derive(Debug, Clone)]
pub struct RunningVector {
    weights: Scalar,
    average: Array1<Scalar>,
}

impl RunningVector {
    pub fn new(dimensions: usize) -> Self {
        Self { weights: 0.0, average: Array1::zeros(dimensions) }
    }

    /// Fold in one observation with the given weight.
    pub fn update(&mut self, value: &Array1<Scalar>, weight: Scalar) {
        self.weights += weight;
        let ratio = weight / self.weights;
        self.average.zip_mut_with(value, |avg, &v| *avg += (v - *avg) * ratio);
    }

    /// Current average; the zero vector before the first update.
    pub fn average(&self) -> &Array1<Scalar> {
        &self.average
    }

    /// Sum of the weights folded in so far.
    pub fn weights_sum(&self) -> Scalar {
        self.weights
    }

    pub fn reset(&mut self) {
        self.weights = 0.0;
        self.average.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    // Purpose: unit weights reproduce the exact cumulative mean.
    // Given: the sequence 1, 2, 3 with weight 1 each.
    // Expect: averages 1, 1.5, 2 and weights_sum 3.
    #[test]
    fn unit_weights_give_cumulative_mean() {
        let mut avg = RunningScalar::new();
        avg.update(1.0, 1.0);
        assert_eq!(avg.average(), 1.0);
        avg.update(2.0, 1.0);
        assert_eq!(avg.average(), 1.5);
        avg.update(3.0, 1.0);
        assert_eq!(avg.average(), 2.0);
        assert_eq!(avg.weights_sum(), 3.0);
    }

    // Purpose: unequal weights tilt the average toward heavier values.
    // Given: 0 with weight 1, then 4 with weight 3.
    // Expect: (0·1 + 4·3) / 4 = 3.
    #[test]
    fn heavier_observations_dominate() {
        let mut avg = RunningScalar::new();
        avg.update(0.0, 1.0);
        avg.update(4.0, 3.0);
        assert!((avg.average() - 3.0).abs() < 1e-12);
    }

    // Purpose: the vector form averages component-wise.
    // Given: (1, 10) and (3, 30) with unit weights.
    // Expect: (2, 20), and reset returns to the zero vector.
    #[test]
    fn vector_average_is_component_wise() {
        let mut avg = RunningVector::new(2);
        avg.update(&array![1.0, 10.0], 1.0);
        avg.update(&array![3.0, 30.0], 1.0);
        assert_eq!(avg.average(), &array![2.0, 20.0]);

        avg.reset();
        assert_eq!(avg.average(), &array![0.0, 0.0]);
        assert_eq!(avg.weights_sum(), 0.0);
    }
}
