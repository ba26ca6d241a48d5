//! Per-sample loss criterion with statistics and L2 regularization.
//!
//! Purpose
//! -------
//! The concrete [`Criterion`] most training loops want: a loss closure
//! maps `(params, sample)` to a value, an error measure, and (in
//! gradient mode) a gradient contribution. The criterion keeps
//! [`Stats`] over the values and errors, sums the gradients, and reports
//! the regularized average
//! `value = avg_loss + (lambda/2)·||params||²`,
//! `vgrad = grad_sum/count + lambda·params`.
//!
//! Conventions
//! -----------
//! - [`EvalMode::Value`] skips gradient work entirely; losses may return
//!   `grad: None` in that mode.
//! - Reconfiguring parameters, lambda, or the mode clears the
//!   accumulated samples; mixing samples across configurations would be
//!   meaningless.
use std::sync::Arc;

use crate::{
    optimization::{
        errors::{OptError, OptResult},
        types::{Grad, Point, Scalar},
        validation::verify_regularization,
    },
    parallel::accumulator::Criterion,
};

/// What the loss closure is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    /// Value and error only.
    Value,
    /// Value, error, and gradient contribution.
    ValueGrad,
}

/// Output of the loss closure for one sample.
#[derive(Debug, Clone)]
pub struct SampleLoss {
    /// Loss value fed into the objective average.
    pub value: Scalar,
    /// Error measure (e.g. misclassification), tracked separately.
    pub error: Scalar,
    /// Gradient contribution; required in [`EvalMode::ValueGrad`].
    pub grad: Option<Grad>,
}

/// Streaming count/sum/extrema/second-moment statistics.
#[derive(Debug, Clone, Copy)]
pub struct Stats {
    count: usize,
    sum: Scalar,
    sum_squares: Scalar,
    min: Scalar,
    max: Scalar,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            sum_squares: 0.0,
            min: Scalar::INFINITY,
            max: Scalar::NEG_INFINITY,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn update(&mut self, value: Scalar) {
        self.count += 1;
        self.sum += value;
        self.sum_squares += value * value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn merge(&mut self, other: &Stats) {
        self.count += other.count;
        self.sum += other.sum;
        self.sum_squares += other.sum_squares;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn sum(&self) -> Scalar {
        self.sum
    }

    /// Mean; 0.0 when empty.
    pub fn avg(&self) -> Scalar {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as Scalar
        }
    }

    /// Population variance; 0.0 when empty.
    pub fn var(&self) -> Scalar {
        if self.count == 0 {
            return 0.0;
        }
        let avg = self.avg();
        (self.sum_squares / self.count as Scalar - avg * avg).max(0.0)
    }

    pub fn min(&self) -> Scalar {
        self.min
    }

    pub fn max(&self) -> Scalar {
        self.max
    }
}

type LossFn<S> = Arc<dyn Fn(&Point, &S, EvalMode) -> SampleLoss + Send + Sync>;

/// [`Criterion`] built from a per-sample loss closure.
pub struct LossCriterion<S> {
    loss: LossFn<S>,
    params: Point,
    lambda: Scalar,
    mode: EvalMode,
    vstats: Stats,
    estats: Stats,
    grad_sum: Grad,
}

impl<S> Clone for LossCriterion<S> {
    fn clone(&self) -> Self {
        Self {
            loss: Arc::clone(&self.loss),
            params: self.params.clone(),
            lambda: self.lambda,
            mode: self.mode,
            vstats: self.vstats,
            estats: self.estats,
            grad_sum: self.grad_sum.clone(),
        }
    }
}

impl<S> LossCriterion<S>
where
    S: Send + Sync + 'static,
{
    /// # Errors
    /// Returns [`OptError::InvalidRegularization`] for a negative or
    /// non-finite lambda.
    pub fn new(
        params: Point, lambda: Scalar,
        loss: impl Fn(&Point, &S, EvalMode) -> SampleLoss + Send + Sync + 'static,
    ) -> OptResult<Self> {
        verify_regularization(lambda)?;
        let dimensions = params.len();
        Ok(Self {
            loss: Arc::new(loss),
            params,
            lambda,
            mode: EvalMode::ValueGrad,
            vstats: Stats::new(),
            estats: Stats::new(),
            grad_sum: Grad::zeros(dimensions),
        })
    }

    /// Install new parameters and clear the accumulated samples.
    ///
    /// # Errors
    /// Returns [`OptError::CriterionDimMismatch`] when the dimension
    /// changes.
    pub fn set_params(&mut self, params: Point) -> OptResult<()> {
        if params.len() != self.params.len() {
            return Err(OptError::CriterionDimMismatch {
                expected: self.params.len(),
                found: params.len(),
            });
        }
        self.params = params;
        self.clear();
        Ok(())
    }

    /// Change the regularization weight and clear.
    ///
    /// # Errors
    /// Returns [`OptError::InvalidRegularization`] for a negative or
    /// non-finite lambda.
    pub fn set_lambda(&mut self, lambda: Scalar) -> OptResult<()> {
        verify_regularization(lambda)?;
        self.lambda = lambda;
        self.clear();
        Ok(())
    }

    /// Switch between value-only and value+gradient evaluation; clears.
    pub fn set_mode(&mut self, mode: EvalMode) {
        self.mode = mode;
        self.clear();
    }

    pub fn params(&self) -> &Point {
        &self.params
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    /// Statistics over the per-sample loss values.
    pub fn vstats(&self) -> &Stats {
        &self.vstats
    }

    /// Statistics over the per-sample error measures.
    pub fn estats(&self) -> &Stats {
        &self.estats
    }
}

impl<S> Criterion for LossCriterion<S>
where
    S: Send + Sync + 'static,
{
    type Sample = S;

    fn clear(&mut self) {
        self.vstats.clear();
        self.estats.clear();
        self.grad_sum.fill(0.0);
    }

    fn update(&mut self, sample: &S) {
        let result = (self.loss)(&self.params, sample, self.mode);
        self.vstats.update(result.value);
        self.estats.update(result.error);
        if self.mode == EvalMode::ValueGrad {
            if let Some(grad) = result.grad {
                self.grad_sum += &grad;
            }
        }
    }

    fn merge(&mut self, other: &Self) {
        self.vstats.merge(&other.vstats);
        self.estats.merge(&other.estats);
        self.grad_sum += &other.grad_sum;
    }

    fn value(&self) -> Scalar {
        self.vstats.avg() + 0.5 * self.lambda * self.params.dot(&self.params)
    }

    fn vgrad(&self) -> Grad {
        let count = self.vstats.count().max(1) as Scalar;
        let mut grad = &self.grad_sum / count;
        grad.scaled_add(self.lambda, &self.params);
        grad
    }

    fn count(&self) -> usize {
        self.vstats.count()
    }
}
