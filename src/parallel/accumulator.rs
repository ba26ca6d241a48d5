//! Deterministic parallel accumulation of a criterion over samples.
//!
//! Purpose
//! -------
//! Spread a per-sample accumulation ([`Criterion::update`]) across the
//! workers of a [`ThreadPool`] without giving up reproducibility: sample
//! `i` always goes to worker `i mod nthreads`, each worker folds its
//! share into its own criterion cache, and after the pool drains the
//! caches merge into the aggregate in strictly increasing worker order.
//! For a fixed worker count the result is therefore identical from run
//! to run, and with one worker it reduces exactly to the sequential
//! pass.
//!
//! Invariants & assumptions
//! ------------------------
//! - Each worker cache is only locked by its own task during `update`,
//!   so the mutexes never contend; they exist to satisfy `Send`/`Sync`.
//! - Worker caches are cleared after every merge, keeping repeated
//!   `update` calls cumulative on the aggregate exactly as in the
//!   sequential path.
//! - A panicking task is fatal to the batch being accumulated; the
//!   accumulator recovers poisoned locks instead of panicking itself.
use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    optimization::types::{Grad, Scalar},
    parallel::pool::ThreadPool,
};

/// Accumulation capability: fold samples in, merge siblings, report.
pub trait Criterion: Send {
    type Sample: Send + Sync + 'static;

    /// Drop all accumulated samples (configuration stays).
    fn clear(&mut self);

    /// Fold one sample in.
    fn update(&mut self, sample: &Self::Sample);

    /// Fold a sibling accumulator in.
    fn merge(&mut self, other: &Self);

    /// Accumulated objective value.
    fn value(&self) -> Scalar;

    /// Accumulated objective gradient.
    fn vgrad(&self) -> Grad;

    /// Number of samples folded in.
    fn count(&self) -> usize;
}

/// Sequential or pool-backed driver for a [`Criterion`].
pub struct ParallelAccumulator<C: Criterion> {
    pool: Option<Arc<ThreadPool>>,
    aggregate: C,
    caches: Vec<Arc<Mutex<C>>>,
}

impl<C> ParallelAccumulator<C>
where
    C: Criterion + Clone + 'static,
{
    /// Single-threaded accumulation.
    pub fn sequential(criterion: C) -> Self {
        let mut aggregate = criterion;
        aggregate.clear();
        Self { pool: None, aggregate, caches: Vec::new() }
    }

    /// Pool-backed accumulation with one criterion clone per worker.
    pub fn with_pool(criterion: C, pool: Arc<ThreadPool>) -> Self {
        let caches = (0..pool.n_workers())
            .map(|_| {
                let mut cache = criterion.clone();
                cache.clear();
                Arc::new(Mutex::new(cache))
            })
            .collect();
        let mut aggregate = criterion;
        aggregate.clear();
        Self { pool: Some(pool), aggregate, caches }
    }

    /// Number of accumulation lanes (1 in sequential mode).
    pub fn nthreads(&self) -> usize {
        if self.pool.is_some() {
            self.caches.len()
        } else {
            1
        }
    }

    /// Drop accumulated samples from the aggregate and every cache.
    pub fn clear(&mut self) {
        self.aggregate.clear();
        for cache in &self.caches {
            cache.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }

    /// Reconfigure the criterion in every lane, then clear. The closure
    /// must apply the same configuration everywhere or the lanes stop
    /// being interchangeable.
    pub fn configure(&mut self, op: impl Fn(&mut C)) {
        op(&mut self.aggregate);
        for cache in &self.caches {
            op(&mut cache.lock().unwrap_or_else(PoisonError::into_inner));
        }
        self.clear();
    }

    /// Fold every sample in, partitioned by `index mod nthreads`, and
    /// merge the worker caches into the aggregate in worker order.
    pub fn update(&mut self, samples: &Arc<[C::Sample]>) {
        let pool = match &self.pool {
            None => {
                for sample in samples.iter() {
                    self.aggregate.update(sample);
                }
                return;
            }
            Some(pool) => pool,
        };

        let lanes = self.caches.len();
        for (worker, cache) in self.caches.iter().enumerate() {
            let cache = Arc::clone(cache);
            let samples = Arc::clone(samples);
            pool.enqueue(move || {
                let mut criterion = cache.lock().unwrap_or_else(PoisonError::into_inner);
                let mut index = worker;
                while index < samples.len() {
                    criterion.update(&samples[index]);
                    index += lanes;
                }
            });
        }
        pool.wait();

        // Merge order is the worker index, never completion order.
        for cache in &self.caches {
            let mut criterion = cache.lock().unwrap_or_else(PoisonError::into_inner);
            self.aggregate.merge(&criterion);
            criterion.clear();
        }
    }

    /// Accumulated value (delegates to the aggregate criterion).
    pub fn value(&self) -> Scalar {
        self.aggregate.value()
    }

    /// Accumulated gradient (delegates to the aggregate criterion).
    pub fn vgrad(&self) -> Grad {
        self.aggregate.vgrad()
    }

    /// Samples folded in since the last clear.
    pub fn count(&self) -> usize {
        self.aggregate.count()
    }

    /// The merged criterion itself, for richer reporting.
    pub fn aggregate(&self) -> &C {
        &self.aggregate
    }
}
