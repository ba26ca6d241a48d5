//! Limited-memory BFGS direction via the two-loop recursion.
//!
//! Keeps a bounded history of correction pairs `s = x_k − x_{k−1}`,
//! `y = g_k − g_{k−1}` and applies the implicit inverse-Hessian product
//! (Nocedal & Wright, 2nd edition, p. 178), scaling the seed matrix by
//! `s·y / y·y` from the most recent pair.
use std::collections::VecDeque;

use crate::optimization::{
    batch::DirectionStrategy,
    state::State,
    types::{Grad, Point},
};

pub(crate) struct LbfgsDirection {
    history: usize,
    ss: VecDeque<Point>,
    ys: VecDeque<Grad>,
}

impl LbfgsDirection {
    pub(crate) fn new(history: usize) -> Self {
        Self { history, ss: VecDeque::new(), ys: VecDeque::new() }
    }
}

impl DirectionStrategy for LbfgsDirection {
    fn direction(&mut self, state: &mut State) {
        let mut q = state.g.clone();

        let mut alphas = Vec::with_capacity(self.ss.len());
        for (s, y) in self.ss.iter().rev().zip(self.ys.iter().rev()) {
            let alpha = s.dot(&q) / s.dot(y);
            q.scaled_add(-alpha, y);
            alphas.push(alpha);
        }

        let mut r = match (self.ss.back(), self.ys.back()) {
            (Some(s), Some(y)) => &q * (s.dot(y) / y.dot(y)),
            _ => q,
        };

        for ((s, y), &alpha) in self.ss.iter().zip(self.ys.iter()).zip(alphas.iter().rev()) {
            let beta = y.dot(&r) / s.dot(y);
            r.scaled_add(alpha - beta, s);
        }

        state.d = -r;
    }

    fn record(&mut self, prev: &State, state: &State) {
        self.ss.push_back(&state.x - &prev.x);
        self.ys.push_back(&state.g - &prev.g);
        if self.ss.len() > self.history {
            self.ss.pop_front();
            self.ys.pop_front();
        }
    }
}
