//! Steepest descent: `d = −g`.
use crate::optimization::{batch::DirectionStrategy, state::State};

pub(crate) struct GdDirection;

impl DirectionStrategy for GdDirection {
    fn direction(&mut self, state: &mut State) {
        state.d = -state.g.clone();
    }
}
