//! Optional observation of intermediate matching results.
//!
//! Observers see the score surface and the chosen match after location and
//! before the offset is resolved. They cannot influence the result.

use crate::search::{MatchResult, ScoreSurface};

/// Callback invoked once per matching run.
pub trait MatchObserver {
    /// Receives the full score surface and the best match on it.
    fn on_match(&mut self, surface: &ScoreSurface, best: &MatchResult);
}

impl<F> MatchObserver for F
where
    F: FnMut(&ScoreSurface, &MatchResult),
{
    fn on_match(&mut self, surface: &ScoreSurface, best: &MatchResult) {
        self(surface, best)
    }
}
