//! Correlation, score surfaces, and match location.
//!
//! `correlate` builds a [`ScoreSurface`] for a template and a background;
//! `locate_best` picks the extremal cell according to the surface's
//! [`Metric`].

mod correlate;
mod locate;
mod metric;
mod surface;

pub use correlate::{correlate, correlate_view, correlate_with, ensure_fits, score_at};
pub use locate::{locate_best, top_candidates, MatchResult};
pub use metric::{Extremum, Metric};
pub use surface::ScoreSurface;
