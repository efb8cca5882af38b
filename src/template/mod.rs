//! Puzzle-piece templates and their precomputed statistics.

use crate::edge::EdgeMap;
use crate::util::SlideResult;

mod plan;

pub use plan::TemplatePlan;

/// Edge-extracted puzzle piece ready for correlation.
///
/// Templates are immutable, so one instance can be correlated against many
/// backgrounds, including from several threads at once.
#[derive(Clone, Debug)]
pub struct Template {
    plan: TemplatePlan,
}

impl Template {
    /// Creates a template from an edge map of the piece.
    pub fn new(edges: EdgeMap) -> SlideResult<Self> {
        let plan = TemplatePlan::from_view(edges.view())?;
        Ok(Self { plan })
    }

    /// Returns the precomputed plan.
    pub fn plan(&self) -> &TemplatePlan {
        &self.plan
    }
}
