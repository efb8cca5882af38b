//! Candidate ranking over score surfaces.
//!
//! Includes Top-K collection and spatial non-maximum suppression, used to
//! report runner-up placements next to the best match.

pub(crate) mod nms;
pub(crate) mod topk;
