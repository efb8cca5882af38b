//! slidematch locates the gap of a slide puzzle in a background image.
//!
//! Given an encoded background and an encoded puzzle piece, the pipeline
//! normalizes both to the full intensity range, reduces them to binary edge
//! maps, correlates the piece over every placement in the background, and
//! reports the horizontal offset of the best placement. Parallel row scans
//! are available via the `rayon` feature and a SIMD cross-product kernel via
//! the `simd` feature.
//!
//! ```no_run
//! use slidematch::{compute_offset, OffsetConfig};
//!
//! let background = std::fs::read("bg.png")?;
//! let piece = std::fs::read("piece.png")?;
//! let offset = compute_offset(&background, &piece, &OffsetConfig::default())?;
//! println!("drag by {offset}px");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod candidate;
pub mod debug;
pub mod edge;
pub mod image;
pub mod kernel;
pub mod observer;
pub mod offset;
pub mod search;
pub mod template;
pub(crate) mod trace;
pub mod util;

pub use candidate::topk::Peak;
pub use crate::image::io::{decode_gray, load_gray_image};
pub use crate::image::normalize::normalize_min_max;
pub use crate::image::{ImageView, OwnedImage};
pub use edge::{extract_edges, EdgeMap, EdgeThresholds};
pub use observer::MatchObserver;
pub use offset::{
    compute_offset, resolve_offset, CoordinateMapping, OffsetConfig, OffsetReport, OffsetSolver,
};
pub use search::{
    correlate, locate_best, top_candidates, Extremum, MatchResult, Metric, ScoreSurface,
};
pub use template::{Template, TemplatePlan};
pub use util::{SlideError, SlideResult};
