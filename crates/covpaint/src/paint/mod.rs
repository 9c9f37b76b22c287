//! Turning coverage into colored text.
//!
//! ```text
//! Profile::boundaries() ──build_paint_points──► [PaintPoint] ──annotate──► [Run]
//!                                                                          │
//!                                          Gradient::tint(bucket) ◄────────┘
//! ```

mod gradient;
mod points;
mod render;

pub use gradient::{ansi, Gradient, OutputMode, Rgb, Tint, STEPS};
pub use points::{build_paint_points, coverage_bucket, paint_profile, BoundaryError, PaintPoint};
pub use render::{annotate, render_annotated, Run};
