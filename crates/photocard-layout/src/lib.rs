//! Pure layout math for photo card pages.
//!
//! Everything in this crate is side-effect free: paper and grid resolution,
//! normalized crop calculus, per-cell image placement, and the fully
//! resolved [`LayoutPlan`] that every render path (preview, PDF, raster)
//! consumes. Keeping the geometry in one place is what guarantees that the
//! on-screen preview and the exported artifacts agree.

pub mod constants;

mod cell;
mod crop;
mod geometry;
mod plan;
mod settings;
mod types;

pub use cell::*;
pub use crop::*;
pub use geometry::*;
pub use plan::*;
pub use settings::*;
pub use types::*;
