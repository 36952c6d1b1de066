//! # sortviz-chart
//!
//! Display-independent chart geometry. Datasets go in, drawing primitives
//! come out; front-ends implement [`ChartSurface`] to put them on screen.

pub mod bars;
pub mod format;
pub mod palette;
pub mod primitives;
pub mod renderer;
pub mod scale;

pub use bars::{bar_geometry, render_bars, Bar};
pub use palette::{Palette, TABLEAU10};
pub use primitives::{ChartSurface, Orientation, Point2, Primitive, RecordingSurface, Rgb};
pub use renderer::{
    ChartGeometry, ChartLayout, ChartMode, ChartRenderer, DataPoint, Dataset, Margins,
};
pub use scale::LinearScale;
