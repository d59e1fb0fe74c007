//! Chart description: everything a renderer needs to draw the heatmap,
//! independent of how it gets drawn.

pub mod assemble;
pub mod legend;
pub mod spec;
pub mod theme;
pub mod tooltip;
pub mod zoom;

pub use assemble::{assemble, flatten_cells, ChartOptions};
pub use legend::LegendPiece;
pub use spec::{Cell, ChartSpec};
pub use theme::{Palette, Theme};
pub use tooltip::Tooltip;
pub use zoom::{Axis, ZoomWindow};
