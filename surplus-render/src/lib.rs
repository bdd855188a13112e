#![warn(missing_docs)]
//! Diagrams of supply and demand markets.
//!
//! Plotters ([`SupplyDemandPlotter`], [`CostUtilityPlotter`]) write curves,
//! shaded areas and annotations into a [`Figure`], a display list in data
//! coordinates. The [`SvgRenderer`] then lays the figure out in pixels and
//! draws it with `plotters`.

mod draw;
mod error;
mod figure;
mod plotter;
mod svg;

pub use draw::{Drawable, Labelable};
pub use error::RenderError;
pub use figure::{AxesSpec, Figure, Fill, HAlign, Line, Mark, Text, Tick, VAlign};
pub use plotter::{CostUtilityPlotter, PlotMode, SupplyDemandPlotter, plot};
pub use svg::{RenderConfig, SvgRenderer};
