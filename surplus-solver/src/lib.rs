/**
 * Aggregation of several curves into one composite curve per market side.
 */
mod composite;
pub use composite::*;

/**
 * Cumulative cost and utility of a curve, sampled on a fixed grid.
 */
mod integral;
pub use integral::*;

/**
 * The market: both sides together, their welfare and its optimum.
 */
mod market;
pub use market::*;

/**
 * A serializable summary of the optimum.
 */
mod report;
pub use report::*;

// Re-export the models so downstream crates need not depend on both
pub use surplus_core::models::{Curve, Interpolation, Point, SamplingConfig, Side};
