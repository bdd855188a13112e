#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for supply and demand diagrams.
///
/// This module contains the data structures the solver and the renderer share:
/// curve samples and curves, geometric primitives, labels, styles and the
/// sampling configuration.
///
/// The models are primarily data with validation; aggregation, integration and
/// the equilibrium search are implemented downstream.
pub mod models;

/// Uniform sampling grids.
///
/// Every numerical operation on curves (resampling, integration, the welfare
/// search) works on the grids built here, so they share one rounding rule.
pub mod grid;

pub use grid::{DECIMALS, round_to};
