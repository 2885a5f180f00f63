//! Mood Map Library
//!
//! Core modules for the mood-density heatmap generator: sample data model,
//! occupancy grid aggregation, layer composition, the reference annotation
//! catalog, and the render driver boundary.

pub mod annotations;
pub mod config;
pub mod error;
pub mod fetch;
pub mod grid;
pub mod layers;
pub mod pipeline;
pub mod raster;
pub mod render;
pub mod sample;
pub mod state;
