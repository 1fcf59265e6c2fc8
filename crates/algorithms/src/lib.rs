//! # GeoDissolve Algorithms
//!
//! Vector algorithms for GeoDissolve.
//!
//! ## Available Algorithms
//!
//! - **vector::dissolve**: group features by geometry kind and attribute
//!   values, merge each group's geometries and aggregate its columns

pub(crate) mod maybe_rayon;
pub mod vector;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::vector::{
        dissolve, AggregateOp, ColumnType, Dissolve, DissolveOutput, DissolveParams,
        InvalidGeometry, OperatorPair, COUNT_COLUMN,
    };
    pub use geodissolve_core::prelude::*;
}
