//! Vector analysis algorithms
//!
//! - Dissolve: merge features by attribute, aggregating the remaining columns

pub mod dissolve;

pub use dissolve::{
    dissolve, AggregateOp, ColumnType, Dissolve, DissolveOutput, DissolveParams, InvalidGeometry,
    OperatorPair, COUNT_COLUMN,
};
