//! Source adapters
//!
//! Thin readers turning upstream formats into the generator's descriptor
//! types. The rest of the pipeline only ever sees descriptors, never the
//! upstream parsers' own representations.

pub mod dbc;
pub mod params;
