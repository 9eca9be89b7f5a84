//! Entry model builders
//!
//! Turn source descriptors into document entries: one bus per CAN frame, one
//! parameter per table row. Enum references are resolved through the
//! [`EnumRegistry`](crate::enums::EnumRegistry) owned by the conversion run.

pub mod bus;
pub mod params;

pub use bus::build_bus_entries;
pub use params::build_parameter_entries;
