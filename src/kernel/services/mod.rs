//! Services layer (ports + adapters).
//!
//! - `ports`: contracts the controller is written against.
//! - `adapters`: OS specific implementations (filesystem, spooler, settings).

pub mod adapters;
pub mod ports;
