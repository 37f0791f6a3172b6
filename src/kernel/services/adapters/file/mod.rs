//! Local filesystem backend for the file port.

pub mod local;

pub use local::LocalFileProvider;
