//! CLI library components for the foomatic-db catalog generator.

pub mod logging;
