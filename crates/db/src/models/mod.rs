//! Database row types.

pub mod entity;
