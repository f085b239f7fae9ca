//! Helper functions

pub mod xml;
