//! Grove library exports

pub mod catalog;
pub mod selection;
