//! Core value types shared by the controller and its collaborators.

mod cell;
mod geometry;

pub use cell::*;
pub use geometry::*;
