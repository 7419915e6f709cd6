//! This module contains the recursive default-fill algorithm.
pub mod fill_defaults;
