//! Style metrics and the three-tier cascade they are resolved from.
//!
//! Each metric is looked up as:
//! 1. the per-element style variable `--gridtable-<name>`, if non-empty
//! 2. the host's override map entry `<name>`
//! 3. a built-in default (possibly another metric, e.g. `gridLineWidth`)

mod cascade;
mod metrics;

pub use cascade::{parse_length, resolve, NoStyleSource, StyleCascade, StyleSource, STYLE_VAR_PREFIX};
pub use metrics::{CssColor, GridLines, StyleMetrics};
