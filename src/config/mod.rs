//! Table configuration.
//!
//! - [`TableOptions`]: plain, serializable static settings
//! - [`StaticConfig`]: options plus the root element and host callbacks, fixed
//!   for the controller's lifetime
//! - [`DynamicConfig`]: viewport position and size arrays, mutated while the
//!   table is in use

mod dynamic;
mod options;
mod static_config;

pub use dynamic::{DynamicConfig, DynamicConfigData, ViewportPosition, UNMEASURED};
pub use options::TableOptions;
pub use static_config::{
    CellContent, CellRequest, ContentFactory, MeasureFn, ReleaseFn, StaticConfig,
};
