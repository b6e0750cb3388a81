use std::collections::HashMap;

/// Namespace prefix of the per-element style variables.
pub const STYLE_VAR_PREFIX: &str = "--gridtable-";

/// First tier of the cascade: live per-element style variables.
pub trait StyleSource {
    /// Raw value of the fully prefixed variable `name`, if set.
    fn variable(&self, name: &str) -> Option<String>;
}

/// A source with no variables at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStyleSource;

impl StyleSource for NoStyleSource {
    fn variable(&self, _name: &str) -> Option<String> {
        None
    }
}

impl StyleSource for HashMap<String, String> {
    fn variable(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Resolve one variable from already-fetched tiers.
///
/// `element` is the per-element value (ignored when blank), `overrides` the
/// host map. Returns `None` when neither tier has the variable, in which case
/// the caller's default applies.
pub fn resolve(
    name: &str,
    element: Option<&str>,
    overrides: Option<&HashMap<String, String>>,
) -> Option<String> {
    if let Some(value) = element.map(str::trim).filter(|v| !v.is_empty()) {
        return Some(value.to_string());
    }
    overrides.and_then(|m| m.get(name)).cloned()
}

/// Parse a pixel length, accepting an optional `px` suffix.
pub fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Cascade bound to a style source and the host's override map.
pub struct StyleCascade<'a> {
    source: &'a dyn StyleSource,
    overrides: Option<&'a HashMap<String, String>>,
}

impl<'a> StyleCascade<'a> {
    pub fn new(source: &'a dyn StyleSource, overrides: Option<&'a HashMap<String, String>>) -> Self {
        Self { source, overrides }
    }

    fn lookup(&self, name: &str) -> Option<String> {
        let element = self.source.variable(&format!("{STYLE_VAR_PREFIX}{name}"));
        resolve(name, element.as_deref(), self.overrides)
    }

    /// String-valued variable (colors).
    pub fn str(&self, name: &str, default: &str) -> String {
        self.lookup(name)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    /// Length-valued variable in pixels.
    ///
    /// An unparsable value is logged and replaced by `default`.
    pub fn length(&self, name: &str, default: f64) -> f64 {
        let Some(value) = self.lookup(name).filter(|v| !v.is_empty()) else {
            return default;
        };
        match parse_length(&value) {
            Some(n) => n,
            None => {
                log::warn!("Invalid numeric value {value:?} for style variable \"{name}\"");
                default
            }
        }
    }

    /// Length-valued variable rounded to whole pixels.
    #[allow(clippy::cast_possible_truncation)]
    pub fn px(&self, name: &str, default: i32) -> i32 {
        let n = self.length(name, f64::from(default)).round();
        n.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    }
}
