//! Reference height table.
//!
//! Maps an object class label to an assumed real-world vertical extent in
//! meters. The table is populated once at startup and read-only afterwards;
//! the distance estimator owns a copy and never mutates it.

use std::collections::HashMap;

use crate::config::ConfigError;

/// Default label -> assumed height (meters) entries.
///
/// Values are rough indoor-scene priors, not calibrated measurements.
const DEFAULT_HEIGHTS: &[(&str, f64)] = &[
    ("person", 1.7),
    ("watch", 1.7),
    ("spoon", 2.5),
    ("bottle", 0.25),
    ("cup", 0.1),
    ("chair", 1.0),
    ("couch", 0.9),
    ("tv", 0.6),
    ("laptop", 0.25),
    ("cell phone", 0.15),
    ("microwave", 0.35),
    ("refrigerator", 1.8),
    ("toaster", 0.2),
    ("oven", 0.8),
    ("sink", 0.9),
    ("bed", 0.5),
    ("table", 0.75),
    ("dining table", 0.75),
    ("toilet", 0.7),
    ("potted plant", 0.6),
    ("mirror", 1.2),
    ("clock", 0.4),
    ("vase", 0.35),
    ("scissors", 0.2),
    ("book", 0.25),
    ("remote", 0.2),
    ("keyboard", 0.05),
    ("mouse", 0.05),
    ("backpack", 0.45),
    ("handbag", 0.35),
    ("suitcase", 0.6),
    ("hair drier", 0.25),
    ("toothbrush", 0.2),
    ("toothpaste", 0.15),
    ("towel", 0.6),
    ("washing machine", 0.85),
    ("fan", 1.2),
    ("air conditioner", 0.3),
    ("lamp", 1.5),
    ("bookcase", 1.8),
    ("monitor", 0.35),
    ("printer", 0.25),
    ("speaker", 0.3),
    ("blender", 0.4),
    ("kettle", 0.3),
    ("trash can", 0.6),
    ("router", 0.05),
    ("notebook", 0.25),
    ("pen", 0.15),
    ("mug", 0.12),
    ("plate", 0.03),
    ("sandal", 0.12),
    ("shoe", 0.15),
    ("umbrella", 0.9),
    ("broom", 1.2),
    ("detergent", 0.3),
    ("ironing board", 0.9),
    ("hanger", 0.2),
];

/// Immutable label -> assumed-height mapping.
///
/// Absence of a label is not an error; it marks the class as one the
/// pipeline silently skips.
#[derive(Clone, Debug, Default)]
pub struct ReferenceHeightTable {
    heights: HashMap<String, f64>,
}

impl ReferenceHeightTable {
    /// Empty table. Useful for tests and fully config-driven deployments.
    pub fn new() -> Self {
        Self {
            heights: HashMap::new(),
        }
    }

    /// Table pre-populated with the built-in indoor-scene entries.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for (label, height_m) in DEFAULT_HEIGHTS {
            // Built-in entries are all positive; register cannot fail here.
            table
                .register(label, *height_m)
                .unwrap_or_else(|_| unreachable!("built-in height entries are positive"));
        }
        table
    }

    /// Add or override an entry. Heights must be positive and finite.
    pub fn register(&mut self, label: &str, height_m: f64) -> Result<(), ConfigError> {
        if !height_m.is_finite() || height_m <= 0.0 {
            return Err(ConfigError::InvalidHeight {
                label: label.to_string(),
                height_m,
            });
        }
        self.heights.insert(label.to_string(), height_m);
        Ok(())
    }

    /// Assumed height for a label, if the label is known.
    pub fn lookup(&self, label: &str) -> Option<f64> {
        self.heights.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_common_labels() {
        let table = ReferenceHeightTable::with_defaults();
        assert_eq!(table.lookup("person"), Some(1.7));
        assert_eq!(table.lookup("cup"), Some(0.1));
        assert_eq!(table.lookup("hanger"), Some(0.2));
        assert!(table.len() >= 60);
    }

    #[test]
    fn unknown_label_is_absent_not_error() {
        let table = ReferenceHeightTable::with_defaults();
        assert_eq!(table.lookup("drone"), None);
    }

    #[test]
    fn register_rejects_non_positive_heights() {
        let mut table = ReferenceHeightTable::new();
        assert!(table.register("pole", 0.0).is_err());
        assert!(table.register("pole", -1.0).is_err());
        assert!(table.register("pole", f64::NAN).is_err());
        assert!(table.lookup("pole").is_none());

        table.register("pole", 2.5).unwrap();
        assert_eq!(table.lookup("pole"), Some(2.5));
    }

    #[test]
    fn register_overrides_existing_entry() {
        let mut table = ReferenceHeightTable::with_defaults();
        table.register("person", 1.8).unwrap();
        assert_eq!(table.lookup("person"), Some(1.8));
    }
}
