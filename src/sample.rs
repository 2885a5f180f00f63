//! Sample data model
//!
//! A session produces 2D position samples over the unit square. Two
//! populations exist at once: the current session ("local") and the
//! accumulated history of all sessions ("global"). Each population is held
//! as an ordered dataset, replaced wholesale on reload.

use serde::Deserialize;

/// Which population a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The current session
    Local,
    /// All sessions
    Global,
}

impl Scope {
    /// Parse from the string tag used in dataset documents
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "local" => Some(Scope::Local),
            "global" => Some(Scope::Global),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Local => "local",
            Scope::Global => "global",
        }
    }
}

/// A single 2D position sample, coordinates in [0,1]
///
/// Values outside the unit square are not corrected here; consumers clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub scope: Scope,
}

/// An ordered sequence of samples, homogeneous in scope
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    points: Vec<SamplePoint>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Dataset { points: Vec::new() }
    }

    /// Create from a sequence of samples
    pub fn from_points(points: Vec<SamplePoint>) -> Self {
        Dataset { points }
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Raw sample record as it appears in a dataset document
#[derive(Debug, Clone, Deserialize)]
pub struct RawSample {
    pub x: f64,
    pub y: f64,
    pub scope: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse() {
        assert_eq!(Scope::parse("local"), Some(Scope::Local));
        assert_eq!(Scope::parse("Global"), Some(Scope::Global));
        assert_eq!(Scope::parse("GLOBAL"), Some(Scope::Global));
        assert_eq!(Scope::parse("session"), None);
        assert_eq!(Scope::parse(""), None);
    }

    #[test]
    fn test_scope_round_trip() {
        assert_eq!(Scope::parse(Scope::Local.as_str()), Some(Scope::Local));
        assert_eq!(Scope::parse(Scope::Global.as_str()), Some(Scope::Global));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::new();
        assert!(ds.is_empty());
        assert_eq!(ds.len(), 0);
        assert!(ds.points().is_empty());
    }
}
