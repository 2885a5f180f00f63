//! Reference annotation catalog
//!
//! Loads the fixed emotion landmarks from annotations.json (embedded at
//! compile time) and exposes them as an immutable, ordered overlay. The
//! catalog never changes during the process lifetime.
//!
//! Each entry carries exactly one color representation. The source document
//! permits either a hex RGB string or an HSL triple per entry; entries with
//! both (or neither) are rejected at load time so rendering never has to
//! guess which field wins.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// Embedded annotations.json content
const ANNOTATIONS_JSON: &str = include_str!("../annotations.json");

/// Global annotation registry, initialized lazily on first access
pub static ANNOTATION_REGISTRY: Lazy<AnnotationRegistry> = Lazy::new(|| {
    AnnotationRegistry::from_json(ANNOTATIONS_JSON).unwrap_or_else(|e| {
        eprintln!("ERROR: Failed to load annotations.json: {}", e);
        AnnotationRegistry::default()
    })
});

/// The active color representation of an annotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSource {
    /// RGB triple
    Rgb([u8; 3]),
    /// HSL triple: hue in degrees, saturation and lightness in percent
    Hsl { h: f64, s: f64, l: f64 },
}

impl ColorSource {
    /// Render as a CSS-style color string, deterministically
    pub fn display(&self) -> String {
        match self {
            ColorSource::Rgb([r, g, b]) => format!("rgb({}, {}, {})", r, g, b),
            ColorSource::Hsl { h, s, l } => format!("hsl({}, {}%, {}%)", h, s, l),
        }
    }

    /// RGB triple for raster rendering (HSL is converted)
    pub fn to_rgb(&self) -> [u8; 3] {
        match *self {
            ColorSource::Rgb(rgb) => rgb,
            ColorSource::Hsl { h, s, l } => hsl_to_rgb(h, s / 100.0, l / 100.0),
        }
    }
}

/// A fixed labeled point of interest on the unit square
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceAnnotation {
    pub name: String,
    pub color: ColorSource,
    /// Position in [0,1]², same domain as the sample data
    pub position: (f64, f64),
}

impl ReferenceAnnotation {
    /// CSS-style color string for this annotation
    pub fn display_color(&self) -> String {
        self.color.display()
    }
}

/// A single entry as it appears in annotations.json
#[derive(Debug, Clone, Deserialize)]
struct AnnotationDefinition {
    name: String,
    /// Hex RGB string, e.g. "#F2C230"
    color: Option<String>,
    /// HSL triple: [hue, saturation%, lightness%]
    hsl: Option<[f64; 3]>,
    position: [f64; 2],
}

/// The immutable, ordered annotation overlay
#[derive(Debug, Clone, Default)]
pub struct AnnotationRegistry {
    entries: Vec<ReferenceAnnotation>,
}

impl AnnotationRegistry {
    /// Load annotations from a JSON document
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definitions: Vec<AnnotationDefinition> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse annotations JSON: {}", e))?;

        let mut entries = Vec::with_capacity(definitions.len());
        for def in definitions {
            let color = match (&def.color, &def.hsl) {
                (Some(hex), None) => {
                    let rgb = parse_hex_color(hex)
                        .ok_or_else(|| format!("Invalid hex color '{}' for '{}'", hex, def.name))?;
                    ColorSource::Rgb(rgb)
                }
                (None, Some([h, s, l])) => ColorSource::Hsl {
                    h: *h,
                    s: *s,
                    l: *l,
                },
                (Some(_), Some(_)) => {
                    return Err(format!(
                        "Annotation '{}' has both rgb and hsl colors; exactly one is allowed",
                        def.name
                    ));
                }
                (None, None) => {
                    return Err(format!("Annotation '{}' has no color", def.name));
                }
            };

            entries.push(ReferenceAnnotation {
                name: def.name,
                color,
                position: (def.position[0], def.position[1]),
            });
        }

        Ok(AnnotationRegistry { entries })
    }

    /// All annotations, in catalog order
    pub fn annotations(&self) -> &[ReferenceAnnotation] {
        &self.entries
    }

    /// Look up an annotation by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&ReferenceAnnotation> {
        self.entries
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

/// All annotations from the embedded catalog, in order
pub fn annotations() -> &'static [ReferenceAnnotation] {
    ANNOTATION_REGISTRY.annotations()
}

/// Parse a hex color string to an RGB array
///
/// Supports `#RRGGBB` and `#RRGGBBAA` (alpha ignored), with or without `#`.
fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

/// Convert HSL (hue in degrees, s and l in [0,1]) to RGB
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    [
        ((r1 + m) * 255.0).round() as u8,
        ((g1 + m) * 255.0).round() as u8,
        ((b1 + m) * 255.0).round() as u8,
    ]
}
