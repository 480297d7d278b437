//! Declarative table of the icons to generate.
//!
//! A [`BadgeCatalog`] says *which* badges exist; expanding it yields one
//! [`BadgeSpec`] per output file. Catalogs round-trip through JSON so the
//! icon set can be edited without recompiling.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "lines": [
//!     { "label": "S", "radius": 136, "strokeWidth": 64, "fontSize": 130,
//!       "ringColor": [168, 189, 71], "padding": 13 }
//!   ],
//!   "stations": [
//!     { "prefix": "S", "first": 1, "last": 21, "radius": 136,
//!       "strokeWidth": 25, "fontSize": 100, "ringColor": "#a8bd47" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::badge::BadgeSpec;
use crate::color::Color;
use crate::error::{BadgeError, Result};

/// Highest station number that still fits the two-digit label.
pub const MAX_STATION_NUMBER: u32 = 99;

// ============================================================================
// Entries
// ============================================================================

/// A single-label line badge, written to `<label>.png`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LineBadge {
    pub label: String,
    pub radius: f32,
    pub stroke_width: f32,
    pub font_size: f32,
    pub ring_color: Color,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,

    #[serde(default)]
    pub padding: f32,
}

impl LineBadge {
    /// Builds the spec for this badge inside `out_dir`.
    pub fn to_spec(&self, out_dir: &Path) -> BadgeSpec {
        BadgeSpec::new(
            self.label.clone(),
            self.radius,
            self.stroke_width,
            self.font_size,
            self.ring_color,
            out_dir.join(format!("{}.png", self.label)),
        )
        .with_padding(self.padding)
        .with_text_color(self.text_color.unwrap_or(Color::BLACK))
    }
}

/// A numbered run of station badges sharing one line code.
///
/// Each number in `first..=last` becomes a two-label badge with the prefix
/// on top and the zero-padded number below, written to
/// `<lowercase prefix>-<NN>.png`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct StationSeries {
    pub prefix: String,
    pub first: u32,
    pub last: u32,
    pub radius: f32,
    pub stroke_width: f32,
    pub font_size: f32,
    pub ring_color: Color,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,

    /// Color of the number. Falls back to the text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_color: Option<Color>,

    #[serde(default)]
    pub padding: f32,
}

impl StationSeries {
    /// Checks that the range is non-empty and every number has two digits.
    pub fn validate(&self) -> Result<()> {
        if self.first == 0 || self.last > MAX_STATION_NUMBER {
            return Err(BadgeError::InvalidCatalog(format!(
                "station series {} must number within 1..={MAX_STATION_NUMBER}, got {}..={}",
                self.prefix, self.first, self.last
            )));
        }
        if self.first > self.last {
            return Err(BadgeError::InvalidCatalog(format!(
                "station series {} starts after it ends ({} > {})",
                self.prefix, self.first, self.last
            )));
        }
        Ok(())
    }

    /// Builds one spec per station number inside `out_dir`.
    pub fn to_specs(&self, out_dir: &Path) -> Result<Vec<BadgeSpec>> {
        self.validate()?;
        let stem = self.prefix.to_lowercase();
        let text_color = self.text_color.unwrap_or(Color::BLACK);

        Ok((self.first..=self.last)
            .map(|n| {
                let number = station_number(n);
                let mut spec = BadgeSpec::new(
                    self.prefix.clone(),
                    self.radius,
                    self.stroke_width,
                    self.font_size,
                    self.ring_color,
                    out_dir.join(format!("{stem}-{number}.png")),
                )
                .with_secondary(number)
                .with_padding(self.padding)
                .with_text_color(text_color);
                spec.number_color = self.number_color;
                spec
            })
            .collect())
    }
}

/// Formats a station number as its two-digit label (`5` → `"05"`).
pub fn station_number(n: u32) -> String {
    format!("{n:02}")
}

// ============================================================================
// BadgeCatalog
// ============================================================================

/// The full list of badges to generate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BadgeCatalog {
    #[serde(default)]
    pub lines: Vec<LineBadge>,

    #[serde(default)]
    pub stations: Vec<StationSeries>,
}

impl BadgeCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The Toei line and station icon set.
    pub fn builtin() -> Self {
        let line = |label: &str, font_size: f32, ring: (u8, u8, u8)| LineBadge {
            label: label.to_string(),
            radius: 136.0,
            stroke_width: 64.0,
            font_size,
            ring_color: ring.into(),
            text_color: None,
            padding: 13.0,
        };

        Self {
            lines: vec![
                line("S", 130.0, (168, 189, 71)), // Shinjuku
                line("SA", 80.0, (244, 71, 122)), // Sakura Tram
                line("A", 120.0, (255, 70, 54)), // Asakusa
                line("NT", 80.0, (209, 66, 161)), // Nippori-Toneri Liner
                line("E", 130.0, (220, 44, 101)), // Oedo
                line("I", 130.0, (4, 117, 193)), // Mita
            ],
            stations: vec![StationSeries {
                prefix: "S".into(),
                first: 1,
                last: 21,
                radius: 136.0,
                stroke_width: 25.0,
                font_size: 100.0,
                ring_color: Color::rgb(168, 189, 71),
                text_color: None,
                number_color: None,
                padding: 0.0,
            }],
        }
    }

    pub fn with_line(mut self, line: LineBadge) -> Self {
        self.lines.push(line);
        self
    }

    pub fn with_stations(mut self, series: StationSeries) -> Self {
        self.stations.push(series);
        self
    }

    /// Number of badges [`expand`](Self::expand) would produce.
    pub fn len(&self) -> usize {
        let stations: usize = self
            .stations
            .iter()
            .map(|s| (s.first..=s.last).count())
            .sum();
        self.lines.len() + stations
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expands every entry into specs writing under `out_dir`, lines first.
    ///
    /// Fails on the first invalid station series, or if two entries would
    /// write the same file.
    pub fn expand(&self, out_dir: &Path) -> Result<Vec<BadgeSpec>> {
        let mut specs: Vec<BadgeSpec> = self.lines.iter().map(|l| l.to_spec(out_dir)).collect();
        for series in &self.stations {
            specs.extend(series.to_specs(out_dir)?);
        }

        let mut seen = std::collections::HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.output_path.as_path()) {
                return Err(BadgeError::InvalidCatalog(format!(
                    "more than one badge writes {}",
                    spec.output_path.display()
                )));
            }
        }
        Ok(specs)
    }

    /// Deserializes a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| BadgeError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Serializes the catalog to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// JSON Schema describing the catalog format.
    #[cfg(feature = "jsonschema")]
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(BadgeCatalog);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn builtin_covers_toei_icon_set() {
        let catalog = BadgeCatalog::builtin();
        assert_eq!(catalog.lines.len(), 6);
        assert_eq!(catalog.len(), 6 + 21);

        let specs = catalog.expand(Path::new("out")).unwrap();
        assert_eq!(specs.len(), 27);
        assert_eq!(specs[0].output_path, PathBuf::from("out/S.png"));
        assert_eq!(specs[0].padding, 13.0);
        assert_eq!(specs[1].font_size, 80.0);
        assert_eq!(specs[1].ring_color, Color::rgb(244, 71, 122));
    }

    #[test]
    fn station_series_names_and_labels_match() {
        let specs = BadgeCatalog::builtin().stations[0]
            .to_specs(Path::new("icons"))
            .unwrap();

        assert_eq!(specs.len(), 21);
        let names: std::collections::BTreeSet<_> = specs
            .iter()
            .map(|s| s.output_path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 21);
        assert!(names.contains("s-01.png"));
        assert!(names.contains("s-21.png"));

        for spec in &specs {
            let number = spec.secondary_text.as_deref().unwrap();
            assert_eq!(number.len(), 2);
            let file = spec.output_path.file_name().unwrap().to_string_lossy();
            assert_eq!(file, format!("s-{number}.png"));
            assert_eq!(spec.primary_text, "S");
            assert_eq!(spec.stroke_width, 25.0);
            assert_eq!(spec.padding, 0.0);
        }
    }

    #[test]
    fn station_numbers_are_two_digits() {
        assert_eq!(station_number(1), "01");
        assert_eq!(station_number(9), "09");
        assert_eq!(station_number(10), "10");
        assert_eq!(station_number(21), "21");
    }

    #[test]
    fn rejects_bad_station_ranges() {
        let mut series = BadgeCatalog::builtin().stations[0].clone();
        series.first = 0;
        assert!(matches!(series.validate(), Err(BadgeError::InvalidCatalog(_))));

        series.first = 5;
        series.last = 4;
        assert!(matches!(series.validate(), Err(BadgeError::InvalidCatalog(_))));

        series.last = 100;
        assert!(matches!(series.validate(), Err(BadgeError::InvalidCatalog(_))));
    }

    #[test]
    fn rejects_duplicate_outputs() {
        let catalog = BadgeCatalog::builtin();
        let dup = catalog.lines[0].clone();
        let err = catalog.with_line(dup).expand(Path::new(".")).unwrap_err();
        assert!(matches!(err, BadgeError::InvalidCatalog(_)));
    }

    #[test]
    fn number_color_carries_into_specs() {
        let mut series = BadgeCatalog::builtin().stations[0].clone();
        series.number_color = Some(Color::rgb(1, 2, 3));
        let specs = series.to_specs(Path::new(".")).unwrap();
        assert_eq!(specs[0].number_color(), Color::rgb(1, 2, 3));
        assert_eq!(specs[0].text_color, Color::BLACK);
    }

    #[test]
    fn catalog_json_roundtrip() {
        let catalog = BadgeCatalog::builtin();
        let json = catalog.to_json_pretty().unwrap();

        assert!(json.contains("\"strokeWidth\""));
        assert!(json.contains("\"ringColor\""));
        assert_eq!(BadgeCatalog::from_json(&json).unwrap(), catalog);
    }

    #[test]
    fn json_accepts_color_strings_and_defaults() {
        let catalog = BadgeCatalog::from_json(
            r##"{
                "stations": [{
                    "prefix": "E", "first": 1, "last": 3,
                    "radius": 100, "strokeWidth": 20, "fontSize": 80,
                    "ringColor": "#dc2c65", "numberColor": "red"
                }]
            }"##,
        )
        .unwrap();

        assert!(catalog.lines.is_empty());
        let series = &catalog.stations[0];
        assert_eq!(series.ring_color, Color::rgb(220, 44, 101));
        assert_eq!(series.number_color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(series.padding, 0.0);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn empty_catalog_deserializes() {
        let catalog = BadgeCatalog::from_json("{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn missing_catalog_file_is_io_error() {
        let err = BadgeCatalog::from_path("/no/such/catalog.json").unwrap_err();
        assert!(matches!(err, BadgeError::Io { .. }));
    }
}
