//! Conversion between the voxel store and the host-facing JSON contract.
//!
//! The contract is a flat array of objects:
//!
//! ```json
//! [{ "x": 0, "y": 1, "z": 2, "color": "#FF5500" }]
//! ```
//!
//! Export always writes `color` as `#RRGGBB`. Import is tolerant: colors may
//! be hex strings (with or without `#`) or packed integers, and may appear
//! under the short key `c`. Anything that cannot be read degrades per entry
//! (gray color, zero coordinate); only a payload that is not an array at all
//! is rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::VoxelError;
use crate::voxel::{
    color_to_hex, parse_hex_color, round_axis, Voxel, VoxelStore, DEFAULT_COLOR,
};

/// One voxel as exchanged with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalVoxel {
    /// Grid x coordinate.
    pub x: i32,
    /// Grid y coordinate.
    pub y: i32,
    /// Grid z coordinate.
    pub z: i32,
    /// Color as `#RRGGBB`.
    pub color: String,
}

/// Result of a tolerant import.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Parsed voxels, in payload order (not yet deduplicated).
    pub voxels: Vec<Voxel>,
    /// Entries whose color fell back to [`DEFAULT_COLOR`].
    pub defaulted_colors: usize,
    /// Entries with at least one coordinate that fell back to 0 or
    /// saturated at the `i32` range.
    pub defaulted_coordinates: usize,
}

impl ImportReport {
    /// Whether any entry needed a fallback value.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.defaulted_colors > 0 || self.defaulted_coordinates > 0
    }
}

/// Project the store into the external format, sorted by `(y, z, x)` so
/// exports are stable across runs.
#[must_use]
pub fn to_external(store: &VoxelStore) -> Vec<ExternalVoxel> {
    let mut voxels = store.snapshot();
    voxels.sort_unstable_by_key(|v| (v.y, v.z, v.x));
    voxels
        .into_iter()
        .map(|v| ExternalVoxel {
            x: v.x,
            y: v.y,
            z: v.z,
            color: color_to_hex(v.color),
        })
        .collect()
}

/// Serialize the store as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`VoxelError::Export`] if serialization fails.
pub fn to_json(store: &VoxelStore) -> Result<String, VoxelError> {
    serde_json::to_string_pretty(&to_external(store)).map_err(VoxelError::Export)
}

/// Distinct colors in use as `#RRGGBB`, sorted ascending.
#[must_use]
pub fn unique_colors(store: &VoxelStore) -> Vec<String> {
    let mut colors: Vec<u32> = store.distinct_colors().into_iter().collect();
    colors.sort_unstable();
    colors.into_iter().map(color_to_hex).collect()
}

/// Parse a JSON document into voxels.
///
/// # Errors
///
/// Returns [`VoxelError::Import`] if the text is not valid JSON or the top
/// level is not an array. Individual malformed entries never fail.
pub fn parse_json(text: &str) -> Result<ImportReport, VoxelError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| VoxelError::Import(e.to_string()))?;
    from_external(&value)
}

/// Convert an already-parsed JSON value into voxels.
///
/// # Errors
///
/// Returns [`VoxelError::Import`] if `value` is not an array.
pub fn from_external(value: &Value) -> Result<ImportReport, VoxelError> {
    let Value::Array(entries) = value else {
        return Err(VoxelError::Import("JSON must be an array".to_owned()));
    };

    let mut report = ImportReport {
        voxels: Vec::with_capacity(entries.len()),
        ..ImportReport::default()
    };
    let mut degraded = 0usize;
    for entry in entries {
        let (voxel, color_ok, coords_ok) = parse_entry(entry);
        if !(color_ok && coords_ok) {
            degraded += 1;
        }
        if !color_ok {
            report.defaulted_colors += 1;
        }
        if !coords_ok {
            report.defaulted_coordinates += 1;
        }
        report.voxels.push(voxel);
    }

    if report.is_degraded() {
        log::warn!(
            "voxel import: {degraded} of {} entries degraded ({} colors, {} coordinates defaulted)",
            entries.len(),
            report.defaulted_colors,
            report.defaulted_coordinates
        );
    }
    Ok(report)
}

/// Returns the voxel plus whether its color and coordinates were read
/// without fallback.
fn parse_entry(entry: &Value) -> (Voxel, bool, bool) {
    let field = |name: &str| entry.get(name);

    let (x, x_ok) = parse_coordinate(field("x"));
    let (y, y_ok) = parse_coordinate(field("y"));
    let (z, z_ok) = parse_coordinate(field("z"));
    let color = field("c")
        .and_then(parse_color)
        .or_else(|| field("color").and_then(parse_color));

    let voxel = Voxel::new(x, y, z, color.unwrap_or(DEFAULT_COLOR));
    (voxel, color.is_some(), x_ok && y_ok && z_ok)
}

fn parse_coordinate(value: Option<&Value>) -> (i32, bool) {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    match number.filter(|n| n.is_finite()) {
        Some(n) => {
            let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&n.round());
            (round_axis(n), in_range)
        }
        None => (0, false),
    }
}

/// Interpret a color value; `None` means the caller should use gray.
fn parse_color(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => parse_hex_color(s),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .filter(|&c| c <= 0x00FF_FFFF)
            .map(|c| c as u32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn import(value: &Value) -> Vec<Voxel> {
        from_external(value).unwrap().voxels
    }

    #[test]
    fn malformed_color_defaults_to_gray() {
        let voxels = import(&json!([{ "x": "3", "y": 1, "z": 2, "color": "zz" }]));
        assert_eq!(voxels, vec![Voxel::new(3, 1, 2, DEFAULT_COLOR)]);
    }

    #[test]
    fn accepts_hex_with_and_without_hash_and_numbers() {
        let voxels = import(&json!([
            { "x": 0, "y": 0, "z": 0, "color": "#FF0000" },
            { "x": 1, "y": 0, "z": 0, "color": "00ff00" },
            { "x": 2, "y": 0, "z": 0, "color": 255 },
        ]));
        let colors: Vec<u32> = voxels.iter().map(|v| v.color).collect();
        assert_eq!(colors, vec![0xFF0000, 0x00FF00, 0x0000FF]);
    }

    #[test]
    fn short_color_key_is_accepted() {
        let voxels = import(&json!([{ "x": 1, "y": 2, "z": 3, "c": "#123456" }]));
        assert_eq!(voxels[0].color, 0x123456);
    }

    #[test]
    fn short_color_key_wins_and_falls_back_when_unusable() {
        let voxels = import(&json!([
            { "x": 0, "y": 0, "z": 0, "color": "zz", "c": "#FF0000" },
            { "x": 1, "y": 0, "z": 0, "color": "#00FF00", "c": "zz" },
            { "x": 2, "y": 0, "z": 0, "color": "#00FF00", "c": "#0000FF" },
            { "x": 3, "y": 0, "z": 0, "color": "#00FF00", "c": null },
        ]));
        let colors: Vec<u32> = voxels.iter().map(|v| v.color).collect();
        assert_eq!(colors, vec![0xFF0000, 0x00FF00, 0x0000FF, 0x00FF00]);
    }

    #[test]
    fn far_coordinates_stay_distinct() {
        let report = from_external(&json!([
            { "x": 5_000_000, "y": 0, "z": 0, "color": "#FF0000" },
            { "x": 6_000_000, "y": 0, "z": 0, "color": "#00FF00" },
        ]))
        .unwrap();
        assert!(!report.is_degraded());
        let mut store = VoxelStore::new();
        assert_eq!(store.replace_all(&report.voxels), 2);
        assert_eq!(store.get(5_000_000, 0, 0), Some(0xFF0000));
    }

    #[test]
    fn coordinates_beyond_i32_are_reported() {
        let report =
            from_external(&json!([{ "x": 1e12, "y": 0, "z": 0, "color": "#FF0000" }]))
                .unwrap();
        assert_eq!(report.voxels[0].x, i32::MAX);
        assert_eq!(report.defaulted_coordinates, 1);
    }

    #[test]
    fn missing_or_garbage_coordinates_default_to_zero() {
        let report =
            from_external(&json!([{ "y": "abc", "z": null, "color": "#010101" }]))
                .unwrap();
        assert_eq!(report.voxels, vec![Voxel::new(0, 0, 0, 0x010101)]);
        assert_eq!(report.defaulted_coordinates, 1);
        assert_eq!(report.defaulted_colors, 0);
    }

    #[test]
    fn fractional_coordinates_are_rounded() {
        let voxels = import(&json!([{ "x": 1.6, "y": -0.4, "z": "2.5", "color": 1 }]));
        assert_eq!((voxels[0].x, voxels[0].y, voxels[0].z), (2, 0, 3));
    }

    #[test]
    fn out_of_range_numeric_colors_default() {
        let voxels = import(&json!([
            { "x": 0, "y": 0, "z": 0, "color": -5 },
            { "x": 1, "y": 0, "z": 0, "color": 16_777_216 },
            { "x": 2, "y": 0, "z": 0, "color": 1.5 },
        ]));
        assert!(voxels.iter().all(|v| v.color == DEFAULT_COLOR));
    }

    #[test]
    fn non_object_entries_degrade_instead_of_failing() {
        let report = from_external(&json!([42, "x", { "x": 1, "y": 1, "z": 1, "color": "#fff" }]))
            .unwrap();
        assert_eq!(report.voxels.len(), 3);
        assert_eq!(report.voxels[0], Voxel::new(0, 0, 0, DEFAULT_COLOR));
        assert_eq!(report.voxels[2].color, 0xFFF);
    }

    #[test]
    fn non_array_payload_is_rejected() {
        assert!(matches!(
            from_external(&json!({ "x": 1 })),
            Err(VoxelError::Import(_))
        ));
        assert!(matches!(parse_json("not json"), Err(VoxelError::Import(_))));
    }

    #[test]
    fn export_then_import_reproduces_the_store() {
        let mut store = VoxelStore::new();
        let _ = store.replace_all(&[
            Voxel::from_f64(0.4, 0.0, 0.0, 0xFF0000),
            Voxel::new(0, 0, 0, 0x00FF00),
            Voxel::new(-3, 7, 2, 0x0000FF),
        ]);
        let json = to_json(&store).unwrap();
        assert!(json.contains("\"#00FF00\""));

        let mut reloaded = VoxelStore::new();
        let _ = reloaded.replace_all(&parse_json(&json).unwrap().voxels);
        let mut a = store.snapshot();
        let mut b = reloaded.snapshot();
        a.sort_unstable_by_key(|v| v.key());
        b.sort_unstable_by_key(|v| v.key());
        assert_eq!(a, b);
    }

    #[test]
    fn unique_colors_are_sorted_hex() {
        let mut store = VoxelStore::new();
        let _ = store.replace_all(&[
            Voxel::new(0, 0, 0, 0xFF0000),
            Voxel::new(1, 0, 0, 0x0000FF),
            Voxel::new(2, 0, 0, 0xFF0000),
        ]);
        assert_eq!(unique_colors(&store), vec!["#0000FF", "#FF0000"]);
    }
}
