//! Conversions between JavaScript arguments and core types.

use framecrop_core::{AspectMode, InputOutcome, Point};
use wasm_bindgen::prelude::*;

/// Parse the host's aspect mode name.
pub(crate) fn parse_aspect(name: &str) -> Result<AspectMode, String> {
    AspectMode::parse(name).ok_or_else(|| {
        format!(
            "Invalid aspect mode: {} (expected \"square\" or \"widescreen\")",
            name
        )
    })
}

/// Touch points arrive flattened as `[x0, y0, x1, y1, ...]`.
/// A trailing odd coordinate is ignored.
pub(crate) fn points_from_flat(coords: &[f64]) -> Vec<Point> {
    coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

/// Name returned to JavaScript for an input outcome.
pub(crate) fn outcome_name(outcome: InputOutcome) -> &'static str {
    match outcome {
        InputOutcome::Updated => "updated",
        InputOutcome::Unchanged => "unchanged",
        InputOutcome::NotReady => "not-ready",
    }
}

/// Convert any displayable error into a JavaScript error value.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aspect() {
        assert_eq!(parse_aspect("square"), Ok(AspectMode::Square));
        assert_eq!(parse_aspect("16:9"), Ok(AspectMode::Widescreen));
        assert!(parse_aspect("portrait").unwrap_err().contains("portrait"));
    }

    #[test]
    fn test_points_from_flat() {
        let points = points_from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        assert!(points_from_flat(&[]).is_empty());
    }

    #[test]
    fn test_outcome_names() {
        assert_eq!(outcome_name(InputOutcome::Updated), "updated");
        assert_eq!(outcome_name(InputOutcome::NotReady), "not-ready");
    }
}
