//! Freehand strokes and the session stroke log
//!
//! All coordinates are canvas-local logical pixels, which for this crate are
//! the pixels of the base image.

use serde::{Deserialize, Serialize};

use super::tool::ToolKind;
use crate::error::StrokeLogError;

/// A single sampled pointer position
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// One continuous freehand path, tagged with the tool active when it started
///
/// The tool is fixed for the lifetime of the stroke. Points can only be
/// appended, and once a stroke sits in a [`StrokeLog`] only the most recent
/// one can still grow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    tool: ToolKind,
    #[serde(with = "flat_points")]
    points: Vec<Point>,
}

impl Stroke {
    /// Create an empty stroke for `tool`
    pub fn new(tool: ToolKind) -> Self {
        Self {
            tool,
            points: Vec::new(),
        }
    }

    /// Create a stroke seeded with its first point
    pub fn starting_at(tool: ToolKind, start: Point) -> Self {
        Self {
            tool,
            points: vec![start],
        }
    }

    /// Create a stroke from already captured points
    pub fn with_points(tool: ToolKind, points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            tool,
            points: points.into_iter().collect(),
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Append a sampled position
    pub fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// A stroke with fewer than two points renders as a dot
    pub fn is_dot(&self) -> bool {
        self.points.len() < 2
    }

    /// Points as the flat `[x0, y0, x1, y1, ...]` list used when saving
    pub fn flat_points(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }
}

/// Ordered, undo-only history of strokes
///
/// Insertion order is paint order: later strokes are drawn over earlier ones.
/// This is a stack. Strokes can only be removed from the end, and only the
/// last stroke can receive new points.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeLog {
    strokes: Vec<Stroke>,
}

impl StrokeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stroke on top of the existing ones
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Append a point to the most recent stroke
    ///
    /// Returns false (and does nothing) when the log is empty.
    pub fn extend_last(&mut self, point: Point) -> bool {
        match self.strokes.last_mut() {
            Some(stroke) => {
                stroke.push_point(point);
                true
            }
            None => false,
        }
    }

    /// Remove the most recent stroke, if any
    pub fn pop(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    /// Serialize to the JSON array shape shared with the host application
    pub fn to_json(&self) -> Result<String, StrokeLogError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a previously saved stroke log
    pub fn from_json(json: &str) -> Result<Self, StrokeLogError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FromIterator<Stroke> for StrokeLog {
    fn from_iter<I: IntoIterator<Item = Stroke>>(iter: I) -> Self {
        Self {
            strokes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StrokeLog {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}

/// (De)serialize points as a flat `[x0, y0, x1, y1, ...]` number list
mod flat_points {
    use serde::de::Error as _;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Point;

    pub fn serialize<S: Serializer>(points: &[Point], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(points.len() * 2))?;
        for point in points {
            seq.serialize_element(&point.x)?;
            seq.serialize_element(&point.y)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
        let flat = Vec::<f32>::deserialize(deserializer)?;
        if flat.len() % 2 != 0 {
            return Err(D::Error::custom(format!(
                "expected an even number of coordinates, got {}",
                flat.len()
            )));
        }
        Ok(flat
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen_stroke(points: &[(f32, f32)]) -> Stroke {
        Stroke::with_points(ToolKind::Pen, points.iter().copied().map(Point::from))
    }

    #[test]
    fn test_new_stroke_is_empty() {
        let mut stroke = Stroke::new(ToolKind::Highlighter);
        assert_eq!(stroke.tool(), ToolKind::Highlighter);
        assert!(stroke.points().is_empty());
        assert!(stroke.is_dot());
        assert!(stroke.flat_points().is_empty());

        stroke.push_point(Point::new(3.0, 4.0));
        assert_eq!(stroke.flat_points(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_extend_last_only_touches_newest_stroke() {
        let mut log = StrokeLog::new();
        log.push(pen_stroke(&[(0.0, 0.0)]));
        log.push(Stroke::starting_at(ToolKind::Eraser, Point::new(5.0, 5.0)));

        assert!(log.extend_last(Point::new(6.0, 6.0)));

        assert_eq!(log.strokes()[0].points().len(), 1);
        assert_eq!(
            log.strokes()[1].points(),
            &[Point::new(5.0, 5.0), Point::new(6.0, 6.0)]
        );
    }

    #[test]
    fn test_extend_last_on_empty_log_is_noop() {
        let mut log = StrokeLog::new();
        assert!(!log.extend_last(Point::new(1.0, 1.0)));
        assert!(log.is_empty());
    }

    #[test]
    fn test_pop_past_empty_is_noop() {
        let mut log: StrokeLog = [pen_stroke(&[(1.0, 1.0)]), pen_stroke(&[(2.0, 2.0)])]
            .into_iter()
            .collect();

        assert_eq!(log.pop().unwrap().points()[0], Point::new(2.0, 2.0));
        assert!(log.pop().is_some());
        assert!(log.pop().is_none());
        assert!(log.pop().is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn test_json_shape_is_flat() {
        let log: StrokeLog = [pen_stroke(&[(10.0, 10.0), (10.0, 50.0)])]
            .into_iter()
            .collect();
        let value: serde_json::Value = serde_json::from_str(&log.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "tool": "pen", "points": [10.0, 10.0, 10.0, 50.0] }])
        );
    }

    #[test]
    fn test_from_json_accepts_legacy_tool_names() {
        let log = StrokeLog::from_json(
            r#"[{"tool":"gomme","points":[1,2,3,4]},{"tool":"surligneur","points":[5,6]}]"#,
        )
        .unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.strokes()[0].tool(), ToolKind::Eraser);
        assert_eq!(log.strokes()[0].flat_points(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(log.strokes()[1].tool(), ToolKind::Highlighter);
        assert!(log.strokes()[1].is_dot());
    }

    #[test]
    fn test_from_json_rejects_odd_coordinates() {
        let err = StrokeLog::from_json(r#"[{"tool":"pen","points":[1,2,3]}]"#).unwrap_err();
        assert!(matches!(err, StrokeLogError::Json(_)));
    }

    #[test]
    fn test_from_json_rejects_unknown_tool() {
        assert!(StrokeLog::from_json(r#"[{"tool":"brush","points":[]}]"#).is_err());
    }
}
