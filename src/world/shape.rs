//! Shape records held by the collision world
//!
//! A shape is a rectangle or circle with a body kind and a small attribute
//! record. Rectangles are anchored at their top-left corner, circles at
//! their center.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::WorldError;

/// Opaque handle for a registered shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub u32);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Body kind tag (informational; does not change collision response)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// Floors, walls, buildings
    #[default]
    Static,
    /// The player
    Dynamic,
    /// Scripted movers (platforms, doors)
    Kinematic,
}

impl BodyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyKind::Static => "static",
            BodyKind::Dynamic => "dynamic",
            BodyKind::Kinematic => "kinematic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "static" => Some(BodyKind::Static),
            "dynamic" => Some(BodyKind::Dynamic),
            "kinematic" => Some(BodyKind::Kinematic),
            _ => None,
        }
    }
}

/// Floor category painted on the office map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloorType {
    /// Lawn
    Green,
    /// Road / corridor
    Gray,
    /// Building footprint
    Blue,
}

impl FloorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FloorType::Green => "green",
            FloorType::Gray => "gray",
            FloorType::Blue => "blue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "green" => Some(FloorType::Green),
            "gray" | "grey" => Some(FloorType::Gray),
            "blue" => Some(FloorType::Blue),
            _ => None,
        }
    }
}

/// Caller-supplied metadata attached to a shape
///
/// Only `floor_type` and `is_sensor` are read by the move policy. Anything
/// else travels in `extra` and is handed back untouched in query results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_type: Option<FloorType>,
    /// Sensors are reported in overlaps but never block a move
    #[serde(default)]
    pub is_sensor: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attributes {
    /// Solid shape with the given floor type
    pub fn floor(floor_type: FloorType) -> Self {
        Self {
            floor_type: Some(floor_type),
            ..Self::default()
        }
    }

    /// Mark as a sensor (trigger zone)
    pub fn sensor(mut self) -> Self {
        self.is_sensor = true;
        self
    }

    /// Attach an auxiliary value
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Look up an auxiliary string value
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

/// Collision geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Geometry {
    /// Axis-aligned box, `min` is the top-left corner
    Rectangle { min: Vec2, size: Vec2 },
    /// Circle around `center`
    Circle { center: Vec2, radius: f32 },
}

impl Geometry {
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Geometry::Rectangle {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Geometry::Circle {
            center: Vec2::new(x, y),
            radius,
        }
    }

    /// Reference position: top-left for rectangles, center for circles
    #[inline]
    pub fn position(&self) -> Vec2 {
        match self {
            Geometry::Rectangle { min, .. } => *min,
            Geometry::Circle { center, .. } => *center,
        }
    }

    /// Move the reference position, keeping extents
    pub fn set_position(&mut self, pos: Vec2) {
        match self {
            Geometry::Rectangle { min, .. } => *min = pos,
            Geometry::Circle { center, .. } => *center = pos,
        }
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        match self {
            Geometry::Rectangle { min, size } => (*min, *min + *size),
            Geometry::Circle { center, radius } => {
                (*center - Vec2::splat(*radius), *center + Vec2::splat(*radius))
            }
        }
    }

    /// Reject non-positive extents and non-finite coordinates
    pub fn validate(&self) -> Result<(), WorldError> {
        let invalid = |reason: String| -> Result<(), WorldError> {
            Err(WorldError::InvalidGeometry { reason })
        };
        match self {
            Geometry::Rectangle { min, size } => {
                if !min.is_finite() {
                    return invalid(format!("rectangle position {min} is not finite"));
                }
                if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
                    return invalid(format!("rectangle size {size} must be positive"));
                }
            }
            Geometry::Circle { center, radius } => {
                if !center.is_finite() {
                    return invalid(format!("circle center {center} is not finite"));
                }
                if !radius.is_finite() || *radius <= 0.0 {
                    return invalid(format!("circle radius {radius} must be positive"));
                }
            }
        }
        Ok(())
    }
}

/// A registered collision entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: BodyKind,
    pub geometry: Geometry,
    pub attributes: Attributes,
}

impl Shape {
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.geometry.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_degenerate_geometry() {
        assert!(Geometry::rect(0.0, 0.0, 32.0, 32.0).validate().is_ok());
        assert!(Geometry::rect(0.0, 0.0, 0.0, 32.0).validate().is_err());
        assert!(Geometry::rect(0.0, 0.0, 32.0, -1.0).validate().is_err());
        assert!(Geometry::circle(5.0, 5.0, 0.0).validate().is_err());
        assert!(Geometry::circle(f32::NAN, 5.0, 3.0).validate().is_err());
        assert!(Geometry::circle(5.0, 5.0, f32::INFINITY).validate().is_err());
    }

    #[test]
    fn test_set_position_keeps_extents() {
        let mut rect = Geometry::rect(0.0, 0.0, 10.0, 20.0);
        rect.set_position(Vec2::new(5.0, 6.0));
        assert_eq!(rect, Geometry::rect(5.0, 6.0, 10.0, 20.0));

        let mut circle = Geometry::circle(1.0, 1.0, 4.0);
        circle.set_position(Vec2::new(-3.0, 2.0));
        assert_eq!(circle, Geometry::circle(-3.0, 2.0, 4.0));
    }

    #[test]
    fn test_bounds() {
        let (min, max) = Geometry::circle(10.0, 10.0, 2.0).bounds();
        assert_eq!(min, Vec2::new(8.0, 8.0));
        assert_eq!(max, Vec2::new(12.0, 12.0));
    }

    #[test]
    fn test_attributes_json_uses_camel_case() {
        let attrs = Attributes::floor(FloorType::Gray)
            .sensor()
            .with_extra("buildingId", "hq");
        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json["floorType"], "gray");
        assert_eq!(json["isSensor"], true);
        assert_eq!(json["buildingId"], "hq");

        let back: Attributes =
            serde_json::from_str(r#"{"floorType":"blue","name":"Cafe"}"#).unwrap();
        assert_eq!(back.floor_type, Some(FloorType::Blue));
        assert!(!back.is_sensor);
        assert_eq!(back.extra_str("name"), Some("Cafe"));
    }

    #[test]
    fn test_kind_and_floor_parsing() {
        assert_eq!(BodyKind::from_str("Kinematic"), Some(BodyKind::Kinematic));
        assert_eq!(BodyKind::from_str("ghost"), None);
        assert_eq!(FloorType::from_str("grey"), Some(FloorType::Gray));
        assert_eq!(FloorType::Blue.as_str(), "blue");
    }
}
