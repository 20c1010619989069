//! Office layout loading
//!
//! A scene is the map the tour walks around: buildings (solid, blue),
//! roads (gray sensors) and lawns (solid, green). Layouts are plain JSON so
//! the portal backend can serve them next to the rest of the game data.

use std::collections::{BTreeMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::world::{Attributes, BodyKind, FloorType, Geometry, MoveValidator, ShapeId};

/// Attribute key holding the building id on building shapes
pub const BUILDING_ID_KEY: &str = "buildingId";
/// Attribute key holding the display name on building shapes
pub const BUILDING_NAME_KEY: &str = "name";

/// Axis-aligned map area, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Area {
    pub fn geometry(&self) -> Geometry {
        Geometry::rect(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A discoverable building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub area: Area,
    /// Fill color for the renderer (0xRRGGBB)
    #[serde(default)]
    pub color: u32,
}

/// Office map description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLayout {
    pub width: f32,
    pub height: f32,
    pub player_start: Vec2,
    #[serde(default)]
    pub buildings: Vec<Building>,
    #[serde(default)]
    pub roads: Vec<Area>,
    #[serde(default)]
    pub lawns: Vec<Area>,
}

/// Shape ids produced by [`SceneLayout::populate`]
#[derive(Debug, Clone, Default)]
pub struct SceneIndex {
    /// Building shape -> building id
    pub buildings: BTreeMap<ShapeId, String>,
    pub roads: Vec<ShapeId>,
    pub lawns: Vec<ShapeId>,
}

impl SceneIndex {
    pub fn building_for(&self, shape: ShapeId) -> Option<&str> {
        self.buildings.get(&shape).map(String::as_str)
    }

    pub fn shape_of(&self, building_id: &str) -> Option<ShapeId> {
        self.buildings
            .iter()
            .find(|(_, id)| id.as_str() == building_id)
            .map(|(shape, _)| *shape)
    }

    /// Total number of registered shapes
    pub fn len(&self) -> usize {
        self.buildings.len() + self.roads.len() + self.lawns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SceneLayout {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Map extents as (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(SceneError::InvalidLayout(format!(
                "map size {}x{} must be positive",
                self.width, self.height
            )));
        }

        let mut seen = HashSet::new();
        for building in &self.buildings {
            if !seen.insert(building.id.as_str()) {
                return Err(SceneError::InvalidLayout(format!(
                    "duplicate building id '{}'",
                    building.id
                )));
            }
        }

        // Check every area up front so a bad entry never leaves a half-built scene
        let areas = self
            .buildings
            .iter()
            .map(|b| &b.area)
            .chain(&self.roads)
            .chain(&self.lawns);
        for area in areas {
            area.geometry().validate()?;
        }

        Ok(())
    }

    /// Register every layout item with the validator
    pub fn populate(&self, validator: &mut MoveValidator) -> Result<SceneIndex, SceneError> {
        self.validate()?;

        let mut index = SceneIndex::default();

        for road in &self.roads {
            let id = validator.register(
                road.geometry(),
                BodyKind::Static,
                Attributes::floor(FloorType::Gray).sensor(),
            )?;
            index.roads.push(id);
        }

        for lawn in &self.lawns {
            let id = validator.register(
                lawn.geometry(),
                BodyKind::Static,
                Attributes::floor(FloorType::Green),
            )?;
            index.lawns.push(id);
        }

        for building in &self.buildings {
            let attributes = Attributes::floor(FloorType::Blue)
                .with_extra(BUILDING_ID_KEY, building.id.clone())
                .with_extra(BUILDING_NAME_KEY, building.name.clone());
            let id = validator.register(building.area.geometry(), BodyKind::Static, attributes)?;
            index.buildings.insert(id, building.id.clone());
        }

        log::info!(
            "Scene loaded: {} buildings, {} roads, {} lawns",
            index.buildings.len(),
            index.roads.len(),
            index.lawns.len()
        );

        Ok(index)
    }
}
