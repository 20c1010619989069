//! Shape registry and move queries
//!
//! The validator owns every registered shape and answers one question per
//! tick: may the actor stand here, and what does it touch?

use glam::Vec2;
use serde::Serialize;

use super::collision::actor_overlaps;
use super::policy::MovePolicy;
use super::shape::{Attributes, BodyKind, Geometry, Shape, ShapeId};
use crate::error::WorldError;

/// Result of [`MoveValidator::query_move`]
#[derive(Debug, Clone, Serialize)]
pub struct MoveQuery<'a> {
    /// False if any overlapping shape is blocked by the policy
    pub allowed: bool,
    /// Every intersecting shape, in registration order, whatever the verdict
    pub overlaps: Vec<&'a Shape>,
}

impl<'a> MoveQuery<'a> {
    /// Ids of the overlapping shapes
    pub fn overlap_ids(&self) -> Vec<ShapeId> {
        self.overlaps.iter().map(|s| s.id).collect()
    }

    /// Overlapping shapes that caused the rejection
    pub fn blockers(&self, policy: &MovePolicy) -> Vec<&'a Shape> {
        self.overlaps
            .iter()
            .copied()
            .filter(|s| policy.blocks(&s.attributes))
            .collect()
    }
}

/// Registry of collision shapes plus the blocking policy
#[derive(Debug, Clone)]
pub struct MoveValidator {
    /// Registered shapes in insertion order
    shapes: Vec<Shape>,
    policy: MovePolicy,
    /// Next shape id (never reused)
    next_id: u32,
}

impl Default for MoveValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveValidator {
    pub fn new() -> Self {
        Self::with_policy(MovePolicy::default())
    }

    pub fn with_policy(policy: MovePolicy) -> Self {
        Self {
            shapes: Vec::new(),
            policy,
            next_id: 1,
        }
    }

    pub fn policy(&self) -> &MovePolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: MovePolicy) {
        self.policy = policy;
    }

    /// Hand out the next id; the counter never wraps, so ids are never reused
    fn next_shape_id(&mut self) -> Result<ShapeId, WorldError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(WorldError::IdsExhausted)?;
        Ok(ShapeId(id))
    }

    fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    /// Register a shape; it is visible to the very next query
    pub fn register(
        &mut self,
        geometry: Geometry,
        kind: BodyKind,
        attributes: Attributes,
    ) -> Result<ShapeId, WorldError> {
        geometry.validate()?;
        let id = self.next_shape_id()?;
        log::trace!("Registered {} {:?} as {}", kind.as_str(), geometry, id);
        self.shapes.push(Shape {
            id,
            kind,
            geometry,
            attributes,
        });
        Ok(id)
    }

    /// Move a shape's reference point (top-left for rectangles, center for circles)
    pub fn reposition(&mut self, id: ShapeId, pos: Vec2) -> Result<(), WorldError> {
        let index = self.index_of(id).ok_or(WorldError::NotFound(id))?;
        if !pos.is_finite() {
            return Err(WorldError::InvalidGeometry {
                reason: format!("position {pos} for {id} is not finite"),
            });
        }
        self.shapes[index].geometry.set_position(pos);
        log::debug!("Moved {} to {}", id, pos);
        Ok(())
    }

    /// Remove a shape, returning its record
    pub fn remove(&mut self, id: ShapeId) -> Result<Shape, WorldError> {
        let index = self.index_of(id).ok_or(WorldError::NotFound(id))?;
        log::debug!("Removed {}", id);
        Ok(self.shapes.remove(index))
    }

    /// Drop every shape. Ids keep counting up.
    pub fn clear(&mut self) {
        log::debug!("Cleared {} shapes", self.shapes.len());
        self.shapes.clear();
    }

    /// Test an actor circle at `center` against every shape except `exclude`
    pub fn query_move(&self, center: Vec2, radius: f32, exclude: Option<ShapeId>) -> MoveQuery<'_> {
        debug_assert!(radius > 0.0, "actor radius must be positive, got {radius}");

        let mut allowed = true;
        let mut overlaps = Vec::new();
        for shape in &self.shapes {
            if Some(shape.id) == exclude || !actor_overlaps(&shape.geometry, center, radius) {
                continue;
            }
            if self.policy.blocks(&shape.attributes) {
                allowed = false;
            }
            overlaps.push(shape);
        }

        log::trace!(
            "Query at {} r={}: allowed={} overlaps={}",
            center,
            radius,
            allowed,
            overlaps.len()
        );

        MoveQuery { allowed, overlaps }
    }

    /// Current reference position of a shape
    pub fn position(&self, id: ShapeId) -> Option<Vec2> {
        self.get(id).map(Shape::position)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Shapes in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
