//! Fixed timestep tour driver
//!
//! Moves the avatar one step at a time: propose a position, ask the
//! validator, commit or discard, then mark any touched building as
//! discovered. Discovery happens on rejected moves too, which is how
//! walking into a building's wall reveals its name.

use std::collections::BTreeSet;

use glam::Vec2;

use crate::error::{SceneError, WorldError};
use crate::grid_position;
use crate::scene::{BUILDING_ID_KEY, BUILDING_NAME_KEY, SceneIndex, SceneLayout};
use crate::settings::Settings;
use crate::world::{Attributes, BodyKind, Geometry, MoveValidator, ShapeId};

/// Input commands for a single step
#[derive(Debug, Clone, Copy, Default)]
pub struct TourInput {
    /// Walking direction (normalized internally, zero = stand still)
    pub direction: Vec2,
}

/// What happened during a step
#[derive(Debug, Clone, PartialEq)]
pub enum TourEvent {
    /// Move accepted
    Moved { from: Vec2, to: Vec2 },
    /// Move rejected; the avatar stays where it was
    Blocked { at: Vec2, by: Vec<ShapeId> },
    /// First contact with a building
    Discovered { building_id: String, name: String },
}

/// The avatar walking around a populated validator
#[derive(Debug, Clone)]
pub struct Tour {
    validator: MoveValidator,
    settings: Settings,
    /// Avatar collider (excluded from its own queries)
    actor: ShapeId,
    /// Authoritative avatar position (circle center)
    position: Vec2,
    /// Map extents the avatar is clamped to
    bounds: Option<(Vec2, Vec2)>,
    discovered: BTreeSet<String>,
}

impl Tour {
    /// Register the avatar at `start` and take ownership of the validator
    ///
    /// The validator keeps its own policy; `settings.policy` is only applied
    /// by [`Tour::from_scene`], which builds the validator itself.
    pub fn new(
        mut validator: MoveValidator,
        start: Vec2,
        settings: Settings,
    ) -> Result<Self, WorldError> {
        let actor = register_actor(&mut validator, start, settings.actor_radius)?;
        log::info!("Tour started at {} (actor {})", start, actor);

        Ok(Self {
            validator,
            settings,
            actor,
            position: start,
            bounds: None,
            discovered: BTreeSet::new(),
        })
    }

    /// Build a validator from `layout` and start the tour at its player start
    pub fn from_scene(
        layout: &SceneLayout,
        settings: Settings,
    ) -> Result<(Self, SceneIndex), SceneError> {
        let mut validator = MoveValidator::with_policy(settings.policy.clone());
        let index = layout.populate(&mut validator)?;
        let (min, max) = layout.bounds();
        let tour = Self::new(validator, layout.player_start, settings)?.with_bounds(min, max);
        Ok((tour, index))
    }

    /// Keep the avatar inside `min..max`
    pub fn with_bounds(mut self, min: Vec2, max: Vec2) -> Self {
        self.bounds = Some((min, max));
        self
    }

    /// Advance by one fixed step
    pub fn step(&mut self, input: &TourInput, dt: f32) -> Vec<TourEvent> {
        let dir = input.direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            return Vec::new();
        }
        let target = self.position + dir * self.settings.move_speed * dt;
        self.try_move_to(target)
    }

    /// Try to place the avatar at `target`
    pub fn try_move_to(&mut self, target: Vec2) -> Vec<TourEvent> {
        if !target.is_finite() {
            log::warn!("Ignoring non-finite move target {}", target);
            return Vec::new();
        }
        let target = self.clamp_to_bounds(target);
        let radius = self.settings.actor_radius;
        let mut events = Vec::new();

        let query = self.validator.query_move(target, radius, Some(self.actor));
        let allowed = query.allowed;
        let blockers: Vec<ShapeId> = query
            .blockers(self.validator.policy())
            .iter()
            .map(|s| s.id)
            .collect();

        let mut found = Vec::new();
        for shape in &query.overlaps {
            let Some(building_id) = shape.attributes.extra_str(BUILDING_ID_KEY) else {
                continue;
            };
            if self.discovered.contains(building_id) {
                continue;
            }
            let name = shape
                .attributes
                .extra_str(BUILDING_NAME_KEY)
                .unwrap_or(building_id)
                .to_string();
            found.push((building_id.to_string(), name));
        }

        if allowed {
            let from = self.position;
            if let Err(e) = self.validator.reposition(self.actor, target) {
                log::warn!("Avatar collider out of sync: {}", e);
            }
            self.position = target;
            events.push(TourEvent::Moved { from, to: target });
        } else {
            log::trace!("Move to {} blocked by {:?}", target, blockers);
            events.push(TourEvent::Blocked {
                at: target,
                by: blockers,
            });
        }

        for (building_id, name) in found {
            // Two shapes may share a building id; report it once
            if self.discovered.insert(building_id.clone()) {
                log::info!("Discovered {} ({})", name, building_id);
                events.push(TourEvent::Discovered { building_id, name });
            }
        }

        events
    }

    /// Tear down the current scene and load `layout`, keeping discoveries
    pub fn reset_scene(&mut self, layout: &SceneLayout) -> Result<SceneIndex, SceneError> {
        layout.validate()?;
        self.validator.clear();
        let index = layout.populate(&mut self.validator)?;
        self.actor =
            register_actor(&mut self.validator, layout.player_start, self.settings.actor_radius)?;
        self.position = layout.player_start;
        self.bounds = Some(layout.bounds());
        Ok(index)
    }

    fn clamp_to_bounds(&self, p: Vec2) -> Vec2 {
        match self.bounds {
            Some((min, max)) => {
                let r = Vec2::splat(self.settings.actor_radius);
                p.min(max - r).max(min + r)
            }
            None => p,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// 1-based grid cell under the avatar
    pub fn tile(&self) -> (i32, i32) {
        grid_position(self.position, self.settings.tile_size)
    }

    pub fn actor(&self) -> ShapeId {
        self.actor
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn discovered(&self) -> impl Iterator<Item = &str> {
        self.discovered.iter().map(String::as_str)
    }

    pub fn is_discovered(&self, building_id: &str) -> bool {
        self.discovered.contains(building_id)
    }

    pub fn validator(&self) -> &MoveValidator {
        &self.validator
    }

    /// Direct registry access (moving kinematic props, adding triggers)
    pub fn validator_mut(&mut self) -> &mut MoveValidator {
        &mut self.validator
    }
}

fn register_actor(
    validator: &mut MoveValidator,
    at: Vec2,
    radius: f32,
) -> Result<ShapeId, WorldError> {
    validator.register(
        Geometry::circle(at.x, at.y, radius),
        BodyKind::Dynamic,
        Attributes::default(),
    )
}
