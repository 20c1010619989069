//! Office Tour - collision authority for the workmate office map
//!
//! Core modules:
//! - `world`: Shape registry, intersection tests, move policy
//! - `scene`: Office layout loading (buildings, roads, lawns)
//! - `tour`: Fixed-step avatar driver with building discovery
//! - `settings`: Data-driven actor and policy configuration
//! - `web`: Browser bindings (wasm32 only)

pub mod error;
pub mod scene;
pub mod settings;
pub mod tour;
pub mod world;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{SceneError, SettingsError, WorldError};
pub use scene::{SceneIndex, SceneLayout};
pub use settings::Settings;
pub use tour::{Tour, TourEvent, TourInput};
pub use world::{Attributes, BodyKind, FloorType, Geometry, MovePolicy, MoveQuery, MoveValidator, Shape, ShapeId};

use glam::Vec2;

/// Tour configuration constants
pub mod consts {
    /// Fixed step used by the tour driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Map grid cell size in pixels
    pub const TILE_SIZE: f32 = 32.0;

    /// Player collider radius
    pub const DEFAULT_ACTOR_RADIUS: f32 = 16.0;
    /// Walking speed in pixels per second
    pub const DEFAULT_MOVE_SPEED: f32 = 120.0;
}

/// 1-based grid cell containing `pos`
#[inline]
pub fn grid_position(pos: Vec2, tile_size: f32) -> (i32, i32) {
    let cell = (pos / tile_size).floor();
    (cell.x as i32 + 1, cell.y as i32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_position_is_one_based() {
        assert_eq!(grid_position(Vec2::new(0.0, 0.0), 32.0), (1, 1));
        assert_eq!(grid_position(Vec2::new(31.9, 32.0), 32.0), (1, 2));
        assert_eq!(grid_position(Vec2::new(100.0, 65.0), 32.0), (4, 3));
    }
}
