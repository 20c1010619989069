//! Collision world for the office tour
//!
//! A flat registry of rectangles and circles plus the policy that decides
//! whether the actor may stand at a given position. This module must stay
//! free of I/O and rendering:
//! - Insertion order is the only iteration order
//! - Ids come from a monotonic counter and are never reused
//! - Queries never mutate the registry

pub mod collision;
pub mod policy;
pub mod shape;
pub mod validator;

pub use collision::{actor_overlaps, circle_rect_overlap, circles_overlap, nearest_point_on_rect};
pub use policy::MovePolicy;
pub use shape::{Attributes, BodyKind, FloorType, Geometry, Shape, ShapeId};
pub use validator::{MoveQuery, MoveValidator};
