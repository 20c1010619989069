//! Move acceptance policy
//!
//! Which floor types stop the actor. Data-driven so a scene can ship its
//! own rules; the default blocks lawns and buildings and lets roads through.

use serde::{Deserialize, Serialize};

use super::shape::{Attributes, FloorType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovePolicy {
    /// Floor types that reject a move when a non-sensor shape overlaps
    pub blocking: Vec<FloorType>,
}

impl Default for MovePolicy {
    fn default() -> Self {
        Self {
            blocking: vec![FloorType::Green, FloorType::Blue],
        }
    }
}

impl MovePolicy {
    /// Policy that never blocks (overlaps are still reported)
    pub fn permissive() -> Self {
        Self {
            blocking: Vec::new(),
        }
    }

    pub fn new(blocking: impl IntoIterator<Item = FloorType>) -> Self {
        Self {
            blocking: blocking.into_iter().collect(),
        }
    }

    #[inline]
    pub fn is_blocking(&self, floor: FloorType) -> bool {
        self.blocking.contains(&floor)
    }

    /// Whether an overlapping shape with these attributes rejects the move
    pub fn blocks(&self, attributes: &Attributes) -> bool {
        !attributes.is_sensor
            && attributes
                .floor_type
                .is_some_and(|floor| self.is_blocking(floor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_blocks_green_and_blue() {
        let policy = MovePolicy::default();
        assert!(policy.blocks(&Attributes::floor(FloorType::Green)));
        assert!(policy.blocks(&Attributes::floor(FloorType::Blue)));
        assert!(!policy.blocks(&Attributes::floor(FloorType::Gray)));
    }

    #[test]
    fn test_sensors_never_block() {
        let policy = MovePolicy::default();
        assert!(!policy.blocks(&Attributes::floor(FloorType::Green).sensor()));
        assert!(!policy.blocks(&Attributes::floor(FloorType::Blue).sensor()));
    }

    #[test]
    fn test_untyped_shapes_never_block() {
        assert!(!MovePolicy::default().blocks(&Attributes::default()));
    }

    #[test]
    fn test_custom_policy() {
        let policy = MovePolicy::new([FloorType::Gray]);
        assert!(policy.blocks(&Attributes::floor(FloorType::Gray)));
        assert!(!policy.blocks(&Attributes::floor(FloorType::Green)));
        assert!(!MovePolicy::permissive().blocks(&Attributes::floor(FloorType::Blue)));
    }

    #[test]
    fn test_policy_json() {
        let policy: MovePolicy = serde_json::from_str(r#"{"blocking":["blue"]}"#).unwrap();
        assert_eq!(policy, MovePolicy::new([FloorType::Blue]));
    }
}
