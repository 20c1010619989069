//! Browser bindings
//!
//! Exposes the validator to the JS game loop. Attributes go in and query
//! results come out as JSON strings so the page keeps its existing
//! `{ floorType, isSensor, ... }` objects.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::scene::SceneLayout;
use crate::world::{Attributes, BodyKind, Geometry, MovePolicy, MoveValidator, ShapeId};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Office tour collision module loaded");
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_kind(kind: &str) -> Result<BodyKind, JsValue> {
    BodyKind::from_str(kind).ok_or_else(|| js_error(format!("unknown body kind '{kind}'")))
}

fn parse_attributes(json: &str) -> Result<Attributes, JsValue> {
    if json.trim().is_empty() {
        return Ok(Attributes::default());
    }
    serde_json::from_str(json).map_err(js_error)
}

/// Validator handle owned by the page
#[wasm_bindgen]
pub struct WebValidator {
    inner: MoveValidator,
}

#[wasm_bindgen]
impl WebValidator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: MoveValidator::new(),
        }
    }

    /// Validator with a JSON policy, e.g. `{"blocking":["green","blue"]}`
    pub fn with_policy(policy_json: &str) -> Result<WebValidator, JsValue> {
        let policy: MovePolicy = serde_json::from_str(policy_json).map_err(js_error)?;
        Ok(Self {
            inner: MoveValidator::with_policy(policy),
        })
    }

    /// Register every item of a scene layout (JSON), returning the shape count
    pub fn load_scene(&mut self, layout_json: &str) -> Result<usize, JsValue> {
        let layout = SceneLayout::from_json(layout_json).map_err(js_error)?;
        let index = layout.populate(&mut self.inner).map_err(js_error)?;
        Ok(index.len())
    }

    pub fn add_rectangle(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        kind: &str,
        attributes_json: &str,
    ) -> Result<u32, JsValue> {
        let id = self
            .inner
            .register(
                Geometry::rect(x, y, width, height),
                parse_kind(kind)?,
                parse_attributes(attributes_json)?,
            )
            .map_err(js_error)?;
        Ok(id.0)
    }

    pub fn add_circle(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        kind: &str,
        attributes_json: &str,
    ) -> Result<u32, JsValue> {
        let id = self
            .inner
            .register(
                Geometry::circle(x, y, radius),
                parse_kind(kind)?,
                parse_attributes(attributes_json)?,
            )
            .map_err(js_error)?;
        Ok(id.0)
    }

    /// Returns false if the id is unknown
    pub fn move_shape(&mut self, id: u32, x: f32, y: f32) -> bool {
        self.inner.reposition(ShapeId(id), Vec2::new(x, y)).is_ok()
    }

    /// Returns false if the id is unknown
    pub fn remove_shape(&mut self, id: u32) -> bool {
        self.inner.remove(ShapeId(id)).is_ok()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// `{ "allowed": bool, "overlaps": [shape, ...] }` as JSON
    pub fn query_move(
        &self,
        x: f32,
        y: f32,
        radius: f32,
        exclude: Option<u32>,
    ) -> Result<String, JsValue> {
        let query = self
            .inner
            .query_move(Vec2::new(x, y), radius, exclude.map(ShapeId));
        serde_json::to_string(&query).map_err(js_error)
    }

    /// `[x, y]` or undefined
    pub fn position(&self, id: u32) -> Option<Vec<f32>> {
        self.inner
            .position(ShapeId(id))
            .map(|p| p.to_array().to_vec())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for WebValidator {
    fn default() -> Self {
        Self::new()
    }
}
