//! WebAssembly bindings
//!
//! Browser-friendly wrappers around rendering and picking. Failures surface
//! as JavaScript exceptions carrying the error message.

use wasm_bindgen::prelude::*;

use crate::core::{AnimationFrame, Point, RenderConfig, Vec2, ViewState};
use crate::interaction::hit_test;
use crate::model::TechnologyTree;

fn js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Initialize the module: panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

/// Render a tree snapshot to SVG
///
/// # Arguments
/// * `json` - Tree snapshot
/// * `config_json` - Optional `RenderConfig` as JSON; missing fields use defaults
/// * `selected` - Optional selected node id
/// * `pan_x`, `pan_y` - Pan offset
/// * `seconds` - Animation clock for the selection pulse
#[wasm_bindgen]
pub fn render_tree_svg(
    json: &str,
    config_json: Option<String>,
    selected: Option<String>,
    pan_x: f64,
    pan_y: f64,
    seconds: f64,
) -> Result<String, JsValue> {
    let config: RenderConfig = match config_json {
        Some(raw) => serde_json::from_str(&raw).map_err(js_error)?,
        None => RenderConfig::default(),
    };
    let view = ViewState {
        pan: Vec2::new(pan_x, pan_y),
        selected,
        animation: AnimationFrame::pulse_at(seconds),
    };
    crate::render_svg(json, &config, &view).map_err(js_error)
}

/// Id of the node under a screen point, if any
#[wasm_bindgen]
pub fn pick_node(json: &str, x: f64, y: f64, pan_x: f64, pan_y: f64) -> Result<Option<String>, JsValue> {
    let tree = TechnologyTree::from_json_str(json).map_err(js_error)?;
    Ok(hit_test(&tree, Point::new(x, y), Vec2::new(pan_x, pan_y)).map(|node| node.id.clone()))
}

/// Structural issues of a snapshot, one message per entry, as a JSON array
#[wasm_bindgen]
pub fn validate_tree(json: &str) -> Result<String, JsValue> {
    let tree = TechnologyTree::from_json_str(json).map_err(js_error)?;
    let messages: Vec<String> = crate::model::validate(&tree)
        .iter()
        .map(ToString::to_string)
        .collect();
    serde_json::to_string(&messages).map_err(js_error)
}
