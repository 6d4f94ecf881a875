//! Browser bindings for the poster editor
//!
//! The presentational layer renders `bodyHtml()` into its stage, forwards
//! DOM events with node paths (child indices from `<body>`), and reads
//! outcomes back as JSON.

use poster_editor::{
    EditSession, EditorConfig, EditorEvent, ElementPatch, KeyEvent, NodePath, Outcome,
    DEFAULT_EXPORT_FILE,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn node_path(path: Vec<u32>) -> NodePath {
    NodePath(path.into_iter().map(|index| index as usize).collect())
}

/// One editing session bound to a stage
#[wasm_bindgen]
pub struct PosterEditor {
    session: EditSession,
}

#[wasm_bindgen]
impl PosterEditor {
    /// Create an editor from an optional JSON config
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PosterEditor, JsValue> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(&json)
                .map_err(|e| JsValue::from_str(&format!("Config error: {}", e)))?,
            None => EditorConfig::default(),
        };
        Ok(Self {
            session: EditSession::new(config),
        })
    }

    pub fn mount(&mut self, html: &str) -> Result<String, JsValue> {
        to_json(&self.session.mount(html))
    }

    pub fn unmount(&mut self) {
        self.session.unmount();
    }

    #[wasm_bindgen(js_name = bodyHtml)]
    pub fn body_html(&self) -> Option<String> {
        self.session.body_html()
    }

    #[wasm_bindgen(js_name = selectedId)]
    pub fn selected_id(&self) -> Option<String> {
        self.session.selected_id().map(str::to_string)
    }

    pub fn click(&mut self, path: Vec<u32>) -> Result<String, JsValue> {
        to_json(&self.session.click(&node_path(path)))
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, path: Vec<u32>, x: f64, y: f64) -> Result<String, JsValue> {
        to_json(&self.session.pointer_down(&node_path(path), x, y))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        to_json(&self.session.pointer_move(x, y))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> Result<String, JsValue> {
        to_json(&self.session.pointer_up())
    }

    #[wasm_bindgen(js_name = doubleClick)]
    pub fn double_click(&mut self, path: Vec<u32>) -> Result<String, JsValue> {
        to_json(&self.session.double_click(&node_path(path)))
    }

    /// Current inner HTML of the element being text-edited
    pub fn input(&mut self, html: &str) -> Result<String, JsValue> {
        to_json(&self.session.input(html))
    }

    pub fn blur(&mut self) -> Result<String, JsValue> {
        to_json(&self.session.blur())
    }

    /// Returns true when the host should call `preventDefault()`
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, ctrl: bool, meta: bool, shift: bool) -> bool {
        let event = KeyEvent {
            key: key.to_string(),
            ctrl,
            meta,
            shift,
        };
        self.session.key(&event).prevent_default
    }

    #[wasm_bindgen(js_name = addTextBlock)]
    pub fn add_text_block(&mut self, text: Option<String>) -> Result<String, JsValue> {
        to_json(&self.session.add_text_block(text.as_deref()))
    }

    #[wasm_bindgen(js_name = addImageBlock)]
    pub fn add_image_block(&mut self, src: Option<String>) -> Result<String, JsValue> {
        to_json(&self.session.add_image_block(src.as_deref()))
    }

    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> Result<String, JsValue> {
        to_json(&self.session.delete_selected())
    }

    /// Apply `{"text"?, "src"?, "alt"?}` to an element
    #[wasm_bindgen(js_name = setAttributes)]
    pub fn set_attributes(&mut self, id: &str, patch_json: &str) -> Result<String, JsValue> {
        let patch: ElementPatch = serde_json::from_str(patch_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid patch: {}", e)))?;
        to_json(&self.session.set_attributes(id, patch))
    }

    /// Properties panel data for an element as JSON
    pub fn inspect(&self, id: &str) -> Result<Option<String>, JsValue> {
        self.session
            .inspect(id)
            .map(|info| to_json(&info))
            .transpose()
    }

    pub fn undo(&mut self) -> Result<String, JsValue> {
        to_json(&self.session.undo())
    }

    pub fn redo(&mut self) -> Result<String, JsValue> {
        to_json(&self.session.redo())
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.session.history().can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.session.history().can_redo()
    }

    #[wasm_bindgen(js_name = importDocument)]
    pub fn import_document(&mut self, html: &str) -> Result<String, JsValue> {
        to_json(&self.session.import_document(html))
    }

    #[wasm_bindgen(js_name = exportDocument)]
    pub fn export_document(&self) -> Option<String> {
        self.session.export_document()
    }

    /// Apply one JSON-encoded editor event
    pub fn dispatch(&mut self, event_json: &str) -> Result<String, JsValue> {
        let event: EditorEvent = serde_json::from_str(event_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid event: {}", e)))?;
        let outcome: Outcome = self.session.dispatch(event);
        to_json(&outcome)
    }
}

/// Sanitize untrusted markup
#[wasm_bindgen]
pub fn sanitize(html: &str) -> String {
    poster_sanitizer::sanitize(html)
}

/// File name offered when downloading an export
#[wasm_bindgen(js_name = exportFileName)]
pub fn export_file_name() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> PosterEditor {
        let mut editor = PosterEditor::new(None).unwrap();
        editor.mount(poster_editor::STARTER_POSTER).unwrap();
        editor
    }

    #[test]
    fn test_drag_through_bindings() {
        let mut editor = editor();

        editor.pointer_down(vec![0, 0], 100.0, 100.0).unwrap();
        editor.pointer_move(150.0, 130.0).unwrap();
        let outcome = editor.pointer_up().unwrap();

        assert_eq!(outcome, r#"{"outcome":"committed","version":2,"target":"el-2"}"#);
        assert!(editor.body_html().unwrap().contains("left: 90px;"));
        assert!(editor.can_undo());
    }

    #[test]
    fn test_keyboard_prevents_default() {
        let mut editor = editor();
        editor.add_text_block(None).unwrap();

        assert!(editor.key_down("z", true, false, false));
        assert!(!editor.key_down("z", false, false, false));
        assert!(editor.can_redo());
    }

    #[test]
    fn test_dispatch_and_inspect() {
        let mut editor = editor();
        editor
            .dispatch(r#"{"type": "setAttributes", "id": "el-5", "patch": {"alt": "Shoes"}}"#)
            .unwrap();

        let info = editor.inspect("el-5").unwrap().unwrap();
        assert!(info.contains(r#""alt":"Shoes""#));
        assert_eq!(editor.inspect("missing").unwrap(), None);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(), "poster.html");
        assert_eq!(sanitize("<p onclick=\"x\">a</p>"), "<p>a</p>");
    }
}
