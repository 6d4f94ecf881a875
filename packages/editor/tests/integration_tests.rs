//! Integration tests for the edit session

use poster_editor::{
    EditSession, EditorConfig, EditorEvent, ElementPatch, Gesture, KeyEvent, NodePath,
    NoopReason, Outcome, IDENTITY_ATTR, STARTER_POSTER,
};
use std::collections::HashSet;

// Starter poster layout:
//   el-0 body
//   el-1 div.poster      [0]
//   el-2 h1              [0, 0]
//   el-3 p               [0, 1]
//   el-4 strong          [0, 1, 1]
//   el-5 img             [0, 2]

fn starter() -> EditSession {
    let mut session = EditSession::new(EditorConfig::default());
    session.mount(STARTER_POSTER);
    session
}

fn path(indices: &[usize]) -> NodePath {
    NodePath(indices.to_vec())
}

fn style_of(session: &EditSession, id: &str) -> String {
    session
        .document()
        .and_then(|doc| doc.element(id))
        .and_then(|el| el.attr("style"))
        .unwrap_or_default()
        .to_string()
}

fn all_ids(session: &EditSession) -> Vec<String> {
    let mut ids = Vec::new();
    session.document().unwrap().body().walk(&mut |el| {
        ids.push(el.attr(IDENTITY_ATTR).unwrap_or_default().to_string());
    });
    ids
}

fn assert_identities_unique(session: &EditSession) {
    let ids = all_ids(session);
    let unique: HashSet<_> = ids.iter().collect();
    assert!(ids.iter().all(|id| !id.is_empty()), "unidentified element in {:?}", ids);
    assert_eq!(unique.len(), ids.len(), "duplicate identity in {:?}", ids);
}

#[test]
fn test_mount_assigns_identities() {
    let session = starter();

    assert_eq!(all_ids(&session), vec!["el-0", "el-1", "el-2", "el-3", "el-4", "el-5"]);
    assert_eq!(session.history().undo_levels(), 1);
    assert_eq!(session.gesture(), &Gesture::Idle);
}

#[test]
fn test_drag_moves_by_pointer_delta() {
    let mut session = starter();

    session.pointer_down(&path(&[0, 0]), 100.0, 100.0);
    session.pointer_move(120.0, 110.0);
    session.pointer_move(150.0, 130.0);
    let outcome = session.pointer_up();

    assert!(outcome.is_committed());
    assert_eq!(outcome.target(), Some("el-2"));
    let style = style_of(&session, "el-2");
    assert!(style.contains("left: 90px;"), "{}", style);
    assert!(style.contains("top: 110px;"), "{}", style);
    assert!(style.contains("position: absolute;"), "{}", style);

    // One snapshot for the whole drag
    assert_eq!(session.history().undo_levels(), 2);
    assert_eq!(session.gesture(), &Gesture::Idle);
}

#[test]
fn test_drag_positions_static_elements() {
    let mut session = EditSession::default();
    session.mount("<p>free</p>");

    session.pointer_down(&path(&[0]), 10.0, 10.0);
    session.pointer_move(15.0, 30.0);
    session.pointer_up();

    assert_eq!(
        session.body_html().unwrap(),
        r#"<p data-id="el-1" style="position: absolute; left: 5px; top: 20px;">free</p>"#
    );
}

#[test]
fn test_pointer_down_needs_identified_target() {
    let mut session = starter();

    // Text node resolves to its parent element
    assert!(!session.pointer_down(&path(&[0, 0, 0]), 0.0, 0.0).is_noop());
    session.pointer_up();

    assert_eq!(
        session.pointer_down(&path(&[7, 7]), 0.0, 0.0),
        Outcome::Noop {
            reason: NoopReason::MissingTarget
        }
    );
    assert_eq!(
        session.pointer_move(5.0, 5.0),
        Outcome::Noop {
            reason: NoopReason::NoActiveGesture
        }
    );
    assert_eq!(
        session.pointer_up(),
        Outcome::Noop {
            reason: NoopReason::NoActiveGesture
        }
    );
}

#[test]
fn test_inline_text_edit_commits_once() {
    let mut session = starter();

    session.double_click(&path(&[0, 1]));
    assert_eq!(
        session.document().unwrap().element("el-3").unwrap().attr("contenteditable"),
        Some("true")
    );

    session.input("Up to <strong>70% off</strong> on select items!");
    session.input("Up to <strong>70% off</strong> on select items!!");
    assert_eq!(session.history().undo_levels(), 1);

    let outcome = session.blur();
    assert!(outcome.is_committed());
    assert_eq!(session.history().undo_levels(), 2);

    let p = session.document().unwrap().element("el-3").unwrap();
    assert_eq!(p.attr("contenteditable"), Some("false"));
    assert_eq!(p.text_content(), "Up to 70% off on select items!!");
    assert_identities_unique(&session);
}

#[test]
fn test_typed_markup_is_sanitized() {
    let mut session = starter();
    session.double_click(&path(&[0, 0]));
    session.input(r#"Sale<img src=x onerror="alert(1)"><script>steal()</script>"#);
    session.blur();

    let html = session.body_html().unwrap();
    assert!(!html.contains("onerror"));
    assert!(!html.contains("<script"));
    assert_identities_unique(&session);
}

#[test]
fn test_double_click_on_image_is_ignored() {
    let mut session = starter();

    assert_eq!(
        session.double_click(&path(&[0, 2])),
        Outcome::Noop {
            reason: NoopReason::NotTextBearing
        }
    );
    assert_eq!(
        session.input("x"),
        Outcome::Noop {
            reason: NoopReason::NoActiveGesture
        }
    );
}

#[test]
fn test_style_content_cannot_be_replaced() {
    let mut session = EditSession::default();
    session.mount("<style>.a{color:red}</style><p>x</p>");

    session.set_attributes(
        "el-1",
        ElementPatch::text("&lt;/style&gt;&lt;script&gt;alert(1)&lt;/script&gt;"),
    );
    session.undo();
    session.redo();

    let export = session.export_document().unwrap();
    assert!(!export.contains("<script"), "{}", export);
    assert!(export.contains("<style data-id=\"el-1\">.a{color:red}</style>"), "{}", export);

    let mut tags = Vec::new();
    session.document().unwrap().body().walk(&mut |el| tags.push(el.tag.clone()));
    assert_eq!(tags, vec!["body", "style", "p"]);
}

#[test]
fn test_style_is_never_edited_inline() {
    let config = EditorConfig {
        text_tags: vec!["p".to_string(), "style".to_string()],
        ..Default::default()
    };
    let mut session = EditSession::new(config);
    session.mount("<style>.a{color:red}</style><p>x</p>");

    assert_eq!(
        session.double_click(&path(&[0])),
        Outcome::Noop {
            reason: NoopReason::NotTextBearing
        }
    );
    assert_eq!(session.gesture(), &Gesture::Idle);
}

#[test]
fn test_click_selects_nearest_identified_and_outlines() {
    let mut session = starter();

    session.click(&path(&[0, 1, 1, 0]));
    assert_eq!(session.selected_id(), Some("el-4"));
    assert!(style_of(&session, "el-4").contains("outline: 3px solid rgba(59,130,246,0.6);"));

    session.click(&path(&[0, 0]));
    assert_eq!(session.selected_id(), Some("el-2"));
    assert!(!style_of(&session, "el-4").contains("outline"));
    assert!(style_of(&session, "el-2").contains("outline"));

    // Selection is not an edit
    assert_eq!(session.history().undo_levels(), 1);
}

#[test]
fn test_delete_clears_selection() {
    let mut session = starter();
    session.click(&path(&[0, 1, 1]));

    let outcome = session.delete_selected();
    assert!(outcome.is_committed());
    assert_eq!(session.selected_id(), None);
    assert!(session.document().unwrap().element("el-4").is_none());
    assert_eq!(
        session.delete_selected(),
        Outcome::Noop {
            reason: NoopReason::NothingSelected
        }
    );
}

#[test]
fn test_toolbar_blocks_and_properties() {
    let mut session = starter();

    let text = session.add_text_block(None);
    let image = session.add_image_block(Some("/shoes.png"));
    assert_eq!(text.target(), Some("el-6"));
    assert_eq!(image.target(), Some("el-7"));
    assert_eq!(session.history().undo_levels(), 3);

    let info = session.inspect("el-6").unwrap();
    assert_eq!(info.tag_name, "div");
    assert_eq!(info.html.as_deref(), Some("New Text"));

    session.set_attributes(
        "el-7",
        ElementPatch::image(Some("/boots.png".to_string()), Some("Boots".to_string())),
    );
    let info = session.inspect("el-7").unwrap();
    assert_eq!(info.html, None);
    assert_eq!(info.src.as_deref(), Some("/boots.png"));
    assert_eq!(info.alt.as_deref(), Some("Boots"));

    assert_eq!(
        session.set_attributes("el-99", ElementPatch::text("x")),
        Outcome::Noop {
            reason: NoopReason::MissingTarget
        }
    );
}

#[test]
fn test_undo_redo_through_session() {
    let mut session = starter();
    let baseline = session.body_html().unwrap();

    session.add_text_block(Some("Hello"));
    let edited = session.body_html().unwrap();

    assert!(!session.undo().is_noop());
    assert_eq!(session.body_html().unwrap(), baseline);

    assert!(!session.redo().is_noop());
    assert_eq!(session.body_html().unwrap(), edited);

    assert_eq!(
        session.redo(),
        Outcome::Noop {
            reason: NoopReason::EmptyHistory
        }
    );
    assert_identities_unique(&session);
}

#[test]
fn test_undo_discards_unfinished_drag() {
    let mut session = starter();
    let baseline = session.body_html().unwrap();

    session.pointer_down(&path(&[0, 0]), 0.0, 0.0);
    session.pointer_move(50.0, 50.0);
    assert!(!session.undo().is_noop());

    assert_eq!(session.body_html().unwrap(), baseline);
    assert_eq!(session.gesture(), &Gesture::Idle);
}

#[test]
fn test_undo_while_editing_reverts_the_edit() {
    let mut session = starter();
    let baseline = session.body_html().unwrap();

    session.double_click(&path(&[0, 0]));
    session.input("Winter Sale");
    session.undo();

    assert_eq!(session.body_html().unwrap(), baseline);
    assert!(session.history().can_redo());
}

#[test]
fn test_keyboard_shortcuts() {
    let mut session = starter();
    session.add_text_block(None);

    let response = session.key(&KeyEvent::new("z").with_ctrl());
    assert!(response.prevent_default);
    assert!(!response.outcome.is_noop());

    let response = session.key(&KeyEvent::new("Y").with_meta());
    assert!(response.prevent_default);
    assert!(!response.outcome.is_noop());

    let response = session.key(&KeyEvent::new("z"));
    assert!(!response.prevent_default);

    // Shortcut is claimed even with nothing to redo
    let response = session.key(&KeyEvent::new("y").with_ctrl());
    assert!(response.prevent_default);
    assert_eq!(
        response.outcome,
        Outcome::Noop {
            reason: NoopReason::EmptyHistory
        }
    );
}

#[test]
fn test_export_then_import_round_trip() {
    let mut session = starter();
    session.add_text_block(Some("Extra"));
    let before = session.body_html().unwrap();

    let exported = session.export_document().unwrap();
    assert!(exported.starts_with("<!doctype html>\n<html><head><meta data-generated-by=\"editable-html-poster\"></head><body"));
    // Export does not touch the live document
    assert_eq!(session.body_html().unwrap(), before);

    session.import_document(&exported);
    assert_eq!(session.body_html().unwrap(), before);
    assert_eq!(session.history().undo_levels(), 1);
    assert_eq!(
        session.undo(),
        Outcome::Noop {
            reason: NoopReason::EmptyHistory
        }
    );
}

#[test]
fn test_import_sanitizes_and_resets() {
    let mut session = starter();
    session.click(&path(&[0, 0]));
    session.double_click(&path(&[0, 1]));

    session.import_document(r#"<script>alert(1)</script><h2 onclick="x()">New</h2><a href="javascript:go()">link</a>"#);

    assert_eq!(
        session.body_html().unwrap(),
        r#"<h2 data-id="el-1">New</h2><a data-id="el-2">link</a>"#
    );
    assert_eq!(session.selected_id(), None);
    assert_eq!(session.gesture(), &Gesture::Idle);
}

#[test]
fn test_operations_before_mount_are_noops() {
    let mut session = EditSession::default();
    let not_mounted = Outcome::Noop {
        reason: NoopReason::NotMounted,
    };

    assert_eq!(session.click(&path(&[0])), not_mounted);
    assert_eq!(session.pointer_down(&path(&[0]), 0.0, 0.0), not_mounted);
    assert_eq!(session.double_click(&path(&[0])), not_mounted);
    assert_eq!(session.add_text_block(None), not_mounted);
    assert_eq!(session.delete_selected(), not_mounted);
    assert_eq!(session.undo(), not_mounted);
    assert_eq!(session.import_document("<p>x</p>"), not_mounted);
    assert!(!session.key(&KeyEvent::new("z").with_ctrl()).prevent_default);
    assert_eq!(session.export_document(), None);
    assert!(!session.is_mounted());
}

#[test]
fn test_scripted_events() {
    let mut session = starter();
    let events: Vec<EditorEvent> = serde_json::from_str(
        r#"[
            {"type": "click", "target": [0, 0]},
            {"type": "pointerDown", "target": [0, 0], "x": 0, "y": 0},
            {"type": "pointerMove", "x": 10, "y": 20},
            {"type": "pointerUp"},
            {"type": "deleteSelected"},
            {"type": "key", "key": "z", "ctrl": true}
        ]"#,
    )
    .unwrap();

    let outcomes: Vec<_> = events.into_iter().map(|event| session.dispatch(event)).collect();

    assert!(outcomes.iter().all(|outcome| !outcome.is_noop()), "{:?}", outcomes);
    assert!(session.document().unwrap().element("el-2").is_some());
    assert!(style_of(&session, "el-2").contains("left: 50px;"));
}
