//! End-to-end tests against the Kotlin sample tree
//!
//! Loads `fixtures/kotlin_tree.json`, renders one frame onto a recording
//! canvas and checks what was drawn, then exercises picking on the same tree.

use techtree::prelude::*;
use techtree::render::colors::{ROOT_GRADIENT, TOPIC_GRADIENT};

const FIXTURE: &str = include_str!("fixtures/kotlin_tree.json");

fn fixture() -> TechnologyTree {
    TechnologyTree::from_json_str(FIXTURE).unwrap()
}

fn render(view: &ViewState) -> (RecordingCanvas, RenderStats) {
    let tree = fixture();
    let mut canvas = RecordingCanvas::new();
    let stats = TreeCanvas::new(RenderConfig::default()).render(&tree, view, &mut canvas);
    (canvas, stats)
}

fn body_colors(canvas: &RecordingCanvas, id: &str) -> Vec<Color> {
    canvas
        .commands_for(&SceneItem::Node { id: id.into() })
        .into_iter()
        .find_map(|c| match c {
            DrawCommand::FillCircle {
                brush: Brush::RadialGradient { colors, .. },
                ..
            } => Some(colors.clone()),
            _ => None,
        })
        .expect("node body drawn with a radial gradient")
}

#[test]
fn test_fixture_loads() {
    let tree = fixture();
    assert_eq!(tree.node_count(), 2);
    assert_eq!(tree.connection_count(), 1);

    let intro = tree.node("intro").unwrap();
    assert_eq!(intro.position, Point::new(100.0, 300.0));
    assert!(intro.is_root());
    assert_eq!(intro.estimated_time, Some(30));
    assert_eq!(intro.content_id.as_deref(), Some("kotlin-intro"));
    assert_eq!(tree.node("variables").unwrap().requirements, vec!["intro"]);
    assert_eq!(tree.metadata().layout_type.as_deref(), Some("tree"));
}

#[test]
fn test_frame_item_order() {
    let (canvas, stats) = render(&ViewState::new());

    assert_eq!(
        canvas.items(),
        vec![
            &SceneItem::Connection {
                from: "intro".into(),
                to: "variables".into()
            },
            &SceneItem::Node { id: "intro".into() },
            &SceneItem::Node {
                id: "variables".into()
            },
            &SceneItem::Label { id: "intro".into() },
            &SceneItem::Label {
                id: "variables".into()
            },
        ]
    );
    assert_eq!(stats.connections_drawn, 1);
    assert_eq!(stats.connections_skipped, 0);
    assert_eq!(stats.nodes_drawn, 2);
    assert_eq!(stats.labels_drawn, 2);
}

#[test]
fn test_connection_is_plain_blue_line() {
    let (canvas, _) = render(&ViewState::new());
    let commands = canvas.commands_for(&SceneItem::Connection {
        from: "intro".into(),
        to: "variables".into(),
    });

    assert_eq!(commands.len(), 1);
    match commands[0] {
        DrawCommand::Line { from, to, stroke } => {
            assert_eq!(*from, Point::new(100.0, 300.0));
            assert_eq!(*to, Point::new(300.0, 200.0));
            match &stroke.brush {
                Brush::LinearGradient { colors, .. } => {
                    assert_eq!(colors, &vec![TOPIC_GRADIENT[0], TOPIC_GRADIENT[0]]);
                }
                other => panic!("expected gradient, got {:?}", other),
            }
        }
        other => panic!("expected a single line, got {:?}", other),
    }
}

#[test]
fn test_node_gradients() {
    let (canvas, _) = render(&ViewState::new());
    assert_eq!(body_colors(&canvas, "intro"), ROOT_GRADIENT.to_vec());
    assert_eq!(body_colors(&canvas, "variables"), TOPIC_GRADIENT.to_vec());
}

#[test]
fn test_labels_use_russian_titles() {
    let (canvas, _) = render(&ViewState::new());
    assert_eq!(
        canvas.texts(),
        vec!["Введение в Kotlin", "Переменные и типы данных"]
    );
}

#[test]
fn test_labels_follow_configured_language() {
    let tree = fixture();
    let mut canvas = RecordingCanvas::new();
    TreeCanvas::new(RenderConfig::new().with_language("en")).render(
        &tree,
        &ViewState::new(),
        &mut canvas,
    );
    assert_eq!(
        canvas.texts(),
        vec!["Introduction to Kotlin", "Variables and data types"]
    );
}

#[test]
fn test_tap_selects_intro_without_pan() {
    let tree = fixture();
    let hit = hit_test(&tree, Point::new(100.0, 300.0), Vec2::ZERO);
    assert_eq!(hit.map(|n| n.id.as_str()), Some("intro"));

    let mut gestures = GestureController::new();
    assert_eq!(
        gestures.tap(&tree, Point::new(100.0, 300.0)),
        vec![TreeEvent::selected("intro")]
    );
}

#[test]
fn test_tap_misses_after_pan() {
    let tree = fixture();
    assert!(hit_test(&tree, Point::new(100.0, 300.0), Vec2::new(50.0, 50.0)).is_none());

    let mut gestures = GestureController::with_pan(Vec2::new(50.0, 50.0));
    assert_eq!(
        gestures.tap(&tree, Point::new(100.0, 300.0)),
        vec![TreeEvent::selection_cleared()]
    );
}

#[test]
fn test_selected_intro_highlights_connection() {
    let (canvas, _) = render(&ViewState::new().with_selected("intro"));
    let commands = canvas.commands_for(&SceneItem::Connection {
        from: "intro".into(),
        to: "variables".into(),
    });
    // glow underneath, then the line
    assert_eq!(commands.len(), 2);
    assert_eq!(
        body_colors(&canvas, "intro"),
        techtree::render::colors::SELECTED_GRADIENT.to_vec()
    );
}

#[test]
fn test_fixture_is_valid() {
    assert!(validate(&fixture()).is_empty());
}
