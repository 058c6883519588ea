//! Gesture and hit-test tests
//!
//! A gesture belongs to whoever it started on: node drags never pan and pans
//! never move nodes. The tree is never mutated by the controller.

use techtree::interaction::{hit_radius, screen_to_world};
use techtree::prelude::*;

fn tree() -> TechnologyTree {
    TechnologyTree::new(
        vec![
            Node::new("topic", NodeType::Topic, Point::new(100.0, 100.0)),
            Node::new("skill", NodeType::Skill, Point::new(200.0, 100.0)),
            Node::new("module", NodeType::Module, Point::new(300.0, 100.0))
                .with_shape(NodeShape::Circle),
        ],
        vec![],
        Metadata::default(),
    )
    .unwrap()
}

#[test]
fn test_hit_radius_per_shape() {
    assert_eq!(hit_radius(NodeShape::Circle), 32.0);
    assert_eq!(hit_radius(NodeShape::Hexagon), 35.0);
    assert_eq!(hit_radius(NodeShape::Square), 35.0);
}

#[test]
fn test_hexagon_picked_at_35() {
    let tree = tree();
    let hit = hit_test(&tree, Point::new(200.0, 135.0), Vec2::ZERO);
    assert_eq!(hit.map(|n| n.id.as_str()), Some("skill"));
    assert!(hit_test(&tree, Point::new(100.0, 135.0), Vec2::ZERO).is_none());
}

#[test]
fn test_explicit_shape_overrides_type_for_picking() {
    let tree = tree();
    // module drawn as a circle: 34px away misses
    assert!(hit_test(&tree, Point::new(334.0, 100.0), Vec2::ZERO).is_none());
}

#[test]
fn test_screen_to_world() {
    assert_eq!(
        screen_to_world(Point::new(10.0, 10.0), Vec2::new(3.0, -2.0)),
        Point::new(7.0, 12.0)
    );
}

#[test]
fn test_drag_on_node_then_apply_moves() {
    let mut tree = tree();
    let mut gestures = GestureController::new();

    let started = gestures.drag_start(&tree, Point::new(100.0, 100.0));
    assert_eq!(started, vec![TreeEvent::selected("topic")]);

    let mut last = Vec::new();
    for _ in 0..4 {
        last = gestures.drag_delta(Vec2::new(5.0, 2.5));
    }
    assert_eq!(gestures.pan(), Vec2::ZERO);
    assert_eq!(tree.node("topic").unwrap().position, Point::new(100.0, 100.0));

    // The owner applies the request
    match &last[..] {
        [TreeEvent::NodeMoved { id, position }] => {
            assert_eq!(*position, Point::new(120.0, 110.0));
            assert!(tree.move_node(id, *position));
        }
        other => panic!("expected one move, got {:?}", other),
    }
    assert_eq!(tree.node("topic").unwrap().position, Point::new(120.0, 110.0));

    assert!(gestures.drag_end().is_empty());
    assert_eq!(gestures.gesture(), &Gesture::Idle);
}

#[test]
fn test_drag_under_pan_picks_in_world_space() {
    let tree = tree();
    let mut gestures = GestureController::with_pan(Vec2::new(-100.0, 0.0));
    let started = gestures.drag_start(&tree, Point::new(100.0, 100.0));
    assert_eq!(started, vec![TreeEvent::selected("skill")]);
}

#[test]
fn test_background_drag_pans_then_updates_view() {
    let tree = tree();
    let mut gestures = GestureController::new();

    assert!(gestures.drag_start(&tree, Point::new(600.0, 600.0)).is_empty());
    for delta in [Vec2::new(10.0, 0.0), Vec2::new(0.0, -4.0), Vec2::new(-2.5, 1.0)] {
        assert!(gestures.drag_delta(delta).is_empty());
    }
    gestures.drag_end();

    let mut view = ViewState::new();
    gestures.apply_to(&mut view);
    assert_eq!(view.pan, Vec2::new(7.5, -3.0));

    // After panning, the topic node is found at its shifted screen position
    let hit = gestures.tap(&tree, Point::new(107.5, 97.0));
    assert_eq!(hit, vec![TreeEvent::selected("topic")]);
}

#[test]
fn test_delta_without_gesture_is_ignored() {
    let mut gestures = GestureController::new();
    assert!(gestures.drag_delta(Vec2::new(1.0, 1.0)).is_empty());
    assert_eq!(gestures.pan(), Vec2::ZERO);
}

#[test]
fn test_tap_outside_clears() {
    let tree = tree();
    let mut gestures = GestureController::new();
    assert_eq!(
        gestures.tap(&tree, Point::new(0.0, 0.0)),
        vec![TreeEvent::selection_cleared()]
    );
}
