//! Node picking
//!
//! Every shape is picked as a circle: a point hits a node when its distance
//! to the node center is at most the shape's hit radius. Overlapping nodes
//! resolve to whichever comes first in document order.

use tracing::trace;

use crate::core::{Point, Vec2};
use crate::model::{Node, NodeShape, TechnologyTree};

/// Pick radius for a shape
pub fn hit_radius(shape: NodeShape) -> f64 {
    match shape {
        NodeShape::Circle => 32.0,
        NodeShape::Hexagon | NodeShape::Square => 35.0,
    }
}

/// True when the world-space point lies within the node's hit radius
pub fn node_contains(node: &Node, world: Point) -> bool {
    node.position.distance_to(world) <= hit_radius(node.shape())
}

/// Convert a screen point to world space under the given pan offset
pub fn screen_to_world(point: Point, pan: Vec2) -> Point {
    point - pan
}

/// First node under a screen point
pub fn hit_test(tree: &TechnologyTree, point: Point, pan: Vec2) -> Option<&Node> {
    let world = screen_to_world(point, pan);
    let hit = tree.nodes().iter().find(|node| node_contains(node, world));
    trace!(x = world.x, y = world.y, hit = hit.map(|n| n.id.as_str()), "Hit test");
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metadata, NodeType};

    fn tree(nodes: Vec<Node>) -> TechnologyTree {
        TechnologyTree::new(nodes, vec![], Metadata::default()).unwrap()
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let tree = tree(vec![Node::new("a", NodeType::Topic, Point::ORIGIN)]);
        assert!(hit_test(&tree, Point::new(32.0, 0.0), Vec2::ZERO).is_some());
        assert!(hit_test(&tree, Point::new(32.01, 0.0), Vec2::ZERO).is_none());
    }

    #[test]
    fn test_square_uses_circular_radius() {
        let tree = tree(vec![Node::new("m", NodeType::Module, Point::ORIGIN)]);
        // The square's corner (30, 30) is 42.4 away: outside the pick circle
        assert!(hit_test(&tree, Point::new(30.0, 30.0), Vec2::ZERO).is_none());
        assert!(hit_test(&tree, Point::new(0.0, 35.0), Vec2::ZERO).is_some());
    }

    #[test]
    fn test_overlap_prefers_document_order() {
        let tree = tree(vec![
            Node::new("first", NodeType::Topic, Point::ORIGIN),
            Node::new("second", NodeType::Topic, Point::new(10.0, 0.0)),
        ]);
        let hit = hit_test(&tree, Point::new(5.0, 0.0), Vec2::ZERO).map(|n| n.id.as_str());
        assert_eq!(hit, Some("first"));
    }

    #[test]
    fn test_pan_is_subtracted() {
        let tree = tree(vec![Node::new("a", NodeType::Topic, Point::new(100.0, 100.0))]);
        assert!(hit_test(&tree, Point::new(150.0, 150.0), Vec2::new(50.0, 50.0)).is_some());
        assert!(hit_test(&tree, Point::new(100.0, 100.0), Vec2::new(50.0, 50.0)).is_none());
    }
}
