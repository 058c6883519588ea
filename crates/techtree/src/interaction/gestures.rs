//! Gesture state machine
//!
//! Who owns a drag is decided once, at drag start: a press on a node drags
//! that node for the whole gesture, a press on background pans. The
//! controller never touches the tree; node moves leave as [`TreeEvent`]s.

use tracing::debug;

use super::events::TreeEvent;
use super::hit_test::hit_test;
use crate::core::{Point, Vec2, ViewState};
use crate::model::TechnologyTree;

/// Gesture in progress
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Panning,
    /// `position` is the node's world position including every delta so far
    DraggingNode { id: String, position: Point },
}

/// Owns the pan offset and the active gesture
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    pan: Vec2,
    gesture: Gesture,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pan(pan: Vec2) -> Self {
        Self {
            pan,
            gesture: Gesture::Idle,
        }
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Copy the pan offset into a view for the next frame
    pub fn apply_to(&self, view: &mut ViewState) {
        view.pan = self.pan;
    }

    /// Begin a drag at a screen point. Selects the node under it, if any.
    pub fn drag_start(&mut self, tree: &TechnologyTree, point: Point) -> Vec<TreeEvent> {
        match hit_test(tree, point, self.pan) {
            Some(node) => {
                debug!(node = %node.id, "Node drag started");
                self.gesture = Gesture::DraggingNode {
                    id: node.id.clone(),
                    position: node.position,
                };
                vec![TreeEvent::selected(node.id.clone())]
            }
            None => {
                debug!("Pan started");
                self.gesture = Gesture::Panning;
                Vec::new()
            }
        }
    }

    /// Continue the active drag by a screen-space delta
    pub fn drag_delta(&mut self, delta: Vec2) -> Vec<TreeEvent> {
        match &mut self.gesture {
            Gesture::Idle => Vec::new(),
            Gesture::Panning => {
                self.pan += delta;
                Vec::new()
            }
            Gesture::DraggingNode { id, position } => {
                *position = *position + delta;
                vec![TreeEvent::NodeMoved {
                    id: id.clone(),
                    position: *position,
                }]
            }
        }
    }

    /// Finish the active drag. Moves already emitted stand.
    pub fn drag_end(&mut self) -> Vec<TreeEvent> {
        if self.gesture != Gesture::Idle {
            debug!(gesture = ?self.gesture, "Drag ended");
        }
        self.gesture = Gesture::Idle;
        Vec::new()
    }

    /// Tap at a screen point: select the node under it or clear the selection
    pub fn tap(&mut self, tree: &TechnologyTree, point: Point) -> Vec<TreeEvent> {
        let event = match hit_test(tree, point, self.pan) {
            Some(node) => TreeEvent::selected(node.id.clone()),
            None => TreeEvent::selection_cleared(),
        };
        debug!(%event, "Tap");
        vec![event]
    }
}
