//! Canvas drawing for the workflow editor, plus the pure geometry the mouse
//! handlers share with the renderer.

pub mod renderer;
pub mod shapes;

use crate::constants::{CONNECT_HANDLE_HEIGHT, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH};
use crate::models::DagNode;

/// True when (x, y) falls inside the node's box.
pub fn hit_node(node: &DagNode, x: f64, y: f64) -> bool {
    let pos = node.position();
    x >= pos.x && x <= pos.x + DEFAULT_NODE_WIDTH && y >= pos.y && y <= pos.y + DEFAULT_NODE_HEIGHT
}

/// True when (x, y) falls inside the connect handle strip along the node's
/// bottom edge. Checked before plain body hits so edge draws win over drags.
pub fn hit_connect_handle(node: &DagNode, x: f64, y: f64) -> bool {
    let pos = node.position();
    x >= pos.x
        && x <= pos.x + DEFAULT_NODE_WIDTH
        && y >= pos.y + DEFAULT_NODE_HEIGHT - CONNECT_HANDLE_HEIGHT
        && y <= pos.y + DEFAULT_NODE_HEIGHT
}

/// Topmost node under the cursor. Later nodes draw on top, so scan from the
/// back of the list.
pub fn node_at<'a>(nodes: &'a [DagNode], x: f64, y: f64) -> Option<&'a DagNode> {
    nodes.iter().rev().find(|n| hit_node(n, x, y))
}

/// Where edges leave a node: center of the bottom edge.
pub fn output_anchor(node: &DagNode) -> (f64, f64) {
    let pos = node.position();
    (pos.x + DEFAULT_NODE_WIDTH / 2.0, pos.y + DEFAULT_NODE_HEIGHT)
}

/// Where edges enter a node: center of the top edge.
pub fn input_anchor(node: &DagNode) -> (f64, f64) {
    let pos = node.position();
    (pos.x + DEFAULT_NODE_WIDTH / 2.0, pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn agent_node(id: &str, x: f64, y: f64) -> DagNode {
        DagNode::Agent {
            id: id.to_string(),
            position: Position { x, y },
            agent_id: "a1".to_string(),
            configuration: Default::default(),
        }
    }

    #[test]
    fn connect_handle_is_the_bottom_strip() {
        let node = agent_node("n1", 100.0, 100.0);
        let mid_y = 100.0 + DEFAULT_NODE_HEIGHT / 2.0;
        let handle_y = 100.0 + DEFAULT_NODE_HEIGHT - 2.0;

        assert!(hit_node(&node, 150.0, mid_y));
        assert!(!hit_connect_handle(&node, 150.0, mid_y));
        assert!(hit_connect_handle(&node, 150.0, handle_y));
    }

    #[test]
    fn topmost_node_wins_overlapping_hits() {
        let nodes = vec![agent_node("under", 100.0, 100.0), agent_node("over", 150.0, 120.0)];
        let hit = node_at(&nodes, 160.0, 130.0);
        assert_eq!(hit.map(DagNode::id), Some("over"));
    }

    #[test]
    fn miss_returns_none() {
        let nodes = vec![agent_node("n1", 100.0, 100.0)];
        assert!(node_at(&nodes, 5.0, 5.0).is_none());
    }
}
