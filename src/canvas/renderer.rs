use unicode_segmentation::UnicodeSegmentation;
use web_sys::CanvasRenderingContext2d;

use crate::constants::*;
use crate::models::DagNode;
use crate::state::AppState;

use super::{input_anchor, output_anchor, shapes};

/// Repaint the whole editor canvas from the current working copy.
pub fn render(state: &AppState) {
    let context = match state.editor.context.as_ref() {
        Some(c) => c,
        None => return,
    };
    let canvas = match state.editor.canvas.as_ref() {
        Some(c) => c,
        None => return,
    };

    context.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);

    // Edges first so nodes draw over them. Dangling endpoints are skipped,
    // not errors: the stored DAG is allowed to reference missing nodes.
    for edge in &state.editor.edges {
        let source = state.editor.node(&edge.source);
        let target = state.editor.node(&edge.target);
        if let (Some(source), Some(target)) = (source, target) {
            shapes::draw_edge(context, output_anchor(source), input_anchor(target));
        }
    }

    if let Some(conn) = state.editor.connecting.as_ref() {
        if let Some(source) = state.editor.node(&conn.source_id) {
            shapes::draw_connection_preview(
                context,
                output_anchor(source),
                (conn.cursor_x, conn.cursor_y),
            );
        }
    }

    for node in &state.editor.nodes {
        let selected = state.editor.selected_node_id.as_deref() == Some(node.id());
        shapes::draw_node_rect(context, node, selected);
        shapes::draw_connect_handle(context, node);
        draw_node_label(context, state, node);
    }
}

fn draw_node_label(context: &CanvasRenderingContext2d, state: &AppState, node: &DagNode) {
    let pos = node.position();
    let label = node_label(state, node);

    context.save();
    context.set_fill_style_str("#1f2933");
    context.set_font("14px Arial");
    context.set_text_align("center");
    context.set_text_baseline("middle");
    let _ = context.fill_text(
        &label,
        pos.x + DEFAULT_NODE_WIDTH / 2.0,
        pos.y + (DEFAULT_NODE_HEIGHT - CONNECT_HANDLE_HEIGHT) / 2.0,
    );
    if let DagNode::Human { status, .. } = node {
        context.set_font("11px Arial");
        context.set_fill_style_str("#52606d");
        let _ = context.fill_text(
            status.as_str(),
            pos.x + DEFAULT_NODE_WIDTH / 2.0,
            pos.y + DEFAULT_NODE_HEIGHT - CONNECT_HANDLE_HEIGHT - 10.0,
        );
    }
    context.restore();
}

/// Display text for a node. An agent node whose agent is not (yet) in the
/// store shows a placeholder instead of an empty box.
pub fn node_label(state: &AppState, node: &DagNode) -> String {
    match node {
        DagNode::Agent { agent_id, .. } => match state.agent(agent_id) {
            Some(agent) => truncate_label(&agent.name),
            None => "Loading agent...".to_string(),
        },
        DagNode::Human { user_id, task, .. } => {
            if task.is_empty() {
                truncate_label(user_id)
            } else {
                truncate_label(task)
            }
        }
    }
}

/// Cap labels by grapheme count so emoji and combining marks do not get cut
/// mid-cluster.
pub fn truncate_label(name: &str) -> String {
    let graphemes: Vec<&str> = name.graphemes(true).collect();
    if graphemes.len() <= NODE_LABEL_MAX_GRAPHEMES {
        name.to_string()
    } else {
        let mut out: String = graphemes[..NODE_LABEL_MAX_GRAPHEMES].concat();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Agent, Position};

    fn agent_node(agent_id: &str) -> DagNode {
        DagNode::Agent {
            id: "n1".to_string(),
            position: Position::default(),
            agent_id: agent_id.to_string(),
            configuration: Default::default(),
        }
    }

    #[test]
    fn short_labels_pass_through() {
        assert_eq!(truncate_label("Scout"), "Scout");
    }

    #[test]
    fn long_labels_cut_on_grapheme_boundaries() {
        let name = "é".repeat(NODE_LABEL_MAX_GRAPHEMES + 5);
        let cut = truncate_label(&name);
        assert!(cut.ends_with('…'));
        assert_eq!(
            cut.trim_end_matches('…').graphemes(true).count(),
            NODE_LABEL_MAX_GRAPHEMES
        );
    }

    #[test]
    fn unknown_agent_gets_a_placeholder_label() {
        let state = AppState::new();
        assert_eq!(node_label(&state, &agent_node("ghost")), "Loading agent...");
    }

    #[test]
    fn known_agent_shows_its_name() {
        let mut state = AppState::new();
        let mut agent = Agent::default();
        agent.id = "a1".to_string();
        agent.name = "Reporter".to_string();
        state.insert_agent(agent);

        assert_eq!(node_label(&state, &agent_node("a1")), "Reporter");
    }
}
