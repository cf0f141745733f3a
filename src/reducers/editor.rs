//! Canvas editor reducer: editor lifecycle, node dragging, edge drawing,
//! and the node configuration modal.

use serde_json::Value;
use uuid::Uuid;

use crate::constants::{NEW_NODE_X, NEW_NODE_Y};
use crate::messages::{Command, Message, NodeConfigDraft};
use crate::models::{now_iso, Dag, DagEdge, DagNode, Position};
use crate::state::{ActiveView, AppState, ConnectState, DragState, EditorLoad};

fn refresh_canvas() -> Command {
    Command::UpdateUI(Box::new(crate::components::dag_editor::refresh))
}

/// Pull the editor's working copy back out as a storable DAG.
pub fn editor_dag(state: &AppState) -> Dag {
    Dag {
        nodes: state.editor.nodes.clone(),
        edges: state.editor.edges.clone(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Returns `true` when the message was handled here.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::OpenWorkflowEditor { workflow_id } => {
            // Re-opening the editor for the workflow already loaded (or
            // loading) must not refetch and wipe unsaved work.
            let already = state.editor.workflow_id.as_deref() == Some(workflow_id.as_str())
                && state.editor.load != EditorLoad::Unloaded;
            state.active_view = ActiveView::WorkflowEditor(workflow_id.clone());
            if !already {
                state.editor.reset();
                state.editor.workflow_id = Some(workflow_id.clone());
                state.editor.load = EditorLoad::Loading;
                cmds.push(Command::FetchWorkflow {
                    workflow_id: workflow_id.clone(),
                });
            }
            cmds.push(Command::Render);
            true
        }

        Message::EditorWorkflowLoaded(workflow) => {
            // Drop stale responses: the editor may have moved on to another
            // workflow (or closed) while this fetch was in flight.
            if state.editor.workflow_id.as_deref() != Some(workflow.id.as_str())
                || state.editor.load != EditorLoad::Loading
            {
                return true;
            }
            state.upsert_workflow((**workflow).clone());
            state.editor.nodes = workflow.dag.nodes.clone();
            state.editor.edges = workflow.dag.edges.clone();
            state.editor.load = EditorLoad::Loaded;
            state.editor.dirty = false;
            // Agent nodes can reference agents missing from the roster;
            // fetch them so their placeholder labels resolve.
            for node in &state.editor.nodes {
                if let DagNode::Agent { agent_id, .. } = node {
                    if state.agent(agent_id).is_none() {
                        cmds.push(Command::FetchAgent {
                            agent_id: agent_id.clone(),
                        });
                    }
                }
            }
            cmds.push(Command::Render);
            true
        }

        Message::EditorLoadFailed(err) => {
            crate::toast::error(&format!("Failed to load workflow: {}", err));
            state.editor.reset();
            state.active_view = ActiveView::Workflows;
            cmds.push(Command::Render);
            true
        }

        Message::CloseWorkflowEditor => {
            state.editor.reset();
            state.node_modal = Default::default();
            state.active_view = ActiveView::Workflows;
            cmds.push(Command::FetchWorkflows);
            cmds.push(Command::Render);
            true
        }

        Message::AddAgentNode { agent_id } => {
            if state.editor.load != EditorLoad::Loaded {
                return true;
            }
            // Stagger new nodes so they do not stack on one spot.
            let n = state.editor.nodes.len() as f64;
            let node = DagNode::Agent {
                id: format!("node-{}", Uuid::new_v4()),
                position: Position {
                    x: NEW_NODE_X + n * 30.0,
                    y: NEW_NODE_Y + n * 30.0,
                },
                agent_id: agent_id.clone(),
                configuration: Default::default(),
            };
            state.editor.selected_node_id = Some(node.id().to_string());
            state.editor.nodes.push(node);
            state.editor.dirty = true;
            cmds.push(refresh_canvas());
            true
        }

        Message::StartNodeDrag {
            node_id,
            offset_x,
            offset_y,
        } => {
            if state.editor.node(node_id).is_some() {
                state.editor.selected_node_id = Some(node_id.clone());
                state.editor.dragging = Some(DragState {
                    node_id: node_id.clone(),
                    offset_x: *offset_x,
                    offset_y: *offset_y,
                });
                cmds.push(refresh_canvas());
            }
            true
        }

        Message::UpdateNodePosition { node_id, x, y } => {
            if let Some(node) = state.editor.node_mut(node_id) {
                node.set_position(*x, *y);
                state.editor.dirty = true;
                cmds.push(refresh_canvas());
            }
            true
        }

        Message::StopNodeDrag => {
            state.editor.dragging = None;
            true
        }

        Message::StartConnection { source_id, x, y } => {
            if state.editor.node(source_id).is_some() {
                state.editor.connecting = Some(ConnectState {
                    source_id: source_id.clone(),
                    cursor_x: *x,
                    cursor_y: *y,
                });
                cmds.push(refresh_canvas());
            }
            true
        }

        Message::UpdateConnectionCursor { x, y } => {
            if let Some(conn) = state.editor.connecting.as_mut() {
                conn.cursor_x = *x;
                conn.cursor_y = *y;
                cmds.push(refresh_canvas());
            }
            true
        }

        Message::CompleteConnection { target_id } => {
            if let Some(conn) = state.editor.connecting.take() {
                cmds.push(Command::SendMessage(Message::AddEdge {
                    source: conn.source_id,
                    target: target_id.clone(),
                }));
            }
            cmds.push(refresh_canvas());
            true
        }

        Message::CancelConnection => {
            state.editor.connecting = None;
            cmds.push(refresh_canvas());
            true
        }

        Message::AddEdge { source, target } => {
            // Deliberately permissive: duplicates, self-loops and cycles are
            // all accepted and stored verbatim.
            state.editor.edges.push(DagEdge {
                id: format!("edge-{}", Uuid::new_v4()),
                source: source.clone(),
                target: target.clone(),
            });
            state.editor.dirty = true;
            cmds.push(refresh_canvas());
            true
        }

        Message::OpenNodeEditModal { node_id } => {
            let draft = match state.editor.node(node_id) {
                Some(DagNode::Agent { configuration, .. }) => {
                    let mut rest = configuration.clone();
                    rest.remove("inputs");
                    rest.remove("outputs");
                    NodeConfigDraft {
                        inputs: string_list(configuration.get("inputs")),
                        outputs: string_list(configuration.get("outputs")),
                        rest,
                    }
                }
                // Human nodes have no configuration map to edit.
                _ => return true,
            };
            state.node_modal.open = true;
            state.node_modal.node_id = Some(node_id.clone());
            state.node_modal.draft = draft;
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::node_edit_modal::open,
            )));
            true
        }

        Message::CloseNodeEditModal => {
            state.node_modal = Default::default();
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::node_edit_modal::close,
            )));
            true
        }

        Message::AddModalInput(label) => {
            state.node_modal.draft.inputs.push(label.clone());
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::node_edit_modal::refresh_lists,
            )));
            true
        }

        Message::RemoveModalInput(index) => {
            if *index < state.node_modal.draft.inputs.len() {
                state.node_modal.draft.inputs.remove(*index);
                cmds.push(Command::UpdateUI(Box::new(
                    crate::components::node_edit_modal::refresh_lists,
                )));
            }
            true
        }

        Message::AddModalOutput(label) => {
            state.node_modal.draft.outputs.push(label.clone());
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::node_edit_modal::refresh_lists,
            )));
            true
        }

        Message::RemoveModalOutput(index) => {
            if *index < state.node_modal.draft.outputs.len() {
                state.node_modal.draft.outputs.remove(*index);
                cmds.push(Command::UpdateUI(Box::new(
                    crate::components::node_edit_modal::refresh_lists,
                )));
            }
            true
        }

        Message::SaveNodeConfiguration => {
            let node_id = match state.node_modal.node_id.clone() {
                Some(id) => id,
                None => return true,
            };
            let draft = std::mem::take(&mut state.node_modal.draft);
            if let Some(DagNode::Agent { configuration, .. }) = state.editor.node_mut(&node_id) {
                let mut merged = draft.rest;
                merged.insert(
                    "inputs".to_string(),
                    Value::Array(draft.inputs.into_iter().map(Value::String).collect()),
                );
                merged.insert(
                    "outputs".to_string(),
                    Value::Array(draft.outputs.into_iter().map(Value::String).collect()),
                );
                *configuration = merged;
                state.editor.dirty = true;
            }
            state.node_modal = Default::default();
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::node_edit_modal::close,
            )));
            cmds.push(refresh_canvas());
            true
        }

        Message::SaveWorkflowDag => {
            let workflow_id = match state.editor.workflow_id.clone() {
                Some(id) => id,
                None => return true,
            };
            if let Some(existing) = state.workflow(&workflow_id) {
                let mut updated = existing.clone();
                updated.dag = editor_dag(state);
                updated.updated_at = now_iso();
                cmds.push(Command::SaveWorkflowDag(Box::new(updated)));
            }
            true
        }

        Message::WorkflowDagSaved(workflow) => {
            state.update_workflow((**workflow).clone());
            state.editor.dirty = false;
            crate::toast::success("Workflow saved");
            true
        }

        Message::WorkflowDagSaveFailed(err) => {
            crate::toast::error(&format!("Failed to save workflow: {}", err));
            true
        }

        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Workflow, WorkflowStatus};

    fn apply(state: &mut AppState, msg: Message) -> Vec<Command> {
        let mut cmds = Vec::new();
        assert!(update(state, &msg, &mut cmds), "message not consumed");
        cmds
    }

    fn loaded_editor(workflow_id: &str) -> AppState {
        let mut state = AppState::new();
        let workflow = Workflow {
            id: workflow_id.to_string(),
            name: "Nightly Report".to_string(),
            status: WorkflowStatus::Inactive,
            ..Workflow::default()
        };
        apply(
            &mut state,
            Message::OpenWorkflowEditor {
                workflow_id: workflow_id.to_string(),
            },
        );
        apply(&mut state, Message::EditorWorkflowLoaded(Box::new(workflow)));
        state
    }

    fn has_fetch(cmds: &[Command]) -> bool {
        cmds.iter()
            .any(|c| matches!(c, Command::FetchWorkflow { .. }))
    }

    #[test]
    fn opening_the_editor_fetches_exactly_once() {
        let mut state = AppState::new();
        let first = apply(
            &mut state,
            Message::OpenWorkflowEditor {
                workflow_id: "w1".to_string(),
            },
        );
        assert!(has_fetch(&first));
        assert_eq!(state.editor.load, EditorLoad::Loading);

        // A second open for the same workflow must not refetch.
        let second = apply(
            &mut state,
            Message::OpenWorkflowEditor {
                workflow_id: "w1".to_string(),
            },
        );
        assert!(!has_fetch(&second));
    }

    #[test]
    fn stale_editor_load_is_dropped() {
        let mut state = AppState::new();
        apply(
            &mut state,
            Message::OpenWorkflowEditor {
                workflow_id: "w1".to_string(),
            },
        );
        // User switched to another workflow before the first fetch landed.
        apply(
            &mut state,
            Message::OpenWorkflowEditor {
                workflow_id: "w2".to_string(),
            },
        );

        let stale = Workflow {
            id: "w1".to_string(),
            ..Workflow::default()
        };
        apply(&mut state, Message::EditorWorkflowLoaded(Box::new(stale)));

        assert_eq!(state.editor.workflow_id.as_deref(), Some("w2"));
        assert_eq!(state.editor.load, EditorLoad::Loading);
        assert!(state.editor.nodes.is_empty());
    }

    #[test]
    fn loading_a_dag_with_unknown_agents_fetches_them() {
        let mut state = AppState::new();
        let mut known = crate::models::Agent::default();
        known.id = "a1".to_string();
        state.insert_agent(known);

        let agent_node = |id: &str, agent_id: &str| DagNode::Agent {
            id: id.to_string(),
            position: Position::default(),
            agent_id: agent_id.to_string(),
            configuration: Default::default(),
        };
        let workflow = Workflow {
            id: "w1".to_string(),
            dag: Dag {
                nodes: vec![agent_node("n1", "a1"), agent_node("n2", "ghost")],
                edges: Vec::new(),
            },
            ..Workflow::default()
        };

        apply(
            &mut state,
            Message::OpenWorkflowEditor {
                workflow_id: "w1".to_string(),
            },
        );
        let cmds = apply(&mut state, Message::EditorWorkflowLoaded(Box::new(workflow)));

        let fetched: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                Command::FetchAgent { agent_id } => Some(agent_id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(fetched, ["ghost"]);
    }

    #[test]
    fn added_nodes_and_edges_survive_the_dag_round_trip() {
        let mut state = loaded_editor("w1");

        apply(
            &mut state,
            Message::AddAgentNode {
                agent_id: "a1".to_string(),
            },
        );
        apply(
            &mut state,
            Message::AddAgentNode {
                agent_id: "a2".to_string(),
            },
        );
        let (src, dst) = (
            state.editor.nodes[0].id().to_string(),
            state.editor.nodes[1].id().to_string(),
        );
        apply(
            &mut state,
            Message::AddEdge {
                source: src.clone(),
                target: dst.clone(),
            },
        );

        let dag = editor_dag(&state);
        assert_eq!(dag.nodes.len(), 2);
        assert_eq!(dag.edges.len(), 1);
        assert_eq!(dag.edges[0].source, src);
        assert_eq!(dag.edges[0].target, dst);
        assert!(state.editor.dirty);

        // Positions are staggered, not stacked.
        assert_ne!(dag.nodes[0].position(), dag.nodes[1].position());
    }

    #[test]
    fn duplicate_and_self_edges_are_accepted() {
        let mut state = loaded_editor("w1");
        apply(
            &mut state,
            Message::AddAgentNode {
                agent_id: "a1".to_string(),
            },
        );
        let id = state.editor.nodes[0].id().to_string();

        for _ in 0..2 {
            apply(
                &mut state,
                Message::AddEdge {
                    source: id.clone(),
                    target: id.clone(),
                },
            );
        }
        assert_eq!(state.editor.edges.len(), 2);
    }

    #[test]
    fn modal_removes_by_index_preserving_order() {
        let mut state = loaded_editor("w1");
        apply(
            &mut state,
            Message::AddAgentNode {
                agent_id: "a1".to_string(),
            },
        );
        let node_id = state.editor.nodes[0].id().to_string();

        apply(
            &mut state,
            Message::OpenNodeEditModal {
                node_id: node_id.clone(),
            },
        );
        for label in ["alpha", "beta", "gamma"] {
            apply(&mut state, Message::AddModalInput(label.to_string()));
        }
        apply(&mut state, Message::RemoveModalInput(1));
        assert_eq!(state.node_modal.draft.inputs, vec!["alpha", "gamma"]);

        // Out-of-range removal is a no-op.
        apply(&mut state, Message::RemoveModalInput(7));
        assert_eq!(state.node_modal.draft.inputs.len(), 2);

        apply(&mut state, Message::AddModalOutput("report".to_string()));
        apply(&mut state, Message::SaveNodeConfiguration);

        match &state.editor.nodes[0] {
            DagNode::Agent { configuration, .. } => {
                assert_eq!(
                    configuration.get("inputs"),
                    Some(&serde_json::json!(["alpha", "gamma"]))
                );
                assert_eq!(
                    configuration.get("outputs"),
                    Some(&serde_json::json!(["report"]))
                );
            }
            other => panic!("expected agent node, got {:?}", other),
        }
        assert!(!state.node_modal.open);
    }

    #[test]
    fn modal_cancel_discards_the_draft() {
        let mut state = loaded_editor("w1");
        apply(
            &mut state,
            Message::AddAgentNode {
                agent_id: "a1".to_string(),
            },
        );
        let node_id = state.editor.nodes[0].id().to_string();

        apply(&mut state, Message::OpenNodeEditModal { node_id });
        apply(&mut state, Message::AddModalInput("scratch".to_string()));
        apply(&mut state, Message::CloseNodeEditModal);

        match &state.editor.nodes[0] {
            DagNode::Agent { configuration, .. } => {
                assert!(configuration.get("inputs").is_none());
            }
            other => panic!("expected agent node, got {:?}", other),
        }
    }

    #[test]
    fn save_sends_the_current_working_copy() {
        let mut state = loaded_editor("w1");
        apply(
            &mut state,
            Message::AddAgentNode {
                agent_id: "a1".to_string(),
            },
        );

        let cmds = apply(&mut state, Message::SaveWorkflowDag);
        match cmds.as_slice() {
            [Command::SaveWorkflowDag(w)] => {
                assert_eq!(w.id, "w1");
                assert_eq!(w.dag.nodes.len(), 1);
            }
            other => panic!("expected SaveWorkflowDag, got {:?}", other),
        }
        // Dirty clears only on the acknowledged save.
        assert!(state.editor.dirty);
    }

    #[test]
    fn saving_stamps_a_fresh_update_timestamp() {
        let mut state = loaded_editor("w1");
        state.workflows[0].updated_at = "2020-01-01T00:00:00Z".to_string();

        let cmds = apply(&mut state, Message::SaveWorkflowDag);
        match cmds.as_slice() {
            [Command::SaveWorkflowDag(w)] => {
                assert_ne!(w.updated_at, "2020-01-01T00:00:00Z");
                assert!(!w.updated_at.is_empty());
            }
            other => panic!("expected SaveWorkflowDag, got {:?}", other),
        }
    }
}
