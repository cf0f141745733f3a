//! Workflow table and workflow form reducer.
//!
//! Inline toggles and schedule changes are optimistic at the command level
//! only: the store keeps the old value until the server round-trip comes
//! back as `WorkflowUpdated`.

use crate::messages::{Command, Message};
use crate::models::Workflow;
use crate::state::AppState;

/// Returns `true` when the message was handled here.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::WorkflowsLoaded(workflows) => {
            state.replace_workflows(workflows.clone());
            cmds.push(Command::Render);
            true
        }

        Message::OpenWorkflowForm(editing_id) => {
            state.workflow_form.open = true;
            state.workflow_form.editing_id = editing_id.clone();
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::workflow_form_modal::open,
            )));
            true
        }

        Message::CloseWorkflowForm => {
            state.workflow_form.open = false;
            state.workflow_form.editing_id = None;
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::workflow_form_modal::close,
            )));
            true
        }

        Message::SubmitWorkflowForm {
            name,
            description,
            schedule,
        } => {
            match state.workflow_form.editing_id.clone() {
                Some(id) => {
                    if let Some(existing) = state.workflow(&id) {
                        let mut updated = existing.clone();
                        updated.name = name.clone();
                        updated.description = description.clone();
                        updated.schedule = *schedule;
                        cmds.push(Command::UpdateWorkflow(Box::new(updated)));
                    }
                }
                None => {
                    let draft = Workflow {
                        name: name.clone(),
                        description: description.clone(),
                        schedule: *schedule,
                        ..Workflow::default()
                    };
                    cmds.push(Command::CreateWorkflow(Box::new(draft)));
                }
            }
            true
        }

        Message::WorkflowCreated(workflow) => {
            state.upsert_workflow((**workflow).clone());
            state.workflow_form.open = false;
            state.workflow_form.editing_id = None;
            crate::toast::success(&format!("Workflow '{}' created", workflow.name));
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::workflow_form_modal::close,
            )));
            cmds.push(Command::Render);
            true
        }

        Message::WorkflowUpdated(workflow) => {
            state.update_workflow((**workflow).clone());
            state.workflow_form.open = false;
            state.workflow_form.editing_id = None;
            // The editor keeps its own working copy; only the table re-renders.
            cmds.push(Command::Render);
            true
        }

        Message::RequestWorkflowDeletion { workflow_id } => {
            // Nothing is deleted until the user confirms in the dialog.
            let name = state
                .workflow(workflow_id)
                .map(|w| w.name.clone())
                .unwrap_or_else(|| workflow_id.clone());
            let workflow_id = workflow_id.clone();
            cmds.push(Command::UpdateUI(Box::new(move || {
                if crate::dom_utils::confirm(&format!("Delete workflow '{}'?", name)) {
                    crate::state::dispatch_global_message(Message::ConfirmedWorkflowDeletion {
                        workflow_id,
                    });
                }
            })));
            true
        }

        Message::ConfirmedWorkflowDeletion { workflow_id } => {
            cmds.push(Command::DeleteWorkflow {
                workflow_id: workflow_id.clone(),
            });
            true
        }

        Message::WorkflowDeleted { workflow_id } => {
            state.remove_workflow(workflow_id);
            crate::toast::info("Workflow deleted");
            cmds.push(Command::Render);
            true
        }

        Message::ToggleWorkflowStatus { workflow_id } => {
            if let Some(existing) = state.workflow(workflow_id) {
                let mut updated = existing.clone();
                updated.status = updated.status.toggled();
                cmds.push(Command::UpdateWorkflow(Box::new(updated)));
            }
            true
        }

        Message::ChangeWorkflowSchedule {
            workflow_id,
            schedule,
        } => {
            if let Some(existing) = state.workflow(workflow_id) {
                if existing.schedule != *schedule {
                    let mut updated = existing.clone();
                    updated.schedule = *schedule;
                    cmds.push(Command::UpdateWorkflow(Box::new(updated)));
                }
            }
            true
        }

        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Schedule, WorkflowStatus};

    fn sample_workflow(id: &str, status: WorkflowStatus) -> Workflow {
        Workflow {
            id: id.to_string(),
            name: format!("wf-{}", id),
            status,
            ..Workflow::default()
        }
    }

    fn toggle(state: &mut AppState, id: &str) -> Vec<Command> {
        let mut cmds = Vec::new();
        update(
            state,
            &Message::ToggleWorkflowStatus {
                workflow_id: id.to_string(),
            },
            &mut cmds,
        );
        cmds
    }

    #[test]
    fn delete_request_waits_for_confirmation() {
        let mut state = AppState::new();
        state.upsert_workflow(sample_workflow("w1", WorkflowStatus::Inactive));

        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::RequestWorkflowDeletion {
                workflow_id: "w1".to_string(),
            },
            &mut cmds,
        );
        assert!(matches!(cmds.as_slice(), [Command::UpdateUI(_)]));

        cmds.clear();
        update(
            &mut state,
            &Message::ConfirmedWorkflowDeletion {
                workflow_id: "w1".to_string(),
            },
            &mut cmds,
        );
        assert!(matches!(
            cmds.as_slice(),
            [Command::DeleteWorkflow { workflow_id }] if workflow_id == "w1"
        ));
    }

    #[test]
    fn toggle_emits_update_with_flipped_status_without_touching_store() {
        let mut state = AppState::new();
        state.upsert_workflow(sample_workflow("w1", WorkflowStatus::Inactive));

        let cmds = toggle(&mut state, "w1");

        match cmds.as_slice() {
            [Command::UpdateWorkflow(w)] => assert_eq!(w.status, WorkflowStatus::Active),
            other => panic!("expected one UpdateWorkflow, got {:?}", other),
        }
        assert_eq!(state.workflows[0].status, WorkflowStatus::Inactive);
    }

    #[test]
    fn late_update_ack_does_not_resurrect_a_deleted_workflow() {
        let mut state = AppState::new();
        let workflow = sample_workflow("w1", WorkflowStatus::Inactive);
        state.upsert_workflow(workflow.clone());

        // The delete ack has already pruned the record.
        state.remove_workflow("w1");
        assert!(state.workflows.is_empty());

        // An update issued before the delete lands afterwards.
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::WorkflowUpdated(Box::new(workflow)),
            &mut cmds,
        );
        assert!(state.workflows.is_empty());
    }

    #[test]
    fn toggling_twice_issues_exactly_two_remote_updates() {
        let mut state = AppState::new();
        state.upsert_workflow(sample_workflow("w1", WorkflowStatus::Inactive));

        let first = toggle(&mut state, "w1");
        let flipped = match first.as_slice() {
            [Command::UpdateWorkflow(w)] => (**w).clone(),
            other => panic!("expected one UpdateWorkflow, got {:?}", other),
        };

        // Server acknowledges the first toggle.
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::WorkflowUpdated(Box::new(flipped)),
            &mut cmds,
        );
        assert_eq!(state.workflows[0].status, WorkflowStatus::Active);

        let second = toggle(&mut state, "w1");

        let remote_updates = first
            .iter()
            .chain(second.iter())
            .filter(|c| matches!(c, Command::UpdateWorkflow(_)))
            .count();
        assert_eq!(remote_updates, 2);
        match second.as_slice() {
            [Command::UpdateWorkflow(w)] => assert_eq!(w.status, WorkflowStatus::Inactive),
            other => panic!("expected one UpdateWorkflow, got {:?}", other),
        }
    }

    #[test]
    fn schedule_change_to_same_value_is_a_no_op() {
        let mut state = AppState::new();
        state.upsert_workflow(sample_workflow("w1", WorkflowStatus::Active));

        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::ChangeWorkflowSchedule {
                workflow_id: "w1".to_string(),
                schedule: Schedule::Daily,
            },
            &mut cmds,
        );
        assert!(cmds.is_empty());

        update(
            &mut state,
            &Message::ChangeWorkflowSchedule {
                workflow_id: "w1".to_string(),
                schedule: Schedule::Weekly,
            },
            &mut cmds,
        );
        match cmds.as_slice() {
            [Command::UpdateWorkflow(w)] => assert_eq!(w.schedule, Schedule::Weekly),
            other => panic!("expected one UpdateWorkflow, got {:?}", other),
        }
    }

    #[test]
    fn toggle_of_unknown_workflow_is_ignored() {
        let mut state = AppState::new();
        let cmds = toggle(&mut state, "missing");
        assert!(cmds.is_empty());
    }
}
