//! Agent list and agent form reducer.

use crate::messages::{Command, Message};
use crate::state::AppState;

/// Returns `true` when the message was handled here.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::AgentsLoaded(agents) => {
            state.replace_agents(agents.clone());
            cmds.push(Command::Render);
            true
        }

        Message::AgentFetched(agent) => {
            state.upsert_agent((**agent).clone());
            cmds.push(Command::Render);
            true
        }

        Message::ModelsLoaded(models) => {
            state.available_models = models.clone();
            true
        }

        Message::OpenAgentForm(editing_id) => {
            state.agent_form.open = true;
            state.agent_form.editing_id = editing_id.clone();
            state.agent_form.avatar_mode = crate::messages::AvatarMode::Glyph;
            state.agent_form.avatar = match editing_id
                .as_deref()
                .and_then(|id| state.agent(id))
            {
                Some(agent) => agent.avatar.clone(),
                None => Default::default(),
            };
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::agent_form_modal::open,
            )));
            true
        }

        Message::CloseAgentForm => {
            state.agent_form.open = false;
            state.agent_form.editing_id = None;
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::agent_form_modal::close,
            )));
            true
        }

        Message::SetAvatarMode(mode) => {
            // The previously chosen avatar survives a mode switch.
            state.agent_form.avatar_mode = *mode;
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::agent_form_modal::refresh_avatar_section,
            )));
            true
        }

        Message::AvatarPicked(avatar) => {
            state.agent_form.avatar = avatar.clone();
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::agent_form_modal::refresh_avatar_section,
            )));
            true
        }

        Message::SubmitAgentForm(form) => {
            if form.narrative.trim().is_empty() {
                cmds.push(Command::UpdateUI(Box::new(|| {
                    crate::toast::error("A narrative is required");
                })));
                return true;
            }
            match state.agent_form.editing_id.clone() {
                Some(id) => {
                    // Merge the form into the stored agent and PUT the result.
                    if let Some(existing) = state.agent(&id) {
                        let mut updated = existing.clone();
                        updated.name = form.name.clone();
                        updated.description = form.description.clone();
                        updated.narrative = form.narrative.clone();
                        updated.avatar = form.avatar.clone();
                        updated.config = form.config.clone();
                        cmds.push(Command::UpdateAgent(Box::new(updated)));
                    }
                }
                None => {
                    cmds.push(Command::CreateAgent(Box::new(form.clone())));
                }
            }
            true
        }

        Message::AgentCreated(agent) => {
            state.insert_agent((**agent).clone());
            state.agent_form.open = false;
            state.agent_form.editing_id = None;
            crate::toast::success(&format!("Agent '{}' created", agent.name));
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::agent_form_modal::close,
            )));
            cmds.push(Command::Render);
            true
        }

        Message::AgentUpdated(agent) => {
            state.update_agent((**agent).clone());
            state.agent_form.open = false;
            state.agent_form.editing_id = None;
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::agent_form_modal::close,
            )));
            cmds.push(Command::Render);
            true
        }

        Message::RequestAgentDeletion { agent_id } => {
            // Nothing is deleted until the user confirms in the dialog.
            let name = state
                .agent(agent_id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| agent_id.clone());
            let agent_id = agent_id.clone();
            cmds.push(Command::UpdateUI(Box::new(move || {
                if crate::dom_utils::confirm(&format!("Delete agent '{}'?", name)) {
                    crate::state::dispatch_global_message(Message::ConfirmedAgentDeletion {
                        agent_id,
                    });
                }
            })));
            true
        }

        Message::ConfirmedAgentDeletion { agent_id } => {
            cmds.push(Command::DeleteAgent {
                agent_id: agent_id.clone(),
            });
            true
        }

        Message::AgentDeleted { agent_id } => {
            state.remove_agent(agent_id);
            if state.chat.agent_id.as_deref() == Some(agent_id.as_str()) {
                state.chat = Default::default();
            }
            cmds.push(Command::Render);
            true
        }

        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Message;
    use crate::models::{Agent, AgentFormData, Avatar};
    use crate::state::AppState;

    fn sample_agent(id: &str, name: &str) -> Agent {
        let mut agent = Agent::default();
        agent.id = id.to_string();
        agent.name = name.to_string();
        agent
    }

    #[test]
    fn loaded_agents_replace_the_list() {
        let mut state = AppState::new();
        state.insert_agent(sample_agent("old", "Old"));

        let mut cmds = Vec::new();
        let consumed = update(
            &mut state,
            &Message::AgentsLoaded(vec![sample_agent("a1", "Scout")]),
            &mut cmds,
        );

        assert!(consumed);
        assert_eq!(state.agents.len(), 1);
        assert_eq!(state.agents[0].id, "a1");
    }

    #[test]
    fn submit_with_editing_id_merges_into_existing_agent() {
        let mut state = AppState::new();
        let mut agent = sample_agent("a1", "Scout");
        agent.status = crate::models::AgentStatus::Busy;
        state.insert_agent(agent);
        state.agent_form.open = true;
        state.agent_form.editing_id = Some("a1".to_string());

        let form = AgentFormData {
            name: "Scout II".to_string(),
            description: "patrols".to_string(),
            narrative: "You patrol the perimeter.".to_string(),
            avatar: Avatar::Emoji("🦉".to_string()),
            config: Default::default(),
        };

        let mut cmds = Vec::new();
        update(&mut state, &Message::SubmitAgentForm(form), &mut cmds);

        match cmds.as_slice() {
            [Command::UpdateAgent(updated)] => {
                assert_eq!(updated.name, "Scout II");
                // Fields outside the form are preserved.
                assert_eq!(updated.status, crate::models::AgentStatus::Busy);
            }
            other => panic!("expected a single UpdateAgent command, got {:?}", other),
        }
        // The store waits for the server round-trip.
        assert_eq!(state.agents[0].name, "Scout");
    }

    #[test]
    fn edited_flags_and_token_limit_reach_the_update() {
        let mut state = AppState::new();
        state.insert_agent(sample_agent("a1", "Scout"));
        state.agent_form.open = true;
        state.agent_form.editing_id = Some("a1".to_string());

        let form = AgentFormData {
            name: "Scout".to_string(),
            description: String::new(),
            narrative: "You patrol the perimeter.".to_string(),
            avatar: Avatar::default(),
            config: crate::models::ModelConfig {
                model: "gpt-4o".to_string(),
                temperature: 0.2,
                max_tokens: Some(2048),
                use_rag: Some(true),
                use_direct_query: Some(false),
            },
        };

        let mut cmds = Vec::new();
        update(&mut state, &Message::SubmitAgentForm(form), &mut cmds);

        match cmds.as_slice() {
            [Command::UpdateAgent(updated)] => {
                assert_eq!(updated.config.max_tokens, Some(2048));
                assert_eq!(updated.config.use_rag, Some(true));
                assert_eq!(updated.config.use_direct_query, Some(false));
            }
            other => panic!("expected a single UpdateAgent command, got {:?}", other),
        }
    }

    #[test]
    fn delete_request_waits_for_confirmation() {
        let mut state = AppState::new();
        state.insert_agent(sample_agent("a1", "Scout"));

        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::RequestAgentDeletion {
                agent_id: "a1".to_string(),
            },
            &mut cmds,
        );

        // Only the confirmation dialog runs; the remote delete needs an
        // explicit confirmed message.
        assert!(matches!(cmds.as_slice(), [Command::UpdateUI(_)]));

        cmds.clear();
        update(
            &mut state,
            &Message::ConfirmedAgentDeletion {
                agent_id: "a1".to_string(),
            },
            &mut cmds,
        );
        assert!(matches!(
            cmds.as_slice(),
            [Command::DeleteAgent { agent_id }] if agent_id == "a1"
        ));
    }

    #[test]
    fn submit_with_blank_narrative_is_blocked() {
        let mut state = AppState::new();
        state.agent_form.open = true;

        let form = AgentFormData {
            name: "Scout".to_string(),
            description: String::new(),
            narrative: "   ".to_string(),
            avatar: Avatar::default(),
            config: Default::default(),
        };

        let mut cmds = Vec::new();
        update(&mut state, &Message::SubmitAgentForm(form), &mut cmds);

        assert!(
            !cmds
                .iter()
                .any(|c| matches!(c, Command::CreateAgent(_) | Command::UpdateAgent(_))),
            "blank narrative must not reach the network"
        );
        assert!(matches!(cmds.as_slice(), [Command::UpdateUI(_)]));
    }

    #[test]
    fn update_success_replaces_in_place_keeping_order() {
        let mut state = AppState::new();
        state.insert_agent(sample_agent("a1", "First"));
        state.insert_agent(sample_agent("a2", "Second"));
        state.insert_agent(sample_agent("a3", "Third"));

        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::AgentUpdated(Box::new(sample_agent("a2", "Renamed"))),
            &mut cmds,
        );

        let names: Vec<&str> = state.agents.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Renamed", "Third"]);
    }

    #[test]
    fn deleting_the_chat_agent_closes_the_chat() {
        let mut state = AppState::new();
        state.insert_agent(sample_agent("a1", "Scout"));
        state.chat.open = true;
        state.chat.agent_id = Some("a1".to_string());

        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::AgentDeleted {
                agent_id: "a1".to_string(),
            },
            &mut cmds,
        );

        assert!(state.agents.is_empty());
        assert!(!state.chat.open);
        assert!(state.chat.agent_id.is_none());
    }

    #[test]
    fn avatar_mode_switch_keeps_picked_avatar() {
        let mut state = AppState::new();
        state.agent_form.open = true;
        state.agent_form.avatar = Avatar::Image("data:image/png;base64,AAAA".to_string());

        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::SetAvatarMode(crate::messages::AvatarMode::Glyph),
            &mut cmds,
        );

        assert_eq!(
            state.agent_form.avatar,
            Avatar::Image("data:image/png;base64,AAAA".to_string())
        );
    }
}
