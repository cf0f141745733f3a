//! Chat panel reducer. One agent per panel; one in-flight message at a time.

use crate::messages::{Command, Message};
use crate::models::{now_iso, ChatMessage, ChatRole};
use crate::state::AppState;

/// Returns `true` when the message was handled here.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::OpenChat { agent_id } => {
            if state.agent(agent_id).is_none() {
                return true;
            }
            if state.chat.agent_id.as_deref() != Some(agent_id.as_str()) {
                state.chat.messages.clear();
            }
            state.chat.open = true;
            state.chat.agent_id = Some(agent_id.clone());
            state.chat.waiting = false;
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::chat_panel::open,
            )));
            true
        }

        Message::CloseChat => {
            // The transcript lives only as long as the panel is open.
            state.chat.open = false;
            state.chat.messages.clear();
            state.chat.waiting = false;
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::chat_panel::close,
            )));
            true
        }

        Message::SendChatMessage(text) => {
            let agent_id = match state.chat.agent_id.clone() {
                Some(id) => id,
                None => return true,
            };
            let trimmed = text.trim();
            if trimmed.is_empty() || state.chat.waiting {
                return true;
            }
            state.chat.messages.push(ChatMessage {
                role: ChatRole::User,
                content: trimmed.to_string(),
                timestamp: now_iso(),
            });
            state.chat.waiting = true;
            cmds.push(Command::SendChat {
                agent_id,
                message: trimmed.to_string(),
            });
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::chat_panel::refresh_messages,
            )));
            true
        }

        Message::ChatReplyReceived(reply) => {
            state.chat.messages.push(ChatMessage {
                role: ChatRole::Assistant,
                content: reply.clone(),
                timestamp: now_iso(),
            });
            state.chat.waiting = false;
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::chat_panel::refresh_messages,
            )));
            true
        }

        Message::ChatFailed(err) => {
            state.chat.waiting = false;
            crate::toast::error(&format!("Chat failed: {}", err));
            cmds.push(Command::UpdateUI(Box::new(
                crate::components::chat_panel::refresh_messages,
            )));
            true
        }

        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Agent;

    fn state_with_open_chat() -> AppState {
        let mut state = AppState::new();
        let mut agent = Agent::default();
        agent.id = "a1".to_string();
        state.insert_agent(agent);
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::OpenChat {
                agent_id: "a1".to_string(),
            },
            &mut cmds,
        );
        state
    }

    #[test]
    fn empty_or_whitespace_messages_are_not_sent() {
        let mut state = state_with_open_chat();
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::SendChatMessage("   ".to_string()),
            &mut cmds,
        );
        assert!(state.chat.messages.is_empty());
        assert!(cmds.is_empty());
    }

    #[test]
    fn second_send_while_waiting_is_dropped() {
        let mut state = state_with_open_chat();
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::SendChatMessage("first".to_string()),
            &mut cmds,
        );
        assert!(state.chat.waiting);

        update(
            &mut state,
            &Message::SendChatMessage("second".to_string()),
            &mut cmds,
        );
        let sends = cmds
            .iter()
            .filter(|c| matches!(c, Command::SendChat { .. }))
            .count();
        assert_eq!(sends, 1);
        assert_eq!(state.chat.messages.len(), 1);
    }

    #[test]
    fn reply_appends_and_clears_waiting() {
        let mut state = state_with_open_chat();
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::SendChatMessage("hello".to_string()),
            &mut cmds,
        );
        update(
            &mut state,
            &Message::ChatReplyReceived("hi there".to_string()),
            &mut cmds,
        );

        assert!(!state.chat.waiting);
        assert_eq!(state.chat.messages.len(), 2);
        assert_eq!(state.chat.messages[1].role, ChatRole::Assistant);
        assert_eq!(state.chat.messages[1].content, "hi there");
        // Both bubbles carry a timestamp for the transcript to show.
        assert!(state.chat.messages.iter().all(|m| !m.timestamp.is_empty()));
    }

    #[test]
    fn closing_the_panel_drops_the_transcript() {
        let mut state = state_with_open_chat();
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::SendChatMessage("hello".to_string()),
            &mut cmds,
        );
        update(&mut state, &Message::CloseChat, &mut cmds);
        update(
            &mut state,
            &Message::OpenChat {
                agent_id: "a1".to_string(),
            },
            &mut cmds,
        );

        assert!(state.chat.messages.is_empty());
        assert!(!state.chat.waiting);
    }

    #[test]
    fn switching_agents_clears_the_transcript() {
        let mut state = state_with_open_chat();
        let mut agent = Agent::default();
        agent.id = "a2".to_string();
        state.insert_agent(agent);

        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::SendChatMessage("hello".to_string()),
            &mut cmds,
        );
        update(
            &mut state,
            &Message::OpenChat {
                agent_id: "a2".to_string(),
            },
            &mut cmds,
        );

        assert!(state.chat.messages.is_empty());
        assert_eq!(state.chat.agent_id.as_deref(), Some("a2"));
    }
}
