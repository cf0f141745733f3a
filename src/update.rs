// src/update.rs
//
// Root reducer. Delegates to the domain reducers in order; whichever one
// consumes the message short-circuits. Only cross-cutting messages are
// handled here directly.

use crate::messages::{Command, Message};
use crate::state::{ActiveView, AppState};

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    if crate::reducers::agents::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::chat::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::workflows::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::editor::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::integrations::update(state, &msg, &mut commands) {
        return commands;
    }

    match msg {
        Message::ToggleView(view) => {
            // Leaving the editor drops its working copy.
            if matches!(state.active_view, ActiveView::WorkflowEditor(_))
                && !matches!(view, ActiveView::WorkflowEditor(_))
            {
                state.editor.reset();
            }
            state.active_view = view.clone();
            match &view {
                ActiveView::Agents => commands.push(Command::FetchAgents),
                ActiveView::Workflows => commands.push(Command::FetchWorkflows),
                ActiveView::Integrations => {
                    commands.push(Command::FetchIntegrations);
                    commands.push(Command::FetchAvailableProviders);
                }
                ActiveView::WorkflowEditor(_) => {}
            }
            commands.push(Command::Render);
        }

        Message::ImportDefinitions(files) => {
            commands.push(Command::RunBootstrap(files));
        }

        other => {
            web_sys::console::warn_1(&format!("unhandled message: {:?}", other).into());
        }
    }

    commands
}
