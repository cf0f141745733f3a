//! Integrations reducer: provider cards, Snowflake credential checks and the
//! Google Drive connection status.

use crate::messages::{Command, Message};
use crate::models::IntegrationStatus;
use crate::state::AppState;

pub const GOOGLE_DRIVE_PROVIDER: &str = "google-drive";
pub const SNOWFLAKE_PROVIDER: &str = "snowflake";

/// Returns `true` when the message was handled here.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::IntegrationsLoaded(integrations) => {
            state.replace_integrations(integrations.clone());
            state.drive_connected = state
                .integration_by_provider(GOOGLE_DRIVE_PROVIDER)
                .map(|i| i.status == IntegrationStatus::Active)
                .unwrap_or(false);
            cmds.push(Command::Render);
            true
        }

        Message::AvailableProvidersLoaded(providers) => {
            state.available_providers = providers.clone();
            cmds.push(Command::Render);
            true
        }

        Message::SaveIntegration(integration) => {
            let cmd = if integration.id.is_some() {
                Command::UpdateIntegration(integration.clone())
            } else {
                Command::CreateIntegration(integration.clone())
            };
            cmds.push(cmd);
            true
        }

        Message::IntegrationSaved => {
            crate::toast::success("Integration saved");
            cmds.push(Command::FetchIntegrations);
            true
        }

        Message::RequestIntegrationDeletion { integration_id } => {
            // Nothing is deleted until the user confirms in the dialog.
            let integration_id = integration_id.clone();
            cmds.push(Command::UpdateUI(Box::new(move || {
                if crate::dom_utils::confirm("Remove this integration?") {
                    crate::state::dispatch_global_message(
                        Message::ConfirmedIntegrationDeletion { integration_id },
                    );
                }
            })));
            true
        }

        Message::ConfirmedIntegrationDeletion { integration_id } => {
            cmds.push(Command::DeleteIntegration {
                integration_id: integration_id.clone(),
            });
            true
        }

        Message::IntegrationDeleted => {
            crate::toast::info("Integration removed");
            cmds.push(Command::FetchIntegrations);
            true
        }

        Message::TestSnowflakeConnection(config) => {
            // All six fields are checked locally before anything goes over
            // the wire.
            let missing = config.missing_fields();
            if missing.is_empty() {
                cmds.push(Command::TestSnowflake(config.clone()));
            } else {
                let text = format!("Missing required fields: {}", missing.join(", "));
                cmds.push(Command::UpdateUI(Box::new(move || {
                    crate::toast::error(&text);
                })));
            }
            true
        }

        Message::SnowflakeTestSucceeded => {
            crate::toast::success("Snowflake connection OK");
            true
        }

        Message::SnowflakeTestFailed(err) => {
            crate::toast::error(&format!("Snowflake connection failed: {}", err));
            true
        }

        Message::DriveOauthCompleted => {
            cmds.push(Command::CheckDriveStatus);
            true
        }

        Message::DriveStatusChecked { connected } => {
            let was_connected = state.drive_connected;
            state.drive_connected = *connected;
            if *connected {
                // Any poll still running belongs to a finished attempt.
                state.drive_poll_generation = state.drive_poll_generation.wrapping_add(1);
                if let Some(slot) = state
                    .integrations
                    .iter_mut()
                    .find(|i| i.provider == GOOGLE_DRIVE_PROVIDER)
                {
                    slot.status = IntegrationStatus::Active;
                }
                if !was_connected {
                    crate::toast::success("Google Drive connected");
                }
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
    use crate::models::{Integration, SnowflakeConfig};

    fn full_config() -> SnowflakeConfig {
        SnowflakeConfig {
            account: "acme".to_string(),
            username: "reporter".to_string(),
            password: "hunter2".to_string(),
            database: "analytics".to_string(),
            schema: "public".to_string(),
            warehouse: "wh1".to_string(),
        }
    }

    #[test]
    fn complete_config_goes_over_the_wire() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::TestSnowflakeConnection(Box::new(full_config())),
            &mut cmds,
        );
        assert!(matches!(cmds.as_slice(), [Command::TestSnowflake(_)]));
    }

    #[test]
    fn missing_fields_are_rejected_without_a_network_call() {
        let mut state = AppState::new();
        let mut config = full_config();
        config.password = "  ".to_string();
        config.warehouse = String::new();

        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::TestSnowflakeConnection(Box::new(config)),
            &mut cmds,
        );

        assert!(
            !cmds.iter().any(|c| matches!(c, Command::TestSnowflake(_))),
            "validation failure must not reach the network"
        );
        assert!(matches!(cmds.as_slice(), [Command::UpdateUI(_)]));
    }

    #[test]
    fn unknown_providers_hide_their_cards() {
        let mut state = AppState::new();
        // Nothing loaded yet: every provider is assumed available.
        assert!(state.provider_available(SNOWFLAKE_PROVIDER));
        assert!(state.provider_available(GOOGLE_DRIVE_PROVIDER));

        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::AvailableProvidersLoaded(vec![SNOWFLAKE_PROVIDER.to_string()]),
            &mut cmds,
        );

        assert!(state.provider_available(SNOWFLAKE_PROVIDER));
        assert!(!state.provider_available(GOOGLE_DRIVE_PROVIDER));
        assert!(matches!(cmds.as_slice(), [Command::Render]));
    }

    #[test]
    fn save_picks_create_or_update_by_id() {
        let mut state = AppState::new();
        let new = Integration {
            id: None,
            provider: SNOWFLAKE_PROVIDER.to_string(),
            name: "Snowflake".to_string(),
            kind: "warehouse".to_string(),
            description: String::new(),
            status: Default::default(),
            config: Default::default(),
        };
        let mut cmds = Vec::new();
        update(&mut state, &Message::SaveIntegration(Box::new(new.clone())), &mut cmds);
        assert!(matches!(cmds.as_slice(), [Command::CreateIntegration(_)]));

        let saved = Integration {
            id: Some("i1".to_string()),
            ..new
        };
        cmds.clear();
        update(&mut state, &Message::SaveIntegration(Box::new(saved)), &mut cmds);
        assert!(matches!(cmds.as_slice(), [Command::UpdateIntegration(_)]));
    }

    #[test]
    fn oauth_completion_checks_status_exactly_once() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();
        update(&mut state, &Message::DriveOauthCompleted, &mut cmds);
        assert!(matches!(cmds.as_slice(), [Command::CheckDriveStatus]));
    }

    #[test]
    fn loading_integrations_derives_drive_status() {
        let mut state = AppState::new();
        let drive = Integration {
            id: Some("i9".to_string()),
            provider: GOOGLE_DRIVE_PROVIDER.to_string(),
            name: "Google Drive".to_string(),
            kind: "storage".to_string(),
            description: String::new(),
            status: crate::models::IntegrationStatus::Active,
            config: Default::default(),
        };
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::IntegrationsLoaded(vec![drive]),
            &mut cmds,
        );
        assert!(state.drive_connected);
    }
}
