// src/command_executors.rs
//
// Runs the side effects the reducers asked for. Network commands spawn a
// local future, decode the response and feed the result back in through
// `dispatch_global_message`.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

use crate::messages::{Command, Message};
use crate::models::{AgentDto, ChatRequest, ChatResponse, WorkflowDto};
use crate::network::ApiClient;
use crate::state::dispatch_global_message;

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn log_error(context: &str, e: &JsValue) {
    web_sys::console::error_1(&format!("{}: {:?}", context, e).into());
}

pub fn execute(cmd: Command) {
    match cmd {
        Command::SendMessage(msg) => dispatch_global_message(msg),

        Command::UpdateUI(f) => f(),

        Command::Render => crate::views::render_active_view(),

        // ---------------- Agents ----------------

        Command::FetchAgents => {
            spawn_local(async {
                match ApiClient::get_agents().await {
                    Ok(response) => match serde_json::from_str::<Vec<AgentDto>>(&response) {
                        Ok(dtos) => {
                            crate::debug_log!("fetched {} agents", dtos.len());
                            let agents = dtos.into_iter().map(AgentDto::normalize).collect();
                            dispatch_global_message(Message::AgentsLoaded(agents));
                        }
                        Err(e) => web_sys::console::error_1(
                            &format!("Failed to parse agents: {:?}", e).into(),
                        ),
                    },
                    Err(e) => log_error("Failed to fetch agents", &e),
                }
            });
        }

        Command::FetchAgent { agent_id } => {
            spawn_local(async move {
                match ApiClient::get_agent(&agent_id).await {
                    Ok(response) => match serde_json::from_str::<AgentDto>(&response) {
                        Ok(dto) => dispatch_global_message(Message::AgentFetched(Box::new(
                            dto.normalize(),
                        ))),
                        Err(e) => web_sys::console::error_1(
                            &format!("Failed to parse agent: {:?}", e).into(),
                        ),
                    },
                    Err(e) => log_error("Failed to fetch agent", &e),
                }
            });
        }

        Command::FetchModels => {
            spawn_local(async {
                match ApiClient::get_models().await {
                    Ok(response) => match serde_json::from_str::<Vec<String>>(&response) {
                        Ok(models) => dispatch_global_message(Message::ModelsLoaded(models)),
                        Err(e) => web_sys::console::error_1(
                            &format!("Failed to parse models: {:?}", e).into(),
                        ),
                    },
                    Err(e) => log_error("Failed to fetch models", &e),
                }
            });
        }

        Command::CreateAgent(form) => {
            spawn_local(async move {
                let payload = form.to_create_payload().to_string();
                match ApiClient::create_agent(&payload).await {
                    Ok(response) => match serde_json::from_str::<AgentDto>(&response) {
                        Ok(dto) => dispatch_global_message(Message::AgentCreated(Box::new(
                            dto.normalize(),
                        ))),
                        Err(e) => web_sys::console::error_1(
                            &format!("Failed to parse created agent: {:?}", e).into(),
                        ),
                    },
                    Err(e) => {
                        log_error("Failed to create agent", &e);
                        crate::toast::error(&format!("Failed to create agent: {}", js_err(e)));
                    }
                }
            });
        }

        Command::UpdateAgent(agent) => {
            spawn_local(async move {
                let body = match serde_json::to_string(&*agent) {
                    Ok(b) => b,
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Failed to serialize agent: {:?}", e).into(),
                        );
                        return;
                    }
                };
                match ApiClient::update_agent(&agent.id, &body).await {
                    Ok(response) => match serde_json::from_str::<AgentDto>(&response) {
                        Ok(dto) => dispatch_global_message(Message::AgentUpdated(Box::new(
                            dto.normalize(),
                        ))),
                        // Some backends return an empty body on PUT; fall
                        // back to the payload we sent.
                        Err(_) => dispatch_global_message(Message::AgentUpdated(agent)),
                    },
                    Err(e) => {
                        log_error("Failed to update agent", &e);
                        crate::toast::error(&format!("Failed to update agent: {}", js_err(e)));
                    }
                }
            });
        }

        Command::DeleteAgent { agent_id } => {
            spawn_local(async move {
                match ApiClient::delete_agent(&agent_id).await {
                    Ok(()) => dispatch_global_message(Message::AgentDeleted { agent_id }),
                    Err(e) => {
                        log_error("Failed to delete agent", &e);
                        crate::toast::error(&format!("Failed to delete agent: {}", js_err(e)));
                    }
                }
            });
        }

        Command::SendChat { agent_id, message } => {
            spawn_local(async move {
                let body = match serde_json::to_string(&ChatRequest { message: &message }) {
                    Ok(b) => b,
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Failed to serialize chat request: {:?}", e).into(),
                        );
                        return;
                    }
                };
                match ApiClient::send_chat(&agent_id, &body).await {
                    Ok(response) => match serde_json::from_str::<ChatResponse>(&response) {
                        Ok(reply) => {
                            dispatch_global_message(Message::ChatReplyReceived(reply.response))
                        }
                        Err(e) => dispatch_global_message(Message::ChatFailed(format!(
                            "bad chat response: {}",
                            e
                        ))),
                    },
                    Err(e) => dispatch_global_message(Message::ChatFailed(js_err(e))),
                }
            });
        }

        // ---------------- Workflows ----------------

        Command::FetchWorkflows => {
            spawn_local(async {
                match ApiClient::get_workflows().await {
                    Ok(response) => match serde_json::from_str::<Vec<WorkflowDto>>(&response) {
                        Ok(dtos) => {
                            crate::debug_log!("fetched {} workflows", dtos.len());
                            let workflows =
                                dtos.into_iter().map(WorkflowDto::normalize).collect();
                            dispatch_global_message(Message::WorkflowsLoaded(workflows));
                        }
                        Err(e) => web_sys::console::error_1(
                            &format!("Failed to parse workflows: {:?}", e).into(),
                        ),
                    },
                    Err(e) => log_error("Failed to fetch workflows", &e),
                }
            });
        }

        Command::FetchWorkflow { workflow_id } => {
            spawn_local(async move {
                match ApiClient::get_workflow(&workflow_id).await {
                    Ok(response) => match serde_json::from_str::<WorkflowDto>(&response) {
                        Ok(dto) => dispatch_global_message(Message::EditorWorkflowLoaded(
                            Box::new(dto.normalize()),
                        )),
                        Err(e) => dispatch_global_message(Message::EditorLoadFailed(format!(
                            "bad workflow response: {}",
                            e
                        ))),
                    },
                    Err(e) => dispatch_global_message(Message::EditorLoadFailed(js_err(e))),
                }
            });
        }

        Command::CreateWorkflow(workflow) => {
            spawn_local(async move {
                let body = match serde_json::to_string(&*workflow) {
                    Ok(b) => b,
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Failed to serialize workflow: {:?}", e).into(),
                        );
                        return;
                    }
                };
                match ApiClient::create_workflow(&body).await {
                    Ok(response) => match serde_json::from_str::<WorkflowDto>(&response) {
                        Ok(dto) => dispatch_global_message(Message::WorkflowCreated(Box::new(
                            dto.normalize(),
                        ))),
                        Err(e) => web_sys::console::error_1(
                            &format!("Failed to parse created workflow: {:?}", e).into(),
                        ),
                    },
                    Err(e) => {
                        log_error("Failed to create workflow", &e);
                        crate::toast::error(&format!("Failed to create workflow: {}", js_err(e)));
                    }
                }
            });
        }

        Command::UpdateWorkflow(workflow) => {
            spawn_local(async move {
                let body = match serde_json::to_string(&*workflow) {
                    Ok(b) => b,
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Failed to serialize workflow: {:?}", e).into(),
                        );
                        return;
                    }
                };
                match ApiClient::update_workflow(&workflow.id, &body).await {
                    Ok(response) => match serde_json::from_str::<WorkflowDto>(&response) {
                        Ok(dto) => dispatch_global_message(Message::WorkflowUpdated(Box::new(
                            dto.normalize(),
                        ))),
                        Err(_) => dispatch_global_message(Message::WorkflowUpdated(workflow)),
                    },
                    Err(e) => {
                        log_error("Failed to update workflow", &e);
                        crate::toast::error(&format!("Failed to update workflow: {}", js_err(e)));
                    }
                }
            });
        }

        Command::SaveWorkflowDag(workflow) => {
            spawn_local(async move {
                let body = match serde_json::to_string(&*workflow) {
                    Ok(b) => b,
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Failed to serialize workflow: {:?}", e).into(),
                        );
                        return;
                    }
                };
                match ApiClient::update_workflow(&workflow.id, &body).await {
                    Ok(response) => match serde_json::from_str::<WorkflowDto>(&response) {
                        Ok(dto) => dispatch_global_message(Message::WorkflowDagSaved(Box::new(
                            dto.normalize(),
                        ))),
                        Err(_) => dispatch_global_message(Message::WorkflowDagSaved(workflow)),
                    },
                    Err(e) => {
                        dispatch_global_message(Message::WorkflowDagSaveFailed(js_err(e)))
                    }
                }
            });
        }

        Command::DeleteWorkflow { workflow_id } => {
            spawn_local(async move {
                match ApiClient::delete_workflow(&workflow_id).await {
                    Ok(()) => dispatch_global_message(Message::WorkflowDeleted { workflow_id }),
                    Err(e) => {
                        log_error("Failed to delete workflow", &e);
                        crate::toast::error(&format!("Failed to delete workflow: {}", js_err(e)));
                    }
                }
            });
        }

        // ---------------- Integrations ----------------

        Command::FetchIntegrations => {
            spawn_local(async {
                match ApiClient::get_integrations().await {
                    Ok(response) => {
                        match serde_json::from_str::<Vec<crate::models::Integration>>(&response) {
                            Ok(integrations) => dispatch_global_message(
                                Message::IntegrationsLoaded(integrations),
                            ),
                            Err(e) => web_sys::console::error_1(
                                &format!("Failed to parse integrations: {:?}", e).into(),
                            ),
                        }
                    }
                    Err(e) => log_error("Failed to fetch integrations", &e),
                }
            });
        }

        Command::FetchAvailableProviders => {
            spawn_local(async {
                match ApiClient::get_available_integrations().await {
                    Ok(response) => match serde_json::from_str::<Vec<String>>(&response) {
                        Ok(providers) => dispatch_global_message(
                            Message::AvailableProvidersLoaded(providers),
                        ),
                        Err(e) => web_sys::console::error_1(
                            &format!("Failed to parse available providers: {:?}", e).into(),
                        ),
                    },
                    Err(e) => log_error("Failed to fetch available providers", &e),
                }
            });
        }

        Command::CreateIntegration(integration) => {
            spawn_local(async move {
                let body = match serde_json::to_string(&*integration) {
                    Ok(b) => b,
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Failed to serialize integration: {:?}", e).into(),
                        );
                        return;
                    }
                };
                match ApiClient::create_integration(&body).await {
                    Ok(_) => dispatch_global_message(Message::IntegrationSaved),
                    Err(e) => {
                        log_error("Failed to create integration", &e);
                        crate::toast::error(&format!("Failed to save integration: {}", js_err(e)));
                    }
                }
            });
        }

        Command::UpdateIntegration(integration) => {
            spawn_local(async move {
                let id = match integration.id.clone() {
                    Some(id) => id,
                    None => return,
                };
                let body = match serde_json::to_string(&*integration) {
                    Ok(b) => b,
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Failed to serialize integration: {:?}", e).into(),
                        );
                        return;
                    }
                };
                match ApiClient::update_integration(&id, &body).await {
                    Ok(_) => dispatch_global_message(Message::IntegrationSaved),
                    Err(e) => {
                        log_error("Failed to update integration", &e);
                        crate::toast::error(&format!("Failed to save integration: {}", js_err(e)));
                    }
                }
            });
        }

        Command::DeleteIntegration { integration_id } => {
            spawn_local(async move {
                match ApiClient::delete_integration(&integration_id).await {
                    Ok(()) => dispatch_global_message(Message::IntegrationDeleted),
                    Err(e) => {
                        log_error("Failed to delete integration", &e);
                        crate::toast::error(&format!(
                            "Failed to delete integration: {}",
                            js_err(e)
                        ));
                    }
                }
            });
        }

        Command::CheckDriveStatus => {
            spawn_local(async {
                #[derive(serde::Deserialize)]
                struct DriveStatusResponse {
                    connected: bool,
                }
                match ApiClient::get_drive_status().await {
                    Ok(response) => match serde_json::from_str::<DriveStatusResponse>(&response) {
                        Ok(status) => dispatch_global_message(Message::DriveStatusChecked {
                            connected: status.connected,
                        }),
                        Err(e) => web_sys::console::error_1(
                            &format!("Failed to parse drive status: {:?}", e).into(),
                        ),
                    },
                    Err(e) => log_error("Failed to check Google Drive status", &e),
                }
            });
        }

        Command::TestSnowflake(config) => {
            spawn_local(async move {
                let body = match serde_json::to_string(&*config) {
                    Ok(b) => b,
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Failed to serialize snowflake config: {:?}", e).into(),
                        );
                        return;
                    }
                };
                match ApiClient::test_snowflake(&body).await {
                    Ok(_) => dispatch_global_message(Message::SnowflakeTestSucceeded),
                    Err(e) => dispatch_global_message(Message::SnowflakeTestFailed(js_err(e))),
                }
            });
        }

        // ---------------- Bootstrap ----------------

        Command::RunBootstrap(files) => {
            spawn_local(async move {
                crate::bootstrap::run(files).await;
            });
        }
    }
}
