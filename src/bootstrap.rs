// src/bootstrap.rs
//
// YAML definition import: each selected file may declare agents and
// workflows; every entry is POSTed on its own and failures are skipped so
// one bad definition never aborts the rest.

use serde::Deserialize;

use crate::messages::Command;
use crate::network::ApiClient;

#[derive(Debug, Default, Deserialize)]
pub struct DefinitionFile {
    #[serde(default)]
    pub agents: Vec<serde_yaml::Value>,
    #[serde(default)]
    pub workflows: Vec<serde_yaml::Value>,
}

pub fn parse_definitions(content: &str) -> Result<DefinitionFile, String> {
    serde_yaml::from_str(content).map_err(|e| e.to_string())
}

pub async fn run(files: Vec<(String, String)>) {
    let mut created = 0usize;
    let mut failed = 0usize;

    for (name, content) in files {
        let defs = match parse_definitions(&content) {
            Ok(d) => d,
            Err(e) => {
                web_sys::console::error_1(&format!("{}: not valid YAML: {}", name, e).into());
                failed += 1;
                continue;
            }
        };

        for agent in defs.agents {
            match post_definition(&agent, "agent").await {
                Ok(()) => created += 1,
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("{}: agent definition failed: {}", name, e).into(),
                    );
                    failed += 1;
                }
            }
        }
        for workflow in defs.workflows {
            match post_definition(&workflow, "workflow").await {
                Ok(()) => created += 1,
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("{}: workflow definition failed: {}", name, e).into(),
                    );
                    failed += 1;
                }
            }
        }
    }

    if failed == 0 {
        crate::toast::success(&format!("Imported {} definitions", created));
    } else {
        crate::toast::info(&format!(
            "Imported {} definitions, {} skipped",
            created, failed
        ));
    }

    // Refresh whatever the user is looking at.
    crate::command_executors::execute(Command::FetchAgents);
    crate::command_executors::execute(Command::FetchWorkflows);
}

async fn post_definition(value: &serde_yaml::Value, kind: &str) -> Result<(), String> {
    let body = serde_json::to_string(value).map_err(|e| e.to_string())?;
    let result = match kind {
        "agent" => ApiClient::create_agent(&body).await,
        _ => ApiClient::create_workflow(&body).await,
    };
    result
        .map(|_| ())
        .map_err(|e| e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_with_both_sections_parses() {
        let yaml = "
agents:
  - name: Reporter
    description: writes the nightly report
workflows:
  - name: Nightly Report
    schedule: daily
";
        let defs = parse_definitions(yaml).unwrap();
        assert_eq!(defs.agents.len(), 1);
        assert_eq!(defs.workflows.len(), 1);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let defs = parse_definitions("agents: []").unwrap();
        assert!(defs.agents.is_empty());
        assert!(defs.workflows.is_empty());
    }

    #[test]
    fn invalid_yaml_reports_an_error() {
        assert!(parse_definitions("agents: [unclosed").is_err());
    }
}
