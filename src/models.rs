//! Domain types plus the raw DTO shapes the backend actually sends.
//!
//! The backend nests an agent's avatar and model settings under `config` and
//! uses snake_case `created_at` / `updated_at` everywhere; the `*Dto` types
//! mirror that wire shape and `normalize()` converts them into the flattened
//! client-side structs, filling in every default the UI relies on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{
    DEFAULT_AVATAR_GLYPH, DEFAULT_MODEL, DEFAULT_TEMPERATURE, SNOWFLAKE_REQUIRED_FIELDS,
};

/// Current time as an ISO-8601 string, used wherever the backend omitted a
/// timestamp.
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn timestamp_or_now(raw: Option<String>) -> String {
    match raw {
        Some(s) if !s.is_empty() => s,
        _ => now_iso(),
    }
}

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// Avatar kind determines how `value` is read: a glyph string or an image
/// URL / data-URI. Never both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Avatar {
    Emoji(String),
    Image(String),
}

impl Default for Avatar {
    fn default() -> Self {
        Avatar::Emoji(DEFAULT_AVATAR_GLYPH.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Idle,
    Busy,
    Error,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Idle => "idle",
            AgentStatus::Busy => "busy",
            AgentStatus::Error => "error",
        }
    }
}

/// Model settings for one agent. Feature flags are optional on the wire but
/// always present (defaulted to `false`) after normalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_rag: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_direct_query: Option<bool>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: Some(crate::constants::DEFAULT_MAX_TOKENS),
            use_rag: Some(false),
            use_direct_query: Some(false),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub narrative: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub avatar: Avatar,
    pub config: ModelConfig,
    pub status: AgentStatus,
    pub capabilities: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl Default for Agent {
    fn default() -> Self {
        let now = now_iso();
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            narrative: String::new(),
            kind: "llm".to_string(),
            avatar: Avatar::default(),
            config: ModelConfig::default(),
            status: AgentStatus::Idle,
            capabilities: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Wire shape of `GET /agents` entries.
#[derive(Clone, Debug, Deserialize)]
pub struct AgentDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub narrative: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default)]
    pub status: Option<AgentStatus>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl AgentDto {
    pub fn normalize(self) -> Agent {
        let avatar = self
            .config
            .get("avatar")
            .cloned()
            .and_then(|v| serde_json::from_value::<Avatar>(v).ok())
            .unwrap_or_default();

        let config = ModelConfig {
            model: self
                .config
                .get("model")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_MODEL)
                .to_string(),
            temperature: self
                .config
                .get("temperature")
                .and_then(Value::as_f64)
                .unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self
                .config
                .get("max_tokens")
                .and_then(Value::as_u64)
                .map(|n| n as u32),
            use_rag: Some(
                self.config
                    .get("use_rag")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            ),
            use_direct_query: Some(
                self.config
                    .get("use_direct_query")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            ),
        };

        Agent {
            id: self.id,
            name: self.name,
            description: self.description,
            narrative: self.narrative,
            kind: self.kind.unwrap_or_else(|| "llm".to_string()),
            avatar,
            config,
            status: self.status.unwrap_or(AgentStatus::Idle),
            capabilities: self.capabilities,
            created_at: timestamp_or_now(self.created_at),
            updated_at: timestamp_or_now(self.updated_at),
        }
    }
}

/// What the agent form collects; turned into a create/update payload.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentFormData {
    pub name: String,
    pub description: String,
    pub narrative: String,
    pub avatar: Avatar,
    pub config: ModelConfig,
}

impl AgentFormData {
    /// Build the `POST /agents` body: avatar and model settings nest back
    /// under `config`, the way the backend stores them.
    pub fn to_create_payload(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "narrative": self.narrative,
            "type": "llm",
            "config": {
                "avatar": self.avatar,
                "model": self.config.model,
                "temperature": self.config.temperature,
                "max_tokens": self.config.max_tokens,
                "use_rag": self.config.use_rag.unwrap_or(false),
                "use_direct_query": self.config.use_direct_query.unwrap_or(false),
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

// ---------------------------------------------------------------------------
// Workflows
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Inactive,
    Active,
}

impl WorkflowStatus {
    pub fn toggled(&self) -> Self {
        match self {
            WorkflowStatus::Inactive => WorkflowStatus::Active,
            WorkflowStatus::Active => WorkflowStatus::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, WorkflowStatus::Active)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl Schedule {
    pub const ALL: [Schedule; 4] = [
        Schedule::Daily,
        Schedule::Weekly,
        Schedule::Monthly,
        Schedule::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Schedule::Daily => "daily",
            Schedule::Weekly => "weekly",
            Schedule::Monthly => "monthly",
            Schedule::Custom => "custom",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "weekly" => Schedule::Weekly,
            "monthly" => Schedule::Monthly,
            "custom" => Schedule::Custom,
            _ => Schedule::Daily,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumanTaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl HumanTaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HumanTaskStatus::Pending => "pending",
            HumanTaskStatus::InProgress => "in_progress",
            HumanTaskStatus::Completed => "completed",
        }
    }
}

/// One node of a stored DAG. A sum type so every consumer (renderer, editor
/// conversion, modal) matches exhaustively instead of poking at optional
/// fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DagNode {
    Agent {
        id: String,
        position: Position,
        #[serde(rename = "agentId")]
        agent_id: String,
        /// Free-form map; the editor keeps the `inputs` and `outputs` label
        /// sequences inside it.
        #[serde(default)]
        configuration: Map<String, Value>,
    },
    Human {
        id: String,
        position: Position,
        #[serde(rename = "userId")]
        user_id: String,
        #[serde(default)]
        task: String,
        #[serde(default)]
        instructions: String,
        #[serde(default)]
        status: HumanTaskStatus,
    },
}

impl DagNode {
    pub fn id(&self) -> &str {
        match self {
            DagNode::Agent { id, .. } | DagNode::Human { id, .. } => id,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            DagNode::Agent { position, .. } | DagNode::Human { position, .. } => *position,
        }
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        match self {
            DagNode::Agent { position, .. } | DagNode::Human { position, .. } => {
                position.x = x;
                position.y = y;
            }
        }
    }
}

/// Edges are stored verbatim; no direction or existence checks anywhere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DagEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dag {
    #[serde(default)]
    pub nodes: Vec<DagNode>,
    #[serde(default)]
    pub edges: Vec<DagEdge>,
}

impl Dag {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: WorkflowStatus,
    pub schedule: Schedule,
    pub dag: Dag,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl Default for Workflow {
    fn default() -> Self {
        let now = now_iso();
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            status: WorkflowStatus::Inactive,
            schedule: Schedule::Daily,
            dag: Dag::default(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Wire shape of `GET /workflows` entries.
#[derive(Clone, Debug, Deserialize)]
pub struct WorkflowDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<WorkflowStatus>,
    #[serde(default)]
    pub schedule: Option<Schedule>,
    #[serde(default)]
    pub dag: Option<Dag>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl WorkflowDto {
    pub fn normalize(self) -> Workflow {
        Workflow {
            id: self.id,
            name: self.name,
            description: self.description,
            status: self.status.unwrap_or(WorkflowStatus::Inactive),
            schedule: self.schedule.unwrap_or(Schedule::Daily),
            dag: self.dag.unwrap_or_default(),
            created_at: timestamp_or_now(self.created_at),
            updated_at: timestamp_or_now(self.updated_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Integrations
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Active,
    #[default]
    Disconnected,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Integration {
    /// Absent until first saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub provider: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: IntegrationStatus,
    #[serde(default)]
    pub config: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub warehouse: String,
}

impl SnowflakeConfig {
    pub fn from_config_map(config: &Map<String, Value>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            account: get("account"),
            username: get("username"),
            password: get("password"),
            database: get("database"),
            schema: get("schema"),
            warehouse: get("warehouse"),
        }
    }

    /// Names of required fields that are still empty. A connection test is
    /// only allowed when this comes back empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let values = [
            &self.account,
            &self.username,
            &self.password,
            &self.database,
            &self.schema,
            &self.warehouse,
        ];
        SNOWFLAKE_REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(name, _)| *name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn agent_dto_fills_defaults() {
        let dto: AgentDto = serde_json::from_value(json!({
            "id": "a1",
            "name": "Scribe",
            "narrative": "Writes summaries.",
            "config": {"model": "claude-3-haiku-20240307", "temperature": 0.2}
        }))
        .unwrap();
        let agent = dto.normalize();
        assert_eq!(agent.avatar, Avatar::Emoji(DEFAULT_AVATAR_GLYPH.into()));
        assert_eq!(agent.status, AgentStatus::Idle);
        assert_eq!(agent.config.use_rag, Some(false));
        assert_eq!(agent.config.use_direct_query, Some(false));
        assert_eq!(agent.config.model, "claude-3-haiku-20240307");
        assert!(agent.capabilities.is_empty());
        assert!(!agent.created_at.is_empty());
    }

    #[test]
    fn agent_dto_keeps_submitted_values() {
        let dto: AgentDto = serde_json::from_value(json!({
            "id": "a2",
            "name": "Analyst",
            "narrative": "Looks at numbers.",
            "status": "busy",
            "capabilities": ["sql"],
            "config": {
                "avatar": {"type": "image", "value": "data:image/png;base64,AAAA"},
                "model": "claude-3-opus-20240229",
                "temperature": 0.9,
                "max_tokens": 2048,
                "use_rag": true
            },
            "created_at": "2024-01-02T03:04:05Z"
        }))
        .unwrap();
        let agent = dto.normalize();
        assert_eq!(
            agent.avatar,
            Avatar::Image("data:image/png;base64,AAAA".into())
        );
        assert_eq!(agent.status, AgentStatus::Busy);
        assert_eq!(agent.config.max_tokens, Some(2048));
        assert_eq!(agent.config.use_rag, Some(true));
        assert_eq!(agent.created_at, "2024-01-02T03:04:05Z");
    }

    #[test]
    fn create_payload_nests_config() {
        let form = AgentFormData {
            name: "Scribe".into(),
            description: "".into(),
            narrative: "Writes.".into(),
            avatar: Avatar::Emoji("\u{1F50D}".into()),
            config: ModelConfig::default(),
        };
        let payload = form.to_create_payload();
        assert_eq!(payload["type"], "llm");
        assert_eq!(payload["config"]["avatar"]["type"], "emoji");
        assert_eq!(payload["config"]["use_rag"], false);
    }

    #[test]
    fn dag_node_tagged_roundtrip() {
        let dag = Dag {
            nodes: vec![
                DagNode::Agent {
                    id: "n1".into(),
                    position: Position { x: 10.0, y: 20.0 },
                    agent_id: "a1".into(),
                    configuration: {
                        let mut m = Map::new();
                        m.insert("inputs".into(), json!(["query"]));
                        m.insert("outputs".into(), json!(["report"]));
                        m
                    },
                },
                DagNode::Human {
                    id: "n2".into(),
                    position: Position { x: 30.0, y: 40.0 },
                    user_id: "u1".into(),
                    task: "Review".into(),
                    instructions: "Check the report".into(),
                    status: HumanTaskStatus::InProgress,
                },
            ],
            edges: vec![DagEdge {
                id: "e1".into(),
                source: "n1".into(),
                target: "n2".into(),
            }],
        };
        let text = serde_json::to_string(&dag).unwrap();
        assert!(text.contains("\"type\":\"agent\""));
        assert!(text.contains("\"agentId\":\"a1\""));
        assert!(text.contains("\"status\":\"in_progress\""));
        let back: Dag = serde_json::from_str(&text).unwrap();
        assert_eq!(back, dag);
    }

    #[test]
    fn workflow_dto_defaults() {
        let dto: WorkflowDto = serde_json::from_value(json!({
            "id": "w1",
            "name": "Nightly Report"
        }))
        .unwrap();
        let wf = dto.normalize();
        assert_eq!(wf.status, WorkflowStatus::Inactive);
        assert_eq!(wf.schedule, Schedule::Daily);
        assert!(wf.dag.is_empty());
    }

    #[test]
    fn snowflake_missing_fields_reported_by_name() {
        let mut cfg = SnowflakeConfig {
            account: "acme".into(),
            username: "svc".into(),
            password: "hunter2".into(),
            database: "dw".into(),
            schema: "public".into(),
            warehouse: "xs".into(),
        };
        assert!(cfg.missing_fields().is_empty());
        cfg.password.clear();
        cfg.warehouse = "   ".into();
        assert_eq!(cfg.missing_fields(), vec!["password", "warehouse"]);
    }
}
