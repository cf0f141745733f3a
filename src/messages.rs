// src/messages.rs
//
// The events that can occur in the UI, plus the side-effect commands the
// reducers hand back. State transitions stay pure; everything that touches
// the network or the DOM goes through a `Command`.

use crate::models::{
    Agent, AgentFormData, Avatar, Integration, Schedule, SnowflakeConfig, Workflow,
};
use crate::state::ActiveView;
use serde_json::{Map, Value};

#[derive(Debug)]
pub enum Message {
    // View switching
    ToggleView(ActiveView),

    // Agent management
    AgentsLoaded(Vec<Agent>),
    /// A single agent fetched on demand, e.g. for a DAG node whose agent
    /// was missing from the roster.
    AgentFetched(Box<Agent>),
    ModelsLoaded(Vec<String>),
    OpenAgentForm(Option<String>), // None = create, Some(id) = edit
    CloseAgentForm,
    SetAvatarMode(AvatarMode),
    AvatarPicked(Avatar),
    SubmitAgentForm(AgentFormData),
    AgentCreated(Box<Agent>),
    AgentUpdated(Box<Agent>),
    RequestAgentDeletion { agent_id: String },
    ConfirmedAgentDeletion { agent_id: String },
    AgentDeleted { agent_id: String },

    // Chat panel
    OpenChat { agent_id: String },
    CloseChat,
    SendChatMessage(String),
    ChatReplyReceived(String),
    ChatFailed(String),

    // Workflow management
    WorkflowsLoaded(Vec<Workflow>),
    OpenWorkflowForm(Option<String>),
    CloseWorkflowForm,
    SubmitWorkflowForm {
        name: String,
        description: String,
        schedule: Schedule,
    },
    WorkflowCreated(Box<Workflow>),
    WorkflowUpdated(Box<Workflow>),
    RequestWorkflowDeletion { workflow_id: String },
    ConfirmedWorkflowDeletion { workflow_id: String },
    WorkflowDeleted { workflow_id: String },
    ToggleWorkflowStatus { workflow_id: String },
    ChangeWorkflowSchedule { workflow_id: String, schedule: Schedule },

    // DAG editor lifecycle
    OpenWorkflowEditor { workflow_id: String },
    CloseWorkflowEditor,
    EditorWorkflowLoaded(Box<Workflow>),
    EditorLoadFailed(String),

    // DAG editor interactions
    AddAgentNode { agent_id: String },
    StartNodeDrag { node_id: String, offset_x: f64, offset_y: f64 },
    UpdateNodePosition { node_id: String, x: f64, y: f64 },
    StopNodeDrag,
    StartConnection { source_id: String, x: f64, y: f64 },
    UpdateConnectionCursor { x: f64, y: f64 },
    CompleteConnection { target_id: String },
    CancelConnection,
    AddEdge { source: String, target: String },

    // Node configuration modal
    OpenNodeEditModal { node_id: String },
    CloseNodeEditModal,
    AddModalInput(String),
    RemoveModalInput(usize),
    AddModalOutput(String),
    RemoveModalOutput(usize),
    SaveNodeConfiguration,

    // Whole-DAG persistence
    SaveWorkflowDag,
    WorkflowDagSaved(Box<Workflow>),
    WorkflowDagSaveFailed(String),

    // Integrations
    IntegrationsLoaded(Vec<Integration>),
    AvailableProvidersLoaded(Vec<String>),
    SaveIntegration(Box<Integration>),
    IntegrationSaved,
    RequestIntegrationDeletion { integration_id: String },
    ConfirmedIntegrationDeletion { integration_id: String },
    IntegrationDeleted,
    TestSnowflakeConnection(Box<SnowflakeConfig>),
    SnowflakeTestSucceeded,
    SnowflakeTestFailed(String),
    /// The OAuth popup has closed; the backend should be asked once whether
    /// the grant went through.
    DriveOauthCompleted,
    DriveStatusChecked { connected: bool },

    // Definition bootstrap (multi-file YAML import)
    ImportDefinitions(Vec<(String, String)>),
}

/// Which avatar input mode the agent form currently shows. Switching modes
/// must not clear the previously chosen value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AvatarMode {
    #[default]
    Glyph,
    Upload,
}

pub enum Command {
    /// Chain another message through the normal dispatch loop.
    SendMessage(Message),

    /// Run a UI closure after the state borrow has been released.
    UpdateUI(Box<dyn FnOnce() + 'static>),

    /// Re-render the active view.
    Render,

    // Agents
    FetchAgents,
    FetchAgent { agent_id: String },
    FetchModels,
    CreateAgent(Box<AgentFormData>),
    UpdateAgent(Box<Agent>),
    DeleteAgent { agent_id: String },
    SendChat { agent_id: String, message: String },

    // Workflows
    FetchWorkflows,
    FetchWorkflow { workflow_id: String },
    CreateWorkflow(Box<Workflow>),
    /// Whole-document replace; success feeds `WorkflowUpdated` back in.
    UpdateWorkflow(Box<Workflow>),
    /// Same PUT, but routed to the editor's saved/failed messages.
    SaveWorkflowDag(Box<Workflow>),
    DeleteWorkflow { workflow_id: String },

    // Integrations
    FetchIntegrations,
    FetchAvailableProviders,
    CreateIntegration(Box<Integration>),
    UpdateIntegration(Box<Integration>),
    DeleteIntegration { integration_id: String },
    TestSnowflake(Box<SnowflakeConfig>),
    /// Single status query after the OAuth popup closes.
    CheckDriveStatus,

    // Bootstrap
    RunBootstrap(Vec<(String, String)>),
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::SendMessage(m) => write!(f, "SendMessage({:?})", m),
            Command::UpdateUI(_) => write!(f, "UpdateUI(..)"),
            Command::Render => write!(f, "Render"),
            Command::FetchAgents => write!(f, "FetchAgents"),
            Command::FetchAgent { agent_id } => write!(f, "FetchAgent({})", agent_id),
            Command::FetchModels => write!(f, "FetchModels"),
            Command::CreateAgent(_) => write!(f, "CreateAgent(..)"),
            Command::UpdateAgent(a) => write!(f, "UpdateAgent({})", a.id),
            Command::DeleteAgent { agent_id } => write!(f, "DeleteAgent({})", agent_id),
            Command::SendChat { agent_id, .. } => write!(f, "SendChat({})", agent_id),
            Command::FetchWorkflows => write!(f, "FetchWorkflows"),
            Command::FetchWorkflow { workflow_id } => write!(f, "FetchWorkflow({})", workflow_id),
            Command::CreateWorkflow(w) => write!(f, "CreateWorkflow({})", w.name),
            Command::UpdateWorkflow(w) => write!(f, "UpdateWorkflow({})", w.id),
            Command::SaveWorkflowDag(w) => write!(f, "SaveWorkflowDag({})", w.id),
            Command::DeleteWorkflow { workflow_id } => {
                write!(f, "DeleteWorkflow({})", workflow_id)
            }
            Command::FetchIntegrations => write!(f, "FetchIntegrations"),
            Command::FetchAvailableProviders => write!(f, "FetchAvailableProviders"),
            Command::CreateIntegration(_) => write!(f, "CreateIntegration(..)"),
            Command::UpdateIntegration(_) => write!(f, "UpdateIntegration(..)"),
            Command::DeleteIntegration { integration_id } => {
                write!(f, "DeleteIntegration({})", integration_id)
            }
            Command::TestSnowflake(_) => write!(f, "TestSnowflake(..)"),
            Command::CheckDriveStatus => write!(f, "CheckDriveStatus"),
            Command::RunBootstrap(files) => write!(f, "RunBootstrap({} files)", files.len()),
        }
    }
}

/// Draft edited by the node configuration modal. Held in the modal slice so
/// cancel discards it without touching editor state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeConfigDraft {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    /// Everything else in the node's configuration map, carried through
    /// untouched on save.
    pub rest: Map<String, Value>,
}
