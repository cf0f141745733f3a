// src/state.rs
//
// Global application state and the dispatch loop. The state lives in a
// thread-local RefCell; reducers mutate it synchronously and return the
// commands to run once the borrow has been released.

use std::cell::RefCell;

use crate::messages::{AvatarMode, Message, NodeConfigDraft};
use crate::models::{Agent, ChatMessage, DagEdge, DagNode, Integration, Workflow};
use crate::update;

/// Which top-level view is showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActiveView {
    Agents,
    Workflows,
    WorkflowEditor(String),
    Integrations,
}

impl Default for ActiveView {
    fn default() -> Self {
        ActiveView::Agents
    }
}

/// Load phase of the workflow editor. Opening the editor moves Unloaded to
/// Loading exactly once; a stale fetch result arriving for a different
/// workflow id is dropped.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum EditorLoad {
    #[default]
    Unloaded,
    Loading,
    Loaded,
}

/// An in-progress node drag. Offsets are from the node origin to the
/// grab point, so the node does not jump under the cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub node_id: String,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// An in-progress edge draw, anchored at the source node's connect handle.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectState {
    pub source_id: String,
    pub cursor_x: f64,
    pub cursor_y: f64,
}

/// Working copy of the workflow being edited on the canvas. Node positions
/// and edges mutate here freely; nothing is persisted until an explicit
/// save sends the whole DAG back.
#[derive(Debug, Default)]
pub struct EditorState {
    pub workflow_id: Option<String>,
    pub load: EditorLoad,
    pub nodes: Vec<DagNode>,
    pub edges: Vec<DagEdge>,
    pub selected_node_id: Option<String>,
    pub dragging: Option<DragState>,
    pub connecting: Option<ConnectState>,
    pub dirty: bool,
    pub canvas: Option<web_sys::HtmlCanvasElement>,
    pub context: Option<web_sys::CanvasRenderingContext2d>,
}

impl EditorState {
    pub fn node(&self, node_id: &str) -> Option<&DagNode> {
        self.nodes.iter().find(|n| n.id() == node_id)
    }

    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut DagNode> {
        self.nodes.iter_mut().find(|n| n.id() == node_id)
    }

    pub fn reset(&mut self) {
        self.workflow_id = None;
        self.load = EditorLoad::Unloaded;
        self.nodes.clear();
        self.edges.clear();
        self.selected_node_id = None;
        self.dragging = None;
        self.connecting = None;
        self.dirty = false;
        self.canvas = None;
        self.context = None;
    }
}

/// The agent create/edit form. `editing_id` of None means create.
#[derive(Clone, Debug, Default)]
pub struct AgentFormState {
    pub open: bool,
    pub editing_id: Option<String>,
    pub avatar_mode: AvatarMode,
    pub avatar: crate::models::Avatar,
}

/// The node configuration modal, with its own draft that cancel discards.
#[derive(Clone, Debug, Default)]
pub struct NodeModalState {
    pub open: bool,
    pub node_id: Option<String>,
    pub draft: NodeConfigDraft,
}

/// Chat panel attached to one agent at a time.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub open: bool,
    pub agent_id: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub waiting: bool,
}

#[derive(Clone, Debug, Default)]
pub struct WorkflowFormState {
    pub open: bool,
    pub editing_id: Option<String>,
}

pub struct AppState {
    pub agents: Vec<Agent>,
    pub workflows: Vec<Workflow>,
    pub integrations: Vec<Integration>,
    /// Provider ids the backend can be wired to. Empty until loaded; the
    /// integrations view treats empty as "show everything".
    pub available_providers: Vec<String>,
    pub available_models: Vec<String>,
    pub active_view: ActiveView,

    pub agent_form: AgentFormState,
    pub workflow_form: WorkflowFormState,
    pub node_modal: NodeModalState,
    pub chat: ChatState,
    pub editor: EditorState,

    /// Whether the Google Drive integration reports connected.
    pub drive_connected: bool,
    /// Bumped whenever a new OAuth poll starts; a running poll that sees a
    /// different generation stops without dispatching.
    pub drive_poll_generation: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            workflows: Vec::new(),
            integrations: Vec::new(),
            available_providers: Vec::new(),
            available_models: Vec::new(),
            active_view: ActiveView::default(),
            agent_form: AgentFormState::default(),
            workflow_form: WorkflowFormState::default(),
            node_modal: NodeModalState::default(),
            chat: ChatState::default(),
            editor: EditorState::default(),
            drive_connected: false,
            drive_poll_generation: 0,
        }
    }

    // Agents

    pub fn replace_agents(&mut self, agents: Vec<Agent>) {
        self.agents = agents;
    }

    pub fn agent(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == agent_id)
    }

    pub fn insert_agent(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    /// Replace an agent in place, keeping list order stable. No-op when the
    /// id is unknown: a late update ack must not resurrect a deleted agent.
    pub fn update_agent(&mut self, agent: Agent) {
        if let Some(slot) = self.agents.iter_mut().find(|a| a.id == agent.id) {
            *slot = agent;
        }
    }

    /// Insert-or-replace, for records fetched fresh from the backend.
    pub fn upsert_agent(&mut self, agent: Agent) {
        match self.agents.iter_mut().find(|a| a.id == agent.id) {
            Some(slot) => *slot = agent,
            None => self.agents.push(agent),
        }
    }

    pub fn remove_agent(&mut self, agent_id: &str) {
        self.agents.retain(|a| a.id != agent_id);
    }

    // Workflows

    pub fn replace_workflows(&mut self, workflows: Vec<Workflow>) {
        self.workflows = workflows;
    }

    pub fn workflow(&self, workflow_id: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.id == workflow_id)
    }

    /// Replace a workflow in place; no-op when the id is unknown.
    pub fn update_workflow(&mut self, workflow: Workflow) {
        if let Some(slot) = self.workflows.iter_mut().find(|w| w.id == workflow.id) {
            *slot = workflow;
        }
    }

    /// Insert-or-replace, for records fetched fresh from the backend.
    pub fn upsert_workflow(&mut self, workflow: Workflow) {
        match self.workflows.iter_mut().find(|w| w.id == workflow.id) {
            Some(slot) => *slot = workflow,
            None => self.workflows.push(workflow),
        }
    }

    pub fn remove_workflow(&mut self, workflow_id: &str) {
        self.workflows.retain(|w| w.id != workflow_id);
    }

    // Integrations

    pub fn replace_integrations(&mut self, integrations: Vec<Integration>) {
        self.integrations = integrations;
    }

    pub fn integration_by_provider(&self, provider: &str) -> Option<&Integration> {
        self.integrations.iter().find(|i| i.provider == provider)
    }

    pub fn provider_available(&self, provider: &str) -> bool {
        self.available_providers.is_empty()
            || self.available_providers.iter().any(|p| p == provider)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

/// Run a message through the reducers and execute the resulting commands.
/// The state borrow is dropped before any command runs, so commands are free
/// to dispatch follow-up messages.
pub fn dispatch_global_message(msg: Message) {
    let commands = APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        update::update(&mut state, msg)
    });
    for command in commands {
        crate::command_executors::execute(command);
    }
}
