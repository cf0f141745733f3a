pub mod agent_form_modal;
pub mod agent_list;
pub mod chat_panel;
pub mod dag_editor;
pub mod google_drive_card;
pub mod integration_modal;
pub mod integrations_list;
pub mod modal;
pub mod node_edit_modal;
pub mod workflow_form_modal;
pub mod workflow_table;
