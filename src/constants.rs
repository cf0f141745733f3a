// Default values for agent configuration - these are the single source of truth for defaults
pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_AVATAR_GLYPH: &str = "\u{1F916}"; // 🤖

// Fixed glyph palette offered by the avatar picker overlay.
pub const AVATAR_GLYPHS: &[&str] = &[
    "\u{1F916}",
    "\u{1F9E0}",
    "\u{1F50D}",
    "\u{1F4CA}",
    "\u{1F4DD}",
    "\u{1F4E7}",
    "\u{1F9EA}",
    "\u{2699}\u{FE0F}",
    "\u{1F4C8}",
    "\u{1F4BE}",
    "\u{1F310}",
    "\u{1F3AF}",
];

// Node visual defaults
pub const DEFAULT_NODE_WIDTH: f64 = 200.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 80.0;
pub const AGENT_NODE_COLOR: &str = "#ffecb3"; // Light amber
pub const HUMAN_NODE_COLOR: &str = "#b3e5fc"; // Light blue
pub const NODE_BORDER_DEFAULT: &str = "#90a4ae";
pub const NODE_BORDER_SELECTED: &str = "#1976d2";
pub const EDGE_COLOR: &str = "#666666";
pub const CONNECTION_PREVIEW_COLOR: &str = "#888888";
pub const SHADOW_COLOR: &str = "rgba(0,0,0,0.2)";

// Strip along a node's bottom edge that starts an edge drag instead of a
// node move.
pub const CONNECT_HANDLE_HEIGHT: f64 = 14.0;

// New agent nodes land at a fixed spot; the user drags them from there.
pub const NEW_NODE_X: f64 = 100.0;
pub const NEW_NODE_Y: f64 = 100.0;

// Google Drive OAuth popup polling. The popup is checked once per interval
// and the loop gives up after MAX_ATTEMPTS so an abandoned popup cannot
// leave a timer running forever.
pub const DRIVE_POLL_INTERVAL_MS: u32 = 1_000;
pub const DRIVE_POLL_MAX_ATTEMPTS: u32 = 120;

// Maximum grapheme clusters of an agent name drawn inside a canvas node
// before truncation with an ellipsis.
pub const NODE_LABEL_MAX_GRAPHEMES: usize = 18;

pub const SNOWFLAKE_REQUIRED_FIELDS: &[&str] = &[
    "account",
    "username",
    "password",
    "database",
    "schema",
    "warehouse",
];
