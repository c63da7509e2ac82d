use thiserror::Error;

// Re-export a simple Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error set for tree assembly, configuration and command actions.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Parsing & Dispatch -------------------------------------------------
    /// Bad argument values handed to a command action.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No node in the active menu accepted the command line.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A command action ran and reported failure.
    #[error("Command '{command}' failed: {reason}")]
    Action { command: String, reason: String },

    // ---- Tree assembly ------------------------------------------------------
    /// Invalid node id or an attempt to attach children to a leaf command.
    #[error("Menu tree error: {0}")]
    Tree(String),

    // ---- Config -------------------------------------------------------------
    /// Any issue initializing/reading config (invalid JSON, bad value, etc.)
    #[error("Config error: {0}")]
    Config(String),

    // ---- Plumbing / Wrappers ------------------------------------------------
    /// IO passthrough (help sinks, log files, config files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON passthrough.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    pub fn unknown<S: Into<String>>(cmd: S) -> Self {
        Error::UnknownCommand(cmd.into())
    }
    pub fn tree<S: Into<String>>(msg: S) -> Self {
        Error::Tree(msg.into())
    }
    /// Helper for actions that want to fail with a plain message.
    pub fn action<C: Into<String>, R: Into<String>>(command: C, reason: R) -> Self {
        Error::Action {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

// ----------------------- Small result helpers --------------------------------

/// Map an `Option<T>` into `Result<T, Error::Parse>` with a custom message.
/// Handy inside command actions pulling positional arguments.
pub fn require_parse<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::Parse(msg.into()))
}
