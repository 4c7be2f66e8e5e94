pub mod derivatives;
pub mod negotiation;
pub mod probe;
pub mod tools;

pub use negotiation::{ConfirmPrompt, NegotiationState, TerminalPrompt};
pub use probe::check_dependencies;
pub use tools::{ImageTools, ShellTools};
