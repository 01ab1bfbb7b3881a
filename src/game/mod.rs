//! Game control surface used by the UI shells

mod controller;
mod registry;

pub use controller::{GameController, SaveNotice, SessionView};
pub use registry::SessionRegistry;

/// Client id used by the single-player terminal shells
pub const LOCAL_CLIENT: &str = "local";
