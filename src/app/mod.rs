//! Application runtime composition modules.

pub(crate) mod command_dispatcher;
pub(crate) mod config_manager;
pub(crate) mod config_runtime;
pub(crate) mod runtime;
pub(crate) mod terminal;
