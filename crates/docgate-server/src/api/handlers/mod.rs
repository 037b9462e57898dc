//! Generic document handlers and their namespace adapters

pub mod namespace;
pub mod resolve;
pub mod update;

pub use namespace::{
    new_resolve_handler, new_update_handler, NamespaceResolveHandler, NamespaceUpdateHandler,
};
pub use resolve::ResolveHandler;
pub use update::UpdateHandler;

/// Route prefix used when no namespace path is supplied
pub const DEFAULT_BASE_PATH: &str = "/document";
