pub use roledirect_core::app::App;
pub use roledirect_types::error::{ClResult, Error};
pub use roledirect_types::types::{Principal, Role, RoleMap};

pub use tracing::{debug, error, info, warn};

// vim: ts=4
