//! Login redirect subsystem
//!
//! - **Rules** (`rules.rs`): per-role targets and their resolution
//! - **Filter** (`filter.rs`): ordered redirect filters run after login
//! - **Settings** (`settings.rs`): registration of the per-role override settings

pub mod filter;
pub mod rules;
pub mod settings;

pub use filter::{
	LoginRequest, RedirectFilter, RedirectPipeline, StaticRedirectFilter, StoredRedirectFilter,
};
pub use rules::{BaseUrl, RedirectRules};

// vim: ts=4
