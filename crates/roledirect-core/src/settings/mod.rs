//! Settings subsystem: definitions registry and the caching service
//!
//! - **Types** (`types.rs`): value, permission and definition types, registry
//! - **Service** (`service.rs`): SettingsService with caching and validation

pub mod service;
pub mod types;

pub use types::{
	FrozenSettingsRegistry, PermissionLevel, Setting, SettingDefinition, SettingDefinitionBuilder,
	SettingValue, SettingsRegistry,
};

// vim: ts=4
