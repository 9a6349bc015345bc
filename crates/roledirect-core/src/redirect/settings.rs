//! Login redirect settings registration

use crate::prelude::*;
use crate::sanitize;
use crate::settings::{PermissionLevel, SettingDefinition, SettingValue, SettingsRegistry};

/// Register one override setting per role
pub fn register_settings(registry: &mut SettingsRegistry) -> ClResult<()> {
	for role in Role::ALL {
		let key = role.setting_key();
		registry.register(
			SettingDefinition::builder(key.clone())
				.description(format!(
					"Path to redirect {} to after login (e.g., {})",
					role.as_str(),
					role.default_path()
				))
				.default(SettingValue::String(role.default_path().into()))
				.permission(PermissionLevel::Admin)
				.validator(move |value| match value {
					SettingValue::String(s) if sanitize::is_sanitized(s)? => Ok(()),
					SettingValue::String(_) => Err(Error::ValidationError(format!(
						"Setting '{}' must be plain single-line text",
						key
					))),
					v => Err(Error::ValidationError(format!(
						"Setting '{}' is not a string, got {}",
						key,
						v.type_name()
					))),
				})
				.build()?,
		)?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_registers_every_role() {
		let mut registry = SettingsRegistry::new();
		register_settings(&mut registry).unwrap();
		let frozen = registry.freeze();

		for role in Role::ALL {
			let def = frozen.get(&role.setting_key()).unwrap();
			assert_eq!(def.default, Some(SettingValue::String(role.default_path().into())));
			assert_eq!(def.permission, PermissionLevel::Admin);
		}
	}

	#[test]
	fn test_validator_rejects_unsanitized_text() {
		let mut registry = SettingsRegistry::new();
		register_settings(&mut registry).unwrap();
		let frozen = registry.freeze();
		let def = frozen.get("login_redirect.leder").unwrap();
		let validator = def.validator.as_ref().unwrap();

		assert!(validator(&SettingValue::String("/custom-leder/".into())).is_ok());
		assert!(validator(&SettingValue::String(String::new())).is_ok());
		assert!(validator(&SettingValue::String("<b>/x/</b>".into())).is_err());
		assert!(validator(&SettingValue::Int(1)).is_err());
	}
}

// vim: ts=4
