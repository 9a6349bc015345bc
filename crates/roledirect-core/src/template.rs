//! HTML rendering of the login redirect settings page
//!
//! Values are HTML-escaped by Handlebars, so stored text cannot break out of
//! the `value` attribute.

use handlebars::Handlebars;
use serde::Serialize;

use crate::prelude::*;

const SETTINGS_PAGE: &str = "login_redirects";
const SETTINGS_PAGE_SOURCE: &str = include_str!("../templates/login_redirects.html.hbs");

#[derive(Debug, Serialize)]
struct FormField<'a> {
	name: String,
	label: &'a str,
	role: &'a str,
	example: &'a str,
	value: &'a str,
}

#[derive(Debug, Serialize)]
struct SettingsPage<'a> {
	saved: bool,
	fields: Vec<FormField<'a>>,
}

/// Template engine for the administrative pages
pub struct TemplateEngine {
	handlebars: Handlebars<'static>,
}

impl TemplateEngine {
	pub fn new() -> ClResult<Self> {
		let mut handlebars = Handlebars::new();

		// Enable strict mode to catch undefined variables
		handlebars.set_strict_mode(true);
		handlebars
			.register_template_string(SETTINGS_PAGE, SETTINGS_PAGE_SOURCE)
			.map_err(|e| Error::Internal(format!("Failed to register template: {}", e)))?;

		Ok(Self { handlebars })
	}

	/// Render the settings form with the current value of each role
	pub fn render_settings_page(&self, values: &RoleMap<String>, saved: bool) -> ClResult<String> {
		let fields = values
			.iter()
			.map(|(role, value)| FormField {
				name: role.form_field(),
				label: role.label(),
				role: role.as_str(),
				example: role.default_path(),
				value,
			})
			.collect();

		self.handlebars
			.render(SETTINGS_PAGE, &SettingsPage { saved, fields })
			.map_err(|e| Error::Internal(format!("Failed to render settings page: {}", e)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn defaults() -> RoleMap<String> {
		RoleMap::new(|role| role.default_path().to_string())
	}

	#[test]
	fn test_renders_one_input_per_role() {
		let engine = TemplateEngine::new().unwrap();
		let html = engine.render_settings_page(&defaults(), false).unwrap();

		for role in Role::ALL {
			assert!(html.contains(&format!(r#"name="{}""#, role.form_field())));
		}
		assert!(html.contains(r#"value="/admin-dashboard/""#));
		assert!(!html.contains("Settings saved."));
	}

	#[test]
	fn test_saved_notice() {
		let engine = TemplateEngine::new().unwrap();
		let html = engine.render_settings_page(&defaults(), true).unwrap();
		assert!(html.contains("Settings saved."));
	}

	#[test]
	fn test_values_are_escaped() {
		let engine = TemplateEngine::new().unwrap();
		let mut values = defaults();
		values.set(Role::Leder, r#""><script>"#.to_string());
		let html = engine.render_settings_page(&values, false).unwrap();
		assert!(!html.contains("<script>"));
		assert!(html.contains("&quot;&gt;&lt;script&gt;"));
	}
}

// vim: ts=4
