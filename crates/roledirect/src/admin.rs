//! Login redirect settings page

use axum::{Form, extract::State, response::Html};
use std::collections::HashMap;

use roledirect_core::extract::Auth;
use roledirect_core::sanitize::sanitize_text_field;
use roledirect_core::settings::SettingValue;

use crate::prelude::*;

fn check_admin(principal: &Principal) -> ClResult<()> {
	if principal.has_role(Role::Administrator) {
		Ok(())
	} else {
		warn!("Principal {:?} denied access to the settings page", principal.id);
		Err(Error::PermissionDenied)
	}
}

/// Current value of every role, falling back to the built-in target
async fn current_values(app: &App) -> ClResult<RoleMap<String>> {
	let mut values = RoleMap::default();
	for role in Role::ALL {
		values.set(role, app.settings.get_string(&role.setting_key()).await?);
	}
	Ok(values)
}

/// # GET /admin/login-redirects
pub async fn get_settings_page(
	State(app): State<App>,
	Auth(auth): Auth,
) -> ClResult<Html<String>> {
	check_admin(&auth)?;

	let values = current_values(&app).await?;
	Ok(Html(app.templates.render_settings_page(&values, false)?))
}

/// # POST /admin/login-redirects
///
/// One `<role>_redirect` field per role. A missing field is stored as an
/// empty string, which disables the override for that role.
pub async fn post_settings_page(
	State(app): State<App>,
	Auth(auth): Auth,
	Form(form): Form<HashMap<String, String>>,
) -> ClResult<Html<String>> {
	check_admin(&auth)?;

	for role in Role::ALL {
		let raw = form.get(&role.form_field()).map_or("", String::as_str);
		let value = sanitize_text_field(raw)?;
		app.settings.set(&role.setting_key(), SettingValue::String(value), auth.roles.as_slice()).await?;
	}
	info!("Login redirect settings saved by {:?}", auth.id);

	let values = current_values(&app).await?;
	Ok(Html(app.templates.render_settings_page(&values, true)?))
}

// vim: ts=4
