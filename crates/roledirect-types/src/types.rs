//! Role, role map and principal types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Prefix of the settings keys holding per-role redirect overrides
pub const SETTING_PREFIX: &str = "login_redirect";

// Role //
//******//
/// A role recognized by the redirect rules
///
/// Role strings attached to a principal are open-ended; only these map to a
/// redirect target. Anything else is skipped during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	Administrator,
	Medarbajder,
	Leder,
}

impl Role {
	pub const ALL: [Role; 3] = [Role::Administrator, Role::Medarbajder, Role::Leder];

	pub fn as_str(self) -> &'static str {
		match self {
			Role::Administrator => "administrator",
			Role::Medarbajder => "medarbajder",
			Role::Leder => "leder",
		}
	}

	/// Human-readable label used on the settings page
	pub fn label(self) -> &'static str {
		match self {
			Role::Administrator => "Administrator",
			Role::Medarbajder => "Medarbajder",
			Role::Leder => "Leder",
		}
	}

	/// Built-in redirect target used when no override is configured
	pub fn default_path(self) -> &'static str {
		match self {
			Role::Administrator => "/admin-dashboard/",
			Role::Medarbajder => "/medarbajder-dashboard/",
			Role::Leder => "/leder-dashboard/",
		}
	}

	/// Settings key, e.g. `login_redirect.leder`
	pub fn setting_key(self) -> String {
		format!("{}.{}", SETTING_PREFIX, self.as_str())
	}

	/// Settings form field name, e.g. `leder_redirect`
	pub fn form_field(self) -> String {
		format!("{}_redirect", self.as_str())
	}

	/// Exact, case-sensitive match against the known role names
	pub fn parse(s: &str) -> Option<Role> {
		Role::ALL.into_iter().find(|role| role.as_str() == s)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Role::parse(s).ok_or(Error::Parse)
	}
}

// RoleMap //
//*********//
/// Total mapping from every [`Role`] to a value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMap<T> {
	pub administrator: T,
	pub medarbajder: T,
	pub leder: T,
}

impl<T> RoleMap<T> {
	/// Build a map by evaluating `f` for each role
	pub fn new(mut f: impl FnMut(Role) -> T) -> Self {
		Self {
			administrator: f(Role::Administrator),
			medarbajder: f(Role::Medarbajder),
			leder: f(Role::Leder),
		}
	}

	pub fn get(&self, role: Role) -> &T {
		match role {
			Role::Administrator => &self.administrator,
			Role::Medarbajder => &self.medarbajder,
			Role::Leder => &self.leder,
		}
	}

	pub fn get_mut(&mut self, role: Role) -> &mut T {
		match role {
			Role::Administrator => &mut self.administrator,
			Role::Medarbajder => &mut self.medarbajder,
			Role::Leder => &mut self.leder,
		}
	}

	pub fn set(&mut self, role: Role, value: T) {
		*self.get_mut(role) = value;
	}

	/// Iterate in [`Role::ALL`] order
	pub fn iter(&self) -> impl Iterator<Item = (Role, &T)> {
		Role::ALL.into_iter().map(move |role| (role, self.get(role)))
	}

	pub fn map<U>(&self, mut f: impl FnMut(Role, &T) -> U) -> RoleMap<U> {
		RoleMap::new(|role| f(role, self.get(role)))
	}
}

// Principal //
//***********//
/// The authenticated entity completing login
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Box<str>>,
	#[serde(default)]
	pub roles: Vec<Box<str>>,
}

impl Principal {
	pub fn new<S: Into<Box<str>>>(roles: impl IntoIterator<Item = S>) -> Self {
		Self { id: None, roles: roles.into_iter().map(Into::into).collect() }
	}

	pub fn with_id(mut self, id: impl Into<Box<str>>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Recognized roles in attachment order; unknown role strings are skipped
	pub fn known_roles(&self) -> impl Iterator<Item = Role> + '_ {
		self.roles.iter().filter_map(|r| {
			let role = Role::parse(r);
			if role.is_none() {
				tracing::debug!("Skipping unrecognized role '{}'", r);
			}
			role
		})
	}

	pub fn has_role(&self, role: Role) -> bool {
		self.roles.iter().any(|r| r.as_ref() == role.as_str())
	}
}


// vim: ts=4
