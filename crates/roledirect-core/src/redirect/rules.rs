//! Per-role redirect rules and their resolution against the site base URL

use crate::prelude::*;
use crate::settings::service::SettingsService;

// BaseUrl //
//*********//
/// Site base URL that role targets are resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Box<str>);

impl BaseUrl {
	pub fn parse(input: &str) -> ClResult<Self> {
		let url = url::Url::parse(input)
			.map_err(|e| Error::ConfigError(format!("Invalid base URL '{}': {}", input, e)))?;
		if !matches!(url.scheme(), "http" | "https") {
			return Err(Error::ConfigError(format!(
				"Base URL must be http or https, got '{}'",
				url.scheme()
			)));
		}
		if url.query().is_some() || url.fragment().is_some() {
			return Err(Error::ConfigError("Base URL cannot carry a query or fragment".into()));
		}
		Ok(Self(url.as_str().trim_end_matches('/').into()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Join a site-relative path onto the base URL
	///
	/// `home_url("/leder-dashboard/")` on `https://intra.example` gives
	/// `https://intra.example/leder-dashboard/`.
	pub fn home_url(&self, path: &str) -> String {
		let path = path.trim_start_matches('/');
		if path.is_empty() {
			return self.0.to_string();
		}
		format!("{}/{}", self.0, path)
	}
}

impl Default for BaseUrl {
	fn default() -> Self {
		Self("http://localhost:8080".into())
	}
}

impl std::fmt::Display for BaseUrl {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

// RedirectRules //
//***************//
/// Snapshot of the redirect target configured for each role
///
/// Empty targets are normalized to `None`: an empty value means "no override".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectRules {
	targets: RoleMap<Option<Box<str>>>,
}

impl RedirectRules {
	pub fn new(targets: RoleMap<Option<Box<str>>>) -> Self {
		Self {
			targets: targets.map(|_, target| {
				target.as_deref().map(str::trim).filter(|t| !t.is_empty()).map(Box::from)
			}),
		}
	}

	/// Built-in static targets
	pub fn builtin() -> Self {
		Self::new(RoleMap::new(|role| Some(role.default_path().into())))
	}

	/// Overrides explicitly stored by an administrator
	///
	/// Roles without a stored value, or with a stored empty string, have no
	/// override. Read failures are logged and treated the same way.
	pub async fn load(settings: &SettingsService) -> Self {
		let mut targets: RoleMap<Option<Box<str>>> = RoleMap::default();
		for role in Role::ALL {
			match settings.get_stored_string(&role.setting_key()).await {
				Ok(value) => targets.set(role, value.map(Into::into)),
				Err(err) => warn!("Cannot read redirect override for '{}': {}", role, err),
			}
		}
		Self::new(targets)
	}

	pub fn override_for(&self, role: Role) -> Option<&str> {
		self.targets.get(role).as_deref()
	}

	/// Map roles to a destination URL
	///
	/// Roles are tried in the order given. The first role with an override wins
	/// and its target is resolved against `base`. Without a match `fallback` is
	/// returned unchanged.
	pub fn resolve(
		&self,
		roles: impl IntoIterator<Item = Role>,
		fallback: &str,
		base: &BaseUrl,
	) -> String {
		for role in roles {
			if let Some(target) = self.override_for(role) {
				return base.home_url(target);
			}
		}
		fallback.to_string()
	}

	/// Resolve the recognized roles of `principal`, in attachment order
	pub fn resolve_principal(
		&self,
		principal: Option<&Principal>,
		fallback: &str,
		base: &BaseUrl,
	) -> String {
		match principal {
			Some(principal) => self.resolve(principal.known_roles(), fallback, base),
			None => fallback.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base() -> BaseUrl {
		BaseUrl::parse("https://intra.example").unwrap()
	}

	fn rules_with(role: Role, target: &str) -> RedirectRules {
		let mut targets = RoleMap::default();
		targets.set(role, Some(target.into()));
		RedirectRules::new(targets)
	}

	#[test]
	fn test_base_url_parse() {
		assert_eq!(base().as_str(), "https://intra.example");
		assert_eq!(BaseUrl::parse("https://intra.example/site/").unwrap().as_str(), "https://intra.example/site");
		assert!(BaseUrl::parse("ftp://intra.example").is_err());
		assert!(BaseUrl::parse("not a url").is_err());
		assert!(BaseUrl::parse("https://intra.example/?page=1").is_err());
	}

	#[test]
	fn test_home_url() {
		assert_eq!(base().home_url("/admin-dashboard/"), "https://intra.example/admin-dashboard/");
		assert_eq!(base().home_url("leder/"), "https://intra.example/leder/");
		let sub = BaseUrl::parse("https://intra.example/site").unwrap();
		assert_eq!(sub.home_url("/x/"), "https://intra.example/site/x/");
	}

	#[test]
	fn test_empty_roles_return_fallback() {
		let rules = RedirectRules::builtin();
		assert_eq!(rules.resolve(Vec::new(), "/home/", &base()), "/home/");
		assert_eq!(rules.resolve_principal(None, "/home/", &base()), "/home/");
		assert_eq!(rules.resolve_principal(Some(&Principal::default()), "/home/", &base()), "/home/");
	}

	#[test]
	fn test_builtin_administrator() {
		let rules = RedirectRules::builtin();
		assert_eq!(
			rules.resolve([Role::Administrator], "/home/", &base()),
			"https://intra.example/admin-dashboard/"
		);
	}

	#[test]
	fn test_override_wins() {
		let rules = rules_with(Role::Leder, "/custom-leder/");
		assert_eq!(
			rules.resolve([Role::Leder], "/home/", &base()),
			"https://intra.example/custom-leder/"
		);
	}

	#[test]
	fn test_unrecognized_role_returns_fallback() {
		let rules = RedirectRules::builtin();
		let principal = Principal::new(["subscriber"]);
		assert_eq!(rules.resolve_principal(Some(&principal), "/home/", &base()), "/home/");
	}

	#[test]
	fn test_first_matching_role_wins() {
		let rules = RedirectRules::builtin();
		let principal = Principal::new(["subscriber", "leder", "administrator"]);
		assert_eq!(
			rules.resolve_principal(Some(&principal), "/home/", &base()),
			"https://intra.example/leder-dashboard/"
		);
	}

	#[test]
	fn test_role_without_override_falls_through() {
		let rules = rules_with(Role::Medarbajder, "/team/");
		assert_eq!(
			rules.resolve([Role::Leder, Role::Medarbajder], "/home/", &base()),
			"https://intra.example/team/"
		);
		assert_eq!(rules.resolve([Role::Leder], "/home/", &base()), "/home/");
	}

	#[test]
	fn test_empty_override_is_no_override() {
		let rules = rules_with(Role::Leder, "  ");
		assert_eq!(rules.override_for(Role::Leder), None);
		assert_eq!(rules.resolve([Role::Leder], "/home/", &base()), "/home/");
	}

	#[test]
	fn test_resolve_principal() {
		let rules = RedirectRules::builtin();
		let principal = Principal::new(["medarbajder"]);
		assert_eq!(
			rules.resolve_principal(Some(&principal), "/home/", &base()),
			"https://intra.example/medarbajder-dashboard/"
		);
	}
}

// vim: ts=4
