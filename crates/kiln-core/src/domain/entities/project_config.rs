//! The `ProjectConfig` value object and its builder.
//!
//! A `ProjectConfig` is the fully-resolved description of the project to
//! generate. It arrives already validated by the configuration collaborator
//! (prompts, flags, config files); the engine only re-checks the few
//! invariants the type system cannot express, as a guard clause.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{
        Addon, Analytics, Auth, MarketingSite, Payments, Structure, Theme, UiLibrary, Uploads,
    },
};

/// Immutable, validated project configuration.
///
/// Serialises with camelCase keys; those keys are the names templates use
/// (`{{projectName}}`, `{{#if (eq marketingSite "payload")}}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(default)]
    structure: Structure,
    #[serde(default)]
    marketing_site: MarketingSite,
    #[serde(default)]
    analytics: Analytics,
    #[serde(default)]
    uploads: Uploads,
    #[serde(default)]
    auth: Auth,
    #[serde(default)]
    payments: Payments,
    #[serde(default)]
    design_system: DesignSystem,
    #[serde(default)]
    addons: BTreeSet<Addon>,
}

/// Design-system options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DesignSystem {
    #[serde(default)]
    pub library: UiLibrary,
    #[serde(default)]
    pub theme: Theme,
}

impl ProjectConfig {
    /// Start building a configuration for `project_name`.
    pub fn builder(project_name: impl Into<String>) -> ProjectConfigBuilder {
        ProjectConfigBuilder::new(project_name)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }
    /// Human-facing name; falls back to the project name.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.project_name)
    }
    pub const fn structure(&self) -> Structure {
        self.structure
    }
    pub const fn marketing_site(&self) -> MarketingSite {
        self.marketing_site
    }
    pub const fn analytics(&self) -> Analytics {
        self.analytics
    }
    pub const fn uploads(&self) -> Uploads {
        self.uploads
    }
    pub const fn auth(&self) -> Auth {
        self.auth
    }
    pub const fn payments(&self) -> Payments {
        self.payments
    }
    pub const fn design_system(&self) -> DesignSystem {
        self.design_system
    }
    pub fn addons(&self) -> &BTreeSet<Addon> {
        &self.addons
    }
    pub fn has_addon(&self, addon: Addon) -> bool {
        self.addons.contains(&addon)
    }

    /// Guard clause over the invariants enums cannot carry.
    ///
    /// Called by the builder and by the VFS builder before a run; available for
    /// re-validation after deserialization.
    pub fn validate(&self) -> Result<(), DomainError> {
        let name = self.project_name.trim();

        if name.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "projectName",
            });
        }

        if name != self.project_name {
            return Err(DomainError::InvalidConfig(format!(
                "project name '{}' has leading or trailing whitespace",
                self.project_name
            )));
        }

        if name.contains(['/', '\\']) {
            return Err(DomainError::InvalidConfig(format!(
                "project name '{}' cannot contain path separators",
                self.project_name
            )));
        }

        if name == "." || name == ".." {
            return Err(DomainError::InvalidConfig(format!(
                "project name '{}' is reserved",
                self.project_name
            )));
        }

        if let Some(display) = &self.display_name {
            if display.trim().is_empty() {
                return Err(DomainError::InvalidConfig(
                    "display name cannot be blank".into(),
                ));
            }
        }

        Ok(())
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, marketing: {}, analytics: {}, uploads: {})",
            self.project_name, self.structure, self.marketing_site, self.analytics, self.uploads
        )
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`ProjectConfig`].
///
/// Every enumerated field starts at its default; `build()` runs
/// [`ProjectConfig::validate`].
#[derive(Debug, Clone)]
pub struct ProjectConfigBuilder {
    config: ProjectConfig,
}

impl ProjectConfigBuilder {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            config: ProjectConfig {
                project_name: project_name.into(),
                display_name: None,
                structure: Structure::default(),
                marketing_site: MarketingSite::default(),
                analytics: Analytics::default(),
                uploads: Uploads::default(),
                auth: Auth::default(),
                payments: Payments::default(),
                design_system: DesignSystem::default(),
                addons: BTreeSet::new(),
            },
        }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.config.display_name = Some(name.into());
        self
    }

    pub fn structure(mut self, structure: Structure) -> Self {
        self.config.structure = structure;
        self
    }

    pub fn marketing_site(mut self, site: MarketingSite) -> Self {
        self.config.marketing_site = site;
        self
    }

    pub fn analytics(mut self, analytics: Analytics) -> Self {
        self.config.analytics = analytics;
        self
    }

    pub fn uploads(mut self, uploads: Uploads) -> Self {
        self.config.uploads = uploads;
        self
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.config.auth = auth;
        self
    }

    pub fn payments(mut self, payments: Payments) -> Self {
        self.config.payments = payments;
        self
    }

    pub fn design_system(mut self, library: UiLibrary, theme: Theme) -> Self {
        self.config.design_system = DesignSystem { library, theme };
        self
    }

    pub fn addon(mut self, addon: Addon) -> Self {
        self.config.addons.insert(addon);
        self
    }

    pub fn addons(mut self, addons: impl IntoIterator<Item = Addon>) -> Self {
        self.config.addons.extend(addons);
        self
    }

    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = ProjectConfig::builder("acme").build().unwrap();

        assert_eq!(config.structure(), Structure::Monorepo);
        assert_eq!(config.marketing_site(), MarketingSite::None);
        assert_eq!(config.display_name(), "acme");
        assert!(config.addons().is_empty());
    }

    #[test]
    fn builder_collects_addons_as_a_set() {
        let config = ProjectConfig::builder("acme")
            .addon(Addon::Biome)
            .addons([Addon::Husky, Addon::Biome])
            .build()
            .unwrap();

        assert_eq!(config.addons().len(), 2);
        assert!(config.has_addon(Addon::Husky));
    }

    #[test]
    fn rejects_blank_and_path_like_names() {
        assert_eq!(
            ProjectConfig::builder("  ").build().unwrap_err(),
            DomainError::MissingRequiredField {
                field: "projectName"
            }
        );
        assert!(ProjectConfig::builder("a/b").build().is_err());
        assert!(ProjectConfig::builder("..").build().is_err());
        assert!(ProjectConfig::builder(" padded").build().is_err());
    }

    #[test]
    fn serialises_with_template_facing_keys() {
        let config = ProjectConfig::builder("acme")
            .marketing_site(MarketingSite::Payload)
            .addon(Addon::Storybook)
            .build()
            .unwrap();

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["projectName"], "acme");
        assert_eq!(value["marketingSite"], "payload");
        assert_eq!(value["designSystem"]["library"], "shadcn");
        assert_eq!(value["addons"], serde_json::json!(["storybook"]));
        assert!(value.get("displayName").is_none());
    }

    #[test]
    fn deserialises_partial_documents() {
        let config: ProjectConfig = serde_json::from_str(
            r#"{ "projectName": "acme", "structure": "standalone", "addons": ["pwa", "biome"] }"#,
        )
        .unwrap();

        assert_eq!(config.structure(), Structure::Standalone);
        assert_eq!(config.auth(), Auth::BetterAuth);
        assert!(config.has_addon(Addon::Pwa));
    }

    #[test]
    fn rejects_unknown_enum_values_on_deserialise() {
        let result: Result<ProjectConfig, _> =
            serde_json::from_str(r#"{ "projectName": "acme", "analytics": "mixpanel" }"#);
        assert!(result.is_err());
    }
}
