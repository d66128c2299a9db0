//! Domain value objects: the enumerated choices of a project configuration.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! Each field of [`ProjectConfig`](crate::domain::ProjectConfig) that is not a
//! display string holds one of these, so a configuration can never carry a
//! free-form value where templates expect a closed set.
//!
//! The string form of each variant is the value templates compare against
//! (`{{#if (eq analytics "posthog")}}`), so `as_str`, `Display`, `FromStr`
//! and serde all agree on it.
//!
//! # Adding New Variants
//!
//! 1. Add the variant and its string form to the `config_enum!` invocation
//! 2. If it gates a conditional directory, add it to `markers.rs`
//! 3. Done — nothing else changes

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed configuration enum with its canonical string forms.
macro_rules! config_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(DomainError::InvalidConfig(format!(
                        "unknown {} '{}' (expected one of: {})",
                        $field,
                        other,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }
    };
}

// ── Structure ────────────────────────────────────────────────────────────────

config_enum! {
    /// Repository layout of the generated project.
    #[derive(Default)]
    Structure, "structure" {
        #[default]
        Monorepo => "monorepo",
        Standalone => "standalone",
    }
}

// ── Marketing site ───────────────────────────────────────────────────────────

config_enum! {
    /// Marketing-site variant shipped next to the app.
    #[derive(Default)]
    MarketingSite, "marketing site" {
        Payload => "payload",
        #[default]
        None => "none",
    }
}

// ── Providers ────────────────────────────────────────────────────────────────

config_enum! {
    /// Product analytics provider.
    #[derive(Default)]
    Analytics, "analytics provider" {
        Posthog => "posthog",
        #[default]
        None => "none",
    }
}

config_enum! {
    /// File upload provider.
    #[derive(Default)]
    Uploads, "uploads provider" {
        Uploadthing => "uploadthing",
        #[default]
        None => "none",
    }
}

config_enum! {
    /// Authentication provider.
    #[derive(Default)]
    Auth, "auth provider" {
        #[default]
        BetterAuth => "better-auth",
        Clerk => "clerk",
        None => "none",
    }
}

config_enum! {
    /// Payment provider.
    #[derive(Default)]
    Payments, "payments provider" {
        Polar => "polar",
        Stripe => "stripe",
        #[default]
        None => "none",
    }
}

// ── Design system ────────────────────────────────────────────────────────────

config_enum! {
    /// Component library the UI package is built on.
    #[derive(Default)]
    UiLibrary, "ui library" {
        #[default]
        Shadcn => "shadcn",
        BaseUi => "base-ui",
        None => "none",
    }
}

config_enum! {
    /// Base colour palette.
    #[derive(Default)]
    Theme, "theme" {
        #[default]
        Neutral => "neutral",
        Zinc => "zinc",
        Slate => "slate",
        Stone => "stone",
    }
}

// ── Addons ───────────────────────────────────────────────────────────────────

config_enum! {
    /// Optional tooling toggled on as a set.
    Addon, "addon" {
        Biome => "biome",
        Husky => "husky",
        Storybook => "storybook",
        Pwa => "pwa",
        Tauri => "tauri",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Structure::from_str("Monorepo").unwrap(), Structure::Monorepo);
        assert_eq!(Auth::from_str(" better-auth ").unwrap(), Auth::BetterAuth);
    }

    #[test]
    fn unknown_value_lists_alternatives() {
        let err = Payments::from_str("paypal").unwrap_err();
        let DomainError::InvalidConfig(msg) = err else {
            panic!("expected InvalidConfig");
        };
        assert!(msg.contains("polar, stripe, none"));
    }

    #[test]
    fn serde_uses_template_facing_names() {
        assert_eq!(
            serde_json::to_string(&UiLibrary::BaseUi).unwrap(),
            "\"base-ui\""
        );
        let parsed: MarketingSite = serde_json::from_str("\"payload\"").unwrap();
        assert_eq!(parsed, MarketingSite::Payload);
    }

    #[test]
    fn defaults_are_the_minimal_stack() {
        assert_eq!(MarketingSite::default(), MarketingSite::None);
        assert_eq!(Analytics::default(), Analytics::None);
        assert_eq!(Structure::default(), Structure::Monorepo);
    }

    #[test]
    fn every_variant_round_trips_through_display() {
        for addon in Addon::ALL {
            assert_eq!(Addon::from_str(&addon.to_string()).unwrap(), *addon);
        }
    }
}
