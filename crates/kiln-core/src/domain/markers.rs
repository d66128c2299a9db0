//! Conditional directory markers and the inclusion filter.
//!
//! A corpus entry whose path runs through an `if-<name>` directory is only
//! part of the output when the configuration field that marker gates has the
//! matching value. The vocabulary is closed: [`ConditionalMarker`] lists every
//! marker, and [`validate_markers`] rejects any other `if-` directory when the
//! corpus is loaded.
//!
//! Markers are matched as whole directory segments, so `root/if-monorepo/x`
//! and a leading `if-monorepo/x` both count. A file *named* `if-monorepo` is
//! not a marker.

use std::fmt;

use crate::domain::{
    entities::{common, project_config::ProjectConfig},
    error::DomainError,
    value_objects::{Analytics, MarketingSite, Structure, Uploads},
};

/// Prefix shared by every conditional directory.
pub const MARKER_PREFIX: &str = "if-";

/// Every conditional directory the corpus may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionalMarker {
    Monorepo,
    Standalone,
    Payload,
    Posthog,
    Uploadthing,
}

impl ConditionalMarker {
    pub const ALL: [Self; 5] = [
        Self::Monorepo,
        Self::Standalone,
        Self::Payload,
        Self::Posthog,
        Self::Uploadthing,
    ];

    /// Directory name carrying this marker.
    pub const fn segment(&self) -> &'static str {
        match self {
            Self::Monorepo => "if-monorepo",
            Self::Standalone => "if-standalone",
            Self::Payload => "if-payload",
            Self::Posthog => "if-posthog",
            Self::Uploadthing => "if-uploadthing",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.segment() == segment)
    }

    /// Whether `config` enables the subtree under this marker.
    pub fn is_satisfied_by(&self, config: &ProjectConfig) -> bool {
        match self {
            Self::Monorepo => config.structure() == Structure::Monorepo,
            Self::Standalone => config.structure() == Structure::Standalone,
            Self::Payload => config.marketing_site() == MarketingSite::Payload,
            Self::Posthog => config.analytics() == Analytics::Posthog,
            Self::Uploadthing => config.uploads() == Uploads::Uploadthing,
        }
    }
}

impl fmt::Display for ConditionalMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Known markers on `path`, outermost first.
pub fn markers(path: &str) -> Vec<ConditionalMarker> {
    common::directory_segments(path)
        .filter_map(ConditionalMarker::from_segment)
        .collect()
}

/// Inclusion filter: every marker on the path must hold.
///
/// Paths without markers are always included. Nested markers are ANDed, so a
/// contradictory pair (`if-monorepo/.../if-standalone/`) is never included.
pub fn include(path: &str, config: &ProjectConfig) -> bool {
    common::directory_segments(path)
        .filter_map(ConditionalMarker::from_segment)
        .all(|marker| marker.is_satisfied_by(config))
}

/// Reject `if-` directories outside the known vocabulary.
pub fn validate_markers(path: &str) -> Result<(), DomainError> {
    match common::directory_segments(path).find(|segment| {
        segment.starts_with(MARKER_PREFIX) && ConditionalMarker::from_segment(segment).is_none()
    }) {
        Some(unknown) => Err(DomainError::UnknownMarker {
            marker: unknown.to_string(),
            path: path.to_string(),
        }),
        None => Ok(()),
    }
}

/// Drop marker directories from a path; they gate inclusion, they are not
/// output directories.
pub fn strip_markers(path: &str) -> String {
    let name = common::file_name(path);
    common::directory_segments(path)
        .filter(|segment| ConditionalMarker::from_segment(segment).is_none())
        .chain(std::iter::once(name))
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Analytics, MarketingSite, Structure};

    fn config(structure: Structure, site: MarketingSite) -> ProjectConfig {
        ProjectConfig::builder("acme")
            .structure(structure)
            .marketing_site(site)
            .build()
            .unwrap()
    }

    #[test]
    fn unmarked_paths_are_always_included() {
        let cfg = config(Structure::Standalone, MarketingSite::None);
        assert!(include("package.json", &cfg));
        assert!(include("apps/web/src/page.tsx", &cfg));
    }

    #[test]
    fn monorepo_marker_follows_structure() {
        let mono = config(Structure::Monorepo, MarketingSite::None);
        let solo = config(Structure::Standalone, MarketingSite::None);

        assert!(include("root/if-monorepo/turbo.json", &mono));
        assert!(!include("root/if-monorepo/turbo.json", &solo));
        assert!(include("if-standalone/next.config.ts", &solo));
        assert!(!include("if-standalone/next.config.ts", &mono));
    }

    #[test]
    fn nested_markers_are_anded() {
        let path = "root/if-monorepo/apps/if-payload/payload.config.ts";

        assert!(include(path, &config(Structure::Monorepo, MarketingSite::Payload)));
        assert!(!include(path, &config(Structure::Monorepo, MarketingSite::None)));
        assert!(!include(path, &config(Structure::Standalone, MarketingSite::Payload)));
    }

    #[test]
    fn contradictory_markers_never_include() {
        let path = "if-monorepo/x/if-standalone/y.ts";
        assert!(!include(path, &config(Structure::Monorepo, MarketingSite::None)));
        assert!(!include(path, &config(Structure::Standalone, MarketingSite::None)));
    }

    #[test]
    fn provider_markers() {
        let cfg = ProjectConfig::builder("acme")
            .analytics(Analytics::Posthog)
            .build()
            .unwrap();
        assert!(include("lib/if-posthog/posthog.ts", &cfg));
        assert!(!include("lib/if-uploadthing/uploadthing.ts", &cfg));
    }

    #[test]
    fn file_named_like_a_marker_is_not_a_marker() {
        let cfg = config(Structure::Standalone, MarketingSite::None);
        assert!(include("docs/if-monorepo", &cfg));
        assert!(markers("docs/if-monorepo").is_empty());
    }

    #[test]
    fn unknown_markers_fail_loudly() {
        assert_eq!(
            validate_markers("apps/if-stripe/checkout.ts").unwrap_err(),
            DomainError::UnknownMarker {
                marker: "if-stripe".into(),
                path: "apps/if-stripe/checkout.ts".into(),
            }
        );
        assert!(validate_markers("apps/if-payload/page.tsx").is_ok());
        assert!(validate_markers("apps/iframe/page.tsx").is_ok());
    }

    #[test]
    fn strip_markers_keeps_other_segments() {
        assert_eq!(strip_markers("app/if-payload/page.tsx.hbs"), "app/page.tsx.hbs");
        assert_eq!(strip_markers("if-monorepo/turbo.json"), "turbo.json");
        assert_eq!(strip_markers("a/b/c"), "a/b/c");
    }

    #[test]
    fn markers_are_listed_outermost_first() {
        assert_eq!(
            markers("if-monorepo/apps/if-posthog/x.ts"),
            [ConditionalMarker::Monorepo, ConditionalMarker::Posthog]
        );
    }
}
