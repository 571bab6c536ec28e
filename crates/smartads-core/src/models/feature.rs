//! Feature catalog.
//!
//! The catalog is fixed at six entries and is read-only at runtime.
//! Feature permissions on accounts are always a subset of this list.

use serde::{Deserialize, Serialize};

/// Stable key of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureId {
    Logo,
    Poster,
    Video,
    Caption,
    Voiceover,
    Analytics,
}

impl FeatureId {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureId::Logo => "logo",
            FeatureId::Poster => "poster",
            FeatureId::Video => "video",
            FeatureId::Caption => "caption",
            FeatureId::Voiceover => "voiceover",
            FeatureId::Analytics => "analytics",
        }
    }
}

/// A named capability unit gating access to a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub id: FeatureId,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
}

/// The full feature catalog, in display order.
pub const ALL_FEATURES: [Feature; 6] = [
    Feature {
        id: FeatureId::Logo,
        name: "Logo Designer",
        icon: "\u{1F3A8}",
        category: "Design",
    },
    Feature {
        id: FeatureId::Poster,
        name: "Poster Creator",
        icon: "\u{1F4C4}",
        category: "Design",
    },
    Feature {
        id: FeatureId::Video,
        name: "Video Generator",
        icon: "\u{1F3AC}",
        category: "Video",
    },
    Feature {
        id: FeatureId::Caption,
        name: "Caption Writer",
        icon: "\u{270D}\u{FE0F}",
        category: "Content",
    },
    Feature {
        id: FeatureId::Voiceover,
        name: "Voiceover Maker",
        icon: "\u{1F3A4}",
        category: "Audio",
    },
    Feature {
        id: FeatureId::Analytics,
        name: "Analytics",
        icon: "\u{1F4CA}",
        category: "Analytics",
    },
];

/// Every feature id, in catalog order. Head accounts always hold this.
pub fn full_catalog() -> Vec<FeatureId> {
    ALL_FEATURES.iter().map(|f| f.id).collect()
}
