//! # Feature Entries
//!
//! Feature lists carry two wire shapes: legacy bare strings and structured
//! cards. The [`Feature`] variant models both explicitly so call sites never
//! have to type-check raw JSON, and [`promote_features`] is the single, total
//! migration from a mixed history of shapes to all-card form.
//!
//! Cards keep `text` and `title` synchronized: two rendering call sites read
//! different keys for the same display string, so both are always written.

use serde::{Deserialize, Serialize};

/// Icon assigned to legacy string entries when an array is promoted.
pub const DEFAULT_FEATURE_ICON: &str = "Check";

/// One entry of a section's `features` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Feature {
    /// Legacy shape: the display string alone.
    Text(String),

    /// Structured shape.
    Card(FeatureCard),
}

/// Structured feature entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCard {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub title: String,
}

impl FeatureCard {
    /// Card a legacy string entry migrates into.
    pub fn from_text(index: usize, text: &str) -> Self {
        Self {
            id: format!("feature-{index}"),
            icon: DEFAULT_FEATURE_ICON.to_string(),
            text: text.to_string(),
            title: text.to_string(),
        }
    }

    /// Guarantee both display keys are populated, each falling back to the
    /// other.
    pub fn normalized(mut self) -> Self {
        if self.text.is_empty() {
            self.text = self.title.clone();
        }
        if self.title.is_empty() {
            self.title = self.text.clone();
        }
        self
    }
}

impl Feature {
    pub fn is_card(&self) -> bool {
        matches!(self, Feature::Card(_))
    }
}

/// Total migration of a feature array to all-card form.
///
/// String entries become default cards (`feature-{index}` id, default icon),
/// existing cards are normalized so `text` and `title` are both set. The
/// result is always homogeneous.
pub fn promote_features(features: &[Feature]) -> Vec<FeatureCard> {
    features
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Feature::Text(text) => FeatureCard::from_text(index, text),
            Feature::Card(card) => card.clone().normalized(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untagged_shapes_round_trip() {
        let legacy: Feature = serde_json::from_value(json!("Fast")).unwrap();
        assert_eq!(legacy, Feature::Text("Fast".to_string()));

        let card: Feature = serde_json::from_value(json!({
            "id": "feature-0", "icon": "Bolt", "text": "Fast", "title": "Fast"
        }))
        .unwrap();
        assert!(card.is_card());
    }

    #[test]
    fn test_promote_defaults_for_strings() {
        let promoted = promote_features(&[
            Feature::Text("A".to_string()),
            Feature::Text("B".to_string()),
        ]);

        assert_eq!(promoted[0].id, "feature-0");
        assert_eq!(promoted[0].icon, DEFAULT_FEATURE_ICON);
        assert_eq!(promoted[1].text, "B");
        assert_eq!(promoted[1].title, "B");
    }

    #[test]
    fn test_promote_normalizes_partial_cards() {
        let promoted = promote_features(&[Feature::Card(FeatureCard {
            id: "feature-0".to_string(),
            icon: "Star".to_string(),
            text: String::new(),
            title: "Only title".to_string(),
        })]);

        assert_eq!(promoted[0].text, "Only title");
        assert_eq!(promoted[0].title, "Only title");
        assert_eq!(promoted[0].icon, "Star");
    }
}
