//! Data models for quiz cases

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fallback explanation text for options the author left blank
pub const FALLBACK_EXPLANATION: &str = "Explanation coming soon.";

/// Subject classification of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Clinical,
    Histopathology,
}

impl Subject {
    /// All subjects, in display order
    pub const ALL: [Subject; 2] = [Subject::Clinical, Subject::Histopathology];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Clinical => "Clinical",
            Subject::Histopathology => "Histopathology",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Fitzpatrick skin-tone class (ordinal, I through VI)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Fitzpatrick {
    I,
    II,
    III,
    IV,
    V,
    VI,
}

impl Fitzpatrick {
    /// All six classes, in ordinal order
    pub const ALL: [Fitzpatrick; 6] = [
        Fitzpatrick::I,
        Fitzpatrick::II,
        Fitzpatrick::III,
        Fitzpatrick::IV,
        Fitzpatrick::V,
        Fitzpatrick::VI,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Fitzpatrick::I => "I",
            Fitzpatrick::II => "II",
            Fitzpatrick::III => "III",
            Fitzpatrick::IV => "IV",
            Fitzpatrick::V => "V",
            Fitzpatrick::VI => "VI",
        }
    }
}

impl std::fmt::Display for Fitzpatrick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Fitzpatrick {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fitzpatrick::ALL
            .into_iter()
            .find(|fp| fp.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown Fitzpatrick class '{}'", s))
    }
}

/// Teaching notes on how a finding presents across skin tones
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinToneNotes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general: Option<String>,
    /// Per-class presentation notes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variants: BTreeMap<Fitzpatrick, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pearls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pitfalls: Vec<String>,
}

/// One quiz case: image, vignette, options, answer, and explanations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    pub image_url: String,
    pub vignette: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    /// Per-option explanation text; totalized over `options` on catalog load
    #[serde(default)]
    pub explanations: BTreeMap<String, String>,
    pub subject: Subject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitzpatrick: Option<Fitzpatrick>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_tone_notes: Option<SkinToneNotes>,
}

impl Case {
    /// Whether `option` is one of this case's choices
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Explanation for an option, falling back to the placeholder
    pub fn explanation_for(&self, option: &str) -> &str {
        self.explanations
            .get(option)
            .map(String::as_str)
            .unwrap_or(FALLBACK_EXPLANATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case_with_options(options: &[&str]) -> Case {
        Case {
            id: "c-1".to_string(),
            image_url: "/images/c1.png".to_string(),
            vignette: "A test vignette.".to_string(),
            correct_answer: options[0].to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            explanations: BTreeMap::new(),
            subject: Subject::Clinical,
            fitzpatrick: None,
            tags: Vec::new(),
            skin_tone_notes: None,
        }
    }

    #[test]
    fn test_has_option() {
        let case = case_with_options(&["Psoriasis", "Tinea"]);
        assert!(case.has_option("Psoriasis"));
        assert!(!case.has_option("Melanoma"));
    }

    #[test]
    fn test_explanation_falls_back_to_placeholder() {
        let mut case = case_with_options(&["Psoriasis", "Tinea"]);
        case.explanations
            .insert("Psoriasis".to_string(), "Classic plaques.".to_string());

        assert_eq!(case.explanation_for("Psoriasis"), "Classic plaques.");
        assert_eq!(case.explanation_for("Tinea"), FALLBACK_EXPLANATION);
    }

    #[test]
    fn test_fitzpatrick_parse_and_order() {
        assert_eq!("iv".parse::<Fitzpatrick>().unwrap(), Fitzpatrick::IV);
        assert!("VII".parse::<Fitzpatrick>().is_err());
        assert!(Fitzpatrick::I < Fitzpatrick::VI);
    }

    #[test]
    fn test_case_serde_round_trip_uses_camel_case() {
        let case = case_with_options(&["A", "B"]);
        let json = serde_json::to_string(&case).unwrap();
        assert!(json.contains("imageUrl"));
        assert!(json.contains("correctAnswer"));

        let back: Case = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, case.id);
        assert_eq!(back.options, case.options);
    }
}
