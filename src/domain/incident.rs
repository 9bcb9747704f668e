//! Incident domain types.
//!
//! An incident is an immutable report of an AI system misbehaving.

use serde::Serialize;
use utoipa::ToSchema;

/// Severity of a reported incident.
///
/// The set is closed: names are matched exactly, so `"low"` is not a severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Severity {
    /// Minor impact.
    Low,
    /// Noticeable impact.
    Medium,
    /// Serious impact.
    High,
}

impl Severity {
    /// Every accepted severity, in ascending order.
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    /// Canonical name as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }

    /// Human-readable list of the accepted names, e.g. `[Low, Medium, High]`.
    pub fn allowed() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(Severity::as_str).collect();
        format!("[{}]", names.join(", "))
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str() == s)
            .ok_or_else(|| format!("Unknown severity: {}", s))
    }
}

/// A persisted incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Incident {
    /// Store-assigned identifier, never reused.
    pub id: i64,

    /// Short summary.
    pub title: String,

    /// What happened.
    pub description: String,

    /// How bad it was.
    pub severity: Severity,
}

/// A validated incident that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncident {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl NewIncident {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// The fixed sample incidents loaded into an empty store.
    pub fn samples() -> Vec<NewIncident> {
        vec![
            NewIncident::new(
                "AI Chatbot went rogue",
                "The chatbot started generating offensive content.",
                Severity::High,
            ),
            NewIncident::new(
                "Self-driving car hesitation",
                "Car froze unexpectedly at a green light.",
                Severity::Medium,
            ),
            NewIncident::new(
                "Recommendation system bias",
                "Product recommendations were heavily biased.",
                Severity::Low,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn any_severity() -> impl Strategy<Value = Severity> {
        prop_oneof![
            Just(Severity::Low),
            Just(Severity::Medium),
            Just(Severity::High),
        ]
    }

    #[test]
    fn test_severity_parses_exact_names() {
        assert_eq!("Low".parse::<Severity>().unwrap(), Severity::Low);
        assert_eq!("Medium".parse::<Severity>().unwrap(), Severity::Medium);
        assert_eq!("High".parse::<Severity>().unwrap(), Severity::High);
    }

    #[test]
    fn test_severity_rejects_other_spellings() {
        for bad in ["low", "HIGH", "medium ", "", "Critical", " Low"] {
            assert!(bad.parse::<Severity>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_severity_serializes_by_name() {
        let json = serde_json::to_string(&Severity::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
    }

    #[test]
    fn test_allowed_lists_all_severities() {
        assert_eq!(Severity::allowed(), "[Low, Medium, High]");
    }

    #[test]
    fn test_incident_wire_shape() {
        let incident = Incident {
            id: 7,
            title: "X".to_string(),
            description: "Y".to_string(),
            severity: Severity::Low,
        };
        let value = serde_json::to_value(&incident).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 7, "title": "X", "description": "Y", "severity": "Low"})
        );
    }

    #[test]
    fn test_samples_are_distinct_and_valid() {
        let samples = NewIncident::samples();
        assert_eq!(samples.len(), 3);
        assert!(samples
            .iter()
            .all(|s| !s.title.is_empty() && !s.description.is_empty()));
        assert_eq!(samples[0].title, "AI Chatbot went rogue");
        assert_eq!(samples[1].title, "Self-driving car hesitation");
        assert_eq!(samples[2].title, "Recommendation system bias");
    }

    proptest! {
        #[test]
        fn prop_only_exact_names_parse(s in "\\PC{0,12}") {
            let is_name = Severity::ALL.iter().any(|severity| severity.as_str() == s);
            prop_assert_eq!(s.parse::<Severity>().is_ok(), is_name);
        }

        #[test]
        fn prop_case_variants_are_rejected(
            severity in any_severity(),
            flips in prop::collection::vec(any::<bool>(), 6),
        ) {
            let variant: String = severity
                .as_str()
                .chars()
                .zip(flips.iter().chain(std::iter::repeat(&false)))
                .map(|(c, &flip)| {
                    if flip && c.is_lowercase() {
                        c.to_ascii_uppercase()
                    } else if flip {
                        c.to_ascii_lowercase()
                    } else {
                        c
                    }
                })
                .collect();
            prop_assume!(variant != severity.as_str());
            prop_assert!(variant.parse::<Severity>().is_err());
        }

        #[test]
        fn prop_display_parses_back(severity in any_severity()) {
            prop_assert_eq!(severity.to_string().parse::<Severity>(), Ok(severity));
        }
    }
}
