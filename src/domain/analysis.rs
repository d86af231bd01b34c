//! Analysis result domain model.
//!
//! [`AnalysisResult`] is the structured explanation returned by the backend
//! for both the simplify and the article-lookup endpoints. Field names on the
//! wire are camelCase; every collection defaults to empty when the backend
//! omits it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured explanation of a piece of legal text.
///
/// Owned by the session once received and replaced wholesale on each new
/// successful request.
///
/// # Examples
///
/// ```
/// use saral::AnalysisResult;
///
/// let json = r#"{
///     "simplifiedText": "Everyone is equal before the law.",
///     "keyPoints": ["Equality before law", "Equal protection of laws"],
///     "legalReferences": ["Article 14"],
///     "definedTerms": {"State": "The government and its bodies."}
/// }"#;
///
/// let result: AnalysisResult = serde_json::from_str(json).unwrap();
/// assert_eq!(result.key_points.len(), 2);
/// assert_eq!(result.defined_terms["State"], "The government and its bodies.");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Plain-language summary for a non-legal audience.
    #[serde(default)]
    pub simplified_text: String,

    /// Critical takeaways, in the order the backend produced them.
    #[serde(default)]
    pub key_points: Vec<String>,

    /// Referenced laws, articles or clauses, in backend order.
    #[serde(default)]
    pub legal_references: Vec<String>,

    /// Complex terms mapped to one-sentence explanations.
    #[serde(default)]
    pub defined_terms: BTreeMap<String, String>,

    /// Legal context the explanation was framed in, when the backend provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contextual_focus: Option<String>,
}

impl AnalysisResult {
    /// Returns true when the result carries no content in any section.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.simplified_text.trim().is_empty()
            && self.key_points.is_empty()
            && self.legal_references.is_empty()
            && self.defined_terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_default_to_empty() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"simplifiedText": "Short answer."}"#).unwrap();

        assert_eq!(result.simplified_text, "Short answer.");
        assert!(result.key_points.is_empty());
        assert!(result.legal_references.is_empty());
        assert!(result.defined_terms.is_empty());
        assert!(result.contextual_focus.is_none());
        assert!(!result.is_empty());
    }

    #[test]
    fn unknown_backend_fields_are_ignored() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{
                "simplifiedText": "x",
                "references": ["ignored"],
                "constitutionofindia": "ignored",
                "contextualFocus": "Fundamental rights"
            }"#,
        )
        .unwrap();

        assert_eq!(result.contextual_focus.as_deref(), Some("Fundamental rights"));
    }

    #[test]
    fn serializes_with_wire_names() {
        let result = AnalysisResult {
            simplified_text: "s".to_string(),
            key_points: vec!["k".to_string()],
            ..AnalysisResult::default()
        };
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["simplifiedText"], "s");
        assert_eq!(value["keyPoints"][0], "k");
        assert!(value.get("contextualFocus").is_none());
    }
}
