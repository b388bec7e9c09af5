use serde::Deserialize;

/// Submitted answer payload, decoded at the HTTP boundary.
///
/// Clients are allowed to send either the bare value (`3`, `[0, 2]`,
/// `"aspen hall"`) or an object wrapping it (`{"selectedIndex": 3}`,
/// `{"selectedIndices": [0, 2]}`, `{"text": "aspen hall"}`). Anything else
/// decodes into `Opaque` and is treated as a wrong answer, never an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubmittedAnswer {
    Index(i64),
    Indices(Vec<i64>),
    Text(String),
    #[serde(rename_all = "camelCase")]
    Fields {
        #[serde(default)]
        selected_index: Option<i64>,
        #[serde(default)]
        selected_indices: Option<Vec<i64>>,
        #[serde(default)]
        text: Option<String>,
    },
    Opaque(serde_json::Value),
}

/// Verdict produced by the answer checker.
///
/// `selected_index` / `selected_indices` echo what was actually compared so
/// the caller can tell the client which wrong choice it picked. For
/// multiple-choice, an unparseable submission is reported as index `-1`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerCheck {
    pub correct: bool,
    pub selected_index: Option<i64>,
    pub selected_indices: Option<Vec<i64>>,
}
