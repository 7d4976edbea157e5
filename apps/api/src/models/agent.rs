use serde::{Deserialize, Serialize};

/// A conversational counterpart attached to a room as metadata.
///
/// Practice agents come from the fixtures verbatim; interviewer personas are
/// synthesized in the same shape so the agent worker reads one format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    pub display_name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub agent_type: String,
    pub level: String,
    pub specialty: String,
    pub gender: String,
    /// Minutes.
    pub duration: u32,
    pub avatar: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgentFile {
    pub agents: Vec<AgentProfile>,
}

/// A practice category with the agents offered under it.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub agents: Vec<AgentProfile>,
}

/// Display labels for the known practice categories, in presentation order.
pub const CATEGORY_LABELS: &[(&str, &str, &str)] = &[
    (
        "interview",
        "Interview",
        "Practice technical and behavioral interviews",
    ),
    (
        "presentation",
        "Presentation Skills",
        "Improve your public speaking and presentation abilities",
    ),
    (
        "english_speaking",
        "English Speaking",
        "Practice conversational English for various scenarios",
    ),
    (
        "general",
        "General Purpose",
        "Practice various communication and debate skills",
    ),
];
