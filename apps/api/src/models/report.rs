use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Interview report display data. Static fixture content; nothing here computes scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewReport {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub session: ReportSession,
    pub interviewer: ReportInterviewer,
    pub performance_score: PerformanceScore,
    pub behavioral_analysis: BehavioralAnalysis,
    pub speech_analysis: SpeechAnalysis,
    pub field_knowledge_evaluation: FieldKnowledgeEvaluation,
    pub report_summary: ReportSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSession {
    pub duration: String,
    pub interview_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInterviewer {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceScore {
    pub overall: u32,
    pub breakdown: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralAnalysis {
    pub emotional_state: EmotionalState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalState {
    pub overall: String,
    pub confidence: u32,
    pub nervousness: u32,
    pub engagement: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechAnalysis {
    pub overall_average: u32,
    pub speaking: SpeakingScores,
    pub listening: ListeningScores,
    pub proficiency: ProficiencyScores,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingScores {
    pub overall: u32,
    pub clarity_score: u32,
    pub pace_score: u32,
    pub volume_consistency: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningScores {
    pub overall: u32,
    pub comprehension: u32,
    pub response_time: u32,
    pub follow_up_questions: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProficiencyScores {
    pub overall: u32,
    pub vocabulary_range: u32,
    pub grammar_accuracy: u32,
    pub technical_terminology: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldKnowledgeEvaluation {
    pub understanding: u32,
    pub applying: u32,
    pub analyzing: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub overall_feedback: String,
    pub recommendation: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub next_steps: Vec<String>,
}

impl InterviewReport {
    /// The fixture report re-keyed to a session.
    pub fn for_session(&self, session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            ..self.clone()
        }
    }
}
