use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A job listing from the reference fixtures. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    pub id: String,
    pub company: String,
    pub role: String,
    pub location: String,
    pub experience: String,
    pub salary: String,
    #[serde(default)]
    pub job_type: Option<String>,
    /// Ordered; the first skill doubles as the domain-specific specialty.
    pub skills: Vec<String>,
    /// Markdown.
    pub description: String,
    pub posted_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobDescriptionFile {
    pub job_descriptions: Vec<JobDescription>,
}
