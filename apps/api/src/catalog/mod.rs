//! Reference catalog — job listings, practice agents, categories and the mock report.
//!
//! Fixtures are embedded at compile time. A directory passed to `Catalog::load`
//! may override any of the three files; absent files fall back to the embedded copy.

pub mod handlers;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::agent::{AgentFile, AgentProfile, Category, CATEGORY_LABELS};
use crate::models::job::{JobDescription, JobDescriptionFile};
use crate::models::report::InterviewReport;

const JOBS_FILE: &str = "job-descriptions.json";
const AGENTS_FILE: &str = "agents.json";
const REPORT_FILE: &str = "mock-interview-report.json";

const EMBEDDED_JOBS: &str = include_str!("../../data/job-descriptions.json");
const EMBEDDED_AGENTS: &str = include_str!("../../data/agents.json");
const EMBEDDED_REPORT: &str = include_str!("../../data/mock-interview-report.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        source: serde_json::Error,
    },

    #[error("Duplicate entry in {file}: {key}")]
    Duplicate { file: &'static str, key: String },
}

/// Immutable reference data shared by all handlers.
#[derive(Debug, Clone)]
pub struct Catalog {
    jobs: Vec<JobDescription>,
    agents: Vec<AgentProfile>,
    report: InterviewReport,
}

impl Catalog {
    /// Loads the catalog, preferring files under `dir` when given.
    pub fn load(dir: Option<&Path>) -> Result<Self, CatalogError> {
        let jobs_raw = read_or_embedded(dir, JOBS_FILE, EMBEDDED_JOBS)?;
        let agents_raw = read_or_embedded(dir, AGENTS_FILE, EMBEDDED_AGENTS)?;
        let report_raw = read_or_embedded(dir, REPORT_FILE, EMBEDDED_REPORT)?;

        let jobs = serde_json::from_str::<JobDescriptionFile>(&jobs_raw)
            .map_err(|source| CatalogError::Parse {
                file: JOBS_FILE,
                source,
            })?
            .job_descriptions;
        let agents = serde_json::from_str::<AgentFile>(&agents_raw)
            .map_err(|source| CatalogError::Parse {
                file: AGENTS_FILE,
                source,
            })?
            .agents;
        let report = serde_json::from_str::<InterviewReport>(&report_raw).map_err(|source| {
            CatalogError::Parse {
                file: REPORT_FILE,
                source,
            }
        })?;

        let catalog = Self::new(jobs, agents, report)?;
        info!(
            "Catalog loaded: {} jobs, {} agents",
            catalog.jobs.len(),
            catalog.agents.len()
        );
        Ok(catalog)
    }

    /// Builds a catalog from parsed parts. Job ids and agent (type, name) pairs must be unique.
    pub fn new(
        jobs: Vec<JobDescription>,
        agents: Vec<AgentProfile>,
        report: InterviewReport,
    ) -> Result<Self, CatalogError> {
        ensure_unique(JOBS_FILE, jobs.iter().map(|j| j.id.clone()))?;
        ensure_unique(
            AGENTS_FILE,
            agents
                .iter()
                .map(|a| format!("{}/{}", a.agent_type, a.name)),
        )?;

        Ok(Self {
            jobs,
            agents,
            report,
        })
    }

    /// The embedded fixtures only.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::load(None)
    }

    pub fn jobs(&self) -> &[JobDescription] {
        &self.jobs
    }

    pub fn job(&self, id: &str) -> Option<&JobDescription> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn agents_of<'a>(&'a self, agent_type: &'a str) -> impl Iterator<Item = &'a AgentProfile> {
        self.agents
            .iter()
            .filter(move |agent| agent.agent_type == agent_type)
    }

    pub fn agent(&self, agent_type: &str, name: &str) -> Option<&AgentProfile> {
        self.agents
            .iter()
            .find(|agent| agent.agent_type == agent_type && agent.name == name)
    }

    /// Categories in display order. Known categories come first, then any
    /// fixture-only types in first-seen order; categories without agents are omitted.
    pub fn categories(&self) -> Vec<Category> {
        let mut types: Vec<&str> = Vec::new();
        for agent in &self.agents {
            if !types.contains(&agent.agent_type.as_str()) {
                types.push(&agent.agent_type);
            }
        }
        types.sort_by_key(|t| {
            CATEGORY_LABELS
                .iter()
                .position(|(id, _, _)| id == t)
                .unwrap_or(CATEGORY_LABELS.len())
        });

        types
            .into_iter()
            .map(|agent_type| {
                let (name, description) = CATEGORY_LABELS
                    .iter()
                    .find(|(id, _, _)| *id == agent_type)
                    .map(|(_, name, description)| (name.to_string(), description.to_string()))
                    .unwrap_or_else(|| (agent_type.to_string(), String::new()));
                Category {
                    id: agent_type.to_string(),
                    name,
                    description,
                    agents: self.agents_of(agent_type).cloned().collect(),
                }
            })
            .collect()
    }

    pub fn report(&self) -> &InterviewReport {
        &self.report
    }
}

fn read_or_embedded(
    dir: Option<&Path>,
    file: &'static str,
    embedded: &'static str,
) -> Result<String, CatalogError> {
    let Some(dir) = dir else {
        return Ok(embedded.to_string());
    };
    let path = dir.join(file);
    if !path.exists() {
        return Ok(embedded.to_string());
    }
    info!("Loading {file} from {}", path.display());
    std::fs::read_to_string(&path).map_err(|source| CatalogError::Io { path, source })
}

fn ensure_unique(
    file: &'static str,
    keys: impl Iterator<Item = String>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key.clone()) {
            return Err(CatalogError::Duplicate { file, key });
        }
    }
    Ok(())
}
