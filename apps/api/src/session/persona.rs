//! Interviewer personas — round lookup tables and persona synthesis from a job listing.

use serde::{Deserialize, Serialize};

use crate::models::agent::AgentProfile;
use crate::models::job::JobDescription;

const INTERVIEWER_AVATAR: &str = "/avatars/interviewer.png";
const INTERVIEWER_GENDER: &str = "neutral";

/// The closed set of interview rounds. Unrecognized labels map to `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundKind {
    Hr,
    Coding,
    SystemDesign,
    ProblemSolving,
    DomainSpecific,
    Aptitude,
    CaseStudy,
    General,
}

/// How the persona's specialty is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specialty {
    Fixed(&'static str),
    /// The job's first listed skill, or the fallback when the job lists none.
    FirstSkillOr(&'static str),
}

/// Per-round persona settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundProfile {
    pub level: &'static str,
    pub duration_minutes: u32,
    pub specialty: Specialty,
}

impl RoundKind {
    /// The selectable rounds, in presentation order.
    pub const SELECTABLE: [RoundKind; 7] = [
        RoundKind::Hr,
        RoundKind::Coding,
        RoundKind::SystemDesign,
        RoundKind::ProblemSolving,
        RoundKind::DomainSpecific,
        RoundKind::Aptitude,
        RoundKind::CaseStudy,
    ];

    pub fn from_label(label: &str) -> Self {
        match label {
            "hr" => RoundKind::Hr,
            "coding" => RoundKind::Coding,
            "system-design" => RoundKind::SystemDesign,
            "problem-solving" => RoundKind::ProblemSolving,
            "domain-specific" => RoundKind::DomainSpecific,
            "aptitude" => RoundKind::Aptitude,
            "case-study" => RoundKind::CaseStudy,
            _ => RoundKind::General,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            RoundKind::Hr => "hr",
            RoundKind::Coding => "coding",
            RoundKind::SystemDesign => "system-design",
            RoundKind::ProblemSolving => "problem-solving",
            RoundKind::DomainSpecific => "domain-specific",
            RoundKind::Aptitude => "aptitude",
            RoundKind::CaseStudy => "case-study",
            RoundKind::General => "general",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoundKind::Hr => "HR Round",
            RoundKind::Coding => "Coding",
            RoundKind::SystemDesign => "System Design",
            RoundKind::ProblemSolving => "Problem Solving",
            RoundKind::DomainSpecific => "Domain Specific",
            RoundKind::Aptitude => "Aptitude & Logical Reasoning",
            RoundKind::CaseStudy => "Case Study",
            RoundKind::General => "General",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RoundKind::Hr => "Behavioral questions and company culture fit",
            RoundKind::Coding => "Programming challenges and algorithm problems",
            RoundKind::SystemDesign => "Architecture and scalability discussions",
            RoundKind::ProblemSolving => "Analytical and logical reasoning",
            RoundKind::DomainSpecific => "Role-specific technical knowledge",
            RoundKind::Aptitude => "Quantitative and logical skills",
            RoundKind::CaseStudy => "Business scenarios and strategic thinking",
            RoundKind::General => "Technical and behavioral mix",
        }
    }

    pub fn profile(self) -> RoundProfile {
        let (level, duration_minutes, specialty) = match self {
            RoundKind::Hr => ("Senior", 30, Specialty::Fixed("HR & Behavioral")),
            RoundKind::Coding => ("Expert", 60, Specialty::Fixed("Technical Coding")),
            RoundKind::SystemDesign => ("Expert", 45, Specialty::Fixed("System Architecture")),
            RoundKind::ProblemSolving => ("Advanced", 45, Specialty::Fixed("Problem Solving")),
            RoundKind::DomainSpecific => (
                "Specialist",
                60,
                Specialty::FirstSkillOr("Technical Domain"),
            ),
            RoundKind::Aptitude => ("Advanced", 30, Specialty::Fixed("Aptitude & Logic")),
            RoundKind::CaseStudy => ("Senior", 45, Specialty::Fixed("Business Strategy")),
            RoundKind::General => ("Senior", 45, Specialty::Fixed("General Interview")),
        };
        RoundProfile {
            level,
            duration_minutes,
            specialty,
        }
    }

    /// Round-specific guidance appended to the base instructions.
    fn focus(self, job: &JobDescription) -> String {
        let skills = job.skills.join(", ");
        match self {
            RoundKind::Hr => "Focus on behavioral questions, company culture fit, and the candidate's motivation. \
                Ask about their background, why they're interested in this role, and situational questions \
                using the STAR method. Be friendly but professional."
                .to_string(),
            RoundKind::Coding => format!(
                "Conduct a coding interview focusing on programming challenges relevant to the required skills: {skills}. \
                Present coding problems, ask them to code solutions, and discuss time/space complexity. \
                Be encouraging and provide hints if they get stuck."
            ),
            RoundKind::SystemDesign => "Focus on system architecture and scalability discussions. \
                Present real-world system design problems relevant to the role. Discuss trade-offs, scalability, \
                databases, and distributed systems. Encourage them to think out loud and draw diagrams."
                .to_string(),
            RoundKind::ProblemSolving => "Present analytical and logical reasoning challenges. \
                Focus on their problem-solving approach, critical thinking, and ability to break down complex problems. \
                Ask follow-up questions about their reasoning process."
                .to_string(),
            RoundKind::DomainSpecific => format!(
                "Focus on role-specific technical knowledge related to {skills}. \
                Ask in-depth questions about technologies, frameworks, and best practices relevant to the position. \
                Assess their practical experience and theoretical understanding."
            ),
            RoundKind::Aptitude => "Conduct quantitative and logical reasoning assessments. \
                Present mathematical problems, logical puzzles, and analytical questions. \
                Focus on their problem-solving speed and accuracy."
                .to_string(),
            RoundKind::CaseStudy => format!(
                "Present business scenarios and strategic thinking challenges relevant to {}'s industry. \
                Ask them to analyze business problems, propose solutions, and justify their recommendations. \
                Focus on their business acumen and strategic thinking.",
                job.company
            ),
            RoundKind::General => "Conduct a comprehensive interview covering both technical and behavioral \
                aspects relevant to the role."
                .to_string(),
        }
    }
}

/// A round as requested: the raw label drives naming, the kind drives the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewRound {
    pub label: String,
    pub kind: RoundKind,
}

impl InterviewRound {
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        Self {
            label: label.to_string(),
            kind: RoundKind::from_label(label),
        }
    }

    pub fn instructions(&self, job: &JobDescription) -> String {
        format!(
            "You are conducting a {} interview for the position of {} at {}. {}",
            self.label.replacen('-', " ", 1),
            job.role,
            job.company,
            self.kind.focus(job)
        )
    }

    pub fn specialty(&self, job: &JobDescription) -> String {
        match self.kind.profile().specialty {
            Specialty::Fixed(s) => s.to_string(),
            Specialty::FirstSkillOr(fallback) => job
                .skills
                .first()
                .cloned()
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

/// The interviewer's briefing, serialized into the persona's `description`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewerBrief {
    pub job: JobDescription,
    pub interview_type: String,
    pub instructions: String,
}

/// Builds the interviewer persona for a job and round.
pub fn interviewer_persona(
    job: &JobDescription,
    round: &InterviewRound,
) -> Result<AgentProfile, serde_json::Error> {
    let profile = round.kind.profile();
    let brief = InterviewerBrief {
        job: job.clone(),
        interview_type: round.label.clone(),
        instructions: round.instructions(job),
    };

    Ok(AgentProfile {
        name: format!(
            "{}_{}_Interviewer",
            job.company.split_whitespace().collect::<Vec<_>>().join("_"),
            round.label
        ),
        display_name: format!(
            "{} - {} Interviewer",
            job.company,
            title_case(&round.label.replacen('-', " ", 1))
        ),
        description: serde_json::to_string(&brief)?,
        agent_type: "interview".to_string(),
        level: profile.level.to_string(),
        specialty: round.specialty(job),
        gender: INTERVIEWER_GENDER.to_string(),
        duration: profile.duration_minutes,
        avatar: INTERVIEWER_AVATAR.to_string(),
    })
}

/// Uppercases the first character of every word.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn job(skills: &[&str]) -> JobDescription {
        JobDescription {
            id: "jd-test".to_string(),
            company: "Acme  Cloud Co".to_string(),
            role: "Platform Engineer".to_string(),
            location: "Remote".to_string(),
            experience: "3-5 years".to_string(),
            salary: "n/a".to_string(),
            job_type: Some("Full-time".to_string()),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            description: "Run the platform.".to_string(),
            posted_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_coding_round_mentions_skills_and_runs_an_hour() {
        let job = job(&["Rust", "Tokio", "PostgreSQL"]);
        let round = InterviewRound::parse("coding");
        assert!(round
            .instructions(&job)
            .contains("required skills: Rust, Tokio, PostgreSQL"));
        assert_eq!(round.kind.profile().duration_minutes, 60);
        assert_eq!(round.kind.profile().level, "Expert");
    }

    #[test]
    fn test_hr_round_is_thirty_minutes() {
        let profile = RoundKind::from_label("hr").profile();
        assert_eq!(profile.duration_minutes, 30);
        assert_eq!(profile.level, "Senior");
    }

    #[test]
    fn test_system_design_persona_for_go_kubernetes_job() {
        let job = job(&["Go", "Kubernetes"]);
        let persona = interviewer_persona(&job, &InterviewRound::parse("system-design")).unwrap();
        let brief: InterviewerBrief = serde_json::from_str(&persona.description).unwrap();

        assert_eq!(persona.level, "Expert");
        assert_eq!(persona.duration, 45);
        assert_eq!(persona.specialty, "System Architecture");
        assert!(brief.instructions.starts_with(
            "You are conducting a system design interview for the position of Platform Engineer"
        ));
        assert_eq!(brief.job.skills, vec!["Go", "Kubernetes"]);
    }

    #[test]
    fn test_domain_specific_lists_skills_and_uses_first_as_specialty() {
        let job = job(&["Go", "Kubernetes"]);
        let round = InterviewRound::parse("domain-specific");
        assert!(round.instructions(&job).contains("Go, Kubernetes"));
        assert_eq!(round.specialty(&job), "Go");
        assert_eq!(round.specialty(&self::job(&[])), "Technical Domain");
    }

    #[test]
    fn test_unrecognized_round_falls_back_to_defaults() {
        let job = job(&["Go"]);
        let round = InterviewRound::parse("pair-programming");
        let persona = interviewer_persona(&job, &round).unwrap();

        assert_eq!(round.kind, RoundKind::General);
        assert_eq!(persona.level, "Senior");
        assert_eq!(persona.duration, 45);
        assert_eq!(persona.specialty, "General Interview");
        assert!(round
            .instructions(&job)
            .ends_with("covering both technical and behavioral aspects relevant to the role."));
    }

    #[test]
    fn test_persona_names() {
        let persona = interviewer_persona(&job(&[]), &InterviewRound::parse("case-study")).unwrap();
        assert_eq!(persona.name, "Acme_Cloud_Co_case-study_Interviewer");
        assert_eq!(persona.display_name, "Acme  Cloud Co - Case Study Interviewer");
        assert_eq!(persona.agent_type, "interview");
        assert_eq!(persona.gender, "neutral");
        assert_eq!(persona.avatar, "/avatars/interviewer.png");
    }

    #[test]
    fn test_multi_hyphen_round_keeps_later_hyphens() {
        let job = job(&[]);
        let round = InterviewRound::parse("pair-programming-live");
        let persona = interviewer_persona(&job, &round).unwrap();

        assert_eq!(
            persona.display_name,
            "Acme  Cloud Co - Pair Programming-Live Interviewer"
        );
        assert!(round
            .instructions(&job)
            .starts_with("You are conducting a pair programming-live interview"));
    }

    #[test]
    fn test_case_study_mentions_company() {
        let job = job(&[]);
        assert!(InterviewRound::parse("case-study")
            .instructions(&job)
            .contains("relevant to Acme  Cloud Co's industry"));
    }

    #[test]
    fn test_every_selectable_round_round_trips_its_id() {
        for kind in RoundKind::SELECTABLE {
            assert_eq!(RoundKind::from_label(kind.id()), kind);
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("problem solving"), "Problem Solving");
        assert_eq!(title_case("hr"), "Hr");
    }
}
