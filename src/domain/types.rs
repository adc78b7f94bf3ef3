//! Closed label sets stored as Postgres enums.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "skill_level")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "skill_category")]
pub enum SkillCategory {
    Backend,
    Frontend,
    Other,
}

/// Whether a career entry is schooling or employment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "career_type")]
pub enum CareerKind {
    Education,
    Job,
}

impl SkillLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            _ => Err(unknown(
                "skill level",
                value,
                "Beginner, Intermediate, Advanced",
            )),
        }
    }
}

impl SkillCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            SkillCategory::Backend => "Backend",
            SkillCategory::Frontend => "Frontend",
            SkillCategory::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "backend" => Ok(SkillCategory::Backend),
            "frontend" => Ok(SkillCategory::Frontend),
            "other" => Ok(SkillCategory::Other),
            _ => Err(unknown("skill category", value, "Backend, Frontend, Other")),
        }
    }
}

impl CareerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CareerKind::Education => "Education",
            CareerKind::Job => "Job",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "education" => Ok(CareerKind::Education),
            "job" => Ok(CareerKind::Job),
            _ => Err(unknown("career type", value, "Education, Job")),
        }
    }
}

fn unknown(what: &str, value: &str, expected: &str) -> DomainError {
    DomainError::validation(format!(
        "unknown {what} `{}`, expected one of {expected}",
        value.trim()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(
            SkillCategory::parse("backend").ok(),
            Some(SkillCategory::Backend)
        );
        assert_eq!(
            SkillLevel::parse(" Advanced ").ok(),
            Some(SkillLevel::Advanced)
        );
        assert_eq!(CareerKind::parse("JOB").ok(), Some(CareerKind::Job));
    }

    #[test]
    fn unknown_label_lists_the_accepted_ones() {
        let err = SkillLevel::parse("Expert").expect_err("not a level");
        assert!(matches!(
            err,
            DomainError::Validation { ref message } if message.contains("Beginner")
        ));
    }

    #[test]
    fn labels_serialize_by_name() {
        assert_eq!(
            serde_json::to_value(CareerKind::Education).expect("serializable"),
            "Education"
        );
        assert_eq!(SkillCategory::Frontend.as_str(), "Frontend");
    }
}
