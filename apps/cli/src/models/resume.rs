//! Structured resume record — the validated output of structured extraction
//! and the sole input to every renderer.
//!
//! Field names follow the extraction schema (`professional_summary`,
//! `work_experience`, ...). The looser renderer-input convention
//! (`summary`, `experience`, a flat `skills` list) is accepted on
//! deserialization via serde aliases and a tolerant skills shape, so a
//! hand-edited `resume_ats_optimized.json` loads through the same path as
//! a fresh extraction. Serialization always emits the canonical names.

use serde::{Deserialize, Deserializer, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Leaf section types
// ────────────────────────────────────────────────────────────────────────────

/// Basic contact details of the candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ContactInfo {
    /// Pipe-joined contact line containing only the fragments that are present.
    pub fn contact_line(&self) -> String {
        let fragments: Vec<&str> = [
            self.email.as_deref(),
            self.phone.as_deref(),
            self.linkedin.as_deref(),
            self.location.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        fragments.join(" | ")
    }
}

/// Skills grouped by type. Also deserializes from a flat string list,
/// which lands wholesale in `core_skills`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SkillsInput")]
pub struct SkillSection {
    pub core_skills: Vec<String>,
    pub tools_and_technologies: Vec<String>,
    /// Spoken or written languages (distinct from `language_proficiency`,
    /// which carries levels).
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SkillsInput {
    Grouped {
        #[serde(default)]
        core_skills: Vec<String>,
        #[serde(default)]
        tools_and_technologies: Option<Vec<String>>,
        #[serde(default)]
        languages: Option<Vec<String>>,
    },
    Flat(Vec<String>),
}

impl From<SkillsInput> for SkillSection {
    fn from(input: SkillsInput) -> Self {
        match input {
            SkillsInput::Grouped {
                core_skills,
                tools_and_technologies,
                languages,
            } => SkillSection {
                core_skills,
                tools_and_technologies: tools_and_technologies.unwrap_or_default(),
                languages: languages.unwrap_or_default(),
            },
            SkillsInput::Flat(skills) => SkillSection {
                core_skills: skills,
                tools_and_technologies: Vec::new(),
                languages: Vec::new(),
            },
        }
    }
}

/// One professional employment period.
///
/// Dates are free text — "Present" is a normal end value, nothing is parsed
/// as a calendar date. Renderers must tolerate every optional field being
/// absent and `achievements` being empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    #[serde(alias = "title")]
    pub job_title: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Pre-joined date range ("Jan 2020 – Present") from the loose input
    /// shape. Preferred over start/end when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub used_skills_and_tools: Vec<String>,
}

impl WorkExperience {
    /// The italic date line under the title: the pre-joined `dates` string
    /// when present, otherwise "start – end" with "Present" as the default end.
    pub fn date_line(&self) -> String {
        if let Some(dates) = &self.dates {
            return dates.clone();
        }
        let end = self.end_date.as_deref().unwrap_or("Present");
        if self.start_date.is_empty() {
            end.to_string()
        } else {
            format!("{} – {}", self.start_date, end)
        }
    }
}

/// Volunteer or community service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerExperience {
    pub organization: String,
    pub role: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

/// A personal or academic project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(alias = "name")]
    pub project_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default,
        alias = "technologies",
        deserialize_with = "string_or_list"
    )]
    pub technologies_used: Vec<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl Project {
    /// Comma-joined technologies, or `None` when the list is empty.
    pub fn technologies_line(&self) -> Option<String> {
        if self.technologies_used.is_empty() {
            None
        } else {
            Some(self.technologies_used.join(", "))
        }
    }
}

/// An educational qualification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default, alias = "year")]
    pub graduation_year: Option<i32>,
}

/// A published work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    #[serde(default)]
    pub journal_or_source: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// A recognition or honor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Award {
    pub title: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A professional reference contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub relationship: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A professional or academic affiliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Affiliation {
    pub organization: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub membership_date: Option<String>,
}

/// A language and its proficiency level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageProficiency {
    pub language: String,
    #[serde(default, alias = "level")]
    pub proficiency_level: Option<String>,
}

impl LanguageProficiency {
    /// "Language (Level)" or just the language when no level is known.
    pub fn display(&self) -> String {
        match &self.proficiency_level {
            Some(level) => format!("{} ({})", self.language, level),
            None => self.language.clone(),
        }
    }
}

/// Hobbies and interests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HobbiesAndInterests {
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// The record
// ────────────────────────────────────────────────────────────────────────────

/// The full structured resume. Created once per extraction run and
/// immutable thereafter; every renderer consumes it by reference.
///
/// Only contact info, summary, skills, and work experience are mandatory;
/// all list-valued sections default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(alias = "summary")]
    pub professional_summary: String,
    #[serde(alias = "skills")]
    pub skills_section: SkillSection,
    #[serde(alias = "experience")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub volunteer_experience: Vec<VolunteerExperience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default)]
    pub affiliations: Vec<Affiliation>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default, alias = "languages")]
    pub language_proficiency: Vec<LanguageProficiency>,
    #[serde(default)]
    pub hobbies_and_interests: Vec<HobbiesAndInterests>,
}

impl ResumeRecord {
    /// The flattened skill list the skills table renders: core skills
    /// followed by tools. Spoken languages stay out of the table — they get
    /// their own section.
    pub fn all_skills(&self) -> Vec<String> {
        self.skills_section
            .core_skills
            .iter()
            .chain(self.skills_section.tools_and_technologies.iter())
            .cloned()
            .collect()
    }
}

/// Accepts either a JSON list of strings or a single comma-separated
/// string ("Python, Flask") for technology lists.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Input {
        List(Vec<String>),
        One(String),
    }

    Ok(match Input::deserialize(deserializer)? {
        Input::List(list) => list,
        Input::One(s) => s
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_json() -> serde_json::Value {
        serde_json::json!({
            "contact_info": {"name": "Ada Lovelace", "email": "ada@example.com"},
            "professional_summary": "Engineer.",
            "skills_section": {
                "core_skills": ["Rust", "SQL"],
                "tools_and_technologies": ["Docker"]
            },
            "work_experience": [{
                "company": "Acme",
                "job_title": "Engineer",
                "start_date": "2020-01",
                "end_date": "Present",
                "achievements": ["Shipped it"],
                "used_skills_and_tools": ["Rust"]
            }]
        })
    }

    #[test]
    fn test_canonical_shape_deserializes() {
        let record: ResumeRecord = serde_json::from_value(canonical_json()).unwrap();
        assert_eq!(record.contact_info.name, "Ada Lovelace");
        assert_eq!(record.work_experience[0].date_line(), "2020-01 – Present");
        assert_eq!(record.all_skills(), vec!["Rust", "SQL", "Docker"]);
        assert!(record.projects.is_empty());
    }

    #[test]
    fn test_loose_shape_deserializes() {
        let loose = serde_json::json!({
            "contact_info": {"name": "Ada Lovelace"},
            "summary": "Engineer.",
            "skills": ["Rust", "SQL", "Docker"],
            "experience": [{
                "company": "Acme",
                "title": "Engineer",
                "dates": "2020 – 2022",
                "location": "Berlin"
            }],
            "education": [{"institution": "MIT", "degree": "BSc", "year": 2019}],
            "languages": [{"language": "French", "level": "Fluent"}]
        });
        let record: ResumeRecord = serde_json::from_value(loose).unwrap();
        assert_eq!(record.professional_summary, "Engineer.");
        assert_eq!(record.skills_section.core_skills.len(), 3);
        assert_eq!(record.work_experience[0].job_title, "Engineer");
        assert_eq!(record.work_experience[0].date_line(), "2020 – 2022");
        assert_eq!(record.education[0].graduation_year, Some(2019));
        assert_eq!(record.language_proficiency[0].display(), "French (Fluent)");
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        // No contact_info.name → must not deserialize.
        let bad = serde_json::json!({
            "contact_info": {"email": "x@example.com"},
            "professional_summary": "s",
            "skills_section": {"core_skills": []},
            "work_experience": []
        });
        assert!(serde_json::from_value::<ResumeRecord>(bad).is_err());
    }

    #[test]
    fn test_contact_line_skips_absent_fragments() {
        let contact = ContactInfo {
            name: "Ada".into(),
            email: Some("a@b.c".into()),
            phone: None,
            linkedin: Some("linkedin.com/in/ada".into()),
            location: None,
        };
        assert_eq!(contact.contact_line(), "a@b.c | linkedin.com/in/ada");
    }

    #[test]
    fn test_technologies_accepts_comma_string() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "name": "cvpress",
            "technologies": "Rust, printpdf , "
        }))
        .unwrap();
        assert_eq!(project.technologies_used, vec!["Rust", "printpdf"]);
        assert_eq!(project.technologies_line().unwrap(), "Rust, printpdf");
    }

    #[test]
    fn test_date_line_without_end_defaults_to_present() {
        let exp: WorkExperience = serde_json::from_value(serde_json::json!({
            "company": "Acme",
            "job_title": "Engineer",
            "start_date": "2021"
        }))
        .unwrap();
        assert_eq!(exp.date_line(), "2021 – Present");
    }

    #[test]
    fn test_serializes_canonical_names() {
        let record: ResumeRecord = serde_json::from_value(canonical_json()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("professional_summary").is_some());
        assert!(value.get("summary").is_none());
        assert!(value.get("work_experience").is_some());
    }
}
