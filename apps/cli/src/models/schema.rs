//! JSON Schema for [`ResumeRecord`](super::resume::ResumeRecord).
//!
//! Embedded verbatim into the extraction system prompt and dumped to
//! `resume_schema.json` by the `parse` command. Kept as a hand-maintained
//! `json!` document; required/optional status must match the serde
//! definitions in `resume.rs`.

use serde_json::{json, Value};

/// Returns the full JSON Schema describing the structured resume shape.
pub fn resume_schema() -> Value {
    json!({
        "title": "ResumeRecord",
        "description": "Comprehensive structured representation of a candidate's resume.",
        "type": "object",
        "required": ["contact_info", "professional_summary", "skills_section", "work_experience"],
        "properties": {
            "contact_info": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": { "type": "string", "description": "Full name of the candidate." },
                    "email": { "type": ["string", "null"] },
                    "phone": { "type": ["string", "null"] },
                    "linkedin": { "type": ["string", "null"], "description": "LinkedIn profile URL." },
                    "location": { "type": ["string", "null"] }
                }
            },
            "introduction": { "type": ["string", "null"], "description": "Optional introduction or headline." },
            "professional_summary": { "type": "string", "description": "Professional summary or career objective." },
            "skills_section": {
                "type": "object",
                "required": ["core_skills"],
                "properties": {
                    "core_skills": { "type": "array", "items": { "type": "string" } },
                    "tools_and_technologies": { "type": "array", "items": { "type": "string" } },
                    "languages": { "type": "array", "items": { "type": "string" } }
                }
            },
            "work_experience": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["company", "job_title", "start_date", "achievements", "used_skills_and_tools"],
                    "properties": {
                        "company": { "type": "string" },
                        "job_title": { "type": "string" },
                        "start_date": { "type": "string", "description": "Free text, e.g. YYYY-MM." },
                        "end_date": { "type": ["string", "null"], "description": "Free text; 'Present' is valid." },
                        "location": { "type": ["string", "null"] },
                        "achievements": { "type": "array", "items": { "type": "string" } },
                        "used_skills_and_tools": { "type": "array", "items": { "type": "string" } }
                    }
                }
            },
            "volunteer_experience": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["organization", "role"],
                    "properties": {
                        "organization": { "type": "string" },
                        "role": { "type": "string" },
                        "start_date": { "type": ["string", "null"] },
                        "end_date": { "type": ["string", "null"] },
                        "responsibilities": { "type": "array", "items": { "type": "string" } }
                    }
                }
            },
            "projects": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["project_name"],
                    "properties": {
                        "project_name": { "type": "string" },
                        "description": { "type": ["string", "null"] },
                        "technologies_used": { "type": "array", "items": { "type": "string" } },
                        "start_date": { "type": ["string", "null"] },
                        "end_date": { "type": ["string", "null"] }
                    }
                }
            },
            "education": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["institution", "degree"],
                    "properties": {
                        "institution": { "type": "string" },
                        "degree": { "type": "string" },
                        "field_of_study": { "type": "string" },
                        "graduation_year": { "type": ["integer", "null"] }
                    }
                }
            },
            "publications": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["title"],
                    "properties": {
                        "title": { "type": "string" },
                        "journal_or_source": { "type": ["string", "null"] },
                        "publication_date": { "type": ["string", "null"] },
                        "link": { "type": ["string", "null"] }
                    }
                }
            },
            "awards": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["title"],
                    "properties": {
                        "title": { "type": "string" },
                        "issuer": { "type": ["string", "null"] },
                        "date": { "type": ["string", "null"] },
                        "description": { "type": ["string", "null"] }
                    }
                }
            },
            "affiliations": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["organization"],
                    "properties": {
                        "organization": { "type": "string" },
                        "role": { "type": ["string", "null"] },
                        "membership_date": { "type": ["string", "null"] }
                    }
                }
            },
            "references": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "relationship"],
                    "properties": {
                        "name": { "type": "string" },
                        "relationship": { "type": "string" },
                        "email": { "type": ["string", "null"] },
                        "phone": { "type": ["string", "null"] }
                    }
                }
            },
            "certifications": { "type": "array", "items": { "type": "string" } },
            "language_proficiency": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["language"],
                    "properties": {
                        "language": { "type": "string" },
                        "proficiency_level": {
                            "type": ["string", "null"],
                            "description": "e.g. 'Beginner', 'Intermediate', 'Advanced'."
                        }
                    }
                }
            },
            "hobbies_and_interests": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["hobbies"],
                    "properties": {
                        "hobbies": { "type": "array", "items": { "type": "string" } },
                        "description": { "type": ["string", "null"] }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_names_all_mandatory_sections() {
        let schema = resume_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec![
                "contact_info",
                "professional_summary",
                "skills_section",
                "work_experience"
            ]
        );
    }

    #[test]
    fn test_schema_properties_match_record_fields() {
        // Every schema property must deserialize-map onto the record: a
        // record built from an empty-but-valid instance round-trips.
        let schema = resume_schema();
        let props = schema["properties"].as_object().unwrap();
        for key in [
            "contact_info",
            "professional_summary",
            "skills_section",
            "work_experience",
            "projects",
            "education",
            "language_proficiency",
        ] {
            assert!(props.contains_key(key), "schema is missing '{key}'");
        }
    }
}
