//! Document rendering — one renderer, parameterized by [`RenderParameters`].
//!
//! `build_blocks` turns a [`ResumeRecord`] into an ordered list of
//! backend-independent flowables (paragraphs, tables, spacers, rules).
//! Each section builder is independently skippable: absent or empty data
//! means the section simply does not appear, and missing optional fields
//! degrade by omitting only their fragment. The `pdf` and `docx` backends
//! paint the same block list.

pub mod docx;
pub mod pdf;
pub mod style;

use crate::models::resume::ResumeRecord;
use style::{truncate, RenderParameters};

pub const SKILL_COLUMNS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Flowables
// ────────────────────────────────────────────────────────────────────────────

/// A discrete unit of rendered content, appended sequentially.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    /// Fixed-width skill table; every row has exactly [`SKILL_COLUMNS`]
    /// cells, blank cells render as empty.
    Table {
        rows: Vec<Vec<String>>,
        font_size: f32,
    },
    /// Vertical gap in millimeters.
    Spacer(f32),
    /// Full-width horizontal rule.
    Rule,
}

/// A styled run of text. One style per paragraph keeps the backends thin.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub centered: bool,
    /// Bulleted, indented body line.
    pub bullet: bool,
    /// Gap to leave below the paragraph, in millimeters.
    pub space_after: f32,
}

impl Paragraph {
    fn body(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
            bold: false,
            italic: false,
            centered: false,
            bullet: false,
            space_after: 0.0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Builds the full flowable list for a resume at the given parameters.
pub fn build_blocks(record: &ResumeRecord, params: &RenderParameters) -> Vec<Block> {
    let mut blocks = Vec::new();
    add_contact_header(&mut blocks, record, params);
    add_summary(&mut blocks, record, params);
    add_skills(&mut blocks, record, params);
    add_experience(&mut blocks, record, params);
    add_education(&mut blocks, record, params);
    add_projects(&mut blocks, record, params);
    add_languages(&mut blocks, record, params);
    blocks
}

fn add_section_header(blocks: &mut Vec<Block>, title: &str, params: &RenderParameters) {
    blocks.push(Block::Spacer(params.spacing.section));
    blocks.push(Block::Paragraph(Paragraph {
        text: title.to_uppercase(),
        bold: true,
        space_after: params.spacing.line,
        ..Paragraph::body("", params.font_sizes.section)
    }));
}

fn add_contact_header(blocks: &mut Vec<Block>, record: &ResumeRecord, params: &RenderParameters) {
    let contact = &record.contact_info;
    blocks.push(Block::Paragraph(Paragraph {
        text: contact.name.to_uppercase(),
        bold: true,
        centered: true,
        space_after: 1.0,
        ..Paragraph::body("", params.font_sizes.name + 2.0)
    }));

    let line = contact.contact_line();
    if !line.is_empty() {
        blocks.push(Block::Paragraph(Paragraph {
            text: line,
            centered: true,
            space_after: params.spacing.line,
            ..Paragraph::body("", params.font_sizes.contact)
        }));
    }
    blocks.push(Block::Rule);
}

fn add_summary(blocks: &mut Vec<Block>, record: &ResumeRecord, params: &RenderParameters) {
    if record.professional_summary.is_empty() {
        return;
    }
    add_section_header(blocks, "Professional Summary", params);
    blocks.push(Block::Paragraph(Paragraph {
        text: truncate(&record.professional_summary, params.summary_budget()),
        space_after: params.spacing.section,
        ..Paragraph::body("", params.font_sizes.content)
    }));
}

fn add_skills(blocks: &mut Vec<Block>, record: &ResumeRecord, params: &RenderParameters) {
    let skills = record.all_skills();
    if skills.is_empty() {
        return;
    }
    add_section_header(blocks, "Skills", params);

    let shown: Vec<String> = skills.into_iter().take(params.limits.skills).collect();
    let columns = round_robin_columns(&shown, SKILL_COLUMNS);
    let row_count = columns.iter().map(|c| c.len()).max().unwrap_or(0);

    let rows: Vec<Vec<String>> = (0..row_count)
        .map(|row| {
            columns
                .iter()
                .map(|col| {
                    col.get(row)
                        .map(|skill| format!("• {skill}"))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    blocks.push(Block::Table {
        rows,
        font_size: params.font_sizes.small,
    });
    blocks.push(Block::Spacer(params.spacing.section));
}

fn add_experience(blocks: &mut Vec<Block>, record: &ResumeRecord, params: &RenderParameters) {
    if record.work_experience.is_empty() {
        return;
    }
    add_section_header(blocks, "Professional Experience", params);

    for exp in record.work_experience.iter().take(params.limits.experiences) {
        let mut title_line = format!("{}, {}", exp.job_title, exp.company);
        if let Some(location) = &exp.location {
            title_line.push_str(&format!(" | {location}"));
        }
        blocks.push(Block::Paragraph(Paragraph {
            text: title_line,
            bold: true,
            ..Paragraph::body("", params.font_sizes.content)
        }));
        blocks.push(Block::Paragraph(Paragraph {
            text: exp.date_line(),
            italic: true,
            space_after: params.spacing.line,
            ..Paragraph::body("", params.font_sizes.small)
        }));

        for achievement in exp.achievements.iter().take(params.limits.achievements) {
            blocks.push(Block::Paragraph(Paragraph {
                text: truncate(achievement, params.achievement_budget()),
                bullet: true,
                space_after: 0.4,
                ..Paragraph::body("", params.font_sizes.small)
            }));
        }
        blocks.push(Block::Spacer(params.spacing.item));
    }
}

fn add_education(blocks: &mut Vec<Block>, record: &ResumeRecord, params: &RenderParameters) {
    if record.education.is_empty() {
        return;
    }
    add_section_header(blocks, "Education", params);

    for edu in record.education.iter().take(params.limits.educations) {
        blocks.push(Block::Paragraph(Paragraph {
            text: format!("{}, {}", edu.degree, edu.institution),
            bold: true,
            ..Paragraph::body("", params.font_sizes.content)
        }));
        if let Some(year) = edu.graduation_year {
            blocks.push(Block::Paragraph(Paragraph {
                text: year.to_string(),
                italic: true,
                space_after: params.spacing.item,
                ..Paragraph::body("", params.font_sizes.small)
            }));
        } else {
            blocks.push(Block::Spacer(params.spacing.item));
        }
    }
}

fn add_projects(blocks: &mut Vec<Block>, record: &ResumeRecord, params: &RenderParameters) {
    if record.projects.is_empty() {
        return;
    }
    add_section_header(blocks, "Projects", params);

    for project in record.projects.iter().take(params.limits.projects) {
        let mut name_line = project.project_name.clone();
        if let Some(technologies) = project.technologies_line() {
            name_line.push_str(&format!(" ({technologies})"));
        }
        blocks.push(Block::Paragraph(Paragraph {
            text: name_line,
            bold: true,
            ..Paragraph::body("", params.font_sizes.content)
        }));

        match &project.description {
            Some(description) if !description.is_empty() => {
                blocks.push(Block::Paragraph(Paragraph {
                    text: truncate(description, params.description_budget()),
                    bullet: true,
                    space_after: params.spacing.item,
                    ..Paragraph::body("", params.font_sizes.small)
                }));
            }
            _ => blocks.push(Block::Spacer(params.spacing.item)),
        }
    }
}

fn add_languages(blocks: &mut Vec<Block>, record: &ResumeRecord, params: &RenderParameters) {
    if record.language_proficiency.is_empty() {
        return;
    }
    add_section_header(blocks, "Languages", params);

    let line = record
        .language_proficiency
        .iter()
        .map(|lang| lang.display())
        .collect::<Vec<_>>()
        .join(" • ");
    blocks.push(Block::Paragraph(Paragraph::body(
        line,
        params.font_sizes.content,
    )));
}

// ────────────────────────────────────────────────────────────────────────────
// Round-robin column split
// ────────────────────────────────────────────────────────────────────────────

/// Distributes `items` into `k` columns: element `i` goes to column `i % k`.
pub fn round_robin_columns(items: &[String], k: usize) -> Vec<Vec<String>> {
    (0..k)
        .map(|col| {
            items
                .iter()
                .skip(col)
                .step_by(k)
                .cloned()
                .collect::<Vec<_>>()
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
