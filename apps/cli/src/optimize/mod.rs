//! Page-fit optimizer — a bounded linear search over six severity levels.
//!
//! Each level is a pure `RenderParameters -> RenderParameters` transform.
//! Levels 0–4 are cumulative (each applies to the previous level's
//! output); level 5 overwrites absolutely as the last resort. At every
//! level the document is rendered, written to the output path, reopened,
//! and its pages counted — the page count cannot be predicted from the
//! block list without a real layout pass, so the write-then-verify round
//! trip is mandatory, not an optimization target.
//!
//! At most six render attempts. No backtracking, no scoring between
//! levels. If level 5 still overflows, the most-compressed document stays
//! on disk and the caller gets `LayoutOverflow` — the one designed-for,
//! non-fatal failure path.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::render::pdf;
use crate::render::style::RenderParameters;

pub const MAX_LEVEL: u8 = 5;

const MIN_FONT_PT: f32 = 6.0;
const MIN_MARGIN_MM: f32 = 5.0;
const MIN_SPACING_MM: f32 = 0.5;

/// Outcome of a successful fit run.
#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    /// Severity level the document fit at.
    pub level: u8,
    pub pages: usize,
    pub attempts: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Level transforms
// ────────────────────────────────────────────────────────────────────────────

/// Applies one severity level's transform to already-transformed parameters.
///
/// The returned value carries `level` so character budgets tighten with it.
pub fn apply_level(params: RenderParameters, level: u8) -> RenderParameters {
    let mut next = params;
    next.level = level;
    match level {
        // Baseline: defaults untouched.
        0 => {}
        // Slightly smaller fonts and margins.
        1 => {
            next.font_sizes = next.font_sizes.map(|v| v - 1.0);
            next.margins = next.margins.map(|v| v - 2.0);
        }
        // Tighter spacing, less content.
        2 => {
            next.spacing = next.spacing.map(|v| v * 0.7);
            next.limits = next.limits.map(|v| (v as f32 * 0.8) as usize);
        }
        // Fonts and margins again, now with floors.
        3 => {
            next.font_sizes = next.font_sizes.map(|v| (v - 1.0).max(MIN_FONT_PT));
            next.margins = next.margins.map(|v| (v - 2.0).max(MIN_MARGIN_MM));
        }
        // Severe content cut.
        4 => {
            next.limits = next.limits.map(|v| ((v as f32 * 0.6) as usize).max(1));
        }
        // Last resort: absolute minimums regardless of prior state.
        _ => {
            next.font_sizes = next.font_sizes.map(|_| MIN_FONT_PT);
            next.margins = next.margins.map(|_| MIN_MARGIN_MM);
            next.spacing = next.spacing.map(|_| MIN_SPACING_MM);
        }
    }
    next
}

/// Folds the transforms for levels `0..=level` over the defaults.
pub fn params_at_level(level: u8) -> RenderParameters {
    (0..=level.min(MAX_LEVEL)).fold(RenderParameters::default(), apply_level)
}

// ────────────────────────────────────────────────────────────────────────────
// Fit loop
// ────────────────────────────────────────────────────────────────────────────

/// Shrinks the document level by level until it fits one page.
///
/// The output file is overwritten in place on every attempt; on
/// `LayoutOverflow` it holds the level-5 (most compressed) rendering.
pub fn fit_to_one_page(record: &ResumeRecord, out_path: &Path) -> Result<FitReport, AppError> {
    let mut params = RenderParameters::default();
    let mut pages = usize::MAX;

    for level in 0..=MAX_LEVEL {
        params = apply_level(params, level);

        let bytes = pdf::render(record, &params)?;
        fs::write(out_path, &bytes)?;
        pages = count_pages(out_path)?;

        if pages <= 1 {
            info!("Document fits on one page at optimization level {level}");
            return Ok(FitReport {
                level,
                pages,
                attempts: level + 1,
            });
        }
        warn!("Optimization level {level}: {pages} pages");
    }

    Err(AppError::LayoutOverflow { pages })
}

/// Reloads the written PDF and counts its pages.
fn count_pages(path: &Path) -> Result<usize, AppError> {
    let doc = lopdf::Document::load(path)
        .map_err(|e| AppError::Render(format!("could not reload rendered PDF: {e}")))?;
    Ok(doc.get_pages().len())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_0_is_baseline() {
        assert_eq!(params_at_level(0), RenderParameters::default());
    }

    #[test]
    fn test_level_1_shrinks_fonts_and_margins() {
        let p = params_at_level(1);
        assert_eq!(p.font_sizes.name, 13.0);
        assert_eq!(p.font_sizes.small, 6.0);
        assert_eq!(p.margins.left, 13.0);
        assert_eq!(p.margins.top, 10.0);
        // Untouched at this level.
        assert_eq!(p.spacing, RenderParameters::default().spacing);
        assert_eq!(p.limits, RenderParameters::default().limits);
    }

    #[test]
    fn test_level_2_scales_spacing_and_limits() {
        let p = params_at_level(2);
        assert!((p.spacing.section - 2.1).abs() < 1e-6);
        assert!((p.spacing.item - 1.4).abs() < 1e-6);
        // Integer floor: 15*0.8=12, 3*0.8=2, 2*0.8=1.
        assert_eq!(p.limits.skills, 12);
        assert_eq!(p.limits.achievements, 2);
        assert_eq!(p.limits.projects, 1);
        assert_eq!(p.limits.educations, 2);
        assert_eq!(p.limits.experiences, 2);
    }

    #[test]
    fn test_level_3_respects_floors() {
        let p = params_at_level(3);
        // small: 7 → 6 (L1) → max(6, 5) = 6 (L3).
        assert_eq!(p.font_sizes.small, 6.0);
        assert_eq!(p.font_sizes.name, 12.0);
        // top margin: 12 → 10 → 8; never below 5.
        assert_eq!(p.margins.top, 8.0);
        let deep = params_at_level(5);
        assert!(deep.margins.top >= MIN_MARGIN_MM);
    }

    #[test]
    fn test_level_4_limits_floor_at_one() {
        let p = params_at_level(4);
        // projects: 2 → 1 (L2) → floor(0.6) = 0 → clamped to 1.
        assert_eq!(p.limits.projects, 1);
        assert_eq!(p.limits.skills, 7);
        assert_eq!(p.limits.achievements, 1);
        assert_eq!(p.limits.experiences, 1);
    }

    #[test]
    fn test_level_5_overwrites_absolutely() {
        let p = params_at_level(5);
        assert_eq!(p.font_sizes, RenderParameters::default().font_sizes.map(|_| 6.0));
        assert_eq!(p.margins, RenderParameters::default().margins.map(|_| 5.0));
        assert_eq!(p.spacing, RenderParameters::default().spacing.map(|_| 0.5));
        // Limits keep their level-4 values; level 5 does not touch them.
        assert_eq!(p.limits, params_at_level(4).limits);
    }

    #[test]
    fn test_levels_are_monotonically_tighter_through_4() {
        for level in 1..=4u8 {
            let prev = params_at_level(level - 1);
            let curr = params_at_level(level);
            assert!(curr.font_sizes.content <= prev.font_sizes.content);
            assert!(curr.margins.top <= prev.margins.top);
            assert!(curr.spacing.section <= prev.spacing.section);
            assert!(curr.limits.skills <= prev.limits.skills);
            assert!(curr.summary_budget() <= prev.summary_budget());
        }
    }

    #[test]
    fn test_level_clamps_above_max() {
        assert_eq!(params_at_level(9), params_at_level(MAX_LEVEL));
    }

    #[test]
    fn test_fit_loop_is_bounded_to_six_attempts() {
        // The level range IS the attempt bound.
        assert_eq!((0..=MAX_LEVEL).count(), 6);
    }

    #[test]
    fn test_fit_writes_single_page_for_small_resume() {
        let record: ResumeRecord = serde_json::from_value(serde_json::json!({
            "contact_info": {"name": "Ada Lovelace"},
            "professional_summary": "Engineer.",
            "skills_section": {"core_skills": ["Rust"]},
            "work_experience": [{
                "company": "Acme",
                "job_title": "Engineer",
                "start_date": "2020",
                "achievements": ["Shipped"],
                "used_skills_and_tools": []
            }]
        }))
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("resume.pdf");
        let report = fit_to_one_page(&record, &out).unwrap();
        assert_eq!(report.level, 0, "small resume must fit at baseline");
        assert_eq!(report.pages, 1);
        assert_eq!(report.attempts, 1);
        assert!(out.exists());
    }

    #[test]
    fn test_overflow_still_leaves_output_on_disk() {
        // The language section has no content limit, so a huge language
        // list overflows one page at every severity level.
        let languages: Vec<serde_json::Value> = (0..2000)
            .map(|i| {
                serde_json::json!({
                    "language": format!("Language {i}"),
                    "proficiency_level": "Fluent"
                })
            })
            .collect();
        let record: ResumeRecord = serde_json::from_value(serde_json::json!({
            "contact_info": {"name": "Ada Lovelace"},
            "professional_summary": "Engineer.",
            "skills_section": {"core_skills": ["Rust"]},
            "work_experience": [{
                "company": "Acme",
                "job_title": "Engineer",
                "start_date": "2020",
                "achievements": ["Shipped"],
                "used_skills_and_tools": []
            }],
            "language_proficiency": languages
        }))
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("resume.pdf");
        let err = fit_to_one_page(&record, &out);

        match err {
            Ok(report) => panic!("expected overflow, fit at level {}", report.level),
            Err(AppError::LayoutOverflow { pages }) => assert!(pages > 1),
            Err(other) => panic!("unexpected error: {other}"),
        }
        // Degraded output must still exist.
        assert!(out.exists());
    }
}
