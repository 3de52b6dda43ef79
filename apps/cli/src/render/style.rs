//! Render parameters — the presentation knobs the page-fit optimizer turns.
//!
//! A plain value type. The optimizer never mutates a shared instance; each
//! severity level is a pure transform producing a new value (see
//! `optimize`), which keeps every level testable in isolation.

/// Font size per content class, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub name: f32,
    pub contact: f32,
    pub section: f32,
    pub content: f32,
    pub small: f32,
}

impl FontSizes {
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            name: f(self.name),
            contact: f(self.contact),
            section: f(self.section),
            content: f(self.content),
            small: f(self.small),
        }
    }
}

/// Page margins in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margins {
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            left: f(self.left),
            right: f(self.right),
            top: f(self.top),
            bottom: f(self.bottom),
        }
    }
}

/// Inter-block spacing in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub section: f32,
    pub item: f32,
    pub line: f32,
}

impl Spacing {
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            section: f(self.section),
            item: f(self.item),
            line: f(self.line),
        }
    }
}

/// How much content each section shows before cutting off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLimits {
    pub skills: usize,
    pub achievements: usize,
    pub projects: usize,
    pub educations: usize,
    pub experiences: usize,
}

impl ContentLimits {
    pub fn map(self, f: impl Fn(usize) -> usize) -> Self {
        Self {
            skills: f(self.skills),
            achievements: f(self.achievements),
            projects: f(self.projects),
            educations: f(self.educations),
            experiences: f(self.experiences),
        }
    }
}

/// The full knob bag one render pass runs with.
///
/// `level` is the optimization severity the parameters were produced at;
/// it drives the character budgets below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParameters {
    pub font_sizes: FontSizes,
    pub margins: Margins,
    pub spacing: Spacing,
    pub limits: ContentLimits,
    pub level: u8,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            font_sizes: FontSizes {
                name: 14.0,
                contact: 8.0,
                section: 10.0,
                content: 9.0,
                small: 7.0,
            },
            margins: Margins {
                left: 15.0,
                right: 15.0,
                top: 12.0,
                bottom: 12.0,
            },
            spacing: Spacing {
                section: 3.0,
                item: 2.0,
                line: 1.0,
            },
            limits: ContentLimits {
                skills: 15,
                achievements: 3,
                projects: 2,
                educations: 3,
                experiences: 3,
            },
            level: 0,
        }
    }
}

impl RenderParameters {
    /// Character budget for the professional summary.
    pub fn summary_budget(&self) -> usize {
        300 - 50 * self.level as usize
    }

    /// Character budget for a single achievement bullet.
    pub fn achievement_budget(&self) -> usize {
        150 - 20 * self.level as usize
    }

    /// Character budget for a project description.
    pub fn description_budget(&self) -> usize {
        100 - 15 * self.level as usize
    }
}

/// Cuts a string to at most `budget` characters.
///
/// Over-budget strings keep `budget - 3` characters and gain a `"..."`
/// suffix, so the result is exactly `budget` characters long. Raw
/// character slicing, not word-aware; may cut mid-word.
pub fn truncate(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let kept: String = text.chars().take(budget.saturating_sub(3)).collect();
    format!("{kept}...")
}
