//! PDF backend — paints the block list with `printpdf` onto US-letter pages.
//!
//! Line wrapping uses a greedy word wrap over an average-character-width
//! estimate (0.5 em). That is an intentional approximation: the page-fit
//! optimizer never trusts it for the page count — it reloads the written
//! file and counts real pages.

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::render::style::RenderParameters;
use crate::render::{build_blocks, Block, Paragraph, SKILL_COLUMNS};

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const PT_TO_MM: f32 = 0.352_778;
/// Average glyph width as a fraction of the font size (em units).
const AVG_CHAR_EM: f32 = 0.5;

/// Renders the resume to PDF bytes at the given parameters.
pub fn render(record: &ResumeRecord, params: &RenderParameters) -> Result<Vec<u8>, AppError> {
    let blocks = build_blocks(record, params);

    let (doc, page, layer) = PdfDocument::new(
        record.contact_info.name.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );
    let fonts = Fonts::load(&doc)?;

    let mut painter = Painter {
        layer: doc.get_page(page).get_layer(layer),
        doc: &doc,
        fonts,
        params,
        y: PAGE_HEIGHT_MM - params.margins.top,
    };

    for block in &blocks {
        painter.paint(block);
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::Render(format!("PDF serialization failed: {e}")))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, AppError> {
        let add = |f: BuiltinFont| {
            doc.add_builtin_font(f)
                .map_err(|e| AppError::Render(format!("font load failed: {e}")))
        };
        Ok(Self {
            regular: add(BuiltinFont::Helvetica)?,
            bold: add(BuiltinFont::HelveticaBold)?,
            italic: add(BuiltinFont::HelveticaOblique)?,
        })
    }

    fn pick(&self, p: &Paragraph) -> &IndirectFontRef {
        if p.bold {
            &self.bold
        } else if p.italic {
            &self.italic
        } else {
            &self.regular
        }
    }
}

struct Painter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    params: &'a RenderParameters,
    /// Top of the next line, in mm from the page bottom.
    y: f32,
}

impl Painter<'_> {
    fn usable_width(&self) -> f32 {
        PAGE_WIDTH_MM - self.params.margins.left - self.params.margins.right
    }

    /// Starts a new page when fewer than `needed` mm remain above the
    /// bottom margin.
    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < self.params.margins.bottom {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - self.params.margins.top;
        }
    }

    fn paint(&mut self, block: &Block) {
        match block {
            Block::Paragraph(p) => self.paint_paragraph(p),
            Block::Table { rows, font_size } => self.paint_table(rows, *font_size),
            Block::Spacer(mm) => self.y -= mm,
            Block::Rule => self.paint_rule(),
        }
    }

    fn paint_paragraph(&mut self, p: &Paragraph) {
        let line_height = (p.size + 2.0) * PT_TO_MM;
        let char_width = AVG_CHAR_EM * p.size * PT_TO_MM;
        let indent = if p.bullet { 4.0 } else { 0.0 };
        let usable = self.usable_width() - indent;
        let max_chars = ((usable / char_width) as usize).max(1);

        let text = if p.bullet {
            format!("• {}", p.text)
        } else {
            p.text.clone()
        };

        for line in wrap_text(&text, max_chars) {
            self.ensure_space(line_height);
            let x = if p.centered {
                let estimated = line.chars().count() as f32 * char_width;
                self.params.margins.left + ((usable - estimated) / 2.0).max(0.0)
            } else {
                self.params.margins.left + indent
            };
            self.layer.use_text(
                line,
                p.size,
                Mm(x),
                Mm(self.y - line_height),
                self.fonts.pick(p),
            );
            self.y -= line_height;
        }
        self.y -= p.space_after;
    }

    fn paint_table(&mut self, rows: &[Vec<String>], font_size: f32) {
        let row_height = (font_size + 2.0) * PT_TO_MM;
        let col_width = self.usable_width() / SKILL_COLUMNS as f32;

        for row in rows {
            self.ensure_space(row_height);
            for (col, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let x = self.params.margins.left + col as f32 * col_width;
                self.layer.use_text(
                    cell.clone(),
                    font_size,
                    Mm(x),
                    Mm(self.y - row_height),
                    &self.fonts.regular,
                );
            }
            self.y -= row_height;
        }
    }

    fn paint_rule(&mut self) {
        self.ensure_space(2.0);
        let y = self.y - 1.0;
        let line = Line {
            points: vec![
                (Point::new(Mm(self.params.margins.left), Mm(y)), false),
                (
                    Point::new(Mm(PAGE_WIDTH_MM - self.params.margins.right), Mm(y)),
                    false,
                ),
            ],
            is_closed: false,
        };
        self.layer.set_outline_thickness(0.5);
        self.layer.add_line(line);
        self.y -= 2.0;
    }
}

/// Greedy word wrap: words accumulate onto a line until the next word
/// would exceed `max_chars`. Single words longer than a line get a line
/// of their own.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ResumeRecord {
        serde_json::from_value(serde_json::json!({
            "contact_info": {"name": "Ada Lovelace", "email": "ada@example.com"},
            "professional_summary": "Engineer with a long record of shipping.",
            "skills_section": {"core_skills": ["Rust", "SQL", "Docker", "Go"]},
            "work_experience": [{
                "company": "Acme",
                "job_title": "Engineer",
                "start_date": "2020",
                "achievements": ["Shipped the thing"],
                "used_skills_and_tools": ["Rust"]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_wrap_text_respects_max_chars() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
        for line in &lines {
            assert!(line.chars().count() <= 9);
        }
    }

    #[test]
    fn test_wrap_text_overlong_word_gets_own_line() {
        let lines = wrap_text("a verylongunbreakableword b", 5);
        assert_eq!(lines, vec!["a", "verylongunbreakableword", "b"]);
    }

    #[test]
    fn test_render_produces_parseable_pdf() {
        let bytes = render(&sample_record(), &RenderParameters::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_large_resume_spills_onto_multiple_pages() {
        let mut record = sample_record();
        let entry = record.work_experience[0].clone();
        record.work_experience = (0..40).map(|_| entry.clone()).collect();
        let mut params = RenderParameters::default();
        params.limits.experiences = 40;
        params.limits.achievements = 10;

        let bytes = render(&record, &params).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);
    }
}
