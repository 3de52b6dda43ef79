//! DOCX backend — maps the block list onto `docx-rs` paragraphs and tables.
//!
//! Word lays text out itself, so this backend carries no cursor or page
//! logic; spacers become empty paragraphs sized to the requested gap and
//! the rule becomes a box-drawing line.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, Paragraph as DocxParagraph, Run, Table, TableCell, TableRow,
};

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::render::style::RenderParameters;
use crate::render::{build_blocks, Block, Paragraph};

const PT_PER_MM: f32 = 1.0 / 0.352_778;
/// Left indent for bullet lines, in twips (1/20 pt).
const BULLET_INDENT_TWIPS: i32 = 240;

/// Renders the resume to DOCX bytes at the given parameters.
pub fn render(record: &ResumeRecord, params: &RenderParameters) -> Result<Vec<u8>, AppError> {
    let blocks = build_blocks(record, params);

    let mut docx = Docx::new();
    for block in &blocks {
        docx = match block {
            Block::Paragraph(p) => docx.add_paragraph(convert_paragraph(p)),
            Block::Table { rows, font_size } => docx.add_table(convert_table(rows, *font_size)),
            Block::Spacer(mm) => docx.add_paragraph(spacer_paragraph(*mm)),
            Block::Rule => docx.add_paragraph(
                DocxParagraph::new()
                    .add_run(Run::new().add_text("─".repeat(72)).size(8))
                    .align(AlignmentType::Center),
            ),
        };
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| AppError::Render(format!("DOCX packaging failed: {e}")))?;
    Ok(cursor.into_inner())
}

fn convert_paragraph(p: &Paragraph) -> DocxParagraph {
    let text = if p.bullet {
        format!("• {}", p.text)
    } else {
        p.text.clone()
    };

    let mut run = Run::new().add_text(text).size(half_points(p.size));
    if p.bold {
        run = run.bold();
    }
    if p.italic {
        run = run.italic();
    }

    let mut paragraph = DocxParagraph::new().add_run(run);
    if p.centered {
        paragraph = paragraph.align(AlignmentType::Center);
    }
    if p.bullet {
        paragraph = paragraph.indent(Some(BULLET_INDENT_TWIPS), None, None, None);
    }
    paragraph
}

fn convert_table(rows: &[Vec<String>], font_size: f32) -> Table {
    let table_rows: Vec<TableRow> = rows
        .iter()
        .map(|row| {
            TableRow::new(
                row.iter()
                    .map(|cell| {
                        TableCell::new().add_paragraph(
                            DocxParagraph::new()
                                .add_run(Run::new().add_text(cell.clone()).size(half_points(font_size))),
                        )
                    })
                    .collect(),
            )
        })
        .collect();
    Table::new(table_rows)
}

/// An empty paragraph whose font size approximates the requested vertical gap.
fn spacer_paragraph(mm: f32) -> DocxParagraph {
    let size = half_points((mm * PT_PER_MM).max(1.0) / 2.0);
    DocxParagraph::new().add_run(Run::new().add_text("").size(size))
}

/// DOCX run sizes are in half-points.
fn half_points(pt: f32) -> usize {
    (pt * 2.0).round() as usize
}
