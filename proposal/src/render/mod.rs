//! PDF rendering of the generated proposal.
//!
//! Layout is fixed: A4 portrait, Times-Roman 12 pt, 10 mm margins, 10 mm line height, a
//! 20 mm bottom break margin and a 1 mm cell padding. Text is word-wrapped to the usable
//! width and flows onto new pages as needed. Content streams are left uncompressed.

mod metrics;

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::RenderError;
use crate::generator::ProposalText;

const MM: f32 = 72.0 / 25.4;

pub const PAGE_WIDTH: f32 = 210.0 * MM;
pub const PAGE_HEIGHT: f32 = 297.0 * MM;
pub const FONT_SIZE: f32 = 12.0;
pub const LINE_HEIGHT: f32 = 10.0 * MM;

const MARGIN: f32 = 10.0 * MM;
const BREAK_MARGIN: f32 = 20.0 * MM;
const CELL_PADDING: f32 = 1.0 * MM;
const FONT_RESOURCE: &str = "F1";
const FONT_BASE: &str = "Times-Roman";

/// A rendered proposal and the name it is offered under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ProposalDocument {
    /// Writes the PDF as `<dir>/<filename>` and returns the path.
    pub async fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.filename);
        tokio::fs::write(&path, &self.bytes).await?;
        Ok(path)
    }
}

/// `<lead_name>_proposal.pdf`. The name is kept as submitted (no trimming); only path
/// separators, quotes, `:` and control characters are replaced by `_`.
pub fn proposal_filename(lead_name: &str) -> String {
    let safe: String = lead_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '"' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}_proposal.pdf", safe)
}

/// Usable text width inside one full-width cell.
fn wrap_width() -> f32 {
    PAGE_WIDTH - 2.0 * MARGIN - 2.0 * CELL_PADDING
}

/// Word-wraps `text` into encoded lines no wider than `max_width` at [`FONT_SIZE`].
///
/// Explicit newlines always break; empty input lines are kept as blank lines. A single
/// word wider than the line is split between characters.
pub(crate) fn wrap_lines(text: &str, max_width: f32) -> Vec<Vec<u8>> {
    let space = metrics::text_width(b" ", FONT_SIZE);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut line: Vec<u8> = Vec::new();
        let mut line_width = 0.0;

        for word in paragraph.split_whitespace() {
            let mut word = metrics::encode(word);
            let mut word_width = metrics::text_width(&word, FONT_SIZE);

            if !line.is_empty() && line_width + space + word_width <= max_width {
                line.push(b' ');
                line.extend_from_slice(&word);
                line_width += space + word_width;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            while word_width > max_width {
                let mut taken = 0.0;
                let mut split = 0;
                for &b in &word {
                    let w = metrics::text_width(&[b], FONT_SIZE);
                    if taken + w > max_width && split > 0 {
                        break;
                    }
                    taken += w;
                    split += 1;
                }
                let rest = word.split_off(split);
                lines.push(word);
                word = rest;
                word_width = metrics::text_width(&word, FONT_SIZE);
            }
            line = word;
            line_width = word_width;
        }
        lines.push(line);
    }
    lines
}

/// Splits lines into pages, filling each page down to the break margin.
fn paginate(lines: Vec<Vec<u8>>) -> Vec<Vec<Vec<u8>>> {
    let per_page = (((PAGE_HEIGHT - BREAK_MARGIN - MARGIN) / LINE_HEIGHT).floor() as usize).max(1);
    if lines.is_empty() {
        return vec![Vec::new()];
    }
    lines.chunks(per_page).map(<[Vec<u8>]>::to_vec).collect()
}

fn page_operations(lines: &[Vec<u8>]) -> Vec<Operation> {
    let x = MARGIN + CELL_PADDING;
    let mut ops = Vec::with_capacity(lines.len() * 5);
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        // Baseline sits mid-cell, shifted down by 0.3 em.
        let top = MARGIN + i as f32 * LINE_HEIGHT;
        let baseline = top + LINE_HEIGHT / 2.0 + 0.3 * FONT_SIZE;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), FONT_SIZE.into()],
        ));
        ops.push(Operation::new(
            "Td",
            vec![x.into(), (PAGE_HEIGHT - baseline).into()],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.clone())],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}

/// Renders the proposal text into a paginated PDF named after the lead.
pub fn render(text: &ProposalText, lead_name: &str) -> Result<ProposalDocument, RenderError> {
    let pages = paginate(wrap_lines(text.as_str(), wrap_width()));

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => FONT_BASE,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in &pages {
        let content = Content {
            operations: page_operations(lines),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(ProposalDocument {
        filename: proposal_filename(lead_name),
        bytes,
    })
}
