use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use qrcode::{Color, QrCode};
use tracing::debug;

use crate::config::CertificateConfig;
use crate::error::{ChainSealError, Result};
use crate::types::{AnchorReference, DocumentFingerprint};

use super::layout::{self, CONTENT_WIDTH, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};

const HEADER_SIZE: f32 = 26.0;
const LABEL_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 12.0;
const HEX_SIZE: f32 = 9.0;
const CAPTION_SIZE: f32 = 10.0;
const FOOTNOTE_SIZE: f32 = 8.0;

/// First baseline under the page header
const TOP_CURSOR: f32 = 770.0;
/// Flowing content never descends past this, keeping the code block clear
const CONTENT_FLOOR: f32 = 300.0;

const QR_SIDE: f32 = 120.0;
const QR_BASELINE: f32 = 120.0;
const FOOTER_Y: f32 = 50.0;

type Rgb = (f32, f32, f32);

const PRIMARY: Rgb = (0.2, 0.4, 0.8);
const SECONDARY: Rgb = (0.8, 0.4, 0.2);
const ACCENT: Rgb = (0.3, 0.6, 0.3);
const INK: Rgb = (0.1, 0.1, 0.1);
const MUTED: Rgb = (0.4, 0.4, 0.4);

const INTRO_TEXT: &str =
    "This certificate affirms the authenticity and ledger registration of the following document:";

/// Fixed field set bound into a certificate. Immutable once rendered: any
/// change requires a new artifact, never an in-place edit.
#[derive(Debug, Clone)]
pub struct CertificateData {
    pub title: String,
    pub document_type: String,
    pub original_filename: String,
    pub fingerprint: DocumentFingerprint,
    pub anchor_reference: AnchorReference,
    /// SHA-256 hex of the submitter's receiving address text
    pub submitter_address_fingerprint: String,
    pub timestamp: DateTime<Utc>,
}

/// Renders the fixed-layout certificate artifact.
///
/// Informational content is byte-identical for identical inputs; only the
/// cosmetic layout is free. Contractual parts: page geometry, field set,
/// locator payload format.
pub struct CertificateIssuer {
    issuer_name: String,
    locator_base: String,
    max_locator_field_len: usize,
}

impl CertificateIssuer {
    pub fn new(
        issuer_name: impl Into<String>,
        locator_base: impl Into<String>,
        max_locator_field_len: usize,
    ) -> Self {
        Self {
            issuer_name: issuer_name.into(),
            locator_base: locator_base.into(),
            max_locator_field_len,
        }
    }

    pub fn from_config(config: &CertificateConfig) -> Self {
        Self::new(
            config.issuer_name.clone(),
            config.locator_base.clone(),
            config.max_locator_field_len,
        )
    }

    /// Scannable verification locator embedded in the 2-D code.
    ///
    /// Title and filename are bounded here so an overlong input cannot push
    /// the payload past what the code can encode.
    pub fn locator(&self, data: &CertificateData) -> String {
        format!(
            "{}\n\nDocument: {}\nFile: {}\nHash: {}",
            self.locator_base,
            compact(&data.title, self.max_locator_field_len),
            compact(&data.original_filename, self.max_locator_field_len),
            data.fingerprint.as_hex()
        )
    }

    /// Render the certificate as a single paginated PDF.
    pub fn issue(&self, data: &CertificateData) -> Result<Vec<u8>> {
        // Encode the code first so nothing is drawn for an unencodable locator
        let locator = self.locator(data);
        let code = QrCode::new(locator.as_bytes()).map_err(|e| {
            ChainSealError::render(format!("verification locator cannot be encoded: {}", e))
        })?;

        let mut composer = PageComposer::new(page_frame());

        // Issuer mark, top right
        let mark_width = layout::text_width(&self.issuer_name, 16.0);
        show_text(
            &mut composer.ops,
            "F2",
            16.0,
            PAGE_WIDTH - MARGIN - mark_width,
            820.0,
            SECONDARY,
            &self.issuer_name,
        );

        // Title block
        show_centered(
            &mut composer.ops,
            "F2",
            HEADER_SIZE,
            composer.cursor,
            PRIMARY,
            "CERTIFICATE OF AUTHENTICITY",
        );
        composer.cursor -= 20.0;
        stroke_rule(&mut composer.ops, composer.cursor, SECONDARY);
        composer.cursor -= 40.0;

        // Description
        for line in layout::wrap_text(INTRO_TEXT, BODY_SIZE, CONTENT_WIDTH) {
            show_centered(&mut composer.ops, "F1", BODY_SIZE, composer.cursor, INK, &line);
            composer.cursor -= 16.0;
        }
        composer.cursor -= 30.0;

        // Labeled field block
        let rows: [(&str, String, bool, Rgb); 7] = [
            ("Document Title", data.title.clone(), false, PRIMARY),
            ("File Name", data.original_filename.clone(), false, PRIMARY),
            ("Document Type", data.document_type.clone(), false, PRIMARY),
            (
                "Registration Date",
                data.timestamp.to_rfc3339(),
                false,
                PRIMARY,
            ),
            (
                "File Hash (SHA-256)",
                data.fingerprint.as_hex().to_string(),
                true,
                ACCENT,
            ),
            (
                "Transaction Hash",
                data.anchor_reference.as_str().to_string(),
                true,
                ACCENT,
            ),
            (
                "Wallet Hash (SHA-256)",
                data.submitter_address_fingerprint.clone(),
                true,
                ACCENT,
            ),
        ];

        for (label, value, small, label_color) in rows {
            field_block(&mut composer, label, &value, small, label_color);
        }

        composer.cursor -= 10.0;
        composer.ensure_room(20.0);
        stroke_rule(&mut composer.ops, composer.cursor, SECONDARY);

        // Code block at fixed geometry on the final page
        self.code_block(&mut composer.ops, &code);

        // Closing mark
        show_centered(
            &mut composer.ops,
            "F2",
            CAPTION_SIZE,
            FOOTER_Y,
            SECONDARY,
            &format!("Secured by {}", self.issuer_name),
        );

        let artifact = assemble(composer.finish())?;
        debug!("Certificate rendered: {} bytes", artifact.len());
        Ok(artifact)
    }

    /// Dashed frame, code modules and the scan captions
    fn code_block(&self, ops: &mut Vec<Operation>, code: &QrCode) {
        let x0 = (PAGE_WIDTH - QR_SIDE) / 2.0;
        let y0 = QR_BASELINE;

        ops.push(Operation::new("q", vec![]));
        set_stroke_color(ops, SECONDARY);
        ops.push(Operation::new("w", vec![Object::Real(2.0)]));
        ops.push(Operation::new(
            "d",
            vec![
                Object::Array(vec![Object::Real(5.0), Object::Real(3.0)]),
                Object::Integer(0),
            ],
        ));
        ops.push(Operation::new(
            "re",
            vec![
                Object::Real(x0 - 10.0),
                Object::Real(y0 - 10.0),
                Object::Real(QR_SIDE + 20.0),
                Object::Real(QR_SIDE + 20.0),
            ],
        ));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));

        // Dark modules as filled squares, row 0 at the top
        let width = code.width();
        let module = QR_SIDE / width as f32;
        let colors = code.to_colors();
        set_fill_color(ops, (0.0, 0.0, 0.0));
        for (idx, color) in colors.iter().enumerate() {
            if *color == Color::Dark {
                let col = (idx % width) as f32;
                let row = (idx / width) as f32;
                ops.push(Operation::new(
                    "re",
                    vec![
                        Object::Real(x0 + col * module),
                        Object::Real(y0 + QR_SIDE - (row + 1.0) * module),
                        Object::Real(module),
                        Object::Real(module),
                    ],
                ));
            }
        }
        ops.push(Operation::new("f", vec![]));

        show_centered(
            ops,
            "F2",
            CAPTION_SIZE,
            y0 - 25.0,
            SECONDARY,
            &format!("SCAN TO VERIFY ON {}", self.issuer_name.to_uppercase()),
        );
        show_centered(
            ops,
            "F1",
            FOOTNOTE_SIZE,
            y0 - 40.0,
            MUTED,
            "Ledger Verification Certificate",
        );
    }
}

/// Truncate to at most `max_len` characters, on a char boundary
fn compact(text: &str, max_len: usize) -> &str {
    match text.char_indices().nth(max_len) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Accumulates per-page operation lists, breaking pages when flowing
/// content would descend into the reserved code block area.
struct PageComposer {
    frame: Vec<Operation>,
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    cursor: f32,
}

impl PageComposer {
    fn new(frame: Vec<Operation>) -> Self {
        Self {
            ops: frame.clone(),
            frame,
            pages: Vec::new(),
            cursor: TOP_CURSOR,
        }
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.cursor - needed < CONTENT_FLOOR {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        let finished = std::mem::replace(&mut self.ops, self.frame.clone());
        self.pages.push(finished);
        self.cursor = TOP_CURSOR;
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.pages.push(self.ops);
        self.pages
    }
}

/// Centered label, wrapped value lines, trailing gap
fn field_block(
    composer: &mut PageComposer,
    label: &str,
    value: &str,
    small: bool,
    label_color: Rgb,
) {
    let value_size = if small { HEX_SIZE } else { BODY_SIZE };
    let value_color = if small { MUTED } else { INK };
    let line_height = value_size + 4.0;

    let lines = layout::wrap_text(value, value_size, CONTENT_WIDTH);
    composer.ensure_room(16.0 + line_height + 10.0);

    show_centered(
        &mut composer.ops,
        "F2",
        LABEL_SIZE,
        composer.cursor,
        label_color,
        label,
    );
    composer.cursor -= 16.0;

    for line in lines {
        composer.ensure_room(line_height);
        show_centered(
            &mut composer.ops,
            "F1",
            value_size,
            composer.cursor,
            value_color,
            &line,
        );
        composer.cursor -= line_height;
    }

    composer.cursor -= 10.0;
}

fn set_fill_color(ops: &mut Vec<Operation>, color: Rgb) {
    ops.push(Operation::new(
        "rg",
        vec![
            Object::Real(color.0),
            Object::Real(color.1),
            Object::Real(color.2),
        ],
    ));
}

fn set_stroke_color(ops: &mut Vec<Operation>, color: Rgb) {
    ops.push(Operation::new(
        "RG",
        vec![
            Object::Real(color.0),
            Object::Real(color.1),
            Object::Real(color.2),
        ],
    ));
}

fn show_text(
    ops: &mut Vec<Operation>,
    font: &str,
    size: f32,
    x: f32,
    y: f32,
    color: Rgb,
    text: &str,
) {
    set_fill_color(ops, color);
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), Object::Real(size)]));
    ops.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

fn show_centered(ops: &mut Vec<Operation>, font: &str, size: f32, y: f32, color: Rgb, text: &str) {
    let x = (PAGE_WIDTH - layout::text_width(text, size)) / 2.0;
    show_text(ops, font, size, x, y, color, text);
}

fn stroke_rule(ops: &mut Vec<Operation>, y: f32, color: Rgb) {
    set_stroke_color(ops, color);
    ops.push(Operation::new("w", vec![Object::Real(1.0)]));
    ops.push(Operation::new(
        "m",
        vec![Object::Real(MARGIN), Object::Real(y)],
    ));
    ops.push(Operation::new(
        "l",
        vec![Object::Real(PAGE_WIDTH - MARGIN), Object::Real(y)],
    ));
    ops.push(Operation::new("S", vec![]));
}

/// Dashed decorative border repeated on every page
fn page_frame() -> Vec<Operation> {
    let mut ops = Vec::new();
    ops.push(Operation::new("q", vec![]));
    set_stroke_color(&mut ops, PRIMARY);
    ops.push(Operation::new("w", vec![Object::Real(2.0)]));
    ops.push(Operation::new(
        "d",
        vec![
            Object::Array(vec![Object::Real(10.0), Object::Real(5.0)]),
            Object::Integer(0),
        ],
    ));
    ops.push(Operation::new(
        "re",
        vec![
            Object::Real(25.0),
            Object::Real(25.0),
            Object::Real(PAGE_WIDTH - 50.0),
            Object::Real(PAGE_HEIGHT - 50.0),
        ],
    ));
    ops.push(Operation::new("S", vec![]));
    ops.push(Operation::new("Q", vec![]));
    ops
}

/// Assemble the page operation lists into a serialized PDF
fn assemble(pages_ops: Vec<Vec<Operation>>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in pages_ops {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| ChainSealError::render(format!("content stream encoding failed: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
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
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut artifact = Vec::new();
    doc.save_to(&mut artifact)
        .map_err(|e| ChainSealError::render(format!("pdf serialization failed: {}", e)))?;
    Ok(artifact)
}
