//! Document renderer (PDF).
//!
//! Layout is planned before anything is drawn: [`DocumentLayout::plan`] fixes page size, column
//! widths, row height and the row range of every page, so pagination can be checked without
//! parsing PDF output. Every page repeats the title block and table header and carries a
//! "Página i de n" footer.

use super::{Renderer, artifact_filename, validate_shape};
use crate::config::{DEFAULT_ROWS_PER_PAGE, ReportConfig};
use crate::console_format::{display_width, truncate_to_width};
use crate::error::{ReportError, Result};
use crate::report::types::{Artifact, ReportColumn, ReportData, ReportFormat, ReportRow};
use log::{debug, warn};
use printpdf::{BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect, Rgb};
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Cursor};
use std::ops::Range;

const MARGIN_MM: f32 = 12.0;
/// Space above the table for title, subtitle and timestamp
const HEADER_BLOCK_MM: f32 = 26.0;
const FOOTER_MM: f32 = 8.0;
const MAX_ROW_HEIGHT_MM: f32 = 7.0;
const CELL_PADDING_MM: f32 = 1.2;
const MIN_FONT_PT: f32 = 4.0;
const MAX_FONT_PT: f32 = 9.0;
const PT_TO_MM: f32 = 0.3528;
/// Share of the row height taken by the glyphs
const FONT_TO_ROW: f32 = 0.6;
/// Average Helvetica glyph width as a fraction of the font size
const AVG_GLYPH_EM: f32 = 0.5;
const LAYER_NAME: &str = "Tabla";

/// Page orientation for A4 output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    #[default]
    Landscape,
    Portrait,
}

impl PageOrientation {
    /// (width, height) in millimetres
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageOrientation::Landscape => (297.0, 210.0),
            PageOrientation::Portrait => (210.0, 297.0),
        }
    }
}

/// Split `row_count` rows into consecutive pages of at most `rows_per_page`.
///
/// An empty report still gets one (empty) page so headers are printed.
pub fn paginate(row_count: usize, rows_per_page: usize) -> Vec<Range<usize>> {
    let capacity = rows_per_page.max(1);
    if row_count == 0 {
        return vec![0..0];
    }
    (0..row_count).step_by(capacity).map(|start| start..(start + capacity).min(row_count)).collect()
}

fn table_area_mm(page_height_mm: f32) -> f32 {
    page_height_mm - 2.0 * MARGIN_MM - HEADER_BLOCK_MM - FOOTER_MM
}

/// Largest page capacity whose rows are still as tall as the minimum font.
///
/// 63 rows in landscape, 100 in portrait.
pub fn max_rows_per_page(orientation: PageOrientation) -> usize {
    let min_row_height_mm = MIN_FONT_PT * PT_TO_MM / FONT_TO_ROW;
    let rows = (table_area_mm(orientation.dimensions_mm().1) / min_row_height_mm).floor() as usize;
    // One row is the table header
    rows.saturating_sub(1).max(1)
}

/// Geometry of a rendered document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub column_widths_mm: Vec<f32>,
    pub row_height_mm: f32,
    pub font_size_pt: f32,
    /// Effective capacity after clamping to what the page can draw
    pub rows_per_page: usize,
    /// Row index range drawn on each page
    pub pages: Vec<Range<usize>>,
}

impl DocumentLayout {
    pub fn plan(data: &ReportData, orientation: PageOrientation, rows_per_page: usize) -> Self {
        let (page_width_mm, page_height_mm) = orientation.dimensions_mm();
        let max_capacity = max_rows_per_page(orientation);
        let capacity = rows_per_page.clamp(1, max_capacity);
        if capacity < rows_per_page {
            warn!(
                "{} rows per page do not fit legibly on a {:?} page, using {}",
                rows_per_page, orientation, capacity
            );
        }

        // Table area must hold the header row plus `capacity` data rows
        let row_height_mm = (table_area_mm(page_height_mm) / (capacity + 1) as f32).min(MAX_ROW_HEIGHT_MM);
        let font_size_pt = (row_height_mm * FONT_TO_ROW / PT_TO_MM).clamp(MIN_FONT_PT, MAX_FONT_PT);

        let table_width = page_width_mm - 2.0 * MARGIN_MM;
        let total_hint: f32 = data.columns.iter().map(ReportColumn::width_hint).sum();
        let column_widths_mm = data
            .columns
            .iter()
            .map(|c| if total_hint > 0.0 { table_width * c.width_hint() / total_hint } else { 0.0 })
            .collect();

        Self {
            page_width_mm,
            page_height_mm,
            column_widths_mm,
            row_height_mm,
            font_size_pt,
            rows_per_page: capacity,
            pages: paginate(data.rows.len(), capacity),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn table_top_mm(&self) -> f32 {
        self.page_height_mm - MARGIN_MM - HEADER_BLOCK_MM
    }

    fn glyph_width_mm(&self, font_size_pt: f32) -> f32 {
        font_size_pt * AVG_GLYPH_EM * PT_TO_MM
    }

    /// How many average glyphs fit into a column at the table font size.
    pub fn max_chars(&self, column_index: usize) -> usize {
        let usable = self.column_widths_mm.get(column_index).copied().unwrap_or(0.0) - 2.0 * CELL_PADDING_MM;
        if usable <= 0.0 { 0 } else { (usable / self.glyph_width_mm(self.font_size_pt)).floor() as usize }
    }
}

/// Paginated PDF table.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    orientation: PageOrientation,
    rows_per_page: usize,
}

impl DocumentRenderer {
    pub fn new(orientation: PageOrientation, rows_per_page: usize) -> Self {
        Self { orientation, rows_per_page: rows_per_page.max(1) }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.document.orientation, config.document.rows_per_page)
    }

    pub fn layout(&self, data: &ReportData) -> DocumentLayout {
        DocumentLayout::plan(data, self.orientation, self.rows_per_page)
    }

    fn draw(&self, data: &ReportData, layout: &DocumentLayout) -> Result<Vec<u8>> {
        let width = Mm(layout.page_width_mm);
        let height = Mm(layout.page_height_mm);
        let (doc, first_page, first_layer) = PdfDocument::new(data.title.as_str(), width, height, LAYER_NAME);

        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?,
        };

        let total_pages = layout.page_count();
        for (page_index, range) in layout.pages.iter().enumerate() {
            let (page, layer) = if page_index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, LAYER_NAME)
            };
            let canvas = doc.get_page(page).get_layer(layer);

            draw_title_block(&canvas, data, layout, &fonts);
            draw_table(&canvas, data, &data.rows[range.clone()], layout, &fonts);
            draw_footer(&canvas, layout, page_index + 1, total_pages, &fonts);
        }

        let mut buf = BufWriter::new(Cursor::new(Vec::new()));
        doc.save(&mut buf).map_err(pdf_err)?;
        let cursor = buf.into_inner().map_err(|e| ReportError::render("pdf", e))?;
        Ok(cursor.into_inner())
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new(PageOrientation::Landscape, DEFAULT_ROWS_PER_PAGE)
    }
}

impl Renderer for DocumentRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Document
    }

    fn render(&self, data: &ReportData) -> Result<Artifact> {
        validate_shape(data)?;

        let layout = self.layout(data);
        debug!(
            "Laying out {} rows on {} pages ({} rows/page, row height {:.1}mm)",
            data.rows.len(),
            layout.page_count(),
            layout.rows_per_page,
            layout.row_height_mm
        );

        let bytes = self.draw(data, &layout)?;
        Ok(Artifact::new(bytes, artifact_filename(data, ReportFormat::Document), ReportFormat::Document))
    }
}

fn pdf_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::render("pdf", e)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn draw_line(canvas: &PdfLayerReference, from: (f32, f32), to: (f32, f32)) {
    canvas.add_line(Line {
        points: vec![(Point::new(Mm(from.0), Mm(from.1)), false), (Point::new(Mm(to.0), Mm(to.1)), false)],
        is_closed: false,
    });
}

fn draw_title_block(canvas: &PdfLayerReference, data: &ReportData, layout: &DocumentLayout, fonts: &Fonts) {
    let mut y = layout.page_height_mm - MARGIN_MM - 6.0;

    canvas.set_fill_color(rgb(0.10, 0.10, 0.10));
    canvas.use_text(data.title.as_str(), 14.0, Mm(MARGIN_MM), Mm(y), &fonts.bold);
    y -= 7.0;

    canvas.set_fill_color(rgb(0.35, 0.35, 0.35));
    if let Some(subtitle) = &data.subtitle {
        canvas.use_text(subtitle.as_str(), 9.0, Mm(MARGIN_MM), Mm(y), &fonts.regular);
        y -= 5.0;
    }
    canvas.use_text(format!("Generado: {}", data.generated_at_display()), 8.0, Mm(MARGIN_MM), Mm(y), &fonts.regular);
}

fn draw_table(canvas: &PdfLayerReference, data: &ReportData, rows: &[ReportRow], layout: &DocumentLayout, fonts: &Fonts) {
    let left = MARGIN_MM;
    let right = layout.page_width_mm - MARGIN_MM;
    let top = layout.table_top_mm();
    let row_h = layout.row_height_mm;
    let bottom = top - row_h * (rows.len() + 1) as f32;

    // Header background
    canvas.set_fill_color(rgb(0.85, 0.88, 0.95));
    canvas.add_rect(Rect::new(Mm(left), Mm(top - row_h), Mm(right), Mm(top)));

    canvas.set_fill_color(rgb(0.0, 0.0, 0.0));
    let headers: Vec<String> = data.columns.iter().map(|c| c.header.clone()).collect();
    draw_cells(canvas, data, layout, &headers, top, &fonts.bold);

    for (i, row) in rows.iter().enumerate() {
        let row_top = top - row_h * (i + 1) as f32;
        draw_cells(canvas, data, layout, &data.display_row(row), row_top, &fonts.regular);
    }

    // Grid
    canvas.set_outline_color(rgb(0.45, 0.45, 0.45));
    canvas.set_outline_thickness(0.4);
    for k in 0..=rows.len() + 1 {
        let y = top - row_h * k as f32;
        draw_line(canvas, (left, y), (right, y));
    }
    let mut x = left;
    draw_line(canvas, (x, top), (x, bottom));
    for w in &layout.column_widths_mm {
        x += w;
        draw_line(canvas, (x, top), (x, bottom));
    }

    if rows.is_empty() {
        canvas.set_fill_color(rgb(0.35, 0.35, 0.35));
        canvas.use_text("Sin registros", layout.font_size_pt, Mm(left), Mm(bottom - row_h), &fonts.regular);
    }
}

/// Draw one line of cells whose top edge is at `row_top`.
fn draw_cells(
    canvas: &PdfLayerReference,
    data: &ReportData,
    layout: &DocumentLayout,
    cells: &[String],
    row_top: f32,
    font: &IndirectFontRef,
) {
    let baseline = row_top - layout.row_height_mm * 0.7;
    let glyph = layout.glyph_width_mm(layout.font_size_pt);
    let mut x = MARGIN_MM;

    for (i, (column, text)) in data.columns.iter().zip(cells).enumerate() {
        let col_w = layout.column_widths_mm[i];
        let fitted = truncate_to_width(text, layout.max_chars(i));
        let text_x = if column.kind.is_numeric() {
            x + col_w - CELL_PADDING_MM - display_width(&fitted) as f32 * glyph
        } else {
            x + CELL_PADDING_MM
        };
        canvas.use_text(fitted, layout.font_size_pt, Mm(text_x), Mm(baseline), font);
        x += col_w;
    }
}

fn draw_footer(canvas: &PdfLayerReference, layout: &DocumentLayout, page: usize, total: usize, fonts: &Fonts) {
    let label = format!("Página {} de {}", page, total);
    let x = layout.page_width_mm - MARGIN_MM - display_width(&label) as f32 * layout.glyph_width_mm(8.0);
    canvas.set_fill_color(rgb(0.35, 0.35, 0.35));
    canvas.use_text(label, 8.0, Mm(x), Mm(MARGIN_MM * 0.6), &fonts.regular);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::ColumnKind;

    fn numbered_report(rows: usize) -> ReportData {
        let mut data = ReportData::new(
            "Bitácora",
            vec![
                ReportColumn::new("n", "N°", ColumnKind::Number).with_width(0.5),
                ReportColumn::new("desc", "Descripción", ColumnKind::Text).with_width(3.0),
                ReportColumn::new("ok", "Novedad", ColumnKind::Boolean),
            ],
        );
        for i in 0..rows {
            data.push_row(ReportRow::new().with("n", (i + 1).to_string()).with("desc", "Revisión de cables").with("ok", "No"));
        }
        data
    }

    #[test]
    fn test_paginate_exact_and_partial() {
        assert_eq!(paginate(80, 40), vec![0..40, 40..80]);
        assert_eq!(paginate(81, 40), vec![0..40, 40..80, 80..81]);
        assert_eq!(paginate(3, 40), vec![0..3]);
    }

    #[test]
    fn test_paginate_empty_and_zero_capacity() {
        assert_eq!(paginate(0, 40), vec![0..0]);
        assert_eq!(paginate(2, 0), vec![0..1, 1..2]);
    }

    #[test]
    fn test_paginate_500_rows_by_40() {
        let pages = paginate(500, 40);
        assert_eq!(pages.len(), 13); // ceil(500 / 40)
        assert!(pages.iter().all(|p| p.len() <= 40));

        let mut seen = vec![0u32; 500];
        for page in &pages {
            for i in page.clone() {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1), "every row exactly once");
    }

    #[test]
    fn test_layout_column_widths_follow_hints() {
        let layout = DocumentLayout::plan(&numbered_report(1), PageOrientation::Landscape, 25);
        let total: f32 = layout.column_widths_mm.iter().sum();
        assert!((total - (297.0 - 2.0 * MARGIN_MM)).abs() < 0.01);
        assert!((layout.column_widths_mm[1] / layout.column_widths_mm[0] - 6.0).abs() < 0.01);
    }

    #[test]
    fn test_layout_rows_fit_on_page() {
        for (orientation, capacity) in
            [(PageOrientation::Landscape, 40), (PageOrientation::Portrait, 40), (PageOrientation::Landscape, 5)]
        {
            let layout = DocumentLayout::plan(&numbered_report(0), orientation, capacity);
            let table_bottom = layout.table_top_mm() - layout.row_height_mm * (capacity + 1) as f32;
            assert!(table_bottom >= MARGIN_MM + FOOTER_MM - 0.01, "{:?} x {} overflows", orientation, capacity);
            assert!(layout.row_height_mm <= MAX_ROW_HEIGHT_MM);
            assert!((MIN_FONT_PT..=MAX_FONT_PT).contains(&layout.font_size_pt));
        }
    }

    #[test]
    fn test_glyphs_fit_rows_at_any_capacity() {
        for orientation in [PageOrientation::Landscape, PageOrientation::Portrait] {
            for capacity in [1, 25, 40, 63, 64, 80, 100, 101, 200, 10_000] {
                let layout = DocumentLayout::plan(&numbered_report(0), orientation, capacity);
                assert!(
                    layout.font_size_pt * PT_TO_MM <= layout.row_height_mm,
                    "{:?} x {}: {}pt font in {}mm row",
                    orientation,
                    capacity,
                    layout.font_size_pt,
                    layout.row_height_mm
                );
                assert!(layout.font_size_pt >= MIN_FONT_PT);
                assert!(layout.rows_per_page <= capacity);
            }
        }
    }

    #[test]
    fn test_capacity_clamped_to_page() {
        assert_eq!(max_rows_per_page(PageOrientation::Landscape), 63);
        assert_eq!(max_rows_per_page(PageOrientation::Portrait), 100);

        let layout = DocumentLayout::plan(&numbered_report(500), PageOrientation::Landscape, 200);
        assert_eq!(layout.rows_per_page, 63);
        assert_eq!(layout.page_count(), 8); // ceil(500 / 63)
        assert_eq!(layout.pages.iter().map(|p| p.len()).sum::<usize>(), 500);

        let untouched = DocumentLayout::plan(&numbered_report(500), PageOrientation::Landscape, 40);
        assert_eq!(untouched.rows_per_page, 40);
    }

    #[test]
    fn test_renderer_layout_uses_capacity() {
        let renderer = DocumentRenderer::new(PageOrientation::Landscape, 40);
        let layout = renderer.layout(&numbered_report(500));
        assert_eq!(layout.page_count(), 13);
        assert_eq!(layout.pages.last(), Some(&(480..500)));
    }

    #[test]
    fn test_render_pdf_bytes() {
        let renderer = DocumentRenderer::new(PageOrientation::Landscape, 10);
        let artifact = renderer.render(&numbered_report(25)).unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert_eq!(artifact.content_type, "application/pdf");
        assert!(artifact.filename.ends_with(".pdf"));
    }

    #[test]
    fn test_render_empty_pdf() {
        let artifact = DocumentRenderer::default().render(&numbered_report(0)).unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_rejects_malformed() {
        let mut data = numbered_report(2);
        data.rows[1].remove("desc");
        assert!(matches!(DocumentRenderer::default().render(&data), Err(ReportError::MalformedReportData(_))));
    }
}
