use pdf_writer::{Content, Name, Pdf, Rect, Ref};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const A4_SHORT: f32 = 595.0;
const A4_LONG: f32 = 842.0;

/// One cell of a month grid: `None` label marks a blank (out-of-month) cell.
#[derive(Debug, Clone, Default)]
pub struct GridCell {
    pub label: Option<String>,
    pub lines: Vec<String>,
    pub highlight: bool,
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
    cell_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    /// Portrait A4, used for tables.
    pub fn new() -> Self {
        Self::with_page(A4_SHORT, A4_LONG, 50.0)
    }

    /// Landscape A4, used for the month grid.
    pub fn landscape() -> Self {
        Self::with_page(A4_LONG, A4_SHORT, 30.0)
    }

    fn with_page(page_w: f32, page_h: f32, margin: f32) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let next_id = 4;

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w,
            page_h,
            margin,
            row_h: 20.0,

            next_id,
            font_id,

            font_size: 10.0,
            header_font_size: 11.0,
            title_font_size: 14.0,
            cell_font_size: 7.5,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        let text = latin_text(text);
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(pdf_writer::Str(text.as_bytes()));
        content.end_text();
    }

    fn fill_rect(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32, rgb: (f32, f32, f32)) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.78, 0.78, 0.78);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        x_start: f32,
        row: &[String],
        font_size: f32,
    ) {
        let mut x = x_start;

        for (i, text) in row.iter().enumerate() {
            let w = col_widths[i];
            self.draw_text(content, x + 4.0, y + 5.0, font_size, &clip(text, w - 6.0, font_size));
            self.draw_cell_borders(content, x, y, w, self.row_h);
            x += w;
        }
    }

    /// Column widths from header + content, scaled down to the printable width.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5).collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                let w = (cell.len() as f32 * 6.2).max(widths[i]);
                widths[i] = w;
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_footer(&self, content: &mut Content, page: usize) {
        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 60.0,
            self.margin / 2.0,
            self.font_size,
            &pg,
        );
    }

    fn draw_page_header_footer(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin + 15.0,
            self.title_font_size,
            title,
        );
        self.draw_footer(content, page);
    }

    /// Multi-page table with a title on every page.
    pub fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let table_w: f32 = col_widths.iter().sum();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title, page_idx);

            let mut y = self.page_h - self.margin - 30.0;

            self.fill_rect(&mut content, self.margin, y, table_w, self.row_h, (0.99, 0.89, 0.89));
            self.draw_row(
                &mut content,
                y,
                &col_widths,
                self.margin,
                &header_row,
                self.header_font_size,
            );

            y -= self.row_h;

            let mut consumed = 0;

            for (i, row) in remaining.iter().enumerate() {
                if y - self.row_h < self.margin {
                    break;
                }

                if i % 2 == 0 {
                    self.fill_rect(&mut content, self.margin, y, table_w, self.row_h, (0.96, 0.96, 0.96));
                }

                self.draw_row(&mut content, y, &col_widths, self.margin, row, self.font_size);

                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() || consumed == 0 {
                break;
            }
        }
    }

    /// One page holding a 7-column grid. `cells.len()` must be a multiple
    /// of 7; blank cells are shaded grey, highlighted cells light red.
    pub fn write_month_grid(&mut self, title: &str, headers: &[&str], cells: &[GridCell]) {
        let page_no = self.page_count() + 1;
        let mut content = self.new_page();

        // title band
        let band_h = 30.0;
        let band_y = self.page_h - self.margin - band_h;
        let grid_w = self.page_w - 2.0 * self.margin;
        self.fill_rect(&mut content, self.margin, band_y, grid_w, band_h, (0.86, 0.15, 0.15));
        content.save_state();
        content.set_fill_rgb(1.0, 1.0, 1.0);
        self.draw_text(&mut content, self.margin + 10.0, band_y + 10.0, self.title_font_size, title);
        content.restore_state();

        let col_w = grid_w / 7.0;
        let header_y = band_y - self.row_h - 4.0;
        for (i, h) in headers.iter().take(7).enumerate() {
            let x = self.margin + i as f32 * col_w;
            self.fill_rect(&mut content, x, header_y, col_w, self.row_h, (0.99, 0.89, 0.89));
            self.draw_cell_borders(&mut content, x, header_y, col_w, self.row_h);
            self.draw_text(&mut content, x + 4.0, header_y + 6.0, self.header_font_size - 2.0, h);
        }

        let weeks = cells.len().div_ceil(7).max(1);
        let grid_top = header_y;
        let cell_h = (grid_top - self.margin) / weeks as f32;
        let line_h = self.cell_font_size + 2.0;

        for (idx, cell) in cells.iter().enumerate() {
            let week = idx / 7;
            let col = idx % 7;
            let x = self.margin + col as f32 * col_w;
            let y = grid_top - (week + 1) as f32 * cell_h;

            let fill = match (&cell.label, cell.highlight) {
                (None, _) => Some((0.94, 0.94, 0.94)),
                (Some(_), true) => Some((1.0, 0.89, 0.89)),
                (Some(_), false) if week % 2 == 1 => Some((0.97, 0.98, 0.99)),
                _ => None,
            };
            if let Some(rgb) = fill {
                self.fill_rect(&mut content, x, y, col_w, cell_h, rgb);
            }
            self.draw_cell_borders(&mut content, x, y, col_w, cell_h);

            let Some(label) = &cell.label else { continue };
            let mut ty = y + cell_h - self.cell_font_size - 4.0;
            self.draw_text(&mut content, x + 4.0, ty, self.cell_font_size + 1.0, label);
            ty -= line_h + 2.0;

            let room = (((ty - y) / line_h).floor().max(0.0)) as usize;
            let shown = if cell.lines.len() > room {
                room.saturating_sub(1)
            } else {
                cell.lines.len()
            };

            for line in cell.lines.iter().take(shown) {
                let text = clip(line, col_w - 8.0, self.cell_font_size);
                self.draw_text(&mut content, x + 4.0, ty, self.cell_font_size, &text);
                ty -= line_h;
            }
            if shown < cell.lines.len() && room > 0 {
                let more = format!("+{} more", cell.lines.len() - shown);
                self.draw_text(&mut content, x + 4.0, ty, self.cell_font_size, &more);
            }
        }

        self.draw_footer(&mut content, page_no);
        self.finalize_page(content);
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// The built-in Helvetica font only covers ASCII reliably.
fn latin_text(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '€' => 'E',
            '→' => '>',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}

/// Cuts `s` to roughly fit `width` points at `size`, appending "..".
fn clip(s: &str, width: f32, size: f32) -> String {
    let max_chars = ((width / (size * 0.52)).floor().max(1.0)) as usize;
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(2);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("..");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_short_text() {
        assert_eq!(clip("Ana", 100.0, 7.5), "Ana");
        let long = clip("Bartholomew Featherstonehaugh", 40.0, 7.5);
        assert!(long.ends_with(".."));
        assert!(long.chars().count() < 29);
    }

    #[test]
    fn non_ascii_is_replaced() {
        assert_eq!(latin_text("Zoë 2026 → 2027"), "Zo? 2026 > 2027");
    }

    #[test]
    fn grid_writes_one_page_per_call() {
        let mut pdf = PdfManager::landscape();
        let cells = vec![
            GridCell {
                label: Some("Sun 1".into()),
                lines: vec!["OPEN".into(), "08:00-16:00".into()],
                highlight: false,
            };
            28
        ];
        pdf.write_month_grid("February 2026", &["Sun"; 7], &cells);
        pdf.write_month_grid("March 2026", &["Sun"; 7], &cells);
        assert_eq!(pdf.page_count(), 2);
    }
}
