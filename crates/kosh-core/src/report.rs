//! PDF financial report
//!
//! Writes a small PDF 1.4 document by hand: the standard Helvetica fonts,
//! no images, no compression. Output is a pure function of the input, with
//! no creation date or document id, so the same transactions always give
//! the same bytes.
//!
//! Layout (A4 portrait): title, three summary lines, a "Transaction History:"
//! label, then a bordered table of Date, Category, Type and Amount. Rows that
//! don't fit move to a new page, which repeats the table header.

use std::fmt::Write as _;

use crate::insights::Totals;
use crate::models::{format_amount, Transaction};

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 50.0;
const ROW_HEIGHT: f64 = 20.0;
const CELL_PADDING: f64 = 5.0;
const TABLE_FONT_SIZE: f64 = 10.0;
const TITLE_FONT_SIZE: f64 = 16.0;

/// (heading, column width)
const COLUMNS: [(&str, f64); 4] = [
    ("Date", 110.0),
    ("Category", 140.0),
    ("Type", 100.0),
    ("Amount", 145.0),
];

/// Escape a string for a PDF literal, mapping it to single-byte codes
///
/// Characters outside Latin-1 become `?`; non-ASCII bytes are written as
/// octal escapes so the content stream stays ASCII.
fn pdf_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for ch in s.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            '\u{a0}'..='\u{ff}' => {
                let _ = write!(out, "\\{:03o}", ch as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}

/// Cut text that would overflow `width` at `font_size` (Helvetica averages
/// about half the font size per glyph)
fn fit(text: &str, width: f64, font_size: f64) -> String {
    let max_chars = ((width - 2.0 * CELL_PADDING) / (font_size * 0.5)) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

/// Content stream for one page, built top to bottom
struct PageContent {
    ops: String,
    /// Top edge of the next table row
    cursor: f64,
}

impl PageContent {
    fn new(cursor: f64) -> Self {
        Self {
            ops: String::new(),
            cursor,
        }
    }

    fn text(&mut self, font: &str, size: f64, x: f64, y: f64, text: &str) {
        let _ = writeln!(
            self.ops,
            "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET",
            font,
            size,
            x,
            y,
            pdf_text(text)
        );
    }

    fn row(&mut self, font: &str, cells: [&str; 4]) {
        let top = self.cursor;
        let bottom = top - ROW_HEIGHT;
        let mut x = MARGIN;
        for ((_, width), cell) in COLUMNS.iter().zip(cells) {
            let _ = writeln!(
                self.ops,
                "{:.2} {:.2} {:.2} {:.2} re S",
                x, bottom, width, ROW_HEIGHT
            );
            let label = fit(cell, *width, TABLE_FONT_SIZE);
            self.text(
                font,
                TABLE_FONT_SIZE,
                x + CELL_PADDING,
                bottom + 6.0,
                &label,
            );
            x += width;
        }
        self.cursor = bottom;
    }

    fn header_row(&mut self) {
        self.row("F2", COLUMNS.map(|(heading, _)| heading));
    }

    fn has_room_for_row(&self) -> bool {
        self.cursor - ROW_HEIGHT >= MARGIN
    }
}

/// Lay out the report into per-page content streams
fn layout(transactions: &[Transaction], name: &str) -> Vec<String> {
    let totals = Totals::from_transactions(transactions);
    let top = PAGE_HEIGHT - MARGIN;

    let mut page = PageContent::new(top);
    page.ops.push_str("0.5 w\n");
    let title = fit(
        &format!("Financial Report for {}", name),
        PAGE_WIDTH - 2.0 * MARGIN,
        TITLE_FONT_SIZE,
    );
    page.text("F2", TITLE_FONT_SIZE, MARGIN, top - 16.0, &title);
    page.text(
        "F1",
        12.0,
        MARGIN,
        top - 50.0,
        &format!("Total Income: INR {}", format_amount(totals.income)),
    );
    page.text(
        "F1",
        12.0,
        MARGIN,
        top - 68.0,
        &format!("Total Expenses: INR {}", format_amount(totals.expense)),
    );
    page.text(
        "F1",
        12.0,
        MARGIN,
        top - 86.0,
        &format!("Net Savings: INR {}", format_amount(totals.balance)),
    );
    page.text("F2", 12.0, MARGIN, top - 120.0, "Transaction History:");
    page.cursor = top - 130.0;
    page.header_row();

    let mut pages = Vec::new();
    for tx in transactions {
        if !page.has_room_for_row() {
            pages.push(std::mem::take(&mut page.ops));
            page = PageContent::new(top);
            page.ops.push_str("0.5 w\n");
            page.header_row();
        }
        let date = tx.date.to_string();
        let amount = format_amount(tx.amount);
        page.row(
            "F1",
            [
                date.as_str(),
                tx.category.as_str(),
                tx.kind.as_str(),
                amount.as_str(),
            ],
        );
    }
    pages.push(page.ops);
    pages
}

/// Render a transaction history and summary as a PDF document
pub fn render_report(transactions: &[Transaction], name: &str) -> Vec<u8> {
    let pages = layout(transactions, name);

    // Objects: 1 catalog, 2 page tree, 3-4 fonts, then (page, content) pairs
    let first_page_obj = 5;
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| first_page_obj + 2 * i).collect();

    let mut objects: Vec<String> = Vec::with_capacity(4 + 2 * pages.len());
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );
    for (content, page_id) in pages.iter().zip(&page_ids) {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH,
            PAGE_HEIGHT,
            page_id + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        let _ = write!(out, "{} 0 obj\n{}\nendobj\n", i + 1, body);
    }

    let xref_offset = out.len();
    let _ = write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(out, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    );

    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionKind};
    use chrono::NaiveDate;

    fn expenses(n: usize) -> Vec<Transaction> {
        (0..n)
            .map(|i| Transaction {
                id: i as i64 + 1,
                username: "asha".into(),
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                amount: 100.0,
                category: Category::Food,
                kind: TransactionKind::Expense,
                description: String::new(),
            })
            .collect()
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_document_frame() {
        let pdf = String::from_utf8(render_report(&expenses(2), "Asha")).unwrap();
        assert!(pdf.starts_with("%PDF-1.4\n"));
        assert!(pdf.ends_with("%%EOF\n"));
        assert!(pdf.contains("(Financial Report for Asha) Tj"));
        assert!(pdf.contains("(Total Income: INR 0.00) Tj"));
        assert!(pdf.contains("(Total Expenses: INR 200.00) Tj"));
        assert!(pdf.contains("(Net Savings: INR -200.00) Tj"));
        assert!(pdf.contains("(Transaction History:) Tj"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let pdf = String::from_utf8(render_report(&expenses(3), "Asha")).unwrap();
        let xref_at: usize = pdf
            .lines()
            .skip_while(|l| *l != "startxref")
            .nth(1)
            .unwrap()
            .parse()
            .unwrap();
        assert!(pdf[xref_at..].starts_with("xref\n"));

        let entries: Vec<&str> = pdf[xref_at..].lines().skip(3).take(4).collect();
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            assert!(pdf[offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }

    #[test]
    fn test_identical_input_identical_bytes() {
        let txs = expenses(40);
        assert_eq!(render_report(&txs, "Asha"), render_report(&txs, "Asha"));
    }

    #[test]
    fn test_rows_overflow_with_repeated_header() {
        let single = String::from_utf8(render_report(&expenses(5), "Asha")).unwrap();
        assert_eq!(count(&single, "/Type /Page /"), 1);
        assert_eq!(count(&single, "(Category) Tj"), 1);

        let many = String::from_utf8(render_report(&expenses(100), "Asha")).unwrap();
        let pages = count(&many, "/Type /Page /");
        assert!(pages >= 3);
        assert_eq!(count(&many, "(Category) Tj"), pages);
        assert_eq!(count(&many, "(Food) Tj"), 100);
        assert!(many.contains(&format!("/Count {}", pages)));
    }

    #[test]
    fn test_empty_history_still_renders() {
        let pdf = String::from_utf8(render_report(&[], "Nobody")).unwrap();
        assert_eq!(count(&pdf, "/Type /Page /"), 1);
        assert!(pdf.contains("(Date) Tj"));
    }

    #[test]
    fn test_long_name_title_stays_on_page() {
        let name = "A".repeat(200);
        let pdf = String::from_utf8(render_report(&expenses(1), &name)).unwrap();
        let max_chars = ((PAGE_WIDTH - 2.0 * MARGIN - 2.0 * CELL_PADDING)
            / (TITLE_FONT_SIZE * 0.5)) as usize;

        let title = pdf
            .lines()
            .find(|l| l.contains("(Financial Report for "))
            .unwrap();
        let start = title.find('(').unwrap() + 1;
        let end = title.rfind(") Tj").unwrap();
        let text = &title[start..end];
        assert!(text.ends_with("..."));
        assert!(text.chars().count() <= max_chars);
        assert!(!pdf.contains(&name));
    }

    #[test]
    fn test_text_escaping() {
        assert_eq!(pdf_text("a (b) \\c"), "a \\(b\\) \\\\c");
        assert_eq!(pdf_text("Jos\u{e9}"), "Jos\\351");
        assert_eq!(pdf_text("\u{20b9}5"), "?5");
    }
}
