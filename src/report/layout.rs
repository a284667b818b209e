//! Page layout for the reviewer report.
//!
//! The layout is computed independently of PDF encoding: a [`PageWriter`]
//! walks a cursor down an A4 page and emits positioned [`TextRun`]s, breaking
//! to a new page when the cursor crosses the bottom margin.

use chrono::NaiveDate;

use crate::models::ReviewerNames;

/// A4 in PDF points.
pub const PAGE_WIDTH: f32 = 595.2756;
pub const PAGE_HEIGHT: f32 = 841.8898;

pub const LEFT_MARGIN: f32 = 50.0;
pub const TOP_MARGIN: f32 = 50.0;
pub const BOTTOM_MARGIN: f32 = 50.0;

/// X position of the "Total" column in the header.
const TOTAL_X: f32 = 350.0;
const TITLE_GAP: f32 = 20.0;
const HEADER_GAP: f32 = 30.0;
/// Vertical distance between entry lines.
pub const LINE_HEIGHT: f32 = 15.0;

pub const REPORT_TITLE: &str = "Play Store Reviews";

const TITLE_FONT: (Font, f32) = (Font::HelveticaBold, 14.0);
const HEADER_FONT: (Font, f32) = (Font::Helvetica, 11.0);
const BODY_FONT: (Font, f32) = (Font::Helvetica, 10.0);

/// Standard PDF fonts used by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub fn base_font(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }
}

/// What a run of text represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Title,
    Header,
    Entry,
}

/// A single line of text at an absolute position (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub kind: RunKind,
    pub x: f32,
    pub y: f32,
    pub font: Font,
    pub size: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

impl Page {
    pub fn entries(&self) -> impl Iterator<Item = &TextRun> {
        self.runs.iter().filter(|r| r.kind == RunKind::Entry)
    }
}

/// Laid out report pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportLayout {
    pages: Vec<Page>,
}

impl ReportLayout {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of entry lines across all pages.
    pub fn entry_count(&self) -> usize {
        self.pages.iter().map(|p| p.entries().count()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Writing,
    AtBottomMargin,
}

/// Sequential writer that owns the cursor and page-break policy.
#[derive(Debug)]
pub struct PageWriter {
    pages: Vec<Page>,
    current: Page,
    cursor_y: f32,
    font: (Font, f32),
    state: WriterState,
}

impl Default for PageWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PageWriter {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Page::default(),
            cursor_y: PAGE_HEIGHT - TOP_MARGIN,
            font: BODY_FONT,
            state: WriterState::Writing,
        }
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    fn set_font(&mut self, font: (Font, f32)) {
        self.font = font;
    }

    fn draw(&mut self, kind: RunKind, x: f32, text: String) {
        let (font, size) = self.font;
        self.current.runs.push(TextRun {
            kind,
            x,
            y: self.cursor_y,
            font,
            size,
            text,
        });
    }

    fn advance(&mut self, dy: f32) {
        self.cursor_y -= dy;
        if self.cursor_y < BOTTOM_MARGIN {
            self.state = WriterState::AtBottomMargin;
        }
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.cursor_y = PAGE_HEIGHT - TOP_MARGIN;
        self.font = BODY_FONT;
        self.state = WriterState::Writing;
    }

    /// Write the title block: title, then date and total on one line.
    pub fn header(&mut self, date: NaiveDate, total: usize) {
        self.set_font(TITLE_FONT);
        self.draw(RunKind::Title, LEFT_MARGIN, REPORT_TITLE.to_string());
        self.advance(TITLE_GAP);

        self.set_font(HEADER_FONT);
        self.draw(RunKind::Header, LEFT_MARGIN, format!("Date: {}", date.format("%Y-%m-%d")));
        self.draw(RunKind::Header, TOTAL_X, format!("Total: {}", total));
        self.advance(HEADER_GAP);

        self.set_font(BODY_FONT);
    }

    /// Write one body line, breaking the page first if the cursor is past the margin.
    pub fn entry(&mut self, text: String) {
        if self.state == WriterState::AtBottomMargin {
            self.break_page();
        }
        self.draw(RunKind::Entry, LEFT_MARGIN, text);
        self.advance(LINE_HEIGHT);
    }

    pub fn finish(mut self) -> ReportLayout {
        if !self.current.runs.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        ReportLayout { pages: self.pages }
    }
}

/// Lay out the report for `names` reviewed on `date`.
pub fn layout_report(date: NaiveDate, names: &ReviewerNames) -> ReportLayout {
    let mut writer = PageWriter::new();
    writer.header(date, names.len());
    for (i, name) in names.iter().enumerate() {
        writer.entry(format!("{}. {}", i + 1, name));
    }
    writer.finish()
}
