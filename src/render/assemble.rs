//! Assembly of retained page lines into a [`DocumentResult`].

use crate::model::{DocumentResult, Metadata, PageContent};
use serde::{Deserialize, Serialize};

/// How a document's pages are presented in the assembled content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLayout {
    /// Exactly one logical page; content carries no markers
    #[default]
    Single,
    /// Generic pages, marked `=== Page N ===`
    Pages,
    /// Named sheets, marked `=== Sheet: <name> ===`
    Sheets,
    /// Slides, marked `=== Slide N ===`
    Slides,
}

impl PageLayout {
    /// Whether this layout has more than one logical page.
    pub fn is_paged(&self) -> bool {
        !matches!(self, Self::Single)
    }

    /// Boundary marker line for a page.
    ///
    /// `None` for the single-page layout. Sheets without a name fall back to
    /// the generic page marker.
    pub fn marker(&self, page_number: usize, page_name: Option<&str>) -> Option<String> {
        let n = page_number + 1;
        match self {
            Self::Single => None,
            Self::Sheets => Some(match page_name {
                Some(name) => format!("=== Sheet: {} ===", name),
                None => format!("=== Page {} ===", n),
            }),
            Self::Slides => Some(format!("=== Slide {} ===", n)),
            Self::Pages => Some(format!("=== Page {} ===", n)),
        }
    }
}

/// Accumulates retained pages in ascending page order.
#[derive(Debug)]
pub struct ResultAssembler {
    layout: PageLayout,
    total_pages: usize,
    pages: Vec<PageContent>,
    total_lines: usize,
    content: String,
}

impl ResultAssembler {
    /// Create an assembler for a document with `total_pages` pages.
    pub fn new(layout: PageLayout, total_pages: usize) -> Self {
        Self {
            layout,
            total_pages,
            pages: Vec::new(),
            total_lines: 0,
            content: String::new(),
        }
    }

    /// Record one page's retained lines.
    ///
    /// Pages must be pushed in ascending page order.
    pub fn push_page(&mut self, page_number: usize, page_name: Option<String>, lines: Vec<String>) {
        match self.layout.marker(page_number, page_name.as_deref()) {
            Some(marker) => {
                if !self.pages.is_empty() {
                    self.content.push('\n');
                }
                self.content.push_str(&marker);
                self.content.push('\n');
                for line in &lines {
                    self.content.push_str(line);
                    self.content.push('\n');
                }
            }
            None => {
                if !self.content.is_empty() && !lines.is_empty() {
                    self.content.push('\n');
                }
                self.content.push_str(&lines.join("\n"));
            }
        }

        self.total_lines += lines.len();
        self.pages
            .push(PageContent::new(page_number, page_name, lines));
    }

    /// Number of pages recorded so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Finish assembly.
    pub fn finish(self, metadata: Metadata) -> DocumentResult {
        DocumentResult {
            file_path: None,
            pages: self.pages,
            total_pages: self.total_pages,
            total_lines: self.total_lines,
            content: self.content,
            metadata,
        }
    }
}
