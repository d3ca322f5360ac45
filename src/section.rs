//! Structure-aware chunking over extracted document elements.
//!
//! PDF and office-document extractors (run outside this crate) emit a flat
//! stream of typed elements: titles, headers, paragraphs, list items. This
//! module groups that stream into sections, one per heading, and then
//! splits each section with a [`RecursiveChunker`] so no chunk straddles two
//! sections.
//!
//! ```text
//! Elements:                          Sections:
//!   NarrativeText "Welcome..."         "Introduction": "Welcome..."
//!   Title         "Leave"      --->    "Leave":        "20 days...\nSick..."
//!   NarrativeText "20 days..."         "Conduct":      "Be nice."
//!   ListItem      "Sick..."
//!   Header        "Conduct"
//!   NarrativeText "Be nice."
//! ```
//!
//! Every resulting slab carries a `section` metadata entry.

use tracing::debug;

use crate::{Chunker, RecursiveChunker, Slab};

/// Metadata key holding the section title.
pub const SECTION_KEY: &str = "section";

/// Category of an extracted document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Document or section title.
    Title,
    /// Generic header.
    Header,
    /// Numbered or styled section heading.
    SectionHeader,
    /// Headline (news-style heading).
    Headline,
    /// Body paragraph.
    NarrativeText,
    /// Bullet or numbered list entry.
    ListItem,
    /// Anything else (tables, captions, footers, ...).
    Other,
}

impl ElementKind {
    /// Whether this element starts a new section.
    pub fn is_heading(self) -> bool {
        matches!(
            self,
            Self::Title | Self::Header | Self::SectionHeader | Self::Headline
        )
    }

    /// Parse an extractor category label such as `"Title"` or
    /// `"Section-header"`. Unknown labels map to [`ElementKind::Other`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "Title" => Self::Title,
            "Header" => Self::Header,
            "Section-header" | "SectionHeader" => Self::SectionHeader,
            "Headline" => Self::Headline,
            "NarrativeText" => Self::NarrativeText,
            "ListItem" => Self::ListItem,
            _ => Self::Other,
        }
    }
}

/// One element of an extracted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element category.
    pub kind: ElementKind,
    /// Element text.
    pub text: String,
}

impl Element {
    /// Create an element.
    pub fn new(kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// A titled run of body elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section title (the trimmed heading text).
    pub title: String,
    /// Body element texts joined by newlines.
    pub text: String,
}

/// Groups elements into sections and splits each section.
///
/// ## Example
///
/// ```rust
/// use chunklab::{Element, ElementKind, RecursiveChunker, SectionChunker};
///
/// let elements = vec![
///     Element::new(ElementKind::NarrativeText, "Welcome to the handbook."),
///     Element::new(ElementKind::Title, "Leave"),
///     Element::new(ElementKind::NarrativeText, "Employees get 20 days."),
/// ];
///
/// let chunker = SectionChunker::new(RecursiveChunker::prose(200));
/// let slabs = chunker.chunk_elements(&elements);
///
/// assert_eq!(slabs.len(), 2);
/// assert_eq!(slabs[0].meta("section"), Some("Introduction"));
/// assert_eq!(slabs[1].meta("section"), Some("Leave"));
/// ```
#[derive(Debug, Clone)]
pub struct SectionChunker {
    splitter: RecursiveChunker,
    initial_section: String,
}

impl SectionChunker {
    /// Create a section chunker that sub-splits with `splitter`.
    #[must_use]
    pub fn new(splitter: RecursiveChunker) -> Self {
        Self {
            splitter,
            initial_section: "Introduction".to_string(),
        }
    }

    /// Name used for body elements that precede the first heading.
    #[must_use]
    pub fn with_initial_section(mut self, name: impl Into<String>) -> Self {
        self.initial_section = name.into();
        self
    }

    /// Group elements into sections.
    ///
    /// A heading closes the current section (if it has any body) and names
    /// the next one. Consecutive headings therefore leave only the last
    /// one as a title.
    pub fn sections(&self, elements: &[Element]) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut title = self.initial_section.clone();
        let mut buffer: Vec<&str> = Vec::new();

        for element in elements {
            if element.kind.is_heading() {
                if !buffer.is_empty() {
                    sections.push(Section {
                        title: title.clone(),
                        text: buffer.join("\n"),
                    });
                    buffer.clear();
                }
                title = element.text.trim().to_string();
            } else {
                buffer.push(&element.text);
            }
        }

        if !buffer.is_empty() {
            sections.push(Section {
                title,
                text: buffer.join("\n"),
            });
        }

        sections
    }

    /// Group elements into sections and split each one.
    ///
    /// Slab offsets refer to the section's own text; indices run across all
    /// sections.
    pub fn chunk_elements(&self, elements: &[Element]) -> Vec<Slab> {
        let sections = self.sections(elements);
        let mut slabs = Vec::new();

        for section in &sections {
            for mut slab in self.splitter.chunk(&section.text) {
                slab.index = slabs.len();
                slabs.push(slab.with_meta(SECTION_KEY, section.title.as_str()));
            }
        }

        debug!(
            elements = elements.len(),
            sections = sections.len(),
            chunks = slabs.len(),
            "section chunking done"
        );
        slabs
    }
}

impl Default for SectionChunker {
    fn default() -> Self {
        Self::new(RecursiveChunker::default())
    }
}
