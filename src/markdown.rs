//! Markdown header-based chunking.
//!
//! Splits a Markdown document at its headings and records, for every chunk,
//! the headings it sits under:
//!
//! ```text
//! # Leave Policy                 -> h1 = "Leave Policy"
//! Intro text.                    chunk 0 {h1}
//! ## Annual Leave                -> h2 = "Annual Leave"
//! 20 days per year.              chunk 1 {h1, h2}
//! ## Sick Leave                  -> h2 replaced
//! Certificate after 2 days.      chunk 2 {h1, h2 = "Sick Leave"}
//! # Remote Work                  -> h1 replaced, h2 cleared
//! ```
//!
//! The header metadata travels with each chunk into the vector index, so a
//! retrieved chunk still knows which section it came from.
//!
//! Lines inside fenced code blocks (```` ``` ```` or `~~~`) are never
//! treated as headings, so a `# comment` in a shell snippet stays content.

use tracing::debug;

use crate::slab::{trimmed_slab, Metadata};
use crate::{Chunker, Slab};

/// Splits Markdown on configured heading markers.
///
/// ## Example
///
/// ```rust
/// use chunklab::{Chunker, HeaderChunker};
///
/// let chunker = HeaderChunker::default();
/// let text = "# Policy\nIntro.\n## Leave\n20 days.";
/// let slabs = chunker.chunk(text);
///
/// assert_eq!(slabs.len(), 2);
/// assert_eq!(slabs[1].text, "20 days.");
/// assert_eq!(slabs[1].meta("h1"), Some("Policy"));
/// assert_eq!(slabs[1].meta("h2"), Some("Leave"));
/// ```
#[derive(Debug, Clone)]
pub struct HeaderChunker {
    /// (marker, metadata key), longest marker first.
    headers: Vec<(String, String)>,
    keep_headers: bool,
}

#[derive(Debug)]
struct ActiveHeader {
    level: usize,
    key: String,
    title: String,
}

impl HeaderChunker {
    /// Create a chunker splitting on the given `(marker, metadata key)`
    /// pairs, e.g. `("##", "h2")`.
    ///
    /// # Panics
    ///
    /// Panics if `headers` is empty or a marker is empty.
    #[must_use]
    pub fn new(headers: &[(&str, &str)]) -> Self {
        assert!(!headers.is_empty(), "headers must not be empty");
        assert!(
            headers.iter().all(|(marker, _)| !marker.is_empty()),
            "header markers must not be empty"
        );

        let mut headers: Vec<(String, String)> = headers
            .iter()
            .map(|&(m, k)| (m.to_string(), k.to_string()))
            .collect();
        headers.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self {
            headers,
            keep_headers: false,
        }
    }

    /// Keep the heading line at the top of its chunk instead of stripping it.
    #[must_use]
    pub fn keep_headers(mut self, keep: bool) -> Self {
        self.keep_headers = keep;
        self
    }

    /// Match a heading line, returning its level, metadata key and title.
    fn match_header<'a>(&'a self, line: &'a str) -> Option<(usize, &'a str, &'a str)> {
        self.headers.iter().find_map(|(marker, key)| {
            let rest = line.strip_prefix(marker.as_str())?;
            if rest.is_empty() || rest.starts_with(' ') {
                Some((marker.chars().count(), key.as_str(), rest.trim()))
            } else {
                None
            }
        })
    }
}

impl Default for HeaderChunker {
    /// Split on `#`, `##` and `###` as `h1`, `h2`, `h3`.
    fn default() -> Self {
        Self::new(&[("#", "h1"), ("##", "h2"), ("###", "h3")])
    }
}

fn metadata_of(stack: &[ActiveHeader]) -> Metadata {
    stack
        .iter()
        .map(|h| (h.key.clone(), h.title.clone()))
        .collect()
}

impl Chunker for HeaderChunker {
    fn chunk(&self, text: &str) -> Vec<Slab> {
        let mut slabs = Vec::new();
        let mut stack: Vec<ActiveHeader> = Vec::new();
        let mut fence: Option<&str> = None;
        let mut section_start = 0;
        let mut offset = 0;

        for line in text.split_inclusive('\n') {
            let line_start = offset;
            offset += line.len();
            let stripped = line.trim();

            if let Some(open) = fence {
                if stripped.starts_with(open) {
                    fence = None;
                }
                continue;
            }
            if let Some(marker) = ["```", "~~~"].into_iter().find(|m| stripped.starts_with(m)) {
                fence = Some(marker);
                continue;
            }

            let Some((level, key, title)) = self.match_header(stripped) else {
                continue;
            };

            if let Some(slab) = trimmed_slab(text, section_start, line_start, slabs.len()) {
                slabs.push(slab.with_metadata(metadata_of(&stack)));
            }

            while stack.last().is_some_and(|h| h.level >= level) {
                stack.pop();
            }
            stack.push(ActiveHeader {
                level,
                key: key.to_string(),
                title: title.to_string(),
            });

            section_start = if self.keep_headers { line_start } else { offset };
        }

        if let Some(slab) = trimmed_slab(text, section_start, text.len(), slabs.len()) {
            slabs.push(slab.with_metadata(metadata_of(&stack)));
        }

        debug!(chunks = slabs.len(), "header chunking done");
        slabs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Leave Policy
Intro text.

## Annual Leave
20 days per year.
Carry forward up to 5 days.

## Sick Leave
Certificate after 2 days.

# Remote Work
### Equipment
Laptop provided.
";

    #[test]
    fn test_header_metadata_stack() {
        let slabs = HeaderChunker::default().chunk(DOC);

        assert_eq!(slabs.len(), 4);

        assert_eq!(slabs[0].text, "Intro text.");
        assert_eq!(slabs[0].meta("h1"), Some("Leave Policy"));
        assert_eq!(slabs[0].meta("h2"), None);

        assert_eq!(slabs[1].text, "20 days per year.\nCarry forward up to 5 days.");
        assert_eq!(slabs[1].meta("h2"), Some("Annual Leave"));

        assert_eq!(slabs[2].meta("h2"), Some("Sick Leave"));

        assert_eq!(slabs[3].text, "Laptop provided.");
        assert_eq!(slabs[3].meta("h1"), Some("Remote Work"));
        assert_eq!(slabs[3].meta("h2"), None);
        assert_eq!(slabs[3].meta("h3"), Some("Equipment"));
    }

    #[test]
    fn test_offsets_are_source_slices() {
        let slabs = HeaderChunker::default().chunk(DOC);
        for (i, slab) in slabs.iter().enumerate() {
            assert_eq!(slab.index, i);
            assert_eq!(&DOC[slab.span()], slab.text);
        }
    }

    #[test]
    fn test_keep_headers() {
        let slabs = HeaderChunker::default()
            .keep_headers(true)
            .chunk("# A\none\n## B\ntwo");

        assert_eq!(slabs[0].text, "# A\none");
        assert_eq!(slabs[1].text, "## B\ntwo");
        assert_eq!(slabs[1].meta("h1"), Some("A"));
    }

    #[test]
    fn test_preamble_has_no_metadata() {
        let slabs = HeaderChunker::default().chunk("Preamble.\n# Title\nBody.");
        assert_eq!(slabs[0].text, "Preamble.");
        assert!(slabs[0].metadata.is_empty());
        assert_eq!(slabs[1].meta("h1"), Some("Title"));
    }

    #[test]
    fn test_code_fence_hides_headers() {
        let text = "# Setup\n```sh\n# install deps\nmake\n```\nDone.";
        let slabs = HeaderChunker::default().chunk(text);

        assert_eq!(slabs.len(), 1);
        assert!(slabs[0].text.contains("# install deps"));
    }

    #[test]
    fn test_marker_needs_space() {
        let slabs = HeaderChunker::default().chunk("#hashtag is not a header");
        assert_eq!(slabs.len(), 1);
        assert!(slabs[0].metadata.is_empty());
    }

    #[test]
    fn test_unconfigured_level_is_content() {
        let chunker = HeaderChunker::new(&[("#", "h1")]);
        let slabs = chunker.chunk("# Top\n## Not split\nBody.");

        assert_eq!(slabs.len(), 1);
        assert_eq!(slabs[0].text, "## Not split\nBody.");
    }

    #[test]
    fn test_empty_text() {
        assert!(HeaderChunker::default().chunk("").is_empty());
        assert!(HeaderChunker::default().chunk("# Only a title").is_empty());
    }
}
