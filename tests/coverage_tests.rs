#![allow(clippy::needless_range_loop)]
//! Coverage, overlap and cross-strategy tests.
//!
//! These tests run every strategy over the same handbook-style document and
//! check that chunks cover the text, overlap as configured, and carry the
//! metadata the vector index expects.

use chunklab::{
    from_fn, Chunker, Element, ElementKind, Error, FixedChunker, HeaderChunker, RecursiveChunker,
    SectionChunker, Segmenter, SemanticChunker, SentenceChunker, Slab, TokenChunker,
    WordTokenizer, SECTION_KEY,
};

const HANDBOOK: &str = "\
# Leave Policy
Employees are entitled to 20 days of paid annual leave per year. Unused leave \
can be carried forward up to a maximum of 5 days.

## Sick Leave
Sick leave of up to 10 days is available. A medical certificate is required \
for absences longer than 2 days.

# Remote Work
Employees may work remotely up to 3 days per week with manager approval. \
Company laptops must be used for all remote work.
";

// =============================================================================
// Coverage: Chunks should cover the entire input
// =============================================================================

/// Every byte of `text` is inside some chunk.
fn covers_every_byte(slabs: &[Slab], text: &str) -> bool {
    let mut covered = vec![false; text.len()];
    for slab in slabs {
        for i in slab.start..slab.end {
            covered[i] = true;
        }
    }
    covered.iter().all(|&c| c)
}

/// Every non-whitespace character of `text` is inside some chunk.
fn covers_content(slabs: &[Slab], text: &str) -> bool {
    text.char_indices()
        .filter(|(_, c)| !c.is_whitespace())
        .all(|(i, _)| slabs.iter().any(|s| s.start <= i && i < s.end))
}

#[test]
fn fixed_chunker_full_coverage() {
    let texts = [
        "Hello, world!",
        "The quick brown fox jumps over the lazy dog.",
        &"A".repeat(1000),
        "Short",
        " Leading and trailing spaces ",
        "Multiple\n\nParagraphs\n\nHere",
        HANDBOOK,
    ];

    for text in &texts {
        let slabs = FixedChunker::new(50, 10).chunk(text);
        assert!(
            covers_every_byte(&slabs, text),
            "Fixed chunker failed coverage for: {:?}",
            &text[..text.len().min(50)]
        );
    }
}

#[test]
fn content_strategies_cover_all_content() {
    let strategies: Vec<(&str, Box<dyn Chunker>)> = vec![
        ("recursive", Box::new(RecursiveChunker::prose(80))),
        ("recursive-overlap", Box::new(RecursiveChunker::default())),
        ("markdown", Box::new(RecursiveChunker::markdown(120))),
        ("sentence", Box::new(SentenceChunker::new(2))),
        ("token", Box::new(TokenChunker::new(WordTokenizer, 12, 3))),
    ];

    for (name, chunker) in &strategies {
        let slabs = chunker.chunk(HANDBOOK);
        assert!(!slabs.is_empty(), "{name} produced nothing");
        assert!(covers_content(&slabs, HANDBOOK), "{name} dropped content");
        assert!(chunk_bounds_valid(&slabs, HANDBOOK), "{name} has bad bounds");
    }
}

#[test]
fn header_chunks_cover_everything_but_headings() {
    let slabs = HeaderChunker::default().chunk(HANDBOOK);

    assert_eq!(slabs.len(), 3);
    assert!(chunk_bounds_valid(&slabs, HANDBOOK));

    let body: String = slabs.iter().map(|s| s.text.as_str()).collect();
    assert!(!body.contains('#'));
    assert!(body.contains("20 days of paid annual leave"));
    assert!(body.contains("Company laptops"));

    assert_eq!(slabs[1].meta("h1"), Some("Leave Policy"));
    assert_eq!(slabs[1].meta("h2"), Some("Sick Leave"));
    assert_eq!(slabs[2].meta("h1"), Some("Remote Work"));
    assert_eq!(slabs[2].meta("h2"), None);
}

// =============================================================================
// Overlap
// =============================================================================

#[test]
fn fixed_chunker_overlap_property() {
    let text = "The quick brown fox jumps over the lazy dog. Pack my box.";

    for overlap in [0, 5, 10, 20] {
        let slabs = FixedChunker::new(30, overlap).chunk(text);

        for window in slabs.windows(2) {
            let (first, second) = (&window[0], &window[1]);
            // ASCII text: bytes are characters
            assert_eq!(
                first.end.saturating_sub(second.start),
                overlap,
                "chunks [{},{}] and [{},{}]",
                first.start,
                first.end,
                second.start,
                second.end
            );
        }
    }
}

#[test]
fn fixed_chunker_no_overlap_means_contiguous() {
    let slabs = FixedChunker::new(5, 0).chunk("ABCDEFGHIJKLMNOPQRSTUVWXYZ");

    for window in slabs.windows(2) {
        assert_eq!(window[0].end, window[1].start);
    }
}

#[test]
fn recursive_overlap_repeats_trailing_words() {
    let text = "one two three four five six seven eight nine ten";
    let slabs = RecursiveChunker::new(20, &[" "]).with_overlap(8).chunk(text);

    assert!(slabs.len() > 1);
    for window in slabs.windows(2) {
        assert!(window[1].start < window[0].end, "no overlap: {window:?}");
        let last_word = window[0].text.split(' ').next_back().unwrap();
        assert!(window[1].text.starts_with(last_word));
    }
}

#[test]
fn token_overlap_shares_tokens() {
    let text = "a b c d e f g h i j";
    let slabs = TokenChunker::new(WordTokenizer, 4, 2).chunk(text);

    let texts: Vec<&str> = slabs.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, ["a b c d", "c d e f", "e f g h", "g h i j"]);
}

// =============================================================================
// Size bounds
// =============================================================================

#[test]
fn fixed_chunker_counts_characters() {
    let text = "é".repeat(100);

    for size in [7, 20, 50] {
        for slab in FixedChunker::new(size, 2).chunk(&text) {
            assert!(slab.text.chars().count() <= size);
            assert!(slab.text.len() <= size * 2);
        }
    }
}

#[test]
fn recursive_chunker_respects_size() {
    let text = "First paragraph with lots of words. More words here.\n\n\
                Second paragraph also has words. Even more words.\n\n\
                Third paragraph continues. And more sentences.";

    for size in [10, 50, 100, 200] {
        let slabs = RecursiveChunker::new(size, &["\n\n", ". ", " "]).chunk(text);
        for (i, slab) in slabs.iter().enumerate() {
            assert!(
                slab.text.chars().count() <= size,
                "Chunk {} size {} exceeds {} for text starting: {:?}",
                i,
                slab.text.len(),
                size,
                &slab.text[..slab.text.len().min(30)]
            );
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[test]
fn section_chunker_keeps_sections_apart() {
    let elements = vec![
        Element::new(ElementKind::Title, "Employee Handbook"),
        Element::new(ElementKind::NarrativeText, "This handbook applies to all staff."),
        Element::new(ElementKind::from_label("Section-header"), "Leave"),
        Element::new(ElementKind::NarrativeText, "Employees get 20 days per year."),
        Element::new(ElementKind::ListItem, "Carry forward up to 5 days."),
        Element::new(ElementKind::from_label("Header"), "Remote Work"),
        Element::new(ElementKind::NarrativeText, "Up to 3 days per week."),
    ];

    let slabs = SectionChunker::new(RecursiveChunker::prose(40)).chunk_elements(&elements);

    let sections: Vec<&str> = slabs.iter().filter_map(|s| s.meta(SECTION_KEY)).collect();
    assert_eq!(sections.len(), slabs.len());
    assert_eq!(sections.first(), Some(&"Employee Handbook"));
    assert_eq!(sections.last(), Some(&"Remote Work"));
    assert!(slabs
        .iter()
        .any(|s| s.meta(SECTION_KEY) == Some("Leave") && s.text == "Employees get 20 days per year."));
}

// =============================================================================
// Semantic
// =============================================================================

/// Embeds by keyword: leave, remote, anything else.
fn keyword_embedding(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    if lower.contains("leave") || lower.contains("certificate") {
        vec![1.0, 0.0, 0.1]
    } else if lower.contains("remote") || lower.contains("laptop") {
        vec![0.0, 1.0, 0.1]
    } else {
        vec![0.5, 0.5, 1.0]
    }
}

#[test]
fn semantic_chunker_splits_handbook_by_topic() {
    let text = "Employees get 20 days of leave. Unused leave carries over. \
                Sick leave needs a certificate. Remote work is allowed. \
                Laptops are provided for remote work.";
    let chunker = SemanticChunker::new(from_fn(|t: &str| Ok::<_, String>(keyword_embedding(t))));

    let slabs = chunker.try_chunk(text).unwrap();

    assert_eq!(slabs.len(), 2);
    assert!(slabs[0].text.ends_with("certificate."));
    assert!(slabs[1].text.starts_with("Remote work"));
    assert!(covers_content(&slabs, text));
    for (i, slab) in slabs.iter().enumerate() {
        assert_eq!(slab.index, i);
        assert_eq!(&text[slab.span()], slab.text);
    }
}

#[test]
fn semantic_chunker_surfaces_backend_errors() {
    #[derive(Debug)]
    struct Offline;

    impl std::fmt::Display for Offline {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("embedding service offline")
        }
    }

    impl std::error::Error for Offline {}

    let chunker = SemanticChunker::new(from_fn(|_: &str| Err::<Vec<f32>, _>(Offline)));

    match chunker.try_chunk("One sentence. Two sentences.") {
        Err(Error::Embedding(source)) => {
            assert!(source.downcast_ref::<Offline>().is_some());
            assert_eq!(source.to_string(), "embedding service offline");
        }
        other => panic!("expected embedding error, got {other:?}"),
    }

    // A single sentence never reaches the backend.
    let slabs = chunker.try_chunk("Only one sentence.").unwrap();
    assert_eq!(slabs.len(), 1);
}

#[test]
fn segmenter_custom_separator_over_header_chunks() {
    let units: Vec<String> = HeaderChunker::default()
        .chunk(HANDBOOK)
        .into_iter()
        .map(|s| s.text)
        .collect();
    let embedder = from_fn(|t: &str| Ok::<_, String>(keyword_embedding(t)));

    let segments = Segmenter::new()
        .with_percentile(50.0)
        .with_separator("\n\n")
        .segment(&units, &embedder)
        .unwrap();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].units, 0..2);
    assert_eq!(segments[0].text, format!("{}\n\n{}", units[0], units[1]));
}

// =============================================================================
// Edge cases
// =============================================================================

#[test]
fn chunker_handles_only_whitespace() {
    let text = "   \n\n\t\t  ";

    let slabs = FixedChunker::new(50, 10).chunk(text);
    assert!(chunk_bounds_valid(&slabs, text));

    assert!(RecursiveChunker::new(100, &["\n\n", " "]).chunk(text).is_empty());
    assert!(SentenceChunker::default().chunk(text).is_empty());
    assert!(TokenChunker::new(WordTokenizer, 5, 0).chunk(text).is_empty());
    assert!(HeaderChunker::default().chunk(text).is_empty());
}

#[test]
fn chunker_handles_newlines() {
    let text = "Line 1\nLine 2\nLine 3";
    let slabs = RecursiveChunker::new(7, &["\n"]).chunk(text);

    let texts: Vec<&str> = slabs.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, ["Line 1", "Line 2", "Line 3"]);
    assert!(chunk_bounds_valid(&slabs, text));
}

#[test]
fn chunker_handles_size_equals_text_length() {
    let text = "Exactly fifty characters in this string, not more.";

    let slabs = FixedChunker::new(text.len(), 0).chunk(text);

    assert_eq!(slabs.len(), 1);
    assert_eq!(slabs[0].text, text);
}

#[test]
fn invalid_configuration_is_reported() {
    assert!(matches!(FixedChunker::try_new(0, 0), Err(Error::InvalidChunkSize(0))));
    assert!(matches!(
        FixedChunker::try_new(10, 10),
        Err(Error::OverlapExceedsSize { size: 10, overlap: 10 })
    ));
    assert!(matches!(
        TokenChunker::try_new(WordTokenizer, 4, 9),
        Err(Error::OverlapExceedsSize { .. })
    ));

    let embedder = from_fn(|_: &str| Ok::<_, String>(vec![1.0]));
    let err = Segmenter::new()
        .with_percentile(101.0)
        .segment(&["a", "b"], &embedder)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

// =============================================================================
// Helpers
// =============================================================================

fn chunk_bounds_valid(slabs: &[Slab], text: &str) -> bool {
    slabs.iter().all(|slab| {
        slab.start <= slab.end && slab.end <= text.len() && text[slab.span()] == slab.text
    })
}
