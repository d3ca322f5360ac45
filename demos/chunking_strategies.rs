//! Chunking Strategies Comparison
//!
//! Runs every structural strategy over the same Markdown handbook and prints
//! what each one produces.
//!
//! ```bash
//! cargo run --example chunking_strategies
//! ```

use chunklab::{
    Chunker, Element, ElementKind, FixedChunker, HeaderChunker, RecursiveChunker,
    SectionChunker, SentenceChunker, Slab, TokenChunker, WordTokenizer, SECTION_KEY,
};

const HANDBOOK: &str = "\
# Leave Policy
Employees are entitled to 20 days of paid leave per year.
Unused leave can be carried forward up to 5 days.

## Sick Leave
Sick leave requires a medical certificate if more than 2 consecutive days.

# Remote Work
Work from home is allowed up to 3 days a week with manager approval.
Employees must be available during core hours from 10 AM to 4 PM.
VPN access is mandatory while working remotely.

# Code of Conduct
All employees must follow the company code of conduct.
Harassment of any kind will result in immediate termination.
Confidential data must not be shared outside the organization.
";

fn print_chunks(chunks: &[Slab]) {
    println!("   Chunks: {}", chunks.len());
    for chunk in chunks {
        let preview: String = chunk.text.chars().take(60).collect();
        let meta: Vec<String> = chunk
            .metadata
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        println!(
            "   [{}] bytes {}-{} {{{}}}: \"{}\"",
            chunk.index,
            chunk.start,
            chunk.end,
            meta.join(", "),
            preview.replace('\n', " ")
        );
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    println!("Text Chunking Strategies");
    println!("========================\n");
    println!("Document length: {} characters\n", HANDBOOK.chars().count());

    println!("1. Fixed-Size Chunking");
    println!("   Every N chars with M overlap. Ignores boundaries.\n");
    print_chunks(&FixedChunker::new(120, 20).chunk(HANDBOOK));

    println!("\n2. Recursive Chunking");
    println!("   Paragraph -> line -> word, merged back up to the limit.\n");
    print_chunks(&RecursiveChunker::default().chunk(HANDBOOK));

    println!("\n3. Markdown-Aware Recursive Chunking");
    println!("   Prefers heading boundaries before paragraphs.\n");
    print_chunks(&RecursiveChunker::markdown(200).chunk(HANDBOOK));

    println!("\n4. Header Chunking");
    println!("   One chunk per section, tagged with its headings.\n");
    print_chunks(&HeaderChunker::default().chunk(HANDBOOK));

    println!("\n5. Sentence Chunking");
    println!("   Groups N sentences (UAX #29 segmentation).\n");
    print_chunks(&SentenceChunker::new(2).chunk(HANDBOOK));

    println!("\n6. Token Chunking");
    println!("   Windows of N word tokens with overlap.\n");
    print_chunks(&TokenChunker::new(WordTokenizer, 30, 5).chunk(HANDBOOK));

    println!("\n7. Section Chunking");
    println!("   Extracted document elements grouped under their headings.\n");
    let elements: Vec<Element> = HANDBOOK
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.trim_start_matches('#') {
            title if title.len() < line.len() => Element::new(ElementKind::Title, title.trim()),
            body => Element::new(ElementKind::NarrativeText, body),
        })
        .collect();
    let slabs = SectionChunker::new(RecursiveChunker::prose(150)).chunk_elements(&elements);
    print_chunks(&slabs);

    let sections: std::collections::BTreeSet<&str> =
        slabs.iter().filter_map(|s| s.meta(SECTION_KEY)).collect();
    println!("\n   Sections: {sections:?}");

    println!("\nFor topic-aware chunking, see the `semantic_segmentation` example.");
}
