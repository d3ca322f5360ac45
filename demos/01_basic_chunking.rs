//! Basic Text Chunking
//!
//! The minimal example: chunk a policy document for embedding.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example 01_basic_chunking
//! ```

use chunklab::{Chunker, RecursiveChunker};

fn main() {
    tracing_subscriber::fmt::init();

    let document = "\
Employees are entitled to 20 days of paid leave per year.
Unused leave can be carried forward up to 5 days.
Sick leave requires a medical certificate if more than 2 consecutive days.

Work from home is allowed up to 3 days a week with manager approval.
Employees must be available during core hours from 10 AM to 4 PM.
VPN access is mandatory while working remotely.

All employees must follow the company code of conduct.
Harassment of any kind will result in immediate termination.
Confidential data must not be shared outside the organization.
";

    // Paragraphs first, then lines, then words
    let chunker = RecursiveChunker::prose(200).with_overlap(40);
    let chunks = chunker.chunk(document);

    println!("Document: {} chars", document.chars().count());
    println!("Chunks: {}\n", chunks.len());

    for chunk in &chunks {
        println!("[{}] bytes {}-{}: \"{}\"", chunk.index, chunk.start, chunk.end, chunk.text);
    }
}
