//! Semantic Segmentation
//!
//! Splits a policy document where adjacent sentences stop being similar.
//!
//! Without the `semantic` feature this uses a keyword embedder so it runs
//! offline; with it, a local fastembed model:
//!
//! ```bash
//! RUST_LOG=chunklab=trace cargo run --example semantic_segmentation
//! cargo run --example semantic_segmentation --features semantic
//! ```

use chunklab::{split_sentences, BoxError, Error, Segmenter, SemanticChunker};

const POLICY: &str = "\
Employees are entitled to 20 days of paid leave per year. \
Unused leave can be carried forward up to 5 days. \
Sick leave requires a medical certificate if more than 2 consecutive days. \
Work from home is allowed up to 3 days a week with manager approval. \
Employees must be available during core hours from 10 AM to 4 PM. \
VPN access is mandatory while working remotely. \
All employees must follow the company code of conduct. \
Harassment of any kind will result in immediate termination. \
Confidential data must not be shared outside the organization.";

#[cfg(not(feature = "semantic"))]
fn embedder() -> Result<impl chunklab::Embedder, Error> {
    const TOPICS: [&[&str]; 3] = [
        &["leave", "sick", "certificate"],
        &["home", "hours", "vpn", "remote"],
        &["conduct", "harassment", "confidential"],
    ];

    Ok(chunklab::from_fn(|text: &str| {
        let lower = text.to_lowercase();
        let mut v: Vec<f32> = TOPICS
            .iter()
            .map(|words| words.iter().filter(|w| lower.contains(*w)).count() as f32)
            .collect();
        v.push(0.1);
        Ok::<_, BoxError>(v)
    }))
}

#[cfg(feature = "semantic")]
fn embedder() -> Result<impl chunklab::Embedder, Error> {
    chunklab::FastEmbedder::new()
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let embedder = embedder()?;

    println!("Sentences: {}\n", split_sentences(POLICY).len());

    for percentile in [10.0, 30.0, 60.0] {
        let chunker = SemanticChunker::new(&embedder)
            .with_segmenter(Segmenter::new().with_percentile(percentile));
        let slabs = chunker.try_chunk(POLICY)?;

        println!("percentile {percentile}: {} chunks", slabs.len());
        for slab in &slabs {
            println!("  [{}] {}", slab.index, slab.text);
        }
        println!();
    }

    Ok(())
}
