use zipper_compress::{chunk_text, ChunkConfig, CompressionRequest, WhitespaceTokenizer};
use zipper_core::Document;

use crate::helpers::{make_compressor, make_config, words, WordGenerator};

#[tokio::test]
async fn oversized_paragraph_is_summarized_whole() {
    let big = words("big", 500);
    let text = format!("{}\n\n{}\n\n{}", words("intro", 20), big, words("outro", 20));

    let generator = WordGenerator::new(50);
    let result = make_compressor(generator.clone(), make_config(250, 8))
        .compress(&Document::new("thesis.txt", text), &CompressionRequest::new(150))
        .await
        .unwrap();

    let chunks = generator.chunks.lock().unwrap();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks.iter().filter(|c| **c == big).count(), 1);
    assert!(chunks.iter().all(|c| c == &big || !c.contains("big0")));
    assert_eq!(result.depth, 1);
    assert_eq!(result.token_count, 150);
}

#[test]
fn oversized_paragraph_is_flagged_by_the_chunker() {
    let big = words("big", 500);
    let text = format!("{}\n{}", words("a", 10), big);
    let chunks = chunk_text(&text, &ChunkConfig::new(250), &WhitespaceTokenizer);

    let flagged: Vec<_> = chunks.iter().filter(|c| c.oversized).collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].token_count, 500);
    assert_eq!(flagged[0].text, big);
}
