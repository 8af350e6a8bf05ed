use zipper_compress::{CompressionRequest, ZipError};
use zipper_core::Document;

use crate::helpers::{make_compressor, make_config, words, WordGenerator};

#[tokio::test]
async fn never_shrinking_summaries_stop_at_max_depth() {
    for max_depth in 1..=5 {
        // Each 300-word reply is bigger than the 200-token chunk it replaces.
        let generator = WordGenerator::new(300);
        let doc = Document::new("loop.txt", words("w", 200));
        let err = make_compressor(generator.clone(), make_config(250, max_depth))
            .compress(&doc, &CompressionRequest::new(100))
            .await
            .unwrap_err();

        match err {
            ZipError::CompressionDidNotConverge { depth, target, .. } => {
                assert_eq!(depth, max_depth);
                assert_eq!(target, 100);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(generator.call_count(), max_depth);
    }
}

#[tokio::test]
async fn pass_count_never_exceeds_max_depth_when_converging() {
    let generator = WordGenerator::new(10);
    let result = make_compressor(generator, make_config(250, 3))
        .compress(
            &Document::new("ok.txt", words("w", 2000)),
            &CompressionRequest::new(50),
        )
        .await
        .unwrap();
    assert!(result.depth <= 3);
    assert!(result.token_count <= 50);
}
