use std::sync::{Arc, Mutex};

use zipper_compress::{
    compose, load_document, CompressionRequest, ProgressEvent, ProgressSink, Tokenizer,
    WhitespaceTokenizer,
};
use zipper_core::config::CompressionConfig;
use zipper_core::Document;

use crate::helpers::{make_compressor, make_config, paragraphs, WordGenerator};

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[tokio::test]
async fn ten_paragraphs_converge_in_two_passes() {
    let text = paragraphs(&[100; 10]);
    assert_eq!(WhitespaceTokenizer.count(&text), 1000);

    let generator = WordGenerator::new(50);
    let compressor = make_compressor(generator.clone(), make_config(250, 8));
    let doc = Document::new("/tmp/paper.txt", text);

    let result = compressor
        .compress(&doc, &CompressionRequest::new(150))
        .await
        .unwrap();

    // Pass 1: two 100-token paragraphs per chunk -> 5 chunks -> 250 tokens.
    // Pass 2: five 50-token summaries fit one chunk -> 50 tokens.
    assert_eq!(result.chunks_per_depth, vec![5, 1]);
    assert_eq!(result.depth, 2);
    assert_eq!(result.token_count, 50);
    assert_eq!(result.source_tokens, 1000);
    assert!(!result.rewritten);
    assert_eq!(generator.call_count(), 6);

    // The second pass saw the first-pass summaries in chunk order.
    let chunks = generator.chunks.lock().unwrap();
    let second_pass = &chunks[5];
    let order: Vec<usize> = (0..5)
        .map(|i| second_pass.find(&format!("s{i}w0 ")).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));

    let out = compose(&doc, &result, None).unwrap();
    assert!(out.text.starts_with("# Summary of paper.txt"));
    assert!(out.text.contains(&result.text));
}

#[tokio::test]
async fn progress_events_follow_the_passes() {
    let sink = Arc::new(RecordingSink::default());
    let generator = WordGenerator::new(50);
    let compressor = make_compressor(generator, make_config(250, 8)).with_progress(sink.clone());

    compressor
        .compress(
            &Document::new("paper.txt", paragraphs(&[100; 10])),
            &CompressionRequest::new(150),
        )
        .await
        .unwrap();

    let events = sink.events.lock().unwrap();
    assert_eq!(
        events.first(),
        Some(&ProgressEvent::PassStarted {
            depth: 1,
            chunks: 5,
            tokens: 1000
        })
    );
    assert_eq!(
        events.last(),
        Some(&ProgressEvent::Converged {
            depth: 2,
            tokens: 50
        })
    );
    let finished = events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::ChunkFinished { .. }))
        .count();
    assert_eq!(finished, 6);
}

#[tokio::test]
async fn directives_reach_every_prompt() {
    let generator = WordGenerator::new(50);
    let compressor = make_compressor(generator.clone(), make_config(250, 8));
    let request = CompressionRequest {
        translate_to: Some("French".into()),
        preserve_authors: true,
        ..CompressionRequest::new(150)
    };

    compressor
        .compress(&Document::new("paper.txt", paragraphs(&[100; 10])), &request)
        .await
        .unwrap();

    let prompts = generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 6);
    for prompt in prompts.iter() {
        assert!(prompt.contains("French"));
        assert!(prompt.to_lowercase().contains("author"));
        assert!(!prompt.to_lowercase().contains("same language"));
    }
}

#[tokio::test]
async fn file_to_saved_summary() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("lecture.md");
    std::fs::write(&source, paragraphs(&[100; 4])).unwrap();
    let out_dir = dir.path().join("out");
    std::fs::create_dir(&out_dir).unwrap();

    let doc = load_document(&source).unwrap();
    let generator = WordGenerator::new(30);
    let result = make_compressor(generator, make_config(250, 8))
        .compress(&doc, &CompressionRequest::new(100))
        .await
        .unwrap();
    assert_eq!(result.chunks_per_depth, vec![2]);

    let out = compose(&doc, &result, Some(&out_dir)).unwrap();
    let saved = out.saved_to.unwrap();
    assert_eq!(saved, out_dir.join("lecture_summary.txt"));
    assert_eq!(std::fs::read_to_string(saved).unwrap(), result.text);
}

#[tokio::test]
async fn inflating_rewrite_never_exceeds_target() {
    let generator = WordGenerator::new(400);
    let config = CompressionConfig {
        final_rewrite: true,
        ..make_config(500, 4)
    };
    let doc = Document::new("/tmp/notes.txt", paragraphs(&[100]));

    let result = make_compressor(generator.clone(), config)
        .compress(&doc, &CompressionRequest::new(150))
        .await
        .unwrap();

    assert!(result.token_count <= 150);
    assert_eq!(result.token_count, 100);
    assert!(!result.rewritten);
    assert_eq!(result.depth, 0);
    assert_eq!(generator.call_count(), 1);
}
