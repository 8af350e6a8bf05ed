use super::helpers::{overlap_seed, split_sentences};
use super::*;
use crate::tokenizer::{CharEstimateTokenizer, Tokenizer, WhitespaceTokenizer};

fn words(prefix: &str, n: usize) -> String {
    (0..n).map(|i| format!("{prefix}{i}")).collect::<Vec<_>>().join(" ")
}

fn paragraphs(sizes: &[usize]) -> Vec<String> {
    sizes
        .iter()
        .enumerate()
        .map(|(p, &n)| words(&format!("p{p}w"), n))
        .collect()
}

fn no_overlap(max: usize) -> ChunkConfig {
    ChunkConfig::new(max).with_boundary_safe(false)
}

// ── Basics ──────────────────────────────────────────────────────────

#[test]
fn empty_text_produces_no_chunks() {
    assert!(chunk_text("", &ChunkConfig::new(100), &WhitespaceTokenizer).is_empty());
}

#[test]
fn whitespace_only_text_produces_no_chunks() {
    let chunks = chunk_text("   \n\n\t\n   ", &ChunkConfig::new(100), &WhitespaceTokenizer);
    assert!(chunks.is_empty());
}

#[test]
fn single_paragraph_produces_one_chunk() {
    let chunks = chunk_text("Just one paragraph.", &ChunkConfig::new(100), &WhitespaceTokenizer);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].index, 0);
    assert_eq!(chunks[0].token_count, 3);
    assert_eq!(chunks[0].overlap_token_count, 0);
    assert!(!chunks[0].oversized);
}

#[test]
fn chunk_indices_are_sequential() {
    let text = paragraphs(&[40, 40, 40, 40, 40]).join("\n");
    let chunks = chunk_text(&text, &no_overlap(90), &WhitespaceTokenizer);
    assert_eq!(chunks.len(), 3);
    for (i, c) in chunks.iter().enumerate() {
        assert_eq!(c.index, i);
    }
}

// ── Packing ─────────────────────────────────────────────────────────

#[test]
fn packs_paragraphs_greedily() {
    let text = paragraphs(&[100; 10]).join("\n");
    let chunks = chunk_text(&text, &no_overlap(250), &WhitespaceTokenizer);
    // Two 100-token paragraphs fit in 250; a third would not.
    assert_eq!(chunks.len(), 5);
    for c in &chunks {
        assert_eq!(c.token_count, 200);
        assert_eq!(c.text.lines().count(), 2);
    }
}

#[test]
fn blank_lines_are_not_units() {
    let text = "alpha beta\n\n\n\ngamma delta";
    let chunks = chunk_text(text, &no_overlap(100), &WhitespaceTokenizer);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "alpha beta\ngamma delta");
}

#[test]
fn chunk_size_bound_holds_for_regular_units() {
    let sizes = [13, 70, 5, 88, 41, 9, 60, 60, 3, 27, 99, 1, 45];
    let text = paragraphs(&sizes).join("\n");
    let tok = WhitespaceTokenizer;
    for overlap in [0, 7, 30] {
        let config = ChunkConfig::new(100).with_overlap(overlap);
        let chunks = chunk_text(&text, &config, &tok);
        for c in &chunks {
            assert!(!c.oversized);
            assert!(c.token_count <= 100, "chunk {} has {} tokens", c.index, c.token_count);
            assert_eq!(c.token_count, tok.count(&c.text));
        }
    }
}

#[test]
fn chunk_size_bound_holds_with_char_tokenizer() {
    let text = paragraphs(&[20, 35, 10, 50, 5, 44]).join("\n");
    let tok = CharEstimateTokenizer::default();
    let config = ChunkConfig::new(120).with_overlap(10);
    for c in chunk_text(&text, &config, &tok) {
        if !c.oversized {
            assert!(c.token_count <= 120);
        }
        assert_eq!(c.token_count, tok.count(&c.text));
    }
}

#[test]
fn chunking_loses_no_paragraphs() {
    let originals = paragraphs(&[30, 12, 75, 50, 8, 66, 21, 90, 4]);
    let text = originals.join("\n");
    let config = ChunkConfig::new(100).with_overlap(15).with_boundary_safe(false);
    let chunks = chunk_text(&text, &config, &WhitespaceTokenizer);

    let rebuilt: Vec<&str> = chunks.iter().flat_map(|c| c.body().lines()).collect();
    assert_eq!(rebuilt, originals.iter().map(String::as_str).collect::<Vec<_>>());
}

// ── Oversized units ─────────────────────────────────────────────────

#[test]
fn oversized_paragraph_kept_whole_in_one_chunk() {
    let big = words("big", 500);
    let text = format!("{}\n{}\n{}", words("a", 20), big, words("z", 20));
    let chunks = chunk_text(&text, &no_overlap(250), &WhitespaceTokenizer);

    assert_eq!(chunks.len(), 3);
    let holders: Vec<&Chunk> = chunks.iter().filter(|c| c.text.contains(&big)).collect();
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].text, big);
    assert_eq!(holders[0].token_count, 500);
    assert!(holders[0].oversized);
}

#[test]
fn oversized_paragraph_alone_is_untouched() {
    let big = words("w", 500);
    let chunks = chunk_text(&big, &no_overlap(250), &WhitespaceTokenizer);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, big);
    assert!(chunks[0].oversized);
}

#[test]
fn boundary_safe_splits_oversized_paragraph_into_sentences() {
    let sentences: Vec<String> = (0..3)
        .map(|s| format!("{}.", words(&format!("s{s}w"), 100)))
        .collect();
    let para = sentences.join(" ");
    let chunks = chunk_text(&para, &ChunkConfig::new(250), &WhitespaceTokenizer);

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].text, format!("{} {}", sentences[0], sentences[1]));
    assert_eq!(chunks[1].text, sentences[2]);
    assert!(chunks.iter().all(|c| !c.oversized && c.token_count <= 250));
}

#[test]
fn oversized_sentence_is_never_split() {
    let long_sentence = format!("{}.", words("x", 300));
    let text = format!("Short one. {long_sentence} Tail here.");
    let chunks = chunk_text(&text, &ChunkConfig::new(100), &WhitespaceTokenizer);

    let holders: Vec<&Chunk> = chunks.iter().filter(|c| c.oversized).collect();
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].text, long_sentence);
}

// ── Overlap ─────────────────────────────────────────────────────────

#[test]
fn overlap_seeds_next_chunk_with_previous_tail() {
    let text = "alpha bravo charlie delta echo\nfoxtrot golf hotel india juliet";
    let config = ChunkConfig::new(7).with_overlap(2);
    let chunks = chunk_text(text, &config, &WhitespaceTokenizer);

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[1].text, "delta echo\nfoxtrot golf hotel india juliet");
    assert_eq!(chunks[1].overlap_token_count, 2);
    assert_eq!(chunks[1].body(), "foxtrot golf hotel india juliet");
}

#[test]
fn overlap_shrinks_to_fit_budget() {
    let text = "alpha bravo charlie delta echo\nfoxtrot golf hotel india juliet";
    let config = ChunkConfig::new(7).with_overlap(4);
    let chunks = chunk_text(text, &config, &WhitespaceTokenizer);

    assert_eq!(chunks[1].overlap_token_count, 2);
    assert!(chunks[1].token_count <= 7);
}

#[test]
fn zero_overlap_produces_no_repeated_words() {
    let text = "Alpha bravo charlie.\nDelta echo foxtrot.";
    let chunks = chunk_text(text, &no_overlap(4), &WhitespaceTokenizer);
    assert_eq!(chunks.len(), 2);
    assert!(!chunks[1].text.contains("charlie"));
    assert_eq!(chunks[1].body(), chunks[1].text);
}

#[test]
fn oversized_chunk_gets_no_seed() {
    let big = words("big", 50);
    let text = format!("{}\n{}", words("a", 5), big);
    let config = ChunkConfig::new(10).with_overlap(3).with_boundary_safe(false);
    let chunks = chunk_text(&text, &config, &WhitespaceTokenizer);
    assert_eq!(chunks[1].text, big);
    assert_eq!(chunks[1].overlap_token_count, 0);
}

// ── Helpers ─────────────────────────────────────────────────────────

#[test]
fn sentence_splitting() {
    let sents = split_sentences("First sentence. Second one! Third? last bit");
    assert_eq!(sents, vec!["First sentence.", "Second one!", "Third?", "last bit"]);
}

#[test]
fn sentence_splitting_ignores_inner_punctuation() {
    let sents = split_sentences("Pi is 3.14 roughly. Really?! Yes.");
    assert_eq!(sents, vec!["Pi is 3.14 roughly.", "Really?!", "Yes."]);
}

#[test]
fn overlap_seed_takes_tail_tokens() {
    let tok = WhitespaceTokenizer;
    assert_eq!(overlap_seed("a b c d e", 3, 10, &tok), Some(("c d e".to_string(), 3)));
    assert_eq!(overlap_seed("a b", 5, 10, &tok), Some(("a b".to_string(), 2)));
    assert_eq!(overlap_seed("a b c", 3, 0, &tok), None);
    assert_eq!(overlap_seed("a b c", 0, 10, &tok), None);
}
