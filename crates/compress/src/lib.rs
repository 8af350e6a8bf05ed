//! Chunk-compress-recombine pipeline.
//!
//! Long documents are split into token-bounded chunks, each chunk is
//! summarized through a [`TextGenerator`](zipper_llm::TextGenerator), and the
//! partial summaries are stitched back together in order. The loop repeats
//! until the text fits the requested budget or the depth guard trips.

pub mod cancel;
pub mod chunker;
pub mod composer;
pub mod compressor;
pub mod document;
pub mod error;
pub mod progress;
pub mod request;
pub mod summarizer;
pub mod tokenizer;
pub mod verify;

pub use cancel::CancelToken;
pub use chunker::{chunk_text, Chunk, ChunkConfig};
pub use composer::{compose, summary_path, ComposedOutput};
pub use compressor::{Compressor, SummaryResult};
pub use document::load_document;
pub use error::ZipError;
pub use progress::{LogProgress, NoProgress, ProgressEvent, ProgressSink};
pub use request::CompressionRequest;
pub use summarizer::{Directive, Instruction, Summarizer};
pub use tokenizer::{BpeTokenizer, CharEstimateTokenizer, Token, Tokenizer, WhitespaceTokenizer};
pub use verify::{Verdict, Verifier};
