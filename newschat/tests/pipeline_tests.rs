//! End-to-end pipeline tests with fake capability implementations.
//!
//! The embedder, index, and completion model are all fakes, so these tests
//! exercise the orchestration contract without network or disk.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use newschat::{
    ChatError, ChatPipeline, CompletionModel, Document, Embedder, RetrieverConfig, ScoredDocument,
    VectorIndex,
};

/// Deterministic hash-based embedder.
struct MockEmbedder {
    dimensions: usize,
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> newschat::Result<Vec<f32>> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        Ok((0..self.dimensions).map(|i| ((hash.wrapping_add(i as u64)) as f32).sin()).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Returns a canned result set and records the requested `top_k`.
struct FakeIndex {
    results: Vec<ScoredDocument>,
    requested_top_k: Mutex<Option<usize>>,
}

impl FakeIndex {
    fn with_documents(docs: Vec<Document>) -> Self {
        let results = docs
            .into_iter()
            .enumerate()
            .map(|(i, document)| ScoredDocument { document, score: 1.0 - i as f32 * 0.1 })
            .collect();
        Self { results, requested_top_k: Mutex::new(None) }
    }

    fn empty() -> Self {
        Self { results: Vec::new(), requested_top_k: Mutex::new(None) }
    }
}

#[async_trait]
impl VectorIndex for FakeIndex {
    async fn query(&self, _embedding: &[f32], top_k: usize) -> newschat::Result<Vec<ScoredDocument>> {
        *self.requested_top_k.lock().unwrap() = Some(top_k);
        Ok(self.results.clone())
    }
}

/// Records the prompt it was called with and returns a canned answer.
struct RecordingCompletion {
    answer: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingCompletion {
    fn new(answer: &str) -> Self {
        Self { answer: answer.to_string(), prompts: Mutex::new(Vec::new()) }
    }

    fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for RecordingCompletion {
    fn name(&self) -> &str {
        "fake-model"
    }

    async fn complete(&self, prompt: &str) -> newschat::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

fn build_pipeline(
    index: Arc<FakeIndex>,
    completion: Arc<RecordingCompletion>,
) -> ChatPipeline {
    ChatPipeline::builder()
        .embedder(Arc::new(MockEmbedder { dimensions: 16 }))
        .index(index)
        .completion(completion)
        .build()
        .unwrap()
}

fn election_documents() -> Vec<Document> {
    vec![
        Document::new("The incumbent conceded late on Tuesday.", "election_day.txt"),
        Document::new("Turnout reached a record 71 percent.", "turnout.txt"),
        Document::new("Recounts were requested in two districts.", "recounts.txt"),
    ]
}

#[tokio::test]
async fn prompt_contains_all_documents_and_the_question() {
    let index = Arc::new(FakeIndex::with_documents(election_documents()));
    let completion = Arc::new(RecordingCompletion::new("Answer: the incumbent conceded."));
    let pipeline = build_pipeline(index, Arc::clone(&completion));

    pipeline.ask("What happened in the election?").await.unwrap();

    let prompts = completion.recorded_prompts();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];

    assert!(prompt.contains("The incumbent conceded late on Tuesday."));
    assert!(prompt.contains("Turnout reached a record 71 percent."));
    assert!(prompt.contains("Recounts were requested in two districts."));
    assert!(prompt.contains("[Source: election_day.txt]"));
    assert!(prompt.contains("[Source: turnout.txt]"));
    assert!(prompt.contains("[Source: recounts.txt]"));
    assert!(prompt.contains("What happened in the election?"));
    // Template wrapper around the substituted content.
    assert!(prompt.contains("ONLY the news articles below"));
    assert!(prompt.contains("Not mentioned in the articles"));
}

#[tokio::test]
async fn answer_is_returned_unmodified() {
    let index = Arc::new(FakeIndex::with_documents(election_documents()));
    let completion = Arc::new(RecordingCompletion::new("Answer: verbatim.\nSources: a.txt"));
    let pipeline = build_pipeline(index, Arc::clone(&completion));

    let answer = pipeline.ask("anything").await.unwrap();
    assert_eq!(answer, "Answer: verbatim.\nSources: a.txt");
}

#[tokio::test]
async fn zero_retrieved_documents_still_invoke_completion() {
    let index = Arc::new(FakeIndex::empty());
    let completion = Arc::new(RecordingCompletion::new("Not mentioned in the articles"));
    let pipeline = build_pipeline(index, Arc::clone(&completion));

    pipeline.ask("unanswerable question").await.unwrap();

    let prompts = completion.recorded_prompts();
    assert_eq!(prompts.len(), 1);
    // Empty context renders; no source tags appear.
    assert!(!prompts[0].contains("[Source:"));
    assert!(prompts[0].contains("unanswerable question"));
}

#[tokio::test]
async fn empty_question_is_rejected_before_any_provider_call() {
    let index = Arc::new(FakeIndex::with_documents(election_documents()));
    let completion = Arc::new(RecordingCompletion::new("unused"));
    let pipeline = build_pipeline(Arc::clone(&index), Arc::clone(&completion));

    let err = pipeline.ask("   \t ").await.unwrap_err();
    assert!(matches!(err, ChatError::InvalidQuestion));
    assert!(completion.recorded_prompts().is_empty());
    assert!(index.requested_top_k.lock().unwrap().is_none());
}

#[tokio::test]
async fn retriever_config_top_k_reaches_the_index() {
    let index = Arc::new(FakeIndex::with_documents(election_documents()));
    let completion = Arc::new(RecordingCompletion::new("ok"));
    let pipeline = ChatPipeline::builder()
        .embedder(Arc::new(MockEmbedder { dimensions: 16 }))
        .index(Arc::clone(&index) as Arc<dyn VectorIndex>)
        .completion(completion)
        .config(RetrieverConfig::builder().top_k(7).build().unwrap())
        .build()
        .unwrap();

    pipeline.ask("question").await.unwrap();
    assert_eq!(*index.requested_top_k.lock().unwrap(), Some(7));
}

#[tokio::test]
async fn default_config_asks_for_three_results() {
    let index = Arc::new(FakeIndex::empty());
    let completion = Arc::new(RecordingCompletion::new("ok"));
    let pipeline = build_pipeline(Arc::clone(&index), completion);

    pipeline.ask("question").await.unwrap();
    assert_eq!(*index.requested_top_k.lock().unwrap(), Some(3));
}

#[tokio::test]
async fn replacing_the_template_rejects_malformed_text() {
    let index = Arc::new(FakeIndex::empty());
    let completion = Arc::new(RecordingCompletion::new("ok"));
    let mut pipeline = build_pipeline(index, Arc::clone(&completion));

    let err = pipeline.set_prompt_template("no slots").unwrap_err();
    assert!(matches!(err, ChatError::Template(_)));

    // A valid replacement takes effect on the next ask.
    pipeline.set_prompt_template("CTX={context} Q={question}").unwrap();
    pipeline.ask("still works").await.unwrap();
    assert!(completion.recorded_prompts()[0].starts_with("CTX="));
}

#[test]
fn builder_requires_all_capabilities() {
    let err = ChatPipeline::builder().build().unwrap_err();
    assert!(matches!(err, ChatError::Config(_)));
}
