use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use slidegen::{ApiErrorKind, Result, SlidegenError, TextCompletionService};

/// Scripted completion service: hands out canned responses in order and
/// records every prompt it receives. Clones share the script and the
/// recorded prompts, so a test can keep one handle for assertions and give
/// another to the decoder.
#[derive(Clone)]
#[allow(dead_code)]
pub struct MockCompletionService {
    script: Arc<Mutex<VecDeque<Result<String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockCompletionService {
    pub fn new(script: Vec<Result<String>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every prompt received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextCompletionService for MockCompletionService {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(SlidegenError::api_error(
                ApiErrorKind::Unknown,
                "mock script exhausted",
            ))
        })
    }
}

/// A valid single-presentation deck completion with `slide_count` slides,
/// numbered 1.., the last one titled "Conclusion".
#[allow(dead_code)]
pub fn deck_json(title: &str, slide_count: u32) -> String {
    let slides: Vec<serde_json::Value> = (1..=slide_count)
        .map(|n| {
            let slide_title = if n == slide_count {
                "Conclusion".to_string()
            } else {
                format!("Part {}", n)
            };
            json!({
                "slideTitle": slide_title,
                "content": "First point. Second point. Third point.",
                "slideNumber": n
            })
        })
        .collect();

    json!([{ "title": title, "slides": slides }]).to_string()
}
