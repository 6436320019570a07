//! Web search handler.
//!
//! Searches with the extracted query, then grounds the generator on the
//! fetched result summaries so the answer stays anchored to real data.

use std::sync::Arc;

use async_trait::async_trait;

use aria_core::{ConversationTurn, SearchHit};
use aria_intent::{ExtractedArgs, Intent};

use crate::collaborator::{TextGenerator, WebSearch};
use crate::error::DispatchError;
use crate::handler::IntentHandler;
use crate::reply::Reply;

pub struct WebSearchHandler {
    web: Arc<dyn WebSearch>,
    generator: Arc<dyn TextGenerator>,
    max_results: usize,
}

impl WebSearchHandler {
    pub fn new(
        web: Arc<dyn WebSearch>,
        generator: Arc<dyn TextGenerator>,
        max_results: usize,
    ) -> Self {
        Self {
            web,
            generator,
            max_results,
        }
    }
}

#[async_trait]
impl IntentHandler for WebSearchHandler {
    fn intent(&self) -> Intent {
        Intent::WebSearch
    }

    async fn handle(
        &self,
        utterance: &str,
        args: &ExtractedArgs,
        _history: &[ConversationTurn],
    ) -> Result<Reply, DispatchError> {
        let query = match args {
            ExtractedArgs::Search { query } => query.clone(),
            _ => utterance.to_string(),
        };
        tracing::info!(query = %query, "Handling web search");

        let hits = self
            .web
            .search(&query, self.max_results)
            .await
            .map_err(|e| DispatchError::collab("web search", e))?;

        if hits.is_empty() {
            return Ok(Reply::templated(format!(
                "No search results found for: {}",
                query
            )));
        }

        let results = format_results(&query, &hits);
        let prompt = format!(
            "Based on these search results, provide a helpful answer:\n\n{}\n\nUser question: {}",
            results, utterance
        );

        // Grounded single-shot generation; the answer is returned verbatim.
        let answer = self
            .generator
            .generate(&prompt, &[])
            .await
            .map_err(|e| DispatchError::collab("text generation", e))?;

        Ok(Reply::generated(answer))
    }
}

fn format_results(query: &str, hits: &[SearchHit]) -> String {
    let mut summary = format!("Search results for '{}':\n\n", query);
    for (i, hit) in hits.iter().enumerate() {
        summary.push_str(&format!("{}. {}\n", i + 1, hit.title));
        summary.push_str(&format!("   URL: {}\n", hit.url));
        if !hit.snippet.is_empty() {
            summary.push_str(&format!("   {}\n", hit.snippet));
        }
        summary.push('\n');
    }
    summary.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockGenerator, MockWeb};

    fn hit(title: &str, url: &str, snippet: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
        }
    }

    fn handler(web: MockWeb, generator: MockGenerator) -> WebSearchHandler {
        WebSearchHandler::new(Arc::new(web), Arc::new(generator), 5)
    }

    #[tokio::test]
    async fn test_empty_results_fixed_reply() {
        let h = handler(MockWeb::default(), MockGenerator::default());
        let reply = h
            .handle(
                "search for nothing",
                &ExtractedArgs::Search {
                    query: "nothing".to_string(),
                },
                &[],
            )
            .await
            .unwrap();
        assert_eq!(reply.text, "No search results found for: nothing");
        assert_eq!(reply.kind, crate::reply::ReplyKind::Templated);
    }

    #[tokio::test]
    async fn test_grounding_prompt_includes_results_and_question() {
        let web = MockWeb::with_hits(vec![hit(
            "France",
            "https://example.com/fr",
            "Paris is the capital.",
        )]);
        let generator = MockGenerator::replying("Paris is the capital of France.");
        let h = WebSearchHandler::new(Arc::new(web), Arc::new(generator), 5);

        let reply = h
            .handle(
                "What is the capital of France?",
                &ExtractedArgs::Search {
                    query: "What is the capital of France?".to_string(),
                },
                &[],
            )
            .await
            .unwrap();

        assert_eq!(reply.text, "Paris is the capital of France.");
        assert_eq!(reply.kind, crate::reply::ReplyKind::Generated);
    }

    #[tokio::test]
    async fn test_generation_is_stateless() {
        let web = MockWeb::with_hits(vec![hit("t", "https://u", "s")]);
        let generator = Arc::new(MockGenerator::default());
        let h = WebSearchHandler::new(Arc::new(web), generator.clone(), 5);

        let history = vec![ConversationTurn::now(aria_core::Role::User, "earlier")];
        h.handle(
            "look up rust",
            &ExtractedArgs::Search {
                query: "rust".to_string(),
            },
            &history,
        )
        .await
        .unwrap();

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].history_len, 0);
        assert!(calls[0]
            .prompt
            .starts_with("Based on these search results, provide a helpful answer:"));
        assert!(calls[0].prompt.contains("User question: look up rust"));
        assert!(calls[0].prompt.contains("Search results for 'rust':"));
    }

    #[tokio::test]
    async fn test_search_failure_surfaces_as_dispatch_error() {
        let web = MockWeb {
            fail: true,
            ..MockWeb::default()
        };
        let h = handler(web, MockGenerator::default());
        let err = h
            .handle(
                "search for x",
                &ExtractedArgs::Search {
                    query: "x".to_string(),
                },
                &[],
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Collaborator {
                service: "web search",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_args_falls_back_to_full_utterance() {
        let web = Arc::new(MockWeb::with_hits(vec![hit("t", "https://u", "")]));
        let h = WebSearchHandler::new(web.clone(), Arc::new(MockGenerator::default()), 5);
        h.handle("who is Ada Lovelace", &ExtractedArgs::None, &[])
            .await
            .unwrap();
        assert_eq!(web.queries(), vec!["who is Ada Lovelace"]);
    }

    #[test]
    fn test_format_results_numbering_and_snippets() {
        let hits = vec![
            hit("First", "https://a", "snippet a"),
            hit("Second", "https://b", ""),
        ];
        let text = format_results("q", &hits);
        assert!(text.starts_with("Search results for 'q':"));
        assert!(text.contains("1. First\n   URL: https://a\n   snippet a"));
        assert!(text.contains("2. Second\n   URL: https://b"));
        // Empty snippet line is omitted entirely
        assert!(!text.contains("https://b\n   \n"));
    }
}
