//! System info handler.
//!
//! Takes a metrics snapshot from the OS-operations collaborator, renders it
//! as a label/value block, and re-phrases the block through the generator
//! together with the original question.

use std::sync::Arc;

use async_trait::async_trait;

use aria_core::ConversationTurn;
use aria_intent::{ExtractedArgs, Intent};

use crate::collaborator::{OsOps, TextGenerator};
use crate::error::DispatchError;
use crate::handler::IntentHandler;
use crate::reply::Reply;

pub struct SystemInfoHandler {
    os: Arc<dyn OsOps>,
    generator: Arc<dyn TextGenerator>,
}

impl SystemInfoHandler {
    pub fn new(os: Arc<dyn OsOps>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { os, generator }
    }
}

#[async_trait]
impl IntentHandler for SystemInfoHandler {
    fn intent(&self) -> Intent {
        Intent::SystemInfo
    }

    async fn handle(
        &self,
        utterance: &str,
        _args: &ExtractedArgs,
        _history: &[ConversationTurn],
    ) -> Result<Reply, DispatchError> {
        tracing::info!(utterance = %utterance, "Handling system info");

        let info = self
            .os
            .system_info()
            .await
            .map_err(|e| DispatchError::collab("system info", e))?;

        let block = render_info(&info);
        let prompt = format!(
            "Based on this system information, provide a natural response to the user:\n\n{}\n\nUser question: {}",
            block, utterance
        );

        let answer = self
            .generator
            .generate(&prompt, &[])
            .await
            .map_err(|e| DispatchError::collab("text generation", e))?;

        Ok(Reply::generated(answer))
    }
}

/// Render metric pairs as "Label: value" lines, underscores to spaces and
/// each word title-cased.
fn render_info(info: &[(String, String)]) -> String {
    let mut block = String::from("System Information:\n");
    for (key, value) in info {
        block.push_str(&format!("  {}: {}\n", title_case(key), value));
    }
    block
}

fn title_case(key: &str) -> String {
    key.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockGenerator, MockOs};

    fn snapshot() -> Vec<(String, String)> {
        vec![
            ("system".to_string(), "Linux".to_string()),
            ("cpu_count".to_string(), "8".to_string()),
            ("memory_total".to_string(), "31.26 GB".to_string()),
        ]
    }

    #[tokio::test]
    async fn test_prompt_contains_rendered_block() {
        let os = Arc::new(MockOs {
            info: snapshot(),
            ..MockOs::default()
        });
        let generator = Arc::new(MockGenerator::default());
        let h = SystemInfoHandler::new(os, generator.clone());

        h.handle("what are my system specs", &ExtractedArgs::None, &[])
            .await
            .unwrap();

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("System Information:"));
        assert!(calls[0].prompt.contains("  Cpu Count: 8"));
        assert!(calls[0].prompt.contains("  Memory Total: 31.26 GB"));
        assert!(calls[0]
            .prompt
            .contains("User question: what are my system specs"));
        // Stateless re-phrase
        assert_eq!(calls[0].history_len, 0);
    }

    #[tokio::test]
    async fn test_reply_is_generated_verbatim() {
        let os = Arc::new(MockOs {
            info: snapshot(),
            ..MockOs::default()
        });
        let generator = Arc::new(MockGenerator::replying("You have 8 cores."));
        let h = SystemInfoHandler::new(os, generator);
        let reply = h
            .handle("cpu usage", &ExtractedArgs::None, &[])
            .await
            .unwrap();
        assert_eq!(reply.text, "You have 8 cores.");
        assert_eq!(reply.kind, crate::reply::ReplyKind::Generated);
    }

    #[tokio::test]
    async fn test_snapshot_failure_surfaces() {
        let os = Arc::new(MockOs {
            fail: true,
            ..MockOs::default()
        });
        let h = SystemInfoHandler::new(os, Arc::new(MockGenerator::default()));
        let err = h
            .handle("cpu usage", &ExtractedArgs::None, &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Collaborator {
                service: "system info",
                ..
            }
        ));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("cpu_count"), "Cpu Count");
        assert_eq!(title_case("memory_available"), "Memory Available");
        assert_eq!(title_case("system"), "System");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_render_info_preserves_order() {
        let block = render_info(&snapshot());
        let system_pos = block.find("System: Linux").unwrap();
        let cpu_pos = block.find("Cpu Count").unwrap();
        assert!(system_pos < cpu_pos);
    }
}
