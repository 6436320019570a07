//! File operation handler.
//!
//! Reads files and lists directories through the OS-operations collaborator.
//! The "read" directive is checked before "list"/"show"; path allow-list
//! enforcement happens inside the collaborator.

use std::sync::Arc;

use async_trait::async_trait;

use aria_core::ConversationTurn;
use aria_intent::{ExtractedArgs, Intent};

use crate::collaborator::OsOps;
use crate::error::DispatchError;
use crate::handler::IntentHandler;
use crate::reply::Reply;

pub struct FileOperationHandler {
    os: Arc<dyn OsOps>,
    read_truncate_chars: usize,
    list_limit: usize,
}

impl FileOperationHandler {
    pub fn new(os: Arc<dyn OsOps>, read_truncate_chars: usize, list_limit: usize) -> Self {
        Self {
            os,
            read_truncate_chars,
            list_limit,
        }
    }

    async fn read(&self, path: Option<&str>) -> Result<Reply, DispatchError> {
        let path = match path {
            Some(path) => path,
            None => {
                return Ok(Reply::clarification(
                    "Please specify the file path you want to read.",
                ))
            }
        };

        let content = self
            .os
            .read_file(path)
            .await
            .map_err(|e| DispatchError::collab("file system", e))?;

        match content {
            Some(content) => {
                let char_count = content.chars().count();
                if char_count > self.read_truncate_chars {
                    let shown: String = content.chars().take(self.read_truncate_chars).collect();
                    Ok(Reply::templated(format!("File contents:\n\n{}...", shown)))
                } else {
                    Ok(Reply::templated(format!("File contents:\n\n{}", content)))
                }
            }
            None => Ok(Reply::templated(
                "Sorry, I couldn't read that file. Please check the path and permissions.",
            )),
        }
    }

    async fn list(&self, path: Option<&str>) -> Result<Reply, DispatchError> {
        let path = match path {
            Some(path) => path,
            None => return Ok(Reply::clarification("Please specify the directory path.")),
        };

        let entries = self
            .os
            .list_directory(path)
            .await
            .map_err(|e| DispatchError::collab("file system", e))?;

        match entries {
            Some(mut entries) => {
                entries.sort();
                let listing = entries
                    .iter()
                    .take(self.list_limit)
                    .map(|item| format!("  - {}", item))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(Reply::templated(format!("Directory contents:\n{}", listing)))
            }
            None => Ok(Reply::templated("Sorry, I couldn't list that directory.")),
        }
    }
}

#[async_trait]
impl IntentHandler for FileOperationHandler {
    fn intent(&self) -> Intent {
        Intent::FileOperation
    }

    async fn handle(
        &self,
        utterance: &str,
        args: &ExtractedArgs,
        _history: &[ConversationTurn],
    ) -> Result<Reply, DispatchError> {
        tracing::info!(utterance = %utterance, "Handling file operation");

        let path = match args {
            ExtractedArgs::File { path } => path.as_deref(),
            _ => None,
        };

        let lower = utterance.to_lowercase();
        if lower.contains("read") {
            self.read(path).await
        } else if lower.contains("list") || lower.contains("show") {
            self.list(path).await
        } else {
            Ok(Reply::templated(
                "I can help you read files or list directories. Please provide more details.",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockOs;
    use crate::reply::ReplyKind;
    use std::collections::HashMap;

    fn handler(os: MockOs) -> FileOperationHandler {
        FileOperationHandler::new(Arc::new(os), 500, 20)
    }

    fn path_args(path: Option<&str>) -> ExtractedArgs {
        ExtractedArgs::File {
            path: path.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_read_short_file_full_content() {
        let mut files = HashMap::new();
        files.insert("/tmp/a.txt".to_string(), "hello world".to_string());
        let h = handler(MockOs {
            files,
            ..MockOs::default()
        });
        let reply = h
            .handle("read the file /tmp/a.txt", &path_args(Some("/tmp/a.txt")), &[])
            .await
            .unwrap();
        assert_eq!(reply.text, "File contents:\n\nhello world");
        assert_eq!(reply.kind, ReplyKind::Templated);
    }

    #[tokio::test]
    async fn test_read_long_file_truncated_with_ellipsis() {
        let mut files = HashMap::new();
        files.insert("/tmp/big.txt".to_string(), "x".repeat(600));
        let h = handler(MockOs {
            files,
            ..MockOs::default()
        });
        let reply = h
            .handle(
                "read the file /tmp/big.txt",
                &path_args(Some("/tmp/big.txt")),
                &[],
            )
            .await
            .unwrap();
        assert!(reply.text.ends_with("..."));
        let body = reply
            .text
            .strip_prefix("File contents:\n\n")
            .unwrap()
            .strip_suffix("...")
            .unwrap();
        assert_eq!(body.chars().count(), 500);
    }

    #[tokio::test]
    async fn test_read_truncation_respects_char_boundaries() {
        let mut files = HashMap::new();
        files.insert("/tmp/u.txt".to_string(), "\u{00e9}".repeat(501));
        let h = FileOperationHandler::new(
            Arc::new(MockOs {
                files,
                ..MockOs::default()
            }),
            500,
            20,
        );
        let reply = h
            .handle("read /tmp/u.txt file", &path_args(Some("/tmp/u.txt")), &[])
            .await
            .unwrap();
        assert!(reply.text.ends_with("..."));
    }

    #[tokio::test]
    async fn test_read_exactly_at_limit_not_truncated() {
        let mut files = HashMap::new();
        files.insert("/tmp/edge.txt".to_string(), "y".repeat(500));
        let h = handler(MockOs {
            files,
            ..MockOs::default()
        });
        let reply = h
            .handle(
                "read the file /tmp/edge.txt",
                &path_args(Some("/tmp/edge.txt")),
                &[],
            )
            .await
            .unwrap();
        assert!(!reply.text.ends_with("..."));
    }

    #[tokio::test]
    async fn test_read_unreadable_file_fixed_reply() {
        let h = handler(MockOs::default());
        let reply = h
            .handle(
                "read the file /nope.txt",
                &path_args(Some("/nope.txt")),
                &[],
            )
            .await
            .unwrap();
        assert_eq!(
            reply.text,
            "Sorry, I couldn't read that file. Please check the path and permissions."
        );
    }

    #[tokio::test]
    async fn test_read_no_path_clarification() {
        let h = handler(MockOs::default());
        let reply = h
            .handle("read the file", &path_args(None), &[])
            .await
            .unwrap();
        assert_eq!(reply.text, "Please specify the file path you want to read.");
        assert_eq!(reply.kind, ReplyKind::Clarification);
    }

    #[tokio::test]
    async fn test_list_directory_sorted_bulleted() {
        let mut dirs = HashMap::new();
        dirs.insert(
            "/home/user/docs".to_string(),
            vec!["b.txt".to_string(), "a.txt".to_string()],
        );
        let h = handler(MockOs {
            dirs,
            ..MockOs::default()
        });
        let reply = h
            .handle(
                "list files /home/user/docs",
                &path_args(Some("/home/user/docs")),
                &[],
            )
            .await
            .unwrap();
        assert_eq!(reply.text, "Directory contents:\n  - a.txt\n  - b.txt");
    }

    #[tokio::test]
    async fn test_list_caps_at_limit() {
        let mut dirs = HashMap::new();
        dirs.insert(
            "/d".to_string(),
            (0..30).map(|i| format!("file{:02}", i)).collect(),
        );
        let h = handler(MockOs {
            dirs,
            ..MockOs::default()
        });
        let reply = h
            .handle("list files /d", &path_args(Some("/d")), &[])
            .await
            .unwrap();
        let bullets = reply.text.matches("  - ").count();
        assert_eq!(bullets, 20);
    }

    #[tokio::test]
    async fn test_list_missing_directory_fixed_reply() {
        let h = handler(MockOs::default());
        let reply = h
            .handle("show files /missing", &path_args(Some("/missing")), &[])
            .await
            .unwrap();
        assert_eq!(reply.text, "Sorry, I couldn't list that directory.");
    }

    #[tokio::test]
    async fn test_list_no_path_clarification() {
        let h = handler(MockOs::default());
        let reply = h.handle("show files", &path_args(None), &[]).await.unwrap();
        assert_eq!(reply.text, "Please specify the directory path.");
        assert_eq!(reply.kind, ReplyKind::Clarification);
    }

    #[tokio::test]
    async fn test_read_checked_before_list() {
        // "read" and "show" both present; read wins.
        let mut files = HashMap::new();
        files.insert("/tmp/a.txt".to_string(), "content".to_string());
        let h = handler(MockOs {
            files,
            ..MockOs::default()
        });
        let reply = h
            .handle(
                "read and show the file /tmp/a.txt",
                &path_args(Some("/tmp/a.txt")),
                &[],
            )
            .await
            .unwrap();
        assert!(reply.text.starts_with("File contents:"));
    }

    #[tokio::test]
    async fn test_no_directive_need_more_detail() {
        let h = handler(MockOs::default());
        let reply = h
            .handle("create a file please", &path_args(None), &[])
            .await
            .unwrap();
        assert_eq!(
            reply.text,
            "I can help you read files or list directories. Please provide more details."
        );
    }

    #[tokio::test]
    async fn test_collaborator_failure_surfaces() {
        let h = handler(MockOs {
            fail: true,
            ..MockOs::default()
        });
        let err = h
            .handle("read the file /x", &path_args(Some("/x")), &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Collaborator {
                service: "file system",
                ..
            }
        ));
    }
}
