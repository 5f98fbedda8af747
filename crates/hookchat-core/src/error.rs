use thiserror::Error;

/// Everything that can go wrong between pressing Enter and getting a reply
#[derive(Debug, Error)]
pub enum SendError {
    #[error("HTTP error! Status: {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("send task failed: {0}")]
    TaskFailed(String),
}

impl SendError {
    /// Text of the system message shown in the conversation
    pub fn to_chat_text(&self) -> String {
        format!("Error: {}. Make sure your webhook is running.", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_chat_text() {
        let err = SendError::Status(500);
        assert_eq!(
            err.to_chat_text(),
            "Error: HTTP error! Status: 500. Make sure your webhook is running."
        );
    }

    #[test]
    fn test_decode_chat_text_mentions_reason() {
        let err = SendError::Decode("expected value at line 1 column 1".to_string());
        let text = err.to_chat_text();
        assert!(text.contains("expected value"));
        assert!(text.ends_with("Make sure your webhook is running."));
    }
}
