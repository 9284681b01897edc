use std::str::FromStr;

use thiserror::Error;

/// Error types for AWS SQS consumer operations.
///
/// This enum represents all possible errors that can occur while
/// constructing a consumer or driving its polling loop.
#[derive(Debug, Error)]
pub enum AwsSqsConsumerError {
    /// The consumer was constructed without a queue URL.
    #[error("missing URL for SQS queue")]
    MissingQueueUrl,

    /// A receive-message call against SQS failed.
    ///
    /// This error is fatal for the `work` invocation it occurs in: the loop
    /// terminates and the metrics accumulated so far are returned.
    #[error("failed to receive messages from SQS: {0}")]
    ReceiveError(String),

    /// A delete-message call against SQS failed.
    ///
    /// The consumer loop swallows this error; the message stays on the queue
    /// and becomes visible again once its visibility timeout expires.
    #[error("failed to delete message from SQS: {0}")]
    DeleteError(String),

    #[error("{0}")]
    GenericError(#[from] GenericError),
}

/// Generic error type for handler failures and other unexpected errors.
#[derive(Debug, Error)]
pub struct GenericError(String);

impl GenericError {
    /// Creates a new `GenericError` with the provided message.
    pub fn new(message: String) -> Self {
        GenericError(message)
    }
}

impl std::fmt::Display for GenericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GenericError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(GenericError::new(s.to_string()))
    }
}

impl From<String> for GenericError {
    fn from(s: String) -> Self {
        GenericError::new(s)
    }
}
