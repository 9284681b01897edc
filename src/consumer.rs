use std::future::Future;

use aws_sdk_sqs::types::Message;
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use tracing::{debug, error, warn};

use crate::client::QueueClient;
use crate::errors::AwsSqsConsumerError;

mod config;
mod metrics;

pub use config::AwsSqsConsumerConfig;
pub use metrics::ConsumerMetrics;

/// The per-message handler, normalized to a single asynchronous shape so the
/// dispatcher awaits synchronous-style and asynchronous handlers identically.
type BoxedHandler =
    Box<dyn Fn(Message) -> BoxFuture<'static, Result<(), AwsSqsConsumerError>> + Send + Sync>;

fn noop_handler(_message: Message) -> BoxFuture<'static, Result<(), AwsSqsConsumerError>> {
    future::ready(Ok(())).boxed()
}

/// One pass of the consumption loop.
///
/// `Stopped` covers both a true stop predicate and a drained queue; `Failed`
/// is reached only on a receive error. Both are terminal and both resolve
/// `work` with the accumulated metrics; callers that need to tell the two
/// apart have to wrap their stop predicate with their own error detection.
enum LoopState {
    Checking,
    Fetching,
    Processing(Vec<Message>),
    Stopped,
    Failed,
}

/// A bounded polling consumer for a single SQS queue.
///
/// Each `work` invocation drives the loop: evaluate the stop predicate, fetch
/// a batch, run the registered handler over every message of the batch
/// concurrently, delete the messages whose handler succeeded, repeat. The
/// loop ends when the predicate returns true, the queue comes back empty, or
/// a receive call fails.
///
/// Failed messages are never deleted and are not retried by the consumer;
/// they become visible again on the queue once their visibility timeout
/// expires, so redelivery stays the queue's responsibility.
pub struct AwsSqsConsumer<C>
where
    C: QueueClient,
{
    /// The URL of the queue this consumer polls.
    queue_url: String,

    /// The client used to receive and delete messages.
    client: C,

    /// Normalized polling parameters.
    config: AwsSqsConsumerConfig,

    /// The active per-message handler.
    handler: BoxedHandler,

    /// Counters for the current `work` run.
    metrics: ConsumerMetrics,
}

impl<C> AwsSqsConsumer<C>
where
    C: QueueClient,
{
    /// Creates a consumer for the given queue.
    ///
    /// The initial handler is a no-op that succeeds for every message, so a
    /// consumer started without [`set_handler`](Self::set_handler) drains the
    /// queue. A `max_number_of_messages` outside SQS's 1..=10 receive bound
    /// falls back to 10, as does an absent `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AwsSqsConsumerError::MissingQueueUrl`] if `queue_url` is
    /// empty or blank.
    pub fn new(
        queue_url: impl Into<String>,
        client: C,
        config: Option<AwsSqsConsumerConfig>,
    ) -> Result<Self, AwsSqsConsumerError> {
        let queue_url = queue_url.into();
        if queue_url.trim().is_empty() {
            return Err(AwsSqsConsumerError::MissingQueueUrl);
        }

        Ok(AwsSqsConsumer {
            queue_url,
            client,
            config: config.unwrap_or_default().normalized(),
            handler: Box::new(noop_handler),
            metrics: ConsumerMetrics::default(),
        })
    }

    /// Replaces the active message handler.
    ///
    /// The handler receives each fetched message and reports success or
    /// failure; its success value is ignored. Returns `&mut Self` so handler
    /// registration can be chained onto construction. Replacing the handler
    /// while a `work` invocation is in flight is impossible, since `work`
    /// holds the mutable borrow.
    pub fn set_handler<F, Fut>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(Message) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), AwsSqsConsumerError>> + Send + 'static,
    {
        self.handler = Box::new(move |message| handler(message).boxed());
        self
    }

    /// The URL of the queue this consumer polls.
    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    /// The effective (normalized) polling configuration.
    pub fn config(&self) -> &AwsSqsConsumerConfig {
        &self.config
    }

    /// Runs the consumption loop until it terminates, returning the final
    /// counters.
    ///
    /// `condition` is awaited with a metrics snapshot before every fetch,
    /// including the very first one: a predicate that is true from the start
    /// stops the loop before any queue call is made. The loop also stops when
    /// a fetch comes back empty, and gives up when a fetch fails. In every
    /// case the metrics accumulated so far are returned, never an error.
    ///
    /// Counters are reset to zero on entry, so each invocation reports only
    /// its own activity.
    pub async fn work<P, Fut>(&mut self, mut condition: P) -> ConsumerMetrics
    where
        P: FnMut(ConsumerMetrics) -> Fut,
        Fut: Future<Output = bool>,
    {
        self.metrics = ConsumerMetrics::default();

        let mut state = LoopState::Checking;
        loop {
            state = match state {
                LoopState::Checking => {
                    if condition(self.metrics).await {
                        LoopState::Stopped
                    } else {
                        LoopState::Fetching
                    }
                }
                LoopState::Fetching => match self.fetch().await {
                    Ok(Some(batch)) => LoopState::Processing(batch),
                    Ok(None) => LoopState::Stopped,
                    Err(error) => {
                        error!(%error, queue_url = %self.queue_url, "receive failed, giving up");
                        LoopState::Failed
                    }
                },
                LoopState::Processing(batch) => {
                    self.process(batch).await;
                    LoopState::Checking
                }
                LoopState::Stopped | LoopState::Failed => break,
            };
        }

        self.metrics
    }

    /// Receives the next batch. `Ok(None)` means the queue came back empty
    /// and the loop should stop normally.
    async fn fetch(&mut self) -> Result<Option<Vec<Message>>, AwsSqsConsumerError> {
        let messages = self
            .client
            .fetch_batch(
                &self.queue_url,
                self.config.max_number_of_messages,
                self.config.wait_time_seconds,
            )
            .await?;

        self.metrics.iterations += 1;

        if messages.is_empty() {
            debug!(queue_url = %self.queue_url, "queue drained");
            Ok(None)
        } else {
            debug!(queue_url = %self.queue_url, count = messages.len(), "received batch");
            Ok(Some(messages))
        }
    }

    /// Handles one batch: fan the handler out over every message, wait for
    /// all outcomes to settle, then delete the messages that succeeded.
    ///
    /// Each handler runs in its own result-capturing future, so one failing
    /// message never aborts its siblings. Deletes are best-effort: a failed
    /// delete is logged and dropped, leaving the message to SQS redelivery.
    async fn process(&mut self, batch: Vec<Message>) {
        self.metrics.processed += batch.len() as u64;

        let handler = &self.handler;
        let settled = future::join_all(batch.into_iter().map(|message| {
            let receipt_handle = message.receipt_handle().map(str::to_owned);
            let outcome = handler(message);
            async move { (receipt_handle, outcome.await) }
        }))
        .await;

        for (receipt_handle, outcome) in settled {
            match outcome {
                Ok(()) => {
                    self.metrics.succeeded += 1;
                    let Some(receipt_handle) = receipt_handle else {
                        warn!(queue_url = %self.queue_url, "handled message had no receipt handle");
                        continue;
                    };
                    if let Err(error) = self
                        .client
                        .delete_message(&self.queue_url, &receipt_handle)
                        .await
                    {
                        warn!(%error, queue_url = %self.queue_url, "failed to delete handled message");
                    }
                }
                Err(error) => {
                    self.metrics.failed += 1;
                    debug!(%error, queue_url = %self.queue_url, "message handler failed");
                }
            }
        }
    }
}
