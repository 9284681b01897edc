//! # AWS SQS Consumer
//!
//! A bounded asynchronous AWS SQS polling consumer: it repeatedly fetches a
//! batch of messages, runs a user-supplied handler over every message of the
//! batch concurrently, deletes the messages whose handler succeeded, and
//! reports aggregate counters when a caller-controlled stop condition ends
//! the loop.
//!
//! ## Features
//!
//! - Asynchronous SQS polling loop built on tokio
//! - Concurrent per-message handling with isolated failures, so one bad
//!   message never aborts its batch
//! - Automatic message deletion on successful processing; failed messages
//!   are left to the queue's own redelivery
//! - Caller-supplied stop predicate, evaluated against running metrics
//!   before every fetch
//! - Long polling with configurable batch size and wait time
//! - Trait-based queue client so the loop can be driven against anything
//!   that can fetch and delete messages
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rs_sqs_consumer::client::create_sqs_client_from_env;
//! use rs_sqs_consumer::consumer::AwsSqsConsumer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = create_sqs_client_from_env().await;
//!     let queue_url = "https://sqs.region.amazonaws.com/account/queue-name";
//!
//!     let mut consumer = AwsSqsConsumer::new(queue_url, client, None)?;
//!     consumer.set_handler(|message| async move {
//!         println!("Processing message: {:?}", message.message_id());
//!         Ok(())
//!     });
//!
//!     let metrics = consumer
//!         .work(|metrics| async move { metrics.processed >= 100 })
//!         .await;
//!
//!     println!(
//!         "{} iterations, {} processed, {} failed",
//!         metrics.iterations, metrics.processed, metrics.failed
//!     );
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod consumer;
pub mod errors;
