/// Configuration for the AWS SQS consumer.
///
/// This struct defines the parameters for receiving messages from an SQS queue,
/// including the maximum number of messages to receive and the wait time for long polling.
///
/// # Fields
/// - `max_number_of_messages`: The maximum number of messages to receive in a single request.
/// - `wait_time_seconds`: The wait time for long polling, in seconds.
#[derive(Debug, Clone)]
pub struct AwsSqsConsumerConfig {
    /// The maximum number of messages to receive in a single request.
    pub max_number_of_messages: i32,

    /// The wait time for long polling, in seconds.
    pub wait_time_seconds: i32,
}

impl Default for AwsSqsConsumerConfig {
    fn default() -> Self {
        AwsSqsConsumerConfig {
            max_number_of_messages: 10,
            wait_time_seconds: 20,
        }
    }
}

impl AwsSqsConsumerConfig {
    /// SQS rejects receive calls asking for more than 10 messages, so any
    /// `max_number_of_messages` outside 1..=10 falls back to 10.
    pub(crate) fn normalized(mut self) -> Self {
        if !(1..=10).contains(&self.max_number_of_messages) {
            self.max_number_of_messages = AwsSqsConsumerConfig::default().max_number_of_messages;
        }
        self
    }
}
