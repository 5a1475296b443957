//! RecordLogsHandler - accepts wallet client log entries.
//!
//! Devices post diagnostics when something goes wrong with a pass. The
//! entries are surfaced through the service's own logging and then
//! discarded; there is no log store.

/// Command carrying client log entries.
#[derive(Debug, Clone)]
pub struct RecordLogsCommand {
    pub logs: Vec<String>,
}

/// Handler for wallet client logs.
#[derive(Debug, Default)]
pub struct RecordLogsHandler;

impl RecordLogsHandler {
    pub fn new() -> Self {
        Self
    }

    /// Returns the number of entries recorded.
    pub async fn handle(&self, cmd: RecordLogsCommand) -> usize {
        for entry in &cmd.logs {
            tracing::warn!(target: "wallet_client", message = %entry, "wallet client log");
        }
        cmd.logs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_number_of_entries() {
        let handler = RecordLogsHandler::new();
        let count = handler
            .handle(RecordLogsCommand {
                logs: vec!["first".to_string(), "second".to_string()],
            })
            .await;
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn empty_batch_is_fine() {
        let handler = RecordLogsHandler::new();
        assert_eq!(handler.handle(RecordLogsCommand { logs: vec![] }).await, 0);
    }
}
