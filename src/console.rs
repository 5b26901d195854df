use docforge::events::{BatchEvent, EventSink};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Prints lifecycle events to stdout, as text or JSON lines.
///
/// Printing blocks when stdout does. Use it directly only where no lock is
/// held; batch mode goes through [`spawn_printer`].
pub struct ConsoleSink {
    json: bool,
}

impl ConsoleSink {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: BatchEvent) {
        if self.json {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!("Failed to serialize event: {}", e),
            }
            return;
        }

        match event {
            BatchEvent::Started { file_name, .. } => println!("[  0%] {}", file_name),
            BatchEvent::Progress {
                percent, file_name, ..
            } => println!("[{:>3}%] {}", percent, file_name),
            BatchEvent::JobCompleted {
                file_name,
                success: true,
                ..
            } => println!("[done] {}", file_name),
            BatchEvent::JobCompleted {
                file_name,
                error_message,
                ..
            } => println!(
                "[fail] {}: {}",
                file_name,
                error_message.as_deref().unwrap_or("unknown error")
            ),
            BatchEvent::BatchCompleted { succeeded, failed } => println!(
                "\nBatch conversion complete: {} succeeded, {} failed",
                succeeded, failed
            ),
        }
    }
}

/// Print events from a channel on the blocking pool.
///
/// The coordinator only ever pushes into the returned sender, so a stalled
/// stdout cannot hold up its bookkeeping. The task ends once every sender
/// has been dropped and the channel is drained.
pub fn spawn_printer(json: bool) -> (mpsc::UnboundedSender<BatchEvent>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let console = ConsoleSink::new(json);
    let printer = tokio::task::spawn_blocking(move || {
        while let Some(event) = rx.blocking_recv() {
            console.emit(event);
        }
    });
    (tx, printer)
}
