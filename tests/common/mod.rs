//! Shared test harness for integration tests.
//!
//! Provides [`ScriptedConverter`], a converter whose behaviour is scripted per
//! input file (delay, gate, failure), and [`Harness`], which wires it into a
//! [`BatchCoordinator`] whose events land in a channel.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use docforge::converter::{ConversionError, DocumentConverter};
use docforge::events::BatchEvent;
use docforge::{BatchCoordinator, ConversionJob};
use docforge_common::{paths, ConversionKind};
use parking_lot::{Condvar, Mutex};
use tokio::sync::mpsc;

/// How long a test waits for any single event before giving up.
pub const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// A latch a scripted conversion blocks on until the test opens it.
#[derive(Default)]
pub struct Gate {
    open: Mutex<bool>,
    cv: Condvar,
}

impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn open(&self) {
        *self.open.lock() = true;
        self.cv.notify_all();
    }

    fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.cv.wait(&mut open);
        }
    }
}

/// Behaviour of one input file.
#[derive(Clone, Default)]
pub struct Script {
    pub gate: Option<Arc<Gate>>,
    pub delay: Duration,
    pub prepare_error: Option<String>,
    pub convert_error: Option<String>,
    pub panic: bool,
}

impl Script {
    pub fn gated(gate: &Arc<Gate>) -> Self {
        Self {
            gate: Some(Arc::clone(gate)),
            ..Self::default()
        }
    }

    pub fn delayed(ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(ms),
            ..Self::default()
        }
    }

    pub fn failing_prepare(msg: &str) -> Self {
        Self {
            prepare_error: Some(msg.to_string()),
            ..Self::default()
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            convert_error: Some(msg.to_string()),
            ..Self::default()
        }
    }
}

/// Converter that follows a per-file [`Script`] and never touches the disk.
#[derive(Default)]
pub struct ScriptedConverter {
    scripts: Mutex<HashMap<String, Script>>,
    entered: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedConverter {
    pub fn script(&self, file_name: &str, script: Script) {
        self.scripts.lock().insert(file_name.to_string(), script);
    }

    fn script_for(&self, input: &Path) -> Script {
        self.scripts
            .lock()
            .get(&paths::display_name(input))
            .cloned()
            .unwrap_or_default()
    }

    /// File names in the order their conversion began.
    pub fn entered(&self) -> Vec<String> {
        self.entered.lock().clone()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of conversions ever observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl DocumentConverter for ScriptedConverter {
    fn prepare(&self, _kind: ConversionKind, input: &Path) -> Result<(), ConversionError> {
        match self.script_for(input).prepare_error {
            Some(msg) => Err(ConversionError::failed(msg)),
            None => Ok(()),
        }
    }

    fn convert(
        &self,
        _kind: ConversionKind,
        input: &Path,
        _output: &Path,
    ) -> Result<(), ConversionError> {
        let script = self.script_for(input);
        self.entered.lock().push(paths::display_name(input));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(ref gate) = script.gate {
            gate.wait();
        }
        if !script.delay.is_zero() {
            std::thread::sleep(script.delay);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if script.panic {
            panic!("scripted converter panic");
        }
        match script.convert_error {
            Some(msg) => Err(ConversionError::failed(msg)),
            None => Ok(()),
        }
    }
}

/// A coordinator driving a [`ScriptedConverter`], with events captured.
pub struct Harness {
    pub coordinator: BatchCoordinator,
    pub converter: Arc<ScriptedConverter>,
    pub events: mpsc::UnboundedReceiver<BatchEvent>,
}

impl Harness {
    /// Must be called inside a tokio runtime.
    pub fn new(limit: usize) -> Self {
        let converter = Arc::new(ScriptedConverter::default());
        let (tx, events) = mpsc::unbounded_channel();
        let coordinator =
            BatchCoordinator::with_limit(converter.clone(), Arc::new(tx), limit)
                .expect("failed to create coordinator");
        Self {
            coordinator,
            converter,
            events,
        }
    }

    /// A PDF to Word job for `/in/<name>.pdf`.
    pub fn job(name: &str) -> ConversionJob {
        ConversionJob::new(
            format!("/in/{}.pdf", name),
            format!("/out/{}.docx", name),
            ConversionKind::PdfToWord,
        )
    }

    /// Receive the next event, failing the test after [`EVENT_TIMEOUT`].
    pub async fn next_event(&mut self) -> BatchEvent {
        tokio::time::timeout(EVENT_TIMEOUT, self.events.recv())
            .await
            .expect("timed out waiting for event")
            .expect("event channel closed")
    }

    /// Events already delivered, without waiting.
    pub fn drain(&mut self) -> Vec<BatchEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
        out
    }

    /// Receive events until one matches `pred`; returns all of them, match included.
    pub async fn collect_until(&mut self, pred: impl Fn(&BatchEvent) -> bool) -> Vec<BatchEvent> {
        let mut out = Vec::new();
        loop {
            let event = self.next_event().await;
            let done = pred(&event);
            out.push(event);
            if done {
                return out;
            }
        }
    }

    pub async fn collect_until_batch_completed(&mut self) -> Vec<BatchEvent> {
        self.collect_until(|e| matches!(e, BatchEvent::BatchCompleted { .. }))
            .await
    }

    /// Poll until `n` conversions are inside the converter at once.
    pub async fn wait_for_in_flight(&self, n: usize) {
        let deadline = tokio::time::Instant::now() + EVENT_TIMEOUT;
        while self.converter.in_flight() < n {
            assert!(
                tokio::time::Instant::now() < deadline,
                "never reached {} conversions in flight",
                n
            );
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

/// Short label for an event, e.g. `started:a.pdf` or `completed:a.pdf:false`.
pub fn label(event: &BatchEvent) -> String {
    match event {
        BatchEvent::Started { file_name, .. } => format!("started:{}", file_name),
        BatchEvent::Progress {
            percent, file_name, ..
        } => format!("progress:{}:{}", file_name, percent),
        BatchEvent::JobCompleted {
            file_name, success, ..
        } => format!("completed:{}:{}", file_name, success),
        BatchEvent::BatchCompleted { succeeded, failed } => {
            format!("batch:{}:{}", succeeded, failed)
        }
    }
}

pub fn labels(events: &[BatchEvent]) -> Vec<String> {
    events.iter().map(label).collect()
}

pub fn position(events: &[BatchEvent], wanted: &str) -> usize {
    labels(events)
        .iter()
        .position(|l| l == wanted)
        .unwrap_or_else(|| panic!("no {} in {:?}", wanted, labels(events)))
}
