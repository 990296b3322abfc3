//! In-memory encoder for orchestration tests.
//!
//! File names drive behaviour: `*alpha*` reports an alpha channel, `*fail*`
//! makes `encode` return an error, `*panic*` panics inside `encode` and
//! `*slow*` sleeps for the slow delay instead of the regular one.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::core::{EncodeOptions, ImageMetadata};
use crate::processing::encoder::AvifEncoder;
use crate::utils::{ConverterError, ConverterResult, extension_of};

/// Start or end of one `encode` call, keyed by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeEvent {
    Start(String),
    End(String),
}

pub struct FakeEncoder {
    output_size: usize,
    delay: Duration,
    slow_delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
    last_options: Mutex<Option<EncodeOptions>>,
    events: Mutex<Vec<EncodeEvent>>,
}

impl FakeEncoder {
    pub fn new() -> Self {
        Self {
            output_size: 64,
            delay: Duration::ZERO,
            slow_delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            last_options: Mutex::new(None),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn with_output_size(mut self, bytes: usize) -> Self {
        self.output_size = bytes;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_slow_delay(mut self, delay: Duration) -> Self {
        self.slow_delay = delay;
        self
    }

    /// Highest number of `encode` calls observed running at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<EncodeOptions> {
        *self.last_options.lock().unwrap()
    }

    pub fn events(&self) -> Vec<EncodeEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Position of `event` in the recorded sequence.
    pub fn position(&self, event: &EncodeEvent) -> usize {
        self.events()
            .iter()
            .position(|e| e == event)
            .unwrap_or_else(|| panic!("{event:?} was never recorded"))
    }

    fn record(&self, event: EncodeEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl AvifEncoder for FakeEncoder {
    fn inspect(&self, input: &Path) -> ConverterResult<ImageMetadata> {
        let has_alpha = file_name(input).contains("alpha");
        Ok(ImageMetadata {
            width: 10,
            height: 10,
            bands: if has_alpha { 4 } else { 3 },
            has_alpha,
            format: extension_of(input),
        })
    }

    fn encode(&self, input: &Path, output: &Path, options: &EncodeOptions) -> ConverterResult<()> {
        let name = file_name(input);
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = Some(*options);
        self.record(EncodeEvent::Start(name.clone()));

        let delay = if name.contains("slow") { self.slow_delay } else { self.delay };
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        if name.contains("panic") {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            panic!("fake encoder panicked on {name}");
        }

        let result = if name.contains("fail") {
            Err(ConverterError::encode(format!("fake encoder rejected {name}")))
        } else {
            std::fs::write(output, vec![0u8; self.output_size]).map_err(ConverterError::from)
        };

        self.record(EncodeEvent::End(name));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
