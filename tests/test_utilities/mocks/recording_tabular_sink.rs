use async_trait::async_trait;
use package_licenses::prelude::*;
use std::sync::{Arc, Mutex};

/// Everything a RecordingTabularSink received
#[derive(Debug, Default, Clone)]
pub struct SinkRecording {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
    pub finish_calls: usize,
}

/// TabularSink that keeps its records in memory
///
/// Clones share one recording, so a test can keep a handle while the
/// pipeline owns the boxed sink.
#[derive(Default, Clone)]
pub struct RecordingTabularSink {
    pub recording: Arc<Mutex<SinkRecording>>,
    pub fail_on_row: Option<usize>,
}

impl RecordingTabularSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails when asked to append the row with this zero-based index
    pub fn failing_on_row(index: usize) -> Self {
        Self {
            fail_on_row: Some(index),
            ..Self::default()
        }
    }

    pub fn recording(&self) -> SinkRecording {
        self.recording.lock().unwrap().clone()
    }
}

#[async_trait]
impl TabularSink for RecordingTabularSink {
    async fn write_header(&mut self, columns: &[&str]) -> Result<()> {
        self.recording.lock().unwrap().header =
            Some(columns.iter().map(|c| c.to_string()).collect());
        Ok(())
    }

    async fn write_row(&mut self, values: &[String]) -> Result<()> {
        let mut recording = self.recording.lock().unwrap();
        if self.fail_on_row == Some(recording.rows.len()) {
            anyhow::bail!("Mock sink failure");
        }
        recording.rows.push(values.to_vec());
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        self.recording.lock().unwrap().finish_calls += 1;
        Ok(())
    }
}
