use crate::adapters::outbound::formatters::{AsyncDelimitedRecordWriter, WriterSetting};
use crate::ports::outbound::TabularSink;
use crate::shared::error::LicenseReportError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::BufWriter;

/// DelimitedFileSink adapter writing report rows to a delimited text file
///
/// The file is created on the first record, so a run that never writes
/// leaves nothing behind. An existing file is replaced.
pub struct DelimitedFileSink {
    path: PathBuf,
    setting: WriterSetting,
    writer: Option<AsyncDelimitedRecordWriter<BufWriter<File>>>,
}

impl DelimitedFileSink {
    pub fn new(path: PathBuf, setting: WriterSetting) -> Self {
        Self {
            path,
            setting,
            writer: None,
        }
    }

    fn write_error(&self, e: impl std::fmt::Display) -> anyhow::Error {
        LicenseReportError::FileWriteError {
            path: self.path.clone(),
            details: e.to_string(),
        }
        .into()
    }

    async fn writer(&mut self) -> Result<&mut AsyncDelimitedRecordWriter<BufWriter<File>>> {
        if self.writer.is_none() {
            let file = File::create(&self.path)
                .await
                .map_err(|e| self.write_error(e))?;
            self.writer = Some(AsyncDelimitedRecordWriter::new(
                BufWriter::new(file),
                self.setting.clone(),
            ));
        }
        self.writer
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("report writer for {} is closed", self.path.display()))
    }
}

#[async_trait]
impl TabularSink for DelimitedFileSink {
    async fn write_row(&mut self, values: &[String]) -> Result<()> {
        let result = self.writer().await?.write_record(values).await;
        result.map_err(|e| self.write_error(e))
    }

    fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    async fn finish(&mut self) -> Result<()> {
        let Some(writer) = self.writer.take() else {
            return Ok(());
        };
        writer.close().await.map_err(|e| self.write_error(e))?;
        Ok(())
    }
}
