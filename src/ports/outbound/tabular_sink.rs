use crate::shared::Result;
use async_trait::async_trait;

/// TabularSink port for a destination of report rows
///
/// The delimited text report and a workbook are both tabular sinks: they
/// receive one header and then rows of the same width, in order.
#[async_trait]
pub trait TabularSink: Send {
    /// Writes the header record
    ///
    /// The default writes the column names as an ordinary row.
    async fn write_header(&mut self, columns: &[&str]) -> Result<()> {
        let values: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        self.write_row(&values).await
    }

    /// Appends one row
    async fn write_row(&mut self, values: &[String]) -> Result<()>;

    /// Name of the file this sink creates in the output directory, if any
    ///
    /// License files never take a name claimed here.
    fn file_name(&self) -> Option<&str> {
        None
    }

    /// Flushes buffered rows and releases the destination
    ///
    /// Must be safe to call more than once.
    async fn finish(&mut self) -> Result<()>;
}
