/// ProgressReporter port for the human-readable run transcript
///
/// This port abstracts the console or IDE output pane that receives the
/// header, one line per package, warnings, and the completion message.
pub trait ProgressReporter {
    /// Reports a transcript message
    ///
    /// # Arguments
    /// * `message` - The message to report
    fn report(&self, message: &str);

    /// Reports progress with a position
    ///
    /// # Arguments
    /// * `current` - Current progress value
    /// * `total` - Total expected value
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    ///
    /// # Arguments
    /// * `message` - The error/warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    ///
    /// # Arguments
    /// * `message` - Completion message
    fn report_completion(&self, message: &str);
}
