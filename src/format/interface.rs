use crate::record::LogRecord;

/// Trait for the line formats a sink can render records with.
pub trait RecordRenderer: Send + Sync {
    /// Renders a record, including any exception block, without the trailing
    /// newline.
    ///
    /// # Arguments
    /// * `record` - Record that already passed the filter
    ///
    /// # Returns
    /// * `String` - The text written to the output target
    fn render(&self, record: &LogRecord) -> String;

    /// Short name of the format, used in setup logging.
    fn name(&self) -> &'static str;
}
