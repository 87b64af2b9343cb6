//! Line formats and the selection between them.

pub mod interface;
pub mod templates;

pub use interface::RecordRenderer;
pub use templates::{CompactFormat, DiagnosticFormat};

use crate::config::SinkConfig;

/// Chooses the renderer for a sink.
///
/// The choice is made once when the sink is built: a DEBUG minimum level gets
/// the diagnostic format, anything else the compact one.
pub fn select_format(config: &SinkConfig) -> Box<dyn RecordRenderer> {
    if config.verbose() {
        Box::new(DiagnosticFormat::new(config.colorize()))
    } else {
        Box::new(CompactFormat::new(config.project_label(), config.colorize()))
    }
}
