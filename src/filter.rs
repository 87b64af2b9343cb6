//! Severity gate with in-place redaction.

use crate::config::SinkConfig;
use crate::error::Result;
use crate::record::LogRecord;
use crate::redact::Redactor;
use crate::severity::Severity;

/// Decides whether a record reaches the renderer.
#[derive(Debug, Clone)]
pub struct SeverityFilter {
    min_level: Severity,
    redactor: Redactor,
}

impl SeverityFilter {
    pub fn new(config: &SinkConfig) -> Result<Self> {
        Ok(Self { min_level: config.min_level(), redactor: Redactor::new(config.sensitive_keys())? })
    }

    pub fn min_level(&self) -> Severity {
        self.min_level
    }

    /// Redacts the message, then reports whether the record's rank reaches
    /// the minimum. Redaction runs even for records that end up dropped.
    pub fn should_emit(&self, record: &mut LogRecord) -> bool {
        if !self.redactor.is_empty() {
            let redacted = self.redactor.redact(record.message());
            record.set_message(redacted);
        }
        record.level().rank() >= self.min_level.rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(min_level: &str, keys: &[&str]) -> SeverityFilter {
        let config = SinkConfig::new(min_level).with_sensitive_keys(keys.iter().copied());
        SeverityFilter::new(&config).unwrap()
    }

    #[test]
    fn boundary_level_passes() {
        let filter = filter("INFO", &[]);
        assert!(filter.should_emit(&mut LogRecord::new(Severity::Info, "hello", "app")));
        assert!(!filter.should_emit(&mut LogRecord::new(Severity::Debug, "hello", "app")));
    }

    #[test]
    fn every_level_at_or_above_minimum_passes() {
        for min in Severity::NAMED {
            let filter = filter(&min.name(), &[]);
            for level in Severity::NAMED {
                let mut record = LogRecord::new(level, "m", "app");
                assert_eq!(filter.should_emit(&mut record), level >= min, "{level} vs {min}");
            }
        }
    }

    #[test]
    fn numeric_minimum_and_levels() {
        let filter = filter("25", &[]);
        assert!(filter.should_emit(&mut LogRecord::new(Severity::Level(25), "m", "app")));
        assert!(filter.should_emit(&mut LogRecord::new(Severity::Warning, "m", "app")));
        assert!(!filter.should_emit(&mut LogRecord::new(Severity::Info, "m", "app")));
    }

    #[test]
    fn unknown_minimum_lets_everything_through() {
        let filter = filter("LOUDEST", &[]);
        assert_eq!(filter.min_level().rank(), 0);
        assert!(filter.should_emit(&mut LogRecord::new(Severity::Trace, "m", "app")));
    }

    #[test]
    fn redacts_passing_records() {
        let filter = filter("INFO", &["password"]);
        let mut record = LogRecord::new(Severity::Info, "password=hunter2hunter2", "app");
        assert!(filter.should_emit(&mut record));
        assert_eq!(record.message(), "password=hun*****er2");
    }

    #[test]
    fn redacts_dropped_records_too() {
        let filter = filter("ERROR", &["password"]);
        let mut record = LogRecord::new(Severity::Info, "password=hunter2hunter2", "app");
        assert!(!filter.should_emit(&mut record));
        assert_eq!(record.message(), "password=hun*****er2");
    }

    #[test]
    fn without_keys_message_is_untouched() {
        let filter = filter("INFO", &[]);
        let mut record = LogRecord::new(Severity::Info, "Cookie=abcdefghijkl", "app");
        filter.should_emit(&mut record);
        assert_eq!(record.message(), "Cookie=abcdefghijkl");
    }
}
