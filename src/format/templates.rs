use crate::constants::{TIMESTAMP_FORMAT, UNKNOWN_CALL_SITE};
use crate::format::interface::RecordRenderer;
use crate::record::{ExceptionInfo, LogRecord};
use crate::severity::Severity;
use console::Style;

/// Applies the template colours, or nothing when colour is off.
#[derive(Debug, Clone, Copy)]
struct Painter {
    enabled: bool,
}

impl Painter {
    fn paint(&self, text: &str, style: Style) -> String {
        if self.enabled {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn time(&self, record: &LogRecord) -> String {
        let time = record.time().format(TIMESTAMP_FORMAT).to_string();
        self.paint(&time, Style::new().green())
    }

    fn level(&self, level: Severity) -> String {
        let style = match level.rank() {
            40.. => Style::new().red().bold(),
            30..=39 => Style::new().yellow().bold(),
            25..=29 => Style::new().green().bold(),
            20..=24 => Style::new().bold(),
            _ => Style::new().blue().bold(),
        };
        format!("[{}]", self.paint(&level.name(), style))
    }

    fn name(&self, name: &str) -> String {
        self.paint(name, Style::new().cyan().underlined())
    }

    fn call_site(&self, record: &LogRecord) -> String {
        let site = record.call_site();
        let function = site.function.as_deref().unwrap_or(UNKNOWN_CALL_SITE);
        let line = site.line.map_or_else(|| UNKNOWN_CALL_SITE.to_string(), |line| line.to_string());
        self.paint(&format!("{function}:{line}"), Style::new().cyan())
    }
}

/// Verbose format selected when the sink's minimum level is DEBUG:
/// `MM-DD HH:mm:ss [LEVEL] logger | function:line | message`, with the full
/// cause chain and any captured backtrace under it.
#[derive(Debug, Clone)]
pub struct DiagnosticFormat {
    painter: Painter,
}

impl DiagnosticFormat {
    pub fn new(colorize: bool) -> Self {
        Self { painter: Painter { enabled: colorize } }
    }

    fn exception_block(&self, exception: &ExceptionInfo) -> String {
        let mut block = self.painter.paint(&exception.summary(), Style::new().red());
        for cause in &exception.causes {
            block.push_str("\nCaused by: ");
            block.push_str(cause);
        }
        if let Some(backtrace) = &exception.backtrace {
            block.push('\n');
            block.push_str(backtrace.trim_end());
        }
        block
    }
}

impl RecordRenderer for DiagnosticFormat {
    fn render(&self, record: &LogRecord) -> String {
        let p = &self.painter;
        let mut line = format!(
            "{} {} {} | {} | {}",
            p.time(record),
            p.level(record.level()),
            p.name(record.logger_name()),
            p.call_site(record),
            record.message()
        );
        if let Some(exception) = record.exception() {
            line.push('\n');
            line.push_str(&self.exception_block(exception));
        }
        line
    }

    fn name(&self) -> &'static str {
        "diagnostic"
    }
}

/// Format used for every minimum level other than DEBUG:
/// `MM-DD HH:mm:ss [LEVEL] label | message`, exceptions reduced to one line.
#[derive(Debug, Clone)]
pub struct CompactFormat {
    painter: Painter,
    project_label: String,
}

impl CompactFormat {
    pub fn new(project_label: impl Into<String>, colorize: bool) -> Self {
        Self { painter: Painter { enabled: colorize }, project_label: project_label.into() }
    }
}

impl RecordRenderer for CompactFormat {
    fn render(&self, record: &LogRecord) -> String {
        let p = &self.painter;
        let mut line = format!(
            "{} {} {} | {}",
            p.time(record),
            p.level(record.level()),
            p.name(&self.project_label),
            record.message()
        );
        if let Some(exception) = record.exception() {
            line.push('\n');
            line.push_str(&p.paint(&exception.summary(), Style::new().red()));
        }
        line
    }

    fn name(&self) -> &'static str {
        "compact"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CallSite;
    use chrono::{Local, TimeZone};

    fn record(level: Severity) -> LogRecord {
        let time = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        LogRecord::new(level, "user signed in", "billing::auth")
            .with_call_site(CallSite::new("billing::auth", "src/auth.rs", "login", 42))
            .with_time(time)
    }

    fn exception() -> ExceptionInfo {
        ExceptionInfo {
            type_name: "ConnectError".into(),
            message: "connection refused".into(),
            causes: vec!["os error 111".into()],
            backtrace: None,
        }
    }

    #[test]
    fn diagnostic_line_layout() {
        let line = DiagnosticFormat::new(false).render(&record(Severity::Info));
        assert_eq!(line, "03-09 07:05:01 [INFO] billing::auth | login:42 | user signed in");
    }

    #[test]
    fn compact_line_uses_project_label() {
        let line = CompactFormat::new("billing", false).render(&record(Severity::Warning));
        assert_eq!(line, "03-09 07:05:01 [WARNING] billing | user signed in");
    }

    #[test]
    fn missing_call_site_renders_placeholders() {
        let record = record(Severity::Debug).with_call_site(CallSite::default());
        let line = DiagnosticFormat::new(false).render(&record);
        assert!(line.contains("| ?:? |"), "{line}");
    }

    #[test]
    fn raw_levels_render_with_their_rank() {
        let line = CompactFormat::new("app", false).render(&record(Severity::Level(25)));
        assert!(line.contains("[Level 25]"), "{line}");
    }

    #[test]
    fn diagnostic_renders_full_cause_chain() {
        let record = record(Severity::Error).with_exception(Some(exception()));
        let line = DiagnosticFormat::new(false).render(&record);
        let lines: Vec<_> = line.lines().collect();
        assert_eq!(lines[1], "ConnectError: connection refused");
        assert_eq!(lines[2], "Caused by: os error 111");
    }

    #[test]
    fn compact_renders_single_summary_line() {
        let record = record(Severity::Error).with_exception(Some(exception()));
        let line = CompactFormat::new("app", false).render(&record);
        assert_eq!(line.lines().count(), 2);
        assert!(line.ends_with("\nConnectError: connection refused"));
    }

    #[test]
    fn colour_wraps_tokens_in_ansi_codes() {
        let line = CompactFormat::new("app", true).render(&record(Severity::Error));
        assert!(line.contains("\u{1b}["), "{line:?}");
        assert!(console::strip_ansi_codes(&line).ends_with("[ERROR] app | user signed in"));
    }
}
