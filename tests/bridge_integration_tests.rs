mod utils;

use masklog::{LegacyRecord, LoggingBridge, SinkConfig};
use std::sync::Once;
use utils::{assert_lines_without_timestamp, CapturedSink};

static INSTALL_BRIDGE: Once = Once::new();

fn install_bridge() {
    INSTALL_BRIDGE.call_once(|| {
        LoggingBridge::new()
            .with_directives("trace,noisy=error")
            .install()
            .expect("no other logger is installed in this test binary");
    });
}

#[test]
fn facade_records_share_the_native_pipeline() {
    install_bridge();
    let sink = CapturedSink::install(
        SinkConfig::new("INFO")
            .with_sensitive_keys(["Cookie"])
            .with_project_label("gateway"),
    );

    log::info!("upstream headers: 'Cookie': 'sessionid=abcdef123456', 'Accept': '*/*'");
    log::debug!("dropped by the sink filter");
    masklog::info!("native Cookie=abcdefghijklmnop");

    assert_lines_without_timestamp(
        &sink.lines(),
        &[
            "[INFO] gateway | upstream headers: 'Cookie': 'ses*****456', 'Accept': '*/*'",
            "[INFO] gateway | native Cookie=abc*****nop",
        ],
    );
}

#[test]
fn facade_call_sites_survive_the_bridge() {
    install_bridge();
    let sink = CapturedSink::install(SinkConfig::new("DEBUG"));

    let line = line!() + 1;
    log::warn!(target: "worker::queue", "queue depth {}", 512);

    let expected = format!("[WARNING] worker::queue | ?:{line} | queue depth 512");
    assert_lines_without_timestamp(&sink.lines(), &[expected.as_str()]);
}

#[test]
fn facade_errors_are_rendered_as_exceptions() {
    install_bridge();
    let sink = CapturedSink::install(SinkConfig::new("INFO").with_project_label("gateway"));

    let err = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset by peer");
    log::error!(error = log::kv::Value::from_dyn_error(&err); "upstream request failed");

    assert_lines_without_timestamp(
        &sink.lines(),
        &["[ERROR] gateway | upstream request failed", "Error: connection reset by peer"],
    );
}

#[test]
fn directive_filter_applies_before_the_sink() {
    install_bridge();
    let sink = CapturedSink::install(SinkConfig::new("TRACE").with_project_label("app"));

    log::warn!(target: "noisy::poller", "suppressed");
    log::error!(target: "noisy::poller", "kept");
    log::trace!(target: "quiet", "kept too");

    assert_eq!(sink.messages(), vec!["kept", "kept too"]);
}

#[test]
fn crate_internal_records_are_not_bridged() {
    install_bridge();
    let sink = CapturedSink::install(SinkConfig::new("TRACE"));

    log::info!(target: "masklog::sink::registry", "Registered default sink #1");

    assert!(sink.lines().is_empty());
}

#[test]
fn foreign_facilities_fall_back_to_numeric_levels() {
    let sink = CapturedSink::install(SinkConfig::new("INFO").with_project_label("app"));
    let bridge = LoggingBridge::new();

    let emitted = bridge.on_legacy_record(LegacyRecord {
        level_name: "NOTICE",
        level_no: 25,
        message: "cache warmed".to_string(),
        logger_name: "legacy.cache",
        call_site: Default::default(),
        exception: None,
    });
    let dropped = bridge.on_legacy_record(LegacyRecord {
        level_name: "VERBOSE",
        level_no: 15,
        message: "cache lookup".to_string(),
        logger_name: "legacy.cache",
        call_site: Default::default(),
        exception: None,
    });

    assert!(emitted);
    assert!(!dropped);
    assert_lines_without_timestamp(&sink.lines(), &["[Level 25] app | cache warmed"]);
}
