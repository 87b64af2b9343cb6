use crate::config::SinkConfig;
use crate::error::Result;
use crate::record::LogRecord;
use crate::sink::Sink;
use log::debug;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

struct Registration {
    id: u64,
    sink: Arc<Sink>,
}

static ACTIVE: RwLock<Option<Registration>> = RwLock::new(None);
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Proof of registration returned by [`initialize`]; pass it to [`shutdown`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping the handle leaves no way to shut the sink down"]
pub struct SinkHandle {
    id: u64,
}

impl SinkHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether this registration is still the default sink.
    pub fn is_active(&self) -> bool {
        let active = ACTIVE.read().unwrap_or_else(PoisonError::into_inner);
        active.as_ref().is_some_and(|registration| registration.id == self.id)
    }
}

/// Registers a stdout sink as the process default.
pub fn initialize(config: SinkConfig) -> Result<SinkHandle> {
    Ok(register(Sink::stdout(config)?))
}

/// Registers a sink writing to `target` as the process default.
pub fn initialize_with<W>(config: SinkConfig, target: W) -> Result<SinkHandle>
where
    W: Write + Send + 'static,
{
    Ok(register(Sink::new(config, target)?))
}

/// Makes `sink` the default. A previously active sink is released and flushed
/// first, and its handle goes stale.
pub fn register(sink: Sink) -> SinkHandle {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let format = sink.format_name();
    let previous = {
        let mut active = ACTIVE.write().unwrap_or_else(PoisonError::into_inner);
        active.replace(Registration { id, sink: Arc::new(sink) })
    };

    if let Some(previous) = previous {
        previous.sink.flush();
        debug!("Released default sink #{} in favour of #{id}", previous.id);
    }
    debug!("Registered default sink #{id} using the {format} format");
    SinkHandle { id }
}

/// Removes the registration behind `handle` and flushes its target. Returns
/// `false` when the handle had already been superseded.
pub fn shutdown(handle: SinkHandle) -> bool {
    let removed = {
        let mut active = ACTIVE.write().unwrap_or_else(PoisonError::into_inner);
        match active.as_ref() {
            Some(registration) if registration.id == handle.id => active.take(),
            _ => None,
        }
    };

    match removed {
        Some(registration) => {
            registration.sink.flush();
            debug!("Shut down default sink #{}", registration.id);
            true
        }
        None => false,
    }
}

/// The current default sink, if any.
pub fn active_sink() -> Option<Arc<Sink>> {
    let active = ACTIVE.read().unwrap_or_else(PoisonError::into_inner);
    active.as_ref().map(|registration| Arc::clone(&registration.sink))
}

/// Hands a record to the default sink. Without one the record is dropped.
pub fn dispatch(record: LogRecord) -> bool {
    match active_sink() {
        Some(sink) => sink.log(record),
        None => false,
    }
}
