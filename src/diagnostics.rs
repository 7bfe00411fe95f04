//! Bridge from `SQLite`'s process-wide error log to per-connection sinks.
//!
//! `SQLite` accepts exactly one log callback per process, and it must be
//! configured before the library initializes. The first [`Connection`] built
//! installs the callback; every connection then registers its own
//! [`LogSink`] under a [`SinkToken`] and receives engine events formatted as
//! `SQLite code: <N> msg: '<text>'` at `DEBUG`.
//!
//! [`Connection`]: crate::sqlite::Connection

use std::collections::HashMap;
use std::ffi::c_int;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex, OnceLock};

use tracing::Level;

/// Receiver for diagnostic lines produced on behalf of a connection.
///
/// A sink gets its connection's lifecycle lines (open, close, extension
/// bootstrap). It also gets every `SQLite` engine event raised while it is
/// registered. The engine log is process-wide and carries no connection
/// context, so those events may come from any live connection, not only the
/// one that owns the sink.
pub trait LogSink: Send + Sync {
    fn log(&self, level: Level, message: &str);
}

/// Default sink: re-emits every line through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "pointstore_sqlite::engine", "{message}"),
            Level::WARN => tracing::warn!(target: "pointstore_sqlite::engine", "{message}"),
            Level::INFO => tracing::info!(target: "pointstore_sqlite::engine", "{message}"),
            Level::DEBUG => tracing::debug!(target: "pointstore_sqlite::engine", "{message}"),
            _ => tracing::trace!(target: "pointstore_sqlite::engine", "{message}"),
        }
    }
}

/// Handle identifying one registered sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkToken(u64);

type SinkRegistry = LazyLock<Mutex<HashMap<SinkToken, Arc<dyn LogSink>>>>;

static SINKS: SinkRegistry = LazyLock::new(|| Mutex::new(HashMap::new()));
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);
static BRIDGE_ACTIVE: OnceLock<bool> = OnceLock::new();

/// Format one engine event the way it is handed to sinks.
#[must_use]
pub fn format_engine_event(code: c_int, message: &str) -> String {
    format!("SQLite code: {code} msg: '{message}'")
}

fn registry() -> std::sync::MutexGuard<'static, HashMap<SinkToken, Arc<dyn LogSink>>> {
    match SINKS.lock() {
        Ok(guard) => guard,
        // a panicking sink must not take engine logging down with it
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn forward_engine_event(code: c_int, message: &str) {
    let line = format_engine_event(code, message);
    // Snapshot first so a sink that touches SQLite cannot deadlock on the registry.
    let sinks: Vec<Arc<dyn LogSink>> = registry().values().cloned().collect();
    for sink in sinks {
        sink.log(Level::DEBUG, &line);
    }
}

/// Install the engine log callback once per process.
///
/// Returns whether the bridge is active. Installation fails when `SQLite` was
/// already initialized by someone else; that is reported once at `warn` and
/// connections keep working without engine diagnostics.
#[allow(unsafe_code)]
pub fn install_bridge() -> bool {
    *BRIDGE_ACTIVE.get_or_init(|| {
        // SAFETY: runs exactly once, guarded by the OnceLock, before this crate
        // opens any session. SQLite rejects the call with SQLITE_MISUSE rather
        // than misbehaving if it was already initialized elsewhere.
        let callback: fn(c_int, &str) = forward_engine_event;
        match unsafe { rusqlite::trace::config_log(Some(callback)) } {
            Ok(()) => {
                tracing::debug!("sqlite diagnostic bridge installed");
                true
            }
            Err(e) => {
                tracing::warn!("sqlite diagnostic bridge unavailable: {e}");
                false
            }
        }
    })
}

/// Register `sink` to receive engine events until [`unregister`] is called.
pub fn register(sink: Arc<dyn LogSink>) -> SinkToken {
    let token = SinkToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed));
    registry().insert(token, sink);
    token
}

pub fn unregister(token: SinkToken) {
    registry().remove(&token);
}
