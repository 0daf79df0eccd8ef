//! Runtime control over the installed level filter

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::reload;
use wrp_core::{LogLevel, WrpError, WrpResult};

type FilterHandle = reload::Handle<LevelFilter, Registry>;

struct Installed {
    filter: FilterHandle,
    level: LogLevel,
}

/// Changes the level of a subscriber installed by this crate
///
/// Remembers the level last applied so callers can read it back.
pub struct ReloadHandle {
    installed: Mutex<Option<Installed>>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self {
            installed: Mutex::new(None),
        }
    }

    /// The handle attached to the global subscriber
    pub fn global() -> &'static ReloadHandle {
        static GLOBAL: OnceCell<ReloadHandle> = OnceCell::new();
        GLOBAL.get_or_init(ReloadHandle::new)
    }

    /// Attach the filter of a freshly installed subscriber running at `level`
    pub(crate) fn attach(&self, filter: FilterHandle, level: LogLevel) {
        *self.installed.lock() = Some(Installed { filter, level });
    }

    /// Whether a subscriber has been attached
    pub fn is_initialized(&self) -> bool {
        self.installed.lock().is_some()
    }

    /// The level currently applied, or `None` before a subscriber is attached
    pub fn level(&self) -> Option<LogLevel> {
        self.installed.lock().as_ref().map(|installed| installed.level)
    }

    /// Switch the attached subscriber to `level`
    ///
    /// On failure the previously applied level is kept.
    pub fn reload_level(&self, level: LogLevel) -> WrpResult<()> {
        let mut guard = self.installed.lock();
        let installed = guard
            .as_mut()
            .ok_or_else(|| WrpError::Internal("no subscriber attached".to_string()))?;
        installed
            .filter
            .reload(level_filter(level))
            .map_err(|e| WrpError::Internal(format!("failed to reload level filter: {e}")))?;
        let previous = std::mem::replace(&mut installed.level, level);
        drop(guard);

        tracing::debug!(%previous, %level, "log level changed");
        Ok(())
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}
