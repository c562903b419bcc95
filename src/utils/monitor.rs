#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

/// Samples CPU and memory for the current process at each pipeline stage.
///
/// Disabled monitors are inert so callers never branch on the flag.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    inner: Option<Mutex<MonitorState>>,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: System,
    pid: Pid,
    started: Instant,
    peak_memory_mb: u64,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self { inner: None };
        }

        let Ok(pid) = sysinfo::get_current_pid() else {
            tracing::warn!("Could not resolve current PID, monitoring disabled");
            return Self { inner: None };
        };

        let mut system = System::new_with_specifics(RefreshKind::everything());
        system.refresh_all();

        Self {
            inner: Some(Mutex::new(MonitorState {
                system,
                pid,
                started: Instant::now(),
                peak_memory_mb: 0,
            })),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Takes one sample and logs it, tagged with the stage name.
    pub fn sample(&self, stage: &str) {
        let Some(inner) = &self.inner else { return };
        let Ok(mut state) = inner.lock() else { return };

        state.system.refresh_all();
        let Some(process) = state.system.process(state.pid) else {
            return;
        };

        let cpu_usage = process.cpu_usage();
        let memory_mb = process.memory() / 1024 / 1024;
        let elapsed = state.started.elapsed();
        if memory_mb > state.peak_memory_mb {
            state.peak_memory_mb = memory_mb;
        }

        tracing::info!(
            "📊 {} - CPU: {:.1}%, Memory: {}MB, Time: {:?}",
            stage,
            cpu_usage,
            memory_mb,
            elapsed
        );
    }

    pub fn log_final_stats(&self) {
        let Some(inner) = &self.inner else { return };
        let Ok(state) = inner.lock() else { return };
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
            state.started.elapsed(),
            state.peak_memory_mb
        );
    }
}

// 為非CLI環境提供空實現
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn sample(&self, _stage: &str) {}

    pub fn log_final_stats(&self) {}
}
