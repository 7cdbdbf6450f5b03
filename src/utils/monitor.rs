use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Timing and memory for one phase of an analysis run.
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub phase_time: Duration,
    pub memory_mb: u64,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: System,
    last_mark: Instant,
    peak_memory_mb: u64,
    phases: Vec<PhaseStats>,
}

/// Records elapsed time and resident memory between the phases of a run
/// (load, analyze, publish). Disabled monitors record nothing.
#[cfg(feature = "cli")]
pub struct RunMonitor {
    state: Option<Mutex<MonitorState>>,
    pid: Option<Pid>,
    start_time: Instant,
}

#[cfg(feature = "cli")]
impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let start_time = Instant::now();
        let pid = sysinfo::get_current_pid().ok();

        // Without a pid there is nothing to sample.
        let state = if enabled && pid.is_some() {
            Some(Mutex::new(MonitorState {
                system: System::new(),
                last_mark: start_time,
                peak_memory_mb: 0,
                phases: Vec::new(),
            }))
        } else {
            None
        };

        Self {
            state,
            pid,
            start_time,
        }
    }

    /// Closes the current phase and logs its stats.
    pub fn mark(&self, phase: &str) -> Option<PhaseStats> {
        let state = self.state.as_ref()?;
        let pid = self.pid?;
        let mut state = state.lock().ok()?;

        state.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        let memory_mb = state
            .system
            .process(pid)
            .map(|process| process.memory() / 1024 / 1024)
            .unwrap_or(0);

        if memory_mb > state.peak_memory_mb {
            state.peak_memory_mb = memory_mb;
        }

        let now = Instant::now();
        let stats = PhaseStats {
            phase: phase.to_string(),
            phase_time: now.duration_since(state.last_mark),
            memory_mb,
        };
        state.last_mark = now;
        state.phases.push(stats.clone());

        tracing::info!(
            "📊 {} - Memory: {}MB, Peak: {}MB, Phase time: {:?}",
            stats.phase,
            stats.memory_mb,
            state.peak_memory_mb,
            stats.phase_time
        );

        Some(stats)
    }

    pub fn log_final_stats(&self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        if let Ok(state) = state.lock() {
            tracing::info!(
                "📊 Final Stats - Phases: {}, Total Time: {:?}, Peak Memory: {}MB",
                state.phases.len(),
                self.start_time.elapsed(),
                state.peak_memory_mb
            );
        }
    }

    pub fn phases(&self) -> Vec<PhaseStats> {
        self.state
            .as_ref()
            .and_then(|state| state.lock().ok().map(|s| s.phases.clone()))
            .unwrap_or_default()
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }
}

#[cfg(feature = "cli")]
impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// No-op stand-in when sysinfo is not compiled in
#[cfg(not(feature = "cli"))]
pub struct RunMonitor {
    start_time: Instant,
}

#[cfg(not(feature = "cli"))]
impl RunMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn mark(&self, _phase: &str) -> Option<PhaseStats> {
        None
    }

    pub fn log_final_stats(&self) {
        tracing::debug!("Run finished in {:?}", self.start_time.elapsed());
    }

    pub fn phases(&self) -> Vec<PhaseStats> {
        Vec::new()
    }

    pub fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(not(feature = "cli"))]
impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
