use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[derive(Debug, Clone)]
pub struct SystemStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub memory_usage_percent: f32,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

/// 執行時間量測，並在啟用時記錄行程資源使用量
pub struct SystemMonitor {
    start_time: Instant,
    #[cfg(feature = "cli")]
    probe: Option<ProcessProbe>,
}

#[cfg(feature = "cli")]
struct ProcessProbe {
    system: Mutex<System>,
    pid: Pid,
    peak_memory: Mutex<u64>,
}

impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        Self::started_at(Instant::now(), enabled)
    }

    /// 從既有的起始時間開始計時，例如行程啟動的時間
    #[cfg_attr(not(feature = "cli"), allow(unused_variables))]
    pub fn started_at(start_time: Instant, enabled: bool) -> Self {
        Self {
            start_time,
            #[cfg(feature = "cli")]
            probe: if enabled { ProcessProbe::new() } else { None },
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 經過秒數，四捨五入到小數第二位
    pub fn elapsed_seconds(&self) -> f64 {
        round_seconds(self.elapsed())
    }

    #[cfg(feature = "cli")]
    pub fn get_stats(&self) -> Option<SystemStats> {
        let probe = self.probe.as_ref()?;
        let mut system = probe.system.lock().ok()?;
        system.refresh_all();

        let process = system.process(probe.pid)?;
        let memory_mb = process.memory() / 1024 / 1024;
        let total_memory = system.total_memory() / 1024 / 1024;
        let memory_percent = if total_memory > 0 {
            (memory_mb as f32 / total_memory as f32) * 100.0
        } else {
            0.0
        };

        let mut peak = probe.peak_memory.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }

        Some(SystemStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            memory_usage_percent: memory_percent,
            peak_memory_mb: *peak,
            elapsed_time: self.elapsed(),
        })
    }

    #[cfg(not(feature = "cli"))]
    pub fn get_stats(&self) -> Option<SystemStats> {
        None
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB ({:.1}%), Peak: {}MB, Time: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.memory_usage_percent,
                stats.peak_memory_mb,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        match self.get_stats() {
            Some(stats) => tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            ),
            None => tracing::debug!("Total time: {:?}", self.elapsed()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "cli")]
        {
            self.probe.is_some()
        }
        #[cfg(not(feature = "cli"))]
        {
            false
        }
    }
}

#[cfg(feature = "cli")]
impl ProcessProbe {
    fn new() -> Option<Self> {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                tracing::warn!("System monitoring unavailable: {}", e);
                return None;
            }
        };

        let mut system = System::new_with_specifics(RefreshKind::everything());
        system.refresh_all();

        Some(Self {
            system: Mutex::new(system),
            pid,
            peak_memory: Mutex::new(0),
        })
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

pub fn round_seconds(duration: Duration) -> f64 {
    (duration.as_secs_f64() * 100.0).round() / 100.0
}

/// Always keeps a decimal point: `1.0`, `12.34`.
pub fn format_seconds(seconds: f64) -> String {
    format!("{:?}", seconds)
}
