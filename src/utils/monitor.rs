use serde::Serialize;
use std::time::Duration;
#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

/// 一個階段 (載入、計算、輸出) 結束時的紀錄
#[derive(Debug, Clone, Serialize)]
pub struct PhaseStats {
    pub phase: String,
    /// 這個階段處理的命盤數
    pub charts: usize,
    pub phase_time: Duration,
    /// 從監控開始累計
    pub elapsed_time: Duration,
    /// 取不到行程資訊時為 None
    pub cpu_usage: Option<f32>,
    pub memory_usage_mb: Option<u64>,
    pub peak_memory_mb: u64,
}

impl PhaseStats {
    pub fn charts_per_second(&self) -> f64 {
        let secs = self.phase_time.as_secs_f64();
        if secs > 0.0 {
            self.charts as f64 / secs
        } else {
            0.0
        }
    }
}

#[cfg(feature = "cli")]
struct PhaseLog {
    last_mark: Instant,
    peak_memory_mb: u64,
    phases: Vec<PhaseStats>,
}

/// 分階段記錄批次計算的耗時與行程資源
#[cfg(feature = "cli")]
pub struct ProcessMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    started: Instant,
    log: Mutex<PhaseLog>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl ProcessMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            system: Mutex::new(System::new()),
            pid: sysinfo::get_current_pid().ok(),
            started: now,
            log: Mutex::new(PhaseLog {
                last_mark: now,
                peak_memory_mb: 0,
                phases: Vec::new(),
            }),
            enabled,
        }
    }

    /// 只更新本行程，回傳 (CPU %, 記憶體 MB)
    fn sample(&self) -> Option<(f32, u64)> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let process = system.process(pid)?;
        Some((process.cpu_usage(), process.memory() / 1024 / 1024))
    }

    /// 結束一個階段: 記錄自上一個階段以來的耗時與目前的資源使用
    pub fn record_phase(&self, phase: &str, charts: usize) -> Option<PhaseStats> {
        if !self.enabled {
            return None;
        }

        let sample = self.sample();
        let mut log = self.log.lock().ok()?;
        let now = Instant::now();
        if let Some((_, memory)) = sample {
            log.peak_memory_mb = log.peak_memory_mb.max(memory);
        }

        let stats = PhaseStats {
            phase: phase.to_string(),
            charts,
            phase_time: now.duration_since(log.last_mark),
            elapsed_time: now.duration_since(self.started),
            cpu_usage: sample.map(|(cpu, _)| cpu),
            memory_usage_mb: sample.map(|(_, memory)| memory),
            peak_memory_mb: log.peak_memory_mb,
        };
        log.last_mark = now;
        log.phases.push(stats.clone());

        tracing::info!(
            phase,
            charts,
            "📊 {} - {:?} ({:.1} charts/s), CPU: {}, Memory: {}MB, Peak: {}MB",
            phase,
            stats.phase_time,
            stats.charts_per_second(),
            stats
                .cpu_usage
                .map(|c| format!("{:.1}%", c))
                .unwrap_or_else(|| "n/a".to_string()),
            stats.memory_usage_mb.unwrap_or(0),
            stats.peak_memory_mb
        );
        Some(stats)
    }

    pub fn phases(&self) -> Vec<PhaseStats> {
        self.log
            .lock()
            .map(|log| log.phases.clone())
            .unwrap_or_default()
    }

    pub fn log_summary(&self) {
        let phases = self.phases();
        if phases.is_empty() {
            return;
        }
        let breakdown: Vec<String> = phases
            .iter()
            .map(|p| format!("{} {:?}", p.phase, p.phase_time))
            .collect();
        let peak = phases.iter().map(|p| p.peak_memory_mb).max().unwrap_or(0);
        tracing::info!(
            "⏱️ Total {:?} ({}), peak memory {}MB",
            self.started.elapsed(),
            breakdown.join(", "),
            peak
        );
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for ProcessMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 環境的空實作
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct ProcessMonitor;

#[cfg(not(feature = "cli"))]
impl ProcessMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn record_phase(&self, _phase: &str, _charts: usize) -> Option<PhaseStats> {
        None
    }

    pub fn phases(&self) -> Vec<PhaseStats> {
        Vec::new()
    }

    pub fn log_summary(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
