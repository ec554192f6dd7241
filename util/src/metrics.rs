//! Host metrics collaborator.
//!
//! `MetricsSource` is the boundary the API layer consumes: raw numbers only,
//! no derived percentages. The production implementation samples via
//! `sysinfo`; tests substitute a canned source.

use async_trait::async_trait;
use sysinfo::{CpuRefreshKind, System};

use crate::failure::Failure;

/// Accumulated CPU time for one core, in arbitrary ticks.
///
/// Only the idle/total ratio is meaningful; consumers must guard against
/// `total == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreTimes {
    pub idle: u64,
    pub total: u64,
}

/// Static disk figures, in bytes.
///
/// Real disk probing is out of scope; these placeholder values stand in for
/// a disk collaborator.
#[derive(Debug, Clone, Copy)]
pub struct DiskFigures {
    pub total: u64,
    pub used: u64,
}

/// 500 GiB total, half used. Placeholder until a real disk source exists.
pub fn placeholder_disk() -> DiskFigures {
    const GIB: u64 = 1024 * 1024 * 1024;
    DiskFigures {
        total: 500 * GIB,
        used: 250 * GIB,
    }
}

/// Raw host metrics source. Every method may fail; callers classify.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Per-core accumulated CPU times since the last sampling window.
    async fn cpu_core_times(&self) -> Result<Vec<CoreTimes>, Failure>;

    /// Number of logical cores.
    async fn cores(&self) -> Result<usize, Failure>;

    async fn total_memory_bytes(&self) -> Result<u64, Failure>;

    async fn free_memory_bytes(&self) -> Result<u64, Failure>;

    async fn uptime_seconds(&self) -> Result<u64, Failure>;
}

/// Production metrics source backed by `sysinfo`.
///
/// CPU sampling needs a warm-up interval between refreshes, so every CPU
/// read runs on the blocking pool rather than stalling the runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoMetrics;

/// Tick scale used when converting sysinfo usage percentages into the
/// idle/total representation consumers expect.
const TICKS_PER_SAMPLE: u64 = 1000;

fn sample_core_times() -> Vec<CoreTimes> {
    let mut sys = System::new();
    sys.refresh_cpu_specifics(CpuRefreshKind::everything());
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu_usage();

    sys.cpus()
        .iter()
        .map(|cpu| {
            let usage = cpu.cpu_usage().clamp(0.0, 100.0) as f64;
            let busy = (usage / 100.0 * TICKS_PER_SAMPLE as f64).round() as u64;
            CoreTimes {
                idle: TICKS_PER_SAMPLE.saturating_sub(busy),
                total: TICKS_PER_SAMPLE,
            }
        })
        .collect()
}

#[async_trait]
impl MetricsSource for SysinfoMetrics {
    async fn cpu_core_times(&self) -> Result<Vec<CoreTimes>, Failure> {
        let times = tokio::task::spawn_blocking(sample_core_times).await?;
        Ok(times)
    }

    async fn cores(&self) -> Result<usize, Failure> {
        let count = tokio::task::spawn_blocking(|| {
            let mut sys = System::new();
            sys.refresh_cpu_usage();
            sys.cpus().len()
        })
        .await?;
        Ok(count.max(1))
    }

    async fn total_memory_bytes(&self) -> Result<u64, Failure> {
        let mut sys = System::new();
        sys.refresh_memory();
        Ok(sys.total_memory())
    }

    async fn free_memory_bytes(&self) -> Result<u64, Failure> {
        let mut sys = System::new();
        sys.refresh_memory();
        Ok(sys.free_memory())
    }

    async fn uptime_seconds(&self) -> Result<u64, Failure> {
        Ok(System::uptime())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_disk_is_half_used() {
        let disk = placeholder_disk();
        assert_eq!(disk.used * 2, disk.total);
    }

    #[tokio::test]
    async fn sysinfo_source_reports_at_least_one_core() {
        let source = SysinfoMetrics;
        let cores = source.cores().await.unwrap();
        assert!(cores >= 1);
    }

    #[tokio::test]
    async fn core_times_never_exceed_the_sample_window() {
        let times = tokio::task::spawn_blocking(sample_core_times).await.unwrap();
        for t in times {
            assert!(t.idle <= t.total);
            assert_eq!(t.total, TICKS_PER_SAMPLE);
        }
    }
}
