use crate::error::Result;
use crate::models::{ByteCounters, NetworkRate, RateSample};
use crate::utils::file::read_counter;
use chrono::{DateTime, Utc};
use log::debug;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Something that can report the current byte counters of an interface.
pub trait CounterSource {
    fn read_counters(&self) -> impl Future<Output = Result<ByteCounters>> + Send;
}

/// Counters exposed under `/sys/class/net/<iface>/statistics`.
#[derive(Debug, Clone)]
pub struct SysfsCounters {
    rx_path: PathBuf,
    tx_path: PathBuf,
}

impl SysfsCounters {
    pub fn new(sysfs_root: &Path, interface: &str) -> Self {
        let statistics = sysfs_root.join(interface).join("statistics");
        Self {
            rx_path: statistics.join("rx_bytes"),
            tx_path: statistics.join("tx_bytes"),
        }
    }

    pub fn rx_path(&self) -> &Path {
        &self.rx_path
    }

    pub fn tx_path(&self) -> &Path {
        &self.tx_path
    }
}

impl CounterSource for SysfsCounters {
    async fn read_counters(&self) -> Result<ByteCounters> {
        let received = read_counter(&self.rx_path).await?;
        let transmitted = read_counter(&self.tx_path).await?;
        Ok(ByteCounters {
            received,
            transmitted,
        })
    }
}

/// Take the starting baseline.
pub async fn initial_sample<S: CounterSource>(source: &S) -> Result<RateSample> {
    let counters = source.read_counters().await?;
    Ok(RateSample::new(Utc::now(), counters))
}

/// Read the counters now and derive the rate since `last`, which is replaced
/// by the fresh reading.
pub async fn collect_rate<S: CounterSource>(source: &S, last: &mut RateSample) -> Result<NetworkRate> {
    let start = Instant::now();
    let now = Utc::now();
    let counters = source.read_counters().await?;
    let rate = calculate_rate(last, now, counters);
    debug!("collect_rate took: {} ms", start.elapsed().as_millis());
    Ok(rate)
}

/// Megabits per second between `last` and the reading taken at `now`.
///
/// A non-positive elapsed time yields zero for both directions. `last` is
/// overwritten in every case.
pub fn calculate_rate(last: &mut RateSample, now: DateTime<Utc>, counters: ByteCounters) -> NetworkRate {
    let rate = match (now - last.timestamp).to_std() {
        Ok(elapsed) if !elapsed.is_zero() => {
            let seconds = elapsed.as_secs_f64();
            NetworkRate {
                recv_mbps: to_megabits(counter_delta(counters.received, last.received) / seconds),
                sent_mbps: to_megabits(counter_delta(counters.transmitted, last.transmitted) / seconds),
            }
        }
        _ => NetworkRate::default(),
    };

    *last = RateSample::new(now, counters);
    rate
}

/// Signed difference; a counter that went backwards gives a negative delta.
fn counter_delta(current: u64, previous: u64) -> f64 {
    (i128::from(current) - i128::from(previous)) as f64
}

fn to_megabits(bytes_per_second: f64) -> f64 {
    bytes_per_second * 8.0 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::fs;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    fn sample(seconds: i64, received: u64, transmitted: u64) -> RateSample {
        RateSample::new(
            at(seconds),
            ByteCounters {
                received,
                transmitted,
            },
        )
    }

    #[test]
    fn test_rate_one_second() {
        let mut last = sample(0, 1_000, 5_000);
        let rate = calculate_rate(
            &mut last,
            at(1),
            ByteCounters {
                received: 126_000,
                transmitted: 5_000,
            },
        );
        assert_eq!(rate.recv_mbps, 1.0);
        assert_eq!(rate.sent_mbps, 0.0);
        assert_eq!(rate.to_string(), "R: 1.00 T: 0.00 (Mbit/s)");
    }

    #[test]
    fn test_rate_fractional_elapsed() {
        let mut last = sample(0, 0, 0);
        let now = at(0) + Duration::milliseconds(500);
        let rate = calculate_rate(
            &mut last,
            now,
            ByteCounters {
                received: 250_000,
                transmitted: 1_250_000,
            },
        );
        assert!((rate.recv_mbps - 4.0).abs() < 1e-9);
        assert!((rate.sent_mbps - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed_reports_zero() {
        let mut last = sample(5, 0, 0);
        let counters = ByteCounters {
            received: 10_000_000,
            transmitted: 3_000,
        };
        let rate = calculate_rate(&mut last, at(5), counters);
        assert_eq!(rate, NetworkRate::default());
        assert_eq!(last, RateSample::new(at(5), counters));
    }

    #[test]
    fn test_clock_going_backwards_reports_zero_and_rebases() {
        let mut last = sample(10, 100, 100);
        let counters = ByteCounters {
            received: 900,
            transmitted: 900,
        };
        let rate = calculate_rate(&mut last, at(3), counters);
        assert_eq!(rate.recv_mbps, 0.0);
        assert_eq!(rate.sent_mbps, 0.0);
        assert_eq!(last.timestamp, at(3));
        assert_eq!(last.received, 900);
    }

    #[test]
    fn test_counter_reset_gives_negative_rate() {
        let mut last = sample(0, 1_000_000, 0);
        let rate = calculate_rate(
            &mut last,
            at(2),
            ByteCounters {
                received: 0,
                transmitted: 0,
            },
        );
        assert_eq!(rate.recv_mbps, -4.0);
        assert_eq!(rate.sent_mbps, 0.0);
    }

    #[test]
    fn test_consecutive_calls_use_previous_reading() {
        let mut last = sample(0, 0, 0);
        calculate_rate(
            &mut last,
            at(1),
            ByteCounters {
                received: 125_000,
                transmitted: 0,
            },
        );
        let rate = calculate_rate(
            &mut last,
            at(2),
            ByteCounters {
                received: 125_000,
                transmitted: 250_000,
            },
        );
        assert_eq!(rate.recv_mbps, 0.0);
        assert_eq!(rate.sent_mbps, 2.0);
    }

    fn fake_sysfs(rx: &str, tx: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let statistics = dir.path().join("eth9").join("statistics");
        fs::create_dir_all(&statistics).unwrap();
        fs::write(statistics.join("rx_bytes"), rx).unwrap();
        fs::write(statistics.join("tx_bytes"), tx).unwrap();
        dir
    }

    #[test]
    fn test_sysfs_paths() {
        let counters = SysfsCounters::new(Path::new("/sys/class/net"), "enp3s0");
        assert_eq!(counters.rx_path(), Path::new("/sys/class/net/enp3s0/statistics/rx_bytes"));
        assert_eq!(counters.tx_path(), Path::new("/sys/class/net/enp3s0/statistics/tx_bytes"));
    }

    #[tokio::test]
    async fn test_sysfs_read_counters() {
        let dir = fake_sysfs("42\n", "7\n");
        let counters = SysfsCounters::new(dir.path(), "eth9");

        let read = counters.read_counters().await.unwrap();
        assert_eq!(
            read,
            ByteCounters {
                received: 42,
                transmitted: 7,
            }
        );
    }

    #[tokio::test]
    async fn test_sysfs_missing_interface() {
        let dir = fake_sysfs("1\n", "1\n");
        let counters = SysfsCounters::new(dir.path(), "wlan0");

        assert!(counters.read_counters().await.is_err());
        assert!(initial_sample(&counters).await.is_err());
    }

    #[tokio::test]
    async fn test_collect_rate_updates_baseline() {
        let dir = fake_sysfs("5000\n", "6000\n");
        let counters = SysfsCounters::new(dir.path(), "eth9");

        let mut last = sample(0, 1000, 1000);
        let rate = collect_rate(&counters, &mut last).await.unwrap();
        assert!(rate.recv_mbps >= 0.0);
        assert_eq!(last.received, 5000);
        assert_eq!(last.transmitted, 6000);
        assert!(last.timestamp > at(0));
    }
}
