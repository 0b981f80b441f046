//! The resource governor: a companion task that keeps the clock,
//! enforces the wall-time budget and prints periodic progress.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::search::SearchInfo;
use crate::sync::StopFlag;
use crate::uci::report;

/// How often the governor wakes to look at the clock.
const POLL_INTERVAL_MS: u64 = 10;

/// How often a UCI `info` line goes out.
const WRITE_PERIOD_MS: u64 = 500;

/// Run until the stop flag is raised, by anyone.
///
/// Every wake-up refreshes `info`'s elapsed time from a monotonic
/// clock; when a `movetime` budget exists and is exhausted the
/// governor raises the stop flag itself. Progress lines are emitted
/// every `WRITE_PERIOD_MS`, reading the PV under its lock. Time
/// updates and progress lines are produced in non-decreasing time
/// order because a single thread produces them.
pub(crate) fn run(info: Arc<SearchInfo>, timeout_ms: Option<u64>, stop: StopFlag) {
    let start = Instant::now();
    let mut last_write = start;

    while !stop.is_stopped() {
        thread::sleep(Duration::from_millis(POLL_INTERVAL_MS));

        let elapsed = start.elapsed();
        info.set_time_ms(elapsed.as_millis() as u64);

        if let Some(budget) = timeout_ms {
            if elapsed >= Duration::from_millis(budget) {
                stop.stop();
            }
        }

        if last_write.elapsed() >= Duration::from_millis(WRITE_PERIOD_MS) {
            report::print_info(&info);
            last_write = Instant::now();
        }
    }
}
