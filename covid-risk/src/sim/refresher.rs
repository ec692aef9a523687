use crate::{error::Result, params::REFRESH_INTERVAL_SECS};
use getset::CopyGetters;
use log::*;
use std::{thread, time::Duration};

/// Re-run a task on a fixed interval, like the auto-refresh of the web form.
///
/// The task receives the tick number. Each tick is independent from the
/// previous ones: the refresher owns no simulation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Refresher {
    interval: Duration,
    /// Stop after this many ticks. Runs forever if None.
    ticks: Option<usize>,
}

impl Refresher {
    pub fn new(interval: Duration, ticks: Option<usize>) -> Self {
        Refresher { interval, ticks }
    }

    /// Run task until the number of ticks is exhausted or the task fails.
    pub fn run<F>(&self, mut task: F) -> Result<usize>
    where
        F: FnMut(usize) -> Result<()>,
    {
        let mut n = 0;
        loop {
            task(n)?;
            n += 1;
            if self.ticks.map_or(false, |max| n >= max) {
                return Ok(n);
            }
            debug!("refresh: sleeping {:?} before tick {}", self.interval, n);
            thread::sleep(self.interval);
        }
    }
}

impl Default for Refresher {
    fn default() -> Self {
        Refresher::new(Duration::from_secs(REFRESH_INTERVAL_SECS), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn stops_after_ticks() {
        let mut seen = vec![];
        let refresher = Refresher::new(Duration::from_millis(0), Some(3));
        let n = refresher
            .run(|i| {
                seen.push(i);
                Ok(())
            })
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn stops_on_failure() {
        let refresher = Refresher::new(Duration::from_millis(0), None);
        let res = refresher.run(|i| {
            if i == 2 {
                Err(Error::computation(0.0, "boom"))
            } else {
                Ok(())
            }
        });
        assert!(res.is_err());
    }

    #[test]
    fn default_interval_is_five_minutes() {
        assert_eq!(Refresher::default().interval(), Duration::from_secs(300));
    }
}
