use crate::device::{CounterSample, TrafficSnapshot};
use std::collections::VecDeque;
use std::time::Duration;

/// One value per traffic direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Both {
    inbound: u64,
    outbound: u64,
}

/// Turns successive interface counters into rates.
#[derive(Debug)]
pub struct TrafficStatistics {
    history: VecDeque<CounterSample>,
    window: Duration,

    current: Both,
    average: Both,
    min: Option<Both>,
    max: Both,
    total: Both,

    // The first measured rate covers an unknown interval, keep it out of min/max
    rates_seen: usize,
}

impl TrafficStatistics {
    pub fn new(window: Duration) -> Self {
        Self {
            history: VecDeque::new(),
            window,
            current: Both::default(),
            average: Both::default(),
            min: None,
            max: Both::default(),
            total: Both::default(),
            rates_seen: 0,
        }
    }

    pub fn add_sample(&mut self, sample: CounterSample) {
        self.total = Both {
            inbound: sample.bytes_in,
            outbound: sample.bytes_out,
        };

        if let Some(previous) = self.history.back() {
            let elapsed = sample
                .timestamp
                .duration_since(previous.timestamp)
                .unwrap_or_default()
                .as_secs_f64();

            if elapsed > 0.0 {
                self.current = Both {
                    inbound: per_second(counter_delta(sample.bytes_in, previous.bytes_in), elapsed),
                    outbound: per_second(
                        counter_delta(sample.bytes_out, previous.bytes_out),
                        elapsed,
                    ),
                };
                self.rates_seen += 1;
                if self.rates_seen > 1 {
                    self.track_extremes();
                }
            }
        }

        self.history.push_back(sample);
        self.expire();
        self.average = self.window_average();
    }

    fn track_extremes(&mut self) {
        let current = self.current;
        let min = self.min.get_or_insert(current);
        min.inbound = min.inbound.min(current.inbound);
        min.outbound = min.outbound.min(current.outbound);
        self.max.inbound = self.max.inbound.max(current.inbound);
        self.max.outbound = self.max.outbound.max(current.outbound);
    }

    fn expire(&mut self) {
        let Some(latest) = self.history.back().map(|s| s.timestamp) else {
            return;
        };
        let Some(cutoff) = latest.checked_sub(self.window) else {
            return;
        };
        while self
            .history
            .front()
            .is_some_and(|oldest| oldest.timestamp < cutoff)
        {
            self.history.pop_front();
        }
    }

    fn window_average(&self) -> Both {
        let (Some(first), Some(last)) = (self.history.front(), self.history.back()) else {
            return self.average;
        };
        let span = last
            .timestamp
            .duration_since(first.timestamp)
            .unwrap_or_default()
            .as_secs_f64();
        if span <= 0.0 {
            return self.average;
        }

        Both {
            inbound: per_second(counter_delta(last.bytes_in, first.bytes_in), span),
            outbound: per_second(counter_delta(last.bytes_out, first.bytes_out), span),
        }
    }

    pub fn snapshot(&self) -> TrafficSnapshot {
        let min = self.min.unwrap_or_default();
        TrafficSnapshot {
            current_in: self.current.inbound,
            current_out: self.current.outbound,
            avg_in: self.average.inbound,
            avg_out: self.average.outbound,
            min_in: min.inbound,
            min_out: min.outbound,
            max_in: self.max.inbound,
            max_out: self.max.outbound,
            total_in: self.total.inbound,
            total_out: self.total.outbound,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.history.len()
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.window);
    }
}

/// Difference between two counter readings, allowing for wrap-around.
fn counter_delta(current: u64, previous: u64) -> u64 {
    if current >= previous {
        return current - previous;
    }

    // Counter wrapped. 32-bit counters are common, prefer that reading when
    // it gives a plausible delta.
    let wrapped_32 = u64::from(u32::MAX)
        .wrapping_sub(previous)
        .wrapping_add(current)
        .wrapping_add(1);
    let wrapped_64 = (u64::MAX - previous).wrapping_add(current).wrapping_add(1);
    if previous <= u64::from(u32::MAX) && wrapped_32 < wrapped_64 / 1000 {
        wrapped_32
    } else {
        wrapped_64
    }
}

fn per_second(bytes: u64, seconds: f64) -> u64 {
    (bytes as f64 / seconds) as u64
}
