use crate::surface::Surface;
use std::collections::VecDeque;

/// Smallest "100%" scale, 2 kByte/s.
pub const SCALE_BASE: u64 = 2 * 1024;

/// History kept before the first layout pass sizes the graph.
pub const DEFAULT_BAR_COUNT: usize = 256;

const FULL: char = '#';
const UPPER_HALF: char = '|';
const LOWER_HALF: char = '.';

/// Rounds a deflection up to `SCALE_BASE * 2^k`.
///
/// If doubling would overflow before reaching `value`, `value` itself is
/// returned.
pub fn round_up_scale(value: u64) -> u64 {
    let mut rounded = SCALE_BASE;
    while rounded < value {
        match rounded.checked_mul(2) {
            Some(doubled) => rounded = doubled,
            None => return value,
        }
    }
    rounded
}

/// Scrolling bar chart of per-second rates, newest sample on the right.
#[derive(Debug, Clone)]
pub struct BarGraph {
    samples: VecDeque<u64>,
    bar_count: usize,
    bar_height: usize,
    max_deflection: u64,
}

impl Default for BarGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl BarGraph {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(DEFAULT_BAR_COUNT),
            bar_count: DEFAULT_BAR_COUNT,
            bar_height: 0,
            max_deflection: SCALE_BASE,
        }
    }

    pub fn update(&mut self, value: u64) {
        self.samples.push_back(value);
        self.trim();
    }

    /// Forgets all samples. The history is empty afterwards, not zero-filled.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn set_bar_count(&mut self, bar_count: usize) {
        self.bar_count = bar_count;
        self.trim();
    }

    pub fn set_bar_height(&mut self, bar_height: usize) {
        self.bar_height = bar_height;
    }

    pub fn set_max_deflection(&mut self, max_deflection: u64) {
        self.max_deflection = max_deflection;
    }

    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    pub fn bar_height(&self) -> usize {
        self.bar_height
    }

    pub fn max_deflection(&self) -> u64 {
        self.max_deflection
    }

    /// Samples from oldest to newest.
    pub fn samples(&self) -> impl Iterator<Item = u64> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest sample in the history, 0 when empty.
    pub fn peak(&self) -> u64 {
        self.samples.iter().copied().max().unwrap_or(0)
    }

    fn trim(&mut self) {
        while self.samples.len() > self.bar_count {
            self.samples.pop_front();
        }
    }

    /// Renders the chart as `bar_height` rows of exactly `bar_count` columns.
    pub fn render_rows(&self) -> Vec<String> {
        let height = self.bar_height;
        let padding = self.bar_count.saturating_sub(self.samples.len());

        (0..height)
            .map(|row| {
                let level = (height - row - 1) as u128;
                let deflection = u128::from(self.max_deflection);
                let lower = deflection * level / height as u128;
                let upper = deflection * (level + 1) / height as u128;

                let mut line = String::with_capacity(self.bar_count);
                line.extend(std::iter::repeat(' ').take(padding));
                line.extend(
                    self.samples
                        .iter()
                        .map(|&value| cell(u128::from(value), lower, upper)),
                );
                line
            })
            .collect()
    }

    pub fn draw(&self, surface: &mut dyn Surface, x: usize, y: usize) {
        for (offset, line) in self.render_rows().iter().enumerate() {
            surface.put(x, y + offset, line);
        }
    }
}

fn cell(value: u128, lower: u128, upper: u128) -> char {
    if upper == 0 {
        return ' ';
    }
    if value >= upper {
        FULL
    } else if value > lower + (upper - lower) / 2 {
        UPPER_HALF
    } else if value > lower {
        LOWER_HALF
    } else {
        ' '
    }
}
