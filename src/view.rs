//! Traffic view of a single device.
//!
//! Each refresh tick the owner calls [`DeviceView::update`] and then
//! [`DeviceView::render`]. Rendering picks one of four layouts depending on
//! the device state, the terminal size and the configuration:
//!
//! - device missing: a notice line and a divider,
//! - terminal too small: a single advisory line,
//! - combined view: incoming and outgoing stats side by side, no graphs,
//! - full view: one graph + stats region per direction, the outgoing region
//!   being dropped when there is no room for it.

use crate::config::{LayoutParams, ViewConfig, MIN_ANCHOR_ROWS};
use crate::device::{StatisticsSource, TrafficSnapshot};
use crate::format::{format_rate, format_rate_with_unit, format_scale, format_volume};
use crate::glyph::{self, GLYPH_ROWS};
use crate::graph::{round_up_scale, BarGraph};
use crate::surface::Surface;
use crate::units::DataUnit;
use tracing::{debug, trace};

pub const MIN_WIDTH: usize = 25;
pub const MIN_HEIGHT: usize = 8;

/// Regions with this many rows or fewer are not drawn.
const MIN_REGION_ROWS: usize = 5;

const ENLARGE_NOTICE: &str = "Please enlarge console for viewing device information.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficDirection {
    Incoming,
    Outgoing,
}

impl TrafficDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Incoming => "Incoming",
            Self::Outgoing => "Outgoing",
        }
    }
}

/// The five stat lines of one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatBlock {
    /// Current rate without unit, shown in the big-digit readout.
    pub readout: String,
    /// Cur, Avg, Min, Max and Ttl lines.
    pub lines: [String; 5],
}

impl StatBlock {
    pub fn new(snapshot: &TrafficSnapshot, direction: TrafficDirection, unit: DataUnit) -> Self {
        let (current, average, min, max, total) = match direction {
            TrafficDirection::Incoming => (
                snapshot.current_in,
                snapshot.avg_in,
                snapshot.min_in,
                snapshot.max_in,
                snapshot.total_in,
            ),
            TrafficDirection::Outgoing => (
                snapshot.current_out,
                snapshot.avg_out,
                snapshot.min_out,
                snapshot.max_out,
                snapshot.total_out,
            ),
        };

        Self {
            readout: format_rate(current),
            lines: [
                format!("Cur: {}", format_rate_with_unit(current)),
                format!("Avg: {}", format_rate_with_unit(average)),
                format!("Min: {}", format_rate_with_unit(min)),
                format!("Max: {}", format_rate_with_unit(max)),
                format!("Ttl: {}", format_volume(total, 2, unit)),
            ],
        }
    }

    pub fn longest_line(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Plain five-line rendition starting at `(x, y)`.
    fn draw_plain(&self, surface: &mut dyn Surface, x: usize, y: usize) {
        for (offset, line) in self.lines.iter().enumerate() {
            surface.put(x, y + offset, line);
        }
    }

    /// Draws the block with the current rate as big digits.
    ///
    /// The readout occupies the [`GLYPH_ROWS`] rows ending at `nominal` and
    /// the remaining lines follow below it. The readout may share the
    /// region's header row only when the header ends left of `x`; otherwise
    /// the plain rendition is used.
    fn draw_with_readout(
        &self,
        surface: &mut dyn Surface,
        x: usize,
        nominal: usize,
        header: (usize, usize),
    ) {
        let (header_row, header_width) = header;
        match nominal
            .checked_sub(GLYPH_ROWS - 1)
            .filter(|&top| top > header_row || (top == header_row && header_width < x))
        {
            Some(top) => {
                glyph::draw(surface, x, top, &glyph::truncate_readout(&self.readout));
                for (offset, line) in self.lines[1..].iter().enumerate() {
                    surface.put(x, top + GLYPH_ROWS + offset, line);
                }
            }
            None => self.draw_plain(surface, x, nominal),
        }
    }
}

/// Rows assigned to one direction in the full layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: usize,
    pub rows: usize,
}

impl Region {
    fn is_drawable(&self) -> bool {
        self.rows > MIN_REGION_ROWS
    }
}

/// Splits the rows from `top` to `height` between the two directions.
///
/// Incoming gets the larger half. An outgoing region that would not be
/// drawable is folded into the incoming one.
pub fn split_rows(top: usize, height: usize) -> (Region, Region) {
    let lines = height.saturating_sub(top);
    let lines_in = (lines + 1) / 2;
    let lines_out = lines - lines_in;

    if lines_out <= MIN_REGION_ROWS {
        (
            Region { top, rows: lines },
            Region {
                top: height,
                rows: 0,
            },
        )
    } else {
        (
            Region {
                top,
                rows: lines_in,
            },
            Region {
                top: top + lines_in,
                rows: lines_out,
            },
        )
    }
}

/// Column where the stats column starts.
///
/// Normally at `stats_column_ratio` of the width; right-justified when the
/// longest line would not fit there.
pub fn stats_column(width: usize, longest: usize, layout: &LayoutParams) -> usize {
    let x = (width as f64 * layout.stats_column_ratio) as usize;
    if x + longest >= width {
        width.saturating_sub(longest + 1)
    } else {
        x
    }
}

pub struct DeviceView<D> {
    device: D,
    device_number: usize,
    total_devices: usize,
    graph_in: BarGraph,
    graph_out: BarGraph,
}

impl<D: StatisticsSource> DeviceView<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            device_number: 0,
            total_devices: 0,
            graph_in: BarGraph::new(),
            graph_out: BarGraph::new(),
        }
    }

    /// Zero-based position of the device in the monitored list, display only.
    pub fn set_device_number(&mut self, device_number: usize) {
        self.device_number = device_number;
    }

    /// Number of monitored devices, display only.
    pub fn set_total_devices(&mut self, total_devices: usize) {
        self.total_devices = total_devices;
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn graph_in(&self) -> &BarGraph {
        &self.graph_in
    }

    pub fn graph_out(&self) -> &BarGraph {
        &self.graph_out
    }

    fn graph_mut(&mut self, direction: TrafficDirection) -> &mut BarGraph {
        match direction {
            TrafficDirection::Incoming => &mut self.graph_in,
            TrafficDirection::Outgoing => &mut self.graph_out,
        }
    }

    /// Feeds the current rates to the graphs, or empties them when the
    /// device is gone.
    pub fn update(&mut self) {
        if self.device.exists() {
            let snapshot = self.device.snapshot();
            self.graph_in.update(snapshot.current_in);
            self.graph_out.update(snapshot.current_out);
        } else {
            if !self.graph_in.is_empty() || !self.graph_out.is_empty() {
                debug!(device = self.device.name(), "device gone, clearing graphs");
            }
            self.graph_in.reset();
            self.graph_out.reset();
        }
    }

    pub fn render(&mut self, surface: &mut dyn Surface, config: &ViewConfig) {
        let width = surface.width();
        let height = surface.height();

        if height > 2 && !self.render_header(surface) {
            return;
        }

        if width < MIN_WIDTH || height < MIN_HEIGHT {
            debug!(width, height, "terminal too small for device view");
            if surface.cursor_row() < height {
                surface.put_line(ENLARGE_NOTICE);
            }
            return;
        }

        let snapshot = self.device.snapshot();
        let unit = config.get_data_unit();
        let block_in = StatBlock::new(&snapshot, TrafficDirection::Incoming, unit);
        let block_out = StatBlock::new(&snapshot, TrafficDirection::Outgoing, unit);
        let longest = block_in.longest_line().max(block_out.longest_line());

        if config.combined_view() {
            Self::render_combined(surface, &block_in, &block_out);
        } else {
            self.render_full(surface, config, [block_in, block_out], longest);
        }
    }

    /// Prints the device line and divider. Returns `false` when the device
    /// does not exist and nothing else should be drawn.
    fn render_header(&self, surface: &mut dyn Surface) -> bool {
        let name = self.device.name();
        let position = format!("({}/{})", self.device_number + 1, self.total_devices);
        let divider = "=".repeat(surface.width());

        if !self.device.exists() {
            surface.put_line(&format!("Device {name} {position}: does not exist"));
            surface.put_line(&divider);
            return false;
        }

        let title = match self.device.address() {
            Some(address) if !address.is_empty() => {
                format!("Device {name} [{address}] {position}:")
            }
            _ => format!("Device {name} {position}:"),
        };
        surface.put_line(&title);
        surface.put_line(&divider);
        true
    }

    fn render_combined(surface: &mut dyn Surface, block_in: &StatBlock, block_out: &StatBlock) {
        let row = surface.cursor_row();
        let half = surface.width() / 2;

        surface.put(0, row, &format!("{}:", TrafficDirection::Incoming.label()));
        surface.put(half, row, &format!("{}:", TrafficDirection::Outgoing.label()));
        block_in.draw_plain(surface, 0, row + 1);
        block_out.draw_plain(surface, half, row + 1);
    }

    fn render_full(
        &mut self,
        surface: &mut dyn Surface,
        config: &ViewConfig,
        blocks: [StatBlock; 2],
        longest: usize,
    ) {
        let width = surface.width();
        let (region_in, region_out) = split_rows(surface.cursor_row(), surface.height());
        let stats_x = stats_column(width, longest, &config.layout);

        if !region_out.is_drawable() {
            debug!(rows = region_in.rows, "no room for outgoing graph");
        }
        trace!(
            width,
            rows_in = region_in.rows,
            rows_out = region_out.rows,
            stats_x,
            "device view layout"
        );

        let deflection_in = config
            .scale_ceiling_in()
            .unwrap_or_else(|| round_up_scale(self.graph_in.peak()));
        let deflection_out = config
            .scale_ceiling_out()
            .unwrap_or_else(|| round_up_scale(self.graph_out.peak()));

        let [block_in, block_out] = blocks;
        let sections = [
            (TrafficDirection::Incoming, region_in, deflection_in, block_in),
            (TrafficDirection::Outgoing, region_out, deflection_out, block_out),
        ];

        for (direction, region, deflection, block) in sections {
            if !region.is_drawable() {
                continue;
            }

            let header = format!("{} (100% @ {}):", direction.label(), format_scale(deflection));
            surface.put(0, region.top, &header);

            if stats_x > 1 {
                let graph = self.graph_mut(direction);
                graph.set_bar_count(stats_x - 1);
                graph.set_bar_height(region.rows - 1);
                graph.set_max_deflection(deflection);
                graph.draw(surface, 0, region.top + 1);
            }

            if width > longest {
                let anchor = config.layout.stats_anchor_rows.max(MIN_ANCHOR_ROWS);
                let nominal = (region.top + region.rows)
                    .saturating_sub(anchor)
                    .max(region.top + 1);
                block.draw_with_readout(surface, stats_x, nominal, (region.top, header.len()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_split_with_incoming_taking_extra_row() {
        let (inbound, outbound) = split_rows(2, 21);
        assert_eq!(inbound, Region { top: 2, rows: 10 });
        assert_eq!(outbound, Region { top: 12, rows: 9 });
    }

    #[test]
    fn small_outgoing_region_folds_into_incoming() {
        // 11 rows would leave only 5 for outgoing
        let (inbound, outbound) = split_rows(2, 13);
        assert_eq!(inbound.rows, 11);
        assert_eq!(outbound.rows, 0);
        assert!(!outbound.is_drawable());
    }

    #[test]
    fn stats_column_right_justifies_long_lines() {
        let layout = LayoutParams::default();
        assert_eq!(stats_column(100, 20, &layout), 70);
        assert_eq!(stats_column(40, 20, &layout), 19);
        assert_eq!(stats_column(10, 20, &layout), 0);
    }

    #[test]
    fn stat_lines_carry_units() {
        let snapshot = TrafficSnapshot {
            current_out: 1_000_000,
            avg_out: 250_000,
            total_out: 3 * 1_048_576,
            ..TrafficSnapshot::default()
        };
        let block = StatBlock::new(&snapshot, TrafficDirection::Outgoing, DataUnit::MegaByte);
        assert_eq!(block.readout, "8");
        assert_eq!(block.lines[0], "Cur: 8 Mbit/s");
        assert_eq!(block.lines[1], "Avg: 2 Mbit/s");
        assert_eq!(block.lines[4], "Ttl: 3.00 MByte");
        assert_eq!(block.longest_line(), 15);
    }
}
