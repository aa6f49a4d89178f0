use kairos_core::types::GroupOrientation;
use serde::Serialize;

use super::GridCell;
use crate::view::{AxisOrder, ViewGeometry};

/// Position of one drawn segment of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCoordinate {
    pub row_index: usize,
    pub cell_index: usize,
    pub group_index: usize,
    pub top: f64,
    pub left: f64,
    pub all_day: bool,
}

/// Dimensions shared by every group's table of a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableFrame {
    pub rows: usize,
    pub columns: usize,
    pub group_count: usize,
    pub order: AxisOrder,
    pub orientation: GroupOrientation,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Height of the all-day panel above each table, zero without one.
    pub panel_height: f64,
}

impl TableFrame {
    /// Frame of `geometry` laid out for `group_count` groups.
    #[must_use]
    pub fn new(geometry: &ViewGeometry, group_count: usize) -> Self {
        let group_count = group_count.max(1);
        Self {
            rows: geometry.rows(),
            columns: geometry.columns(),
            group_count,
            order: geometry.axis_order(group_count),
            orientation: geometry.group_orientation,
            cell_width: geometry.cell_width,
            cell_height: geometry.cell_height,
            panel_height: geometry.panel_height(),
        }
    }

    /// Height of one group's block in a vertical layout.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "Row counts are far below the f64 mantissa"
    )]
    pub fn block_height(&self) -> f64 {
        self.rows as f64 * self.cell_height + self.panel_height
    }

    /// ## Summary
    /// Places `cell` of group `group_index` on the whole grid.
    ///
    /// Horizontal layouts put groups side by side, either one block of
    /// columns per group or one sub-column per group inside each date cell;
    /// the all-day panel lies outside the time table there. Vertical layouts
    /// stack group blocks, each starting with its own all-day panel.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "Grid indices are far below the f64 mantissa"
    )]
    pub fn place(&self, cell: GridCell, group_index: usize) -> GridCoordinate {
        let in_panel = cell.all_day && self.panel_height > 0.0;
        let row_top = if in_panel {
            0.0
        } else {
            cell.row as f64 * self.cell_height
        };

        let (top, left_cell) = match self.orientation {
            GroupOrientation::Horizontal => {
                let left_cell = match self.order {
                    AxisOrder::GroupMajor => group_index * self.columns + cell.column,
                    AxisOrder::DateMajor => cell.column * self.group_count + group_index,
                };
                (row_top, left_cell)
            }
            GroupOrientation::Vertical => {
                let panel = if in_panel { 0.0 } else { self.panel_height };
                (
                    group_index as f64 * self.block_height() + panel + row_top,
                    cell.column,
                )
            }
        };

        GridCoordinate {
            row_index: if in_panel { 0 } else { cell.row },
            cell_index: cell.column,
            group_index,
            top,
            left: left_cell as f64 * self.cell_width,
            all_day: cell.all_day,
        }
    }
}
