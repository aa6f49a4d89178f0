//! Converts occurrences into positions on a scheduler grid.

mod mapper;
mod placement;

pub use mapper::{GridCell, segment_starts, touched_cells};
pub use placement::{GridCoordinate, TableFrame};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{LayoutError, LayoutResult};
use crate::recurrence::Occurrence;
use crate::temporal::DateRange;
use crate::view::ViewGeometry;

/// Maps time intervals of one view onto its cells and pixels.
///
/// Visible days and table dimensions are computed once per mapper.
#[derive(Debug, Clone)]
pub struct GridCoordinateMapper<'g> {
    geometry: &'g ViewGeometry,
    days: Vec<NaiveDate>,
    frame: TableFrame,
}

impl<'g> GridCoordinateMapper<'g> {
    /// ## Summary
    /// Prepares a mapper for `geometry` drawn with `group_count` groups.
    ///
    /// ## Errors
    /// Returns `LayoutError::NotAGridView` for list views and
    /// `LayoutError::InvalidGeometry` for broken geometry.
    pub fn new(geometry: &'g ViewGeometry, group_count: usize) -> LayoutResult<Self> {
        if !geometry.is_grid() {
            return Err(LayoutError::NotAGridView(geometry.view_type));
        }
        geometry.validate()?;
        Ok(Self {
            geometry,
            days: geometry.visible_days(),
            frame: TableFrame::new(geometry, group_count),
        })
    }

    #[must_use]
    pub const fn geometry(&self) -> &ViewGeometry {
        self.geometry
    }

    #[must_use]
    pub const fn frame(&self) -> &TableFrame {
        &self.frame
    }

    #[must_use]
    pub fn visible_days(&self) -> &[NaiveDate] {
        &self.days
    }

    #[must_use]
    pub fn visible_range(&self) -> DateRange {
        self.geometry.visible_range()
    }

    #[must_use]
    pub fn cells(&self, start: NaiveDateTime, end: NaiveDateTime, all_day: bool) -> Vec<GridCell> {
        touched_cells(start, end, all_day, self.geometry, &self.days)
    }

    /// ## Summary
    /// One coordinate per drawn segment of `[start, end)` and per group.
    ///
    /// Segments come in date-axis order, groups ascending within a segment.
    /// Group indices outside the view's groups are ignored.
    #[must_use]
    pub fn map(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        all_day: bool,
        group_indices: &[usize],
    ) -> Vec<GridCoordinate> {
        let cells = self.cells(start, end, all_day);
        segment_starts(&cells, self.frame.order)
            .into_iter()
            .flat_map(|cell| {
                group_indices
                    .iter()
                    .filter(|group| **group < self.frame.group_count)
                    .map(move |group| self.frame.place(cell, *group))
            })
            .collect()
    }

    /// ## Summary
    /// Coordinates of every occurrence in chronological order.
    ///
    /// Exception occurrences are not drawn.
    #[must_use]
    pub fn map_occurrences(
        &self,
        occurrences: &[Occurrence<'_>],
        group_indices: &[usize],
    ) -> Vec<GridCoordinate> {
        let mut drawn: Vec<&Occurrence<'_>> = occurrences
            .iter()
            .filter(|occurrence| !occurrence.is_exception)
            .collect();
        drawn.sort_by_key(|occurrence| occurrence.start);
        drawn
            .into_iter()
            .flat_map(|occurrence| {
                self.map(
                    occurrence.start,
                    occurrence.end,
                    occurrence.all_day,
                    group_indices,
                )
            })
            .collect()
    }
}
