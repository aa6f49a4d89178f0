use serde::Deserialize;

/// Calendar view kinds the layout engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewType {
    Day,
    Week,
    Month,
    TimelineDay,
    TimelineWeek,
    TimelineMonth,
    Agenda,
}

impl ViewType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::TimelineDay => "timelineDay",
            Self::TimelineWeek => "timelineWeek",
            Self::TimelineMonth => "timelineMonth",
            Self::Agenda => "agenda",
        }
    }

    /// Parses a view name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_lowercase().as_str() {
            "day" => Self::Day,
            "week" => Self::Week,
            "month" => Self::Month,
            "timelineday" => Self::TimelineDay,
            "timelineweek" => Self::TimelineWeek,
            "timelinemonth" => Self::TimelineMonth,
            "agenda" => Self::Agenda,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn is_timeline(self) -> bool {
        matches!(
            self,
            Self::TimelineDay | Self::TimelineWeek | Self::TimelineMonth
        )
    }

    /// Views whose cells subdivide a day into time slots.
    #[must_use]
    pub const fn has_time_slots(self) -> bool {
        matches!(
            self,
            Self::Day | Self::Week | Self::TimelineDay | Self::TimelineWeek
        )
    }

    /// Day and Week views render all-day appointments in a separate panel.
    #[must_use]
    pub const fn has_all_day_panel(self) -> bool {
        matches!(self, Self::Day | Self::Week)
    }

    /// Timeline views group vertically unless told otherwise.
    #[must_use]
    pub const fn default_group_orientation(self) -> GroupOrientation {
        if self.is_timeline() {
            GroupOrientation::Vertical
        } else {
            GroupOrientation::Horizontal
        }
    }
}

impl std::fmt::Display for ViewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction in which resource groups are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupOrientation {
    Horizontal,
    Vertical,
}

impl GroupOrientation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl std::fmt::Display for GroupOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
