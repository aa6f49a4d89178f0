//! Session facade over the layout components.

use chrono::{NaiveDate, NaiveDateTime};
use futures::channel::oneshot;
use kairos_core::types::ViewType;
use serde_json::Value;

use crate::agenda::AgendaRowPacker;
use crate::error::LayoutResult;
use crate::field::{DateSerialization, FieldAccessor, FieldExpressions};
use crate::grid::{GridCoordinate, GridCoordinateMapper};
use crate::recurrence::{ExpansionOptions, Occurrence, StartOverrides, appointment_occurrences};
use crate::resource::{ResourceDimension, ResourceStore};
use crate::temporal::{DateRange, DisplayTimeZone, TimeZoneResolver, convert_by_timezone};
use crate::view::{SchedulerOptions, ViewGeometry};

/// Owns the configuration of one scheduler session.
///
/// Every layout call reads the configuration through `&self`; changing it
/// takes `&mut self`.
#[derive(Debug)]
pub struct Scheduler {
    options: SchedulerOptions,
    accessor: FieldAccessor,
    resources: ResourceStore,
    time_zones: TimeZoneResolver,
    display_zone: Option<DisplayTimeZone>,
}

impl Scheduler {
    /// ## Summary
    /// Builds a session from options, field expressions and resources.
    ///
    /// ## Errors
    /// Fails on an unknown `dateSerializationFormat`, an unresolvable
    /// `timeZone`, or options whose current view geometry is invalid.
    pub fn new(
        options: SchedulerOptions,
        expressions: FieldExpressions,
        dimensions: Vec<ResourceDimension>,
    ) -> LayoutResult<Self> {
        options.geometry()?;
        let configured = options
            .date_serialization_format
            .as_deref()
            .map(DateSerialization::from_config)
            .transpose()?;
        let mut time_zones = TimeZoneResolver::new();
        let display_zone = options
            .time_zone
            .as_deref()
            .map(|zone| DisplayTimeZone::parse(zone, &mut time_zones))
            .transpose()?;

        tracing::debug!(
            view = %options.current_view,
            date = %options.current_date,
            resources = dimensions.len(),
            "Scheduler session created"
        );

        Ok(Self {
            options,
            accessor: FieldAccessor::new(expressions, configured),
            resources: ResourceStore::new(dimensions),
            time_zones,
            display_zone,
        })
    }

    #[must_use]
    pub const fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    #[must_use]
    pub const fn accessor(&self) -> &FieldAccessor {
        &self.accessor
    }

    #[must_use]
    pub const fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceStore {
        &mut self.resources
    }

    #[must_use]
    pub const fn display_zone(&self) -> Option<&DisplayTimeZone> {
        self.display_zone.as_ref()
    }

    /// ## Summary
    /// Switches the current view.
    ///
    /// ## Errors
    /// Returns `LayoutError::InvalidGeometry` and keeps the previous view when
    /// the new view's resolved geometry is invalid.
    pub fn set_current_view(&mut self, view_type: ViewType) -> LayoutResult<()> {
        self.options.geometry_for(view_type)?;
        self.options.current_view = view_type;
        Ok(())
    }

    pub fn set_current_date(&mut self, date: NaiveDate) {
        self.options.current_date = date;
    }

    /// ## Summary
    /// Replaces the display zone; `None` shows dates unconverted.
    ///
    /// ## Errors
    /// Returns `LayoutError::UnknownTimezone` for an unresolvable name.
    pub fn set_time_zone(&mut self, zone: Option<&str>) -> LayoutResult<()> {
        self.display_zone = zone
            .map(|zone| DisplayTimeZone::parse(zone, &mut self.time_zones))
            .transpose()?;
        self.options.time_zone = zone.map(str::to_string);
        Ok(())
    }

    /// Rebuilds the accessor for new expressions; detected formats reset.
    pub fn set_field_expressions(&mut self, expressions: FieldExpressions) {
        let configured = self.accessor.configured_serialization().cloned();
        self.accessor = FieldAccessor::new(expressions, configured);
    }

    /// ## Summary
    /// Geometry of the current view.
    ///
    /// ## Errors
    /// Returns `LayoutError::InvalidGeometry` for invalid resolved options.
    pub fn geometry(&self) -> LayoutResult<ViewGeometry> {
        self.options.geometry()
    }

    /// ## Summary
    /// Occurrences of `appointment` overlapping `range`, chronological.
    ///
    /// Exception instances are included and flagged.
    #[must_use]
    pub fn expand<'a>(
        &self,
        appointment: &'a Value,
        range: DateRange,
        overrides: StartOverrides,
    ) -> Vec<Occurrence<'a>> {
        appointment_occurrences(
            &self.accessor,
            appointment,
            range,
            overrides,
            &self.expansion_options(),
        )
    }

    /// ## Summary
    /// Grid coordinates of `appointment` in the current view.
    ///
    /// Every occurrence in the visible range is laid out in every group the
    /// appointment belongs to.
    ///
    /// ## Errors
    /// Returns `LayoutError::NotAGridView` when the current view is a list,
    /// and `LayoutError::InvalidGeometry` for invalid resolved options.
    pub fn compute_coordinates(
        &self,
        appointment: &Value,
        overrides: StartOverrides,
    ) -> LayoutResult<Vec<GridCoordinate>> {
        let geometry = self.options.geometry()?;
        let resolver = self
            .resources
            .resolver(self.options.groups_for(geometry.view_type));
        let mapper = GridCoordinateMapper::new(&geometry, resolver.group_count())?;

        let groups = resolver.resolve_group_indices(appointment);
        if groups.is_empty() {
            tracing::trace!("Appointment matches no group of the view");
            return Ok(Vec::new());
        }

        let occurrences = self.expand(appointment, mapper.visible_range(), overrides);
        let coordinates = mapper.map_occurrences(&occurrences, &groups);
        tracing::trace!(
            occurrences = occurrences.len(),
            coordinates = coordinates.len(),
            "Coordinates computed"
        );
        Ok(coordinates)
    }

    /// ## Summary
    /// Per-group, per-day appointment counts of the agenda view.
    ///
    /// The agenda covers `agendaDuration` days from the current date and
    /// uses the agenda view's own grouping.
    ///
    /// ## Errors
    /// Returns `LayoutError::InvalidGeometry` for invalid resolved options.
    pub fn pack_agenda_rows(&self, appointments: &[Value]) -> LayoutResult<Vec<Vec<u32>>> {
        let geometry = self.options.geometry_for(ViewType::Agenda)?;
        let packer = AgendaRowPacker::new(geometry.current_date, geometry.agenda_duration);
        let range = packer.range();

        let occurrences: Vec<Occurrence<'_>> = appointments
            .iter()
            .flat_map(|appointment| self.expand(appointment, range, StartOverrides::default()))
            .collect();
        let resolver = self.resources.resolver(self.options.groups_for(ViewType::Agenda));
        Ok(packer.pack(&occurrences, &resolver))
    }

    /// Color of `appointment` drawn in `group_index` of the current view.
    #[must_use]
    pub fn resolve_color(&self, appointment: &Value, group_index: Option<usize>) -> Option<String> {
        self.resources
            .resolver(self.options.groups_for(self.options.current_view))
            .resolve_color(appointment, group_index)
    }

    /// ## Summary
    /// Color request answered once every resource has its data.
    ///
    /// ## Side Effects
    /// Parks the request in the resource store while data is missing.
    pub fn request_color(
        &mut self,
        appointment: &Value,
        group_index: Option<usize>,
    ) -> oneshot::Receiver<Option<String>> {
        let groups = self.options.groups_for(self.options.current_view);
        self.resources.request_color(appointment, group_index, groups)
    }

    /// Wall clock of the UTC instant `utc` in the display zone.
    #[must_use]
    pub fn to_display_time(&self, utc: NaiveDateTime) -> NaiveDateTime {
        self.display_zone
            .as_ref()
            .map_or(utc, |zone| convert_by_timezone(&utc.and_utc(), zone))
    }

    fn expansion_options(&self) -> ExpansionOptions {
        ExpansionOptions {
            default_duration: self.options.appointment_duration(),
            max_occurrences: self.options.max_occurrences,
        }
    }
}
