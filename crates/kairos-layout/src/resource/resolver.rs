use serde_json::Value;

use super::ResourceDimension;
use crate::field::FieldPath;

/// One position of a group tuple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMember<'a> {
    pub dimension: &'a ResourceDimension,
    /// Data-source item selected for this dimension.
    pub item: &'a Value,
}

/// Maps appointments to resource groups for a given `groups` list.
///
/// Groups are the cartesian product of the grouping dimensions, first
/// dimension outermost, each dimension's items in data-source order.
#[derive(Debug, Clone)]
pub struct ResourceResolver<'a> {
    dimensions: &'a [ResourceDimension],
    grouping: Vec<&'a ResourceDimension>,
}

impl<'a> ResourceResolver<'a> {
    /// ## Summary
    /// Selects the grouping dimensions named in `groups`.
    ///
    /// ## Side Effects
    /// Logs at `debug` for group names without a declared dimension.
    #[must_use]
    pub fn new(dimensions: &'a [ResourceDimension], groups: &[String]) -> Self {
        let grouping = groups
            .iter()
            .filter_map(|name| {
                let found = dimensions.iter().find(|dimension| dimension.name() == name);
                if found.is_none() {
                    tracing::debug!(group = %name, "Group refers to an undeclared resource");
                }
                found
            })
            .collect();
        Self {
            dimensions,
            grouping,
        }
    }

    #[must_use]
    pub fn is_grouped(&self) -> bool {
        !self.grouping.is_empty()
    }

    #[must_use]
    pub fn grouping(&self) -> &[&'a ResourceDimension] {
        &self.grouping
    }

    /// Number of groups; an ungrouped layout has a single implicit group.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.grouping
            .iter()
            .map(|dimension| dimension.data_source.len())
            .product()
    }

    /// ## Summary
    /// Decodes a group index into one data-source item per grouping dimension.
    ///
    /// Returns `None` for an index outside `0..group_count()`.
    #[must_use]
    pub fn group_tuple(&self, index: usize) -> Option<Vec<GroupMember<'a>>> {
        if index >= self.group_count() {
            return None;
        }
        let mut remainder = index;
        let mut members = Vec::with_capacity(self.grouping.len());
        for dimension in self.grouping.iter().rev().copied() {
            let len = dimension.data_source.len();
            members.push(GroupMember {
                dimension,
                item: dimension.data_source.get(remainder % len)?,
            });
            remainder /= len;
        }
        members.reverse();
        Some(members)
    }

    /// ## Summary
    /// Every group the appointment belongs to, ascending.
    ///
    /// Multi-valued fields select several groups. The result is empty when
    /// some grouping dimension has no matching value; ungrouped layouts
    /// always answer `[0]`.
    #[must_use]
    pub fn resolve_group_indices(&self, appointment: &Value) -> Vec<usize> {
        let mut indices = vec![0_usize];
        for dimension in &self.grouping {
            let mut positions: Vec<usize> = dimension
                .appointment_values(appointment)
                .into_iter()
                .filter_map(|value| dimension.position_of(value))
                .collect();
            positions.sort_unstable();
            positions.dedup();

            if positions.is_empty() {
                tracing::trace!(
                    dimension = dimension.name(),
                    "Appointment has no value for grouping resource"
                );
                return Vec::new();
            }

            let len = dimension.data_source.len();
            indices = indices
                .iter()
                .flat_map(|index| positions.iter().map(move |position| index * len + position))
                .collect();
        }
        indices.sort_unstable();
        indices
    }

    /// First group the appointment belongs to.
    #[must_use]
    pub fn resolve_group_index(&self, appointment: &Value) -> Option<usize> {
        self.resolve_group_indices(appointment).first().copied()
    }

    /// ## Summary
    /// Color of an appointment drawn in `group_index`.
    ///
    /// The painting dimension is the first one flagged `use_color_as_default`,
    /// else the last grouping dimension, else the last declared one. Its item
    /// comes from the target group when it is a grouping dimension, otherwise
    /// from the appointment's first value.
    #[must_use]
    pub fn resolve_color(&self, appointment: &Value, group_index: Option<usize>) -> Option<String> {
        let painter = self
            .dimensions
            .iter()
            .find(|dimension| dimension.use_color_as_default)
            .or_else(|| self.grouping.last().copied())
            .or_else(|| self.dimensions.last())?;

        let from_group = group_index
            .filter(|_| self.is_grouping(painter))
            .and_then(|index| self.group_tuple(index))
            .and_then(|tuple| {
                tuple
                    .into_iter()
                    .find(|member| std::ptr::eq(member.dimension, painter))
            })
            .and_then(|member| {
                FieldPath::parse(&painter.color_expr)
                    .get(member.item)?
                    .as_str()
                    .map(str::to_string)
            });
        if from_group.is_some() {
            return from_group;
        }

        let value = painter.appointment_values(appointment).into_iter().next()?;
        painter.color_of(value)
    }

    fn is_grouping(&self, dimension: &ResourceDimension) -> bool {
        self.grouping
            .iter()
            .any(|grouping| std::ptr::eq(*grouping, dimension))
    }
}
