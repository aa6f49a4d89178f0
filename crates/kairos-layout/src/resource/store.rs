//! Resource data that may arrive after layout requests.

use futures::channel::oneshot;
use kairos_core::error::CoreError;
use serde_json::Value;

use super::{ResourceDimension, ResourceResolver};
use crate::error::LayoutResult;

struct PendingColor {
    appointment: Value,
    group_index: Option<usize>,
    groups: Vec<String>,
    sender: oneshot::Sender<Option<String>>,
}

/// Owns the declared dimensions and tracks which ones still await data.
///
/// Color requests made while data is missing are parked and answered once,
/// when the last missing dimension is loaded.
pub struct ResourceStore {
    dimensions: Vec<ResourceDimension>,
    awaiting: Vec<bool>,
    pending: Vec<PendingColor>,
}

impl ResourceStore {
    /// Store whose dimensions are all loaded.
    #[must_use]
    pub fn new(dimensions: Vec<ResourceDimension>) -> Self {
        let awaiting = vec![false; dimensions.len()];
        Self {
            dimensions,
            awaiting,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> &[ResourceDimension] {
        &self.dimensions
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.awaiting.iter().any(|awaiting| *awaiting)
    }

    /// Resolver over the current data for the given grouping.
    #[must_use]
    pub fn resolver(&self, groups: &[String]) -> ResourceResolver<'_> {
        ResourceResolver::new(&self.dimensions, groups)
    }

    /// ## Summary
    /// Marks a dimension's data as not yet available.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` for an undeclared dimension.
    pub fn defer(&mut self, name: &str) -> LayoutResult<()> {
        let index = self.index_of(name)?;
        self.dimensions[index].data_source.clear();
        self.awaiting[index] = true;
        Ok(())
    }

    /// ## Summary
    /// Supplies the data of a dimension.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` for an undeclared dimension.
    ///
    /// ## Side Effects
    /// Answers every parked color request once no dimension is awaited.
    pub fn load(&mut self, name: &str, items: Vec<Value>) -> LayoutResult<()> {
        let index = self.index_of(name)?;
        self.dimensions[index].data_source = items;
        self.awaiting[index] = false;
        tracing::debug!(dimension = name, "Resource data loaded");

        if self.is_ready() {
            for request in std::mem::take(&mut self.pending) {
                let color = self
                    .resolver(&request.groups)
                    .resolve_color(&request.appointment, request.group_index);
                if request.sender.send(color).is_err() {
                    tracing::trace!("Color request was dropped before resolution");
                }
            }
        }
        Ok(())
    }

    /// ## Summary
    /// Requests the color of an appointment drawn in `group_index`.
    ///
    /// The receiver completes exactly once: immediately when all resource
    /// data is present, otherwise when the last missing dimension loads.
    pub fn request_color(
        &mut self,
        appointment: &Value,
        group_index: Option<usize>,
        groups: &[String],
    ) -> oneshot::Receiver<Option<String>> {
        let (sender, receiver) = oneshot::channel();
        if self.is_ready() {
            let color = self.resolver(groups).resolve_color(appointment, group_index);
            if sender.send(color).is_err() {
                tracing::trace!("Color receiver dropped immediately");
            }
        } else {
            self.pending.push(PendingColor {
                appointment: appointment.clone(),
                group_index,
                groups: groups.to_vec(),
                sender,
            });
        }
        receiver
    }

    fn index_of(&self, name: &str) -> LayoutResult<usize> {
        self.dimensions
            .iter()
            .position(|dimension| dimension.name() == name)
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown resource '{name}'")).into())
    }
}

impl std::fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore")
            .field("dimensions", &self.dimensions)
            .field("awaiting", &self.awaiting)
            .field("pending", &self.pending.len())
            .finish()
    }
}
