use std::collections::HashMap;

use crate::view_model::{select_render, DashboardView, TabView};
use crate::{
    tabs_for, BlobRegistry, Effect, FetchOutcome, Payload, ResourceCache, Selection,
    UnknownTabError,
};

pub type RequestId = u64;

/// Dashboard session state. [`crate::update`] is its only writer.
#[derive(Debug, Default)]
pub struct AppState {
    selection: Selection,
    cache: ResourceCache,
    blobs: BlobRegistry,
    in_flight: HashMap<Selection, RequestId>,
    last_request_id: RequestId,
    fault: Option<UnknownTabError>,
    closed: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    pub fn blobs(&self) -> &BlobRegistry {
        &self.blobs
    }

    /// Request currently authoritative for `slot`, if one is in flight.
    pub fn in_flight(&self, slot: Selection) -> Option<RequestId> {
        self.in_flight.get(&slot).copied()
    }

    pub fn fault(&self) -> Option<&UnknownTabError> {
        self.fault.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn view(&self) -> DashboardView {
        let menu = self.selection.menu();
        let tabs: Vec<TabView> = tabs_for(menu)
            .iter()
            .map(|tab| TabView {
                tab: *tab,
                label: tab.label(),
                active: self.selection.tab() == Some(*tab),
            })
            .collect();
        DashboardView {
            menu,
            show_tabs: !tabs.is_empty(),
            tabs,
            render: select_render(&self.selection, &self.cache, &self.blobs),
            fault: self.fault.map(|err| err.to_string()),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub(crate) fn set_outcome(&mut self, slot: Selection, outcome: FetchOutcome) {
        self.cache.insert(slot, outcome);
    }

    pub(crate) fn begin_request(&mut self, slot: Selection) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight.insert(slot, request_id);
        self.cache.insert(slot, FetchOutcome::Loading);
        request_id
    }

    pub(crate) fn take_in_flight(&mut self, slot: Selection) -> Option<RequestId> {
        self.in_flight.remove(&slot)
    }

    pub(crate) fn record_fault(&mut self, err: UnknownTabError) {
        self.fault = Some(err);
        self.dirty = true;
    }

    /// Makes sure a binary payload on screen has a live handle.
    pub(crate) fn sync_display(&mut self) -> Vec<Effect> {
        let slot = self.selection;
        let FetchOutcome::Success(Payload::Binary(bytes)) = self.cache.get(&slot) else {
            return Vec::new();
        };
        if self.blobs.current_for(slot).is_some() {
            return Vec::new();
        }
        let bytes = bytes.clone();
        let (_, released) = self.blobs.publish(slot, bytes);
        released
            .into_iter()
            .map(|blob| Effect::ReleaseBlob { blob })
            .collect()
    }

    /// Drops all session data: cancels in-flight requests, releases handles,
    /// clears the cache and returns to the default selection.
    pub(crate) fn reset(&mut self) -> Vec<Effect> {
        let mut cancelled: Vec<RequestId> = self.in_flight.drain().map(|(_, id)| id).collect();
        cancelled.sort_unstable();
        let mut effects: Vec<Effect> = cancelled
            .into_iter()
            .map(|request_id| Effect::CancelFetch { request_id })
            .collect();
        effects.extend(
            self.blobs
                .teardown()
                .into_iter()
                .map(|blob| Effect::ReleaseBlob { blob }),
        );
        self.cache.clear();
        self.selection = Selection::default();
        self.fault = None;
        self.dirty = true;
        effects
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }
}
