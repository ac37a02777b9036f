use crate::{BlobId, BlobRegistry, FetchOutcome, MenuCategory, Payload, ResourceCache, Selection, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    Loading,
    Error,
    Text,
    Image,
}

/// What the content area shows for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderModel {
    Loading,
    Error(String),
    Text(String),
    Image(BlobId),
}

impl RenderModel {
    pub fn kind(&self) -> RenderKind {
        match self {
            RenderModel::Loading => RenderKind::Loading,
            RenderModel::Error(_) => RenderKind::Error,
            RenderModel::Text(_) => RenderKind::Text,
            RenderModel::Image(_) => RenderKind::Image,
        }
    }
}

/// Read-only projection of the cache for one selection.
///
/// `Idle` renders as `Loading`: a slot becomes current in the same update that
/// issues its fetch.
pub fn select_render(
    selection: &Selection,
    cache: &ResourceCache,
    blobs: &BlobRegistry,
) -> RenderModel {
    match cache.get(selection) {
        FetchOutcome::Idle | FetchOutcome::Loading => RenderModel::Loading,
        FetchOutcome::Error(message) => RenderModel::Error(message.clone()),
        FetchOutcome::Success(Payload::Text(text)) => RenderModel::Text(text.clone()),
        FetchOutcome::Success(Payload::Binary(_)) => match blobs.current_for(*selection) {
            Some(handle) => RenderModel::Image(handle.id()),
            None => RenderModel::Loading,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub menu: MenuCategory,
    pub tabs: Vec<TabView>,
    pub show_tabs: bool,
    pub render: RenderModel,
    pub fault: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub tab: Tab,
    pub label: &'static str,
    pub active: bool,
}
