//! Sumclip core: dashboard selection state machine and view-model helpers.
mod blob;
mod cache;
mod catalog;
mod effect;
mod endpoint;
mod msg;
mod state;
mod update;
mod view_model;

pub use blob::{BlobHandle, BlobId, BlobRegistry};
pub use cache::{FetchOutcome, Payload, ResourceCache};
pub use catalog::{tabs_for, MenuCategory, Selection, Tab, UnknownTabError};
pub use effect::Effect;
pub use endpoint::{resolve, ContentKind, ResourceDescriptor};
pub use msg::{FetchFailure, Msg};
pub use state::{AppState, RequestId};
pub use update::update;
pub use view_model::{select_render, DashboardView, RenderKind, RenderModel, TabView};
