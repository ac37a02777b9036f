use crate::catalog::{MenuCategory, Selection, Tab, UnknownTabError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// UTF-8 plain text.
    Text,
    /// Opaque image bytes.
    Binary,
}

/// Backend resource for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub path: &'static str,
    pub content_kind: ContentKind,
}

/// Maps a (menu, tab) pair to its backend resource.
///
/// Pairs outside the catalog are rejected even though [`Selection`] cannot hold
/// them; a mismatch here means the catalog and this table drifted apart.
pub fn resolve(menu: MenuCategory, tab: Option<Tab>) -> Result<ResourceDescriptor, UnknownTabError> {
    use ContentKind::{Binary, Text};

    let (path, content_kind) = match (menu, tab) {
        (MenuCategory::Summary, Some(Tab::SimpleSummary)) => ("/summary/simple", Text),
        (MenuCategory::Summary, Some(Tab::CoreSummary)) => ("/summary/core", Text),
        (MenuCategory::Summary, Some(Tab::KeyPoints)) => ("/summary/point", Text),
        (MenuCategory::Infographic, Some(Tab::WordCloud)) => ("/more/wordcloud", Binary),
        (MenuCategory::Infographic, Some(Tab::TreeMap)) => ("/more/tree", Binary),
        (MenuCategory::Infographic, Some(Tab::BarChart)) => ("/more/bar", Binary),
        (MenuCategory::Infographic, Some(Tab::Sankey)) => ("/more/sankey", Binary),
        (MenuCategory::Response, None) => ("/more/sentiment", Binary),
        _ => return Err(UnknownTabError { menu, tab }),
    };
    Ok(ResourceDescriptor { path, content_kind })
}

impl Selection {
    pub fn descriptor(&self) -> Result<ResourceDescriptor, UnknownTabError> {
        resolve(self.menu(), self.tab())
    }
}
