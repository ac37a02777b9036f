use std::fmt;

use thiserror::Error;

/// Top-level menu entries of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MenuCategory {
    Summary,
    Infographic,
    Response,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 3] = [
        MenuCategory::Summary,
        MenuCategory::Infographic,
        MenuCategory::Response,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuCategory::Summary => "Summary",
            MenuCategory::Infographic => "Infographic",
            MenuCategory::Response => "Response",
        }
    }
}

/// A tab inside one menu category. Which category owns a tab is defined by
/// [`tabs_for`]; display labels live in [`Tab::label`] and are never used as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tab {
    SimpleSummary,
    CoreSummary,
    KeyPoints,
    WordCloud,
    TreeMap,
    BarChart,
    Sankey,
}

impl Tab {
    /// Stable identifier, used in logs and failure messages.
    pub fn ident(self) -> &'static str {
        match self {
            Tab::SimpleSummary => "SimpleSummary",
            Tab::CoreSummary => "CoreSummary",
            Tab::KeyPoints => "KeyPoints",
            Tab::WordCloud => "WordCloud",
            Tab::TreeMap => "TreeMap",
            Tab::BarChart => "BarChart",
            Tab::Sankey => "Sankey",
        }
    }

    /// Text shown on the tab strip.
    pub fn label(self) -> &'static str {
        match self {
            Tab::SimpleSummary => "간단 요약",
            Tab::CoreSummary => "핵심 내용",
            Tab::KeyPoints => "중요 포인트",
            Tab::WordCloud => "키워드 클라우드",
            Tab::TreeMap => "트리",
            Tab::BarChart => "막대",
            Tab::Sankey => "SANKEY",
        }
    }
}

const SUMMARY_TABS: &[Tab] = &[Tab::SimpleSummary, Tab::CoreSummary, Tab::KeyPoints];
const INFOGRAPHIC_TABS: &[Tab] = &[Tab::WordCloud, Tab::TreeMap, Tab::BarChart, Tab::Sankey];

/// Ordered tab set of a menu. `Response` has none: its single artifact is shown
/// without a tab strip.
pub fn tabs_for(menu: MenuCategory) -> &'static [Tab] {
    match menu {
        MenuCategory::Summary => SUMMARY_TABS,
        MenuCategory::Infographic => INFOGRAPHIC_TABS,
        MenuCategory::Response => &[],
    }
}

/// A selection referenced a tab outside its menu's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tab {tab:?} is not part of the {menu:?} catalog")]
pub struct UnknownTabError {
    pub menu: MenuCategory,
    pub tab: Option<Tab>,
}

/// The current (menu, tab) pair. Doubles as the cache slot key.
///
/// Only constructible through [`Selection::new`] or [`Selection::first_of`], so a
/// value always satisfies `tab ∈ tabs_for(menu)` (or `tab == None` for an empty
/// catalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selection {
    menu: MenuCategory,
    tab: Option<Tab>,
}

impl Selection {
    pub fn new(menu: MenuCategory, tab: Option<Tab>) -> Result<Self, UnknownTabError> {
        let catalog = tabs_for(menu);
        let valid = match tab {
            Some(tab) => catalog.contains(&tab),
            None => catalog.is_empty(),
        };
        if valid {
            Ok(Self { menu, tab })
        } else {
            Err(UnknownTabError { menu, tab })
        }
    }

    /// Selection a menu switch lands on: the first catalog entry, or no tab.
    pub fn first_of(menu: MenuCategory) -> Self {
        Self {
            menu,
            tab: tabs_for(menu).first().copied(),
        }
    }

    pub fn menu(&self) -> MenuCategory {
        self.menu
    }

    pub fn tab(&self) -> Option<Tab> {
        self.tab
    }

    /// Name of the slot as used in user-facing failure messages.
    pub fn slot_name(&self) -> &'static str {
        match self.tab {
            Some(tab) => tab.ident(),
            None => "Sentiment",
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::first_of(MenuCategory::Summary)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tab {
            Some(tab) => write!(f, "{}/{}", self.menu.label(), tab.ident()),
            None => f.write_str(self.menu.label()),
        }
    }
}
