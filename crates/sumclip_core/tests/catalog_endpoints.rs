use std::collections::HashSet;

use sumclip_core::{resolve, tabs_for, ContentKind, MenuCategory, Selection, Tab};

#[test]
fn every_catalog_has_unique_tabs_that_resolve() {
    for menu in MenuCategory::ALL {
        let tabs = tabs_for(menu);
        let unique: HashSet<Tab> = tabs.iter().copied().collect();
        assert_eq!(unique.len(), tabs.len(), "duplicate tab in {menu:?}");

        for tab in tabs {
            let descriptor = resolve(menu, Some(*tab)).expect("catalog tab resolves");
            assert!(descriptor.path.starts_with('/'));
        }
    }
}

#[test]
fn no_tab_belongs_to_two_menus() {
    let mut seen = HashSet::new();
    for menu in MenuCategory::ALL {
        for tab in tabs_for(menu) {
            assert!(seen.insert(*tab), "{tab:?} listed twice");
        }
    }
}

#[test]
fn labels_are_distinct_per_menu() {
    for menu in MenuCategory::ALL {
        let labels: HashSet<&str> = tabs_for(menu).iter().map(|tab| tab.label()).collect();
        assert_eq!(labels.len(), tabs_for(menu).len());
    }
}

#[test]
fn response_has_no_tabs_and_resolves_to_sentiment() {
    assert!(tabs_for(MenuCategory::Response).is_empty());
    let descriptor = Selection::first_of(MenuCategory::Response)
        .descriptor()
        .expect("sentiment resolves");
    assert_eq!(descriptor.path, "/more/sentiment");
    assert_eq!(descriptor.content_kind, ContentKind::Binary);
}

#[test]
fn endpoint_table_matches_backend_routes() {
    let expected = [
        (MenuCategory::Summary, Tab::SimpleSummary, "/summary/simple", ContentKind::Text),
        (MenuCategory::Summary, Tab::CoreSummary, "/summary/core", ContentKind::Text),
        (MenuCategory::Summary, Tab::KeyPoints, "/summary/point", ContentKind::Text),
        (MenuCategory::Infographic, Tab::WordCloud, "/more/wordcloud", ContentKind::Binary),
        (MenuCategory::Infographic, Tab::TreeMap, "/more/tree", ContentKind::Binary),
        (MenuCategory::Infographic, Tab::BarChart, "/more/bar", ContentKind::Binary),
        (MenuCategory::Infographic, Tab::Sankey, "/more/sankey", ContentKind::Binary),
    ];
    for (menu, tab, path, kind) in expected {
        let descriptor = resolve(menu, Some(tab)).unwrap();
        assert_eq!(descriptor.path, path);
        assert_eq!(descriptor.content_kind, kind);
    }
}

#[test]
fn resolver_rejects_pairs_outside_the_catalog() {
    let err = resolve(MenuCategory::Summary, Some(Tab::Sankey)).unwrap_err();
    assert_eq!(err.menu, MenuCategory::Summary);
    assert_eq!(err.tab, Some(Tab::Sankey));
    assert!(resolve(MenuCategory::Infographic, None).is_err());
    assert!(resolve(MenuCategory::Response, Some(Tab::WordCloud)).is_err());
}

#[test]
fn menu_switch_lands_on_first_tab() {
    assert_eq!(
        Selection::first_of(MenuCategory::Infographic).tab(),
        Some(Tab::WordCloud)
    );
    assert_eq!(
        Selection::first_of(MenuCategory::Summary).tab(),
        Some(Tab::SimpleSummary)
    );
    assert_eq!(Selection::first_of(MenuCategory::Response).tab(), None);
}
