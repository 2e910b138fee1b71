use super::*;
use crate::kernel::services::ports::Difficulty;

fn info(id: &str, category: &str) -> ScenarioInfo {
    ScenarioInfo {
        id: id.to_string(),
        name: format!("Scenario {id}"),
        description: String::new(),
        category: category.to_string(),
        difficulty: Difficulty::Easy,
        namespace: id.to_string(),
        hints: Vec::new(),
    }
}

fn sample() -> Vec<ScenarioInfo> {
    vec![
        info("custom-a", "Custom"),
        info("pvc", "Storage"),
        info("svc", "Networking"),
        info("crash", "Lifecycle"),
        info("dns", "Networking"),
        info("loose", ""),
    ]
}

fn names(catalog: &Catalog) -> Vec<&str> {
    catalog
        .categories()
        .iter()
        .map(|c| c.name.as_str())
        .collect()
}

#[test]
fn categories_follow_preferred_order_then_first_seen() {
    let catalog = Catalog::build(&sample(), &FxHashSet::default());
    assert_eq!(
        names(&catalog),
        vec!["Networking", "Lifecycle", "Storage", "Custom", "Uncategorized"]
    );
    let networking = &catalog.categories()[0];
    let ids: Vec<_> = networking.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["svc", "dns"]);
}

#[test]
fn categories_start_expanded() {
    let catalog = Catalog::build(&sample(), &FxHashSet::default());
    assert_eq!(catalog.rows().len(), 5 + 6);
    assert!(catalog.selected().map_or(false, |row| row.is_category()));
}

#[test]
fn collapse_and_expand_only_act_on_categories() {
    let mut catalog = Catalog::build(&sample(), &FxHashSet::default());
    assert!(catalog.collapse());
    assert!(!catalog.collapse());
    assert_eq!(catalog.rows().len(), 5 + 4);

    assert!(catalog.move_down());
    assert!(catalog.selected().map_or(false, |row| row.is_category()));
    assert!(catalog.move_down());
    assert_eq!(catalog.selected_entry().map(|e| e.id.as_str()), Some("crash"));
    assert!(!catalog.collapse());

    assert!(catalog.move_top());
    assert!(catalog.toggle());
    assert_eq!(catalog.rows().len(), 11);
}

#[test]
fn cursor_stays_in_bounds() {
    let mut catalog = Catalog::build(&sample(), &FxHashSet::default());
    assert!(!catalog.move_up());
    assert!(catalog.move_bottom());
    let last = catalog.cursor();
    assert!(!catalog.move_down());
    assert_eq!(catalog.cursor(), last);
}

#[test]
fn rebuild_reflects_completion_and_keeps_layout() {
    let mut catalog = Catalog::build(&sample(), &FxHashSet::default());
    catalog.move_down();
    catalog.move_down();
    assert_eq!(catalog.progress(), (0, 6));

    let completed: FxHashSet<String> = ["svc".to_string()].into_iter().collect();
    catalog.rebuild(&sample(), &completed);
    assert_eq!(catalog.progress(), (1, 6));
    assert!(catalog.entry("svc").map_or(false, |e| e.completed));
    assert_eq!(catalog.selected_entry().map(|e| e.id.as_str()), Some("dns"));
}

#[test]
fn empty_catalog_has_no_selection() {
    let mut catalog = Catalog::build(&[], &FxHashSet::default());
    assert!(catalog.selected().is_none());
    assert!(!catalog.move_down());
    assert!(!catalog.toggle());
    assert_eq!(catalog.progress(), (0, 0));
}
