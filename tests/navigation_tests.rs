use portal_nav::{NavEngine, Role};

fn engine() -> NavEngine {
    NavEngine::with_defaults()
}

fn visible_ids(engine: &NavEngine, role: Option<Role>) -> Vec<String> {
    engine
        .visible_tabs(role)
        .iter()
        .map(|tab| tab.id.clone())
        .collect()
}

#[test]
fn teacher_sees_everything_but_admin_tab() {
    let engine = engine();
    assert_eq!(
        visible_ids(&engine, Some(Role::Teacher)),
        vec!["recommendations", "favourites", "upload", "home"]
    );
}

#[test]
fn admin_sees_moderation_tab_but_not_teacher_home() {
    let engine = engine();
    assert_eq!(
        visible_ids(&engine, Some(Role::Admin)),
        vec!["recommendations", "favourites", "upload", "admin"]
    );
}

#[test]
fn guest_sees_only_recommendations() {
    let engine = engine();
    assert_eq!(visible_ids(&engine, Some(Role::Guest)), vec!["recommendations"]);
}

#[test]
fn absent_role_sees_no_tabs() {
    let engine = engine();
    assert!(engine.visible_tabs(None).is_empty());
}

#[test]
fn visible_tabs_preserve_declaration_order() {
    // For every role, the filtered list must be a subsequence of the full
    // table in its original order.
    let engine = engine();
    let full: Vec<&str> = engine.nav().tabs().iter().map(|t| t.id.as_str()).collect();

    for role in [Role::Admin, Role::Teacher, Role::Guest] {
        let visible = visible_ids(&engine, Some(role));
        let mut cursor = 0usize;
        for id in &visible {
            let pos = full[cursor..]
                .iter()
                .position(|candidate| candidate == id)
                .unwrap_or_else(|| panic!("{id} out of order for {role:?}"));
            cursor += pos + 1;
        }
    }
}

#[test]
fn visible_tabs_contain_exactly_the_tabs_listing_the_role() {
    let engine = engine();
    for role in [Role::Admin, Role::Teacher, Role::Guest] {
        for tab in engine.nav().tabs() {
            let shown = engine
                .visible_tabs(Some(role))
                .iter()
                .any(|visible| visible.id == tab.id);
            assert_eq!(
                shown,
                tab.roles.contains(&role),
                "tab {} visibility wrong for {role:?}",
                tab.id
            );
        }
    }
}

#[test]
fn resolve_tab_matches_paths_exactly() {
    let engine = engine();
    assert_eq!(engine.resolve_tab("/favourites"), "favourites");
    assert_eq!(engine.resolve_tab("/upload"), "upload");
    assert_eq!(engine.resolve_tab("/admin"), "admin");
}

#[test]
fn resolve_tab_falls_back_to_the_first_tab() {
    let engine = engine();
    assert_eq!(engine.resolve_tab("/unknown"), "recommendations");
    assert_eq!(engine.resolve_tab(""), "recommendations");
}

#[test]
fn resolve_tab_does_no_pattern_matching() {
    // Routes support positional parameters; tabs deliberately do not. A leaf
    // page under a section still highlights the fallback tab unless its path
    // is an exact tab path.
    let engine = engine();
    assert_eq!(engine.resolve_tab("/materials/42"), "recommendations");
    assert_eq!(engine.resolve_tab("/favourites/extra"), "recommendations");
}
