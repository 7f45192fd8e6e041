use std::time::Duration;

use pix_navigator::{
    DomAdapter, InMemoryDom, NavigationContext, PageId,
    dom::{DEFAULT_NAV_LINKS, PanelState},
    models::active_link_href,
};

#[test]
fn test_new_document_is_blank() {
    let dom = InMemoryDom::new();
    let snapshot = dom.snapshot();

    assert!(snapshot.visible_panels().is_empty());
    assert!(snapshot.active_links.is_empty());
    assert!(!snapshot.drawer_open);
    assert!(!snapshot.splash_login_visible);
    assert_eq!(snapshot.links.len(), DEFAULT_NAV_LINKS.len());
}

#[test]
fn test_fade_keeps_panel_visible_until_finished() {
    let dom = InMemoryDom::new();
    dom.show_panel(PageId::Splash);
    dom.fade_out_panel(PageId::Splash, Duration::from_millis(1000));

    assert_eq!(
        dom.snapshot().state_of(PageId::Splash),
        PanelState::FadingOut(Duration::from_millis(1000))
    );
    assert_eq!(dom.visible_panels(), vec![PageId::Splash]);

    dom.finish_fades();
    assert!(dom.visible_panels().is_empty());
}

#[test]
fn test_fading_hidden_panel_is_noop() {
    let dom = InMemoryDom::new();
    dom.fade_out_panel(PageId::Splash, Duration::from_millis(1000));

    assert_eq!(dom.snapshot().state_of(PageId::Splash), PanelState::Hidden);
}

#[test]
fn test_marking_unknown_link_leaves_nothing_active() {
    let dom = InMemoryDom::new();
    dom.mark_link_active("/recent");
    dom.clear_active_links();
    dom.mark_link_active("/post/1");

    assert!(dom.active_links().is_empty());
}

#[test]
fn test_empty_href_marks_root_link() {
    let dom = InMemoryDom::with_links(["/", "/about"]);
    dom.mark_link_active("");

    assert!(dom.active_links().contains("/"));
    assert_eq!(active_link_href(""), "/");
    assert_eq!(active_link_href("/about"), "/about");
}

#[test]
fn test_drawer_and_scroll() {
    let dom = InMemoryDom::new();
    dom.open_drawer();
    dom.scroll_to(300);
    assert!(dom.snapshot().drawer_open);

    dom.close_drawer();
    dom.scroll_to_top();

    let snapshot = dom.snapshot();
    assert!(!snapshot.drawer_open);
    assert_eq!(snapshot.scroll_top, 0);
}

#[test]
fn test_navigation_context_splits_path() {
    let ctx = NavigationContext::new("search/cats?sort=new#top");

    assert_eq!(ctx.path, "/search/cats");
    assert_eq!(ctx.canonical_path, "/search/cats?sort=new");
    assert_eq!(ctx.querystring, "sort=new");
    assert_eq!(ctx.link_href(), "/search/cats?sort=new");
    assert_eq!(NavigationContext::new("").path, "/");
}

#[test]
fn test_page_ids_match_markup() {
    assert_eq!(PageId::UserInfo.as_str(), "user-info");
    assert_eq!(PageId::Splash.element_id(), "page-splash");
    assert_eq!(
        serde_json::to_string(&PageId::UserInfo).unwrap(),
        "\"user-info\""
    );
}
