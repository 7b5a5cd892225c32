//! End-to-end scenarios for a QuizMaster page driven through `LabHost`.
//!
//! Each test wires the helpers together the way a page does: nav links
//! intercepted at load, a debounced search box, toasts on save, and email
//! checks on the signup form.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use quizui_core::lab::LabHost;
use quizui_core::{
    ToastKind, ToastPhase, UiConfig, debounce, install_link_interception, navigate, show_toast,
    validate_email,
};
use web_time::Duration;

fn page() -> LabHost {
    let host = LabHost::new();
    host.add_container("toast-container");
    host
}

#[test]
fn nav_click_routes_through_navigate() {
    let host = page();
    let contact = host.add_nav_link(Some("contact.html"), None);
    let docs = host.add_nav_link(Some("https://docs.example.com"), Some("_blank"));
    let config = UiConfig::default();

    assert_eq!(install_link_interception(&host, &config).unwrap(), 1);

    assert!(host.click(contact).default_prevented);
    assert!(!host.click(docs).default_prevented);
    assert_eq!(host.navigations(), vec!["contact.html"]);

    navigate(&host, &config, "about").unwrap();
    assert_eq!(host.navigations(), vec!["contact.html", "about.html"]);
}

#[test]
fn search_box_debounce_sees_final_query() {
    let host = page();
    let searches = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&searches);
    let search = debounce(
        host.clone(),
        move |query: String| sink.borrow_mut().push(query),
        Duration::from_millis(100),
    );

    for query in ["p", "py", "pyt", "pyth", "python"] {
        search.call(query.to_owned());
        host.advance(Duration::from_millis(50));
    }
    assert!(searches.borrow().is_empty());

    host.advance(Duration::from_millis(50));
    assert_eq!(*searches.borrow(), vec!["python".to_owned()]);
}

#[test]
fn save_feedback_toast_comes_and_goes() {
    let host = page();
    let config = UiConfig::default();

    let ok = show_toast(&host, &config, "Quiz saved", ToastKind::from_tag("success")).unwrap();
    let failed = show_toast(&host, &config, "Network error", ToastKind::from_tag("error")).unwrap();
    assert_eq!(host.children("toast-container").len(), 2);
    assert!(host.node_html(*ok.node()).unwrap().contains("bg-green-500"));
    assert!(host.node_html(*failed.node()).unwrap().contains("bg-red-500"));

    host.advance(Duration::from_millis(3000));
    assert_eq!(ok.phase(), ToastPhase::FadingOut);
    assert_eq!(host.finish_transitions(), 2);
    assert!(host.children("toast-container").is_empty());
}

#[test]
fn signup_form_email_checks() {
    let entries = [
        ("a@b.com", true),
        ("A@B.COM", true),
        ("student@quizmaster.edu", true),
        ("not-an-email", false),
        ("student@localhost", false),
    ];
    for (email, expected) in entries {
        assert_eq!(validate_email(email), expected, "{email}");
    }
}

#[test]
fn toast_without_container_is_an_error() {
    let host = LabHost::new();
    let err = show_toast(&host, &UiConfig::default(), "x", ToastKind::Success).unwrap_err();
    assert_eq!(err.to_string(), "element not found: #toast-container");
}
