use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use rpick_api::{CommitField, FetchError, Item, JsonTransport, PickerConfig, SubmitPolicy};
use serde_json::{Value, json};

use super::*;

type Pairs = Vec<(String, String)>;

struct Reply {
    delay: Duration,
    body: Result<Value, FetchError>,
}

impl Reply {
    fn now(body: Value) -> Self {
        Self {
            delay: Duration::ZERO,
            body: Ok(body),
        }
    }

    fn after(delay: Duration, body: Value) -> Self {
        Self {
            delay,
            body: Ok(body),
        }
    }
}

/// Transport that answers from a closure and records every call.
struct ScriptedTransport {
    calls: Mutex<Vec<Pairs>>,
    completed: AtomicUsize,
    respond: Box<dyn Fn(&[(String, String)]) -> Reply + Send + Sync>,
}

impl ScriptedTransport {
    fn new<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&[(String, String)]) -> Reply + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
            respond: Box::new(respond),
        })
    }

    fn calls(&self) -> Vec<Pairs> {
        self.calls.lock().expect("calls").clone()
    }

    fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

impl JsonTransport for ScriptedTransport {
    fn get_json(&self, _url: &str, query: &[(String, String)]) -> Result<Value, FetchError> {
        self.calls.lock().expect("calls").push(query.to_vec());
        let reply = (self.respond)(query);
        if !reply.delay.is_zero() {
            thread::sleep(reply.delay);
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        reply.body
    }
}

fn param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

fn companies(range: std::ops::Range<usize>) -> Value {
    Value::Array(
        range
            .map(|n| json!({ "id": n, "name": format!("Company {n}") }))
            .collect(),
    )
}

fn bind(config: PickerConfig, transport: &Arc<ScriptedTransport>) -> RemoteSearchPicker {
    RemoteSearchPicker::initialize(
        PickerAnchors::complete("companies", "company_id"),
        config,
        transport.clone(),
    )
    .expect("picker binds")
}

fn config() -> PickerConfig {
    PickerConfig::new("http://localhost/companies/options")
}

/// Pump until `calls` requests have completed and nothing is loading.
fn settle(picker: &mut RemoteSearchPicker, transport: &ScriptedTransport, calls: usize) {
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        picker.pump();
        if transport.completed() >= calls && !picker.state().loading {
            break;
        }
        assert!(Instant::now() < deadline, "picker did not settle");
        thread::sleep(Duration::from_millis(5));
    }
    thread::sleep(Duration::from_millis(20));
    picker.pump();
}

fn row_names(picker: &RemoteSearchPicker) -> Vec<&str> {
    picker
        .elements()
        .options
        .rows()
        .iter()
        .map(|item| item.name.as_str())
        .collect()
}

#[test]
fn typing_burst_issues_one_request_with_last_value() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({ "companies": [], "has_more": false })));
    let mut picker = bind(config(), &transport);
    let start = Instant::now();

    picker.handle(PickerEvent::Input("a".into()), start);
    picker.handle(PickerEvent::Input("ac".into()), start + Duration::from_millis(100));
    picker.handle(PickerEvent::Input("acm ".into()), start + Duration::from_millis(200));

    assert!(!picker.tick(start + Duration::from_millis(450)));
    assert_eq!(picker.state().request_id, 0);
    assert!(picker.tick(start + Duration::from_millis(500)));
    assert!(!picker.tick(start + Duration::from_millis(900)));

    settle(&mut picker, &transport, 1);
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(param(&calls[0], "q"), Some("acm"));
    assert_eq!(picker.state().query, "acm");
    assert!(picker.is_open());
}

#[test]
fn slower_superseded_response_is_never_rendered() {
    let transport = ScriptedTransport::new(|pairs| match param(pairs, "q") {
        Some("ac") => Reply::after(
            Duration::from_millis(150),
            json!({ "companies": [{ "id": 1, "name": "Acme" }], "has_more": false }),
        ),
        _ => Reply::now(json!({ "companies": [{ "id": 2, "name": "Acme Corp" }], "has_more": false })),
    });
    let mut picker = bind(config(), &transport);

    picker.search("ac");
    picker.search("acm");
    settle(&mut picker, &transport, 2);

    assert_eq!(row_names(&picker), ["Acme Corp"]);
    assert_eq!(picker.state().items.len(), 1);
    assert!(!picker.state().has_more);
}

#[test]
fn results_for_an_old_request_id_do_not_touch_state() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({ "companies": [] })));
    let mut picker = bind(config(), &transport);
    picker.search("first");
    picker.search("second");
    let current = picker.state().request_id;

    let applied = picker.apply(FetchResult {
        id: current - 1,
        outcome: Ok(SearchPage::new(vec![Item::new(1, "Stale")], true)),
    });

    assert!(!applied);
    assert!(picker.state().items.is_empty());
    assert!(picker.state().loading);
    assert!(!picker.state().has_more);
}

#[test]
fn scrolling_accumulates_pages_until_exhausted() {
    let transport = ScriptedTransport::new(|pairs| match param(pairs, "offset") {
        Some("0") => Reply::now(json!({ "companies": companies(0..10), "has_more": true })),
        _ => Reply::now(json!({ "companies": companies(10..20), "has_more": false })),
    });
    let mut picker = bind(config(), &transport);
    let now = Instant::now();

    picker.search("");
    settle(&mut picker, &transport, 1);
    assert_eq!(picker.elements().status.text(), "Scroll for more.");

    picker.handle(PickerEvent::Scroll(ScrollMetrics::new(0, 100, 400)), now);
    assert_eq!(transport.calls().len(), 1, "far from the bottom");

    picker.handle(PickerEvent::Scroll(ScrollMetrics::new(290, 100, 400)), now);
    settle(&mut picker, &transport, 2);

    let state = picker.state();
    assert_eq!(state.items.len(), 20);
    assert_eq!(state.offset, 20);
    assert!(!state.has_more);
    assert_eq!(param(&transport.calls()[1], "offset"), Some("10"));
    assert_eq!(picker.elements().options.len(), 20);
    assert_eq!(picker.elements().status.text(), "");

    picker.handle(PickerEvent::Scroll(ScrollMetrics::new(700, 100, 800)), now);
    assert!(!picker.load_more());
    thread::sleep(Duration::from_millis(20));
    assert_eq!(transport.calls().len(), 2);
}

#[test]
fn load_more_waits_for_the_outstanding_request() {
    let transport = ScriptedTransport::new(|_| {
        Reply::after(
            Duration::from_millis(50),
            json!({ "companies": companies(0..10), "has_more": true }),
        )
    });
    let mut picker = bind(config(), &transport);
    picker.search("");
    assert!(picker.state().loading);
    assert!(!picker.load_more());
    settle(&mut picker, &transport, 1);
    assert!(picker.load_more());
}

#[test]
fn search_supersedes_while_loading() {
    let transport = ScriptedTransport::new(|_| {
        Reply::after(Duration::from_millis(30), json!({ "companies": [], "has_more": false }))
    });
    let mut picker = bind(config(), &transport);
    picker.search("a");
    let first = picker.state().request_id;
    picker.search("ab");
    assert!(picker.state().request_id > first);
    settle(&mut picker, &transport, 2);
    assert_eq!(transport.calls().len(), 2);
}

#[test]
fn selecting_commits_id_and_name_and_closes() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({})));
    let mut picker = bind(config(), &transport);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    picker.on_select(move |item| sink.lock().expect("sink").push(item.name.clone()));
    picker.open();

    picker.select(Item::new(7, "Beta Ltd"));

    assert_eq!(picker.hidden_value(), "7");
    assert_eq!(picker.elements().text.value(), "Beta Ltd");
    assert!(!picker.is_open());
    assert_eq!(*seen.lock().expect("seen"), ["Beta Ltd"]);
    let changes = picker.drain_changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].value, "7");
    assert!(picker.drain_changes().is_empty());
    assert_eq!(picker.validate_submit(), Ok("7".to_string()));
}

#[test]
fn name_commit_writes_the_name_into_the_hidden_field() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({})));
    let mut picker = bind(config().with_commit(CommitField::Name), &transport);
    picker.select(Item::new(7, "Beta Ltd"));
    assert_eq!(picker.hidden_value(), "Beta Ltd");
}

#[test]
fn choosing_a_row_selects_the_rendered_item() {
    let transport = ScriptedTransport::new(|_| {
        Reply::now(json!({ "companies": [{ "id": 1, "name": "Acme" }, { "id": 2, "name": "Beta" }] }))
    });
    let mut picker = bind(config(), &transport);
    let now = Instant::now();
    picker.search("");
    settle(&mut picker, &transport, 1);

    picker.handle(PickerEvent::Choose(9), now);
    assert_eq!(picker.hidden_value(), "");

    picker.handle(PickerEvent::Choose(1), now);
    assert_eq!(picker.hidden_value(), "2");
    assert_eq!(picker.selection().map(|item| item.name.as_str()), Some("Beta"));
}

#[test]
fn empty_page_shows_no_results_instead_of_an_error() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({ "companies": [], "has_more": false })));
    let mut picker = bind(config(), &transport);
    picker.search("zzz");
    settle(&mut picker, &transport, 1);

    assert!(picker.elements().options.is_empty());
    assert_eq!(picker.elements().status.text(), "No results found.");
}

#[test]
fn failed_request_resets_to_an_empty_list() {
    let transport = ScriptedTransport::new(|pairs| match param(pairs, "q") {
        None => Reply::now(json!({ "companies": companies(0..10), "has_more": true })),
        Some(_) => Reply {
            delay: Duration::ZERO,
            body: Err(FetchError::Status { status: 500 }),
        },
    });
    let mut picker = bind(config(), &transport);
    picker.search("");
    settle(&mut picker, &transport, 1);
    assert_eq!(picker.elements().options.len(), 10);

    picker.search("boom");
    settle(&mut picker, &transport, 2);

    let state = picker.state();
    assert!(state.items.is_empty());
    assert!(!state.has_more);
    assert!(!state.loading);
    assert!(picker.elements().options.is_empty());
    assert_eq!(picker.elements().status.text(), "Could not load results.");
}

#[test]
fn focus_opens_and_browses_without_a_query() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({ "companies": companies(0..3) })));
    let mut picker = bind(config().with_param("active_only", "1"), &transport);

    picker.handle(PickerEvent::Focus, Instant::now());
    assert!(picker.is_open());
    assert_eq!(picker.elements().status.text(), "Loading...");
    settle(&mut picker, &transport, 1);

    let calls = transport.calls();
    assert_eq!(param(&calls[0], "q"), None);
    assert_eq!(param(&calls[0], "limit"), Some("10"));
    assert_eq!(param(&calls[0], "active_only"), Some("1"));
    assert_eq!(picker.elements().options.len(), 3);
}

#[test]
fn click_during_pending_input_only_opens_the_menu() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({ "companies": [] })));
    let mut picker = bind(config(), &transport);
    let start = Instant::now();

    picker.handle(PickerEvent::Input("be".into()), start);
    picker.handle(PickerEvent::Click, start + Duration::from_millis(10));
    assert!(picker.is_open());
    assert_eq!(picker.state().request_id, 0);

    assert!(picker.tick(start + Duration::from_millis(300)));
    settle(&mut picker, &transport, 1);
    assert_eq!(param(&transport.calls()[0], "q"), Some("be"));
}

#[test]
fn closing_keeps_results_for_reopening() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({ "companies": companies(0..2) })));
    let mut picker = bind(config(), &transport);
    picker.open();
    picker.search("");
    settle(&mut picker, &transport, 1);

    picker.handle(PickerEvent::ClickOutside, Instant::now());
    assert!(!picker.is_open());
    picker.open();
    assert_eq!(picker.elements().options.len(), 2);
    assert_eq!(transport.calls().len(), 1);
}

#[test]
fn typing_after_selection_invalidates_the_hidden_value() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({ "companies": [] })));
    let mut picker = bind(config(), &transport);
    picker.select(Item::new(7, "Beta Ltd"));

    picker.handle(PickerEvent::Input("Beta Lt".into()), Instant::now());

    assert_eq!(picker.hidden_value(), "");
    assert!(picker.selection().is_none());
    assert_eq!(
        picker.elements().text.validity(),
        Some("Select an item from the list.")
    );
    assert!(picker.validate_submit().is_err());
}

#[test]
fn free_text_policy_submits_the_trimmed_query() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({ "companies": [] })));
    let mut picker = bind(config().with_submit(SubmitPolicy::FreeText), &transport);
    let start = Instant::now();

    picker.handle(PickerEvent::Input("  acme ".into()), start);
    assert_eq!(picker.elements().text.validity(), None);
    assert!(picker.tick(start + Duration::from_secs(1)));
    assert_eq!(picker.hidden_value(), "acme");
    settle(&mut picker, &transport, 1);

    picker.handle(PickerEvent::Input("  acme !".into()), start);
    assert_eq!(picker.validate_submit(), Ok("acme !".to_string()));
}

#[test]
fn incomplete_anchors_or_endpoint_skip_binding() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({})));

    let mut anchors = PickerAnchors::complete("companies", "company_id");
    anchors.menu = None;
    assert!(RemoteSearchPicker::initialize(anchors, config(), transport.clone()).is_none());

    let anchors = PickerAnchors::complete("companies", "company_id");
    assert!(RemoteSearchPicker::initialize(anchors, PickerConfig::new(""), transport.clone()).is_none());

    let anchors = PickerAnchors::complete("companies", "company_id");
    let zero = config().with_page_size(0);
    assert!(RemoteSearchPicker::initialize(anchors, zero, transport.clone()).is_none());
    assert!(transport.calls().is_empty());
}

#[test]
fn mounting_twice_binds_once() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({ "companies": [] })));
    let mut registry = PickerRegistry::new();
    let start = Instant::now();

    assert!(
        registry
            .mount(PickerAnchors::complete("companies", "company_id"), config(), transport.clone())
            .is_some()
    );
    assert!(
        registry
            .mount(
                PickerAnchors::complete("companies", "company_id"),
                config().with_page_size(50),
                transport.clone(),
            )
            .is_some()
    );
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("companies").map(|p| p.state().limit), Some(10));

    assert!(registry.dispatch("companies", PickerEvent::Input("acme".into()), start));
    assert_eq!(registry.tick(start + Duration::from_secs(1)), 1);

    let deadline = Instant::now() + Duration::from_secs(3);
    while transport.completed() < 1 {
        assert!(Instant::now() < deadline, "request never completed");
        thread::sleep(Duration::from_millis(5));
    }
    thread::sleep(Duration::from_millis(20));
    registry.pump();
    assert_eq!(transport.calls().len(), 1);
}

#[test]
fn registry_ignores_anchors_without_a_container() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({})));
    let mut registry = PickerRegistry::new();
    let mut anchors = PickerAnchors::complete("companies", "company_id");
    anchors.container = None;
    assert!(registry.mount(anchors, config(), transport.clone()).is_none());
    assert!(registry.is_empty());
    assert!(!registry.dispatch("companies", PickerEvent::Focus, Instant::now()));
}

#[test]
fn unmounting_allows_a_fresh_bind() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({})));
    let mut registry = PickerRegistry::new();
    registry.mount(PickerAnchors::complete("companies", "company_id"), config(), transport.clone());
    assert!(registry.unmount("companies").is_some());
    let picker = registry
        .mount(
            PickerAnchors::complete("companies", "company_id"),
            config().with_page_size(25),
            transport.clone(),
        )
        .expect("rebinds");
    assert_eq!(picker.state().limit, 25);
}

#[test]
fn registry_collects_selection_changes() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({})));
    let mut registry = PickerRegistry::new();
    registry
        .mount(PickerAnchors::complete("companies", "company_id"), config(), transport.clone())
        .expect("mounted")
        .select(Item::new("c-1", "Gamma"));
    let changes = registry.drain_changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].picker, "companies");
    assert_eq!(changes[0].value, "c-1");
}

#[test]
fn new_search_reports_a_cleared_change() {
    let transport = ScriptedTransport::new(|_| Reply::now(json!({ "companies": [] })));
    let mut picker = bind(config(), &transport);
    let start = Instant::now();
    picker.select(Item::new(7, "Beta Ltd"));
    let committed = picker.drain_changes();
    assert_eq!(committed.len(), 1);
    assert!(!committed[0].is_cleared());

    picker.handle(PickerEvent::Input("Gam".into()), start);
    assert!(picker.drain_changes().is_empty());
    assert!(picker.tick(start + Duration::from_secs(1)));

    let changes = picker.drain_changes();
    assert_eq!(changes.len(), 1);
    assert!(changes[0].is_cleared());
    assert_eq!(changes[0].value, "");
    assert_eq!(changes[0].picker, "companies");
    settle(&mut picker, &transport, 1);
}
