use otter_curve::map::{
    Control, ControlPosition, EngineMap, ErrorHandler, LngLat, MapEngine, MapLifecycleManager,
    MapOptions, ViewportConstraints,
};
use otter_curve::{DeferredMapError, MapError};
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(usize),
    AddControl(usize, Control, ControlPosition),
    OnError(usize),
    Remove(usize),
}

/// Shared record of everything the fake engine was asked to do.
#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<Call>>>,
    options: Rc<RefCell<Vec<Value>>>,
    handlers: Rc<RefCell<Vec<ErrorHandler>>>,
    live: Rc<Cell<usize>>,
    next_id: Rc<Cell<usize>>,
    fail_with: Rc<RefCell<Option<String>>>,
    fail_remove: Rc<Cell<bool>>,
    loaded: Rc<Cell<bool>>,
}

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn creates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Create(_)))
            .count()
    }

    fn engine(&self) -> FakeEngine {
        FakeEngine { rec: self.clone() }
    }
}

#[derive(Debug, Clone)]
struct FakeTarget {
    attached: bool,
}

fn attached() -> Option<FakeTarget> {
    Some(FakeTarget { attached: true })
}

struct FakeEngine {
    rec: Recorder,
}

struct FakeMap {
    id: usize,
    rec: Recorder,
}

impl MapEngine for FakeEngine {
    type Target = FakeTarget;
    type Map = FakeMap;

    fn is_render_target(&self, target: &FakeTarget) -> bool {
        target.attached
    }

    fn create(&self, options: MapOptions<'_, FakeTarget>) -> Result<FakeMap, MapError> {
        if let Some(msg) = self.rec.fail_with.borrow().clone() {
            return Err(MapError::engine(msg));
        }
        assert!(options.container.attached);
        self.rec
            .options
            .borrow_mut()
            .push(serde_json::to_value(&options).unwrap());
        let id = self.rec.next_id.get();
        self.rec.next_id.set(id + 1);
        self.rec.live.set(self.rec.live.get() + 1);
        self.rec.calls.borrow_mut().push(Call::Create(id));
        Ok(FakeMap {
            id,
            rec: self.rec.clone(),
        })
    }
}

impl EngineMap for FakeMap {
    fn add_control(&mut self, control: Control, position: ControlPosition) {
        self.rec
            .calls
            .borrow_mut()
            .push(Call::AddControl(self.id, control, position));
    }

    fn on_error(&mut self, handler: ErrorHandler) {
        self.rec.handlers.borrow_mut().push(handler);
        self.rec.calls.borrow_mut().push(Call::OnError(self.id));
    }

    fn loaded(&self) -> bool {
        self.rec.loaded.get()
    }

    fn remove(self) -> Result<(), MapError> {
        self.rec.live.set(self.rec.live.get() - 1);
        self.rec.calls.borrow_mut().push(Call::Remove(self.id));
        if self.rec.fail_remove.get() {
            return Err(MapError::Teardown("container already gone".into()));
        }
        Ok(())
    }
}

fn manager_with_token(rec: &Recorder, token: &str) -> MapLifecycleManager<FakeEngine> {
    let result = MapLifecycleManager::new(rec.engine(), attached(), token);
    result.unwrap()
}

fn manager(rec: &Recorder) -> MapLifecycleManager<FakeEngine> {
    manager_with_token(rec, "pk.test-token")
}

#[test]
fn start_yields_an_instance() {
    let rec = Recorder::default();
    let mut m = manager(&rec);
    assert!(m.instance().is_none());
    m.start().unwrap();
    assert!(m.instance().is_some());
    assert!(m.is_started());
    assert_eq!(rec.live.get(), 1);
}

#[test]
fn construction_does_not_render() {
    let rec = Recorder::default();
    let _m = manager(&rec);
    assert!(rec.calls().is_empty());
}

#[test]
fn empty_credential_is_rejected_for_any_mount() {
    for mount in [attached(), Some(FakeTarget { attached: false }), None] {
        for token in ["", "   "] {
            let rec = Recorder::default();
            let result = MapLifecycleManager::new(rec.engine(), mount.clone(), token);
            assert!(matches!(result, Err(MapError::Configuration(_))));
            assert!(rec.calls().is_empty());
        }
    }
}

#[test]
fn missing_or_detached_mount_is_rejected() {
    let rec = Recorder::default();
    let result = MapLifecycleManager::new(rec.engine(), None, "pk.test-token");
    assert!(matches!(result, Err(MapError::Configuration(_))));

    let detached = Some(FakeTarget { attached: false });
    let result = MapLifecycleManager::new(rec.engine(), detached, "pk.test-token");
    assert!(matches!(result, Err(MapError::Configuration(_))));
    assert!(rec.calls().is_empty());
}

#[test]
fn stop_releases_the_instance() {
    let rec = Recorder::default();
    let mut m = manager(&rec);
    m.start().unwrap();
    m.stop();
    assert!(m.instance().is_none());
    assert!(!m.is_started());
    assert_eq!(rec.live.get(), 0);

    m.stop();
    let removes = rec
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::Remove(_)))
        .count();
    assert_eq!(removes, 1);
}

#[test]
fn failed_teardown_still_leaves_the_manager_stopped() {
    let rec = Recorder::default();
    rec.fail_remove.set(true);
    let mut m = manager(&rec);
    m.start().unwrap();
    m.stop();
    assert!(m.instance().is_none());
    assert_eq!(rec.live.get(), 0);

    rec.fail_remove.set(false);
    m.start().unwrap();
    assert!(m.is_started());
    rec.fail_remove.set(true);
    drop(m);
    assert_eq!(rec.live.get(), 0);
}

#[test]
fn stop_before_start_is_a_no_op() {
    let rec = Recorder::default();
    let mut m = manager(&rec);
    m.stop();
    m.stop();
    assert!(m.instance().is_none());
    assert!(rec.calls().is_empty());
}

#[test]
fn second_start_is_rejected_without_a_second_engine() {
    let rec = Recorder::default();
    let mut m = manager(&rec);
    m.start().unwrap();
    assert_eq!(m.start(), Err(MapError::AlreadyStarted));
    assert_eq!(rec.creates(), 1);
    assert_eq!(rec.live.get(), 1);
    assert!(m.instance().is_some());
    assert!(!rec.calls().contains(&Call::Remove(0)));
}

#[test]
fn restart_tears_down_before_rebuilding() {
    let rec = Recorder::default();
    let mut m = manager(&rec);
    m.start().unwrap();
    m.stop();
    m.start().unwrap();
    assert_eq!(rec.live.get(), 1);
    let calls = rec.calls();
    let removed = calls.iter().position(|c| *c == Call::Remove(0)).unwrap();
    let recreated = calls.iter().position(|c| *c == Call::Create(1)).unwrap();
    assert!(removed < recreated);
}

#[test]
fn start_configures_engine_and_controls() {
    let rec = Recorder::default();
    let mut m = manager(&rec);
    m.start().unwrap();

    assert!(rec.calls().contains(&Call::AddControl(
        0,
        Control::Navigation,
        ControlPosition::TopRight
    )));

    let options = rec.options.borrow()[0].clone();
    assert_eq!(options["accessToken"], json!("pk.test-token"));
    assert_eq!(options["center"], json!([10.4515, 51.1657]));
    assert_eq!(options["zoom"], json!(4.0));
    assert_eq!(options["minZoom"], json!(4.0));
    assert_eq!(options["maxZoom"], json!(12.0));
    assert_eq!(options["maxBounds"], json!([[0.0, 40.0], [25.0, 80.0]]));

    let ids: Vec<&str> = options["style"]["layers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["background", "landcover", "water", "water-outline"]);
}

#[test]
fn each_start_passes_its_own_credential() {
    let rec = Recorder::default();
    let mut a = manager_with_token(&rec, "pk.first");
    let mut b = manager_with_token(&rec, "pk.second");
    a.start().unwrap();
    b.start().unwrap();
    let options = rec.options.borrow();
    assert_eq!(options[0]["accessToken"], json!("pk.first"));
    assert_eq!(options[1]["accessToken"], json!("pk.second"));
}

#[test]
fn engine_failure_is_reported_and_leaves_nothing_behind() {
    let rec = Recorder::default();
    *rec.fail_with.borrow_mut() = Some("WebGL unavailable".to_string());
    let mut m = manager(&rec);
    assert_eq!(
        m.start(),
        Err(MapError::EngineInitialization("WebGL unavailable".to_string()))
    );
    assert!(m.instance().is_none());
    assert_eq!(rec.live.get(), 0);

    *rec.fail_with.borrow_mut() = None;
    m.start().unwrap();
    assert!(m.instance().is_some());
}

#[test]
fn deferred_errors_reach_the_handler() {
    let rec = Recorder::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut m = manager(&rec);
    {
        let seen = seen.clone();
        let handler = move |e: DeferredMapError| seen.borrow_mut().push(e);
        m.on_deferred_error(Rc::new(handler));
    }
    m.start().unwrap();
    assert!(rec.calls().contains(&Call::OnError(0)));

    let handler = rec.handlers.borrow()[0].clone();
    handler(DeferredMapError::new("Unauthorized", Some(401)));
    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].is_authentication());
}

#[test]
fn no_error_listener_without_a_handler() {
    let rec = Recorder::default();
    let mut m = manager(&rec);
    m.start().unwrap();
    assert!(!rec.calls().iter().any(|c| matches!(c, Call::OnError(_))));
}

#[test]
fn dropping_a_started_manager_stops_it() {
    let rec = Recorder::default();
    {
        let mut m = manager(&rec);
        m.start().unwrap();
        assert_eq!(rec.live.get(), 1);
    }
    assert_eq!(rec.live.get(), 0);
    assert_eq!(rec.calls().last(), Some(&Call::Remove(0)));
}

#[test]
fn attach_starts_immediately() {
    let rec = Recorder::default();
    let result = MapLifecycleManager::attach(rec.engine(), attached(), "pk.test-token", None);
    let m = result.unwrap();
    assert!(m.is_started());
    drop(m);
    assert_eq!(rec.live.get(), 0);

    *rec.fail_with.borrow_mut() = Some("no context".to_string());
    let result = MapLifecycleManager::attach(rec.engine(), attached(), "pk.test-token", None);
    assert!(matches!(result, Err(MapError::EngineInitialization(_))));
    assert_eq!(rec.live.get(), 0);
}

#[test]
fn custom_viewport_is_validated_and_applied() {
    let rec = Recorder::default();
    let bad = ViewportConstraints {
        zoom: 2.0,
        ..ViewportConstraints::game_region()
    };
    let rejected = manager(&rec).with_viewport(bad);
    assert!(matches!(rejected, Err(MapError::Configuration(_))));

    let good = ViewportConstraints {
        center: LngLat::new(13.405, 52.52),
        zoom: 8.0,
        ..ViewportConstraints::game_region()
    };
    let mut m = manager(&rec).with_viewport(good).unwrap();
    m.start().unwrap();
    assert_eq!(m.viewport(), &good);
    let options = rec.options.borrow();
    assert_eq!(options[0]["center"], json!([13.405, 52.52]));
    assert_eq!(options[0]["zoom"], json!(8.0));
}

#[test]
fn readiness_follows_the_instance() {
    let rec = Recorder::default();
    let mut m = manager(&rec);
    rec.loaded.set(true);
    assert!(!m.is_loaded());
    m.start().unwrap();
    assert!(m.is_loaded());
    rec.loaded.set(false);
    assert!(!m.is_loaded());
    m.stop();
    assert!(!m.is_loaded());
}
