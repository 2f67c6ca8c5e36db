//! Integration tests for the rtam core library.
//!
//! These exercise descriptors, hooks and result codes together the way a
//! firmware image declares them.

use std::sync::atomic::{AtomicUsize, Ordering};

use rtam_core::{
    AppDescriptor, AppFlags, AppHooks, AppLoader, Capabilities, FnHooks, LifecycleError, Outcome,
    ProcessState, StatusMask, Transition,
};

/// Hooks implemented on a stateful type rather than plain functions.
struct Counter {
    starts: AtomicUsize,
}

impl AppHooks for Counter {
    fn capabilities(&self) -> Capabilities {
        Capabilities::START | Capabilities::STOP
    }

    fn start(&self) -> Outcome {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Outcome::Ok
    }

    fn stop(&self) -> Outcome {
        Outcome::Fail
    }
}

struct BoardInfo {
    revision: u8,
}

fn ok() -> Outcome {
    Outcome::Ok
}

fn pending() -> Outcome {
    Outcome::Processing
}

static COUNTER: Counter = Counter {
    starts: AtomicUsize::new(0),
};
static ASYNC: FnHooks = FnHooks::new().with_start(pending).with_resume(ok);
static BOARD: BoardInfo = BoardInfo { revision: 3 };

static IMAGE: [AppDescriptor; 3] = [
    AppDescriptor::new("counter")
        .with_flags(AppFlags::AUTO_START)
        .with_interface(&COUNTER),
    AppDescriptor::new("async")
        .with_flags(AppFlags::BACKGROUND)
        .with_interface(&ASYNC)
        .with_required(&["counter"])
        .with_info(&BOARD),
    AppDescriptor::new("bare").with_conflicted(&["async"]),
];

#[test]
fn test_image_through_loader() {
    let apps = (&IMAGE).load();

    assert_eq!(apps.len(), 3);
    assert!(apps[0].is_auto_start());
    assert!(apps[1].is_background());
    assert!(apps[1].requires("counter"));
    assert!(apps[2].interface.is_none());
    assert_eq!(apps[2].dependencies.conflicted, &["async"]);
}

#[test]
fn test_hooks_dispatch_through_trait_objects() {
    let hooks = IMAGE[0].interface.unwrap();

    assert!(hooks.capabilities().supports(Transition::Start));
    assert!(!hooks.capabilities().supports(Transition::Resume));

    assert_eq!(hooks.invoke(Transition::Start), Outcome::Ok);
    assert_eq!(hooks.invoke(Transition::Stop), Outcome::Fail);
    assert_eq!(hooks.invoke(Transition::Resume), Outcome::NotSupported);
    assert!(COUNTER.starts.load(Ordering::SeqCst) >= 1);
}

#[test]
fn test_fn_hooks_capabilities() {
    let hooks = IMAGE[1].interface.unwrap();

    assert_eq!(
        hooks.capabilities(),
        Capabilities::START | Capabilities::RESUME
    );
    assert_eq!(
        hooks.invoke(Transition::Start).into_result("async", Transition::Start),
        Err(LifecycleError::Processing("async".into()))
    );
}

#[test]
fn test_info_payload_round_trips() {
    let info = IMAGE[1].info.unwrap();
    let board = info.downcast_ref::<BoardInfo>().unwrap();
    assert_eq!(board.revision, 3);

    assert!(IMAGE[0].info.is_none());
}

#[test]
fn test_completion_report_rebuilds_state() {
    // Start pending, then reported complete
    let mut status = ProcessState::Starting.status();
    status.insert(StatusMask::STARTED);
    status.remove(StatusMask::PROCESSING);
    assert_eq!(ProcessState::from_status(status), ProcessState::Suspended);

    // Clearing started on a running process stops it
    let mut status = ProcessState::Running.status();
    status.remove(StatusMask::STARTED);
    assert_eq!(ProcessState::from_status(status), ProcessState::Stopped);
}

#[test]
fn test_error_outcomes() {
    let cases = [
        (LifecycleError::NotFound("a".into()), Outcome::Fail),
        (LifecycleError::NoInterface("a".into()), Outcome::Fail),
        (
            LifecycleError::HookFailed("a".into(), Transition::Stop),
            Outcome::Fail,
        ),
        (LifecycleError::Processing("a".into()), Outcome::Processing),
        (
            LifecycleError::NotSupported("a".into(), Transition::Suspend),
            Outcome::NotSupported,
        ),
    ];

    for (err, outcome) in cases {
        assert_eq!(err.outcome(), outcome, "{}", err);
    }
}
