//! Runtime integration tests over a scripted input source and test backend.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use solas::core::event::InputEvent;
use solas::{
    App, Command, Event, EventKind, KeyCode, KeyEvent, Modifiers, MouseEvent, MouseEventKind,
    Runtime, RuntimeConfig, RuntimeState, ScriptedInput, Size, TestBackend, View, stack, text,
};

/// Shared journal of what the app observed.
type Journal = Arc<Mutex<Vec<String>>>;

/// Test application: records events, drives itself via a closure.
struct Probe {
    journal: Journal,
    on_event: Box<dyn FnMut(&Event, &Journal) -> Vec<Command>>,
}

impl Probe {
    fn new(on_event: impl FnMut(&Event, &Journal) -> Vec<Command> + 'static) -> (Self, Journal) {
        let journal = Journal::default();
        (
            Self {
                journal: journal.clone(),
                on_event: Box::new(on_event),
            },
            journal,
        )
    }
}

impl App for Probe {
    fn handle_event(&mut self, event: &Event) -> Vec<Command> {
        let label = match &event.kind {
            EventKind::Key(k) => format!("key:{}", k.code),
            EventKind::Mouse(_) => "mouse".to_string(),
            EventKind::Tick(_) => "tick".to_string(),
            EventKind::Resize(s) => format!("resize:{}x{}", s.width, s.height),
            EventKind::Error(e) => format!("error:{}", e.cause),
            EventKind::App(_) => match event.downcast_app::<String>() {
                Some(s) => format!("app:{s}"),
                None => "app".to_string(),
            },
            EventKind::Quit | EventKind::Batch(_) => "unexpected".to_string(),
            _ => "unexpected".to_string(),
        };
        self.journal.lock().unwrap().push(label);
        (self.on_event)(event, &self.journal)
    }

    fn view(&self) -> Box<dyn View> {
        stack(vec![text("probe").boxed()]).boxed()
    }
}

fn key(c: char) -> InputEvent {
    InputEvent::Key(KeyEvent::plain(KeyCode::Char(c)))
}

fn config(input: ScriptedInput) -> RuntimeConfig {
    RuntimeConfig {
        alternate_screen: true,
        input_source: Some(Box::new(input)),
        ..RuntimeConfig::default()
    }
}

fn keys_of(journal: &Journal) -> Vec<String> {
    journal
        .lock()
        .unwrap()
        .iter()
        .filter(|l| l.starts_with("key:"))
        .cloned()
        .collect()
}

#[tokio::test]
async fn events_arrive_in_fifo_order() {
    let (app, journal) = Probe::new(|_, _| Vec::new());
    let input = ScriptedInput::new(vec![key('a'), key('b'), key('c')]);
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    rt.run().await.unwrap();

    assert_eq!(keys_of(&journal), vec!["key:a", "key:b", "key:c"]);
    // The initial resize is the first observed event.
    assert_eq!(journal.lock().unwrap()[0], "resize:40x10");
    assert_eq!(rt.state(), RuntimeState::Stopped);
}

#[tokio::test]
async fn batch_unfolds_in_order_without_interleaving() {
    let (app, _) = Probe::new(|event, journal| {
        if matches!(event.kind, EventKind::Key(_)) {
            return vec![Command::task(|_| {
                Ok(Some(Event::batch(vec![
                    Event::app("b1".to_string()),
                    Event::app("b2".to_string()),
                    Event::app("b3".to_string()),
                ])))
            })];
        }
        let seen = journal
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.starts_with("app:"))
            .count();
        if seen >= 3 {
            return vec![Command::quit()];
        }
        Vec::new()
    });
    let journal = app.journal.clone();
    let input = ScriptedInput::new(vec![key('x')]).hold_open();
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    rt.run().await.unwrap();

    let entries = journal.lock().unwrap();
    let first = entries.iter().position(|l| l == "app:b1").unwrap();
    assert_eq!(entries[first], "app:b1");
    assert_eq!(entries[first + 1], "app:b2");
    assert_eq!(entries[first + 2], "app:b3");
}

#[tokio::test]
async fn sequence_command_preserves_order() {
    let (app, _) = Probe::new(|event, _| {
        if matches!(event.kind, EventKind::Resize(_)) {
            return vec![Command::sequence(vec![
                Command::task(|_| Ok(Some(Event::app("s1".to_string())))),
                Command::task(|_| Ok(Some(Event::app("s2".to_string())))),
                Command::task(|_| Ok(Some(Event::app("s3".to_string())))),
            ])];
        }
        if event.downcast_app::<String>().is_some_and(|s| s == "s3") {
            return vec![Command::quit()];
        }
        Vec::new()
    });
    let journal = app.journal.clone();
    let input = ScriptedInput::new(vec![]).hold_open();
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    rt.run().await.unwrap();

    let entries = journal.lock().unwrap();
    let apps: Vec<&String> = entries.iter().filter(|l| l.starts_with("app:")).collect();
    assert_eq!(apps, ["app:s1", "app:s2", "app:s3"]);
}

#[tokio::test]
async fn failed_command_becomes_error_event() {
    let (app, _) = Probe::new(|event, _| match &event.kind {
        EventKind::Resize(_) => vec![Command::task(|_| Err("disk on fire".into()))],
        EventKind::Error(_) => vec![Command::quit()],
        _ => Vec::new(),
    });
    let journal = app.journal.clone();
    let input = ScriptedInput::new(vec![]).hold_open();
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    rt.run().await.unwrap();

    let entries = journal.lock().unwrap();
    assert!(
        entries
            .iter()
            .any(|l| l.starts_with("error:") && l.contains("disk on fire")),
        "entries: {entries:?}"
    );
}

#[tokio::test]
async fn panicking_command_becomes_error_event() {
    let (app, _) = Probe::new(|event, _| match &event.kind {
        EventKind::Resize(_) => vec![Command::task(|_| panic!("worker exploded"))],
        EventKind::Error(_) => vec![Command::quit()],
        _ => Vec::new(),
    });
    let journal = app.journal.clone();
    let input = ScriptedInput::new(vec![]).hold_open();
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    rt.run().await.unwrap();

    let entries = journal.lock().unwrap();
    assert!(
        entries
            .iter()
            .any(|l| l.starts_with("error:") && l.contains("worker exploded")),
        "entries: {entries:?}"
    );
}

#[tokio::test]
async fn resize_reaches_app_and_screen() {
    let (app, journal) = Probe::new(|_, _| Vec::new());
    let input = ScriptedInput::new(vec![InputEvent::Resize(Size::new(100, 30))]);
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    rt.run().await.unwrap();

    let entries = journal.lock().unwrap();
    assert!(entries.contains(&"resize:100x30".to_string()));
}

#[tokio::test]
async fn input_eof_quits_and_restores_terminal() {
    let (app, _) = Probe::new(|_, _| Vec::new());
    let input = ScriptedInput::new(vec![key('a')]);
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();

    rt.run().await.unwrap();

    assert_eq!(rt.state(), RuntimeState::Stopped);
    let terminal = rt.terminal();
    assert!(!terminal.is_raw_mode());
    assert!(!terminal.is_alternate_screen());
    assert!(!terminal.is_cursor_hidden());
    assert!(!terminal.is_bracketed_paste());
}

#[tokio::test]
async fn terminal_modes_set_while_initialized() {
    let (app, _) = Probe::new(|_, _| Vec::new());
    let input = ScriptedInput::new(vec![]);
    let rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();

    assert_eq!(rt.state(), RuntimeState::Initialized);
    let terminal = rt.terminal();
    assert!(terminal.is_raw_mode());
    assert!(terminal.is_alternate_screen());
    assert!(terminal.is_cursor_hidden());
    assert!(terminal.is_bracketed_paste());
}

#[tokio::test]
async fn second_run_fails() {
    let (app, _) = Probe::new(|_, _| Vec::new());
    let input = ScriptedInput::new(vec![]);
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    rt.run().await.unwrap();
    assert!(rt.run().await.is_err());
}

#[tokio::test]
async fn quit_command_stops_the_loop() {
    let (app, _) = Probe::new(|event, _| {
        if matches!(event.kind, EventKind::Resize(_)) {
            vec![Command::quit()]
        } else {
            Vec::new()
        }
    });
    let input = ScriptedInput::new(vec![]).hold_open();
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    rt.run().await.unwrap();
    assert_eq!(rt.state(), RuntimeState::Stopped);
}

#[tokio::test]
async fn handle_stops_from_outside() {
    let (app, _) = Probe::new(|_, _| Vec::new());
    let input = ScriptedInput::new(vec![]).hold_open();
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    let handle = rt.handle();
    handle.stop();
    rt.run().await.unwrap();
    assert_eq!(rt.state(), RuntimeState::Stopped);
}

#[tokio::test]
async fn custom_tick_command_counts_monotonically() {
    let (app, _) = Probe::new(|event, _| {
        if matches!(event.kind, EventKind::Resize(_)) {
            return vec![Command::tick(Duration::from_millis(5), |t| {
                Event::app(format!("beat{}", t.frame))
            })];
        }
        if event.downcast_app::<String>().is_some_and(|s| s == "beat3") {
            return vec![Command::quit()];
        }
        Vec::new()
    });
    let journal = app.journal.clone();
    let input = ScriptedInput::new(vec![]).hold_open();
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    rt.run().await.unwrap();

    let entries = journal.lock().unwrap();
    let beats: Vec<&String> = entries.iter().filter(|l| l.starts_with("app:beat")).collect();
    assert_eq!(beats[..3], ["app:beat1", "app:beat2", "app:beat3"]);
}

#[tokio::test]
async fn long_running_command_observes_cancellation() {
    let (app, _) = Probe::new(|event, _| {
        if matches!(event.kind, EventKind::Resize(_)) {
            return vec![
                Command::task(|cancel| {
                    while !cancel.is_cancelled() {
                        std::thread::sleep(Duration::from_millis(5));
                    }
                    Ok(None)
                }),
                Command::quit(),
            ];
        }
        Vec::new()
    });
    let input = ScriptedInput::new(vec![]).hold_open();
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    // Completes promptly because shutdown cancels the worker.
    rt.run().await.unwrap();
    assert_eq!(rt.state(), RuntimeState::Stopped);
}

/// An app whose view panics on the first frame only.
struct FlakyView {
    frames: Arc<Mutex<u32>>,
    errors: Journal,
}

impl App for FlakyView {
    fn handle_event(&mut self, event: &Event) -> Vec<Command> {
        match &event.kind {
            EventKind::Error(e) => {
                self.errors.lock().unwrap().push(e.cause.clone());
                vec![Command::quit()]
            }
            _ => Vec::new(),
        }
    }

    fn view(&self) -> Box<dyn View> {
        let mut frames = self.frames.lock().unwrap();
        *frames += 1;
        if *frames == 1 {
            panic!("first frame is broken");
        }
        text("recovered").boxed()
    }
}

#[tokio::test]
async fn view_panic_becomes_error_event_and_loop_continues() {
    let errors = Journal::default();
    let app = FlakyView {
        frames: Arc::new(Mutex::new(0)),
        errors: errors.clone(),
    };
    let input = ScriptedInput::new(vec![]).hold_open();
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    rt.run().await.unwrap();

    let seen = errors.lock().unwrap();
    assert!(seen.iter().any(|c| c.contains("first frame is broken")));
    assert_eq!(rt.state(), RuntimeState::Stopped);
}

#[tokio::test]
async fn shift_tab_key_reaches_app() {
    let (app, journal) = Probe::new(|_, _| Vec::new());
    let input = ScriptedInput::new(vec![InputEvent::Key(KeyEvent::new(
        KeyCode::Tab,
        Modifiers::SHIFT,
    ))]);
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    rt.run().await.unwrap();
    assert!(journal.lock().unwrap().contains(&"key:Tab".to_string()));
}

#[tokio::test]
async fn mouse_event_reaches_app() {
    let (app, journal) = Probe::new(|_, _| Vec::new());
    let input = ScriptedInput::new(vec![InputEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Press,
        x: 1,
        y: 1,
        modifiers: Modifiers::NONE,
    })]);
    let mut rt = Runtime::new(TestBackend::new(40, 10), app, config(input)).unwrap();
    rt.run().await.unwrap();
    assert!(journal.lock().unwrap().contains(&"mouse".to_string()));
}
