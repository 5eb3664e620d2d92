//! The event-driven runtime.
//!
//! Owns the terminal, the screen pipeline, the focus manager and the
//! interactive registries, and drives a single-threaded UI loop: pop one
//! event, hand it to the application, dispatch the returned commands to the
//! worker pool, and re-render when due. Input decoding, the fps ticker, and
//! command workers run on background tasks that communicate exclusively
//! through the FIFO event queue.

use std::collections::VecDeque;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinSet;

use solas_core::Screen;
use solas_core::event::{KeyCode, MouseEventKind};
use solas_core::geometry::Position;
use solas_core::terminal::{MouseCapture, Terminal};

use crate::command::{CancelFlag, Command, TaskFn, TickBuilder};
use crate::context::RenderContext;
use crate::error::{Result, SolasError};
use crate::event::{Event, EventKind, TickEvent};
use crate::focus::FocusManager;
use crate::input::{CrosstermInput, InputSource};
use crate::interact::Hotspots;
use crate::view::View;

/// Poll window for the input task; bounds how long cancellation can go
/// unobserved.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// An application driven by the runtime.
///
/// `handle_event` and `view` are never called concurrently with themselves
/// or each other, and must not block; blocking work belongs in commands.
pub trait App {
    /// Called once during runtime construction. Returned commands are
    /// dispatched when the loop starts.
    fn init(&mut self) -> Vec<Command> {
        Vec::new()
    }

    /// Handle one event, possibly mutating state, and return follow-up
    /// commands.
    fn handle_event(&mut self, event: &Event) -> Vec<Command>;

    /// Describe the current screen. Called once per rendered frame; the
    /// returned tree is discarded after rendering.
    fn view(&self) -> Box<dyn View>;

    /// Called after the loop exits and the terminal is restored.
    fn destroy(&mut self) {}
}

/// Runtime configuration.
pub struct RuntimeConfig {
    /// Frames per second target for the tick scheduler.
    pub fps: u16,
    /// Mouse tracking mode.
    pub mouse_capture: MouseCapture,
    /// Whether bracketed paste is enabled.
    pub bracketed_paste: bool,
    /// Whether to switch to the alternate screen.
    pub alternate_screen: bool,
    /// Tab width applied to pasted text.
    pub paste_tab_width: u8,
    /// Number of concurrent command workers.
    pub worker_parallelism: usize,
    /// How long shutdown waits for in-flight commands.
    pub shutdown_grace: Duration,
    /// Override the input source (e.g. with a scripted source in tests).
    pub input_source: Option<Box<dyn InputSource>>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            mouse_capture: MouseCapture::Off,
            bracketed_paste: true,
            alternate_screen: true,
            paste_tab_width: 4,
            worker_parallelism: std::thread::available_parallelism().map_or(4, usize::from),
            shutdown_grace: Duration::from_millis(250),
            input_source: None,
        }
    }
}

/// Lifecycle state of a runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeState {
    /// Constructed; terminal modes set; loop not yet started.
    Initialized,
    /// Event loop running.
    Running,
    /// Quit observed; draining workers.
    Stopping,
    /// Loop exited and terminal restored.
    Stopped,
}

/// Cloneable handle for stopping the runtime or injecting events from
/// outside the loop.
#[derive(Clone)]
pub struct RuntimeHandle {
    tx: UnboundedSender<Event>,
}

impl RuntimeHandle {
    /// Enqueue an event. Returns false once the runtime is gone.
    pub fn send(&self, event: Event) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Request the runtime to stop.
    pub fn stop(&self) {
        let _ = self.tx.send(Event::quit());
    }
}

/// The event-driven runtime owning terminal, screen, and registries.
pub struct Runtime<T: Terminal, A: App> {
    terminal: T,
    app: A,
    screen: Screen,
    focus: FocusManager,
    hotspots: Hotspots,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
    pending: VecDeque<Event>,
    cancel: CancelFlag,
    workers: Arc<Semaphore>,
    tasks: JoinSet<()>,
    state: RuntimeState,
    frame_count: u64,
    last_render: Option<Instant>,
    frame_interval: Duration,
    alternate_screen: bool,
    shutdown_grace: Duration,
    init_commands: Vec<Command>,
    input: Option<Box<dyn InputSource>>,
}

impl<T: Terminal, A: App> Runtime<T, A> {
    /// Create a runtime: verifies the terminal, flips modes, queues the
    /// initial resize event, and collects the application's init commands.
    pub fn new(mut terminal: T, mut app: A, mut config: RuntimeConfig) -> Result<Self> {
        if !terminal.is_tty() {
            return Err(SolasError::Terminal("not a tty".into()));
        }

        terminal.enter_raw_mode()?;
        if config.alternate_screen {
            terminal.enter_alternate_screen()?;
        }
        terminal.set_mouse_capture(config.mouse_capture)?;
        terminal.set_bracketed_paste(config.bracketed_paste)?;
        terminal.hide_cursor()?;

        let screen = Screen::new(&terminal)?;
        let (tx, rx) = unbounded_channel();
        let _ = tx.send(Event::resize(screen.size()));

        let mut input = config
            .input_source
            .take()
            .unwrap_or_else(|| Box::new(CrosstermInput::new()));
        input.set_paste_tab_width(config.paste_tab_width);

        let init_commands = app.init();

        Ok(Self {
            terminal,
            app,
            screen,
            focus: FocusManager::new(),
            hotspots: Hotspots::new(),
            tx,
            rx,
            pending: VecDeque::new(),
            cancel: CancelFlag::new(),
            workers: Arc::new(Semaphore::new(config.worker_parallelism.max(1))),
            tasks: JoinSet::new(),
            state: RuntimeState::Initialized,
            frame_count: 0,
            last_render: None,
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(config.fps.max(1))),
            alternate_screen: config.alternate_screen,
            shutdown_grace: config.shutdown_grace,
            init_commands,
            input: Some(input),
        })
    }

    /// The runtime's lifecycle state.
    pub fn state(&self) -> RuntimeState {
        self.state
    }

    /// The number of frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Access the application.
    pub fn app(&self) -> &A {
        &self.app
    }

    /// Access the terminal backend.
    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// A cloneable handle for external stop/injection.
    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            tx: self.tx.clone(),
        }
    }

    /// Run the event loop until a quit event arrives. Fails when called on a
    /// runtime that is already running or has finished.
    pub async fn run(&mut self) -> Result<()> {
        if self.state != RuntimeState::Initialized {
            return Err(SolasError::AlreadyRunning);
        }
        self.state = RuntimeState::Running;

        self.spawn_input_task();
        self.spawn_fps_ticker();
        for command in std::mem::take(&mut self.init_commands) {
            self.dispatch_command(command);
        }

        let mut result = self.render_frame();
        while result.is_ok() {
            let event = match self.pending.pop_front() {
                Some(event) => event,
                None => match self.rx.recv().await {
                    Some(event) => event,
                    None => break,
                },
            };

            match event.kind {
                EventKind::Quit => break,
                // A batch unfolds atomically at the head of the queue.
                EventKind::Batch(events) => {
                    for inner in events.into_iter().rev() {
                        self.pending.push_front(inner);
                    }
                }
                _ => result = self.process_event(event),
            }
        }

        // The terminal is restored even when the loop failed.
        self.shutdown().await;
        result
    }

    fn process_event(&mut self, event: Event) -> Result<()> {
        tracing::trace!(kind = ?event.kind, "event");

        if let EventKind::Resize(size) = event.kind {
            self.screen.resize(size);
        }

        self.dispatch_interactions(&event);

        for command in self.app.handle_event(&event) {
            self.dispatch_command(command);
        }

        if self.should_render(&event) {
            self.render_frame()?;
        }
        Ok(())
    }

    /// Engine-level dispatch: click regions, Tab focus traversal, and key
    /// routing to the focused input region. The application still receives
    /// every event afterwards.
    fn dispatch_interactions(&mut self, event: &Event) {
        match &event.kind {
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Press => {
                let pos = Position::new(mouse.x, mouse.y);
                if let Some(out) = self.hotspots.click_at(pos) {
                    let _ = self.tx.send(out);
                }
                if let Some(id) = self.hotspots.input_at(pos).map(|r| r.id.clone()) {
                    self.focus.focus(&id);
                }
            }
            EventKind::Key(key) => {
                if key.code == KeyCode::Tab && key.paste.is_none() {
                    if key.shift() {
                        self.focus.focus_previous();
                    } else {
                        self.focus.focus_next();
                    }
                } else if let Some(id) = self.focus.focused().map(str::to_string)
                    && let Some(region) = self.hotspots.input(&id)
                {
                    let dispatch = region.apply_key(key);
                    if let Some(out) = dispatch.event {
                        let _ = self.tx.send(out);
                    }
                }
            }
            _ => {}
        }
    }

    fn should_render(&self, event: &Event) -> bool {
        match event.kind {
            EventKind::Key(_)
            | EventKind::Mouse(_)
            | EventKind::Resize(_)
            | EventKind::App(_)
            | EventKind::Error(_) => true,
            EventKind::Tick(_) => self
                .last_render
                .is_none_or(|at| at.elapsed() >= self.frame_interval),
            EventKind::Quit | EventKind::Batch(_) => false,
        }
    }

    /// Rebuild the view tree, render it into a fresh frame, and commit the
    /// diff. A panic inside `view`, `measure`, or `render` becomes an error
    /// event; the loop continues.
    fn render_frame(&mut self) -> Result<()> {
        let view = match catch_unwind(AssertUnwindSafe(|| self.app.view())) {
            Ok(view) => view,
            Err(panic) => {
                let _ = self.tx.send(Event::error(
                    format!("view panicked: {}", panic_message(&panic)),
                    None,
                ));
                return Ok(());
            }
        };

        self.frame_count += 1;
        self.hotspots.clear();
        let size = self.screen.size();

        let frame = self.screen.begin_frame();
        let mut ctx = RenderContext::new(frame, self.frame_count, Some(&self.focus), &mut self.hotspots);
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            view.measure(size.width, size.height);
            view.render(&mut ctx);
        }));
        drop(ctx);
        if let Err(panic) = outcome {
            let _ = self.tx.send(Event::error(
                format!("render panicked: {}", panic_message(&panic)),
                None,
            ));
        }
        self.screen.commit(&mut self.terminal)?;

        // Reconcile focus with the inputs registered this frame.
        let ids = self.hotspots.input_ids();
        for id in &ids {
            self.focus.register(id.clone());
        }
        let stale: Vec<String> = self
            .focus
            .ids()
            .iter()
            .filter(|id| !ids.contains(id))
            .cloned()
            .collect();
        for id in stale {
            self.focus.unregister(&id);
        }

        self.last_render = Some(Instant::now());
        Ok(())
    }

    fn dispatch_command(&mut self, command: Command) {
        match command {
            Command::Quit => {
                let _ = self.tx.send(Event::quit());
            }
            Command::Tick { interval, make } => {
                let tx = self.tx.clone();
                let cancel = self.cancel.clone();
                self.tasks.spawn(run_ticker(interval, make, tx, cancel));
            }
            Command::Task(task) => {
                let tx = self.tx.clone();
                let cancel = self.cancel.clone();
                let workers = Arc::clone(&self.workers);
                self.tasks.spawn(async move {
                    if let Some(event) = run_task(task, cancel, workers).await {
                        let _ = tx.send(event);
                    }
                });
            }
            Command::Batch(commands) => {
                let tx = self.tx.clone();
                let cancel = self.cancel.clone();
                let workers = Arc::clone(&self.workers);
                self.tasks.spawn(async move {
                    let futures = commands.into_iter().map(|command| {
                        collect_command(command, cancel.clone(), Arc::clone(&workers), tx.clone())
                    });
                    let events: Vec<Event> = join_all(futures).await.into_iter().flatten().collect();
                    let _ = tx.send(Event::batch(events));
                });
            }
            Command::Sequence(commands) => {
                let tx = self.tx.clone();
                let cancel = self.cancel.clone();
                let workers = Arc::clone(&self.workers);
                self.tasks.spawn(async move {
                    let mut events = Vec::new();
                    for command in commands {
                        events.extend(
                            collect_command(
                                command,
                                cancel.clone(),
                                Arc::clone(&workers),
                                tx.clone(),
                            )
                            .await,
                        );
                    }
                    let _ = tx.send(Event::batch(events));
                });
            }
        }
    }

    fn spawn_input_task(&mut self) {
        let Some(mut source) = self.input.take() else {
            return;
        };
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();
        self.tasks.spawn_blocking(move || {
            loop {
                if cancel.is_cancelled() {
                    break;
                }
                match source.read_event(INPUT_POLL) {
                    Ok(Some(event)) => {
                        if tx.send(event.into()).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(_) => {
                        // End of input: drain and stop.
                        let _ = tx.send(Event::quit());
                        break;
                    }
                }
            }
        });
    }

    fn spawn_fps_ticker(&mut self) {
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();
        let make: TickBuilder = Box::new(|tick| Event::new(EventKind::Tick(tick)));
        self.tasks
            .spawn(run_ticker(self.frame_interval, make, tx, cancel));
    }

    async fn shutdown(&mut self) {
        self.state = RuntimeState::Stopping;
        self.cancel.cancel();

        let grace = self.shutdown_grace;
        let drain = async {
            while self.tasks.join_next().await.is_some() {}
        };
        if tokio::time::timeout(grace, drain).await.is_err() {
            tracing::warn!("workers did not drain within the grace period");
            self.tasks.abort_all();
        }

        self.restore_terminal();
        self.app.destroy();
        self.state = RuntimeState::Stopped;
    }

    /// Restore every terminal mode the runtime changed. Failures are logged,
    /// never propagated past the stop path.
    fn restore_terminal(&mut self) {
        if let Err(e) = self.terminal.show_cursor() {
            tracing::warn!("failed to restore cursor: {e}");
        }
        if let Err(e) = self.terminal.set_mouse_capture(MouseCapture::Off) {
            tracing::warn!("failed to disable mouse capture: {e}");
        }
        if let Err(e) = self.terminal.set_bracketed_paste(false) {
            tracing::warn!("failed to disable bracketed paste: {e}");
        }
        if self.alternate_screen
            && let Err(e) = self.terminal.leave_alternate_screen()
        {
            tracing::warn!("failed to leave alternate screen: {e}");
        }
        if let Err(e) = self.terminal.exit_raw_mode() {
            tracing::warn!("failed to exit raw mode: {e}");
        }
    }
}

/// Emit events built by `make` every `interval` until cancellation.
async fn run_ticker(
    interval: Duration,
    make: TickBuilder,
    tx: UnboundedSender<Event>,
    cancel: CancelFlag,
) {
    // tokio panics on a zero period.
    let interval = interval.max(Duration::from_millis(1));
    let start = tokio::time::Instant::now() + interval;
    let mut timer = tokio::time::interval_at(start, interval);
    let mut frame: u64 = 0;
    loop {
        timer.tick().await;
        if cancel.is_cancelled() {
            break;
        }
        frame += 1;
        if tx.send(make(TickEvent { frame })).is_err() {
            break;
        }
    }
}

/// Run one task thunk on the blocking pool, bounded by the worker semaphore.
/// Failures and panics are wrapped as error events.
async fn run_task(task: TaskFn, cancel: CancelFlag, workers: Arc<Semaphore>) -> Option<Event> {
    let Ok(_permit) = workers.acquire_owned().await else {
        return None;
    };
    if cancel.is_cancelled() {
        return None;
    }
    let worker_cancel = cancel.clone();
    let joined =
        tokio::task::spawn_blocking(move || catch_unwind(AssertUnwindSafe(|| task(worker_cancel))))
            .await;
    match joined {
        Err(join_error) => Some(Event::error(
            format!("command worker failed: {join_error}"),
            None,
        )),
        Ok(Err(panic)) => Some(Event::error(
            format!("command panicked: {}", panic_message(&panic)),
            None,
        )),
        Ok(Ok(Ok(Some(event)))) => Some(event),
        Ok(Ok(Ok(None))) => None,
        Ok(Ok(Err(error))) => {
            let cause = format!("command failed: {error}");
            Some(Event::error(cause, Some(error)))
        }
    }
}

/// Resolve a command to the events it contributes to an enclosing batch or
/// sequence. Nested tick commands are detached onto their own schedule.
fn collect_command(
    command: Command,
    cancel: CancelFlag,
    workers: Arc<Semaphore>,
    tx: UnboundedSender<Event>,
) -> futures::future::BoxFuture<'static, Vec<Event>> {
    Box::pin(async move {
        match command {
            Command::Quit => vec![Event::quit()],
            Command::Tick { interval, make } => {
                tokio::spawn(run_ticker(interval, make, tx, cancel));
                Vec::new()
            }
            Command::Task(task) => run_task(task, cancel, workers).await.into_iter().collect(),
            Command::Batch(commands) => {
                let futures = commands.into_iter().map(|inner| {
                    collect_command(inner, cancel.clone(), Arc::clone(&workers), tx.clone())
                });
                join_all(futures).await.into_iter().flatten().collect()
            }
            Command::Sequence(commands) => {
                let mut events = Vec::new();
                for inner in commands {
                    events.extend(
                        collect_command(inner, cancel.clone(), Arc::clone(&workers), tx.clone())
                            .await,
                    );
                }
                events
            }
        }
    })
}

/// Extract a readable message from a panic payload.
fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
