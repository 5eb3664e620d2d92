//! Commands — side-effecting work submitted to the runtime's worker pool.
//!
//! A command is a thunk that produces an event when it completes. Commands
//! run off the UI loop and may block on I/O; their results re-enter the
//! runtime through the single event queue.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::event::{Event, TickEvent};

/// Boxed error type returned by failed commands.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a command thunk: an event, nothing, or a failure (which the
/// runtime wraps as an error event).
pub type CommandResult = std::result::Result<Option<Event>, BoxError>;

/// Shared cancellation flag handed to command thunks.
///
/// The runtime sets the flag on shutdown; long-running commands are expected
/// to poll it at reasonable intervals and bail out.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a new, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Builder for tick payload events.
pub type TickBuilder = Box<dyn Fn(TickEvent) -> Event + Send + Sync>;

/// Thunk executed on a worker.
pub type TaskFn = Box<dyn FnOnce(CancelFlag) -> CommandResult + Send>;

/// A unit of side-effecting work.
pub enum Command {
    /// Emit a quit event.
    Quit,
    /// Emit events built by `make` every `interval` until the runtime stops.
    Tick {
        /// Period between emitted events.
        interval: Duration,
        /// Builds the emitted event from the tick counter.
        make: TickBuilder,
    },
    /// Run a thunk on a worker; its returned event is enqueued.
    Task(TaskFn),
    /// Run all sub-commands concurrently; one batch event is emitted when
    /// every one of them has completed.
    Batch(Vec<Command>),
    /// Run sub-commands serially; one batch event preserving their order is
    /// emitted at the end.
    Sequence(Vec<Command>),
}

impl Command {
    /// A command that quits the runtime.
    pub fn quit() -> Self {
        Self::Quit
    }

    /// A periodic event stream with an application-built payload.
    pub fn tick(
        interval: Duration,
        make: impl Fn(TickEvent) -> Event + Send + Sync + 'static,
    ) -> Self {
        Self::Tick {
            interval,
            make: Box::new(make),
        }
    }

    /// A worker-pool task.
    pub fn task(f: impl FnOnce(CancelFlag) -> CommandResult + Send + 'static) -> Self {
        Self::Task(Box::new(f))
    }

    /// Run all commands concurrently, emitting a single batch on completion.
    pub fn batch(commands: Vec<Command>) -> Self {
        Self::Batch(commands)
    }

    /// Run all commands serially, emitting an order-preserving batch.
    pub fn sequence(commands: Vec<Command>) -> Self {
        Self::Sequence(commands)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Quit => write!(f, "Quit"),
            Command::Tick { interval, .. } => {
                f.debug_struct("Tick").field("interval", interval).finish()
            }
            Command::Task(_) => write!(f, "Task(..)"),
            Command::Batch(cmds) => f.debug_tuple("Batch").field(&cmds.len()).finish(),
            Command::Sequence(cmds) => f.debug_tuple("Sequence").field(&cmds.len()).finish(),
        }
    }
}
