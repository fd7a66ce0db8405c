//! Snackbar Queue
//!
//! Holds short user-facing messages until the host UI is ready to show
//! them. The engine is created once per session and handed to whoever
//! needs to report something; the UI drains it with [`SnackbarEngine::show_next`].

use parking_lot::{Mutex, RwLock};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;
use uuid::Uuid;

/// Callback run when a snackbar is acted on or dismissed
pub type SnackbarCallback = Box<dyn FnOnce() + Send>;

/// Which queue a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnackbarKind {
    Info,
    Error,
}

/// How long the host should keep a snackbar on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnackbarDuration {
    Short,
    Long,
}

/// Outcome reported by the host once a snackbar goes away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnackbarResult {
    Dismissed,
    ActionPerformed,
}

/// A queued snackbar message
pub struct SnackbarMessage {
    id: Uuid,
    pub message: String,
    pub action_label: Option<String>,
    pub duration: SnackbarDuration,
    on_action: Option<SnackbarCallback>,
    on_dismiss: Option<SnackbarCallback>,
}

impl SnackbarMessage {
    /// Create a plain message with a short duration
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            action_label: None,
            duration: SnackbarDuration::Short,
            on_action: None,
            on_dismiss: None,
        }
    }

    /// Attach an action button; messages with an action stay up longer
    pub fn with_action(
        mut self,
        label: impl Into<String>,
        on_action: impl FnOnce() + Send + 'static,
    ) -> Self {
        self.action_label = Some(label.into());
        self.duration = SnackbarDuration::Long;
        self.on_action = Some(Box::new(on_action));
        self
    }

    /// Run `on_dismiss` when the snackbar is dismissed without action
    pub fn on_dismiss(mut self, on_dismiss: impl FnOnce() + Send + 'static) -> Self {
        self.on_dismiss = Some(Box::new(on_dismiss));
        self
    }

    fn dismiss_callback(mut self, on_dismiss: Option<SnackbarCallback>) -> Self {
        self.on_dismiss = on_dismiss;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Fire the callback matching the host's result
    pub fn resolve(self, result: SnackbarResult) {
        let callback = match result {
            SnackbarResult::Dismissed => self.on_dismiss,
            SnackbarResult::ActionPerformed => self.on_action,
        };
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl std::fmt::Debug for SnackbarMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnackbarMessage")
            .field("id", &self.id)
            .field("message", &self.message)
            .field("action_label", &self.action_label)
            .field("duration", &self.duration)
            .finish()
    }
}

impl PartialEq for SnackbarMessage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SnackbarMessage {}

struct Queue {
    sender: Sender<SnackbarMessage>,
    receiver: Receiver<SnackbarMessage>,
}

impl Queue {
    fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }
}

/// Snackbar message queue with separate info and error lanes
pub struct SnackbarEngine {
    info: Queue,
    error: Queue,
    shown_ids: RwLock<Vec<Uuid>>,
    showing: Mutex<()>,
}

impl SnackbarEngine {
    /// Create a new, empty engine
    pub fn new() -> Self {
        Self {
            info: Queue::new(),
            error: Queue::new(),
            shown_ids: RwLock::new(Vec::new()),
            showing: Mutex::new(()),
        }
    }

    fn queue(&self, kind: SnackbarKind) -> &Queue {
        match kind {
            SnackbarKind::Info => &self.info,
            SnackbarKind::Error => &self.error,
        }
    }

    /// Queue a prepared message
    pub fn push(&self, kind: SnackbarKind, message: SnackbarMessage) -> Uuid {
        let id = message.id();
        debug!("Queueing {:?} snackbar {}: {}", kind, id, message.message);
        // Both channel ends live in `self`, so the send cannot fail.
        let _ = self.queue(kind).sender.send(message);
        id
    }

    pub fn add_info(&self, message: impl Into<String>, on_dismiss: Option<SnackbarCallback>) -> Uuid {
        self.push(SnackbarKind::Info, SnackbarMessage::new(message).dismiss_callback(on_dismiss))
    }

    pub fn add_error(&self, message: impl Into<String>, on_dismiss: Option<SnackbarCallback>) -> Uuid {
        self.push(SnackbarKind::Error, SnackbarMessage::new(message).dismiss_callback(on_dismiss))
    }

    pub fn add_info_with_action(
        &self,
        message: impl Into<String>,
        action_label: impl Into<String>,
        on_action: impl FnOnce() + Send + 'static,
        on_dismiss: Option<SnackbarCallback>,
    ) -> Uuid {
        self.push(
            SnackbarKind::Info,
            SnackbarMessage::new(message)
                .with_action(action_label, on_action)
                .dismiss_callback(on_dismiss),
        )
    }

    pub fn add_error_with_action(
        &self,
        message: impl Into<String>,
        action_label: impl Into<String>,
        on_action: impl FnOnce() + Send + 'static,
        on_dismiss: Option<SnackbarCallback>,
    ) -> Uuid {
        self.push(
            SnackbarKind::Error,
            SnackbarMessage::new(message)
                .with_action(action_label, on_action)
                .dismiss_callback(on_dismiss),
        )
    }

    /// Number of messages waiting in a lane
    pub fn pending(&self, kind: SnackbarKind) -> usize {
        self.queue(kind).receiver.len()
    }

    /// Drop every pending info message
    pub fn clear_info(&self) -> usize {
        self.clear(SnackbarKind::Info)
    }

    /// Drop every pending error message
    pub fn clear_error(&self) -> usize {
        self.clear(SnackbarKind::Error)
    }

    fn clear(&self, kind: SnackbarKind) -> usize {
        self.queue(kind).receiver.try_iter().count()
    }

    /// Show the next message of a lane.
    ///
    /// The presenter displays the message and reports how it went away;
    /// the matching callback then runs and the id is recorded as shown.
    /// Only one snackbar is presented at a time, so the presenter must not
    /// call back into the engine; the callbacks run after it is released
    /// and may show the next message.
    pub fn show_next<F>(&self, kind: SnackbarKind, presenter: F) -> Option<Uuid>
    where
        F: FnOnce(&SnackbarMessage) -> SnackbarResult,
    {
        let (message, result) = {
            let _guard = self.showing.lock();
            let message = self.queue(kind).receiver.try_recv().ok()?;
            let result = presenter(&message);
            (message, result)
        };

        let id = message.id();
        debug!("Snackbar {} finished with {:?}", id, result);
        self.shown_ids.write().push(id);
        message.resolve(result);
        Some(id)
    }

    /// Ids of every message shown so far, oldest first
    pub fn shown_ids(&self) -> Vec<Uuid> {
        self.shown_ids.read().clone()
    }

    pub fn was_shown(&self, id: Uuid) -> bool {
        self.shown_ids.read().contains(&id)
    }
}

impl Default for SnackbarEngine {
    fn default() -> Self {
        Self::new()
    }
}
