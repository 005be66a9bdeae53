//! Modal lifecycle
//!
//! Opening a modal yields two halves: the dialog keeps an [`ActiveModal`]
//! to close or dismiss itself, and the opener keeps a [`ModalRef`] whose
//! result resolves once that happens. Only the first close or dismiss
//! counts.

use crate::tasks::lock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::oneshot;

/// Reason used when a modal handle is dropped without being closed
pub const DESTROYED_REASON: &str = "destroyed";

/// How a modal ended
#[derive(Debug, Clone, PartialEq)]
pub enum ModalOutcome<T> {
    /// Closed with a result, e.g. the saved entity
    Closed(T),
    /// Dismissed with a reason, e.g. `cancel`
    Dismissed(String),
}

impl<T> ModalOutcome<T> {
    /// The result, if the modal was closed
    pub fn closed(self) -> Option<T> {
        match self {
            ModalOutcome::Closed(value) => Some(value),
            ModalOutcome::Dismissed(_) => None,
        }
    }

    /// Check if the modal was dismissed
    pub fn is_dismissed(&self) -> bool {
        matches!(self, ModalOutcome::Dismissed(_))
    }
}

// ============================================================================
// ActiveModal
// ============================================================================

/// The dialog's handle on its own modal
#[derive(Debug)]
pub struct ActiveModal<T> {
    shared: Arc<Shared<T>>,
}

#[derive(Debug)]
struct Shared<T> {
    sender: Mutex<Option<oneshot::Sender<ModalOutcome<T>>>>,
    open: Arc<AtomicBool>,
}

impl<T> Drop for Shared<T> {
    // Last handle gone without an outcome: the modal is destroyed.
    fn drop(&mut self) {
        let sender = self.sender.get_mut().unwrap_or_else(PoisonError::into_inner);
        if sender.take().is_some() {
            self.open.store(false, Ordering::SeqCst);
        }
    }
}

impl<T> Clone for ActiveModal<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> ActiveModal<T> {
    /// Open a standalone modal
    pub fn open() -> (Self, ModalRef<T>) {
        Self::open_tracked(Arc::new(AtomicBool::new(false)))
    }

    /// Open a modal whose open state is mirrored into `open`
    ///
    /// The flag is set now and cleared when the modal closes, is
    /// dismissed, or its last handle is dropped. This lets a popup service
    /// refuse a second modal.
    pub fn open_tracked(open: Arc<AtomicBool>) -> (Self, ModalRef<T>) {
        let (tx, rx) = oneshot::channel();
        open.store(true, Ordering::SeqCst);
        (
            Self {
                shared: Arc::new(Shared {
                    sender: Mutex::new(Some(tx)),
                    open,
                }),
            },
            ModalRef { receiver: rx },
        )
    }

    /// Close the modal with a result; returns false if it had already ended
    pub fn close(&self, result: T) -> bool {
        self.finish(ModalOutcome::Closed(result))
    }

    /// Dismiss the modal with a reason; returns false if it had already ended
    pub fn dismiss(&self, reason: impl Into<String>) -> bool {
        self.finish(ModalOutcome::Dismissed(reason.into()))
    }

    /// Check if the modal is still open
    pub fn is_open(&self) -> bool {
        lock(&self.shared.sender).is_some()
    }

    fn finish(&self, outcome: ModalOutcome<T>) -> bool {
        let Some(tx) = lock(&self.shared.sender).take() else {
            return false;
        };
        self.shared.open.store(false, Ordering::SeqCst);
        // The opener may have dropped its ModalRef; the modal is closed either way.
        let _ = tx.send(outcome);
        true
    }
}

// ============================================================================
// ModalRef
// ============================================================================

/// The opener's handle on a modal
#[derive(Debug)]
pub struct ModalRef<T> {
    receiver: oneshot::Receiver<ModalOutcome<T>>,
}

impl<T> ModalRef<T> {
    /// Wait for the modal to end
    ///
    /// If every `ActiveModal` handle is dropped without closing, the modal
    /// counts as dismissed with reason [`DESTROYED_REASON`].
    pub async fn result(self) -> ModalOutcome<T> {
        self.receiver
            .await
            .unwrap_or_else(|_| ModalOutcome::Dismissed(DESTROYED_REASON.to_string()))
    }

    /// The outcome, if the modal has already ended
    pub fn try_result(&mut self) -> Option<ModalOutcome<T>> {
        self.receiver.try_recv().ok()
    }
}

// ============================================================================
// Tests
// ============================================================================
