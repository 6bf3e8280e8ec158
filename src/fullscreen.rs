//! Fullscreen presentation state
//!
//! The editor carries a logical fullscreen flag that must mirror what the
//! windowing layer actually did, not what we asked for. Requests go out
//! through a [`FullscreenHost`]; the truth comes back by observing the host
//! each frame. The user can leave fullscreen behind our back (Escape, window
//! manager), so observation is authoritative and requests are best-effort.

use log::{debug, warn};

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Host Abstraction
// ─────────────────────────────────────────────────────────────────────────────

/// The windowing layer's fullscreen surface.
///
/// `request` may fail (platform refusal, headless host); the controller then
/// leaves its flag where it was. `observe` reports the actual state and is
/// polled every frame.
pub trait FullscreenHost {
    /// Ask the host to enter or leave fullscreen.
    fn request(&mut self, fullscreen: bool) -> Result<()>;

    /// The host's actual fullscreen state right now.
    fn observe(&self) -> bool;
}

// ─────────────────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────────────────

/// Tracks the logical fullscreen flag and keeps it honest against the host.
#[derive(Debug, Default)]
pub struct FullscreenController {
    active: bool,
}

impl FullscreenController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the editor currently believes it is fullscreen.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Toggle fullscreen through the host. The flag only moves when the
    /// host accepted the request.
    pub fn toggle(&mut self, host: &mut dyn FullscreenHost) {
        let target = !self.active;
        match host.request(target) {
            Ok(()) => {
                debug!("fullscreen {}", if target { "entered" } else { "left" });
                self.active = target;
            }
            Err(err) => {
                warn!("fullscreen request rejected: {err}");
            }
        }
    }

    /// Reconcile the flag with what the host reports. Returns `true` when
    /// the flag changed, which means the transition happened outside our
    /// control and the toolbar state needs repainting.
    ///
    /// No exit request is issued here: if the user already left fullscreen
    /// via the window manager, asking the host to leave again would be
    /// redundant at best.
    pub fn sync(&mut self, host: &dyn FullscreenHost) -> bool {
        let actual = host.observe();
        if actual != self.active {
            debug!("fullscreen state changed externally to {actual}");
            self.active = actual;
            true
        } else {
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// egui Viewport Adapter
// ─────────────────────────────────────────────────────────────────────────────

/// [`FullscreenHost`] backed by the egui viewport.
///
/// Holds a context handle (contexts are cheap shared handles in egui).
/// Viewport commands are fire-and-forget, so `request` always succeeds; the
/// per-frame [`FullscreenController::sync`] call is what keeps the flag
/// truthful if the platform ignores the command.
pub struct ViewportFullscreen {
    ctx: egui::Context,
}

impl ViewportFullscreen {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl FullscreenHost for ViewportFullscreen {
    fn request(&mut self, fullscreen: bool) -> Result<()> {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
        Ok(())
    }

    fn observe(&self) -> bool {
        self.ctx
            .input(|i| i.viewport().fullscreen.unwrap_or(false))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rejecting Host
// ─────────────────────────────────────────────────────────────────────────────

/// A host that refuses every request, for headless or embedded contexts
/// where fullscreen makes no sense.
#[derive(Debug, Default)]
pub struct NoFullscreen;

impl FullscreenHost for NoFullscreen {
    fn request(&mut self, _fullscreen: bool) -> Result<()> {
        Err(Error::FullscreenRejected)
    }

    fn observe(&self) -> bool {
        false
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Scriptable host: records requests and lets the test move the
    /// observed state independently of what was asked.
    #[derive(Default)]
    struct MockHost {
        state: bool,
        accept: bool,
        requests: Vec<bool>,
    }

    impl MockHost {
        fn accepting() -> Self {
            Self {
                accept: true,
                ..Default::default()
            }
        }
    }

    impl FullscreenHost for MockHost {
        fn request(&mut self, fullscreen: bool) -> Result<()> {
            self.requests.push(fullscreen);
            if self.accept {
                self.state = fullscreen;
                Ok(())
            } else {
                Err(Error::FullscreenRejected)
            }
        }

        fn observe(&self) -> bool {
            self.state
        }
    }

    #[test]
    fn test_toggle_enters_and_leaves() {
        let mut host = MockHost::accepting();
        let mut ctrl = FullscreenController::new();

        ctrl.toggle(&mut host);
        assert!(ctrl.is_active());
        assert_eq!(host.requests, vec![true]);

        ctrl.toggle(&mut host);
        assert!(!ctrl.is_active());
        assert_eq!(host.requests, vec![true, false]);
    }

    #[test]
    fn test_rejected_request_leaves_flag_unchanged() {
        let mut host = MockHost::default();
        let mut ctrl = FullscreenController::new();

        ctrl.toggle(&mut host);
        assert!(!ctrl.is_active());
        assert_eq!(host.requests, vec![true]);
    }

    #[test]
    fn test_external_exit_corrects_flag_without_exit_request() {
        // User enters fullscreen, leaves via the window manager; the
        // flag follows the host and no extra request goes out.
        let mut host = MockHost::accepting();
        let mut ctrl = FullscreenController::new();

        ctrl.toggle(&mut host);
        assert!(ctrl.is_active());

        host.state = false; // external exit
        let changed = ctrl.sync(&host);
        assert!(changed);
        assert!(!ctrl.is_active());
        assert_eq!(host.requests, vec![true], "sync must not issue requests");
    }

    #[test]
    fn test_sync_idle_when_states_agree() {
        let mut host = MockHost::accepting();
        let mut ctrl = FullscreenController::new();
        assert!(!ctrl.sync(&host));

        ctrl.toggle(&mut host);
        assert!(!ctrl.sync(&host));
    }

    #[test]
    fn test_external_entry_is_mirrored_too() {
        let mut host = MockHost::accepting();
        let mut ctrl = FullscreenController::new();

        host.state = true;
        assert!(ctrl.sync(&host));
        assert!(ctrl.is_active());
    }

    #[test]
    fn test_no_fullscreen_host_rejects() {
        let mut host = NoFullscreen;
        let mut ctrl = FullscreenController::new();
        ctrl.toggle(&mut host);
        assert!(!ctrl.is_active());
        assert!(!host.observe());
    }
}
