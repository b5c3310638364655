// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press gesture disambiguation for activatable elements.
//!
//! Browsers deliver one logical "press" of a button through several overlapping
//! channels: pointer events, a compatibility `click` that follows a touch, and a
//! programmatic `click()` with no pointer involvement at all. [`PressController`]
//! folds them into two callbacks on a [`PressAdapter`]:
//!
//! - `begin_press(origin)` when the press becomes visible (ripple starts),
//! - `end_press(PressEnd { cancelled, .. })` exactly once afterwards.
//!
//! ## Phases
//!
//! ```text
//! Inactive --down(touch)--> TouchDelay --delay elapsed--> Holding --up--> WaitingForClick
//!                               |                                            |
//!                               +--up--> Releasing -------------------------->+
//! Inactive --down(mouse)--> WaitingForClick --click--> Inactive (completed)
//!                           WaitingForClick --up, click wait elapsed--> Inactive (cancelled)
//! ```
//!
//! The touch delay keeps a swipe that starts on a button from flashing a press.
//! After a touch ends the controller waits for the compatibility click so that a
//! single tap is not reported twice.
//!
//! From any non-`Inactive` phase, `pointercancel`, a mouse leaving the host, the
//! host becoming disabled, or the host disconnecting cancels the press.
//!
//! ## Rules
//!
//! 1. Events from non-primary pointers, secondary mouse buttons, or with a blocked
//!    modifier held are ignored.
//! 2. While a press is in progress, events from a different pointer are ignored.
//! 3. A click with no press in progress begins and ends a press synchronously.
//! 4. After a context menu, the next `pointerdown` must lie inside the host's
//!    bounding rect; some browsers emit a stray down after a long press.
//! 5. `end_press` is reported only for presses that began; a touch cancelled
//!    during its delay produces no callbacks at all.
//!
//! Nothing here fails: events that do not apply are dropped.

use kurbo::Rect;
use tracing::{debug, trace};

use crate::input::{Modifiers, PRIMARY_BUTTON, PointerEvent, PointerKind};
use crate::timer::{Timer, earliest};

/// Default delay before a touch is treated as a press, in milliseconds.
pub const TOUCH_DELAY_MS: u64 = 150;

/// Default time to wait for the compatibility click after a touch, in milliseconds.
pub const WAIT_FOR_CLICK_MS: u64 = 500;

/// Tuning for [`PressController`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressConfig {
    /// How long a touch must rest before it becomes a press.
    pub touch_delay_ms: u64,
    /// How long to wait for the click that follows a touch before giving up.
    pub click_wait_ms: u64,
    /// Pointer downs with any of these modifiers held are ignored.
    pub blocked_modifiers: Modifiers,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            touch_delay_ms: TOUCH_DELAY_MS,
            click_wait_ms: WAIT_FOR_CLICK_MS,
            blocked_modifiers: Modifiers::all(),
        }
    }
}

/// Phase of the press state machine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PressPhase {
    /// No interaction in progress.
    #[default]
    Inactive,
    /// A touch went down; waiting to see whether it is a press or a swipe.
    TouchDelay,
    /// A touch outlasted the delay and is being held.
    Holding,
    /// A touch was released before the delay elapsed.
    Releasing,
    /// Waiting for the click that ends the press.
    WaitingForClick,
}

/// Payload for [`PressAdapter::end_press`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PressEnd<D> {
    /// `true` if the press was abandoned rather than completed.
    pub cancelled: bool,
    /// Data carried by the click that completed the press.
    pub action_data: Option<D>,
}

impl<D> PressEnd<D> {
    /// A completed press.
    pub fn completed(action_data: Option<D>) -> Self {
        Self {
            cancelled: false,
            action_data,
        }
    }

    /// An abandoned press.
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            action_data: None,
        }
    }
}

/// Host contract for [`PressController`].
///
/// Every method has a no-op default so a controller can be built before its host
/// is connected.
pub trait PressAdapter {
    /// Extra data a click can carry through to `end_press`.
    type ActionData: Clone + core::fmt::Debug;

    /// Whether the host is currently disabled.
    fn is_disabled(&self) -> bool {
        false
    }

    /// The host's bounds, in the coordinate space of pointer positions.
    fn bounding_rect(&self) -> Rect {
        Rect::ZERO
    }

    /// A press became visible. `origin` is `None` for synthetic clicks.
    fn begin_press(&mut self, origin: Option<&PointerEvent>) {
        let _ = origin;
    }

    /// A press that began has ended.
    fn end_press(&mut self, end: PressEnd<Self::ActionData>) {
        let _ = end;
    }
}

/// Adapter that ignores every callback.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopPressAdapter;

impl PressAdapter for NoopPressAdapter {
    type ActionData = ();
}

/// State machine turning pointer and click input into begin/end press callbacks.
///
/// See the [module documentation](self) for the phase diagram and rules.
#[derive(Clone, Debug)]
pub struct PressController<A: PressAdapter> {
    adapter: A,
    config: PressConfig,
    phase: PressPhase,
    pressed: bool,
    last_event: Option<PointerEvent>,
    touch_delay: Timer,
    click_wait: Timer,
    check_bounds_after_context_menu: bool,
}

impl<A: PressAdapter> PressController<A> {
    /// Create a controller with the default timings.
    pub fn new(adapter: A) -> Self {
        Self::with_config(adapter, PressConfig::default())
    }

    /// Create a controller with custom timings.
    pub fn with_config(adapter: A, config: PressConfig) -> Self {
        Self {
            adapter,
            config,
            phase: PressPhase::Inactive,
            pressed: false,
            last_event: None,
            touch_delay: Timer::new(),
            click_wait: Timer::new(),
            check_bounds_after_context_menu: false,
        }
    }

    /// The host adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutable access to the host adapter.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Current configuration.
    pub fn config(&self) -> &PressConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> PressPhase {
        self.phase
    }

    /// Whether a pointer is down on the host.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// The pointer event that started the current session, if any.
    pub fn origin(&self) -> Option<&PointerEvent> {
        self.last_event.as_ref()
    }

    /// The earliest pending deadline; the host should call [`Self::advance`] then.
    pub fn next_deadline(&self) -> Option<u64> {
        earliest([self.touch_delay.deadline(), self.click_wait.deadline()])
    }

    /// Handle `pointerdown`.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) {
        if !self.should_respond(event) || self.phase != PressPhase::Inactive {
            return;
        }
        if self.check_bounds_after_context_menu {
            if !self.adapter.bounding_rect().contains(event.position) {
                trace!("pointerdown outside host after context menu; ignoring");
                return;
            }
            self.check_bounds_after_context_menu = false;
        }

        self.pressed = true;
        self.last_event = Some(*event);

        if event.is_touch() {
            trace!(time = event.time, "touch down; waiting out touch delay");
            self.phase = PressPhase::TouchDelay;
            self.touch_delay
                .schedule(event.time, self.config.touch_delay_ms);
            return;
        }

        // Mice and pens press immediately; the click that follows ends the press.
        self.phase = PressPhase::WaitingForClick;
        self.adapter.begin_press(Some(event));
    }

    /// Handle `pointerup`.
    ///
    /// A mouse or pen press still ends with the click, but from the release on
    /// the click has `click_wait_ms` to arrive.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) {
        if !self.should_respond(event) {
            return;
        }
        if !event.is_touch() {
            if self.phase == PressPhase::WaitingForClick && self.pressed {
                self.pressed = false;
                self.click_wait
                    .schedule(event.time, self.config.click_wait_ms);
            }
            return;
        }
        match self.phase {
            PressPhase::Holding => self.wait_for_click(event.time),
            PressPhase::TouchDelay => {
                self.touch_delay.cancel();
                self.phase = PressPhase::Releasing;
                let origin = self.last_event;
                self.adapter.begin_press(origin.as_ref());
                self.wait_for_click(event.time);
            }
            _ => {}
        }
    }

    /// Handle `click`, whether it follows a pointer press or is synthetic.
    pub fn on_click(&mut self, action_data: Option<A::ActionData>) {
        if self.adapter.is_disabled() {
            return;
        }
        match self.phase {
            PressPhase::WaitingForClick => {
                self.reset();
                self.adapter.end_press(PressEnd::completed(action_data));
            }
            PressPhase::Inactive => {
                // Keyboard activation or a programmatic click: no pointer session.
                self.adapter.begin_press(None);
                self.adapter.end_press(PressEnd::completed(action_data));
            }
            // A click during the touch delay or a hold is not the one we wait for.
            PressPhase::TouchDelay | PressPhase::Holding | PressPhase::Releasing => {}
        }
    }

    /// Handle `pointerleave`. Mouse presses end when the pointer leaves the host;
    /// touch presses rely on `pointerup`.
    pub fn on_pointer_leave(&mut self, event: &PointerEvent) {
        if !self.should_respond(event) || !self.pressed || event.is_touch() {
            return;
        }
        self.cancel_press();
    }

    /// Handle `pointercancel`.
    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) {
        if !self.should_respond(event) {
            return;
        }
        self.cancel_press();
    }

    /// Handle `contextmenu` (long press or secondary click).
    ///
    /// Only a touch long press arms the bounds check on the next `pointerdown`.
    pub fn on_context_menu(&mut self) {
        if self.adapter.is_disabled() {
            return;
        }
        if self.last_event.is_some_and(|origin| origin.is_touch()) {
            self.check_bounds_after_context_menu = true;
        }
        self.cancel_press();
    }

    /// The host was disabled. Any press in progress is cancelled synchronously.
    pub fn host_disabled(&mut self) {
        self.cancel_press();
    }

    /// The host left its document. Cancels any press and clears all timers.
    pub fn host_disconnected(&mut self) {
        self.cancel_press();
        self.check_bounds_after_context_menu = false;
    }

    /// Fire whatever deadlines are due at `now`.
    pub fn advance(&mut self, now: u64) {
        if self.touch_delay.take_due(now) && self.phase == PressPhase::TouchDelay {
            trace!(now, "touch delay elapsed; holding");
            self.phase = PressPhase::Holding;
            let origin = self.last_event;
            self.adapter.begin_press(origin.as_ref());
        }
        if self.click_wait.take_due(now) && self.phase == PressPhase::WaitingForClick {
            debug!(now, "no click followed the release; cancelling press");
            self.cancel_press();
        }
    }

    fn wait_for_click(&mut self, now: u64) {
        self.phase = PressPhase::WaitingForClick;
        self.click_wait.schedule(now, self.config.click_wait_ms);
    }

    fn cancel_press(&mut self) {
        let began = matches!(
            self.phase,
            PressPhase::Holding | PressPhase::Releasing | PressPhase::WaitingForClick
        );
        let was_active = self.phase != PressPhase::Inactive;
        self.reset();
        if was_active {
            debug!(began, "press cancelled");
        }
        if began {
            self.adapter.end_press(PressEnd::cancelled());
        }
    }

    fn reset(&mut self) {
        self.touch_delay.cancel();
        self.click_wait.cancel();
        self.pressed = false;
        self.last_event = None;
        self.phase = PressPhase::Inactive;
    }

    fn should_respond(&self, event: &PointerEvent) -> bool {
        if self.adapter.is_disabled() || !event.is_primary {
            return false;
        }
        if event.modifiers.intersects(self.config.blocked_modifiers) {
            return false;
        }
        if event.kind == PointerKind::Mouse && event.button != PRIMARY_BUTTON {
            return false;
        }
        match &self.last_event {
            Some(origin) if self.phase != PressPhase::Inactive => {
                origin.pointer_id == event.pointer_id
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::num::NonZeroU64;
    use kurbo::Point;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Begin(Option<Point>),
        End { cancelled: bool, data: Option<u32> },
    }

    #[derive(Debug, Default)]
    struct Recorder {
        disabled: bool,
        rect: Rect,
        calls: Vec<Call>,
    }

    impl PressAdapter for Recorder {
        type ActionData = u32;

        fn is_disabled(&self) -> bool {
            self.disabled
        }

        fn bounding_rect(&self) -> Rect {
            self.rect
        }

        fn begin_press(&mut self, origin: Option<&PointerEvent>) {
            self.calls.push(Call::Begin(origin.map(|e| e.position)));
        }

        fn end_press(&mut self, end: PressEnd<u32>) {
            self.calls.push(Call::End {
                cancelled: end.cancelled,
                data: end.action_data,
            });
        }
    }

    fn controller() -> PressController<Recorder> {
        PressController::new(Recorder {
            rect: Rect::new(0.0, 0.0, 100.0, 40.0),
            ..Recorder::default()
        })
    }

    const P: Point = Point::new(10.0, 10.0);

    #[test]
    fn mouse_press_begins_immediately_and_ends_on_click() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::mouse(P, 0));
        assert_eq!(press.phase(), PressPhase::WaitingForClick);
        assert_eq!(press.adapter().calls, vec![Call::Begin(Some(P))]);

        // A long hold has no deadline.
        assert_eq!(press.next_deadline(), None);

        // Mouse pointerup is not the end of the press, but starts the click wait.
        press.on_pointer_up(&PointerEvent::mouse(P, 2_000));
        assert_eq!(press.phase(), PressPhase::WaitingForClick);
        assert_eq!(press.next_deadline(), Some(2_500));

        press.on_click(Some(7));
        assert_eq!(press.phase(), PressPhase::Inactive);
        assert_eq!(
            press.adapter().calls,
            vec![
                Call::Begin(Some(P)),
                Call::End {
                    cancelled: false,
                    data: Some(7)
                },
            ]
        );
    }

    #[test]
    fn quick_tap_begins_at_pointerup_not_at_touch_deadline() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::touch(P, 0));
        assert_eq!(press.phase(), PressPhase::TouchDelay);
        assert_eq!(press.next_deadline(), Some(150));
        assert!(press.adapter().calls.is_empty());

        press.on_pointer_up(&PointerEvent::touch(P, 50));
        assert_eq!(press.adapter().calls, vec![Call::Begin(Some(P))]);
        assert_eq!(press.phase(), PressPhase::WaitingForClick);
        // The touch delay is gone; only the click wait remains.
        assert_eq!(press.next_deadline(), Some(550));

        // Reaching the old touch deadline changes nothing.
        press.advance(150);
        assert_eq!(press.adapter().calls.len(), 1);

        press.on_click(None);
        assert_eq!(
            press.adapter().calls.last(),
            Some(&Call::End {
                cancelled: false,
                data: None
            })
        );
        assert_eq!(press.next_deadline(), None);
    }

    #[test]
    fn missing_click_after_touch_cancels() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::touch(P, 0));
        press.on_pointer_up(&PointerEvent::touch(P, 50));
        press.advance(549);
        assert_eq!(press.phase(), PressPhase::WaitingForClick);
        press.advance(550);
        assert_eq!(press.phase(), PressPhase::Inactive);
        assert_eq!(
            press.adapter().calls,
            vec![
                Call::Begin(Some(P)),
                Call::End {
                    cancelled: true,
                    data: None
                },
            ]
        );
        assert_eq!(press.next_deadline(), None);

        // A late click is a fresh synthetic press, not a second end.
        press.on_click(None);
        assert_eq!(press.adapter().calls.len(), 4);
    }

    #[test]
    fn held_touch_begins_after_delay() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::touch(P, 0));
        press.advance(150);
        assert_eq!(press.phase(), PressPhase::Holding);
        assert_eq!(press.adapter().calls, vec![Call::Begin(Some(P))]);

        press.on_pointer_up(&PointerEvent::touch(P, 900));
        assert_eq!(press.phase(), PressPhase::WaitingForClick);
        assert_eq!(press.next_deadline(), Some(1_400));
        press.on_click(None);
        assert_eq!(press.adapter().calls.len(), 2);
    }

    #[test]
    fn cancel_during_touch_delay_reports_nothing() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::touch(P, 0));
        press.on_pointer_cancel(&PointerEvent::touch(P, 20));
        assert_eq!(press.phase(), PressPhase::Inactive);
        assert_eq!(press.next_deadline(), None);
        press.advance(1_000);
        assert!(press.adapter().calls.is_empty());
    }

    #[test]
    fn mouse_leave_cancels_but_touch_leave_does_not() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::mouse(P, 0));
        press.on_pointer_leave(&PointerEvent::mouse(Point::new(200.0, 10.0), 10));
        assert_eq!(
            press.adapter().calls.last(),
            Some(&Call::End {
                cancelled: true,
                data: None
            })
        );

        let mut press = controller();
        press.on_pointer_down(&PointerEvent::touch(P, 0));
        press.advance(150);
        press.on_pointer_leave(&PointerEvent::touch(Point::new(200.0, 10.0), 200));
        assert_eq!(press.phase(), PressPhase::Holding);
    }

    #[test]
    fn disabling_mid_press_cancels_synchronously() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::mouse(P, 0));
        press.adapter_mut().disabled = true;
        press.host_disabled();
        assert_eq!(press.phase(), PressPhase::Inactive);
        assert_eq!(
            press.adapter().calls.last(),
            Some(&Call::End {
                cancelled: true,
                data: None
            })
        );
        // Disabled hosts ignore clicks entirely.
        press.on_click(None);
        assert_eq!(press.adapter().calls.len(), 2);
    }

    #[test]
    fn disconnect_clears_pending_timers() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::touch(P, 0));
        press.advance(150);
        press.on_pointer_up(&PointerEvent::touch(P, 200));
        assert!(press.next_deadline().is_some());
        press.host_disconnected();
        assert_eq!(press.next_deadline(), None);
        press.advance(10_000);
        // One begin, one cancelled end, nothing after teardown.
        assert_eq!(press.adapter().calls.len(), 2);
    }

    #[test]
    fn synthetic_click_begins_and_ends_together() {
        let mut press = controller();
        press.on_click(Some(3));
        assert_eq!(
            press.adapter().calls,
            vec![
                Call::Begin(None),
                Call::End {
                    cancelled: false,
                    data: Some(3)
                },
            ]
        );
        assert_eq!(press.phase(), PressPhase::Inactive);
    }

    #[test]
    fn ignored_pointers_and_buttons() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::mouse(P, 0).with_button(2));
        press.on_pointer_down(&PointerEvent::mouse(P, 0).non_primary());
        press.on_pointer_down(&PointerEvent::mouse(P, 0).with_modifiers(Modifiers::CONTROL));
        assert!(press.adapter().calls.is_empty());
        assert_eq!(press.phase(), PressPhase::Inactive);
    }

    #[test]
    fn other_pointer_does_not_end_session() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::touch(P, 0));
        let other = PointerEvent::touch(P, 30).with_pointer_id(NonZeroU64::new(9).unwrap());
        press.on_pointer_up(&other);
        press.on_pointer_cancel(&other);
        assert_eq!(press.phase(), PressPhase::TouchDelay);
    }

    #[test]
    fn context_menu_requires_next_down_in_bounds() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::touch(P, 0));
        press.advance(150);
        press.on_context_menu();
        assert_eq!(
            press.adapter().calls.last(),
            Some(&Call::End {
                cancelled: true,
                data: None
            })
        );

        // Stray down outside the host is dropped.
        press.on_pointer_down(&PointerEvent::touch(Point::new(500.0, 500.0), 800));
        assert_eq!(press.phase(), PressPhase::Inactive);

        // A real down inside is accepted and clears the check.
        press.on_pointer_down(&PointerEvent::touch(P, 900));
        assert_eq!(press.phase(), PressPhase::TouchDelay);
    }

    #[test]
    fn mouse_release_without_click_cancels() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::mouse(P, 0));
        press.on_pointer_up(&PointerEvent::mouse(P, 100));
        assert!(!press.is_pressed());
        press.advance(599);
        assert_eq!(press.phase(), PressPhase::WaitingForClick);
        press.advance(600);
        assert_eq!(press.phase(), PressPhase::Inactive);
        assert_eq!(
            press.adapter().calls,
            vec![
                Call::Begin(Some(P)),
                Call::End {
                    cancelled: true,
                    data: None
                },
            ]
        );
        assert_eq!(press.next_deadline(), None);
    }

    #[test]
    fn mouse_context_menu_does_not_check_bounds() {
        let mut press = controller();
        press.on_pointer_down(&PointerEvent::mouse(P, 0));
        press.on_context_menu();
        assert_eq!(press.phase(), PressPhase::Inactive);

        press.on_pointer_down(&PointerEvent::mouse(Point::new(500.0, 500.0), 800));
        assert_eq!(press.phase(), PressPhase::WaitingForClick);
    }

    #[test]
    fn noop_adapter_runs_full_cycle() {
        let mut press = PressController::new(NoopPressAdapter);
        press.on_pointer_down(&PointerEvent::touch(P, 0));
        press.on_pointer_up(&PointerEvent::touch(P, 10));
        press.on_click(None);
        assert_eq!(press.phase(), PressPhase::Inactive);
    }
}
