use std::collections::VecDeque;

use chrono::NaiveDateTime;

use crate::{
    calendar::{
        days::NumberOfDays,
        times::TimeLabels,
        viewport::Viewport,
        window::{CENTER_PAGE, DateWindow, PAGE_COUNT, prepare_dates},
    },
    swipecal_err,
    utils::errors::{SwipecalError, SwipecalErrorKind},
};

pub type SwipeCallback = Box<dyn Fn(NaiveDateTime)>;

#[derive(Default)]
pub struct SwipeHandlers {
    pub on_swipe_next: Option<SwipeCallback>,
    pub on_swipe_prev: Option<SwipeCallback>,
}
impl std::fmt::Debug for SwipeHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeHandlers")
            .field("on_swipe_next", &self.on_swipe_next.is_some())
            .field("on_swipe_prev", &self.on_swipe_prev.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SwipeDirection {
    Prev,
    Next,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeOutcome {
    pub page: usize,
    pub moment: NaiveDateTime,
    pub direction: SwipeDirection,
}

/// What the widget shell has to do, in order, after a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameAction {
    Swiped(SwipeOutcome),
    /// The visible window changed and the pages need their new dates.
    Render(DateWindow),
    /// Jump the pager to `offset` without animating.
    Recenter { offset: f64 },
}

#[derive(Debug, Clone, Copy)]
enum Deferred {
    Recenter,
    Commit { base: NaiveDateTime, page: usize },
}

/// State of the swipeable calendar.
///
/// Gesture and lifecycle events only queue work here; [`SwipeState::tick`]
/// applies it on the next frame and reports the resulting [`FrameAction`]s.
#[derive(Debug)]
pub struct SwipeState {
    current_moment: NaiveDateTime,
    number_of_days: NumberOfDays,
    times: TimeLabels,
    viewport: Viewport,
    handlers: SwipeHandlers,
    pending: VecDeque<Deferred>,
}
impl SwipeState {
    pub fn new(
        selected_date: NaiveDateTime,
        number_of_days: NumberOfDays,
        viewport: Viewport,
    ) -> Self {
        Self {
            current_moment: selected_date,
            number_of_days,
            times: TimeLabels::new(),
            viewport,
            handlers: SwipeHandlers::default(),
            pending: VecDeque::new(),
        }
    }
    pub fn with_handlers(mut self, handlers: SwipeHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    // Getters
    pub fn current_moment(&self) -> NaiveDateTime {
        self.current_moment
    }
    pub fn times(&self) -> &TimeLabels {
        &self.times
    }
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
    pub fn dates(&self) -> DateWindow {
        prepare_dates(self.current_moment, self.number_of_days)
    }
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Recenter offsets are always derived from the latest viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// The pager became visible. Centres it on the next frame.
    pub fn on_mount(&mut self) {
        self.pending.push_back(Deferred::Recenter);
    }

    /// A new selected date from the outside. `None` keeps the current one.
    pub fn receive_selected_date(&mut self, selected_date: Option<NaiveDateTime>) -> Vec<FrameAction> {
        let Some(date) = selected_date else {
            return Vec::new();
        };
        self.current_moment = date;
        vec![
            FrameAction::Render(self.dates()),
            FrameAction::Recenter {
                offset: self.viewport.center_offset(),
            },
        ]
    }

    /// The paging gesture settled at `content_offset` inside content of
    /// `content_width`. The resulting date change is applied on the next tick.
    pub fn scroll_ended(
        &mut self,
        content_offset: f64,
        content_width: f64,
    ) -> Result<(), SwipecalError> {
        if !content_width.is_finite() || content_width <= 0.0 || !content_offset.is_finite() {
            return Err(swipecal_err!(
                SwipecalErrorKind::InvalidData,
                "Cannot settle swipe at offset {} in content of width {}",
                content_offset,
                content_width
            ));
        }
        let page = (content_offset / content_width * PAGE_COUNT as f64)
            .round()
            .clamp(0.0, (PAGE_COUNT - 1) as f64) as usize;

        self.pending.push_back(Deferred::Commit {
            base: self.current_moment,
            page,
        });
        Ok(())
    }

    /// Applies everything queued since the last frame, once the pager content
    /// is `content_width` wide. Before the pages are laid out a recenter
    /// would be clamped away, so the queue is kept for a later frame.
    pub fn tick(&mut self, content_width: f64) -> Vec<FrameAction> {
        let mut actions = Vec::new();
        if !self.viewport.is_laid_out(content_width) {
            return actions;
        }
        while let Some(deferred) = self.pending.pop_front() {
            match deferred {
                Deferred::Recenter => actions.push(FrameAction::Recenter {
                    offset: self.viewport.center_offset(),
                }),
                Deferred::Commit { base, page } => {
                    let outcome = self.commit(base, page);
                    actions.push(FrameAction::Swiped(outcome));
                    actions.push(FrameAction::Render(self.dates()));
                    actions.push(FrameAction::Recenter {
                        offset: self.viewport.center_offset(),
                    });
                }
            }
        }
        actions
    }

    fn commit(&mut self, base: NaiveDateTime, page: usize) -> SwipeOutcome {
        let delta = page as i64 - CENTER_PAGE as i64;
        let new_moment = base + self.number_of_days.span(delta);
        self.current_moment = new_moment;

        let direction = match page.cmp(&CENTER_PAGE) {
            std::cmp::Ordering::Less => {
                if let Some(cb) = &self.handlers.on_swipe_prev {
                    cb(new_moment);
                }
                SwipeDirection::Prev
            }
            std::cmp::Ordering::Greater => {
                if let Some(cb) = &self.handlers.on_swipe_next {
                    cb(new_moment);
                }
                SwipeDirection::Next
            }
            std::cmp::Ordering::Equal => SwipeDirection::Cancelled,
        };
        log::debug!("swipe settled on page {page} ({direction}), pivot is now {new_moment}");

        SwipeOutcome {
            page,
            moment: new_moment,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::{cell::RefCell, rc::Rc};

    const WIDTH: f64 = 300.0;
    const LAID_OUT: f64 = 1500.0;

    fn pivot() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    type Calls = Rc<RefCell<Vec<(&'static str, NaiveDateTime)>>>;

    fn state_with_recorder(days: NumberOfDays) -> (SwipeState, Calls) {
        let calls: Calls = Rc::default();
        let handlers = SwipeHandlers {
            on_swipe_next: Some(Box::new({
                let calls = Rc::clone(&calls);
                move |d| calls.borrow_mut().push(("next", d))
            })),
            on_swipe_prev: Some(Box::new({
                let calls = Rc::clone(&calls);
                move |d| calls.borrow_mut().push(("prev", d))
            })),
        };
        let state = SwipeState::new(pivot(), days, Viewport::new(WIDTH).unwrap())
            .with_handlers(handlers);
        (state, calls)
    }

    fn settle_on(state: &mut SwipeState, page: usize) -> Vec<FrameAction> {
        let viewport = state.viewport();
        state
            .scroll_ended(viewport.page_offset(page), viewport.content_width())
            .unwrap();
        state.tick(LAID_OUT)
    }

    #[test]
    fn mount_recenters_on_next_tick() {
        let (mut state, calls) = state_with_recorder(NumberOfDays::Three);
        state.on_mount();
        assert!(state.has_pending());
        assert_eq!(state.tick(LAID_OUT), vec![FrameAction::Recenter { offset: 600.0 }]);
        assert!(!state.has_pending());
        assert!(state.tick(LAID_OUT).is_empty());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn mount_recenter_waits_for_layout() {
        let (mut state, _) = state_with_recorder(NumberOfDays::Three);
        state.on_mount();
        // First frame: the pages have no allocation yet.
        assert!(state.tick(0.0).is_empty());
        assert!(state.has_pending());
        assert_eq!(state.tick(LAID_OUT), vec![FrameAction::Recenter { offset: 600.0 }]);
        assert!(!state.has_pending());
    }

    #[test]
    fn first_page_goes_back_two_steps() {
        for days in [NumberOfDays::Three, NumberOfDays::Five, NumberOfDays::Seven] {
            let (mut state, calls) = state_with_recorder(days);
            let expected = pivot() - Duration::days(2 * days.get() as i64);
            settle_on(&mut state, 0);

            assert_eq!(state.current_moment(), expected);
            assert_eq!(*calls.borrow(), vec![("prev", expected)]);
        }
    }

    #[test]
    fn last_page_goes_forward_two_steps() {
        let (mut state, calls) = state_with_recorder(NumberOfDays::Seven);
        let expected = pivot() + Duration::days(14);
        let actions = settle_on(&mut state, 4);

        assert_eq!(state.current_moment(), expected);
        assert_eq!(*calls.borrow(), vec![("next", expected)]);
        assert_eq!(
            actions[0],
            FrameAction::Swiped(SwipeOutcome {
                page: 4,
                moment: expected,
                direction: SwipeDirection::Next,
            })
        );
    }

    #[test]
    fn neighbouring_pages_move_one_step() {
        let (mut state, calls) = state_with_recorder(NumberOfDays::Five);
        settle_on(&mut state, 3);
        assert_eq!(state.current_moment(), pivot() + Duration::days(5));
        settle_on(&mut state, 1);
        assert_eq!(state.current_moment(), pivot());
        assert_eq!(
            *calls.borrow(),
            vec![("next", pivot() + Duration::days(5)), ("prev", pivot())]
        );
    }

    #[test]
    fn centre_page_is_a_cancelled_swipe() {
        let (mut state, calls) = state_with_recorder(NumberOfDays::Three);
        let actions = settle_on(&mut state, 2);

        assert_eq!(state.current_moment(), pivot());
        assert!(calls.borrow().is_empty());
        assert!(matches!(
            actions[0],
            FrameAction::Swiped(SwipeOutcome {
                direction: SwipeDirection::Cancelled,
                ..
            })
        ));
    }

    #[test]
    fn commit_waits_for_tick_and_recenter_follows_render() {
        let (mut state, calls) = state_with_recorder(NumberOfDays::Three);
        state.scroll_ended(1200.0, 1500.0).unwrap();

        assert_eq!(state.current_moment(), pivot());
        assert!(calls.borrow().is_empty());

        let actions = state.tick(LAID_OUT);
        assert_eq!(actions.len(), 3);
        assert!(matches!(actions[0], FrameAction::Swiped(_)));
        match actions[1] {
            FrameAction::Render(window) => assert_eq!(window.pivot(), pivot() + Duration::days(6)),
            other => panic!("expected render, got {other:?}"),
        }
        assert_eq!(actions[2], FrameAction::Recenter { offset: 600.0 });
    }

    #[test]
    fn missing_callbacks_are_ignored() {
        let mut state = SwipeState::new(pivot(), NumberOfDays::Three, Viewport::new(WIDTH).unwrap());
        settle_on(&mut state, 0);
        settle_on(&mut state, 4);
        assert_eq!(state.current_moment(), pivot());
    }

    #[test]
    fn rejects_unusable_content_width() {
        let (mut state, _) = state_with_recorder(NumberOfDays::Three);
        for width in [0.0, -1.0, f64::NAN] {
            let err = state.scroll_ended(10.0, width).unwrap_err();
            assert_eq!(err.kind, SwipecalErrorKind::InvalidData);
        }
        assert!(!state.has_pending());
    }

    #[test]
    fn selected_date_prop_overrides_state() {
        let (mut state, calls) = state_with_recorder(NumberOfDays::Three);
        let other = pivot() + Duration::days(40);

        let actions = state.receive_selected_date(Some(other));
        assert_eq!(state.current_moment(), other);
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[1], FrameAction::Recenter { .. }));

        assert!(state.receive_selected_date(None).is_empty());
        assert_eq!(state.current_moment(), other);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn prop_update_does_not_touch_queued_swipe() {
        let (mut state, calls) = state_with_recorder(NumberOfDays::Three);
        state.scroll_ended(0.0, 1500.0).unwrap();
        let other = pivot() + Duration::days(40);
        state.receive_selected_date(Some(other));
        assert_eq!(state.current_moment(), other);

        // The queued swipe still applies relative to the date it settled on.
        state.tick(LAID_OUT);
        assert_eq!(state.current_moment(), pivot() - Duration::days(6));
        assert_eq!(*calls.borrow(), vec![("prev", pivot() - Duration::days(6))]);
    }

    #[test]
    fn recenter_uses_latest_viewport() {
        let (mut state, _) = state_with_recorder(NumberOfDays::Three);
        state.on_mount();
        state.set_viewport(Viewport::new(400.0).unwrap());
        assert!(state.tick(LAID_OUT).is_empty());
        assert_eq!(state.tick(2000.0), vec![FrameAction::Recenter { offset: 800.0 }]);
    }

    #[test]
    fn times_are_built_once() {
        let (mut state, _) = state_with_recorder(NumberOfDays::Three);
        let before = state.times().clone();
        settle_on(&mut state, 4);
        assert_eq!(state.times(), &before);
        assert_eq!(state.times().len(), 48);
    }
}
