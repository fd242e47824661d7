use std::{cell::RefCell, rc::Rc};

use chrono::NaiveDateTime;
use gtk4::{Adjustment, Box as GtkBox, glib::WeakRef, prelude::AdjustmentExt};
use swipecal_common::{
    calendar::{EventStore, FrameAction, PAGE_COUNT, SwipeState},
    config::SwipeableConfig,
};

use crate::ui::widgets::utils::animation::SnapAnimation;

mod builder;
mod header;
mod time_label;
mod week_view;

pub use builder::SwipeableBuilder;
use header::DayHeader;
use week_view::WeekView;

/// The widgets a [`FrameAction`] touches.
struct SwipeableView {
    header: DayHeader,
    pages: Vec<WeekView>,
    hadjustment: Adjustment,
}
impl SwipeableView {
    fn apply(&self, actions: Vec<FrameAction>) {
        for action in actions {
            match action {
                FrameAction::Swiped(outcome) => {
                    log::info!(
                        "Swiped {} (page {}), showing {}",
                        outcome.direction,
                        outcome.page,
                        outcome.moment.date()
                    );
                }
                FrameAction::Render(window) => {
                    self.header.update(window.pivot());
                    for (page, date) in self.pages.iter().zip(window.iter()) {
                        page.set_start(date.date());
                    }
                }
                FrameAction::Recenter { offset } => {
                    self.hadjustment.set_value(offset);
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct Swipeable {
    pub root: WeakRef<GtkBox>,
    state: Rc<RefCell<SwipeState>>,
    view: Rc<SwipeableView>,
    snap: Rc<SnapAnimation>,
}
impl Swipeable {
    pub fn builder(config: SwipeableConfig, events: EventStore) -> SwipeableBuilder {
        SwipeableBuilder::new(config, events)
    }
    pub fn current_moment(&self) -> NaiveDateTime {
        self.state.borrow().current_moment()
    }
    /// Replaces the selected date. `None` leaves everything as is.
    pub fn set_selected_date(&self, date: Option<NaiveDateTime>) {
        if let Some(date) = date {
            log::info!("Selected date set to {date}");
        }
        let actions = self.state.borrow_mut().receive_selected_date(date);
        self.view.apply(actions);
    }
    /// Animates to `page`. Settles exactly like a drag that ended there.
    pub fn page_to(&self, page: usize) {
        if self.snap.is_running() || page >= PAGE_COUNT {
            return;
        }
        let viewport = self.state.borrow().viewport();
        self.snap
            .start(self.view.hadjustment.value(), viewport.page_offset(page));
    }
}
