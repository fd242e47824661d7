use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use chrono::NaiveDateTime;
use gtk4::{
    Box as GtkBox, EventControllerKey, EventControllerScroll, EventControllerScrollFlags,
    GestureDrag, PolicyType, ScrolledWindow, Window,
    gdk::Key,
    glib::object::ObjectExt,
    prelude::{
        AdjustmentExt, BoxExt, EventControllerExt, GestureDragExt, GtkWindowExt, WidgetExt,
        WidgetExtManual,
    },
};
use swipecal_common::{
    calendar::{
        CENTER_PAGE, CalendarEvent, EventStore, PAGE_COUNT, SwipeHandlers, SwipeState, Viewport,
    },
    config::SwipeableConfig,
};

use crate::ui::widgets::{
    swipeable::{
        DayHeader, Swipeable, SwipeableView, WeekView, time_label::TimeLabel,
        week_view::EventPressCallback,
    },
    utils::animation::SnapAnimation,
};

/// Share of a page a drag has to cover to flip to the neighbouring page.
const SWIPE_THRESHOLD: f64 = 0.2;

pub struct SwipeableBuilder {
    root: GtkBox,
    config: Rc<SwipeableConfig>,
    events: Rc<EventStore>,
    handlers: SwipeHandlers,
    on_event_press: Option<EventPressCallback>,
}
impl SwipeableBuilder {
    pub fn new(config: SwipeableConfig, events: EventStore) -> Self {
        let root = GtkBox::builder()
            .orientation(gtk4::Orientation::Vertical)
            .focusable(true)
            .css_classes(["swipeable"])
            .build();

        Self {
            root,
            config: Rc::new(config),
            events: Rc::new(events),
            handlers: SwipeHandlers::default(),
            on_event_press: None,
        }
    }
    pub fn on_swipe_next(mut self, callback: impl Fn(NaiveDateTime) + 'static) -> Self {
        self.handlers.on_swipe_next = Some(Box::new(callback));
        self
    }
    pub fn on_swipe_prev(mut self, callback: impl Fn(NaiveDateTime) + 'static) -> Self {
        self.handlers.on_swipe_prev = Some(Box::new(callback));
        self
    }
    pub fn on_event_press(mut self, callback: impl Fn(&CalendarEvent) + 'static) -> Self {
        self.on_event_press = Some(Rc::new(callback));
        self
    }
    pub fn for_window(self, window: &Window) -> Self {
        window.set_child(Some(&self.root));
        self
    }

    /// Snaps to a page boundary after a drag of `dx` that began at `origin`.
    fn snap_target(viewport: Viewport, origin: f64, dx: f64) -> usize {
        let origin_page = viewport.nearest_page(origin);
        let nearest = viewport.nearest_page(origin - dx);
        if nearest != origin_page {
            return nearest;
        }
        let threshold = viewport.page_width() * SWIPE_THRESHOLD;
        if dx <= -threshold {
            (origin_page + 1).min(PAGE_COUNT - 1)
        } else if dx >= threshold {
            origin_page.saturating_sub(1)
        } else {
            origin_page
        }
    }

    /// Page to snap to when a drag is released. A release without movement
    /// only snaps if the press stopped a running snap midway.
    fn release_target(viewport: Viewport, origin: f64, dx: f64, interrupted: bool) -> Option<usize> {
        if dx == 0.0 && !interrupted {
            return None;
        }
        Some(Self::snap_target(viewport, origin, dx))
    }

    fn connect_drag(pager: &ScrolledWindow, swipeable: &Swipeable) {
        let drag = GestureDrag::new();
        let origin = Rc::new(Cell::new(0.0));
        let interrupted = Rc::new(Cell::new(false));

        drag.connect_drag_begin({
            let snap = Rc::clone(&swipeable.snap);
            let origin = Rc::clone(&origin);
            let interrupted = Rc::clone(&interrupted);
            let pager = pager.downgrade();
            move |_gesture, _x, _y| {
                let Some(pager) = pager.upgrade() else {
                    return;
                };
                interrupted.set(snap.is_running());
                snap.state.stop();
                origin.set(pager.hadjustment().value());
            }
        });
        drag.connect_drag_update({
            let origin = Rc::clone(&origin);
            let pager = pager.downgrade();
            move |_gesture, dx, _dy| {
                if let Some(pager) = pager.upgrade() {
                    pager.hadjustment().set_value(origin.get() - dx);
                }
            }
        });
        drag.connect_drag_end({
            let swipeable = swipeable.clone();
            move |_gesture, dx, _dy| {
                let viewport = swipeable.state.borrow().viewport();
                if let Some(target) =
                    Self::release_target(viewport, origin.get(), dx, interrupted.get())
                {
                    swipeable.page_to(target);
                }
            }
        });
        pager.add_controller(drag);
    }

    fn connect_scroll(pager: &ScrolledWindow, swipeable: &Swipeable) {
        let scroll = EventControllerScroll::new(
            EventControllerScrollFlags::HORIZONTAL | EventControllerScrollFlags::DISCRETE,
        );
        scroll.set_propagation_phase(gtk4::PropagationPhase::Capture);
        scroll.connect_scroll({
            let swipeable = swipeable.clone();
            move |_controller, dx, _dy| {
                if dx == 0.0 {
                    return gtk4::glib::Propagation::Proceed;
                }
                let page = if dx > 0.0 {
                    CENTER_PAGE + 1
                } else {
                    CENTER_PAGE - 1
                };
                swipeable.page_to(page);
                gtk4::glib::Propagation::Stop
            }
        });
        pager.add_controller(scroll);
    }

    fn connect_keys(root: &GtkBox, config: Rc<SwipeableConfig>, swipeable: &Swipeable) {
        let controller = EventControllerKey::new();
        controller.set_propagation_phase(gtk4::PropagationPhase::Capture);
        controller.connect_key_pressed({
            let swipeable = swipeable.clone();
            move |_controller, key, _keycode, _state| {
                if key == Key::Left {
                    swipeable.page_to(CENTER_PAGE - 1);
                } else if key == Key::Right {
                    swipeable.page_to(CENTER_PAGE + 1);
                } else if key == Key::t || key == Key::Home {
                    swipeable.set_selected_date(Some(config.now()));
                } else {
                    return gtk4::glib::Propagation::Proceed;
                }
                gtk4::glib::Propagation::Stop
            }
        });
        root.add_controller(controller);
    }

    /// Attaches the lifecycle and frame handling:
    /// - centring once the pager is mapped
    /// - the snap animation
    /// - committing settled swipes one frame later
    fn connect_frames(pager: &ScrolledWindow, swipeable: &Swipeable) {
        pager.connect_map({
            let state = Rc::clone(&swipeable.state);
            move |_| state.borrow_mut().on_mount()
        });

        pager.add_tick_callback({
            let swipeable = swipeable.clone();
            move |pager, frame_clock| {
                let snap = &swipeable.snap;
                if snap.is_running() {
                    snap.state.update(frame_clock);
                    let hadjustment = pager.hadjustment();
                    hadjustment.set_value(snap.value());

                    if !snap.is_running() {
                        let settled = swipeable
                            .state
                            .borrow_mut()
                            .scroll_ended(hadjustment.value(), hadjustment.upper());
                        if let Err(e) = settled {
                            log::warn!("Ignoring swipe: {e}");
                        }
                    }
                    // The settled swipe is committed on the next frame.
                    return gtk4::glib::ControlFlow::Continue;
                }

                if swipeable.state.borrow().has_pending() {
                    let content_width = pager.hadjustment().upper();
                    let actions = swipeable.state.borrow_mut().tick(content_width);
                    swipeable.view.apply(actions);
                }
                gtk4::glib::ControlFlow::Continue
            }
        });
    }

    pub fn build(self) -> Swipeable {
        let config = Rc::clone(&self.config);
        let slot_height = config.slot_height.round().max(1.0);
        let page_width = config.viewport.page_width().round() as i32;

        let state = SwipeState::new(config.selected_date, config.number_of_days, config.viewport);
        let window = state.dates();

        // Header
        let header = DayHeader::new(Rc::clone(&config));
        header.update(state.current_moment());
        self.root.append(&header.root);

        // Time column and pages share one vertical scroll
        let vscroll = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vscrollbar_policy(PolicyType::Automatic)
            .vexpand(true)
            .build();
        let content = GtkBox::builder()
            .orientation(gtk4::Orientation::Horizontal)
            .build();
        content.append(&TimeLabel::column(
            state.times(),
            config.time_column_width,
            slot_height,
        ));

        let pager = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::External)
            .vscrollbar_policy(PolicyType::Never)
            .kinetic_scrolling(false)
            .width_request(page_width)
            .hexpand(false)
            .valign(gtk4::Align::Start)
            .build();
        let pages_box = GtkBox::builder()
            .orientation(gtk4::Orientation::Horizontal)
            .build();
        let pages: Vec<WeekView> = window
            .iter()
            .map(|date| {
                let page = WeekView::new(
                    Rc::clone(&config),
                    Rc::clone(&self.events),
                    slot_height,
                    self.on_event_press.clone(),
                );
                page.set_start(date.date());
                pages_box.append(&page.area);
                page
            })
            .collect();
        pager.set_child(Some(&pages_box));
        content.append(&pager);
        vscroll.set_child(Some(&content));
        self.root.append(&vscroll);

        let swipeable = Swipeable {
            root: self.root.downgrade(),
            state: Rc::new(RefCell::new(state.with_handlers(self.handlers))),
            view: Rc::new(SwipeableView {
                header,
                pages,
                hadjustment: pager.hadjustment(),
            }),
            snap: Rc::new(SnapAnimation::new()),
        };

        Self::connect_frames(&pager, &swipeable);
        Self::connect_drag(&pager, &swipeable);
        Self::connect_scroll(&pager, &swipeable);
        Self::connect_keys(&self.root, config, &swipeable);

        swipeable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_target_needs_threshold_or_nearest_page() {
        let viewport = Viewport::new(300.0).unwrap();
        let origin = viewport.center_offset();

        assert_eq!(SwipeableBuilder::snap_target(viewport, origin, -20.0), 2);
        assert_eq!(SwipeableBuilder::snap_target(viewport, origin, -70.0), 3);
        assert_eq!(SwipeableBuilder::snap_target(viewport, origin, 70.0), 1);
        assert_eq!(SwipeableBuilder::snap_target(viewport, origin, 400.0), 1);
        assert_eq!(SwipeableBuilder::snap_target(viewport, origin, -500.0), 4);
        assert_eq!(SwipeableBuilder::snap_target(viewport, 0.0, 100.0), 0);
    }

    #[test]
    fn tap_during_snap_settles_on_nearest_page() {
        let viewport = Viewport::new(300.0).unwrap();

        assert_eq!(SwipeableBuilder::release_target(viewport, 600.0, 0.0, false), None);
        // Stopped between pages 1 and 2, and between 3 and 4.
        assert_eq!(SwipeableBuilder::release_target(viewport, 460.0, 0.0, true), Some(2));
        assert_eq!(SwipeableBuilder::release_target(viewport, 1000.0, 0.0, true), Some(3));
        assert_eq!(SwipeableBuilder::release_target(viewport, 600.0, -70.0, false), Some(3));
    }
}
