use std::{cell::RefCell, rc::Rc, str::FromStr};

use chrono::{Duration, NaiveDate, Timelike};
use gtk4::{
    DrawingArea, GestureClick,
    cairo::{self, Context, FontSlant, FontWeight},
    prelude::{DrawingAreaExtManual, GestureSingleExt, WidgetExt},
};
use swipecal_common::{
    calendar::{
        CalendarEvent, ColumnGeometry, EventHitbox, EventStore, SLOT_MINUTES, TIME_LABELS_COUNT,
        hit_test,
        lay_out_day,
    },
    config::SwipeableConfig,
};

use crate::ui::widgets::utils::{CairoShapesExt, Rgba};

pub type EventPressCallback = Rc<dyn Fn(&CalendarEvent)>;

const COLUMN_INSET: f64 = 2.0;
const DEFAULT_EVENT_COLOR: &str = "#e9a949";

struct WeekViewContext {
    start: NaiveDate,
    width: f64,
    height: f64,
    laid_out_for: Option<(NaiveDate, i32, i32)>,
    hitboxes: Vec<EventHitbox>,
}

/// One page of the grid: a column per day, a row per half hour.
#[derive(Clone)]
pub struct WeekView {
    pub area: DrawingArea,
    context: Rc<RefCell<WeekViewContext>>,
}
impl WeekView {
    pub fn new(
        config: Rc<SwipeableConfig>,
        events: Rc<EventStore>,
        slot_height: f64,
        on_event_press: Option<EventPressCallback>,
    ) -> Self {
        let area = DrawingArea::builder()
            .width_request(config.viewport.page_width().round() as i32)
            .height_request((slot_height * TIME_LABELS_COUNT as f64).round() as i32)
            .hexpand(false)
            .css_classes(["week-view"])
            .build();

        let context = Rc::new(RefCell::new(WeekViewContext {
            start: config.selected_date.date(),
            width: 0.0,
            height: 0.0,
            laid_out_for: None,
            hitboxes: Vec::new(),
        }));

        area.set_draw_func({
            let context = Rc::clone(&context);
            let config = Rc::clone(&config);
            let events = Rc::clone(&events);
            move |area, ctx, width, height| {
                let mut context = context.borrow_mut();
                context.layout(&config, &events, width, height, slot_height);
                let renderer = WeekViewRenderer {
                    ctx,
                    config: &config,
                    events: &events,
                    context: &context,
                    slot_height,
                    text: area.color().into(),
                };
                if let Err(e) = renderer.draw_all() {
                    log::warn!("Failed to draw page starting {}: {}", context.start, e);
                }
            }
        });

        if let Some(callback) = on_event_press {
            let click = GestureClick::new();
            click.set_button(gtk4::gdk::BUTTON_PRIMARY);
            click.connect_released({
                let context = Rc::clone(&context);
                let events = Rc::clone(&events);
                move |_gesture, _n_press, x, y| {
                    let context = context.borrow();
                    let Some(hitbox) = hit_test(&context.hitboxes, x, y) else {
                        return;
                    };
                    if let Some(event) = events.get(hitbox.index) {
                        callback(event);
                    }
                }
            });
            area.add_controller(click);
        }

        Self { area, context }
    }

    pub fn set_start(&self, start: NaiveDate) {
        let mut context = self.context.borrow_mut();
        if context.start != start {
            context.start = start;
            context.laid_out_for = None;
            self.area.queue_draw();
        }
    }
}

impl WeekViewContext {
    fn layout(
        &mut self,
        config: &SwipeableConfig,
        events: &EventStore,
        width: i32,
        height: i32,
        slot_height: f64,
    ) {
        self.width = width as f64;
        self.height = height as f64;
        let key = (self.start, width, height);
        if self.laid_out_for == Some(key) {
            return;
        }

        let days = config.number_of_days.get() as i64;
        let column_width = self.width / days as f64;
        self.hitboxes = (0..days)
            .flat_map(|i| {
                let day = self.start + Duration::days(i);
                let column = ColumnGeometry {
                    x: i as f64 * column_width + COLUMN_INSET,
                    width: column_width - 2.0 * COLUMN_INSET,
                    top: 0.0,
                    height: slot_height * TIME_LABELS_COUNT as f64,
                };
                lay_out_day(&events.on_day(day), day, &column)
            })
            .collect();
        self.laid_out_for = Some(key);
    }
}

struct WeekViewRenderer<'c> {
    ctx: &'c Context,
    config: &'c SwipeableConfig,
    events: &'c EventStore,
    context: &'c WeekViewContext,
    slot_height: f64,
    text: Rgba,
}
impl WeekViewRenderer<'_> {
    fn draw_all(&self) -> Result<(), cairo::Error> {
        self.ctx
            .select_font_face(&self.config.font, FontSlant::Normal, FontWeight::Normal);
        self.draw_grid()?;
        for hitbox in &self.context.hitboxes {
            if let Some(event) = self.events.get(hitbox.index) {
                self.draw_event(hitbox, event)?;
            }
        }
        self.draw_time_indicator()
    }

    fn draw_grid(&self) -> Result<(), cairo::Error> {
        let width = self.context.width;
        self.ctx.set_line_cap(cairo::LineCap::Butt);

        // Rows: full hours stronger than half hours
        for (alpha, first) in [(0.08, 1), (0.2, 0)] {
            self.text.set_source(self.ctx, alpha);
            self.ctx.set_line_width(if first == 0 { 1.0 } else { 0.5 });
            for row in (first..=TIME_LABELS_COUNT).step_by(2) {
                let y = (row as f64 * self.slot_height).round() + 0.5;
                self.ctx.move_to(0.0, y);
                self.ctx.line_to(width, y);
            }
            self.ctx.stroke()?;
        }

        // Day separators
        let days = self.config.number_of_days.get();
        let column_width = width / days as f64;
        self.text.set_source(self.ctx, 0.15);
        self.ctx.set_line_width(1.0);
        for i in 0..=days {
            let x = (i as f64 * column_width).round() + 0.5;
            self.ctx.move_to(x, 0.0);
            self.ctx.line_to(x, self.context.height);
        }
        self.ctx.stroke()
    }

    fn draw_event(&self, hitbox: &EventHitbox, event: &CalendarEvent) -> Result<(), cairo::Error> {
        let EventHitbox {
            x,
            y,
            w,
            h,
            has_neighbor_above,
            ..
        } = *hitbox;

        let color_str = event.color.as_deref().unwrap_or(DEFAULT_EVENT_COLOR);
        let base_color = Rgba::from_str(color_str).unwrap_or_default();

        let neighbor_offset = if has_neighbor_above { 2.0 } else { 0.0 };
        CairoShapesExt::rounded_rectangle(self.ctx, x, y + neighbor_offset, w, h - neighbor_offset, 5.0);
        base_color.set_source(self.ctx, 0.45);
        self.ctx.fill_preserve()?;
        base_color.set_source(self.ctx, 0.8);
        self.ctx.set_line_width(1.0);
        self.ctx.stroke()?;

        // Label
        let padding_x = 5.0;
        let inner_width = w - 2.0 * padding_x;
        self.text.set_source(self.ctx, 0.9);
        self.ctx
            .select_font_face(&self.config.font, FontSlant::Normal, FontWeight::Bold);
        self.ctx.set_font_size(10.0);
        CairoShapesExt::clipped_text(self.ctx, &event.title, x + padding_x, y + 13.0, inner_width)?;

        self.ctx
            .select_font_face(&self.config.font, FontSlant::Normal, FontWeight::Normal);
        if h > 32.0 {
            self.ctx.set_font_size(9.0);
            let time = format!(
                "{} - {}",
                event.start.format("%H:%M"),
                event.end.format("%H:%M")
            );
            CairoShapesExt::clipped_text(self.ctx, &time, x + padding_x, y + 25.0, inner_width)?;
        }
        if let Some(location) = &event.location {
            if h > 46.0 {
                CairoShapesExt::clipped_text(self.ctx, location, x + padding_x, y + 37.0, inner_width)?;
            }
        }
        Ok(())
    }

    fn draw_time_indicator(&self) -> Result<(), cairo::Error> {
        let now = self.config.now();
        let offset = (now.date() - self.context.start).num_days();
        let days = self.config.number_of_days.get() as i64;
        if !(0..days).contains(&offset) {
            return Ok(());
        }

        let column_width = self.context.width / days as f64;
        let seconds = now.time().num_seconds_from_midnight() as f64;
        let y = seconds / (SLOT_MINUTES as f64 * 60.0) * self.slot_height;
        let x_start = offset as f64 * column_width;

        let accent = Rgba::from_str(&self.config.accent_color).unwrap_or_default();
        accent.set_source(self.ctx, 1.0);
        self.ctx.set_line_width(2.0);
        self.ctx.move_to(x_start, y);
        self.ctx.line_to(x_start + column_width, y);
        self.ctx.stroke()?;
        CairoShapesExt::circle(self.ctx, x_start + 3.0, y, 3.0)
    }
}
