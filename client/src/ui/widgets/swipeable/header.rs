use std::{rc::Rc, str::FromStr};

use chrono::NaiveDateTime;
use gtk4::{
    Box as GtkBox, CssProvider, Label,
    gdk::Display,
    prelude::{BoxExt, WidgetExt},
};
use swipecal_common::{
    calendar::{header_days, header_labels},
    config::SwipeableConfig,
};

use crate::ui::widgets::utils::Rgba;

const HEADER_NAME: &str = "swipeable-header";

/// Row of day labels above the grid, bound to the selected date.
pub struct DayHeader {
    pub root: GtkBox,
    labels: Vec<Label>,
    config: Rc<SwipeableConfig>,
}
impl DayHeader {
    pub fn new(config: Rc<SwipeableConfig>) -> Self {
        let root = GtkBox::builder()
            .orientation(gtk4::Orientation::Horizontal)
            .css_classes(["swipeable-header"])
            .name(HEADER_NAME)
            .build();

        // Keeps the labels above their columns, right of the time column.
        let spacer = GtkBox::builder()
            .width_request(config.time_column_width.round() as i32)
            .build();
        root.append(&spacer);

        let days = config.number_of_days.get() as usize;
        let label_width = (config.viewport.page_width() / days as f64).floor() as i32;
        let labels: Vec<Label> = (0..days)
            .map(|_| {
                let label = Label::builder()
                    .width_request(label_width)
                    .xalign(0.5)
                    .css_classes(["day-label"])
                    .build();
                root.append(&label);
                label
            })
            .collect();

        Self::apply_style(&config);

        Self {
            root,
            labels,
            config,
        }
    }

    pub fn update(&self, selected_date: NaiveDateTime) {
        let today = self.config.now().date();
        let texts = header_labels(
            selected_date,
            self.config.number_of_days,
            &self.config.format_date_header,
        );
        let days = header_days(selected_date, self.config.number_of_days);

        for ((label, text), day) in self.labels.iter().zip(texts).zip(days) {
            label.set_label(&text);
            if day == today {
                label.add_css_class("today");
            } else {
                label.remove_css_class("today");
            }
        }
    }

    fn apply_style(config: &SwipeableConfig) {
        let style = &config.header_style;
        let mut rules = Vec::new();
        if let Some(color) = style.color.as_deref().and_then(|c| Rgba::from_str(c).ok()) {
            rules.push(format!("color: {};", color.to_css()));
        }
        if let Some(bg) = style
            .background
            .as_deref()
            .and_then(|c| Rgba::from_str(c).ok())
        {
            rules.push(format!("background-color: {};", bg.to_css()));
        }
        if let Some(font) = &style.font {
            rules.push(format!("font-family: \"{}\";", font.replace('"', "")));
        }
        if let Some(size) = style.font_size {
            rules.push(format!("font-size: {size}px;"));
        }
        if rules.is_empty() {
            return;
        }

        let Some(display) = Display::default() else {
            log::warn!("No display available, header_style is ignored");
            return;
        };
        let provider = CssProvider::new();
        provider.load_from_string(&format!("#{HEADER_NAME} {{ {} }}", rules.join(" ")));
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION + 1,
        );
    }
}
