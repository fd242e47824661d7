use gtk4::{Box as GtkBox, Label, prelude::BoxExt, prelude::WidgetExt};
use swipecal_common::calendar::TimeLabels;

/// One row of the time column.
pub struct TimeLabel;
impl TimeLabel {
    pub fn new(time: &str, height: i32) -> GtkBox {
        let container = GtkBox::builder()
            .orientation(gtk4::Orientation::Vertical)
            .height_request(height)
            .css_classes(["time-label"])
            .build();
        let text = Label::builder()
            .label(time)
            .halign(gtk4::Align::End)
            .valign(gtk4::Align::Start)
            .css_classes(["time-text"])
            .build();
        container.append(&text);
        container
    }

    /// The fixed-width column holding a label for every half hour.
    pub fn column(times: &TimeLabels, width: f64, slot_height: f64) -> GtkBox {
        let column = GtkBox::builder()
            .orientation(gtk4::Orientation::Vertical)
            .width_request(width.round() as i32)
            .hexpand(false)
            .css_classes(["time-column"])
            .build();
        for time in times.iter() {
            column.append(&Self::new(time, slot_height.round() as i32));
        }
        column.set_valign(gtk4::Align::Start);
        column
    }
}
