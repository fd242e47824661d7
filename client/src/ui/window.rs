use gtk4::{Window, glib::object::ObjectExt};
use swipecal_common::config::SwipeableConfig;

use crate::ui::SwipecalUi;

impl SwipecalUi {
    pub fn window(&mut self, config: &SwipeableConfig) -> Window {
        let width = config.time_column_width + config.viewport.page_width();
        let win = Window::builder()
            .title("swipecal")
            .default_width(width.round() as i32)
            .default_height(640)
            .resizable(false)
            .build();

        self.window = win.downgrade();
        win
    }
}
