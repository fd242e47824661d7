use gtk4::Window;
use gtk4::glib::WeakRef;

pub mod widgets;
mod window;

#[derive(Default)]
pub struct SwipecalUi {
    pub window: WeakRef<Window>,
}
