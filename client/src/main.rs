use clap::Parser;
use gtk4::{
    CssProvider,
    gdk::Display,
    prelude::{GtkWindowExt, WidgetExt},
};
use swipecal_common::{
    swipecal_err,
    utils::errors::{SwipecalError, SwipecalErrorKind},
};
use tokio::task::spawn_blocking;

use crate::{
    config::{Flags, LoadedConfig, load_config},
    ui::{SwipecalUi, widgets::Swipeable},
};

mod config;
mod ui;

#[tokio::main]
async fn main() -> Result<(), SwipecalError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let flags = Flags::parse();

    gtk4::init().map_err(|e| swipecal_err!(SwipecalErrorKind::Gtk, e.to_string()))?;
    let main_loop = gtk4::glib::MainLoop::new(None, false);

    gtk4::gio::resources_register_include!("/resources.gresources")
        .map_err(|e| swipecal_err!(SwipecalErrorKind::Gtk, e.to_string()))?;

    let loaded = spawn_blocking(move || load_config(&flags));

    // Load css
    gtk4::glib::idle_add_full(gtk4::glib::Priority::HIGH_IDLE, move || {
        let Some(display) = Display::default() else {
            log::warn!("No display available, skipping stylesheet");
            return gtk4::glib::ControlFlow::Break;
        };
        let provider = CssProvider::new();
        provider.load_from_resource("/dev/swipecal/main.css");

        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );

        gtk4::glib::ControlFlow::Break
    });

    let LoadedConfig { config, events } = loaded
        .await
        .map_err(|e| swipecal_err!(SwipecalErrorKind::TaskJoin, e.to_string()))??;

    let mut ui = SwipecalUi::default();
    let win = ui.window(&config);

    win.connect_close_request({
        let main_loop = main_loop.clone();
        move |_| {
            main_loop.quit();
            gtk4::glib::Propagation::Stop
        }
    });

    let swipeable = Swipeable::builder(config, events)
        .for_window(&win)
        .on_swipe_next(|moment| log::info!("Moved forward to {}", moment.date()))
        .on_swipe_prev(|moment| log::info!("Moved back to {}", moment.date()))
        .on_event_press(|event| {
            log::info!(
                "{}: {} - {}",
                event.title,
                event.start.format("%a %-d %H:%M"),
                event.end.format("%H:%M")
            )
        })
        .build();

    win.present();
    if let Some(root) = swipeable.root.upgrade() {
        root.grab_focus();
    }

    main_loop.run();
    log::info!("Closed on {}", swipeable.current_moment());

    Ok(())
}
