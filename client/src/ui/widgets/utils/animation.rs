use std::cell::Cell;

use gtk4::gdk::FrameClock;

#[derive(Clone, Copy, Default)]
pub enum EaseFunction {
    #[default]
    None,
    EaseOutCubic,
}
impl EaseFunction {
    pub fn apply(&self, time: f64) -> f64 {
        let t = time.clamp(0.0, 1.0);
        match self {
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::None => t,
        }
    }
}

/// Progress of a one-shot animation, driven by the widget frame clock.
#[derive(Default)]
pub struct AnimationState {
    pub progress: Cell<f64>,
    pub running: Cell<bool>,
    start_time: Cell<Option<i64>>,
    duration: Cell<f64>,
    function: Cell<EaseFunction>,
}
impl AnimationState {
    pub fn start(&self, duration: f64, function: EaseFunction) {
        self.running.set(true);
        self.start_time.set(None);
        self.duration.set(duration.max(f64::EPSILON));
        self.function.set(function);
        self.progress.set(0.0);
    }
    pub fn stop(&self) {
        self.running.set(false);
        self.start_time.set(None);
    }

    pub fn update(&self, frame_clock: &FrameClock) {
        if !self.running.get() {
            return;
        }

        let now = frame_clock.frame_time(); // microseconds

        let elapsed = if let Some(start) = self.start_time.get() {
            (now - start) as f64 / 1_000_000.0
        } else {
            self.start_time.set(Some(now));
            return;
        };

        let linear = (elapsed / self.duration.get()).min(1.0);
        self.progress.set(self.function.get().apply(linear));

        if linear >= 1.0 {
            self.progress.set(1.0);
            self.stop();
        }
    }
}

/// Animated move of the pager from one scroll offset to a page boundary.
#[derive(Default)]
pub struct SnapAnimation {
    pub state: AnimationState,
    from: Cell<f64>,
    to: Cell<f64>,
}
impl SnapAnimation {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn start(&self, from: f64, to: f64) {
        self.from.set(from);
        self.to.set(to);
        self.state.start(0.25, EaseFunction::EaseOutCubic);
    }
    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }
    pub fn value(&self) -> f64 {
        let from = self.from.get();
        from + (self.to.get() - from) * self.state.progress.get()
    }
}
