pub mod days;
pub mod event;
pub mod header;
pub mod layout;
pub mod swipe;
pub mod times;
pub mod viewport;
pub mod window;

pub use days::NumberOfDays;
pub use event::{CalendarEvent, EventStore};
pub use header::{HeaderFormat, header_days, header_labels};
pub use layout::{ColumnGeometry, EventHitbox, hit_test, lay_out_day};
pub use swipe::{FrameAction, SwipeDirection, SwipeHandlers, SwipeOutcome, SwipeState};
pub use times::{SLOT_MINUTES, TIME_LABELS_COUNT, TimeLabels, generate_times};
pub use viewport::Viewport;
pub use window::{CENTER_PAGE, DateWindow, PAGE_COUNT, prepare_dates};
