mod swipeable;
pub mod utils;

pub use swipeable::Swipeable;
