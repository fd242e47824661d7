pub const TIME_LABELS_COUNT: usize = 48;
pub const SLOT_MINUTES: u32 = 30;

/// The half-hour labels of the time column, built once and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLabels(Box<[String]>);
impl TimeLabels {
    pub fn new() -> Self {
        Self(generate_times().into_boxed_slice())
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
impl Default for TimeLabels {
    fn default() -> Self {
        Self::new()
    }
}

pub fn generate_times() -> Vec<String> {
    (0..TIME_LABELS_COUNT)
        .map(|i| {
            let minutes = if i % 2 == 0 { "00" } else { "30" };
            let hour = i / 2;
            format!("{}:{}", hour, minutes)
        })
        .collect()
}
