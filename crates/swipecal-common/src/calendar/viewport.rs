use crate::{
    calendar::window::{CENTER_PAGE, PAGE_COUNT},
    swipecal_err,
    utils::errors::{SwipecalError, SwipecalErrorKind},
};

/// Layout of the horizontal pager. Handed in by whoever owns the widget
/// instead of being read from the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    page_width: f64,
}
impl Viewport {
    pub fn new(page_width: f64) -> Result<Self, SwipecalError> {
        if !page_width.is_finite() || page_width <= 0.0 {
            return Err(swipecal_err!(
                SwipecalErrorKind::InvalidAttribute,
                "page width must be a positive number, got {}",
                page_width
            ));
        }
        Ok(Self { page_width })
    }
    pub fn page_width(&self) -> f64 {
        self.page_width
    }
    pub fn content_width(&self) -> f64 {
        self.page_width * PAGE_COUNT as f64
    }
    /// Horizontal scroll offset that shows the centre page.
    pub fn center_offset(&self) -> f64 {
        self.page_width * CENTER_PAGE as f64
    }
    /// Offset of the left edge of `page`, clamped to the existing pages.
    pub fn page_offset(&self, page: usize) -> f64 {
        self.page_width * page.min(PAGE_COUNT - 1) as f64
    }
    /// Whether content of `content_width` holds all pages. Allows up to a
    /// pixel of rounding per page.
    pub fn is_laid_out(&self, content_width: f64) -> bool {
        content_width.is_finite() && content_width + PAGE_COUNT as f64 >= self.content_width()
    }
    /// The page closest to a scroll offset.
    pub fn nearest_page(&self, offset: f64) -> usize {
        let page = (offset / self.page_width).round();
        page.clamp(0.0, (PAGE_COUNT - 1) as f64) as usize
    }
}
