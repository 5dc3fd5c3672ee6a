use crate::core::types::Frame;

pub trait Dashboard: Send + Sync {
    /// Full repaint from one fetch cycle. Never called with partial data.
    fn render(&self, frame: &Frame);

    /// One-line status message (search progress, selection count, location).
    fn status(&self, message: &str);

    /// User-visible notification for a failed fetch cycle.
    fn alert(&self, message: &str);
}
