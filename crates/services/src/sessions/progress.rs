/// Aggregated view of interview progress, useful for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowProgress {
    pub total: usize,
    pub answered: usize,
    /// 1-based position of the question currently shown.
    pub position: usize,
    /// `position / total`, always in (0, 1].
    pub fraction: f64,
    pub is_complete: bool,
}
