use spell_core::model::AttemptStatus;

/// Aggregated view of where the session stands, ready for rendering.
///
/// `position` is 1-based; it reads 0 (and the countdown reads 0) when the
/// active list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub position: usize,
    pub total: usize,
    pub solved_in_scope: usize,
    pub streak: u32,
    pub best_streak: u32,
    pub status: AttemptStatus,
    pub time_remaining: u32,
    pub starred: bool,
    pub hint_used: bool,
    pub definition_revealed: bool,
}
