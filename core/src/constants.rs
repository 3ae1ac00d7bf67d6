/// Stale heap entries tolerated before a delete triggers compaction. The
/// effective limit also scales with the live size.
pub const DEFAULT_COMPACTION_THRESHOLD: usize = 1024;
