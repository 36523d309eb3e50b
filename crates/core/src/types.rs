/// All timestamps are UTC. Calendar-day reporting converts to local time at
/// the point of aggregation only.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
