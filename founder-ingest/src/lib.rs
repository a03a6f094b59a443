//! founder-ingest: loads caller-side snapshots (JSON export, metrics CSV) into engine types.

pub mod metrics_csv;
pub mod snapshot;

pub use metrics_csv::{parse_metrics_csv, read_metrics_csv};
pub use snapshot::{load_snapshot, parse_snapshot, Snapshot, SnapshotData};
