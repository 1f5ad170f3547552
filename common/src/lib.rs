//! GroupList Common Library
//!
//! 名簿（Excel）とPDFの照合ロジック。ファイル操作を含まない部分をまとめる。

pub mod error;
pub mod header;
pub mod occupancy;
pub mod pool;

pub use error::{Error, Result};
pub use header::{find_column_index, require_column};
pub use occupancy::{parse_room_number, OccupancyAnalyzer, RoomSummary};
pub use pool::{is_pdf, reconcile, CandidatePool, MatchEvent, Reconciliation};
