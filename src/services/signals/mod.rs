//! Trading signals service module.
//!
//! Pure, synchronous scoring over a point-in-time market snapshot: oscillator,
//! certainty scores, tradability filtering, best-bet selection and holding
//! horizon.

pub mod certainty;
pub mod horizon;
pub mod indicators;
pub mod ranker;
pub mod report;

pub use certainty::calculate_certainty;
pub use horizon::{holding_days, projected_profit, recommend};
pub use ranker::{analyze, best_signal};
pub use report::{assemble_report_at, run_scan, scan};
