//! `df-analysis` — post-processing of simulation output.
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`peaks`]  | `detect_peaks` — distinct rounded opinions in a snapshot   |
//! | [`stats`]  | Per-step `mean` and `variance` over a history              |
//! | [`study`]  | `peak_study`, `peak_sweep`, `PeakSummary`                  |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the independent runs of a study on Rayon.         |

pub mod error;
pub mod peaks;
pub mod stats;
pub mod study;


pub use error::{AnalysisError, AnalysisResult};
pub use peaks::{detect_peaks, peak_count};
pub use stats::{mean, snapshot_mean, snapshot_variance, variance};
pub use study::{PeakSummary, StudyConfig, peak_study, peak_sweep, summarize, summarize_sweep};
