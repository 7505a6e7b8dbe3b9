//! Core library modules for worklog.
//!
//! ## Features
//!
//! - **Aggregation Engine**: rounding, day/project grouping, session
//!   aggregation and project totals
//! - **Rendering**: fractional-hour formatting and the semicolon report
//! - **Infrastructure**: configuration, settings resolution, data storage,
//!   messaging and the report file sink
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use worklog::libs::grouping::{group_records, GroupOptions};
//! use worklog::libs::interval::{IntervalRecord, ProjectIndex};
//! use worklog::libs::session::{aggregate_buckets, AggregationSettings};
//!
//! let day = NaiveDate::from_ymd_opt(2020, 3, 2).unwrap();
//! let records = vec![IntervalRecord::new(
//!     day.and_hms_opt(8, 2, 0).unwrap(),
//!     day.and_hms_opt(16, 58, 0).unwrap(),
//!     None,
//! )];
//!
//! let buckets = group_records(records, &GroupOptions::default());
//! let settings = AggregationSettings { rounding_interval: 15, ms_per_minute: 60_000.0 };
//! let sessions = aggregate_buckets(&buckets, &settings, &ProjectIndex::default()).unwrap();
//! assert_eq!(sessions[0].work_minutes, 540);
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod grouping;
pub mod interval;
pub mod messages;
pub mod output;
pub mod report;
pub mod rounding;
pub mod session;
pub mod settings;
pub mod summary;
pub mod timesheet;
pub mod view;
