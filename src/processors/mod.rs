pub mod calendar;
pub mod dataset_assembler;
pub mod merge_report;
pub mod time_cleaner;
pub mod tolerance_join;

pub use calendar::CalendarClassifier;
pub use dataset_assembler::DatasetAssembler;
pub use merge_report::MergeReport;
pub use time_cleaner::{CleanSummary, TimeCleaner};
pub use tolerance_join::{Timestamped, ToleranceJoin};
