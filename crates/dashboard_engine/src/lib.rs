pub mod aggregator;
pub mod branding;
pub mod classifier;
pub mod pipeline;
pub mod presentation;

pub use aggregator::{Aggregated, MissingFieldError};
pub use branding::{load_branding, MissingAssetError};
pub use classifier::{classify, classify_records};
pub use pipeline::{generate_dashboard, run_pipeline, write_dashboard_json};
