pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod server;
pub mod source;

pub use error::{ApiError, Result};
pub use handlers::AppState;
pub use router::create_router;
pub use server::{build_state, init_tracing, run_server};
pub use source::{ApiRecordSource, RecordSource};
