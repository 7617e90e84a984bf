use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

pub mod batch;
pub mod error;
pub mod meta;
pub mod mode;
pub mod preprocessor;

pub use batch::{process_code, process_file, process_files, BatchOptions};
pub use error::PreprocessError;
pub use mode::BuildMode;
pub use preprocessor::{Preprocessor, LUA_COMMENT_PREFIX};

/// log to stderr, filtered by RUST_LOG (warnings only by default)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();
}
