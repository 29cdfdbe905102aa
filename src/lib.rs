//! Analyzer Dispatch - architecture-keyed analyzer selection
//!
//! Architecture modules register a constructor under the processor name the
//! host tool uses. At analysis time the factory asks the host which processor
//! and bit width are in use, through the legacy info block or, when that is
//! missing, the newer accessor functions, and builds the matching analyzer.

pub mod analyzer;
pub mod host;
pub mod logging;
pub mod types;

pub use analyzer::{AnalyzerContext, AnalyzerFactory, AnalyzerRegistry, Constructor};
pub use host::{detect_with_fallback, Detector, HostEnvironment, HostSnapshot};
pub use logging::{LogSink, MemorySink, TracingSink};
pub use types::*;
