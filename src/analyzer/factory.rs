use std::sync::Arc;

use super::error::FactoryError;
use super::registry::AnalyzerRegistry;
use crate::host::{detect_with_fallback, DetectionError, HostEnvironment};
use crate::logging::{LogSink, TracingSink};
use crate::types::DetectionResult;

/// Caller-supplied inputs forwarded to the selected constructor.
#[derive(Clone)]
pub struct AnalyzerContext {
    pub sink: Arc<dyn LogSink>,
    /// The file under analysis is an ELF binary.
    pub is_elf: bool,
}

impl AnalyzerContext {
    pub fn new(sink: Arc<dyn LogSink>, is_elf: bool) -> Self {
        Self { sink, is_elf }
    }

    pub fn with_tracing(is_elf: bool) -> Self {
        Self::new(Arc::new(TracingSink), is_elf)
    }
}

impl std::fmt::Debug for AnalyzerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerContext")
            .field("is_elf", &self.is_elf)
            .finish_non_exhaustive()
    }
}

/// Picks and builds the analyzer matching the host's current processor.
pub struct AnalyzerFactory<'r, A> {
    registry: &'r AnalyzerRegistry<A>,
}

impl<'r, A> AnalyzerFactory<'r, A> {
    pub fn new(registry: &'r AnalyzerRegistry<A>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r AnalyzerRegistry<A> {
        self.registry
    }

    pub fn supports(&self, architecture: &str) -> bool {
        self.registry.contains(architecture)
    }

    pub fn detect<H>(&self, host: &H) -> Result<DetectionResult, DetectionError>
    where
        H: HostEnvironment + ?Sized,
    {
        detect_with_fallback(host)
    }

    /// Create the analyzer for the host's processor.
    ///
    /// Returns `None` when the processor has no registered analyzer or the host
    /// answered neither detection pathway; the reason goes to `ctx.sink` as a
    /// single error message.
    pub fn create_analyzer<H>(&self, host: &H, ctx: &AnalyzerContext) -> Option<A>
    where
        H: HostEnvironment + ?Sized,
    {
        match self.try_create_analyzer(host, ctx) {
            Ok(analyzer) => Some(analyzer),
            Err(e) => {
                ctx.sink.error(&e.to_string());
                None
            }
        }
    }

    /// Same flow as [`create_analyzer`](Self::create_analyzer) with the failure
    /// returned instead of logged.
    pub fn try_create_analyzer<H>(
        &self,
        host: &H,
        ctx: &AnalyzerContext,
    ) -> Result<A, FactoryError>
    where
        H: HostEnvironment + ?Sized,
    {
        let detected = self.detect(host)?;
        ctx.sink.info(&format!(
            "Processor: {}, {}bit",
            detected.architecture, detected.bit_width
        ));

        let ctor = self
            .registry
            .lookup(detected.architecture.as_str())
            .ok_or_else(|| FactoryError::UnsupportedArchitecture {
                architecture: detected.architecture.clone(),
                bit_width: detected.bit_width,
            })?;

        Ok(ctor(ctx.sink.clone(), detected.bit_width, ctx.is_elf))
    }
}
