use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{DetectionError, HostApiError};
use crate::types::{ArchitectureKey, BitWidth, DetectionPathway, DetectionResult};

/// Structured info block exposed by older host releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyInfo {
    #[serde(default)]
    pub is_64bit: bool,
    #[serde(default)]
    pub is_32bit: bool,
    pub proc_name: String,
}

/// Introspection surface of the host tool.
///
/// Host releases expose either the legacy info block or the modern accessor
/// functions (sometimes both). Each method defaults to
/// [`HostApiError::Unavailable`], so an adapter only implements what its host
/// version provides.
pub trait HostEnvironment {
    fn legacy_info(&self) -> Result<LegacyInfo, HostApiError> {
        Err(HostApiError::unavailable("get_inf_structure"))
    }

    fn is_32bit_or_higher(&self) -> Result<bool, HostApiError> {
        Err(HostApiError::unavailable("inf_is_32bit_or_higher"))
    }

    fn is_32bit_exactly(&self) -> Result<bool, HostApiError> {
        Err(HostApiError::unavailable("inf_is_32bit_exactly"))
    }

    fn processor_name(&self) -> Result<String, HostApiError> {
        Err(HostApiError::unavailable("inf_get_procname"))
    }
}

impl<H: HostEnvironment + ?Sized> HostEnvironment for &H {
    fn legacy_info(&self) -> Result<LegacyInfo, HostApiError> {
        (**self).legacy_info()
    }

    fn is_32bit_or_higher(&self) -> Result<bool, HostApiError> {
        (**self).is_32bit_or_higher()
    }

    fn is_32bit_exactly(&self) -> Result<bool, HostApiError> {
        (**self).is_32bit_exactly()
    }

    fn processor_name(&self) -> Result<String, HostApiError> {
        (**self).processor_name()
    }
}

/// One way of asking the host for its architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detector {
    Legacy,
    Modern,
}

impl Detector {
    /// Fixed attempt order: the legacy block is preferred whenever it answers.
    pub const PRIORITY: [Detector; 2] = [Detector::Legacy, Detector::Modern];

    pub fn pathway(self) -> DetectionPathway {
        match self {
            Detector::Legacy => DetectionPathway::Legacy,
            Detector::Modern => DetectionPathway::Modern,
        }
    }

    pub fn detect<H>(self, host: &H) -> Result<DetectionResult, DetectionError>
    where
        H: HostEnvironment + ?Sized,
    {
        let (proc_name, bit_width) = match self {
            Detector::Legacy => Self::detect_legacy(host)?,
            Detector::Modern => Self::detect_modern(host)?,
        };

        // Byte order is not part of the key. An empty name is still an answer;
        // the registry lookup decides whether it is supported.
        Ok(DetectionResult {
            architecture: ArchitectureKey::from(proc_name),
            bit_width,
            pathway: self.pathway(),
        })
    }

    fn detect_legacy<H>(host: &H) -> Result<(String, BitWidth), HostApiError>
    where
        H: HostEnvironment + ?Sized,
    {
        let info = host.legacy_info()?;
        let bit_width = if info.is_64bit {
            BitWidth::Bits64
        } else if info.is_32bit {
            BitWidth::Bits32
        } else {
            BitWidth::Bits16
        };
        Ok((info.proc_name, bit_width))
    }

    fn detect_modern<H>(host: &H) -> Result<(String, BitWidth), HostApiError>
    where
        H: HostEnvironment + ?Sized,
    {
        let bit_width = if host.is_32bit_or_higher()? {
            if host.is_32bit_exactly()? {
                BitWidth::Bits32
            } else {
                BitWidth::Bits64
            }
        } else {
            BitWidth::Bits16
        };
        Ok((host.processor_name()?, bit_width))
    }
}

/// Detect through the legacy pathway, switching to the modern one once if the
/// legacy pathway fails for any reason.
pub fn detect_with_fallback<H>(host: &H) -> Result<DetectionResult, DetectionError>
where
    H: HostEnvironment + ?Sized,
{
    let [primary, fallback] = Detector::PRIORITY;

    let primary_error = match primary.detect(host) {
        Ok(result) => return Ok(result),
        Err(e) => e,
    };
    debug!(
        "{} detection failed ({}), trying {} pathway",
        primary.pathway(),
        primary_error,
        fallback.pathway()
    );

    fallback
        .detect(host)
        .map_err(|fallback_error| DetectionError::Exhausted {
            legacy: primary_error.to_string(),
            modern: fallback_error.to_string(),
        })
}
