use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::detector::{HostEnvironment, LegacyInfo};
use super::error::{HostApiError, SnapshotError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
    Auto,
}

/// Values the modern accessor functions returned on a captured host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModernSnapshot {
    pub is_32bit_or_higher: bool,
    pub is_32bit_exactly: bool,
    pub processor_name: String,
}

/// Recorded answers of a host's introspection surfaces.
///
/// A missing section behaves like a host release that lacks that API, so a
/// snapshot with only `modern` exercises the fallback pathway.
///
/// ```yaml
/// legacy:
///   is_64bit: true
///   proc_name: metapc
/// modern:
///   is_32bit_or_higher: true
///   is_32bit_exactly: false
///   processor_name: metapc
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<LegacyInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modern: Option<ModernSnapshot>,
}

impl HostSnapshot {
    pub fn legacy_only(info: LegacyInfo) -> Self {
        Self {
            legacy: Some(info),
            modern: None,
        }
    }

    pub fn modern_only(modern: ModernSnapshot) -> Self {
        Self {
            legacy: None,
            modern: Some(modern),
        }
    }

    pub fn parse(content: &str, format: SnapshotFormat) -> Result<Self, SnapshotError> {
        let detected_format = match format {
            SnapshotFormat::Auto => Self::detect_format(content)?,
            format => format,
        };

        match detected_format {
            SnapshotFormat::Json => {
                serde_json::from_str(content).map_err(|e| SnapshotError::InvalidJson {
                    reason: e.to_string(),
                })
            }
            SnapshotFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| SnapshotError::InvalidYaml {
                    reason: e.to_string(),
                })
            }
            SnapshotFormat::Auto => unreachable!("Auto format should be resolved by now"),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read host snapshot {}", path.display()))?;

        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => SnapshotFormat::Json,
            Some("yaml") | Some("yml") => SnapshotFormat::Yaml,
            _ => SnapshotFormat::Auto,
        };

        let snapshot = Self::parse(&content, format)
            .with_context(|| format!("Failed to parse host snapshot {}", path.display()))?;
        Ok(snapshot)
    }

    fn detect_format(content: &str) -> Result<SnapshotFormat, SnapshotError> {
        let trimmed = content.trim();

        if trimmed.starts_with('{') {
            Ok(SnapshotFormat::Json)
        } else if trimmed.starts_with("---") {
            Ok(SnapshotFormat::Yaml)
        } else if serde_json::from_str::<serde_json::Value>(content).is_ok() {
            Ok(SnapshotFormat::Json)
        } else if serde_yaml::from_str::<serde_yaml::Value>(content).is_ok() {
            Ok(SnapshotFormat::Yaml)
        } else {
            Err(SnapshotError::UnknownFormat)
        }
    }

    fn modern(&self, api: &str) -> Result<&ModernSnapshot, HostApiError> {
        self.modern
            .as_ref()
            .ok_or_else(|| HostApiError::unavailable(api))
    }
}

impl HostEnvironment for HostSnapshot {
    fn legacy_info(&self) -> Result<LegacyInfo, HostApiError> {
        self.legacy
            .clone()
            .ok_or_else(|| HostApiError::unavailable("get_inf_structure"))
    }

    fn is_32bit_or_higher(&self) -> Result<bool, HostApiError> {
        Ok(self.modern("inf_is_32bit_or_higher")?.is_32bit_or_higher)
    }

    fn is_32bit_exactly(&self) -> Result<bool, HostApiError> {
        Ok(self.modern("inf_is_32bit_exactly")?.is_32bit_exactly)
    }

    fn processor_name(&self) -> Result<String, HostApiError> {
        Ok(self.modern("inf_get_procname")?.processor_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::detector::detect_with_fallback;
    use crate::types::{BitWidth, DetectionPathway};

    #[test]
    fn test_parse_json_and_yaml_agree() {
        let json = r#"{"legacy": {"is_64bit": false, "is_32bit": true, "proc_name": "ARM"}}"#;
        let yaml = "legacy:\n  is_32bit: true\n  proc_name: ARM\n";

        let from_json = HostSnapshot::parse(json, SnapshotFormat::Auto).unwrap();
        let from_yaml = HostSnapshot::parse(yaml, SnapshotFormat::Auto).unwrap();
        assert_eq!(from_json, from_yaml);
        assert!(from_json.modern.is_none());
    }

    #[test]
    fn test_parse_reports_format_specific_errors() {
        let err = HostSnapshot::parse("{not json", SnapshotFormat::Json).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidJson { .. }));

        let err = HostSnapshot::parse("legacy: [", SnapshotFormat::Yaml).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidYaml { .. }));
    }

    #[test]
    fn test_missing_legacy_section_falls_back() {
        let yaml = "---\nmodern:\n  is_32bit_or_higher: true\n  is_32bit_exactly: false\n  \
                    processor_name: mipsb\n";
        let snapshot = HostSnapshot::parse(yaml, SnapshotFormat::Auto).unwrap();

        let result = detect_with_fallback(&snapshot).unwrap();
        assert_eq!(result.pathway, DetectionPathway::Modern);
        assert_eq!(result.bit_width, BitWidth::Bits64);
        assert_eq!(result.architecture.as_str(), "mipsb");
    }

    #[test]
    fn test_modern_section_requires_exact_32bit_flag() {
        let yaml = "modern:\n  is_32bit_or_higher: true\n  processor_name: ARM\n";
        let err = HostSnapshot::parse(yaml, SnapshotFormat::Yaml).unwrap_err();
        match err {
            SnapshotError::InvalidYaml { reason } => assert!(reason.contains("is_32bit_exactly")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_snapshot_answers_unavailable() {
        let snapshot = HostSnapshot::default();
        assert_eq!(
            snapshot.processor_name().unwrap_err(),
            HostApiError::unavailable("inf_get_procname")
        );
    }
}
