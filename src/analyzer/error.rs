use crate::host::DetectionError;
use crate::types::{ArchitectureKey, BitWidth};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Analyzer already registered for processor {architecture}")]
    AlreadyRegistered { architecture: ArchitectureKey },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactoryError {
    #[error("Processor {architecture} is NOT supported yet ({bit_width}bit)")]
    UnsupportedArchitecture {
        architecture: ArchitectureKey,
        bit_width: BitWidth,
    },

    #[error(transparent)]
    Detection(#[from] DetectionError),
}
