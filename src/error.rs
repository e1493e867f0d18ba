//! Error types for Flowcraft.
//!
//! All errors in Flowcraft are represented by the `FlowcraftError` enum,
//! which provides specific variants for different error categories.

use std::{io::ErrorKind, string::FromUtf8Error};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Flowcraft operations.
///
/// Each variant represents a specific category of error that can occur
/// while authoring, inspecting, or persisting an automation graph.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum FlowcraftError {
    /// A module id is not registered in the catalog.
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    /// A node id is absent from the graph.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// An edge id is absent from the graph.
    #[error("edge not found: {0}")]
    EdgeNotFound(String),

    /// An automation id is absent from the store.
    #[error("automation not found: {0}")]
    AutomationNotFound(String),

    /// Malformed module snapshot or drag payload.
    #[error("{0}")]
    InvalidModule(String),

    /// An operation that violates a graph invariant.
    #[error("{0}")]
    InvalidOperation(String),

    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON, TOML, etc.).
    #[error("{0}")]
    Convert(String),

    /// Storage operation errors.
    #[error("{0}")]
    Store(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<FlowcraftError> for String {
    fn from(val: FlowcraftError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for FlowcraftError {
    fn from(error: std::io::Error) -> Self {
        FlowcraftError::IoError(error.to_string())
    }
}

impl From<FlowcraftError> for std::io::Error {
    fn from(val: FlowcraftError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<FromUtf8Error> for FlowcraftError {
    fn from(_: FromUtf8Error) -> Self {
        FlowcraftError::Convert("Error with utf-8 string convert".to_string())
    }
}

impl From<serde_json::Error> for FlowcraftError {
    fn from(error: serde_json::Error) -> Self {
        FlowcraftError::Convert(error.to_string())
    }
}
