//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Error types and result aliases for transcoding operations.
//!
//! Malformed escape sequences and unrecognized SGR parameters are not errors:
//! they are dropped silently. The variants here cover the failures that abort
//! the current run or the whole document.

use crate::session::Phase;

/// Result type for transcoding operations
pub type TranscodeResult<T> = Result<T, TranscodeError>;

/// Errors that can occur while converting a document
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    /// An I/O error occurred while reading input or writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The output buffer for a run could not be allocated
    ///
    /// The run is aborted and none of its output is returned.
    #[error("Failed to reserve {requested} bytes of output")]
    Allocation {
        /// Number of bytes the measurement pass asked for
        requested: usize,
    },

    /// A markup writer reported a formatting failure
    #[error("Markup formatting failed")]
    Format(#[from] std::fmt::Error),

    /// A session operation was called out of order
    #[error("Cannot {operation} while the document is {phase}")]
    InvalidPhase {
        /// The operation that was attempted
        operation: &'static str,
        /// The phase the session was in
        phase: Phase,
    },

    /// A dialect name was not recognized
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),
}

impl TranscodeError {
    /// Check if the error was caused by misuse of the API rather than by the
    /// input or the environment
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            TranscodeError::InvalidPhase { .. } | TranscodeError::UnknownDialect(_)
        )
    }
}
