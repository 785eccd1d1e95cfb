// SPDX-FileCopyrightText: 2026 Copydeck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation service trait: the opaque AI text producer.

use async_trait::async_trait;

use crate::error::CopydeckError;
use crate::types::{CopyVersion, GenerationRequest};

/// An external service that turns a structured request into raw copy text.
///
/// The returned [`CopyVersion`] output is unconstrained (JSON, numbered
/// lists, or free prose) and is structured downstream by the option parser.
#[async_trait]
pub trait GenerationService: Send + Sync + 'static {
    /// Produces a new copy version for the given request.
    async fn generate(&self, request: &GenerationRequest) -> Result<CopyVersion, CopydeckError>;
}
