//! Position provider trait

use crate::core::PositionOptions;
use crate::platform::{PlatformResult, RawFix};
use async_trait::async_trait;

/// Host facility able to produce one position reading on request
///
/// Implementations perform a single attempt per call. They may suspend for
/// as long as the platform needs (a permission prompt is user-paced); the
/// caller enforces `options.timeout_ms`.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    /// Request one reading honouring `options`
    async fn current_position(&self, options: &PositionOptions) -> PlatformResult<RawFix>;

    /// Short name for logs
    fn name(&self) -> &str;
}
