//! Unified error surfaced by use cases.

use thiserror::Error;

use crate::application::ports::ProcessorError;
use crate::domain::cart::CartError;
use crate::domain::catalog::CatalogError;
use crate::domain::ordering::OrderError;
use crate::domain::payment::PaymentError;

/// Any business-rule violation a use case can surface.
///
/// Wraps the typed context errors unchanged; the HTTP boundary maps each
/// class to its status code.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Catalog or inventory failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Cart failure.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Order lifecycle failure.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Payment lifecycle failure.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Processor decline, outage, or timeout.
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}
