//! # Etiqueta
//!
//! Freight label generator for Brazilian road transport: mines CT-e
//! (freight manifest) and NF-e (fiscal invoice) XML documents for shipment
//! fields and renders one printable PDF label per parcel.
//!
//! ## Core pieces
//!
//! - **Extraction**: namespace-agnostic field mining over a light XML tree
//!   ([`extractor`]), tolerant of schema-version differences; manifest
//!   fields win, invoice fields fill the gaps.
//! - **Responsive layout**: font sizes, truncation budgets and field
//!   visibility derive purely from the label's physical area ([`style`]).
//! - **Rendering**: one page per volume through a pluggable page-emitter
//!   capability ([`render`], [`emitter`]); a minimal built-in PDF emitter
//!   ships with the crate.
//!
//! ## Quick start
//!
//! ```
//! use etiqueta::{api, LabelRequest};
//!
//! let request = LabelRequest {
//!     origin: "Campinas - SP".to_string(),
//!     destination: "Recife - PE".to_string(),
//!     recipient: "Comercio Beta SA".to_string(),
//!     manifest: "123456".to_string(),
//!     total_volumes: 3,
//!     ..Default::default()
//! };
//! let pdf = api::generate(&request).unwrap();
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```
//!
//! Requests can instead carry a raw CT-e/NF-e document in `xml`; see
//! [`extractor::extract`].
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license, at
//! your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Shipment data model and request surface
pub mod shipment;

// CT-e / NF-e field extraction
pub mod extractor;

// Area-keyed style resolution
pub mod style;

// Page rendering
pub mod render;

// Page emission (capability trait + built-in PDF emitter)
pub mod emitter;

// High-level API
pub mod api;

// Re-exports
pub use emitter::pdf::PdfEmitter;
pub use emitter::PageEmitter;
pub use error::{Error, Result};
pub use shipment::{LabelDimensions, LabelRequest, ShipmentRecord};
pub use style::StyleProfile;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "etiqueta");
    }
}
