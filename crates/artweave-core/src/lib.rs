//! ArtWeave Core Types and Definitions
//!
//! This crate provides the foundational types for ArtWeave comparison
//! diagrams. It includes:
//!
//! - **Diagram model**: Canonical nodes, edges and payloads ([`diagram`] module)
//! - **Anchors**: The two artworks being compared ([`anchor`] module)
//! - **Categories**: Node classification and the palette table ([`category`] module)
//! - **Labels**: Label truncation and wrapping rules ([`label`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)

pub mod anchor;
pub mod category;
pub mod color;
pub mod diagram;
pub mod geometry;
pub mod label;
