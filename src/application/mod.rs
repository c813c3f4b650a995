// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports and orchestration seams.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The workflow controller only talks to collaborators through these ports
//!
//! # Example
//!
//! ```ignore
//! use map_capture::application::port::GeocodeResolver;
//!
//! // Infrastructure implements the port trait
//! struct FixedResolver;
//! #[async_trait::async_trait]
//! impl GeocodeResolver for FixedResolver { /* ... */ }
//! ```

pub mod port;
