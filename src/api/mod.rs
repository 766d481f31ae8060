//! BuyEuropean backend integration
//!
//! This module provides everything needed to talk to the remote services:
//! - **Client** - `AnalysisClient` with `analyze` and feedback submission
//! - **Headers** - Fixed browser-emulation header set and user agent
//! - **Geolocation** - Best-effort IP geolocation with placeholder fallback
//! - **Transport** - Async HTTP seam, `reqwest`-backed in production

pub mod client;
pub mod geolocation;
pub mod headers;
pub mod transport;

// Re-export main types
pub use client::{AnalysisClient, AnalysisRequest};
pub use geolocation::{locate, parse_location};
pub use headers::{build_headers, header_pairs, BrowserIdentity};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
