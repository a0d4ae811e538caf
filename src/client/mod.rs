//! Browser-side half of the SSR/hydration handshake.
//!
//! Models the client bootstrap: a page-lifetime query cache seeded from the
//! server-embedded initial-data blob, per-route query functions with
//! retry/backoff, and a render boundary that replaces failures with a
//! fallback panel. The cache is an explicitly constructed object handed to
//! consumers, never ambient global state.

pub mod bootstrap;
pub mod boundary;
pub mod cache;
pub mod queries;
