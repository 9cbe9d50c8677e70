//! Test doubles shared by unit and integration tests
//!
//! Compiled only for tests or with the `test-utils` feature.
//!
//! - [`StubTransport`]: scripted HTTP replies per URI with call recording
//! - [`InMemoryDriver`]: TTL-aware cache driver on the tokio clock
//! - [`StubConnector`]: driver candidates that connect, fail, or report unhealthy

pub mod memory_driver;
pub mod stub_transport;

pub use memory_driver::{InMemoryDriver, StubConnector};
pub use stub_transport::{StubReply, StubTransport, STUB_BASE_URL};
