//! Locates the local language server, recovers the port and CSRF token it
//! was launched with, and confirms which port serves its API.
//!
//! # Flow
//!
//! 1. [`ProcessInspector::list_processes`] runs the native listing tool.
//! 2. [`ProcessInspector::extract`] pulls pid, port and token out of the text.
//! 3. [`ProcessInspector::listening_ports`] lists candidate TCP ports.
//! 4. [`PortValidator::validate`] probes candidates in order; the first
//!    success becomes the resolved port, otherwise the declared port is kept.
//!
//! [`Discovery`] runs the whole pass:
//!
//! ```ignore
//! use agcheck::{Discovery, DiscoveryConfig};
//!
//! let descriptor = Discovery::for_platform(&DiscoveryConfig::default()).discover()?;
//! println!("port {} token {}", descriptor.resolved_port(), descriptor.security_token());
//! ```

pub mod config;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod inspector;
pub mod ports;
pub mod probe;
mod tool;

pub use config::{DEFAULT_PROBE_HOST, DEFAULT_PROBE_TIMEOUT, DEFAULT_PROCESS_SIGNATURE, DiscoveryConfig};
pub use descriptor::{ConnectionDescriptor, PortOrigin, TokenSource};
pub use discovery::{Discovery, resolve_port};
pub use error::{Error, Result};
pub use inspector::{ProcessInspector, UnixInspector, WindowsInspector, platform_inspector};
pub use probe::{HttpsProbe, PortValidator};
