//! Platform process inspection behind one capability.
//!
//! [`ProcessInspector`] bundles the three OS-dependent steps of discovery.
//! [`platform_inspector`] picks the variant once; callers never branch on
//! the target OS themselves.

mod unix;
mod windows;

pub use unix::UnixInspector;
pub use windows::WindowsInspector;

use crate::config::DiscoveryConfig;
use crate::descriptor::ConnectionDescriptor;
use crate::error::Result;

pub trait ProcessInspector {
	/// Short name used in logs (`"unix"`, `"windows"`).
	fn name(&self) -> &'static str;

	/// Raw process listing text from the native tool.
	fn list_processes(&self) -> Result<String>;

	/// Connection facts from [`list_processes`](Self::list_processes) output.
	fn extract(&self, raw: &str) -> Result<ConnectionDescriptor>;

	/// TCP ports `pid` listens on, in tool order. Empty when there are none.
	fn listening_ports(&self, pid: u32) -> Result<Vec<u16>>;
}

/// Inspector for the OS this binary was built for.
pub fn platform_inspector(config: &DiscoveryConfig) -> Box<dyn ProcessInspector> {
	if cfg!(target_os = "windows") {
		Box::new(WindowsInspector::new(config.process_signature.clone()))
	} else {
		Box::new(UnixInspector::new(config.process_signature.clone()))
	}
}
