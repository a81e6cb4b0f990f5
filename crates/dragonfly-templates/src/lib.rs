//! Dragonfly Provisioning Templates
//!
//! Renders the two YAML documents the cluster provisioning controller hands
//! to the bare metal stack.
//!
//! # Documents
//!
//! - `WorkflowTemplate` - Provisioning workflow (image, user, init script,
//!   cloud-init, kexec) for a single machine
//! - `HardwareProvisionTasks` - BMC job steps (power off, one-time PXE boot,
//!   power on)
//!
//! Both bodies are fixed; only the fields of the value objects are
//! substituted. The rendered text can be read back into typed views
//! (`WorkflowDocument`, `BmcTask`) for inspection.
//!
//! # Credit
//!
//! Document layouts follow Tinkerbell (tinkerbell.org) workflows and Rufio
//! BMC jobs.

pub mod bmc;
pub mod document;
pub mod error;
pub mod hardware;
pub mod workflow;

mod engine;

pub use bmc::*;
pub use document::*;
pub use error::*;
pub use hardware::*;
pub use workflow::*;

/// Worker placeholder left for the downstream templating pass
///
/// Substituted when a `WorkflowTemplate` has no device template name. It is
/// emitted as literal text and resolved later against the workflow's
/// hardware map.
pub const DEFAULT_DEVICE_TEMPLATE_NAME: &str = "{{.device_1}}";
