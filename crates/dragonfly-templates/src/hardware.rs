//! Hardware provision task template
//!
//! Renders the BMC job that puts a machine into the provisioning stack:
//! power off, PXE once, power on. The boot device can only be changed while
//! the machine is off, so the order is fixed.

use crate::{bmc, engine, BmcTask, Result};
use minijinja::context;
use serde::{Deserialize, Serialize};

/// Template name used in engine diagnostics
const HARDWARE_TEMPLATE_NAME: &str = "hardware-provision-tasks";

/// Fields substituted into the BMC task list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HardwareProvisionTasks {
    /// PXE boot in EFI mode
    pub efi_boot: bool,
}

impl HardwareProvisionTasks {
    pub fn new(efi_boot: bool) -> Self {
        Self { efi_boot }
    }

    /// Render the task list YAML
    ///
    /// The flag goes in as text: the engine prints booleans as `True`/`False`
    /// while the job runner contract spells them `true`/`false`.
    pub fn render(&self) -> Result<String> {
        engine::render(
            HARDWARE_TEMPLATE_NAME,
            HARDWARE_PROVISION_TASKS_TEMPLATE,
            context! { efi_boot => self.efi_boot.to_string() },
        )
    }

    /// Render and read the result back as typed tasks
    pub fn render_tasks(&self) -> Result<Vec<BmcTask>> {
        bmc::parse_tasks(&self.render()?)
    }
}

/// Task list body consumed by the BMC job runner
pub const HARDWARE_PROVISION_TASKS_TEMPLATE: &str = r#"
- powerAction: "off"
- oneTimeBootDeviceAction:
    device:
    - pxe
    efiBoot: {{ efi_boot }}
- powerAction: "on"
"#;
