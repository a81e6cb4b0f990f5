//! Typed view of rendered BMC tasks
//!
//! Each task carries exactly one action, the YAML key naming which.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Power action requested from the BMC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    /// Power on
    On,
    /// Power off
    Off,
}

impl std::fmt::Display for PowerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerAction::On => write!(f, "on"),
            PowerAction::Off => write!(f, "off"),
        }
    }
}

/// Boot device selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BootDevice {
    /// Boot from network (PXE)
    Pxe,
}

impl std::fmt::Display for BootDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootDevice::Pxe => write!(f, "pxe"),
        }
    }
}

/// Next-boot device override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeBootDeviceAction {
    /// Devices to boot from, in order
    pub device: Vec<BootDevice>,

    /// Boot the device in EFI mode
    #[serde(default)]
    pub efi_boot: bool,
}

/// One step of a BMC job
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmcTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_action: Option<PowerAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_boot_device_action: Option<OneTimeBootDeviceAction>,
}

impl BmcTask {
    /// Task that changes the power state
    pub fn power(action: PowerAction) -> Self {
        Self {
            power_action: Some(action),
            ..Default::default()
        }
    }

    /// Task that sets the next boot device
    pub fn one_time_boot(device: BootDevice, efi_boot: bool) -> Self {
        Self {
            one_time_boot_device_action: Some(OneTimeBootDeviceAction {
                device: vec![device],
                efi_boot,
            }),
            ..Default::default()
        }
    }
}

/// Parse a rendered task list
pub fn parse_tasks(yaml: &str) -> Result<Vec<BmcTask>> {
    Ok(serde_yaml::from_str(yaml)?)
}
