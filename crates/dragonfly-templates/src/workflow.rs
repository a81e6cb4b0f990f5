//! Provisioning workflow template
//!
//! Renders the single-task workflow that streams an OS image to disk,
//! prepares the installed system (user, first-boot init script, cloud-init
//! datasource) and kexecs into it.
//!
//! Action order is part of the contract with the provisioning agent:
//! stream image, create user, write init script, write its unit, enable it,
//! write the two cloud-init files, kexec.

use crate::{engine, RenderError, Result, WorkflowDocument, DEFAULT_DEVICE_TEMPLATE_NAME};
use minijinja::context;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Template name used in engine diagnostics
const WORKFLOW_TEMPLATE_NAME: &str = "workflow";

/// Number of actions in the rendered workflow task
pub const WORKFLOW_ACTION_COUNT: usize = 8;

/// Fields substituted into the provisioning workflow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkflowTemplate {
    /// Workflow name, also used as the task name (required)
    pub name: String,

    /// Metadata service URL for the cloud-init Ec2 datasource
    #[serde(rename = "metadataURL")]
    pub metadata_url: String,

    /// URL of the disk image to stream (required)
    #[serde(rename = "imageURL")]
    pub image_url: String,

    /// Whole-disk target for the image write, e.g. "/dev/sda"
    pub dest_disk: String,

    /// Root partition used by every post-image action, e.g. "/dev/sda1"
    pub dest_partition: String,

    /// Worker the task runs on
    ///
    /// Left empty, the workflow targets `{{.device_1}}` and the hardware map
    /// of the workflow resource decides the device.
    pub device_template_name: String,
}

impl WorkflowTemplate {
    /// Create a template with the two required fields
    pub fn new(name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.into(),
            ..Default::default()
        }
    }

    /// Set the cloud-init metadata URL
    pub fn with_metadata_url(mut self, url: impl Into<String>) -> Self {
        self.metadata_url = url.into();
        self
    }

    /// Set the disk the image is written to
    pub fn with_dest_disk(mut self, disk: impl Into<String>) -> Self {
        self.dest_disk = disk.into();
        self
    }

    /// Set the partition holding the installed root filesystem
    pub fn with_dest_partition(mut self, partition: impl Into<String>) -> Self {
        self.dest_partition = partition.into();
        self
    }

    /// Set the worker the task is bound to
    pub fn with_device_template_name(mut self, name: impl Into<String>) -> Self {
        self.device_template_name = name.into();
        self
    }

    /// Check the required fields, name first
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(RenderError::MissingName);
        }

        if self.image_url.is_empty() {
            return Err(RenderError::MissingImageUrl);
        }

        Ok(())
    }

    /// Worker value that ends up in the rendered task
    pub fn effective_device_template_name(&self) -> &str {
        if self.device_template_name.is_empty() {
            DEFAULT_DEVICE_TEMPLATE_NAME
        } else {
            &self.device_template_name
        }
    }

    /// Render the workflow YAML
    ///
    /// Values are substituted verbatim; callers must keep them YAML-safe.
    /// The template itself is never modified, an empty device template name
    /// only changes the rendered worker.
    pub fn render(&self) -> Result<String> {
        self.validate()?;

        let worker = self.effective_device_template_name();
        if self.device_template_name.is_empty() {
            debug!(workflow = %self.name, worker, "No device template name, using placeholder");
        }

        engine::render(
            WORKFLOW_TEMPLATE_NAME,
            WORKFLOW_TEMPLATE,
            context! {
                name => &self.name,
                metadata_url => &self.metadata_url,
                image_url => &self.image_url,
                dest_disk => &self.dest_disk,
                dest_partition => &self.dest_partition,
                device_template_name => worker,
            },
        )
    }

    /// Render and read the result back as a typed document
    pub fn render_document(&self) -> Result<WorkflowDocument> {
        WorkflowDocument::from_yaml(&self.render()?)
    }
}

/// Workflow body consumed by the provisioning agents
pub const WORKFLOW_TEMPLATE: &str = r#"
version: "0.1"
name: {{ name }}
global_timeout: 6000
tasks:
  - name: "{{ name }}"
    worker: "{{ device_template_name }}"
    volumes:
      - /dev:/dev
      - /dev/console:/dev/console
      - /lib/firmware:/lib/firmware:ro
    actions:
      - name: "stream-image"
        image: quay.io/tinkerbell-actions/image2disk:v1.0.0
        timeout: 600
        environment:
          IMG_URL: {{ image_url }}
          DEST_DISK: {{ dest_disk }}
          COMPRESSED: true
      - name: "create-user"
        image: quay.io/tinkerbell-actions/cexec:v1.0.0
        timeout: 90
        environment:
          BLOCK_DEVICE: {{ dest_partition }}
          FS_TYPE: ext4
          CHROOT: y
          DEFAULT_INTERPRETER: "/bin/sh -c"
          CMD_LINE: "useradd -p $(openssl passwd -1 tink) -s /bin/bash -d /home/tink/ -m -G sudo tink"
      - name: "create-init-script"
        image: quay.io/tinkerbell-actions/writefile:v1.0.0
        timeout: 90
        environment:
            DEST_DISK: {{ dest_partition }}
            FS_TYPE: ext4
            DEST_PATH: /root/cluster-setup.sh
            UID: 0
            GID: 0
            MODE: 0700
            DIRMODE: 0700
            CONTENTS: |
              #!/bin/bash
              tdnf install -y apparmor-parser apparmor-utils
              iptables -I INPUT -p tcp --dport 6443 -j ACCEPT
              rm /root/cluster-setup.sh
      - name: "create-init-script-service"
        image: quay.io/tinkerbell-actions/writefile:v1.0.0
        timeout: 90
        environment:
            DEST_DISK: {{ dest_partition }}
            FS_TYPE: ext4
            DEST_PATH: /usr/local/lib/systemd/system/cluster-setup.service
            UID: 0
            GID: 0
            MODE: 0600
            DIRMODE: 0600
            CONTENTS: |
              [Unit]
              Before=systemd-user-sessions.service
              Wants=network-online.target
              After=network-online.target
              ConditionPathExists=/root/cluster-setup.sh
              [Service]
              Type=oneshot
              ExecStart=/root/cluster-setup.sh
              RemainAfterExit=yes
              [Install]
              WantedBy=multi-user.target
      - name: "enable-init-script"
        image: quay.io/tinkerbell-actions/cexec:v1.0.0
        timeout: 90
        environment:
            BLOCK_DEVICE: {{ dest_partition }}
            FS_TYPE: ext4
            CHROOT: y
            DEFAULT_INTERPRETER: "/bin/sh -c"
            CMD_LINE: "systemctl enable cluster-setup.service"
      - name: "add-tink-cloud-init-config"
        image: quay.io/tinkerbell-actions/writefile:v1.0.0
        timeout: 90
        environment:
          DEST_DISK: {{ dest_partition }}
          FS_TYPE: ext4
          DEST_PATH: /etc/cloud/cloud.cfg.d/10_tinkerbell.cfg
          UID: 0
          GID: 0
          MODE: 0600
          DIRMODE: 0700
          CONTENTS: |
            datasource:
              Ec2:
                metadata_urls: ["{{ metadata_url }}"]
                strict_id: false
            system_info:
              default_user:
                name: tink
                groups: [wheel, adm]
                sudo: ["ALL=(ALL) NOPASSWD:ALL"]
                shell: /bin/bash
            manage_etc_hosts: localhost
            warnings:
              dsid_missing_source: off
      - name: "add-tink-cloud-init-ds-config"
        image: quay.io/tinkerbell-actions/writefile:v1.0.0
        timeout: 90
        environment:
          DEST_DISK: {{ dest_partition }}
          FS_TYPE: ext4
          DEST_PATH: /etc/cloud/ds-identify.cfg
          UID: 0
          GID: 0
          MODE: 0600
          DIRMODE: 0700
          CONTENTS: |
            datasource: Ec2
      - name: "kexec-image"
        image: quay.io/tinkerbell-actions/kexec:v1.0.0
        timeout: 90
        pid: host
        environment:
          BLOCK_DEVICE: {{ dest_partition }}
          FS_TYPE: ext4
          KERNEL_PATH: /boot/vmlinuz-5.15.86.1-1.cm2
          INITRD_PATH: /boot/initrd.img-5.15.86.1-1.cm2
          CMD_LINE: "root={{ dest_partition }} rw"
"#;
