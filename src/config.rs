// eglboot/src/config.rs
//
//! Settings of the bootstrap sequence.

use crate::attributes::{ConfigAttributes, PbufferAttributes};
use crate::info::ClientApi;

use euclid::default::Size2D;

const PBUFFER_WIDTH: i32 = 9;
const PBUFFER_HEIGHT: i32 = 9;

/// How the bootstrap reacts to a failing EGL call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CheckMode {
    /// Log the failure and carry on with whatever handle the call produced.
    #[default]
    Permissive,
    /// Stop at the first failure and return it.
    Strict,
}

/// Everything the bootstrap sequence asks of the driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BootstrapConfig {
    pub config_attributes: ConfigAttributes,
    pub pbuffer_attributes: PbufferAttributes,
    pub api: ClientApi,
    pub check_mode: CheckMode,
}

impl Default for BootstrapConfig {
    fn default() -> BootstrapConfig {
        BootstrapConfig {
            config_attributes: ConfigAttributes::default(),
            pbuffer_attributes: PbufferAttributes::new(Size2D::new(PBUFFER_WIDTH, PBUFFER_HEIGHT)),
            api: ClientApi::GL,
            check_mode: CheckMode::Permissive,
        }
    }
}

impl BootstrapConfig {
    /// The default configuration with strict checking.
    pub fn strict() -> BootstrapConfig {
        BootstrapConfig { check_mode: CheckMode::Strict, ..BootstrapConfig::default() }
    }
}
