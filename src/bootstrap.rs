// eglboot/src/bootstrap.rs
//
//! The EGL bootstrap sequence.

use crate::config::{BootstrapConfig, CheckMode};
use crate::driver::{Driver, InitializedDisplay};
use crate::egl;
use crate::egl::types::EGLint;
use crate::info::EGLVersion;
use crate::{Error, WindowingApiError};

use log::{debug, log_enabled, warn, Level};
use std::io::Write;
use std::ptr;

/// How a bootstrap run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The whole sequence ran and the display was terminated.
    Completed {
        /// The version reported by `eglInitialize()`, or 0.0 if it failed.
        version: EGLVersion,
    },
    /// The default display could not be obtained. Nothing else was attempted.
    NoDisplay,
}

impl Outcome {
    /// The process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match *self {
            Outcome::Completed { .. } => 0,
            Outcome::NoDisplay => 1,
        }
    }
}

/// Runs the bootstrap sequence against `driver`, writing diagnostics to `out`.
///
/// In [`CheckMode::Permissive`] failing calls are logged and the sequence continues with a null
/// handle; only a missing display ends it early. In [`CheckMode::Strict`] the first failure is
/// returned. Either way the display is terminated exactly once if it was obtained.
pub fn run<D>(driver: &mut D, config: &BootstrapConfig, out: &mut dyn Write) -> Result<Outcome, Error>
where
    D: Driver + ?Sized,
{
    // 1. Get the default display.
    let egl_display = match driver.default_display() {
        Some(egl_display) => egl_display,
        None => {
            writeln!(out, "Failed to get display")?;
            return Ok(Outcome::NoDisplay);
        }
    };
    let mut display = InitializedDisplay::new(driver, egl_display);
    let mode = config.check_mode;

    // 2. Initialize it.
    let version = display.driver().initialize(egl_display);
    let version = check(version, mode, "eglInitialize", Error::InitializationFailed)?;
    let version = version.unwrap_or_default();
    debug!("initialized EGL {}", version);
    writeln!(out, "Version {}.{}", version.major, version.minor)?;

    // 3. Select a configuration.
    let config_attributes = config.config_attributes.to_egl_attributes();
    let egl_config = display.driver().choose_config(egl_display, &config_attributes);
    let egl_config = match check(egl_config, mode, "eglChooseConfig", Error::PixelFormatSelectionFailed)? {
        Some(Some(egl_config)) => egl_config,
        Some(None) if mode == CheckMode::Strict => return Err(Error::NoPixelFormatFound),
        Some(None) | None => {
            warn!("no EGL config matched {:?}", config.config_attributes);
            ptr::null()
        }
    };
    if !egl_config.is_null() && log_enabled!(Level::Debug) {
        let config_id =
            display.driver().config_attrib(egl_display, egl_config, egl::CONFIG_ID as EGLint);
        if let Ok(config_id) = config_id {
            debug!("chose EGL config {}", config_id);
        }
    }

    // 4. Create the pbuffer surface.
    let pbuffer_attributes = config.pbuffer_attributes.to_egl_attributes();
    let egl_surface =
        display.driver().create_pbuffer_surface(egl_display, egl_config, &pbuffer_attributes);
    let egl_surface =
        check(egl_surface, mode, "eglCreatePbufferSurface", Error::SurfaceCreationFailed)?
            .unwrap_or(egl::NO_SURFACE);
    debug!("created {:?} pbuffer surface", config.pbuffer_attributes.size);

    // 5. Bind the client API.
    let bound = display.driver().bind_api(config.api);
    check(bound, mode, "eglBindAPI", Error::ApiBindingFailed)?;
    debug!("bound {:?} API", config.api);

    // 6. Create a context and make it current.
    let egl_context = display.driver().create_context(egl_display, egl_config, egl::NO_CONTEXT, &[]);
    let egl_context = check(egl_context, mode, "eglCreateContext", Error::ContextCreationFailed)?
        .unwrap_or(egl::NO_CONTEXT);

    let made_current =
        display.driver().make_current(egl_display, egl_surface, egl_surface, egl_context);
    check(made_current, mode, "eglMakeCurrent", Error::MakeCurrentFailed)?;
    debug!("context is current");

    // 7. Terminate.
    let terminated = display.terminate();
    check(terminated, mode, "eglTerminate", Error::TerminationFailed)?;

    writeln!(out)?;
    writeln!(out, "!!! DONE !!!")?;

    Ok(Outcome::Completed { version })
}

// Returns `Ok(None)` for a failure that permissive mode lets through.
fn check<T>(
    result: Result<T, WindowingApiError>,
    mode: CheckMode,
    command: &str,
    to_error: fn(WindowingApiError) -> Error,
) -> Result<Option<T>, Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if mode == CheckMode::Strict => Err(to_error(err)),
        Err(err) => {
            warn!("{} failed with {:?}; continuing", command, err);
            Ok(None)
        }
    }
}
