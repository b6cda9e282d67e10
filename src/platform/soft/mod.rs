// eglboot/src/platform/soft/mod.rs
//
//! An in-process software EGL implementation.
//!
//! The driver keeps every display, surface, and context in plain Rust collections and follows
//! the EGL 1.5 validation rules for the entry points the bootstrap uses.
//! Pbuffer storage is allocated but never read or written: there is no client API behind the
//! contexts.

use crate::attributes::{attribute_pairs, SurfaceTypeFlags};
use crate::driver::Driver;
use crate::egl;
use crate::egl::types::{EGLConfig, EGLContext, EGLDisplay, EGLSurface, EGLenum, EGLint};
use crate::info::{ClientApi, EGLVersion};
use crate::WindowingApiError;

use euclid::default::Size2D;
use std::collections::HashMap;
use std::os::raw::c_void;

mod config;
pub use self::config::SoftConfig;

mod debug;
pub use self::debug::{DebugCallback, DebugMessage, DebugMessageKind, DebugMessageKinds};
use self::debug::DebugState;

const BYTES_PER_PIXEL: usize = 4;

/// An entry point invoked on a [`SoftDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    GetDisplay,
    Initialize,
    ChooseConfig,
    GetConfigAttrib,
    CreatePbufferSurface,
    BindAPI(ClientApi),
    CreateContext,
    MakeCurrent,
    Terminate,
}

#[derive(Debug)]
struct SoftDisplay {
    initialized: bool,
}

#[derive(Debug)]
struct SoftSurface {
    egl_display: EGLDisplay,
    config_index: usize,
    size: Size2D<i32>,
    pixels: Vec<u8>,
}

#[derive(Debug)]
struct SoftContext {
    egl_display: EGLDisplay,
    config_index: usize,
    api: ClientApi,
}

/// The display, surfaces, and context bound by `eglMakeCurrent()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurrentBinding {
    pub egl_display: EGLDisplay,
    pub draw: EGLSurface,
    pub read: EGLSurface,
    pub egl_context: EGLContext,
}

/// A software EGL driver.
#[derive(Debug)]
pub struct SoftDriver {
    default_display_available: bool,
    version: EGLVersion,
    configs: Vec<SoftConfig>,
    default_display: Option<EGLDisplay>,
    displays: HashMap<usize, SoftDisplay>,
    surfaces: HashMap<usize, SoftSurface>,
    contexts: HashMap<usize, SoftContext>,
    next_handle: usize,
    bound_api: ClientApi,
    current: Option<CurrentBinding>,
    last_error: EGLint,
    debug: DebugState,
    calls: Vec<Call>,
}

impl Default for SoftDriver {
    fn default() -> SoftDriver {
        SoftDriver::new()
    }
}

impl SoftDriver {
    /// A driver reporting EGL 1.0 with the default config table.
    pub fn new() -> SoftDriver {
        SoftDriver {
            default_display_available: true,
            version: EGLVersion::new(1, 0),
            configs: SoftConfig::defaults(),
            default_display: None,
            displays: HashMap::new(),
            surfaces: HashMap::new(),
            contexts: HashMap::new(),
            next_handle: 1,
            bound_api: ClientApi::GLES,
            current: None,
            last_error: egl::SUCCESS as EGLint,
            debug: DebugState::new(),
            calls: vec![],
        }
    }

    /// A driver whose default display lookup returns `EGL_NO_DISPLAY`.
    pub fn without_default_display() -> SoftDriver {
        SoftDriver { default_display_available: false, ..SoftDriver::new() }
    }

    /// Changes the version `eglInitialize()` reports.
    pub fn with_version(mut self, major: EGLint, minor: EGLint) -> SoftDriver {
        self.version = EGLVersion::new(major, minor);
        self
    }

    /// Replaces the config table.
    pub fn with_configs(mut self, configs: Vec<SoftConfig>) -> SoftDriver {
        self.configs = configs;
        self
    }

    /// `eglGetError()`: returns the error of the last call and resets it to `EGL_SUCCESS`.
    pub fn get_error(&mut self) -> EGLint {
        let last_error = self.last_error;
        self.last_error = egl::SUCCESS as EGLint;
        last_error
    }

    /// Installs (or, with `None`, removes) the debug message callback.
    pub fn set_debug_callback(&mut self, callback: Option<DebugCallback>) {
        self.debug.set_callback(callback);
    }

    /// Chooses which message kinds reach the debug callback.
    pub fn set_enabled_debug_messages(&mut self, enabled: DebugMessageKinds) {
        self.debug.set_enabled(enabled);
    }

    /// Every entry point invoked so far, in order.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// The number of times `entry_point` was invoked.
    pub fn call_count(&self, entry_point: Call) -> usize {
        self.calls.iter().filter(|&&call| call == entry_point).count()
    }

    pub fn is_initialized(&self, egl_display: EGLDisplay) -> bool {
        self.displays.get(&handle_id(egl_display)).map_or(false, |display| display.initialized)
    }

    pub fn live_surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn live_context_count(&self) -> usize {
        self.contexts.len()
    }

    pub fn bound_api(&self) -> ClientApi {
        self.bound_api
    }

    pub fn current(&self) -> Option<CurrentBinding> {
        self.current
    }

    /// The backing store of a live pbuffer.
    pub fn surface_pixels(&self, egl_surface: EGLSurface) -> Option<&[u8]> {
        self.surfaces.get(&handle_id(egl_surface)).map(|surface| &surface.pixels[..])
    }

    pub fn surface_size(&self, egl_surface: EGLSurface) -> Option<Size2D<i32>> {
        self.surfaces.get(&handle_id(egl_surface)).map(|surface| surface.size)
    }

    fn allocate_handle(&mut self) -> *const c_void {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle as *const c_void
    }

    fn check_display(&self, egl_display: EGLDisplay) -> Result<(), WindowingApiError> {
        match self.displays.get(&handle_id(egl_display)) {
            None => Err(WindowingApiError::BadDisplay),
            Some(display) if !display.initialized => Err(WindowingApiError::NotInitialized),
            Some(_) => Ok(()),
        }
    }

    fn config_index(&self, egl_config: EGLConfig) -> Result<usize, WindowingApiError> {
        let index = handle_id(egl_config).wrapping_sub(1);
        if index < self.configs.len() {
            Ok(index)
        } else {
            Err(WindowingApiError::BadConfig)
        }
    }

    fn surface_config(
        &self,
        egl_display: EGLDisplay,
        egl_surface: EGLSurface,
    ) -> Result<usize, WindowingApiError> {
        match self.surfaces.get(&handle_id(egl_surface)) {
            Some(surface) if surface.egl_display == egl_display => Ok(surface.config_index),
            _ => Err(WindowingApiError::BadSurface),
        }
    }

    // Records the outcome of an entry point in the error state and the debug stream.
    fn finish<T>(
        &mut self,
        command: &'static str,
        result: Result<T, WindowingApiError>,
    ) -> Result<T, WindowingApiError> {
        match result {
            Ok(_) => self.last_error = egl::SUCCESS as EGLint,
            Err(err) => {
                let kind = match err {
                    WindowingApiError::BadAlloc | WindowingApiError::ContextLost => {
                        DebugMessageKind::Critical
                    }
                    _ => DebugMessageKind::Error,
                };
                self.last_error = err.to_egl_error();
                self.debug.post(self.last_error,
                                command,
                                kind,
                                format!("{} failed with {:?}", command, err));
            }
        }
        result
    }

    fn info(&mut self, command: &'static str, message: String) {
        self.debug.post(egl::SUCCESS as EGLint, command, DebugMessageKind::Info, message);
    }

    fn initialize_display(&mut self, egl_display: EGLDisplay) -> Result<EGLVersion, WindowingApiError> {
        let display = self
            .displays
            .get_mut(&handle_id(egl_display))
            .ok_or(WindowingApiError::BadDisplay)?;
        display.initialized = true;
        Ok(self.version)
    }

    fn choose_first_config(
        &self,
        egl_display: EGLDisplay,
        attributes: &[EGLint],
    ) -> Result<Option<EGLConfig>, WindowingApiError> {
        self.check_display(egl_display)?;
        for (index, config) in self.configs.iter().enumerate() {
            if config.matches(attributes)? {
                return Ok(Some((index + 1) as EGLConfig));
            }
        }
        Ok(None)
    }

    fn get_config_attrib(
        &self,
        egl_display: EGLDisplay,
        egl_config: EGLConfig,
        attribute: EGLint,
    ) -> Result<EGLint, WindowingApiError> {
        self.check_display(egl_display)?;
        let index = self.config_index(egl_config)?;
        self.configs[index].attrib(attribute).ok_or(WindowingApiError::BadAttribute)
    }

    fn create_pbuffer(
        &mut self,
        egl_display: EGLDisplay,
        egl_config: EGLConfig,
        attributes: &[EGLint],
    ) -> Result<EGLSurface, WindowingApiError> {
        self.check_display(egl_display)?;
        let config_index = self.config_index(egl_config)?;
        if !self.configs[config_index].surface_type.contains(SurfaceTypeFlags::PBUFFER) {
            return Err(WindowingApiError::BadMatch);
        }

        let mut size = Size2D::new(0, 0);
        let mut largest = false;
        for (name, value) in attribute_pairs(attributes) {
            match name as EGLenum {
                egl::WIDTH => size.width = value,
                egl::HEIGHT => size.height = value,
                egl::LARGEST_PBUFFER => largest = value != egl::FALSE as EGLint,
                _ => return Err(WindowingApiError::BadAttribute),
            }
        }
        if size.width < 0 || size.height < 0 {
            return Err(WindowingApiError::BadParameter);
        }

        let config = &self.configs[config_index];
        let max_size = Size2D::new(config.max_pbuffer_width, config.max_pbuffer_height);
        if largest {
            size = Size2D::new(size.width.min(max_size.width), size.height.min(max_size.height));
        } else if size.width > max_size.width || size.height > max_size.height {
            return Err(WindowingApiError::BadParameter);
        }

        let byte_count = (size.width as usize)
            .checked_mul(size.height as usize)
            .and_then(|pixel_count| pixel_count.checked_mul(BYTES_PER_PIXEL))
            .ok_or(WindowingApiError::BadAlloc)?;
        let mut pixels = vec![];
        pixels.try_reserve_exact(byte_count).map_err(|_| WindowingApiError::BadAlloc)?;
        pixels.resize(byte_count, 0);
        let egl_surface = self.allocate_handle();
        self.surfaces.insert(handle_id(egl_surface),
                             SoftSurface { egl_display, config_index, size, pixels });
        Ok(egl_surface)
    }

    fn create_soft_context(
        &mut self,
        egl_display: EGLDisplay,
        egl_config: EGLConfig,
        share_context: EGLContext,
        attributes: &[EGLint],
    ) -> Result<EGLContext, WindowingApiError> {
        self.check_display(egl_display)?;
        let config_index = self.config_index(egl_config)?;
        let api = self.bound_api;
        if !self.configs[config_index].renderable_type.intersects(api.renderable_type()) {
            return Err(WindowingApiError::BadConfig);
        }

        if share_context != egl::NO_CONTEXT {
            match self.contexts.get(&handle_id(share_context)) {
                Some(shared) if shared.egl_display == egl_display && shared.api == api => {}
                Some(_) => return Err(WindowingApiError::BadMatch),
                None => return Err(WindowingApiError::BadContext),
            }
        }

        for (name, _) in attribute_pairs(attributes) {
            match name as EGLenum {
                egl::CONTEXT_MAJOR_VERSION
                | egl::CONTEXT_MINOR_VERSION
                | egl::CONTEXT_OPENGL_PROFILE_MASK
                | egl::CONTEXT_OPENGL_DEBUG => {}
                _ => return Err(WindowingApiError::BadAttribute),
            }
        }

        let egl_context = self.allocate_handle();
        self.contexts.insert(handle_id(egl_context),
                             SoftContext { egl_display, config_index, api });
        Ok(egl_context)
    }

    fn bind_current(&mut self, binding: CurrentBinding) -> Result<(), WindowingApiError> {
        let CurrentBinding { egl_display, draw, read, egl_context } = binding;
        self.check_display(egl_display)?;

        if egl_context == egl::NO_CONTEXT {
            if draw != egl::NO_SURFACE || read != egl::NO_SURFACE {
                return Err(WindowingApiError::BadMatch);
            }
            self.current = None;
            return Ok(());
        }

        let context_config = match self.contexts.get(&handle_id(egl_context)) {
            Some(context) if context.egl_display == egl_display => context.config_index,
            _ => return Err(WindowingApiError::BadContext),
        };
        if draw == egl::NO_SURFACE || read == egl::NO_SURFACE {
            return Err(WindowingApiError::BadMatch);
        }
        for &egl_surface in &[draw, read] {
            if self.surface_config(egl_display, egl_surface)? != context_config {
                return Err(WindowingApiError::BadMatch);
            }
        }

        self.current = Some(binding);
        Ok(())
    }

    fn terminate_display(&mut self, egl_display: EGLDisplay) -> Result<(), WindowingApiError> {
        let display = self
            .displays
            .get_mut(&handle_id(egl_display))
            .ok_or(WindowingApiError::BadDisplay)?;
        display.initialized = false;

        if let Some(current) = self.current.filter(|current| current.egl_display == egl_display) {
            self.debug.post(egl::SUCCESS as EGLint,
                            "eglTerminate",
                            DebugMessageKind::Warning,
                            format!("context {:?} was still current", current.egl_context));
        }
        self.surfaces.retain(|_, surface| surface.egl_display != egl_display);
        self.contexts.retain(|_, context| context.egl_display != egl_display);
        if self.current.map_or(false, |current| current.egl_display == egl_display) {
            self.current = None;
        }
        Ok(())
    }
}

impl Driver for SoftDriver {
    fn default_display(&mut self) -> Option<EGLDisplay> {
        self.calls.push(Call::GetDisplay);
        if !self.default_display_available {
            return None;
        }
        if let Some(egl_display) = self.default_display {
            return Some(egl_display);
        }

        let egl_display = self.allocate_handle();
        self.displays.insert(handle_id(egl_display), SoftDisplay { initialized: false });
        self.default_display = Some(egl_display);
        Some(egl_display)
    }

    fn initialize(&mut self, egl_display: EGLDisplay) -> Result<EGLVersion, WindowingApiError> {
        self.calls.push(Call::Initialize);
        let result = self.initialize_display(egl_display);
        if let Ok(version) = result {
            self.info("eglInitialize", format!("initialized EGL {}", version));
        }
        self.finish("eglInitialize", result)
    }

    fn choose_config(
        &mut self,
        egl_display: EGLDisplay,
        attributes: &[EGLint],
    ) -> Result<Option<EGLConfig>, WindowingApiError> {
        self.calls.push(Call::ChooseConfig);
        let result = self.choose_first_config(egl_display, attributes);
        self.finish("eglChooseConfig", result)
    }

    fn config_attrib(
        &mut self,
        egl_display: EGLDisplay,
        egl_config: EGLConfig,
        attribute: EGLint,
    ) -> Result<EGLint, WindowingApiError> {
        self.calls.push(Call::GetConfigAttrib);
        let result = self.get_config_attrib(egl_display, egl_config, attribute);
        self.finish("eglGetConfigAttrib", result)
    }

    fn create_pbuffer_surface(
        &mut self,
        egl_display: EGLDisplay,
        egl_config: EGLConfig,
        attributes: &[EGLint],
    ) -> Result<EGLSurface, WindowingApiError> {
        self.calls.push(Call::CreatePbufferSurface);
        let result = self.create_pbuffer(egl_display, egl_config, attributes);
        self.finish("eglCreatePbufferSurface", result)
    }

    fn bind_api(&mut self, api: ClientApi) -> Result<(), WindowingApiError> {
        self.calls.push(Call::BindAPI(api));
        let result = match api {
            ClientApi::GL | ClientApi::GLES => {
                self.bound_api = api;
                Ok(())
            }
            ClientApi::VG => Err(WindowingApiError::BadParameter),
        };
        self.finish("eglBindAPI", result)
    }

    fn create_context(
        &mut self,
        egl_display: EGLDisplay,
        egl_config: EGLConfig,
        share_context: EGLContext,
        attributes: &[EGLint],
    ) -> Result<EGLContext, WindowingApiError> {
        self.calls.push(Call::CreateContext);
        let result = self.create_soft_context(egl_display, egl_config, share_context, attributes);
        self.finish("eglCreateContext", result)
    }

    fn make_current(
        &mut self,
        egl_display: EGLDisplay,
        draw: EGLSurface,
        read: EGLSurface,
        egl_context: EGLContext,
    ) -> Result<(), WindowingApiError> {
        self.calls.push(Call::MakeCurrent);
        let result = self.bind_current(CurrentBinding { egl_display, draw, read, egl_context });
        self.finish("eglMakeCurrent", result)
    }

    fn terminate(&mut self, egl_display: EGLDisplay) -> Result<(), WindowingApiError> {
        self.calls.push(Call::Terminate);
        let result = self.terminate_display(egl_display);
        if result.is_ok() {
            self.info("eglTerminate", "released display resources".to_owned());
        }
        self.finish("eglTerminate", result)
    }
}

#[inline]
fn handle_id(handle: *const c_void) -> usize {
    handle as usize
}
