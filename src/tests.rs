// eglboot/src/tests.rs
//
//! Unit tests.

use crate::egl;
use crate::egl::types::{EGLConfig, EGLContext, EGLDisplay, EGLSurface, EGLint};
use crate::error::ToWindowingApiError;
use crate::platform::soft::{Call, CurrentBinding};
use crate::{run, BootstrapConfig, ClientApi, ConfigAttributes, DebugMessage, DebugMessageKind};
use crate::{DebugMessageKinds, Driver, EGLVersion, Error, InitializedDisplay, Outcome};
use crate::{PbufferAttributes, RenderableTypeFlags, SoftConfig, SoftDriver, SurfaceTypeFlags};
use crate::WindowingApiError;

use euclid::default::Size2D;
use std::cell::RefCell;
use std::ptr;
use std::rc::Rc;

const DONE_OUTPUT: &str = "Version 1.0\n\n!!! DONE !!!\n";

static BOOTSTRAP_CALLS: [Call; 8] = [
    Call::GetDisplay,
    Call::Initialize,
    Call::ChooseConfig,
    Call::CreatePbufferSurface,
    Call::BindAPI(ClientApi::GL),
    Call::CreateContext,
    Call::MakeCurrent,
    Call::Terminate,
];

fn run_to_string<D>(driver: &mut D, config: &BootstrapConfig) -> (Result<Outcome, Error>, String)
where
    D: Driver + ?Sized,
{
    let mut out = vec![];
    let result = run(driver, config, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn gles_only_configs() -> Vec<SoftConfig> {
    SoftConfig::defaults()
        .into_iter()
        .filter(|config| !config.renderable_type.contains(RenderableTypeFlags::OPENGL))
        .collect()
}

fn record_debug_messages(driver: &mut SoftDriver) -> Rc<RefCell<Vec<DebugMessage>>> {
    let messages = Rc::new(RefCell::new(vec![]));
    let sink = messages.clone();
    driver.set_debug_callback(Some(Box::new(move |message: &DebugMessage| {
        sink.borrow_mut().push(message.clone());
    })));
    messages
}

fn initialized_display(driver: &mut SoftDriver) -> EGLDisplay {
    let egl_display = driver.default_display().unwrap();
    driver.initialize(egl_display).unwrap();
    egl_display
}

// Snapshots the software driver's state right before the display goes away.
struct TerminateProbe {
    inner: SoftDriver,
    egl_surface: Option<EGLSurface>,
    pixels_at_terminate: Option<Vec<u8>>,
    current_at_terminate: Option<CurrentBinding>,
}

impl TerminateProbe {
    fn new() -> TerminateProbe {
        TerminateProbe {
            inner: SoftDriver::new(),
            egl_surface: None,
            pixels_at_terminate: None,
            current_at_terminate: None,
        }
    }
}

impl Driver for TerminateProbe {
    fn default_display(&mut self) -> Option<EGLDisplay> {
        self.inner.default_display()
    }

    fn initialize(&mut self, egl_display: EGLDisplay) -> Result<EGLVersion, WindowingApiError> {
        self.inner.initialize(egl_display)
    }

    fn choose_config(&mut self, egl_display: EGLDisplay, attributes: &[EGLint])
                     -> Result<Option<EGLConfig>, WindowingApiError> {
        self.inner.choose_config(egl_display, attributes)
    }

    fn config_attrib(&mut self, egl_display: EGLDisplay, egl_config: EGLConfig, attribute: EGLint)
                     -> Result<EGLint, WindowingApiError> {
        self.inner.config_attrib(egl_display, egl_config, attribute)
    }

    fn create_pbuffer_surface(&mut self,
                              egl_display: EGLDisplay,
                              egl_config: EGLConfig,
                              attributes: &[EGLint])
                              -> Result<EGLSurface, WindowingApiError> {
        let egl_surface = self.inner.create_pbuffer_surface(egl_display, egl_config, attributes)?;
        self.egl_surface = Some(egl_surface);
        Ok(egl_surface)
    }

    fn bind_api(&mut self, api: ClientApi) -> Result<(), WindowingApiError> {
        self.inner.bind_api(api)
    }

    fn create_context(&mut self,
                      egl_display: EGLDisplay,
                      egl_config: EGLConfig,
                      share_context: EGLContext,
                      attributes: &[EGLint])
                      -> Result<EGLContext, WindowingApiError> {
        self.inner.create_context(egl_display, egl_config, share_context, attributes)
    }

    fn make_current(&mut self,
                    egl_display: EGLDisplay,
                    draw: EGLSurface,
                    read: EGLSurface,
                    egl_context: EGLContext)
                    -> Result<(), WindowingApiError> {
        self.inner.make_current(egl_display, draw, read, egl_context)
    }

    fn terminate(&mut self, egl_display: EGLDisplay) -> Result<(), WindowingApiError> {
        if let Some(egl_surface) = self.egl_surface {
            self.pixels_at_terminate = self.inner.surface_pixels(egl_surface).map(|p| p.to_vec());
        }
        self.current_at_terminate = self.inner.current();
        self.inner.terminate(egl_display)
    }
}

// Fails one entry point with a fixed error, forwarding everything else to a software driver.
// Failures a driver-issued display never produces (e.g. at `eglInitialize`) need this.
struct FailingDriver {
    inner: SoftDriver,
    failing: Call,
    error: WindowingApiError,
}

impl FailingDriver {
    fn new(failing: Call, error: WindowingApiError) -> FailingDriver {
        FailingDriver { inner: SoftDriver::new(), failing, error }
    }

    fn fail(&self, call: Call) -> Result<(), WindowingApiError> {
        if call == self.failing {
            Err(self.error)
        } else {
            Ok(())
        }
    }
}

impl Driver for FailingDriver {
    fn default_display(&mut self) -> Option<EGLDisplay> {
        self.inner.default_display()
    }
    fn initialize(&mut self, d: EGLDisplay) -> Result<EGLVersion, WindowingApiError> {
        self.fail(Call::Initialize)?;
        self.inner.initialize(d)
    }
    fn choose_config(&mut self, d: EGLDisplay, a: &[EGLint])
                     -> Result<Option<EGLConfig>, WindowingApiError> {
        self.fail(Call::ChooseConfig)?;
        self.inner.choose_config(d, a)
    }
    fn config_attrib(&mut self, d: EGLDisplay, c: EGLConfig, a: EGLint)
                     -> Result<EGLint, WindowingApiError> {
        self.fail(Call::GetConfigAttrib)?;
        self.inner.config_attrib(d, c, a)
    }
    fn create_pbuffer_surface(&mut self, d: EGLDisplay, c: EGLConfig, a: &[EGLint])
                              -> Result<EGLSurface, WindowingApiError> {
        self.fail(Call::CreatePbufferSurface)?;
        self.inner.create_pbuffer_surface(d, c, a)
    }
    fn bind_api(&mut self, api: ClientApi) -> Result<(), WindowingApiError> {
        self.fail(Call::BindAPI(api))?;
        self.inner.bind_api(api)
    }
    fn create_context(&mut self, d: EGLDisplay, c: EGLConfig, s: EGLContext, a: &[EGLint])
                      -> Result<EGLContext, WindowingApiError> {
        self.fail(Call::CreateContext)?;
        self.inner.create_context(d, c, s, a)
    }
    fn make_current(&mut self, d: EGLDisplay, w: EGLSurface, r: EGLSurface, c: EGLContext)
                    -> Result<(), WindowingApiError> {
        self.fail(Call::MakeCurrent)?;
        self.inner.make_current(d, w, r, c)
    }
    fn terminate(&mut self, d: EGLDisplay) -> Result<(), WindowingApiError> {
        self.fail(Call::Terminate)?;
        self.inner.terminate(d)
    }
}

#[test]
fn test_bootstrap_completes() {
    let mut driver = SoftDriver::new();
    let (result, output) = run_to_string(&mut driver, &BootstrapConfig::default());

    let outcome = result.unwrap();
    assert_eq!(outcome, Outcome::Completed { version: EGLVersion::new(1, 0) });
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(output, DONE_OUTPUT);
    assert_eq!(driver.calls(), &BOOTSTRAP_CALLS[..]);
}

#[test]
fn test_missing_display_exits_early() {
    let mut driver = SoftDriver::without_default_display();
    let (result, output) = run_to_string(&mut driver, &BootstrapConfig::default());

    let outcome = result.unwrap();
    assert_eq!(outcome, Outcome::NoDisplay);
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(output, "Failed to get display\n");
    assert_eq!(driver.calls(), &[Call::GetDisplay]);
    assert_eq!(driver.call_count(Call::Terminate), 0);
}

#[test]
fn test_reported_version_is_printed() {
    let mut driver = SoftDriver::new().with_version(1, 5);
    let (result, output) = run_to_string(&mut driver, &BootstrapConfig::default());

    assert_eq!(result.unwrap(), Outcome::Completed { version: EGLVersion::new(1, 5) });
    assert!(output.starts_with("Version 1.5\n"));
    assert!(output.ends_with("\n!!! DONE !!!\n"));
}

#[test]
fn test_display_is_terminated_once() {
    let mut driver = SoftDriver::new();
    run_to_string(&mut driver, &BootstrapConfig::default()).0.unwrap();

    assert_eq!(driver.call_count(Call::Terminate), 1);
    let egl_display = driver.default_display().unwrap();
    assert!(!driver.is_initialized(egl_display));
    assert_eq!(driver.live_surface_count(), 0);
    assert_eq!(driver.live_context_count(), 0);
    assert_eq!(driver.current(), None);
}

#[test]
fn test_context_is_current_on_pbuffer_until_terminate() {
    let mut probe = TerminateProbe::new();
    run_to_string(&mut probe, &BootstrapConfig::default()).0.unwrap();

    let egl_surface = probe.egl_surface.unwrap();
    let current = probe.current_at_terminate.unwrap();
    assert_eq!(current.draw, egl_surface);
    assert_eq!(current.read, egl_surface);
    assert_ne!(current.egl_context, egl::NO_CONTEXT);
    assert_eq!(probe.inner.bound_api(), ClientApi::GL);
}

#[test]
fn test_pbuffer_is_never_drawn_to() {
    let mut probe = TerminateProbe::new();
    run_to_string(&mut probe, &BootstrapConfig::default()).0.unwrap();

    let pixels = probe.pixels_at_terminate.unwrap();
    assert_eq!(pixels.len(), 9 * 9 * 4);
    assert!(pixels.iter().all(|&byte| byte == 0));
}

#[test]
fn test_permissive_mode_carries_on_without_config() {
    let mut driver = SoftDriver::new().with_configs(gles_only_configs());
    let messages = record_debug_messages(&mut driver);
    let (result, output) = run_to_string(&mut driver, &BootstrapConfig::default());

    assert_eq!(result.unwrap().exit_code(), 0);
    assert_eq!(output, DONE_OUTPUT);
    assert_eq!(driver.calls(), &BOOTSTRAP_CALLS[..]);

    let failed: Vec<_> = messages.borrow().iter().map(|message| message.command).collect();
    assert_eq!(failed, vec!["eglCreatePbufferSurface", "eglCreateContext"]);
    assert!(messages.borrow().iter().all(|message| {
        message.kind == DebugMessageKind::Error &&
            message.error == WindowingApiError::BadConfig.to_egl_error()
    }));
}

#[test]
fn test_permissive_mode_prints_zero_version_when_initialize_fails() {
    let mut driver = FailingDriver::new(Call::Initialize, WindowingApiError::NotInitialized);
    let (result, output) = run_to_string(&mut driver, &BootstrapConfig::default());

    assert_eq!(result.unwrap(), Outcome::Completed { version: EGLVersion::new(0, 0) });
    assert_eq!(output, "Version 0.0\n\n!!! DONE !!!\n");
    assert_eq!(driver.inner.call_count(Call::Terminate), 1);
}

#[test]
fn test_strict_mode_completes() {
    let mut driver = SoftDriver::new();
    let (result, output) = run_to_string(&mut driver, &BootstrapConfig::strict());

    assert_eq!(result.unwrap().exit_code(), 0);
    assert_eq!(output, DONE_OUTPUT);
    assert_eq!(driver.calls(), &BOOTSTRAP_CALLS[..]);
}

#[test]
fn test_strict_mode_reports_missing_config() {
    let mut driver = SoftDriver::new().with_configs(gles_only_configs());
    let (result, output) = run_to_string(&mut driver, &BootstrapConfig::strict());

    match result {
        Err(Error::NoPixelFormatFound) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(output, "Version 1.0\n");
    assert_eq!(driver.calls(), &[Call::GetDisplay, Call::Initialize, Call::ChooseConfig,
                                 Call::Terminate]);
}

#[test]
fn test_strict_mode_cleans_up_after_api_failure() {
    let mut driver = SoftDriver::new();
    let config = BootstrapConfig { api: ClientApi::VG, ..BootstrapConfig::strict() };
    let (result, _) = run_to_string(&mut driver, &config);

    match result {
        Err(Error::ApiBindingFailed(WindowingApiError::BadParameter)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(driver.calls().last(), Some(&Call::Terminate));
    assert_eq!(driver.call_count(Call::Terminate), 1);
    assert_eq!(driver.live_surface_count(), 0);
}

#[test]
fn test_strict_mode_reports_surface_failure() {
    let mut driver = SoftDriver::new();
    let mut config = BootstrapConfig::strict();
    config.pbuffer_attributes = PbufferAttributes::new(Size2D::new(-1, 9));
    let (result, _) = run_to_string(&mut driver, &config);

    match result {
        Err(Error::SurfaceCreationFailed(WindowingApiError::BadParameter)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(driver.call_count(Call::CreateContext), 0);
    assert_eq!(driver.call_count(Call::Terminate), 1);
}

#[test]
fn test_strict_mode_reports_initialize_failure() {
    let mut driver = FailingDriver::new(Call::Initialize, WindowingApiError::NotInitialized);
    let (result, output) = run_to_string(&mut driver, &BootstrapConfig::strict());

    match result {
        Err(Error::InitializationFailed(WindowingApiError::NotInitialized)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(output, "");
    assert_eq!(driver.inner.calls(), &[Call::GetDisplay, Call::Terminate]);
    assert_eq!(driver.inner.call_count(Call::Terminate), 1);
}

#[test]
fn test_strict_mode_reports_make_current_failure() {
    let mut driver = FailingDriver::new(Call::MakeCurrent, WindowingApiError::BadAccess);
    let (result, output) = run_to_string(&mut driver, &BootstrapConfig::strict());

    match result {
        Err(Error::MakeCurrentFailed(WindowingApiError::BadAccess)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(output, "Version 1.0\n");
    assert_eq!(driver.inner.call_count(Call::MakeCurrent), 0);
    assert_eq!(driver.inner.calls().last(), Some(&Call::Terminate));
    assert_eq!(driver.inner.call_count(Call::Terminate), 1);
    assert_eq!(driver.inner.live_surface_count(), 0);
    assert_eq!(driver.inner.live_context_count(), 0);
}

#[test]
fn test_strict_mode_rejects_oversized_pbuffer() {
    for &size in &[Size2D::new(i32::MAX, i32::MAX), Size2D::new(1 << 20, 1 << 20)] {
        let mut driver = SoftDriver::new();
        let mut config = BootstrapConfig::strict();
        config.pbuffer_attributes = PbufferAttributes::new(size);
        let (result, _) = run_to_string(&mut driver, &config);

        match result {
            Err(Error::SurfaceCreationFailed(WindowingApiError::BadParameter)) => {}
            other => panic!("unexpected result for {:?}: {:?}", size, other),
        }
        assert_eq!(driver.live_surface_count(), 0);
        assert_eq!(driver.call_count(Call::Terminate), 1);
    }
}

#[test]
fn test_config_attribute_list() {
    let attributes = ConfigAttributes::default().to_egl_attributes();
    assert_eq!(attributes, vec![
        0x3033, 0x0001, // EGL_SURFACE_TYPE, EGL_PBUFFER_BIT
        0x3022, 8,      // EGL_BLUE_SIZE
        0x3023, 8,      // EGL_GREEN_SIZE
        0x3024, 8,      // EGL_RED_SIZE
        0x3025, 8,      // EGL_DEPTH_SIZE
        0x3040, 0x0008, // EGL_RENDERABLE_TYPE, EGL_OPENGL_BIT
        0x3038,         // EGL_NONE
    ]);
}

#[test]
fn test_pbuffer_attribute_list() {
    let attributes = BootstrapConfig::default().pbuffer_attributes.to_egl_attributes();
    assert_eq!(attributes, vec![0x3057, 9, 0x3056, 9, 0x3038]);
}

#[test]
fn test_get_error_resets() {
    let mut driver = SoftDriver::new();
    let bogus = 0xdead as EGLDisplay;
    assert_eq!(driver.initialize(bogus), Err(WindowingApiError::BadDisplay));
    assert_eq!(driver.get_error(), egl::BAD_DISPLAY as EGLint);
    assert_eq!(driver.get_error(), egl::SUCCESS as EGLint);
    assert_eq!((egl::BAD_DISPLAY as EGLint).to_windowing_api_error(),
               WindowingApiError::BadDisplay);
}

#[test]
fn test_uninitialized_display_is_rejected() {
    let mut driver = SoftDriver::new();
    let egl_display = driver.default_display().unwrap();
    let attributes = ConfigAttributes::default().to_egl_attributes();
    assert_eq!(driver.choose_config(egl_display, &attributes),
               Err(WindowingApiError::NotInitialized));
}

#[test]
fn test_default_display_is_stable() {
    let mut driver = SoftDriver::new();
    let first = driver.default_display().unwrap();
    let second = driver.default_display().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_choose_config_rejects_unknown_attribute() {
    let mut driver = SoftDriver::new();
    let egl_display = initialized_display(&mut driver);
    let attributes = [egl::SAMPLES as EGLint, 4, egl::NONE as EGLint];
    assert_eq!(driver.choose_config(egl_display, &attributes),
               Err(WindowingApiError::BadAttribute));
}

#[test]
fn test_choose_config_uses_egl_defaults() {
    let mut driver = SoftDriver::new();
    let egl_display = initialized_display(&mut driver);

    // Unspecified, the surface type defaults to windows and the renderable type to OpenGL ES 1.
    let egl_config = driver.choose_config(egl_display, &[egl::NONE as EGLint]).unwrap().unwrap();
    let config_id = driver.config_attrib(egl_display, egl_config, egl::CONFIG_ID as EGLint);
    assert_eq!(config_id, Ok(2));
}

#[test]
fn test_choose_config_by_id_ignores_other_attributes() {
    let mut driver = SoftDriver::new();
    let egl_display = initialized_display(&mut driver);
    let attributes = [
        egl::RED_SIZE as EGLint,  16,
        egl::CONFIG_ID as EGLint, 3,
        egl::NONE as EGLint,
    ];
    let egl_config = driver.choose_config(egl_display, &attributes).unwrap().unwrap();
    let red_size = driver.config_attrib(egl_display, egl_config, egl::RED_SIZE as EGLint);
    assert_eq!(red_size, Ok(5));
}

#[test]
fn test_pbuffer_requires_pbuffer_config() {
    let mut driver = SoftDriver::new();
    let egl_display = initialized_display(&mut driver);
    let attributes = [egl::CONFIG_ID as EGLint, 3, egl::NONE as EGLint];
    let window_only = driver.choose_config(egl_display, &attributes).unwrap().unwrap();

    let pbuffer_attributes = BootstrapConfig::default().pbuffer_attributes.to_egl_attributes();
    assert_eq!(driver.create_pbuffer_surface(egl_display, window_only, &pbuffer_attributes),
               Err(WindowingApiError::BadMatch));
    assert_eq!(driver.create_pbuffer_surface(egl_display, ptr::null(), &pbuffer_attributes),
               Err(WindowingApiError::BadConfig));
}

#[test]
fn test_pbuffer_size_defaults_to_zero() {
    let mut driver = SoftDriver::new();
    let egl_display = initialized_display(&mut driver);
    let attributes = ConfigAttributes::default().to_egl_attributes();
    let egl_config = driver.choose_config(egl_display, &attributes).unwrap().unwrap();

    let egl_surface = driver.create_pbuffer_surface(egl_display, egl_config, &[]).unwrap();
    assert_eq!(driver.surface_size(egl_surface), Some(Size2D::new(0, 0)));
    assert_eq!(driver.surface_pixels(egl_surface).map(|pixels| pixels.len()), Some(0));
}

#[test]
fn test_pbuffer_size_is_limited_by_config() {
    let mut driver = SoftDriver::new();
    let egl_display = initialized_display(&mut driver);
    let attributes = [egl::CONFIG_ID as EGLint, 4, egl::NONE as EGLint];
    let egl_config = driver.choose_config(egl_display, &attributes).unwrap().unwrap();

    let max_width = driver.config_attrib(egl_display, egl_config, egl::MAX_PBUFFER_WIDTH as EGLint);
    let max_pixels =
        driver.config_attrib(egl_display, egl_config, egl::MAX_PBUFFER_PIXELS as EGLint);
    assert_eq!(max_width, Ok(2048));
    assert_eq!(max_pixels, Ok(2048 * 2048));

    let too_wide = [egl::WIDTH as EGLint, 2049, egl::HEIGHT as EGLint, 1, egl::NONE as EGLint];
    assert_eq!(driver.create_pbuffer_surface(egl_display, egl_config, &too_wide),
               Err(WindowingApiError::BadParameter));

    let largest = [
        egl::WIDTH as EGLint,           i32::MAX,
        egl::HEIGHT as EGLint,          16,
        egl::LARGEST_PBUFFER as EGLint, egl::TRUE as EGLint,
        egl::NONE as EGLint,
    ];
    let egl_surface = driver.create_pbuffer_surface(egl_display, egl_config, &largest).unwrap();
    assert_eq!(driver.surface_size(egl_surface), Some(Size2D::new(2048, 16)));
    assert_eq!(driver.surface_pixels(egl_surface).map(|pixels| pixels.len()),
               Some(2048 * 16 * 4));
}

#[test]
fn test_pbuffer_allocation_overflow_is_critical() {
    let mut unbounded = SoftConfig::defaults()[0];
    unbounded.max_pbuffer_width = i32::MAX;
    unbounded.max_pbuffer_height = i32::MAX;
    let mut driver = SoftDriver::new().with_configs(vec![unbounded]);
    let messages = record_debug_messages(&mut driver);
    let egl_display = initialized_display(&mut driver);
    let egl_config = driver.choose_config(egl_display, &[egl::CONFIG_ID as EGLint, 1,
                                                          egl::NONE as EGLint])
                           .unwrap()
                           .unwrap();

    let huge = PbufferAttributes::new(Size2D::new(i32::MAX, i32::MAX)).to_egl_attributes();
    assert_eq!(driver.create_pbuffer_surface(egl_display, egl_config, &huge),
               Err(WindowingApiError::BadAlloc));
    assert_eq!(driver.get_error(), egl::BAD_ALLOC as EGLint);
    assert_eq!(driver.live_surface_count(), 0);

    let messages = messages.borrow();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, DebugMessageKind::Critical);
    assert_eq!(messages[0].command, "eglCreatePbufferSurface");
}

#[test]
fn test_context_requires_renderable_config() {
    let mut driver = SoftDriver::new();
    let egl_display = initialized_display(&mut driver);
    let attributes = [egl::CONFIG_ID as EGLint, 4, egl::NONE as EGLint];
    let gles_only = driver.choose_config(egl_display, &attributes).unwrap().unwrap();

    // OpenGL ES is bound until told otherwise.
    assert_eq!(driver.bound_api(), ClientApi::GLES);
    assert!(driver.create_context(egl_display, gles_only, egl::NO_CONTEXT, &[]).is_ok());

    driver.bind_api(ClientApi::GL).unwrap();
    assert_eq!(driver.create_context(egl_display, gles_only, egl::NO_CONTEXT, &[]),
               Err(WindowingApiError::BadConfig));
}

#[test]
fn test_make_current_requires_matching_configs() {
    let mut driver = SoftDriver::new();
    let egl_display = initialized_display(&mut driver);
    driver.bind_api(ClientApi::GL).unwrap();

    let first = [egl::CONFIG_ID as EGLint, 1, egl::NONE as EGLint];
    let second = [egl::CONFIG_ID as EGLint, 2, egl::NONE as EGLint];
    let first = driver.choose_config(egl_display, &first).unwrap().unwrap();
    let second = driver.choose_config(egl_display, &second).unwrap().unwrap();

    let egl_surface = driver.create_pbuffer_surface(egl_display, first, &[]).unwrap();
    let egl_context = driver.create_context(egl_display, second, egl::NO_CONTEXT, &[]).unwrap();
    assert_eq!(driver.make_current(egl_display, egl_surface, egl_surface, egl_context),
               Err(WindowingApiError::BadMatch));
    assert_eq!(driver.make_current(egl_display, egl_surface, egl_surface, egl::NO_CONTEXT),
               Err(WindowingApiError::BadMatch));
    assert_eq!(driver.make_current(egl_display, egl::NO_SURFACE, egl::NO_SURFACE, egl::NO_CONTEXT),
               Ok(()));
}

#[test]
fn test_debug_messages_are_filtered() {
    let mut driver = SoftDriver::new();
    let messages = record_debug_messages(&mut driver);

    initialized_display(&mut driver);
    assert!(messages.borrow().is_empty());

    driver.set_enabled_debug_messages(DebugMessageKinds::all());
    let egl_display = driver.default_display().unwrap();
    driver.initialize(egl_display).unwrap();
    let messages = messages.borrow();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].command, "eglInitialize");
    assert_eq!(messages[0].kind, DebugMessageKind::Info);
    assert_eq!(messages[0].error, egl::SUCCESS as EGLint);
}

#[test]
fn test_terminate_warns_about_current_context() {
    let mut driver = SoftDriver::new();
    let messages = record_debug_messages(&mut driver);
    run_to_string(&mut driver, &BootstrapConfig::default()).0.unwrap();

    {
        let messages = messages.borrow();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].kind, DebugMessageKind::Warning);
        assert_eq!(messages[0].command, "eglTerminate");
        assert_eq!(messages[0].error, egl::SUCCESS as EGLint);
    }

    // With warnings disabled the callback stays silent.
    let mut driver = SoftDriver::new();
    let messages = record_debug_messages(&mut driver);
    driver.set_enabled_debug_messages(DebugMessageKinds::ERROR);
    run_to_string(&mut driver, &BootstrapConfig::default()).0.unwrap();
    assert!(messages.borrow().is_empty());
}

#[test]
fn test_initialized_display_guard_terminates_on_drop() {
    let mut driver = SoftDriver::new();
    let egl_display = initialized_display(&mut driver);
    {
        let _display = InitializedDisplay::new(&mut driver, egl_display);
    }
    assert_eq!(driver.call_count(Call::Terminate), 1);
    assert!(!driver.is_initialized(egl_display));

    driver.initialize(egl_display).unwrap();
    let display = InitializedDisplay::new(&mut driver, egl_display);
    display.terminate().unwrap();
    assert_eq!(driver.call_count(Call::Terminate), 2);
}

#[test]
fn test_surface_type_flags_cover_pbuffer() {
    let config = ConfigAttributes::default();
    assert_eq!(config.surface_type, SurfaceTypeFlags::PBUFFER);
    assert_eq!(config.renderable_type, RenderableTypeFlags::OPENGL);
    assert_eq!(ClientApi::from_egl_api(ClientApi::GL.to_egl_api()), Some(ClientApi::GL));
}

#[cfg(system_egl)]
#[test]
#[serial_test::serial]
fn test_system_egl_strict_bootstrap() {
    let mut driver = match crate::SystemEgl::open() {
        Ok(driver) => driver,
        Err(Error::NoGLLibraryFound) | Err(Error::GLFunctionNotFound) => return,
        Err(err) => panic!("unexpected error: {:?}", err),
    };

    // Strict mode never hands a null handle to the system library. A headless host may lack a
    // usable display or a desktop OpenGL config, but the sequence must still fail cleanly.
    let (result, output) = run_to_string(&mut driver, &BootstrapConfig::strict());
    match result {
        Ok(Outcome::Completed { .. }) => {
            assert!(output.starts_with("Version "));
            assert!(output.ends_with("\n!!! DONE !!!\n"));
        }
        Ok(Outcome::NoDisplay) => assert_eq!(output, "Failed to get display\n"),
        Err(Error::InitializationFailed(_)) => assert_eq!(output, ""),
        Err(err @ Error::NoPixelFormatFound) |
        Err(err @ Error::PixelFormatSelectionFailed(_)) |
        Err(err @ Error::SurfaceCreationFailed(_)) |
        Err(err @ Error::ApiBindingFailed(_)) |
        Err(err @ Error::ContextCreationFailed(_)) |
        Err(err @ Error::MakeCurrentFailed(_)) => {
            assert!(output.starts_with("Version "), "{}: {:?}", err, output);
            assert!(!output.contains("!!! DONE !!!"));
        }
        Err(err) => panic!("unexpected error: {:?}", err),
    }
}
