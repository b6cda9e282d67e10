// eglboot/build.rs
//
//! The `eglboot` build script.

use cfg_aliases::cfg_aliases;
use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};
use std::env;
use std::fs::File;
use std::path::PathBuf;

fn main() {
    // Setup aliases for #[cfg] checks
    cfg_aliases! {
        // A system `libEGL` can be dlopen'd.
        system_egl: { unix },

        // Features:
        // The binary drives the in-process software driver instead of the system library.
        soft_default: { any(not(system_egl), feature = "eb-soft-default") },
    }

    let dest = PathBuf::from(&env::var("OUT_DIR").unwrap());

    // Generate EGL bindings. The constants and types are used by every backend, including the
    // software one, so they are generated on all targets.
    let mut file = File::create(dest.join("egl_bindings.rs")).unwrap();
    let registry = Registry::new(Api::Egl, (1, 5), Profile::Core, Fallbacks::All, []);
    registry.write_bindings(StructGenerator, &mut file).unwrap();
}
