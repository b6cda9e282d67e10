// eglboot/src/main.rs
//
//! Brings up a headless desktop OpenGL context through EGL and tears it down again.

use eglboot::{BootstrapConfig, Driver, Error};

use log::error;
use std::io::{self, Write};
use std::process;

const EXIT_DISPLAY_UNAVAILABLE: i32 = 1;
const EXIT_FAILURE: i32 = 2;

fn main() {
    env_logger::init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut driver = match open_driver() {
        Ok(driver) => driver,
        Err(err) => {
            error!("{}", err);
            let _ = writeln!(out, "Failed to get display");
            process::exit(EXIT_DISPLAY_UNAVAILABLE);
        }
    };

    let code = match eglboot::run(&mut *driver, &BootstrapConfig::default(), &mut out) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            error!("{}", err);
            EXIT_FAILURE
        }
    };
    let _ = out.flush();
    process::exit(code);
}

#[cfg(not(soft_default))]
fn open_driver() -> Result<Box<dyn Driver>, Error> {
    Ok(Box::new(eglboot::SystemEgl::open()?))
}

#[cfg(soft_default)]
fn open_driver() -> Result<Box<dyn Driver>, Error> {
    Ok(Box::new(eglboot::SoftDriver::new()))
}
