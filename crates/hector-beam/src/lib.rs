#![deny(missing_docs)]
#![doc = "Beam producers: linear optics scanners and random particle guns."]

pub mod gun;
pub mod scanner;

pub use gun::{GunAxis, ParticleGun, Spread};
pub use scanner::{LinearScanner, ScanAxis};

use hector_core::errors::{ErrorInfo, HectorError};

fn generator_error(code: impl Into<String>, message: impl Into<String>) -> HectorError {
    HectorError::Generator(ErrorInfo::new(code, message))
}
