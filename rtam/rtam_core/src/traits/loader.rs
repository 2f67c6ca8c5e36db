//! Platform loader contract.

use crate::types::AppDescriptor;

/// Supplies the application table assembled when the firmware image was
/// composed. The slice must stay valid and unchanged for the program's
/// lifetime; the engine never mutates it and relies on descriptor addresses
/// being stable.
pub trait AppLoader {
    fn load(&self) -> &'static [AppDescriptor];
}

impl AppLoader for &'static [AppDescriptor] {
    fn load(&self) -> &'static [AppDescriptor] {
        *self
    }
}

impl<const N: usize> AppLoader for &'static [AppDescriptor; N] {
    fn load(&self) -> &'static [AppDescriptor] {
        *self
    }
}

impl AppLoader for fn() -> &'static [AppDescriptor] {
    fn load(&self) -> &'static [AppDescriptor] {
        self()
    }
}
