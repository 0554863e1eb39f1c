//! Diagnostics sink.
//!
//! The analyzer reports every semantic error through [`ErrorsHandler`] and
//! keeps going. What happens to the error afterwards (collected, printed,
//! counted) is up to the handler.

use super::errors::Error;

pub trait ErrorsHandler {
    /// Receives one error, in the order the analyzer emits them.
    fn handle(&mut self, error: Error);
}

impl<H: ErrorsHandler + ?Sized> ErrorsHandler for &mut H {
    fn handle(&mut self, error: Error) {
        (**self).handle(error)
    }
}

/// Keeps every reported error in emission order.
#[derive(Debug, Default, Clone)]
pub struct ErrorCollector {
    errors: Vec<Error>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Names of the collected errors, handy for assertions.
    pub fn names(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.get_error_name()).collect()
    }
}

impl ErrorsHandler for ErrorCollector {
    fn handle(&mut self, error: Error) {
        self.errors.push(error);
    }
}

impl ErrorsHandler for Vec<Error> {
    fn handle(&mut self, error: Error) {
        self.push(error);
    }
}
