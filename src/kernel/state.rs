use crate::kernel::error::ValidationError;

/// Read-only triple the presentation layer binds to.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<R> {
    pub loading: bool,
    pub result: Option<R>,
    pub error: Option<ValidationError>,
}

impl<R> Default for ViewState<R> {
    fn default() -> Self {
        Self {
            loading: false,
            result: None,
            error: None,
        }
    }
}

/// Strict view delta. This is the ONLY way the view mutates.
#[derive(Debug, Clone)]
pub enum ViewDelta<R> {
    /// A submission went in flight.
    Started,
    Succeeded(R),
    Failed(ValidationError),
    /// Explicit cancel of the live request.
    Cancelled,
    /// A history record was brought back into view.
    Recalled(R),
    Reset,
}

impl<R> ViewState<R> {
    pub fn reduce(&mut self, delta: ViewDelta<R>) {
        match delta {
            ViewDelta::Started => {
                self.loading = true;
                self.error = None;
            }
            ViewDelta::Succeeded(result) => {
                self.loading = false;
                self.result = Some(result);
                self.error = None;
            }
            ViewDelta::Failed(error) => {
                self.loading = false;
                self.error = Some(error);
            }
            ViewDelta::Cancelled => {
                self.loading = false;
                self.error = Some(ValidationError::Cancelled);
            }
            ViewDelta::Recalled(result) => {
                self.result = Some(result);
                self.error = None;
            }
            ViewDelta::Reset => {
                self.loading = false;
                self.result = None;
                self.error = None;
            }
        }
    }
}
