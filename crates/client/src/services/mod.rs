//! Services built on the API clients.
//!
//! - [`ProductService`] - Handle one product form submission end to end

mod submit;

pub use submit::{CreateOutcome, ImageOutcome, ProductService, SubmitError, Submission};
