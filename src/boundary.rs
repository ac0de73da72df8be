//! Catch-and-render-fallback supervisor for views.
//!
//! A [`Boundary`] runs a view on its own task and, when it fails or panics,
//! records the failure and returns a fallback instead. Once tripped it keeps
//! returning the fallback without running the view again until
//! [`Boundary::reset`] is called. [`Boundary::failure`] holds the message to
//! show in place of the view.

use std::{any::Any, fmt::Display, future::Future};
use tracing::error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered<T> {
    View(T),
    Fallback,
}

#[derive(Debug, Default)]
pub struct Boundary {
    failure: Option<String>,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unexpected panic".to_string())
}

impl Boundary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded failure, if the boundary has tripped.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Clears the recorded failure so the next render runs the view again.
    pub fn reset(&mut self) {
        self.failure = None;
    }

    fn trip<T>(&mut self, message: String) -> Rendered<T> {
        error!("view failed: {message}");
        self.failure = Some(message);
        Rendered::Fallback
    }

    /// Runs an async render step on its own task so a panic is contained.
    pub async fn supervise<T, E, F>(&mut self, view: F) -> Rendered<T>
    where
        T: Send + 'static,
        E: Display + Send + 'static,
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        if self.failure.is_some() {
            return Rendered::Fallback;
        }

        match tokio::spawn(view).await {
            Ok(Ok(value)) => Rendered::View(value),
            Ok(Err(err)) => self.trip(err.to_string()),
            Err(join_err) if join_err.is_panic() => {
                self.trip(panic_message(join_err.into_panic().as_ref()))
            }
            Err(join_err) => self.trip(join_err.to_string()),
        }
    }
}
