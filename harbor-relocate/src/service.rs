//! Contract for the background daemon's lifecycle controller.

use std::future::Future;

use crate::error::ServiceError;

/// External collaborator exposing stop/start on the background daemon.
///
/// Both operations may take a bounded but non-trivial amount of time; the
/// relocation workflow awaits each before proceeding and treats a failure
/// as fatal to the remainder of that phase. There is no timeout and no
/// cancellation of an in-flight call.
pub trait ServiceController {
    fn stop(&self) -> impl Future<Output = Result<(), ServiceError>> + Send;
    fn start(&self) -> impl Future<Output = Result<(), ServiceError>> + Send;
}
