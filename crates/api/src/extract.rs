//! Extractors that report rejections through [`AppError`] so malformed
//! bodies and unmatched paths get the same JSON error shape as every other
//! failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` with an [`AppError`] rejection (400 `BAD_REQUEST`).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with an [`AppError`] rejection (404 `NOT_FOUND`).
///
/// An id segment that is not an integer cannot name a stored event.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
