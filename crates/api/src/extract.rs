//! Extractors whose rejections render the standard error envelope.
//!
//! Axum's stock `Json` and `Path` reject with plain-text bodies; these
//! wrappers route the rejection through [`AppError`] so malformed bodies and
//! ids come back as a `400` envelope.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` with an [`AppError`] rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with an [`AppError`] rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
