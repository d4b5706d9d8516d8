//! Backend API
//!
//! Typed access to the chatbot backend.
//!
//! ## Endpoints
//!
//! - `POST /auth/signup`, `POST /auth/login`, `GET /auth/me`
//! - `POST /mood`, `GET /mood/history`
//! - `GET /analytics/mood-trend`, `GET /analytics/mood-summary`, `GET /analytics/chat-words`
//! - `GET /chat/history`, `POST /chat`
//!
//! Every request carries `Authorization: Bearer <token>` when the
//! [`Session`](crate::session::Session) holds one.

mod backend;
mod client;
pub mod dto;
mod error;

pub use backend::Backend;
pub use client::ApiClient;
pub use dto::*;
pub use error::{ClientError, ClientResult};
