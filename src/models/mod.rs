// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod question;
pub mod result;
pub mod user;
pub mod view;

pub use question::Question;
pub use result::{Grade, ResultRecord, ResultSummary};
pub use user::{Identity, UserProfile};
pub use view::View;
