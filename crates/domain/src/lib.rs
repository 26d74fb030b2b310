// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod identity;
mod records;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use identity::{Identity, normalize_optional, resolve_identity};
pub use records::{Attendance, Employee, Evaluation, Event, Registration};
pub use types::{
    AttendanceMode, EntityKind, Rating, RatingField, Ratings, SessionHelpful, ValidationStatus,
};
pub use validation::{format_event_date, parse_event_date, require_field, validate_event_fields};
