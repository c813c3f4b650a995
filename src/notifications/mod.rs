// SPDX-License-Identifier: MPL-2.0
//! User-facing notifications.
//!
//! Every workflow outcome the user should hear about (no match found, an
//! error, a successful submission) becomes exactly one [`Notification`]
//! pushed to the controller's [`Manager`], a newest-first log.
//!
//! Successes and infos expire after about 3s, warnings after about 5s.
//! Errors stay until dismissed or until their stage succeeds. Expiry only
//! happens when the caller runs [`Manager::tick`].

mod manager;
mod notification;

pub use manager::{Manager, HISTORY_LIMIT};
pub use notification::{Notification, NotificationId, Severity};
