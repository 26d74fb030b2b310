// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tracing::info;
use wellness_persistence::{Persistence, ReconciliationReport};

use crate::auth::AuthenticatedAdmin;

/// Runs duplicate reconciliation on demand.
///
/// Per-table failures are reported in the result rather than returned as
/// errors, so this never fails.
#[must_use]
pub fn reconcile_duplicates(
    persistence: &mut Persistence,
    admin: &AuthenticatedAdmin,
) -> ReconciliationReport {
    info!(actor = %admin.username, "Manual reconciliation requested");
    persistence.reconcile_duplicates()
}
