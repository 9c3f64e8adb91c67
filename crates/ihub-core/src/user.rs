//! User account model.

use serde::{Deserialize, Serialize};

/// The authenticated account as reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
}
