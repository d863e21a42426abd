use serde::{Deserialize, Serialize};

use super::enums::Plan;

/// The logged-in user record, as persisted under the user blob key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub plan: Plan,
}
