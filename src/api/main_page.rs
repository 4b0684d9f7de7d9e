// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Protected landing endpoint.

use crate::auth::CurrentUser;

/// Fixed label prefixed to the caller's identity.
pub const MAIN_LABEL: &str = "Main Controller";

/// Echo the caller's username and role.
///
/// The body is the label, username and role concatenated without
/// separators, e.g. `Main ControlleraliceROLE_USER`.
#[utoipa::path(
    get,
    path = "/",
    tag = "Main",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller identity", body = String),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn main_page(CurrentUser(principal): CurrentUser) -> String {
    format!("{MAIN_LABEL}{}{}", principal.username, principal.role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Principal;

    #[tokio::test]
    async fn concatenates_label_username_and_role() {
        let body = main_page(CurrentUser(Principal {
            username: "alice".to_string(),
            role: "ROLE_USER".to_string(),
        }))
        .await;

        assert_eq!(body, "Main ControlleraliceROLE_USER");
    }
}
