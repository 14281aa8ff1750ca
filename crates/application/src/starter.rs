//! Sample tree seeded into an empty workspace.

use courier_domain::{CollectionNode, Folder, Forest, RequestNode, RequestType};

use crate::ports::RequestDataFactory;

/// Builds the starter forest shown before the user has saved anything.
///
/// Payloads come from `factory` so that they carry the same defaults as
/// requests the user creates.
#[must_use]
pub fn starter_forest(factory: &impl RequestDataFactory) -> Forest {
    let request = |id: &str, name: &str, method: &str, url: &str| -> CollectionNode {
        RequestNode::with_id(id, name, factory.build(method, url, RequestType::Http)).into()
    };

    Forest::from(vec![
        Folder::with_id("folder-starter", "Starter")
            .with_children(vec![
                request("req-catfact", "Get Cat Fact", "GET", "https://catfact.ninja/fact"),
                request(
                    "req-create-user",
                    "Create User",
                    "POST",
                    "https://reqres.in/api/users",
                ),
            ])
            .into(),
        Folder::with_id("folder-users", "Users")
            .with_children(vec![
                request(
                    "req-users-list",
                    "List Users",
                    "GET",
                    "https://reqres.in/api/users?page=1",
                ),
                Folder::with_id("folder-users-profile", "Profiles")
                    .with_children(vec![
                        request(
                            "req-user-update",
                            "Update User",
                            "PUT",
                            "https://reqres.in/api/users/2",
                        ),
                        request(
                            "req-user-patch",
                            "Patch User",
                            "PATCH",
                            "https://reqres.in/api/users/2",
                        ),
                        request(
                            "req-user-delete",
                            "Delete User",
                            "DELETE",
                            "https://reqres.in/api/users/2",
                        ),
                    ])
                    .into(),
            ])
            .into(),
    ])
}
