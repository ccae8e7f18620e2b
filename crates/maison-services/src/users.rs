//! Account management.

use crate::error::ServiceResult;
use crate::segment;
use maison_commerce::catalog::Page;
use maison_commerce::ids::UserId;
use maison_commerce::user::{ProfileUpdate, Role, User};
use maison_data::FetchClient;
use serde::Serialize;

#[derive(Serialize)]
struct RoleBody {
    role: Role,
}

/// Admin: users, optionally matching `search` on name or email.
pub async fn admin_list(client: &FetchClient, search: Option<&str>, page: u32) -> ServiceResult<Page<User>> {
    let mut request = client.get("/admin/users").query("page", page.max(1).to_string());
    if let Some(q) = search.map(str::trim).filter(|q| !q.is_empty()) {
        request = request.query("q", q);
    }
    Ok(request.send_data().await?)
}

pub async fn get(client: &FetchClient, id: &UserId) -> ServiceResult<User> {
    Ok(client
        .get(format!("/admin/users/{}", segment(id)))
        .send_data()
        .await?)
}

pub async fn update_role(client: &FetchClient, id: &UserId, role: Role) -> ServiceResult<User> {
    let user: User = client
        .patch(format!("/admin/users/{}/role", segment(id)))
        .json(&RoleBody { role })?
        .send_data()
        .await?;
    tracing::info!(user_id = %id, role = role.as_str(), "user role changed");
    Ok(user)
}

pub async fn delete(client: &FetchClient, id: &UserId) -> ServiceResult<()> {
    client
        .delete(format!("/admin/users/{}", segment(id)))
        .send()
        .await?
        .error_for_status()?;
    tracing::info!(user_id = %id, "user deleted");
    Ok(())
}

/// Update the signed-in user's own profile.
pub async fn update_profile(client: &FetchClient, update: &ProfileUpdate) -> ServiceResult<User> {
    update.validate()?;
    Ok(client.patch("/users/me").json(update)?.send_data().await?)
}
