//! Contact-form inquiries.

use crate::error::ServiceResult;
use crate::segment;
use maison_commerce::ids::InquiryId;
use maison_commerce::inquiry::{Inquiry, InquiryStatus, NewInquiry};
use maison_commerce::order::StatusUpdate;
use maison_data::FetchClient;

/// Submit the contact form.
pub async fn submit(client: &FetchClient, inquiry: NewInquiry) -> ServiceResult<Inquiry> {
    let inquiry = inquiry.normalized();
    inquiry.validate()?;
    let created: Inquiry = client.post("/inquiries").json(&inquiry)?.send_data().await?;
    tracing::info!(inquiry_id = %created.id, "inquiry submitted");
    Ok(created)
}

/// Admin: inquiries, newest first, optionally filtered by status.
pub async fn admin_list(client: &FetchClient, status: Option<InquiryStatus>) -> ServiceResult<Vec<Inquiry>> {
    let mut request = client.get("/admin/inquiries");
    if let Some(status) = status {
        request = request.query("status", status.as_str());
    }
    let mut inquiries: Vec<Inquiry> = request.send_data().await?;
    inquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(inquiries)
}

pub async fn update_status(client: &FetchClient, id: &InquiryId, status: InquiryStatus) -> ServiceResult<Inquiry> {
    Ok(client
        .patch(format!("/admin/inquiries/{}/status", segment(id)))
        .json(&StatusUpdate { status })?
        .send_data()
        .await?)
}

pub async fn delete(client: &FetchClient, id: &InquiryId) -> ServiceResult<()> {
    client
        .delete(format!("/admin/inquiries/{}", segment(id)))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, mock};
    use serde_json::json;

    fn inquiry_json(id: &str, at: &str) -> serde_json::Value {
        json!({
            "id": id, "name": "Dev", "email": "dev@example.com", "subject": "Sizing",
            "message": "Do you offer alterations?", "status": "open", "createdAt": at
        })
    }

    #[tokio::test]
    async fn test_submit_normalizes() {
        let mock = mock();
        mock.push_json(201, inquiry_json("i1", "2024-01-01T00:00:00Z"));
        let form = NewInquiry {
            name: " Dev ".to_string(),
            email: "DEV@example.com".to_string(),
            phone: Some(String::new()),
            subject: "Sizing".to_string(),
            message: "Do you offer alterations?".to_string(),
        };
        submit(&client(&mock), form).await.unwrap();
        let body = mock.last_request().unwrap().body_json().unwrap();
        assert_eq!(body["name"], "Dev");
        assert_eq!(body["email"], "dev@example.com");
        assert!(body["phone"].is_null());
    }

    #[tokio::test]
    async fn test_submit_invalid_sends_nothing() {
        let mock = mock();
        assert!(submit(&client(&mock), NewInquiry::default()).await.is_err());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_admin_flow() {
        let mock = mock();
        mock.push_json(200, json!([
            inquiry_json("old", "2024-01-01T00:00:00Z"),
            inquiry_json("new", "2024-05-01T00:00:00Z"),
        ]));
        mock.push_json(200, inquiry_json("new", "2024-05-01T00:00:00Z"));
        mock.push_empty();

        let list = admin_list(&client(&mock), Some(InquiryStatus::Open)).await.unwrap();
        assert_eq!(list[0].id.as_str(), "new");
        update_status(&client(&mock), &list[0].id, InquiryStatus::Responded).await.unwrap();
        delete(&client(&mock), &list[1].id).await.unwrap();

        let requests = mock.requests();
        assert!(requests[0].url().ends_with("/admin/inquiries?status=open"));
        assert_eq!(requests[1].body_json().unwrap(), json!({"status": "responded"}));
        assert!(requests[2].url().ends_with("/admin/inquiries/old"));
    }
}
