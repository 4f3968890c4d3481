use reqwest::multipart;
use tracing::{debug, warn};

use crate::errors::{ApiError, AppError};
use crate::schema::auth::EmailAndPassword;
use crate::schema::{Course, CourseDraft, CoursesResponse, CredentialRecord, CreateCourseResponse, LoginResponse};
use crate::session::{Role, SessionStore};

pub struct CatalogService{
    client: reqwest::Client,
    base_url: String,
}

impl CatalogService {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://"){
            return Err(AppError::BadBackendUrl);
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|_e| AppError::HttpClient)?;

        Ok(CatalogService {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_courses(&self, store: &SessionStore) -> Result<Vec<Course>, ApiError> {
        let mut request = self.client.get(self.url("/course/courses"));

        // credentials are optional on the catalog endpoint
        if let Some(token) = store.session(Role::User).token(){
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(ApiError::from_transport)?;
        let body = success_body(response).await?;

        let decoded = serde_json::from_slice::<CoursesResponse>(&body).map_err(|_e| ApiError::Decode)?;
        debug!(count = decoded.courses.len(), "fetched course list");
        Ok(decoded.courses)
    }

    pub async fn create_course(&self, store: &SessionStore, draft: CourseDraft) -> Result<Course, ApiError> {
        let image_name = draft.image
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("image"));

        let image_bytes = tokio::fs::read(&draft.image)
            .await
            .map_err(|e| ApiError::Network(format!("cant read image file: {}", e)))?;

        let form = multipart::Form::new()
            .text("title", draft.title)
            .text("description", draft.description)
            .text("price", draft.price)
            .part("image", multipart::Part::bytes(image_bytes).file_name(image_name));

        // an absent admin token goes out as an empty value, the server rejects it
        let token = store.session(Role::Admin).token().unwrap_or("").to_string();

        let response = self.client
            .post(self.url("/course/create"))
            .header("Authorization", format!("Bearer {}", token))
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let body = success_body(response).await?;

        let decoded = serde_json::from_slice::<CreateCourseResponse>(&body).map_err(|_e| ApiError::Decode)?;

        match decoded.course {
            Some(course) => Ok(course),
            None => Err(ApiError::Decode),
        }
    }

    pub async fn login(&self, role: Role, email: &str, password: &str) -> Result<CredentialRecord, ApiError> {
        let credentials = EmailAndPassword {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self.client
            .post(self.url(&format!("/{}/login", role.as_str())))
            .json(&credentials)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let body = success_body(response).await?;

        let decoded = serde_json::from_slice::<LoginResponse>(&body).map_err(|_e| ApiError::Decode)?;
        Ok(decoded.into())
    }

    // the caller discards its credential whatever this returns
    pub async fn logout(&self, store: &SessionStore) -> Result<(), ApiError> {
        let token = store.session(Role::User).token().unwrap_or("").to_string();

        let response = self.client
            .get(self.url("/user/logout"))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if let Err(e) = success_body(response).await {
            warn!("logout request failed: {}", e);
            return Err(e);
        }

        Ok(())
    }
}

async fn success_body(response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(ApiError::from_transport)?;

    if !status.is_success(){
        return Err(ApiError::from_status(status, &bytes));
    }

    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn test_base_url_must_be_http(){
        assert!(CatalogService::new("ftp://backend").is_err());
        assert!(CatalogService::new("http://127.0.0.1:4001/api/v1").is_ok());
    }

    #[test]
    fn test_trailing_slash_is_trimmed(){
        let service = CatalogService::new("http://127.0.0.1:4001/api/v1/").unwrap();
        assert_eq!(service.url("/course/courses"), "http://127.0.0.1:4001/api/v1/course/courses");
    }
}
