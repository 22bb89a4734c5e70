use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{CoverLetterService, HealthStatus, ServiceError};
use crate::config::Config;
use crate::form::submission::{FormSubmission, JobDescription};
use crate::page::form_data::UploadedFile;
use crate::page::ids;

/// Correlates a request with the backend's own request logs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// reqwest-backed client for the generation backend.
#[derive(Clone)]
pub struct HttpCoverLetterService {
    client: Client,
    generate_url: String,
    health_url: String,
}

impl HttpCoverLetterService {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .user_agent(format!("cover-letter/{}", config.version))
            .build()
            .map_err(|e| ServiceError::Build(e.to_string()))?;

        Ok(Self {
            client,
            generate_url: config.generate_endpoint(),
            health_url: config.health_endpoint(),
        })
    }
}

#[async_trait]
impl CoverLetterService for HttpCoverLetterService {
    async fn generate(&self, submission: &FormSubmission) -> Result<String, ServiceError> {
        let request_id = Uuid::new_v4();
        let form = build_multipart(submission)?;

        info!(
            %request_id,
            mode = %submission.job_desc_type(),
            "Requesting cover letter from {}",
            self.generate_url
        );

        let response = self
            .client
            .post(&self.generate_url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%request_id, "Cover letter service returned {}: {}", status, body);
            return Err(ServiceError::Status {
                status: status.as_u16(),
            });
        }

        let letter = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        debug!(%request_id, "Cover letter received: {} characters", letter.len());
        Ok(letter)
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        let response = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

/// Multipart body: `cv_file`, `job_desc_type`, then exactly one of
/// `job_desc_text`/`job_desc_image`, then the optional fields.
fn build_multipart(submission: &FormSubmission) -> Result<Form, ServiceError> {
    let mut form = Form::new()
        .part(ids::CV_FILE, file_part(&submission.cv_file)?)
        .text(ids::JOB_DESC_TYPE, submission.job_desc_type().as_str());

    form = match &submission.job_description {
        JobDescription::Text(text) => form.text(ids::JOB_DESC_TEXT, text.clone()),
        JobDescription::Image(image) => form.part(ids::JOB_DESC_IMAGE, file_part(image)?),
    };

    if let Some(company) = &submission.company_name {
        form = form.text(ids::COMPANY_NAME, company.clone());
    }
    if let Some(limit) = submission.word_limit {
        form = form.text(ids::WORD_LIMIT, limit.to_string());
    }

    Ok(form)
}

fn file_part(file: &UploadedFile) -> Result<Part, ServiceError> {
    Part::bytes(file.bytes.to_vec())
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)
        .map_err(|e| ServiceError::Multipart(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Multipart, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    #[derive(Debug, Clone)]
    struct SeenField {
        name: String,
        file_name: Option<String>,
        content_type: Option<String>,
        data: Vec<u8>,
    }

    #[derive(Clone, Default)]
    struct Seen {
        fields: Arc<Mutex<Vec<SeenField>>>,
        request_ids: Arc<Mutex<Vec<String>>>,
    }

    async fn capture(
        State(seen): State<Seen>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> &'static str {
        if let Some(id) = headers.get(REQUEST_ID_HEADER) {
            seen.request_ids
                .lock()
                .unwrap()
                .push(id.to_str().unwrap().to_string());
        }
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.unwrap().to_vec();
            seen.fields.lock().unwrap().push(SeenField {
                name,
                file_name,
                content_type,
                data,
            });
        }
        "Dear Hiring Manager..."
    }

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn service_for(base_url: &str) -> HttpCoverLetterService {
        HttpCoverLetterService::new(&Config::for_base_url(base_url)).unwrap()
    }

    fn cv() -> UploadedFile {
        UploadedFile::new("resume.pdf", "application/pdf", "%PDF-1.7 resume")
    }

    fn names(seen: &Seen) -> Vec<String> {
        seen.fields
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.name.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_text_submission_sends_text_fields_only() {
        let seen = Seen::default();
        let router = Router::new()
            .route("/generate_cover_letter", post(capture))
            .with_state(seen.clone());
        let base = spawn_backend(router).await;

        let submission = FormSubmission {
            cv_file: cv(),
            job_description: JobDescription::Text("Rust developer wanted".to_string()),
            company_name: Some("Acme".to_string()),
            word_limit: Some(300),
        };

        let letter = service_for(&base).generate(&submission).await.unwrap();
        assert_eq!(letter, "Dear Hiring Manager...");

        assert_eq!(
            names(&seen),
            vec!["cv_file", "job_desc_type", "job_desc_text", "company_name", "word_limit"]
        );

        let fields = seen.fields.lock().unwrap().clone();
        assert_eq!(fields[0].file_name.as_deref(), Some("resume.pdf"));
        assert_eq!(fields[0].content_type.as_deref(), Some("application/pdf"));
        assert_eq!(fields[0].data, b"%PDF-1.7 resume".to_vec());
        assert_eq!(fields[1].data, b"text".to_vec());
        assert_eq!(fields[2].data, b"Rust developer wanted".to_vec());
        assert_eq!(fields[4].data, b"300".to_vec());

        let request_ids = seen.request_ids.lock().unwrap().clone();
        assert_eq!(request_ids.len(), 1);
        assert!(Uuid::parse_str(&request_ids[0]).is_ok());
    }

    #[tokio::test]
    async fn test_image_submission_sends_image_only() {
        let seen = Seen::default();
        let router = Router::new()
            .route("/generate_cover_letter", post(capture))
            .with_state(seen.clone());
        let base = spawn_backend(router).await;

        let submission = FormSubmission {
            cv_file: cv(),
            job_description: JobDescription::Image(UploadedFile::new(
                "posting.png",
                "image/png",
                vec![0x89, b'P', b'N', b'G'],
            )),
            company_name: None,
            word_limit: None,
        };

        service_for(&base).generate(&submission).await.unwrap();

        assert_eq!(names(&seen), vec!["cv_file", "job_desc_type", "job_desc_image"]);
        let fields = seen.fields.lock().unwrap().clone();
        assert_eq!(fields[1].data, b"image".to_vec());
        assert_eq!(fields[2].file_name.as_deref(), Some("posting.png"));
        assert_eq!(fields[2].content_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let router = Router::new().route(
            "/generate_cover_letter",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    r#"{"detail":"Error generating cover letter"}"#,
                )
            }),
        );
        let base = spawn_backend(router).await;

        let submission = FormSubmission {
            cv_file: cv(),
            job_description: JobDescription::Text("Rust".to_string()),
            company_name: None,
            word_limit: None,
        };

        let err = service_for(&base).generate(&submission).await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 500 }));
        assert_eq!(err.to_string(), "Network response was not ok: 500");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let submission = FormSubmission {
            cv_file: cv(),
            job_description: JobDescription::Text("Rust".to_string()),
            company_name: None,
            word_limit: None,
        };

        let err = service_for(&format!("http://{addr}"))
            .generate(&submission)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
    }

    #[tokio::test]
    async fn test_health_decodes_status() {
        let router = Router::new().route(
            "/health",
            get(|| async {
                Json(json!({
                    "status": "healthy",
                    "api_version": "1.0.0",
                    "environment": "production",
                    "system": { "cpu_usage_percent": 3.5 }
                }))
            }),
        );
        let base = spawn_backend(router).await;

        let health = service_for(&base).health().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.api_version.as_deref(), Some("1.0.0"));
        assert_eq!(health.environment.as_deref(), Some("production"));
    }

    #[tokio::test]
    async fn test_health_rejects_non_json() {
        let router = Router::new().route("/health", get(|| async { "ok" }));
        let base = spawn_backend(router).await;

        let err = service_for(&base).health().await.unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }
}
