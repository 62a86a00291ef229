//! Typed remote client for the transcript HTTP service.
//! All reqwest usage is localized here; non-2xx responses become
//! [`ClientError::Api`] carrying the status and the body's message.

use models::wire::{AddGradeRequest, CreateStudentRequest, CreatedStudent, GradeReport};
use models::{StudentId, Transcript};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{status}: {message}")]
    Api { status: u16, message: String },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct TranscriptClient {
    http: reqwest::Client,
    base_url: String,
}

impl TranscriptClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http: reqwest::Client::new(), base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pull the human-readable message out of an error body, falling back to
    /// the raw text.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("detail")
                    .and_then(|d| d.as_str())
                    .or_else(|| v.get("error").and_then(|e| e.as_str()))
                    .map(str::to_string)
            })
            .unwrap_or(body);
        Err(ClientError::Api { status: status.as_u16(), message })
    }

    pub async fn add_student(&self, name: &str) -> Result<CreatedStudent, ClientError> {
        let req = CreateStudentRequest { student_name: Some(name.to_string()) };
        let resp = self.http.post(self.url("/transcripts")).json(&req).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn get_student_ids(&self, name: &str) -> Result<Vec<StudentId>, ClientError> {
        let resp = self
            .http
            .get(self.url("/studentids"))
            .query(&[("name", name)])
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn get_transcript(&self, id: StudentId) -> Result<Transcript, ClientError> {
        let resp = self.http.get(self.url(&format!("/transcripts/{id}"))).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn get_all_transcripts(&self) -> Result<Vec<Transcript>, ClientError> {
        let resp = self.http.get(self.url("/transcripts")).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn delete_student(&self, id: StudentId) -> Result<(), ClientError> {
        let resp = self.http.delete(self.url(&format!("/transcripts/{id}"))).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    pub async fn add_grade(
        &self,
        id: StudentId,
        course: &str,
        grade: f64,
    ) -> Result<(), ClientError> {
        self.add_grade_json(id, course, serde_json::json!(grade)).await
    }

    /// Send an arbitrary JSON value as the grade. Exists so callers (and
    /// tests) can exercise the service's 400 path for non-numeric grades.
    pub async fn add_grade_json(
        &self,
        id: StudentId,
        course: &str,
        grade: serde_json::Value,
    ) -> Result<(), ClientError> {
        let req = AddGradeRequest { grade };
        let resp = self
            .http
            .post(self.url(&format!("/transcripts/{id}/{course}")))
            .json(&req)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    pub async fn get_grade(&self, id: StudentId, course: &str) -> Result<GradeReport, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/transcripts/{id}/{course}")))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }
}
