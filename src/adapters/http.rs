use crate::core::normalizer::parse_records;
use crate::domain::model::RawDoctorRecord;
use crate::domain::ports::{ConfigProvider, DoctorRepository};
use crate::utils::error::{DirectoryError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Fetches the doctor list with a single unauthenticated GET.
#[derive(Debug, Clone)]
pub struct HttpDoctorRepository {
    endpoint: String,
    client: Client,
}

impl HttpDoctorRepository {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;
        Ok(Self {
            endpoint: config.api_endpoint().to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl DoctorRepository for HttpDoctorRepository {
    async fn fetch_raw(&self) -> Result<Vec<RawDoctorRecord>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(DirectoryError::HttpStatusError {
                status: status.as_u16(),
            });
        }

        let values: Vec<Value> = response.json().await?;
        tracing::debug!("Received {} raw doctor records", values.len());
        Ok(parse_records(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct MockConfig {
        api_endpoint: String,
        timeout_seconds: u64,
    }

    impl MockConfig {
        fn new(api_endpoint: String) -> Self {
            Self {
                api_endpoint,
                timeout_seconds: 5,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn timeout_seconds(&self) -> u64 {
            self.timeout_seconds
        }
    }

    #[tokio::test]
    async fn test_fetch_successful_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/doctors.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"id": "1", "name": "Alice", "fees": "₹ 500", "video_consult": true},
                    {"id": "2", "name": "Bob", "specialities": [{"name": "ENT"}]}
                ]));
        });

        let config = MockConfig::new(server.url("/doctors.json"));
        let repository = HttpDoctorRepository::new(&config).unwrap();
        let records = repository.fetch_raw().await.unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_deref(), Some("Alice"));
        assert_eq!(records[0].video_consult, Some(true));
        assert_eq!(records[1].specialities.as_ref().unwrap()[0].name(), "ENT");
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_reported() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/doctors.json");
            then.status(503);
        });

        let config = MockConfig::new(server.url("/doctors.json"));
        let repository = HttpDoctorRepository::new(&config).unwrap();
        let err = repository.fetch_raw().await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, DirectoryError::HttpStatusError { status: 503 }));
    }

    #[tokio::test]
    async fn test_fetch_non_array_body_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/doctors.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"doctors": []}));
        });

        let config = MockConfig::new(server.url("/doctors.json"));
        let repository = HttpDoctorRepository::new(&config).unwrap();
        assert!(repository.fetch_raw().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_keeps_good_records_beside_malformed_ones() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/doctors.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"id": "1", "name": "Alice", "video_consult": true, "in_clinic": false},
                    {"id": "2", "name": "Bob", "video_consult": 1, "in_clinic": 0},
                    {"id": "3", "name": "Cara", "specialities": [{"title": "x"}]},
                    {"id": "4", "clinic": "not an object"},
                    "not a record"
                ]));
        });

        let config = MockConfig::new(server.url("/doctors.json"));
        let repository = HttpDoctorRepository::new(&config).unwrap();
        let records = repository.fetch_raw().await.unwrap();

        let names: Vec<&str> = records.iter().filter_map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Cara"]);
        assert_eq!(records[1].video_consult, Some(true));
        assert_eq!(records[1].in_clinic, Some(false));
        assert!(records[2].specialities.as_ref().unwrap().is_empty());
    }
}
