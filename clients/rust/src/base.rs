use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

pub(crate) struct BaseClient {
    client: Client,
    address: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    BadClientData,
    NotFound,
    /// The recipient is not enrolled in the course
    Forbidden,
    Conflict,
    UnexpectedStatusCode,
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    pub status: Option<StatusCode>,
    pub message: String,
}

impl APIError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            variant: APIErrorVariant::Network,
            status: None,
            message: e.to_string(),
        }
    }
}

pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            client: Client::new(),
            address,
        }
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let url = format!("{}/api/v1/{}", self.address, path);
        self.client.request(method, &url)
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let status = res.status();
        if status != expected_status_code {
            let variant = match status {
                StatusCode::BAD_REQUEST => APIErrorVariant::BadClientData,
                StatusCode::NOT_FOUND => APIErrorVariant::NotFound,
                StatusCode::FORBIDDEN => APIErrorVariant::Forbidden,
                StatusCode::CONFLICT => APIErrorVariant::Conflict,
                _ => APIErrorVariant::UnexpectedStatusCode,
            };
            let message = res.text().await.unwrap_or_default();
            return Err(APIError {
                variant,
                status: Some(status),
                message,
            });
        }

        res.json::<T>().await.map_err(|e| APIError {
            variant: APIErrorVariant::MalformedResponse,
            status: Some(status),
            message: e.to_string(),
        })
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .get_client(Method::GET, path)
            .send()
            .await
            .map_err(APIError::network)?;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn delete<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .get_client(Method::DELETE, path)
            .send()
            .await
            .map_err(APIError::network)?;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn put<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .get_client(Method::PUT, path)
            .json(&body)
            .send()
            .await
            .map_err(APIError::network)?;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .get_client(Method::POST, path)
            .json(&body)
            .send()
            .await
            .map_err(APIError::network)?;
        self.handle_api_response(res, expected_status_code).await
    }
}
