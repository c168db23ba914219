//! HTTP implementation of [`TodoApi`] over the `/api/todos` REST endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Task, TaskId},
    protocol::{CreateTaskRequest, UpdateTaskRequest},
};
use url::Url;

use crate::{
    config::ClientSettings,
    error::{RemoteCallError, RemoteOperation},
    TodoApi,
};

pub struct HttpTodoApi {
    http: Client,
    collection_url: Url,
}

impl HttpTodoApi {
    pub fn new(collection_url: Url) -> Self {
        Self {
            http: Client::new(),
            collection_url,
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> anyhow::Result<Self> {
        Ok(Self::new(settings.api_url()?))
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    pub(crate) fn task_url(&self, operation: RemoteOperation, id: &TaskId) -> Result<Url, RemoteCallError> {
        let mut url = self.collection_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                RemoteCallError::new(
                    operation,
                    format!("api url '{}' cannot carry a task id", self.collection_url),
                )
            })?;
            segments.pop_if_empty().push(id.as_str());
        }
        Ok(url)
    }
}

fn checked(
    operation: RemoteOperation,
    sent: reqwest::Result<Response>,
) -> Result<Response, RemoteCallError> {
    sent.and_then(Response::error_for_status)
        .map_err(|err| RemoteCallError::from_http(operation, err))
}

async fn decode<T: DeserializeOwned>(
    operation: RemoteOperation,
    response: Response,
) -> Result<T, RemoteCallError> {
    response
        .json()
        .await
        .map_err(|err| RemoteCallError::from_http(operation, err))
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<Task>, RemoteCallError> {
        let op = RemoteOperation::List;
        let response = checked(op, self.http.get(self.collection_url.clone()).send().await)?;
        decode(op, response).await
    }

    async fn create(&self, request: CreateTaskRequest) -> Result<Task, RemoteCallError> {
        let op = RemoteOperation::Create;
        let response = checked(
            op,
            self.http
                .post(self.collection_url.clone())
                .json(&request)
                .send()
                .await,
        )?;
        decode(op, response).await
    }

    async fn update(
        &self,
        id: &TaskId,
        request: UpdateTaskRequest,
    ) -> Result<Task, RemoteCallError> {
        let op = RemoteOperation::Update;
        let url = self.task_url(op, id)?;
        let response = checked(op, self.http.put(url).json(&request).send().await)?;
        decode(op, response).await
    }

    async fn delete(&self, id: &TaskId) -> Result<(), RemoteCallError> {
        let op = RemoteOperation::Delete;
        let url = self.task_url(op, id)?;
        checked(op, self.http.delete(url).send().await)?;
        Ok(())
    }
}
