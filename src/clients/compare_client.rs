/// 比对服务 API 客户端
///
/// 封装所有与比对服务相关的 HTTP 调用，只返回原始响应体，不解释结果
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{CompareOptions, ExportRequest, UploadedFile};

/// 比对服务接口
///
/// 控制器只依赖这个 trait，测试中可以替换为脚本化的实现
#[async_trait]
pub trait CompareApi: Send + Sync {
    /// `POST /compare`，返回原始 JSON
    async fn compare(
        &self,
        original: &UploadedFile,
        modified: &UploadedFile,
        options: &CompareOptions,
    ) -> Result<Value, ApiError>;

    /// 导出接口，返回二进制文档
    async fn export(&self, request: ExportRequest<'_>) -> Result<Vec<u8>, ApiError>;
}

/// 基于 reqwest 的比对服务客户端
///
/// 不设置超时：请求一旦发出就不可取消
pub struct CompareClient {
    http: Client,
    base_url: String,
}

impl CompareClient {
    /// 创建新的比对服务客户端
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.api_base_url.clone())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// 健康检查 `GET /health`
    pub async fn health(&self) -> Result<bool, ApiError> {
        let endpoint = "/health";
        let response = send(self.http.get(self.url(endpoint)), endpoint).await?;
        let body: Value = read_json(response, endpoint).await?;

        Ok(body.get("status").and_then(|v| v.as_str()) == Some("ok"))
    }
}

#[async_trait]
impl CompareApi for CompareClient {
    async fn compare(
        &self,
        original: &UploadedFile,
        modified: &UploadedFile,
        options: &CompareOptions,
    ) -> Result<Value, ApiError> {
        let endpoint = "/compare";
        let options_json =
            serde_json::to_string(options).map_err(|e| ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        debug!(
            "发送比对请求: {} ({} 字节) vs {} ({} 字节), 选项: {}",
            original.file_name,
            original.bytes.len(),
            modified.file_name,
            modified.bytes.len(),
            options_json
        );

        let form = Form::new()
            .part("original", file_part(original, endpoint)?)
            .part("modified", file_part(modified, endpoint)?)
            .text("options", options_json);

        let response = send(self.http.post(self.url(endpoint)).multipart(form), endpoint).await?;
        read_json(response, endpoint).await
    }

    async fn export(&self, request: ExportRequest<'_>) -> Result<Vec<u8>, ApiError> {
        let endpoint = request.endpoint();
        let builder = self.http.post(self.url(endpoint));

        let builder = match &request {
            ExportRequest::LegacyPdf(payload) => builder.json(payload),
            ExportRequest::LegacyDocx { original, payload } => {
                let payload_json =
                    serde_json::to_string(payload).map_err(|e| ApiError::JsonParseFailed {
                        endpoint: endpoint.to_string(),
                        source: e,
                    })?;
                let form = Form::new()
                    .part("original", file_part(original, endpoint)?)
                    .text("payload", payload_json);
                builder.multipart(form)
            }
            ExportRequest::PdfFromDocx(payload) => builder.json(payload),
            ExportRequest::DocxFromOoxml(payload) => builder.json(payload),
        };

        debug!("发送导出请求: {}", endpoint);

        let response = send(builder, endpoint).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| request_failed(endpoint, e))?;

        debug!("导出完成: {} ({} 字节)", endpoint, bytes.len());

        Ok(bytes.to_vec())
    }
}

/// 构建 multipart 文件部分
fn file_part(file: &UploadedFile, endpoint: &str) -> Result<Part, ApiError> {
    Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)
        .map_err(|e| request_failed(endpoint, e))
}

/// 发送请求，非 2xx 时保留原始错误体（按字节）
async fn send(builder: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
    let response = builder.send().await.map_err(|e| {
        warn!("请求 {} 失败: {}", endpoint, e);
        request_failed(endpoint, e)
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.bytes().await {
        Ok(bytes) if !bytes.is_empty() => Some(bytes.to_vec()),
        Ok(_) => None,
        Err(e) => {
            debug!("读取错误响应体失败 ({}): {}", endpoint, e);
            None
        }
    };

    warn!("{} 返回 HTTP {}", endpoint, status.as_u16());

    Err(ApiError::BadStatus {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    })
}

async fn read_json(response: Response, endpoint: &str) -> Result<Value, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| request_failed(endpoint, e))?;

    serde_json::from_slice(&bytes).map_err(|e| ApiError::JsonParseFailed {
        endpoint: endpoint.to_string(),
        source: e,
    })
}

fn request_failed(endpoint: &str, e: reqwest::Error) -> ApiError {
    ApiError::RequestFailed {
        endpoint: endpoint.to_string(),
        source: Box::new(e),
    }
}
