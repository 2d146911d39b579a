#![allow(dead_code)]

use async_trait::async_trait;
use redline_client::clients::CompareApi;
use redline_client::error::{AppResult, ApiError};
use redline_client::models::{CompareOptions, ExportRequest, UploadedFile};
use redline_client::services::{DownloadSink, HandleId};
use redline_client::workflow::{Notifier, UserNotice, WorkflowController};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const DOCX_B64: &str = "UEsDBBQAAAAIAA==";
pub const OTHER_DOCX_B64: &str = "UEsDBAoAAAAAAA==";

/// 记录下来的一次调用
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Compare {
        original: String,
        modified: String,
        options: Value,
    },
    Export {
        endpoint: &'static str,
        body: Value,
        attached: Option<String>,
    },
}

/// 脚本化的比对服务
#[derive(Default)]
pub struct MockApi {
    compare_responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    export_responses: Mutex<VecDeque<Result<Vec<u8>, ApiError>>>,
    compare_gate: Mutex<Option<Arc<Notify>>>,
    export_gate: Mutex<Option<Arc<Notify>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_compare(&self, response: Result<Value, ApiError>) {
        self.compare_responses.lock().unwrap().push_back(response);
    }

    pub fn push_export(&self, response: Result<Vec<u8>, ApiError>) {
        self.export_responses.lock().unwrap().push_back(response);
    }

    /// 之后的比对请求会挂起，直到返回的 Notify 被触发
    pub fn gate_compares(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.compare_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// 之后的导出请求会挂起，直到返回的 Notify 被触发
    pub fn gate_exports(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.export_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn compare_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, RecordedCall::Compare { .. }))
            .count()
    }

    pub fn export_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, RecordedCall::Export { .. }))
            .collect()
    }
}

#[async_trait]
impl CompareApi for MockApi {
    async fn compare(
        &self,
        original: &UploadedFile,
        modified: &UploadedFile,
        options: &CompareOptions,
    ) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall::Compare {
            original: original.file_name.clone(),
            modified: modified.file_name.clone(),
            options: serde_json::to_value(options).unwrap(),
        });

        let gate = self.compare_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.compare_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unreachable_backend("/compare")))
    }

    async fn export(&self, request: ExportRequest<'_>) -> Result<Vec<u8>, ApiError> {
        let endpoint = request.endpoint();
        let (body, attached) = match &request {
            ExportRequest::LegacyPdf(p) => (serde_json::to_value(p).unwrap(), None),
            ExportRequest::LegacyDocx { original, payload } => (
                serde_json::to_value(payload).unwrap(),
                Some(original.file_name.clone()),
            ),
            ExportRequest::PdfFromDocx(p) => (serde_json::to_value(p).unwrap(), None),
            ExportRequest::DocxFromOoxml(p) => (serde_json::to_value(p).unwrap(), None),
        };
        self.calls.lock().unwrap().push(RecordedCall::Export {
            endpoint,
            body,
            attached,
        });

        let gate = self.export_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.export_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unreachable_backend(endpoint)))
    }
}

pub fn unreachable_backend(endpoint: &str) -> ApiError {
    ApiError::RequestFailed {
        endpoint: endpoint.to_string(),
        source: "connection refused".into(),
    }
}

pub fn bad_status(endpoint: &str, status: u16, body: &[u8]) -> ApiError {
    ApiError::BadStatus {
        endpoint: endpoint.to_string(),
        status,
        body: Some(body.to_vec()),
    }
}

/// 统计句柄创建/释放次数的内存下载目标
#[derive(Default)]
pub struct MemorySink {
    next_id: AtomicU64,
    created: AtomicUsize,
    released: AtomicUsize,
    fail_trigger: AtomicBool,
    staged: Mutex<HashMap<HandleId, Vec<u8>>>,
    downloads: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let sink = Self::default();
        sink.fail_trigger.store(true, Ordering::SeqCst);
        Arc::new(sink)
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn downloads(&self) -> Vec<(String, Vec<u8>)> {
        self.downloads.lock().unwrap().clone()
    }
}

impl DownloadSink for MemorySink {
    fn create_handle(&self, bytes: &[u8]) -> AppResult<HandleId> {
        let handle = HandleId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.staged.lock().unwrap().insert(handle, bytes.to_vec());
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(handle)
    }

    fn trigger(&self, handle: HandleId, file_name: &str) -> AppResult<PathBuf> {
        if self.fail_trigger.load(Ordering::SeqCst) {
            return Err(redline_client::AppError::Other("download blocked".to_string()));
        }
        let bytes = self.staged.lock().unwrap().get(&handle).cloned().unwrap();
        self.downloads
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes));
        Ok(PathBuf::from(file_name))
    }

    fn release(&self, handle: HandleId) {
        self.staged.lock().unwrap().remove(&handle);
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// 记录通知的渠道
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<UserNotice>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notices(&self) -> Vec<UserNotice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &UserNotice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

/// 测试夹具
pub struct Harness {
    pub api: Arc<MockApi>,
    pub sink: Arc<MemorySink>,
    pub notifier: Arc<RecordingNotifier>,
    pub controller: WorkflowController,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_sink(MemorySink::new())
    }

    pub fn with_sink(sink: Arc<MemorySink>) -> Self {
        let api = MockApi::new();
        let notifier = RecordingNotifier::new();
        let controller = WorkflowController::new(api.clone(), sink.clone(), notifier.clone());
        Self {
            api,
            sink,
            notifier,
            controller,
        }
    }

    /// 两个槽位都已选择
    pub fn staged() -> Self {
        let harness = Self::new();
        harness.stage_files();
        harness
    }

    pub fn stage_files(&self) {
        self.controller
            .select_original(UploadedFile::new("contract_v1.docx", b"PK-original".to_vec()));
        self.controller
            .select_modified(UploadedFile::new("contract_v2.docx", b"PK-modified".to_vec()));
    }
}

pub fn ooxml_response(b64: &str, total: u64) -> Value {
    json!({
        "docx_bytes_b64": b64,
        "stats": {"insertions": total, "deletions": 0, "moves": 0, "total": total},
        "meta": {"engine": "ooxml"}
    })
}

pub fn legacy_response() -> Value {
    json!({
        "paragraphs": [
            {"html": "<p>Hello <span class=\"diff-delete line-through\">world.</span><span class=\"diff-insert\">brave world!</span></p>"},
            {"html": "<p onmouseover=\"steal()\">Unchanged<script>alert(1)</script></p>"}
        ],
        "stats": {"insertions": 2, "deletions": 1, "moves": 0, "total": 3},
        "meta": {"sourceTypes": {"original": "mixed", "modified": "mixed"}}
    })
}
