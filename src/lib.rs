//! # Redline Client
//!
//! 文档比对服务的客户端：选择两个文件，调用远端比对服务，预览 redline 结果，
//! 并导出为 PDF 或修订跟踪的 DOCX。比对算法、OCR、渲染都在服务端。
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 只负责 HTTP 调用，返回原始响应体
//! - `CompareApi` - 控制器依赖的接口，`CompareClient` 是基于 reqwest 的实现
//!
//! ### ② 业务能力层（Services）
//! - `normalizer` - 按字段判定响应变体（legacy / OOXML）
//! - `error_decoder` - 把按二进制接收的错误体还原为文本
//! - `export_pipeline` - 选择导出请求形态，交付下载
//! - `download` - 作用域内的临时下载句柄
//! - `sanitizer` / `preview` / `summary` - 预览与摘要
//!
//! ### ③ 流程层（Workflow）
//! - `WorkflowState` - 不可变状态值与纯函数迁移
//! - `WorkflowController` - 槽位、选项、比对与导出的状态机
//!
//! ### ④ 编排层（App）
//! - `App` - 命令行一次性流程
//!
//! ## 模块结构

pub mod app;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, RunStats};
pub use cli::Cli;
pub use clients::{CompareApi, CompareClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{CompareMode, CompareOptions, DiffResult, ExportKind, Stats, UploadedFile};
pub use workflow::{ExportOutcome, Phase, ProcessResult, WorkflowController};
