//! 过滤流程的错误类型

use thiserror::Error;

/// 泛解析过滤过程中的错误
///
/// 单次 DNS 查询失败不在此列，查询层会将其折叠为 [`RecordSet::Absent`](crate::model::RecordSet::Absent)。
#[derive(Debug, Error)]
pub enum FilterError {
    /// 域名文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 文件路径
        path: String,
    },

    /// 读写文件失败
    #[error("读写文件失败 {path}: {source}")]
    Io {
        /// 文件路径
        path: String,
        /// 底层 I/O 错误
        #[source]
        source: std::io::Error,
    },

    /// 没有配置上游 DNS 服务器
    #[error("上游 DNS 服务器列表为空")]
    NoNameservers,

    /// 检测任务 panic 或被取消
    #[error("检测任务异常退出: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// 并发闸门被关闭
    #[error("并发控制信号量已关闭")]
    SemaphoreClosed(#[from] tokio::sync::AcquireError),
}

impl FilterError {
    /// 根据 I/O 错误类型构造，`NotFound` 单独归类
    pub fn from_io(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            FilterError::FileNotFound { path }
        } else {
            FilterError::Io { path, source }
        }
    }
}

/// 本 crate 的 Result 别名
pub type Result<T> = std::result::Result<T, FilterError>;
