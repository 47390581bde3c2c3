//! 批量检测的并发控制
//!
//! 每个域名对应一个 tokio 任务，全局信号量限制同时进行网络 I/O 的检测数量。
//! 任务持有许可直到该域名的全部查询结束。

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::dns_resolver::Lookup;
use crate::error::Result;
use crate::model::Classification;
use crate::wildcard::WildcardDetector;

/// 默认并发上限
pub const DEFAULT_CONCURRENCY: usize = 200;

/// 并发检测全部域名
///
/// `on_complete` 按提交顺序回调（而不是完成顺序），用于进度显示。
/// 所有任务结束后才返回完整的结果表。
pub async fn classify_all<L, F>(
    detector: &WildcardDetector<L>,
    domains: &[String],
    concurrency: usize,
    mut on_complete: F,
) -> Result<HashMap<String, Classification>>
where
    L: Lookup + 'static,
    F: FnMut(&str, Classification),
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let tasks: Vec<_> = domains
        .iter()
        .map(|domain| {
            let permit = Arc::clone(&semaphore);
            let detector = detector.clone();
            let domain = domain.clone();
            tokio::spawn(async move {
                let _permit = permit.acquire_owned().await?;
                Ok::<_, tokio::sync::AcquireError>(detector.classify(&domain).await)
            })
        })
        .collect();

    let mut results = HashMap::with_capacity(domains.len());
    for (domain, task) in domains.iter().zip(tasks) {
        let outcome = task.await??;
        on_complete(domain, outcome);
        results.insert(domain.clone(), outcome);
    }

    Ok(results)
}
