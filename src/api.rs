//! 过滤流程入口：配置、引擎与汇总结果

use std::sync::Arc;

use log::info;

use crate::batch::{classify_all, DEFAULT_CONCURRENCY};
use crate::dns_resolver::{DnsResolver, Lookup, ResolverSettings};
use crate::error::Result;
use crate::gen::DEFAULT_LABEL_LEN;
use crate::input::DomainSet;
use crate::model::Classification;
use crate::wildcard::{WildcardDetector, DEFAULT_TRIALS};

/// 泛解析过滤配置
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// 同时检测的域名数上限
    pub concurrency: usize,
    /// 每个域名的随机探测次数
    pub trials: usize,
    /// 随机标签长度
    pub label_len: usize,
    /// 解析器配置
    pub resolver: ResolverSettings,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            concurrency: DEFAULT_CONCURRENCY,
            trials: DEFAULT_TRIALS,
            label_len: DEFAULT_LABEL_LEN,
            resolver: ResolverSettings::default(),
        }
    }
}

/// 过滤结果
#[derive(Debug, Clone, Default)]
pub struct FilterReport {
    /// 输入域名总数
    pub total: usize,
    /// 保留的域名，保持输入顺序
    pub retained: Vec<String>,
    /// 被剔除的泛解析域名
    pub wildcard: Vec<String>,
}

/// 泛解析过滤引擎
pub struct WildcardFilterEngine<L> {
    config: FilterConfig,
    detector: WildcardDetector<L>,
}

impl WildcardFilterEngine<DnsResolver> {
    /// 使用配置中的上游服务器创建引擎
    pub fn new(config: FilterConfig) -> Result<Self> {
        let resolver = Arc::new(DnsResolver::new(&config.resolver)?);
        Ok(Self::with_resolver(config, resolver))
    }
}

impl<L: Lookup + 'static> WildcardFilterEngine<L> {
    /// 使用自定义查询实现创建引擎
    pub fn with_resolver(config: FilterConfig, resolver: Arc<L>) -> Self {
        let detector = WildcardDetector::new(resolver)
            .with_trials(config.trials)
            .with_label_len(config.label_len);
        WildcardFilterEngine { config, detector }
    }

    /// 当前配置
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// 检测全部域名并按结论拆分
    ///
    /// 输入先经 [`DomainSet`] 去重（大小写不敏感），重复域名只检测、计数一次。
    /// `on_complete` 在每个域名检测结束时按输入顺序回调。
    pub async fn run<F>(&self, domains: &[String], on_complete: F) -> Result<FilterReport>
    where
        F: FnMut(&str, Classification),
    {
        let mut set = DomainSet::new();
        for domain in domains {
            set.insert(domain);
        }
        let domains = set.into_vec();

        info!(
            "开始检测 {} 个域名，并发 {}，探测 {} 次",
            domains.len(),
            self.config.concurrency,
            self.config.trials
        );

        let outcomes =
            classify_all(&self.detector, &domains, self.config.concurrency, on_complete).await?;

        let mut report = FilterReport {
            total: domains.len(),
            ..Default::default()
        };
        for domain in domains {
            match outcomes.get(&domain) {
                Some(Classification::Wildcard) => report.wildcard.push(domain),
                _ => report.retained.push(domain),
            }
        }

        info!(
            "检测完成: 保留 {} 个，剔除泛解析 {} 个",
            report.retained.len(),
            report.wildcard.len()
        );
        Ok(report)
    }
}

/// 使用默认配置过滤泛解析域名，输入会先去重
pub async fn filter_wildcard_domains(domains: Vec<String>) -> Result<FilterReport> {
    let engine = WildcardFilterEngine::new(FilterConfig::default())?;
    engine.run(&domains, |_, _| {}).await
}
