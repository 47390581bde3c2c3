//! 单个域名的泛解析判定

use std::sync::Arc;

use log::debug;

use crate::dns_resolver::Lookup;
use crate::gen::{random_subdomain, DEFAULT_LABEL_LEN};
use crate::model::Classification;

/// 默认随机探测次数
pub const DEFAULT_TRIALS: usize = 3;

/// 泛解析检测器
///
/// 先解析域名本身得到基准记录，再连续探测若干随机子域名。
/// 每次探测的 A 或 CNAME 集合必须与基准完全一致，全部通过才判定为泛解析；
/// 任意一次不一致立即结束，不再发起后续探测。
pub struct WildcardDetector<L> {
    resolver: Arc<L>,
    trials: usize,
    label_len: usize,
}

impl<L> Clone for WildcardDetector<L> {
    fn clone(&self) -> Self {
        WildcardDetector {
            resolver: Arc::clone(&self.resolver),
            trials: self.trials,
            label_len: self.label_len,
        }
    }
}

impl<L: Lookup> WildcardDetector<L> {
    /// 使用默认探测次数与标签长度
    pub fn new(resolver: Arc<L>) -> Self {
        WildcardDetector {
            resolver,
            trials: DEFAULT_TRIALS,
            label_len: DEFAULT_LABEL_LEN,
        }
    }

    /// 设置探测次数
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// 设置随机标签长度
    pub fn with_label_len(mut self, label_len: usize) -> Self {
        self.label_len = label_len;
        self
    }

    /// 检测域名是否存在泛解析
    pub async fn classify(&self, domain: &str) -> Classification {
        let baseline = self.resolver.probe(domain).await;

        // 自身都无法解析的域名不可能是泛解析
        if baseline.is_unresolved() {
            debug!("{} 基准解析无结果", domain);
            return Classification::NotWildcard;
        }

        for trial in 0..self.trials {
            let test_domain = random_subdomain(domain, self.label_len);
            let probe = self.resolver.probe(&test_domain).await;

            if !baseline.echoed_by(&probe) {
                debug!(
                    "{} 第 {} 次探测未复现基准: A {} / CNAME {}",
                    domain,
                    trial + 1,
                    probe.address,
                    probe.canonical_name
                );
                return Classification::NotWildcard;
            }
        }

        debug!(
            "{} 判定为泛解析: A {} / CNAME {}",
            domain, baseline.address, baseline.canonical_name
        );
        Classification::Wildcard
    }
}
