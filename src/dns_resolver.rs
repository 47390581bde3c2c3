//! 基于 trust-dns 的 A / CNAME 查询

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::time::timeout;
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::proto::rr::{RData, RecordType};
use trust_dns_resolver::TokioAsyncResolver;

use crate::error::{FilterError, Result};
use crate::model::{ProbeResult, RecordKind, RecordSet};

/// 默认上游 DNS 服务器
pub const DEFAULT_NAMESERVERS: [IpAddr; 2] = [
    IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
    IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
];

/// 单次查询的最长生命周期
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// 解析器配置，启动时确定，运行期间只读
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// 上游服务器列表，不能为空
    pub nameservers: Vec<IpAddr>,
    /// 上游端口
    pub port: u16,
    /// 单次查询超时
    pub timeout: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        ResolverSettings {
            nameservers: DEFAULT_NAMESERVERS.to_vec(),
            port: 53,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// 记录查询接口
///
/// 任何失败都返回 [`RecordSet::Absent`]，调用方不区分失败原因。
#[async_trait]
pub trait Lookup: Send + Sync {
    /// 查询 `name` 的 `kind` 类型记录
    async fn lookup(&self, name: &str, kind: RecordKind) -> RecordSet;

    /// 同时查询 A 与 CNAME
    async fn probe(&self, name: &str) -> ProbeResult {
        let (address, canonical_name) = tokio::join!(
            self.lookup(name, RecordKind::Address),
            self.lookup(name, RecordKind::CanonicalName)
        );
        ProbeResult {
            address,
            canonical_name,
        }
    }
}

/// 基于 trust-dns 的解析器
pub struct DnsResolver {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl DnsResolver {
    /// 按配置创建解析器，上游服务器列表为空时报错
    pub fn new(settings: &ResolverSettings) -> Result<Self> {
        if settings.nameservers.is_empty() {
            return Err(FilterError::NoNameservers);
        }

        let group =
            NameServerConfigGroup::from_ips_clear(&settings.nameservers, settings.port, true);
        let config = ResolverConfig::from_parts(None, vec![], group);

        let mut opts = ResolverOpts::default();
        opts.timeout = settings.timeout;
        opts.attempts = 1;
        opts.use_hosts_file = false;

        Ok(DnsResolver {
            resolver: TokioAsyncResolver::tokio(config, opts),
            timeout: settings.timeout,
        })
    }

    async fn query(&self, name: &str, kind: RecordKind) -> std::result::Result<Vec<String>, String> {
        let record_type = match kind {
            RecordKind::Address => RecordType::A,
            RecordKind::CanonicalName => RecordType::CNAME,
        };

        let response = timeout(self.timeout, self.resolver.lookup(name, record_type))
            .await
            .map_err(|_| format!("超时 {:?}", self.timeout))?
            .map_err(|e| e.to_string())?;

        Ok(record_values(kind, response.iter()))
    }
}

/// 从应答中取出目标类型的记录值
///
/// 应答中可能夹带 CNAME 链上的中间记录，只保留 `kind` 对应的类型；CNAME 去掉末尾的点。
fn record_values<'a>(kind: RecordKind, records: impl IntoIterator<Item = &'a RData>) -> Vec<String> {
    records
        .into_iter()
        .filter_map(|record| match (kind, record) {
            (RecordKind::Address, RData::A(a)) => Some(a.0.to_string()),
            (RecordKind::CanonicalName, RData::CNAME(cname)) => {
                Some(cname.to_string().trim_end_matches('.').to_string())
            }
            _ => None,
        })
        .collect()
}

#[async_trait]
impl Lookup for DnsResolver {
    async fn lookup(&self, name: &str, kind: RecordKind) -> RecordSet {
        match self.query(name, kind).await {
            Ok(values) => RecordSet::present(values),
            Err(reason) => {
                debug!("{} {} 查询失败: {}", name, kind, reason);
                RecordSet::Absent
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trust_dns_resolver::proto::rr::rdata::{A, CNAME};
    use trust_dns_resolver::Name;

    fn cname(target: &str) -> RData {
        RData::CNAME(CNAME(Name::from_ascii(target).unwrap()))
    }

    fn a(ip: [u8; 4]) -> RData {
        RData::A(A(Ipv4Addr::from(ip)))
    }

    #[test]
    fn test_default_settings() {
        let settings = ResolverSettings::default();
        assert_eq!(settings.nameservers.len(), 2);
        assert_eq!(settings.nameservers[0].to_string(), "8.8.8.8");
        assert_eq!(settings.nameservers[1].to_string(), "1.1.1.1");
        assert_eq!(settings.port, 53);
        assert_eq!(settings.timeout, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_unreachable_server_collapses_to_absent() {
        // TEST-NET-1 地址不可达，查询只会超时
        let settings = ResolverSettings {
            nameservers: vec![IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1))],
            port: 53,
            timeout: Duration::from_millis(200),
        };
        let resolver = DnsResolver::new(&settings).unwrap();
        let result = resolver.probe("example.com").await;
        assert!(result.address.is_absent());
        assert!(result.canonical_name.is_absent());
    }

    #[test]
    fn test_cname_trailing_dot_is_trimmed() {
        let answer = [cname("edge.cdn.net.")];
        assert_eq!(
            record_values(RecordKind::CanonicalName, answer.iter()),
            vec!["edge.cdn.net"]
        );
    }

    #[test]
    fn test_intermediate_cname_dropped_from_address_answer() {
        let answer = [cname("edge.cdn.net."), a([10, 0, 0, 2]), a([10, 0, 0, 1])];
        let values = record_values(RecordKind::Address, answer.iter());
        assert_eq!(values, vec!["10.0.0.2", "10.0.0.1"]);
        assert_eq!(
            RecordSet::present(values),
            RecordSet::present(["10.0.0.1", "10.0.0.2"])
        );
        assert_eq!(
            record_values(RecordKind::CanonicalName, answer.iter()),
            vec!["edge.cdn.net"]
        );
    }

    #[test]
    fn test_empty_nameservers_rejected() {
        let settings = ResolverSettings {
            nameservers: vec![],
            ..Default::default()
        };
        assert!(matches!(
            DnsResolver::new(&settings),
            Err(FilterError::NoNameservers)
        ));
    }
}
