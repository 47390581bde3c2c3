//! # wildclean
//!
//! DNS 泛解析域名过滤库。
//!
//! 对每个候选域名，先解析其自身的 A / CNAME 记录作为基准，再连续探测若干个
//! 随机子域名；如果每次探测都原样返回基准记录，则认为该域名配置了泛解析，
//! 在后续的子域名收集中会产生大量误报，需要剔除。
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use wildclean::filter_wildcard_domains;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let domains = vec!["example.com".to_string(), "www.example.org".to_string()];
//!     let report = filter_wildcard_domains(domains).await?;
//!
//!     println!("输入 {} 个，保留 {} 个", report.total, report.retained.len());
//!     Ok(())
//! }
//! ```
//!
//! ## 自定义查询
//!
//! 实现 [`Lookup`] 即可替换默认的 trust-dns 解析器：
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wildclean::{FilterConfig, WildcardFilterEngine, DnsResolver, ResolverSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FilterConfig {
//!         concurrency: 50,
//!         ..Default::default()
//!     };
//!     let resolver = Arc::new(DnsResolver::new(&ResolverSettings::default())?);
//!     let engine = WildcardFilterEngine::with_resolver(config, resolver);
//!
//!     let report = engine.run(&["example.com".to_string()], |domain, outcome| {
//!         println!("{} -> {:?}", domain, outcome);
//!     }).await?;
//!     println!("剔除 {} 个泛解析域名", report.wildcard.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod batch;
pub mod dns_resolver;
pub mod error;
pub mod gen;
pub mod input;
pub mod logger;
pub mod model;
pub mod output;
pub mod wildcard;

pub use api::{filter_wildcard_domains, FilterConfig, FilterReport, WildcardFilterEngine};
pub use batch::classify_all;
pub use dns_resolver::{DnsResolver, Lookup, ResolverSettings};
pub use error::{FilterError, Result};
pub use input::{load_domains, DomainSet, Opts};
pub use model::{Classification, ProbeResult, RecordKind, RecordSet};
pub use output::{write_results, RESULT_FILE};
pub use wildcard::WildcardDetector;
