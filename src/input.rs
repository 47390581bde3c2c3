//! 命令行参数与域名列表读取

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use clap::Parser;
use log::debug;

use crate::error::{FilterError, Result};

/// 保留子串，同一文件中只保留第一个包含它的域名
pub const RESERVED_SUBSTRING: &str = "webvpn";

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "wildclean")]
#[command(author = "o0x1024")]
#[command(version)]
#[command(
    about = "泛解析过滤工具（支持 A / CNAME）",
    after_help = "示例:\n  wildclean -u example.com\n  wildclean -f domains.txt"
)]
pub struct Opts {
    /// 检测单个域名
    #[arg(short, long)]
    pub url: Option<String>,

    /// 读取域名文件（一行一个）
    #[arg(short, long)]
    pub file: Option<String>,

    /// 不显示横幅与进度条
    #[arg(short, long)]
    pub silent: bool,

    /// 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Opts {
    /// 是否给出了任何输入，空白参数视为未给出
    pub fn has_input(&self) -> bool {
        self.url().is_some() || self.file().is_some()
    }

    /// 非空的单个域名参数
    pub fn url(&self) -> Option<&str> {
        non_blank(self.url.as_deref())
    }

    /// 非空的域名文件参数
    pub fn file(&self) -> Option<&str> {
        non_blank(self.file.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 去重后的待检测域名，保持首次出现的顺序
#[derive(Debug, Clone, Default)]
pub struct DomainSet {
    order: Vec<String>,
    seen: HashSet<String>,
    reserved_kept: bool,
}

impl DomainSet {
    /// 空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入域名，大小写不敏感；返回是否为新域名
    pub fn insert(&mut self, domain: &str) -> bool {
        let domain = domain.trim().to_lowercase();
        if domain.is_empty() || !self.seen.insert(domain.clone()) {
            return false;
        }
        self.order.push(domain);
        true
    }

    /// 加入命令行给出的单个域名，包含保留子串时直接丢弃
    pub fn add_single(&mut self, domain: &str) -> bool {
        if contains_reserved(domain) {
            debug!("丢弃保留域名: {}", domain);
            return false;
        }
        self.insert(domain)
    }

    /// 加入文件中读到的一行
    ///
    /// 包含保留子串的域名只有第一个会被保留，其余静默丢弃。
    pub fn add_listed(&mut self, line: &str) -> bool {
        let domain = line.trim();
        if domain.is_empty() {
            return false;
        }
        if contains_reserved(domain) {
            if self.reserved_kept {
                debug!("丢弃重复的保留域名: {}", domain);
                return false;
            }
            self.reserved_kept = true;
        }
        self.insert(domain)
    }

    /// 从文件读取，一行一个域名
    pub fn extend_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let file = File::open(path).map_err(|e| FilterError::from_io(display.clone(), e))?;

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| FilterError::from_io(display.clone(), e))?;
            self.add_listed(&line);
        }
        Ok(())
    }

    /// 域名数量
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 按加入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// 转为列表
    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

fn contains_reserved(domain: &str) -> bool {
    domain.to_lowercase().contains(RESERVED_SUBSTRING)
}

/// 根据命令行参数构造待检测域名集合，先处理单个域名再处理文件
pub fn load_domains(url: Option<&str>, file: Option<&str>) -> Result<DomainSet> {
    let mut domains = DomainSet::new();
    if let Some(url) = url {
        domains.add_single(url);
    }
    if let Some(path) = file {
        domains.extend_from_file(path)?;
    }
    Ok(domains)
}
