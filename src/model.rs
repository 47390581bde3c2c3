//! 查询结果与检测结论的数据类型

use std::fmt;

/// 查询的记录类型，只关心 A 与 CNAME 两类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A 记录
    Address,
    /// CNAME 记录
    CanonicalName,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Address => write!(f, "A"),
            RecordKind::CanonicalName => write!(f, "CNAME"),
        }
    }
}

/// 一次查询的结果
///
/// `Absent` 表示查询失败或没有应答（超时、NXDOMAIN、NoAnswer 等一律归为此类），
/// `Present` 中的值在构造时已经排序，比较时与顺序无关。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSet {
    /// 查询成功，携带排序后的记录值
    Present(Vec<String>),
    /// 无结果
    Absent,
}

impl RecordSet {
    /// 由记录值构造，内部完成排序
    pub fn present<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values: Vec<String> = values.into_iter().map(Into::into).collect();
        values.sort();
        RecordSet::Present(values)
    }

    /// 是否为 `Absent`
    pub fn is_absent(&self) -> bool {
        matches!(self, RecordSet::Absent)
    }

    /// 可作为比较基准的记录值：存在且非空
    pub fn signature(&self) -> Option<&[String]> {
        match self {
            RecordSet::Present(values) if !values.is_empty() => Some(values),
            _ => None,
        }
    }

    /// 以 `self` 为基准，判断 `other` 是否返回了完全相同的记录集合
    pub fn echoed_by(&self, other: &RecordSet) -> bool {
        match (self.signature(), other) {
            (Some(base), RecordSet::Present(values)) => base == values.as_slice(),
            _ => false,
        }
    }
}

impl fmt::Display for RecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSet::Present(values) => write!(f, "[{}]", values.join(", ")),
            RecordSet::Absent => write!(f, "-"),
        }
    }
}

/// 一个名称的 A / CNAME 查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// A 记录集合
    pub address: RecordSet,
    /// CNAME 记录集合
    pub canonical_name: RecordSet,
}

impl ProbeResult {
    /// 两类记录都没有结果
    pub fn is_unresolved(&self) -> bool {
        self.address.signature().is_none() && self.canonical_name.signature().is_none()
    }

    /// 以 `self` 为基准，任一记录类型被 `probe` 原样返回即视为命中
    pub fn echoed_by(&self, probe: &ProbeResult) -> bool {
        self.address.echoed_by(&probe.address)
            || self.canonical_name.echoed_by(&probe.canonical_name)
    }
}

/// 单个域名的检测结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// 泛解析域名，需要剔除
    Wildcard,
    /// 正常域名，保留
    NotWildcard,
}

impl Classification {
    /// 是否为泛解析
    pub fn is_wildcard(self) -> bool {
        self == Classification::Wildcard
    }
}
