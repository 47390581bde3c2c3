use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use wildclean::{
    load_domains, write_results, Classification, FilterConfig, Lookup, RecordKind, RecordSet,
    WildcardFilterEngine,
};

/// 固定应答的解析器：精确匹配的名称返回预设记录，
/// 开启泛解析的父域下任意子域名返回父域的记录
#[derive(Default)]
struct ZoneLookup {
    records: HashMap<String, (RecordSet, RecordSet)>,
    wildcard_zones: Vec<String>,
    calls: AtomicUsize,
}

impl ZoneLookup {
    fn record(mut self, name: &str, a: &[&str], cname: &[&str]) -> Self {
        let to_set = |values: &[&str]| {
            if values.is_empty() {
                RecordSet::Absent
            } else {
                RecordSet::present(values.iter().copied())
            }
        };
        self.records
            .insert(name.to_string(), (to_set(a), to_set(cname)));
        self
    }

    fn wildcard(mut self, zone: &str) -> Self {
        self.wildcard_zones.push(zone.to_string());
        self
    }
}

#[async_trait]
impl Lookup for ZoneLookup {
    async fn lookup(&self, name: &str, kind: RecordKind) -> RecordSet {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let owner = if self.records.contains_key(name) {
            Some(name)
        } else {
            self.wildcard_zones
                .iter()
                .find(|zone| name.ends_with(&format!(".{}", zone)))
                .map(String::as_str)
        };
        match owner.and_then(|owner| self.records.get(owner)) {
            Some((a, _)) if kind == RecordKind::Address => a.clone(),
            Some((_, cname)) => cname.clone(),
            None => RecordSet::Absent,
        }
    }
}

fn engine(lookup: ZoneLookup) -> (WildcardFilterEngine<ZoneLookup>, Arc<ZoneLookup>) {
    let lookup = Arc::new(lookup);
    let engine = WildcardFilterEngine::with_resolver(FilterConfig::default(), Arc::clone(&lookup));
    (engine, lookup)
}

#[tokio::test]
async fn test_end_to_end_filters_wildcard_domain() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("domains.txt");
    let output_path = dir.path().join("result.txt");
    let mut input = std::fs::File::create(&input_path).unwrap();
    writeln!(input, "real1.example\nwild1.example").unwrap();

    let (engine, _) = engine(
        ZoneLookup::default()
            .record("real1.example", &["93.184.216.34"], &[])
            .record("wild1.example", &["10.1.1.1", "10.1.1.2"], &[])
            .wildcard("wild1.example"),
    );

    let domains = load_domains(None, input_path.to_str()).unwrap().into_vec();
    let report = engine.run(&domains, |_, _| {}).await.unwrap();
    write_results(&output_path, &report.retained).unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.wildcard, vec!["wild1.example"]);
    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "real1.example");
}

#[tokio::test]
async fn test_cname_wildcard_zone_is_dropped() {
    let (engine, _) = engine(
        ZoneLookup::default()
            .record("cdn.example", &[], &["edge.provider.net"])
            .wildcard("cdn.example")
            .record("www.example", &["1.2.3.4"], &["web.provider.net"]),
    );

    let domains = vec!["cdn.example".to_string(), "www.example".to_string()];
    let report = engine.run(&domains, |_, _| {}).await.unwrap();

    assert_eq!(report.retained, vec!["www.example"]);
    assert_eq!(report.wildcard, vec!["cdn.example"]);
}

#[tokio::test]
async fn test_dead_domains_are_retained_without_probing() {
    let (engine, lookup) = engine(ZoneLookup::default());

    let domains = vec!["gone1.example".to_string(), "gone2.example".to_string()];
    let mut outcomes = Vec::new();
    let report = engine
        .run(&domains, |domain, outcome| outcomes.push((domain.to_string(), outcome)))
        .await
        .unwrap();

    assert_eq!(report.retained, domains);
    // 每个域名只有两次基准查询
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 4);
    assert!(outcomes
        .iter()
        .all(|(_, outcome)| *outcome == Classification::NotWildcard));
}

#[tokio::test]
async fn test_duplicate_input_is_classified_once() {
    let (engine, lookup) = engine(ZoneLookup::default());

    let domains = vec![
        "a.com".to_string(),
        "a.com".to_string(),
        "B.com".to_string(),
        "b.com".to_string(),
    ];
    let mut callbacks = 0;
    let report = engine.run(&domains, |_, _| callbacks += 1).await.unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.retained, vec!["a.com", "b.com"]);
    assert_eq!(callbacks, 2);
    // 两个域名各两次基准查询
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_reserved_dedup_feeds_two_domains() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "webvpn1.x.com\nfoo.com\nwebvpn2.x.com").unwrap();

    let domains = load_domains(None, file.path().to_str()).unwrap().into_vec();
    assert_eq!(domains.len(), 2);

    let (engine, _) = engine(ZoneLookup::default());
    let report = engine.run(&domains, |_, _| {}).await.unwrap();
    assert_eq!(report.total, 2);
    assert_eq!(report.retained, vec!["webvpn1.x.com", "foo.com"]);
}
