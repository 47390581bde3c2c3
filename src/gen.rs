//! 随机子域名生成

use rand::{thread_rng, Rng};

/// 随机标签字符集
const LABEL_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// 随机标签默认长度
pub const DEFAULT_LABEL_LEN: usize = 10;

/// 用给定随机源生成长度为 `len` 的标签
pub fn random_label_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| LABEL_CHARSET[rng.gen_range(0..LABEL_CHARSET.len())] as char)
        .collect()
}

/// 在 `domain` 前拼接随机标签，生成一个几乎不可能真实存在的子域名
pub fn random_subdomain(domain: &str, len: usize) -> String {
    let mut rng = thread_rng();
    format!("{}.{}", random_label_with(&mut rng, len), domain)
}
