//! 结果文件与终端汇总输出

use std::fs::File;
use std::io::Write;
use std::path::Path;

use colored::*;

use crate::api::FilterReport;
use crate::error::{FilterError, Result};

/// 结果文件名
pub const RESULT_FILE: &str = "result.txt";

/// 将保留的域名写入文件（覆盖），一行一个，末尾不带换行
pub fn write_results(path: impl AsRef<Path>, domains: &[String]) -> Result<()> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| FilterError::Io {
        path: path.display().to_string(),
        source,
    };

    let mut file = File::create(path).map_err(io_error)?;
    file.write_all(domains.join("\n").as_bytes())
        .map_err(io_error)?;
    Ok(())
}

/// 打印检测汇总
pub fn print_summary(report: &FilterReport, output_path: &str) {
    println!("\n{}", "[✓] 泛解析检测完成".green());
    println!("{} {}", "[+] 输入域名总数:".blue(), report.total.to_string().yellow());
    println!(
        "{} {}",
        "[+] 去除泛解析后剩余域名:".blue(),
        report.retained.len().to_string().yellow()
    );
    println!("{} {}", "[+] 结果已保存至".blue(), output_path.green());
}

/// 打印启动横幅
pub fn banner() {
    println!(
        "{}",
        r"
 __        ___ _     _  ____ _
 \ \      / (_) | __| |/ ___| | ___  __ _ _ __
  \ \ /\ / /| | |/ _` | |   | |/ _ \/ _` | '_ \
   \ V  V / | | | (_| | |___| |  __/ (_| | | | |
    \_/\_/  |_|_|\__,_|\____|_|\___|\__,_|_| |_|

        DNS Wildcard Domain Cleaner
"
        .cyan()
    );
}
