use std::process::ExitCode;

use chrono::Local;
use clap::{CommandFactory, Parser};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use wildclean::input::{load_domains, Opts};
use wildclean::logger::init_logger;
use wildclean::output::{banner, print_summary, write_results, RESULT_FILE};
use wildclean::{FilterConfig, FilterReport, WildcardFilterEngine};

#[tokio::main]
async fn main() -> ExitCode {
    let opts = Opts::parse();
    init_logger(opts.verbose);

    if !opts.silent {
        banner();
    }

    if !opts.has_input() {
        let _ = Opts::command().print_help();
        return ExitCode::SUCCESS;
    }

    match run(opts).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[!]".red(), e);
            ExitCode::FAILURE
        }
    }
}

/// 读取域名、执行检测并写出结果
async fn run(opts: Opts) -> Result<FilterReport, Box<dyn std::error::Error>> {
    // 输入错误必须在任何网络请求之前暴露
    let domains = load_domains(opts.url(), opts.file())?.into_vec();

    let start = Local::now();
    if !opts.silent {
        println!(
            "{} {}",
            "[*] 开始时间:".blue(),
            start.format("%Y-%m-%d %H:%M:%S").to_string().yellow()
        );
    }

    let progress = progress_bar(domains.len() as u64, opts.silent);
    let engine = WildcardFilterEngine::new(FilterConfig::default())?;
    let report = engine
        .run(&domains, |_, _| progress.inc(1))
        .await?;
    progress.finish();

    write_results(RESULT_FILE, &report.retained)?;

    print_summary(&report, RESULT_FILE);
    if !opts.silent {
        let elapsed = Local::now() - start;
        println!(
            "{} {}.{:03}s",
            "[*] 耗时:".blue(),
            elapsed.num_seconds(),
            elapsed.num_milliseconds() % 1000
        );
    }
    Ok(report)
}

fn progress_bar(len: u64, silent: bool) -> ProgressBar {
    if silent {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{msg} {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    bar.set_style(style);
    bar.set_message("泛解析过滤中");
    bar
}
