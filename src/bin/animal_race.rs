//! 动物赛跑仿真
//!
//! 运行场景文件（或内置名单），打印排名与每只动物的汇总。

use animal_race::race::RunLimit;
use animal_race::report::RunReport;
use animal_race::scenario::Scenario;
use animal_race::sim::SimTime;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "animal-race", about = "动物赛跑仿真：体力约束下的冲刺/恢复循环")]
struct Args {
    /// 场景 JSON 文件；缺省使用内置名单（cow, jaguar, horse）
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// 覆盖赛道长度（米）
    #[arg(long)]
    length: Option<f64>,
    /// 只运行这么多秒仿真时间；缺省运行到比赛结束
    #[arg(long)]
    until_s: Option<f64>,
    /// 覆盖积分步长（微秒）
    #[arg(long)]
    step_us: Option<u64>,
    /// 覆盖运行到结束时的总时间预算（秒）
    #[arg(long)]
    budget_s: Option<f64>,
    /// 以 JSON 输出报告
    #[arg(long)]
    json: bool,
}

fn load_scenario(args: &Args) -> Result<Scenario, String> {
    let mut scenario = match &args.scenario {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("read {}: {e}", path.display()))?;
            Scenario::from_json_str(&raw).map_err(|e| e.to_string())?
        }
        None => Scenario::builtin(),
    };
    if let Some(len) = args.length {
        scenario.track_length = Some(len);
    }
    if let Some(us) = args.step_us {
        scenario.config.step = SimTime::from_micros(us);
    }
    if let Some(b) = args.budget_s {
        scenario.config.time_budget_s = Some(b);
    }
    Ok(scenario)
}

fn main() -> ExitCode {
    // 日志写到 stderr，stdout 只留给报告
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let scenario = match load_scenario(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    let (mut rs, race) = match scenario.build() {
        Ok(built) => built,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let limit = match args.until_s {
        Some(s) => RunLimit::For(SimTime::from_secs_f64(s)),
        None => RunLimit::UntilSettled,
    };
    let outcome = rs.run(limit);
    let report = RunReport::collect(&rs, race, &outcome);

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("error: serialize report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", report.render_text());
    }
    ExitCode::SUCCESS
}
