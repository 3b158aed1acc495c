// 命令行入口：查询产线列表与指标，结果以 JSON 输出到 stdout。
//
// Usage:
//   production-oee units
//   production-oee metrics <unit> <start> <end> [current]
//   production-oee summary <unit> <start> <end> [current]
//   production-oee hourly  <unit> <start> <end> [current]
//
// 数据源由 DB_SERVER / DB_NAME / DB_USER / DB_PASSWORD 指定（支持 .env）。

use anyhow::{bail, Context};
use production_oee::{logging, DataSourceConfig, InputTimestamp, MetricsConfig, ProductionApi};

const USAGE: &str = "usage: production-oee <units | metrics | summary | hourly> [unit start end [current]]";

struct WindowArgs {
    unit: String,
    start: InputTimestamp,
    end: InputTimestamp,
    current: Option<InputTimestamp>,
}

fn parse_timestamp(raw: &str, name: &str) -> anyhow::Result<InputTimestamp> {
    raw.parse::<InputTimestamp>()
        .with_context(|| format!("invalid {name}"))
}

fn parse_window_args(args: &[String]) -> anyhow::Result<WindowArgs> {
    if args.len() < 3 || args.len() > 4 {
        bail!("{USAGE}");
    }

    Ok(WindowArgs {
        unit: args[0].clone(),
        start: parse_timestamp(&args[1], "start")?,
        end: parse_timestamp(&args[2], "end")?,
        current: args
            .get(3)
            .map(|raw| parse_timestamp(raw, "current"))
            .transpose()?,
    })
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("{USAGE}");
    };

    let data_source = DataSourceConfig::from_env()?;
    let metrics_config = MetricsConfig::from_env()?;
    tracing::info!(
        version = production_oee::VERSION,
        server = %data_source.server,
        database = %data_source.database,
        zone = %metrics_config.zone,
        "{}",
        production_oee::APP_NAME
    );

    let api = ProductionApi::from_data_source(data_source, metrics_config);

    let output = match command.as_str() {
        "units" => serde_json::to_string_pretty(&api.list_units()?)?,
        "metrics" => {
            let w = parse_window_args(&args[1..])?;
            serde_json::to_string_pretty(&api.get_production_data(&w.unit, w.start, w.end, w.current)?)?
        }
        "summary" => {
            let w = parse_window_args(&args[1..])?;
            serde_json::to_string_pretty(&api.get_unit_summary(&w.unit, w.start, w.end, w.current)?)?
        }
        "hourly" => {
            let w = parse_window_args(&args[1..])?;
            serde_json::to_string_pretty(&api.get_hourly_breakdown(&w.unit, w.start, w.end, w.current)?)?
        }
        other => bail!("unknown command `{other}`\n{USAGE}"),
    };

    println!("{}", output);
    Ok(())
}
