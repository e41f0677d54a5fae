//! 命令列參數解析

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use restock_core::SolverSettings;

pub const USAGE: &str = "\
用法:
  restock run [--data PATH] [--out DIR] [--generations N] [--population N] [--seed N] [--config FILE.json]
  restock compare --lp PATH --ga PATH

run      執行 LP 與 GA 並輸出到 <out>/experiment_<n>
compare  逐商品比較兩份結果表的成本";

const DEFAULT_DATA: &str = "data/demand_data.csv";
const DEFAULT_OUT: &str = "reports";

/// 子命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(RunArgs),
    Compare { lp: PathBuf, ga: PathBuf },
    Help,
}

/// `run` 子命令參數
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    pub data: PathBuf,
    pub out: PathBuf,
    pub generations: Option<usize>,
    pub population: Option<usize>,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            data: PathBuf::from(DEFAULT_DATA),
            out: PathBuf::from(DEFAULT_OUT),
            generations: None,
            population: None,
            seed: None,
            config: None,
        }
    }
}

impl RunArgs {
    /// 組合求解器設定：設定檔為基礎，命令列參數覆寫
    pub fn settings(&self) -> anyhow::Result<SolverSettings> {
        let mut settings: SolverSettings = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("無法讀取設定檔 {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("設定檔格式錯誤 {}", path.display()))?
            }
            None => SolverSettings::default(),
        };

        if let Some(generations) = self.generations {
            settings.ga.generations = generations;
        }
        if let Some(population) = self.population {
            settings.ga.population_size = population;
        }
        if let Some(seed) = self.seed {
            settings.ga.seed = Some(seed);
        }

        settings.lp.validate()?;
        settings.ga.validate()?;
        Ok(settings)
    }
}

/// 解析命令列參數（不含程式名稱）
pub fn parse_args<I, S>(args: I) -> anyhow::Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);

    let command = match args.next() {
        Some(command) => command,
        None => return Ok(Command::Help),
    };

    let options = parse_options(args)?;

    match command.as_str() {
        "run" => {
            let mut run = RunArgs::default();
            for (key, value) in options {
                match key.as_str() {
                    "data" => run.data = PathBuf::from(value),
                    "out" => run.out = PathBuf::from(value),
                    "generations" => run.generations = Some(parse_number(&key, &value)?),
                    "population" => run.population = Some(parse_number(&key, &value)?),
                    "seed" => run.seed = Some(parse_number(&key, &value)?),
                    "config" => run.config = Some(PathBuf::from(value)),
                    _ => bail!("run 不支援參數 --{}", key),
                }
            }
            Ok(Command::Run(run))
        }
        "compare" => {
            let mut lp = None;
            let mut ga = None;
            for (key, value) in options {
                match key.as_str() {
                    "lp" => lp = Some(PathBuf::from(value)),
                    "ga" => ga = Some(PathBuf::from(value)),
                    _ => bail!("compare 不支援參數 --{}", key),
                }
            }
            Ok(Command::Compare {
                lp: lp.ok_or_else(|| anyhow!("compare 需要 --lp"))?,
                ga: ga.ok_or_else(|| anyhow!("compare 需要 --ga"))?,
            })
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => bail!("未知的子命令: {}\n\n{}", other, USAGE),
    }
}

/// 解析 `--key value` 與 `--key=value`
fn parse_options(args: impl Iterator<Item = String>) -> anyhow::Result<Vec<(String, String)>> {
    let mut options = Vec::new();
    let mut args = args;

    while let Some(arg) = args.next() {
        let Some(flag) = arg.strip_prefix("--") else {
            bail!("無法解析的參數: {}", arg);
        };

        let (key, value) = match flag.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("參數 --{} 缺少值", flag))?;
                (flag.to_string(), value)
            }
        };
        options.push((key, value));
    }

    Ok(options)
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> anyhow::Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("參數 --{} 需要非負整數，實際 {}", key, value))
}
