use crate::config::toml_config::{TomlConfig, MAX_CACHE_MINUTES};
use crate::domain::model::DayInput;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_positive_number, validate_range, validate_source_location, Validate,
};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Json,
    DailyPrompt,
    QuickPrompt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

/// 命令列參數；未指定的值由 --config 檔案或預設值補上
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "jyotish-lookup")]
#[command(about = "Resolve panchanga names against bundled Jyotish reference data")]
pub struct CliConfig {
    /// 參考資料目錄或 http(s) 基底 URL
    #[arg(long)]
    pub source: Option<String>,

    #[arg(long, help = "Cache TTL in minutes (default 30)")]
    pub ttl_minutes: Option<u64>,

    #[arg(long, help = "Sweep interval in minutes, 0 disables")]
    pub sweep_minutes: Option<u64>,

    #[arg(long, help = "HTTP request timeout in seconds (default 30)")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub tithi: Option<String>,

    #[arg(long)]
    pub vara: Option<String>,

    #[arg(long)]
    pub nakshatra: Option<String>,

    #[arg(long)]
    pub yoga: Option<String>,

    #[arg(long)]
    pub karana: Option<String>,

    #[arg(long = "special-yoga", help = "Special yoga name, may be repeated")]
    pub special_yogas: Vec<String>,

    #[arg(long, help = "Date of the day (YYYY-MM-DD)")]
    pub date: Option<NaiveDate>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn day_input(&self) -> DayInput {
        DayInput {
            date: self.date,
            tithi: self.tithi.clone(),
            vara: self.vara.clone(),
            nakshatra: self.nakshatra.clone(),
            yoga: self.yoga.clone(),
            karana: self.karana.clone(),
            special_yogas: self.special_yogas.clone(),
        }
    }

    /// 讀取 --config（若有），再以命令列明確給定的值覆蓋
    pub fn resolve_settings(&self) -> Result<TomlConfig> {
        self.validate()?;

        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(source) = &self.source {
            settings.source.location = source.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.source.timeout_seconds = Some(timeout);
        }
        if let Some(ttl) = self.ttl_minutes {
            settings.cache.ttl_minutes = Some(ttl);
        }
        if let Some(sweep) = self.sweep_minutes {
            settings.cache.sweep_interval_minutes = Some(sweep);
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    /// 只檢查命令列給定的值，錯誤訊息使用旗標名稱
    fn validate(&self) -> Result<()> {
        if let Some(source) = &self.source {
            validate_source_location("--source", source)?;
        }
        if let Some(ttl) = self.ttl_minutes {
            validate_range("--ttl-minutes", ttl, 1, MAX_CACHE_MINUTES)?;
        }
        if let Some(sweep) = self.sweep_minutes {
            validate_range("--sweep-minutes", sweep, 0, MAX_CACHE_MINUTES)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("--timeout-seconds", timeout, 1)?;
        }
        Ok(())
    }
}
