use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub command: String,
    pub target: Option<String>,
    pub details: Option<String>,
}

impl LogEntry {
    fn render(&self) -> String {
        let level = match self.level {
            LogLevel::Info => "INFO ",
            LogLevel::Error => "ERROR",
        };
        format!(
            "{} {} {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            level,
            self.command,
            self.target.as_deref().unwrap_or("*"),
            self.details.as_deref().unwrap_or("")
        )
    }
}

/// Append-only log of CLI commands at `~/.wibble/activity.log`.
pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    pub fn new() -> crate::Result<Self> {
        let dir = crate::config::wibble_dir().ok_or_else(|| {
            crate::WibbleError::Config("could not determine home directory".into())
        })?;
        fs::create_dir_all(&dir)?;
        Ok(Self::at(dir.join("activity.log")))
    }

    pub fn at(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn log(
        &self,
        level: LogLevel,
        command: &str,
        target: Option<&str>,
        details: Option<&str>,
    ) -> crate::Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            command: command.to_string(),
            target: target.map(str::to_string),
            details: details.map(str::to_string),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{}", entry.render())?;
        Ok(())
    }

    /// Most recent entries first.
    pub fn read_logs(&self, errors_only: bool) -> crate::Result<Vec<String>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let reader = BufReader::new(fs::File::open(&self.log_path)?);
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if errors_only && !line.contains(" ERROR ") {
                continue;
            }
            lines.push(line);
        }
        lines.reverse();
        Ok(lines)
    }

    pub fn info(
        &self,
        command: &str,
        target: Option<&str>,
        details: Option<&str>,
    ) -> crate::Result<()> {
        self.log(LogLevel::Info, command, target, details)
    }

    pub fn error(
        &self,
        command: &str,
        target: Option<&str>,
        details: Option<&str>,
    ) -> crate::Result<()> {
        self.log(LogLevel::Error, command, target, details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log(name: &str) -> ActivityLogger {
        let path = std::env::temp_dir().join(format!(
            "wibble-{}-{}.log",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        ActivityLogger::at(path)
    }

    #[test]
    fn missing_log_reads_empty() {
        let logger = temp_log("missing");
        assert!(logger.read_logs(false).unwrap().is_empty());
    }

    #[test]
    fn reads_newest_first_and_filters_errors() {
        let logger = temp_log("filter");
        logger.info("call", Some("https://a.test"), Some("ok in 3ms")).unwrap();
        logger.error("web", Some("https://b.test"), Some("failed in 9ms")).unwrap();
        logger.info("path", None, None).unwrap();

        let all = logger.read_logs(false).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all[0].contains("path *"));
        assert!(all[2].contains("https://a.test"));

        let errors = logger.read_logs(true).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("failed in 9ms"));

        let _ = fs::remove_file(&logger.log_path);
    }
}
