use crate::core::model::{DEFAULT_API_BASE, DEFAULT_MODEL};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "clipsum")]
#[command(about = "Summarize YouTube videos and websites with a hosted LLM")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Hosted model identifier
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// OpenAI-compatible API base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Preferred transcript languages (comma-separated)
    #[arg(short, long, default_value = "en")]
    pub languages: String,

    /// Log filter, e.g. "info" or "clipsum=debug"
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// File that receives log output while the form owns the terminal
    #[arg(long, default_value = "clipsum.log")]
    pub log_file: PathBuf,
}

impl Cli {
    pub fn language_list(&self) -> Vec<String> {
        parse_languages(&self.languages)
    }
}

fn parse_languages(raw: &str) -> Vec<String> {
    let languages: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if languages.is_empty() {
        vec!["en".to_string()]
    } else {
        languages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_hosted_model() {
        let cli = Cli::parse_from(["clipsum"]);
        assert_eq!(cli.model, DEFAULT_MODEL);
        assert_eq!(cli.api_base, DEFAULT_API_BASE);
        assert_eq!(cli.language_list(), vec!["en"]);
    }

    #[test]
    fn languages_are_trimmed_and_never_empty() {
        assert_eq!(parse_languages(" en, es ,,"), vec!["en", "es"]);
        assert_eq!(parse_languages(" , "), vec!["en"]);
    }
}
