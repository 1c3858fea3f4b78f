pub mod error;
pub mod shelf;

use std::str::FromStr;

pub use error::ExportError;

pub trait Export {
    fn to_csv(&self) -> Result<String, ExportError>;
    fn to_md(&self) -> Result<String, ExportError>;
    fn to_json(&self) -> Result<String, ExportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    Csv,
    #[default]
    Markdown,
    Json,
}

impl ExportFormat {
    pub fn render<T: Export + ?Sized>(self, data: &T) -> Result<String, ExportError> {
        match self {
            ExportFormat::Csv => data.to_csv(),
            ExportFormat::Markdown => data.to_md(),
            ExportFormat::Json => data.to_json(),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("MD".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert_eq!("markdown".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert_eq!("Json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert_eq!("pdf".parse::<ExportFormat>(), Err("pdf".to_string()));
    }

    #[test]
    fn test_default_format_is_markdown() {
        assert_eq!(ExportFormat::default(), ExportFormat::Markdown);
    }
}
