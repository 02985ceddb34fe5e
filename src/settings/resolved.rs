use std::path::PathBuf;

use rpick::{DependentConfig, PickerConfig};

/// Application-ready configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub picker: PickerConfig,
    pub dependent: Option<DependentConfig>,
    pub title: Option<String>,
    pub dependent_title: Option<String>,
    pub initial_query: String,
    pub theme: Option<String>,
    /// Config files that existed and were read.
    pub sources: Vec<PathBuf>,
}

impl ResolvedConfig {
    /// Print a human readable summary of the effective configuration.
    pub fn print_summary(&self) {
        print!("{}", self.summary());
    }

    fn summary(&self) -> String {
        let picker = &self.picker;
        let mut lines = vec![
            "Effective configuration:".to_string(),
            format!("  Endpoint: {}", picker.endpoint_url),
            format!("  Page size: {}", picker.page_size),
            format!("  Result field: {}", picker.result_field),
        ];
        if !picker.extra_params.is_empty() {
            let params: Vec<String> = picker
                .extra_params
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            lines.push(format!("  Extra params: {}", params.join("&")));
        }
        lines.push(format!("  Commit: {:?}", picker.commit));
        lines.push(format!("  Submit: {:?}", picker.submit));
        lines.push(format!("  Debounce: {} ms", picker.debounce.as_millis()));
        lines.push(match picker.request_timeout {
            Some(timeout) => format!("  Request timeout: {} ms", timeout.as_millis()),
            None => "  Request timeout: none".to_string(),
        });
        if let Some(dependent) = &self.dependent {
            lines.push(format!(
                "  Dependent: {} ({} -> {})",
                dependent.endpoint_url, dependent.parent_param, dependent.result_field
            ));
        }
        lines.push(format!(
            "  UI theme: {}",
            self.theme.as_deref().unwrap_or("(use the library default)")
        ));
        if let Some(title) = &self.title {
            lines.push(format!("  Title: {title}"));
        }
        if !self.initial_query.is_empty() {
            lines.push(format!("  Initial query: {}", self.initial_query));
        }
        if self.sources.is_empty() {
            lines.push("  Files: none".to_string());
        } else {
            lines.push("  Files:".to_string());
            lines.extend(self.sources.iter().map(|path| format!("    {}", path.display())));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_endpoint_and_params() {
        let config = ResolvedConfig {
            picker: PickerConfig::new("http://localhost/companies/options").with_param("active_only", "1"),
            dependent: Some(DependentConfig::new("http://localhost/reports/compare")),
            title: Some("Company".into()),
            dependent_title: None,
            initial_query: String::new(),
            theme: None,
            sources: vec![PathBuf::from("/etc/rpick.toml")],
        };
        let summary = config.summary();
        assert!(summary.contains("Endpoint: http://localhost/companies/options"));
        assert!(summary.contains("Extra params: active_only=1"));
        assert!(summary.contains("    /etc/rpick.toml"));
        assert!(summary.contains("company_id -> campaigns"));
        assert!(summary.contains("Request timeout: 6000 ms"));
    }
}
