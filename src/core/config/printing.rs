use crate::core::config::data::{Config, ConfigKey};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        for line in self.describe_lines() {
            println!("  {line}");
        }
    }

    fn describe_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = ConfigKey::ALL
            .into_iter()
            .map(|key| match self.get(key) {
                Some(value) => format!("{key}: {value}"),
                None => format!("{key}: (unset)"),
            })
            .collect();
        lines.push(format!("endpoint: {}", self.configured_endpoint()));
        lines
    }
}
