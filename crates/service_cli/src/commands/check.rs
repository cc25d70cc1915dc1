//! Check command implementation
//!
//! Prints the resolved configuration and the parallel runtime the optimized
//! engine will run on.

use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");
    print!("{}", render(config, rayon::current_num_threads())?);
    info!("Check complete");
    Ok(())
}

fn render(config: &CliConfig, threads: usize) -> Result<String> {
    let mut out = format!("mc_pricer v{}\n\n", env!("CARGO_PKG_VERSION"));
    out.push_str("# Resolved configuration\n");
    out.push_str(&toml::to_string(config)?);
    out.push_str(&format!("\n# Runtime\nrayon_threads = {}\n", threads));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_pricing::mc::{EngineConfig, Execution};

    #[test]
    fn test_render_default_config() {
        let text = render(&CliConfig::default(), 4).unwrap();
        assert!(text.starts_with("mc_pricer v"));
        assert!(text.contains("execution = \"reference\""));
        assert!(text.contains("chunk_size = 65536"));
        assert!(text.contains("summation = \"plain\""));
        assert!(text.contains("rayon_threads = 4"));
    }

    #[test]
    fn test_render_reflects_engine() {
        let config = CliConfig {
            engine: EngineConfig::with_execution(Execution::Optimized),
            ..CliConfig::default()
        };
        let text = render(&config, 1).unwrap();
        assert!(text.contains("execution = \"optimized\""));
    }
}
