// Startup module - banner and component registration status
//
// Shown once before the server starts accepting requests:
// - Version info and config source
// - Each registered component with the template it resolved to
// - Listening address

use crate::component::Binding;
use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Print the startup banner and component bindings
pub fn print_startup(config: &Config, engine: &str, bindings: &[Binding]) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}fragments{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Server-rendered components{RESET}");
    println!();

    // Config file status
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!(
        "  {DIM}Templates:{RESET} {} {DIM}({engine}){RESET}",
        config.template_dir.display()
    );
    println!();

    println!("  {DIM}Registering components...{RESET}");
    for line in binding_lines(bindings) {
        println!("    {GREEN}✓{RESET} {line}");
    }
    println!();

    println!(
        "  {MAGENTA}▸{RESET} Listening on {BOLD}http://{}{RESET}",
        config.bind_addr
    );
    println!();
}

/// Same information through tracing, for file logs
pub fn log_startup(config: &Config, bindings: &[Binding]) {
    tracing::info!("fragments v{}", VERSION);
    for binding in bindings {
        tracing::info!(
            component = binding.component,
            template = %binding.template,
            "Component bound"
        );
    }
    tracing::info!(
        "Demo data: {} table rows, {} flow",
        config.demo.table_rows,
        config.demo.flow_kind
    );
}

/// One aligned `name  template` line per binding
fn binding_lines(bindings: &[Binding]) -> Vec<String> {
    let width = bindings
        .iter()
        .map(|b| b.component.len())
        .max()
        .unwrap_or(0);

    bindings
        .iter()
        .map(|b| format!("{:<width$}  {}", b.component, b.template, width = width))
        .collect()
}
