//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render this configuration as a commented config file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# fragments configuration
# Precedence: environment variables > this file > built-in defaults

# Address the HTTP server binds to (env: FRAGMENTS_BIND)
bind_addr = "{bind_addr}"

# Template store root; component templates live under components/<name>/<name>.html
# (env: FRAGMENTS_TEMPLATE_DIR)
template_dir = "{template_dir}"

# Served under /static (env: FRAGMENTS_STATIC_DIR)
static_dir = "{static_dir}"

[demo]
# Generated users in the table (env: FRAGMENTS_TABLE_ROWS)
table_rows = {table_rows}
# simple, decision, workflow or random (env: FRAGMENTS_FLOW_KIND)
flow_kind = "{flow_kind}"
# Counter value at startup
initial_count = {initial_count}
# Section headings (default: the component's own title)
{counter_title}
{flow_title}

[logging]
# trace, debug, info, warn, error (RUST_LOG takes precedence)
level = "{level}"
# Write JSON logs to rolling files in addition to stdout
file_enabled = {file_enabled}
file_dir = "{file_dir}"
# hourly, daily or never
file_rotation = "{file_rotation}"
file_prefix = "{file_prefix}"
"#,
            bind_addr = self.bind_addr,
            template_dir = toml_path(&self.template_dir),
            static_dir = toml_path(&self.static_dir),
            table_rows = self.demo.table_rows,
            flow_kind = self.demo.flow_kind,
            initial_count = self.demo.initial_count,
            counter_title = optional_string("counter_title", &self.demo.counter_title),
            flow_title = optional_string("flow_title", &self.demo.flow_title),
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = toml_path(&self.logging.file_dir),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = self.logging.file_prefix,
        )
    }
}

/// `key = "value"`, or the key commented out when unset
fn optional_string(key: &str, value: &Option<String>) -> String {
    match value {
        Some(value) => format!("{} = {}", key, toml::Value::String(value.clone())),
        None => format!("# {} = \"\"", key),
    }
}

/// Paths go into basic strings, so backslashes must be escaped
fn toml_path(path: &std::path::Path) -> String {
    path.display().to_string().replace('\\', "\\\\")
}
