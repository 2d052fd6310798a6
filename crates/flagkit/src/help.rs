//! Help and usage rendering from registration metadata.
//!
//! Pure string building; callers pick the output stream. Each flag kind gets
//! its own section, with descriptions left-padded to one column past the
//! widest prefix in that section.

pub(crate) struct OptionHelp {
    pub name: String,
    pub short_name: Option<char>,
    pub help: String,
    pub default_text: Option<String>,
}

impl OptionHelp {
    fn format_prefix(&self) -> String {
        format_prefix(&self.name, self.short_name)
    }

    fn format_help(&self) -> String {
        match &self.default_text {
            Some(default) => format!("{} (default: {default})", self.help),
            None => self.help.clone(),
        }
    }
}

pub(crate) struct SwitchHelp {
    pub name: String,
    pub short_name: Option<char>,
    pub help: String,
}

impl SwitchHelp {
    fn format_prefix(&self) -> String {
        format_prefix(&self.name, self.short_name)
    }

    fn format_help(&self) -> String {
        self.help.clone()
    }
}

pub(crate) struct PositionalHelp {
    pub label: String,
}

/// `-s, --name`, or `    --name` when no short form exists, so the long
/// forms line up either way.
fn format_prefix(name: &str, short_name: Option<char>) -> String {
    let short = match short_name {
        Some(c) => format!("-{c},"),
        None => "   ".to_string(),
    };
    format!("{short} --{name}")
}

#[derive(Default)]
pub(crate) struct HelpMetadata {
    pub name: String,
    pub version: String,
    pub executable: String,
    pub options: Vec<OptionHelp>,
    pub switches: Vec<SwitchHelp>,
    pub positionals: Vec<PositionalHelp>,
}

impl HelpMetadata {
    /// `Usage: <executable> [options...] {label} …` in registration order.
    pub fn usage_line(&self) -> String {
        let positionals: String = self
            .positionals
            .iter()
            .map(|p| format!(" {{{}}}", p.label))
            .collect();
        format!("Usage: {} [options...]{positionals}", self.executable)
    }

    /// Full help text: version header, usage line, switch and option tables.
    pub fn render_help(&self) -> String {
        let mut out = format!(
            "{} version {}\n\n{}\n\n",
            self.name,
            self.version,
            self.usage_line()
        );

        if !self.switches.is_empty() {
            out.push_str("FLAGS:\n");
            out.push_str(&aligned_rows(
                self.switches
                    .iter()
                    .map(|s| (s.format_prefix(), s.format_help()))
                    .collect(),
            ));
            out.push('\n');
        }

        if !self.options.is_empty() {
            out.push_str("OPTIONS:\n");
            out.push_str(&aligned_rows(
                self.options
                    .iter()
                    .map(|o| (o.format_prefix(), o.format_help()))
                    .collect(),
            ));
            out.push('\n');
        }

        out
    }

    /// The single help line for one named flag, or empty when unknown.
    pub fn flag_help(&self, name: &str) -> String {
        if let Some(option) = self.options.iter().find(|o| o.name == name) {
            format!("    {} {}\n", option.format_prefix(), option.format_help())
        } else if let Some(switch) = self.switches.iter().find(|s| s.name == name) {
            format!("    {} {}\n", switch.format_prefix(), switch.format_help())
        } else {
            String::new()
        }
    }
}

/// Pad every prefix to the width of the widest one in the batch.
fn aligned_rows(rows: Vec<(String, String)>) -> String {
    let width = rows.iter().map(|(prefix, _)| prefix.len()).max().unwrap_or(0);
    rows.into_iter()
        .map(|(prefix, help)| format!("    {prefix:<width$} {help}\n"))
        .collect()
}
