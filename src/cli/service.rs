use super::{
    CommandRegistry, CommandResult,
    formatting::{
        format_command, format_description, format_header, format_subheader, format_usage,
    },
};
use crate::services::mpris::Session;

/// High-level service for looking up and executing actions.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a new CLI service with all available commands registered.
    pub fn new() -> Self {
        let mut registry = CommandRegistry::new();
        registry.register_all_commands();

        CliService { registry }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Executes an action against a bound player.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the action doesn't exist,
    /// or whatever the action fails with
    pub async fn execute_command(
        &self,
        session: &Session,
        command_name: &str,
        args: &[String],
    ) -> CommandResult {
        self.registry.execute(session, command_name, args).await
    }

    /// Usage text listing every action, grouped by category, with its
    /// arguments and examples.
    pub fn usage(&self, program: &str) -> String {
        let mut lines = vec![
            format!("{} {program} [OPTIONS] <action> [args]", format_header("Usage:")),
            String::new(),
            "where action is:".to_string(),
        ];

        let mut current_category = String::new();
        for metadata in self.registry.list_commands() {
            if metadata.category != current_category {
                lines.push(format!("  {}", format_subheader(&metadata.category)));
                current_category = metadata.category.clone();
            }

            let args: Vec<String> = metadata
                .args
                .iter()
                .map(|arg| {
                    if arg.required {
                        format!("<{}>", arg.name)
                    } else {
                        format!("[{}]", arg.name)
                    }
                })
                .collect();
            lines.push(format!(
                "    - {} {} : {}",
                format_command(&metadata.name),
                args.join(" "),
                format_description(&metadata.description)
            ));
            for arg in &metadata.args {
                lines.push(format!(
                    "        {} ({}): {}",
                    arg.name,
                    arg.value_type,
                    format_description(&arg.description)
                ));
            }
            for example in &metadata.examples {
                lines.push(format!("        e.g. {}", format_usage(example)));
            }
        }

        lines.join("\n")
    }
}

impl Default for CliService {
    fn default() -> Self {
        Self::new()
    }
}
