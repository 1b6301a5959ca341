use color_eyre::Result;
use dialoguer::Input;
use trakt_export_source::AuthCodeProvider;

use crate::output::Output;

/// Reads the authorization code from the console after showing the
/// approval URL
pub struct ConsoleCodeProvider<'a> {
    output: &'a Output,
}

impl<'a> ConsoleCodeProvider<'a> {
    pub fn new(output: &'a Output) -> Self {
        Self { output }
    }
}

impl AuthCodeProvider for ConsoleCodeProvider<'_> {
    fn authorization_code(&self, authorize_url: &str) -> anyhow::Result<String> {
        self.output.info("Open the link in a browser and paste the code here:");
        self.output.info(authorize_url);
        let code = Input::<String>::new()
            .with_prompt("Please enter the code")
            .interact_text()
            .map_err(|e| anyhow::anyhow!("Failed to read the authorization code: {}", e))?;
        Ok(code)
    }
}

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}
