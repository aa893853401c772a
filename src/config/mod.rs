pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::CopyCounting;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "library-lookup")]
#[command(about = "Render library books with their availability at nearby branches")]
pub struct CliConfig {
    #[arg(long, default_value = ".")]
    pub input_path: String,

    #[arg(long, default_value = "books.json")]
    pub books_file: String,

    #[arg(long, default_value = "./_html")]
    pub output_path: String,

    /// Nearby branches; when omitted the previously saved selection is used
    #[arg(long = "branch", value_delimiter = ',')]
    pub branches: Vec<String>,

    #[arg(long, value_enum, default_value_t = CopyCounting::Exclusive)]
    pub copy_counting: CopyCounting,

    #[arg(long, default_value = "Books to read")]
    pub page_title: String,

    #[arg(long, help = "Also write render.json next to the page")]
    pub render_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn books_file(&self) -> &str {
        &self.books_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn branches(&self) -> Option<&[String]> {
        if self.branches.is_empty() {
            None
        } else {
            Some(&self.branches)
        }
    }

    fn copy_counting(&self) -> CopyCounting {
        self.copy_counting
    }

    fn page_title(&self) -> &str {
        &self.page_title
    }

    fn write_render_json(&self) -> bool {
        self.render_json
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_path", &self.input_path)?;
        validation::validate_file_extension("books_file", &self.books_file, &["json"])?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_branch_names("branch", &self.branches)?;
        validation::validate_non_empty_string("page_title", &self.page_title)?;
        Ok(())
    }
}
