use crate::core::ConfigProvider;
use crate::domain::model::CopyCounting;
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub lookup: LookupInfo,
    pub source: SourceConfig,
    pub selection: Option<SelectionConfig>,
    pub render: Option<RenderConfig>,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: String,
    pub books_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub branches: Option<Vec<String>>,
    pub store_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub copy_counting: Option<CopyCounting>,
    pub page_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub page_file: Option<String>,
    pub write_render_json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LookupError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LookupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LIBRARY_DATA_DIR})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LookupError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("lookup.name", &self.lookup.name)?;
        validation::validate_path("source.input_path", &self.source.input_path)?;
        validation::validate_file_extension("source.books_file", self.books_file(), &["json"])?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_file_extension("load.page_file", self.page_file(), &["html", "htm"])?;
        validation::validate_file_extension(
            "selection.store_file",
            self.selection_file(),
            &["json"],
        )?;

        if let Some(branches) = self.selection.as_ref().and_then(|s| s.branches.as_ref()) {
            validation::validate_branch_names("selection.branches", branches)?;
        }

        if let Some(title) = self.render.as_ref().and_then(|r| r.page_title.as_deref()) {
            validation::validate_non_empty_string("render.page_title", title)?;
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.lookup.name
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.input_path
    }

    fn books_file(&self) -> &str {
        self.source.books_file.as_deref().unwrap_or("books.json")
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn branches(&self) -> Option<&[String]> {
        self.selection
            .as_ref()
            .and_then(|s| s.branches.as_deref())
    }

    fn copy_counting(&self) -> CopyCounting {
        self.render
            .as_ref()
            .and_then(|r| r.copy_counting)
            .unwrap_or_default()
    }

    fn page_title(&self) -> &str {
        self.render
            .as_ref()
            .and_then(|r| r.page_title.as_deref())
            .unwrap_or("Books to read")
    }

    fn page_file(&self) -> &str {
        self.load.page_file.as_deref().unwrap_or("index.html")
    }

    fn selection_file(&self) -> &str {
        self.selection
            .as_ref()
            .and_then(|s| s.store_file.as_deref())
            .unwrap_or("branchesSelected.json")
    }

    fn write_render_json(&self) -> bool {
        self.load.write_render_json.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
