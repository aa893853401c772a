use crate::domain::model::{BranchSelection, Catalogue, CopyCounting, RenderOutput};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn books_file(&self) -> &str;
    fn output_path(&self) -> &str;
    /// Branches given explicitly for this run. `None` means use the stored selection.
    fn branches(&self) -> Option<&[String]>;
    fn copy_counting(&self) -> CopyCounting;
    fn page_title(&self) -> &str;
    fn page_file(&self) -> &str {
        "index.html"
    }
    fn selection_file(&self) -> &str {
        "branchesSelected.json"
    }
    fn write_render_json(&self) -> bool {
        false
    }
}

/// Where the branch selection lives between runs.
pub trait SelectionStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<BranchSelection>> + Send;
    fn save(
        &self,
        selection: &BranchSelection,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Catalogue>;
    async fn transform(&self, catalogue: Catalogue) -> Result<RenderOutput>;
    async fn load(&self, output: RenderOutput) -> Result<String>;
}
