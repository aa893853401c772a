use crate::core::page::render_page;
use crate::core::render_pass::render_pass;
use crate::core::selection_store::StorageSelectionStore;
use crate::core::{
    BranchSelection, Catalogue, ConfigProvider, CopyCounting, Pipeline, RenderOutput, Result,
    SelectionStore, Storage,
};

/// Reads the catalogue from `source`, writes the page and the saved
/// selection to `target`.
pub struct LookupPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) source: S,
    pub(crate) target: S,
    pub(crate) selections: StorageSelectionStore<S>,
    pub(crate) config: C,
}

impl<S: Storage + Clone, C: ConfigProvider> LookupPipeline<S, C> {
    pub fn new(source: S, target: S, config: C) -> Self {
        let selections = StorageSelectionStore::new(target.clone(), config.selection_file());
        Self {
            source,
            target,
            selections,
            config,
        }
    }
}

impl<S: Storage, C: ConfigProvider> LookupPipeline<S, C> {
    /// Explicit branches win; otherwise whatever was saved last time.
    async fn current_selection(&self) -> Result<BranchSelection> {
        match self.config.branches() {
            Some(branches) => {
                tracing::debug!("Using {} branches from configuration", branches.len());
                Ok(branches.iter().cloned().collect())
            }
            None => self.selections.load().await,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for LookupPipeline<S, C> {
    async fn extract(&self) -> Result<Catalogue> {
        tracing::debug!("Reading catalogue {}", self.config.books_file());
        let data = self.source.read_file(self.config.books_file()).await?;
        let catalogue = Catalogue::from_json_slice(&data)?;

        if catalogue.books.is_empty() {
            tracing::warn!("Catalogue {} has no books", self.config.books_file());
        }

        Ok(catalogue)
    }

    async fn transform(&self, catalogue: Catalogue) -> Result<RenderOutput> {
        let selection = self.current_selection().await?;

        let counting = self.config.copy_counting();
        if counting == CopyCounting::Inclusive {
            tracing::warn!("Inclusive copy counting counts nearby copies again in \"plus N more\"");
        }

        let pass = render_pass(&catalogue.books, &selection, counting);
        Ok(RenderOutput { catalogue, pass })
    }

    async fn load(&self, output: RenderOutput) -> Result<String> {
        let page = render_page(
            &output.catalogue,
            &output.pass,
            self.config.page_title(),
            chrono::Local::now(),
        );

        tracing::debug!("Writing page ({} bytes)", page.len());
        self.target
            .write_file(self.config.page_file(), page.as_bytes())
            .await?;

        if self.config.write_render_json() {
            let json = serde_json::to_vec_pretty(&output.pass)?;
            self.target.write_file("render.json", &json).await?;
        }

        self.selections.save(&output.pass.selection).await?;

        Ok(format!(
            "{}/{}",
            self.config.output_path(),
            self.config.page_file()
        ))
    }
}
