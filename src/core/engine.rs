use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct LookupEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> LookupEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract, one render pass, load. Returns where the page was written.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting library lookup render");

        let catalogue = self.pipeline.extract().await?;
        tracing::info!("Loaded {} books", catalogue.books.len());

        let output = self.pipeline.transform(catalogue).await?;
        let nearby = output
            .pass
            .books
            .iter()
            .filter(|book| book.has_local_copies)
            .count();
        tracing::info!(
            "Rendered {} books, {} with copies nearby ({} branches selected)",
            output.pass.books.len(),
            nearby,
            output.pass.selection.len()
        );

        let output_path = self.pipeline.load(output).await?;
        tracing::info!("Output saved to: {} in {:?}", output_path, started.elapsed());

        Ok(output_path)
    }
}
