use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct SumEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SumEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<P::Output> {
        let started = Instant::now();

        tracing::debug!("Reading sheet...");
        let table = self.pipeline.extract().await?;
        tracing::debug!(
            "Read sheet '{}': {} columns, {} rows",
            table.name,
            table.headers.len(),
            table.rows.len()
        );

        let output = self.pipeline.transform(table).await?;
        let output = self.pipeline.load(output).await?;

        tracing::debug!("Finished in {:?}", started.elapsed());
        Ok(output)
    }
}
