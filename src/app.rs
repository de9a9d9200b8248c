use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use reqwest::Client;

use crate::{
    api::ApiClient,
    cli::Commands,
    config::AppConfig,
    domain::Category,
    export,
    infrastructure::directories::ResolvedPaths,
    preview::PreviewRegistry,
    render::render_results,
    session::IntakeSession,
    upload,
};

pub struct IntakeApp {
    config: AppConfig,
    paths: ResolvedPaths,
    client: ApiClient,
    session: IntakeSession,
}

impl IntakeApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(format!("doc-intake/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let client = ApiClient::new(http_client, &config.api, config.features);
        let session = IntakeSession::new(client.clone(), PreviewRegistry::new());

        Ok(Self {
            config,
            paths,
            client,
            session,
        })
    }

    pub async fn run(mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Classify {
                files,
                output,
                no_export,
            } => {
                let export_dir = (!no_export)
                    .then(|| output.unwrap_or_else(|| self.paths.export_dir.clone()));
                self.classify(&files, export_dir.as_deref()).await
            }
            Commands::Show { input } => self.show(&input),
            Commands::Remove {
                input,
                category,
                id,
                output,
            } => self.remove(&input, category, id, output),
            Commands::Ping => self.ping().await,
        }
    }

    async fn classify(&mut self, paths: &[PathBuf], export_dir: Option<&Path>) -> Result<()> {
        let files = upload::load_batch(paths, &self.config.upload).await?;

        let result = match self.session.submit(&files).await {
            Ok(result) => result.clone(),
            Err(err) => {
                tracing::error!(target: "api", error = %err, "processing failed");
                bail!("Processing failed: {}", err.user_message());
            }
        };

        println!("Successfully classified {} documents", files.len());
        print!("{}", render_results(&result, self.session.file_urls()));

        if let Some(dir) = export_dir {
            if result.is_empty() {
                tracing::warn!(target: "export", "No results to download");
            } else {
                let path = export::export_results(dir, &result)?;
                println!("Results saved to {}", path.display());
            }
        }
        Ok(())
    }

    fn show(&mut self, input: &Path) -> Result<()> {
        let result = export::load_results(input)?;
        self.session.set_result(result);
        print!("{}", render_results(self.session.result(), None));
        Ok(())
    }

    fn remove(&mut self, input: &Path, category: Category, id: i64, output: Option<PathBuf>) -> Result<()> {
        let result = export::load_results(input)?;
        self.session.set_result(result);

        match self.session.remove_item(category, id) {
            Some(removal) => {
                let names = if removal.filenames.is_empty() {
                    format!("{} {}", category.id_field(), id)
                } else {
                    removal.filenames.join(", ")
                };
                println!("{} has been removed from {}", names, category.title());
            }
            None => println!("Nothing to remove: no {} with {} {}", category, category.id_field(), id),
        }

        let target = output.unwrap_or_else(|| input.to_path_buf());
        export::save_results(&target, self.session.result())
            .with_context(|| format!("failed to write {}", target.display()))?;
        print!("{}", render_results(self.session.result(), None));
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let client = &self.client;
        match client.ping().await {
            Ok(status) => {
                println!("Endpoint reachable - {} returned {}", client.categorize_url(), status);
                Ok(())
            }
            Err(err) => bail!("{} is not reachable: {}", client.categorize_url(), err.user_message()),
        }
    }
}
