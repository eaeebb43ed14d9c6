//! End-to-end listing pipeline.

use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::tools::download::{build_download_client, download_images, DownloadedImage};
use crate::tools::estimate::{estimate_budget, BudgetEstimate};
use crate::tools::extract::{extract_with_policy, ExtractPolicy, ImageCandidate};
use crate::tools::fetch::{load_cookies, HttpFetcher, PageFetcher};
use crate::tools::label::infer_label;
use crate::tools::render::{build_render_client, render_room};
use crate::tools::report::{build_report, executive_summary, ReportData, RoomAsset};

const IMAGES_DIR: &str = "images";
const RENDERS_DIR: &str = "renders";

/// Images found on one listing page.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub source_url: String,
    pub policy: &'static str,
    pub images: Vec<ImageCandidate>,
}

/// Outcome of [`Engine::run`].
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub source_url: String,
    pub policy: &'static str,
    pub found: usize,
    pub downloaded: usize,
    pub floorplans: usize,
    pub rendered: usize,
    pub budget: BudgetEstimate,
    pub report_path: PathBuf,
}

pub struct Engine {
    fetcher: Box<dyn PageFetcher>,
    config: Config,
    download_client: Client,
    render_client: Client,
}

impl Engine {
    /// Engine with the production HTTP fetcher, seeded with cookies when
    /// `config.run.cookies` is set.
    pub fn new(config: Config) -> Result<Self> {
        let jar = match &config.run.cookies {
            Some(path) => Some(Arc::new(load_cookies(path)?)),
            None => None,
        };
        let fetcher = HttpFetcher::new(config.fetch.clone(), jar)?;
        Self::with_fetcher(Box::new(fetcher), config)
    }

    pub fn with_fetcher(fetcher: Box<dyn PageFetcher>, config: Config) -> Result<Self> {
        Ok(Self {
            download_client: build_download_client(&config.download)?,
            render_client: build_render_client(&config.render)?,
            fetcher,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch a listing page and extract its image candidates.
    pub async fn collect(&self, url: &str) -> Result<Collection> {
        let markup = self.fetcher.fetch_page(url).await?;
        let policy = ExtractPolicy::for_url(url);
        let images = extract_with_policy(&markup, &policy);
        info!(url, policy = policy.name(), images = images.len(), "collected listing images");
        Ok(Collection {
            source_url: url.to_string(),
            policy: policy.name(),
            images,
        })
    }

    /// Collect, download, label, optionally render, estimate and report.
    pub async fn run(&self, url: &str) -> Result<RunSummary> {
        let collection = self.collect(url).await?;
        if collection.images.is_empty() {
            return Err(Error::NoImages(url.into()));
        }

        let run = &self.config.run;
        let downloaded = download_images(
            &self.download_client,
            url,
            &collection.images,
            &run.output_dir.join(IMAGES_DIR),
            &self.config.download,
        )
        .await?;
        if downloaded.is_empty() {
            return Err(Error::NoImages(url.into()));
        }

        let mut render = run.render;
        if render && self.config.render.api_token.is_none() {
            warn!("rendering requested but REPLICATE_API_TOKEN is not set; skipping renders");
            render = false;
        }

        let mut assets = Vec::with_capacity(downloaded.len());
        for image in &downloaded {
            let label = infer_label(image.alt.as_deref(), &image.source_url);
            let renovated_path = if render && !image.is_floorplan {
                self.render_asset(image, label).await
            } else {
                None
            };
            assets.push(RoomAsset {
                label: label.to_string(),
                source_url: image.source_url.clone(),
                original_path: image.local_path.clone(),
                renovated_path,
                is_floorplan: image.is_floorplan,
            });
        }

        let budget = estimate_budget(
            assets
                .iter()
                .filter(|a| !a.is_floorplan)
                .map(|a| a.label.as_str()),
        );
        let address = run
            .address
            .clone()
            .unwrap_or_else(|| default_address(collection.policy));
        let data = ReportData {
            address,
            source_url: url.to_string(),
            design_style: run.design_style.clone(),
            executive_summary: executive_summary(assets.len(), &run.design_style, &budget),
            assets,
            budget,
            generated_at: Utc::now(),
        };
        let report_path = build_report(&data, &run.output_dir)?;

        Ok(RunSummary {
            source_url: data.source_url,
            policy: collection.policy,
            found: collection.images.len(),
            downloaded: downloaded.len(),
            floorplans: data.assets.iter().filter(|a| a.is_floorplan).count(),
            rendered: data
                .assets
                .iter()
                .filter(|a| a.renovated_path.is_some())
                .count(),
            budget: data.budget,
            report_path,
        })
    }

    async fn render_asset(&self, image: &DownloadedImage, label: &str) -> Option<PathBuf> {
        let name = image.local_path.file_name()?;
        let dest = self.config.run.output_dir.join(RENDERS_DIR).join(name);
        let prompt = format!(
            "{} interior design render of a {}",
            self.config.run.design_style, label
        );
        match render_room(
            &self.render_client,
            &image.source_url,
            &dest,
            &prompt,
            &self.config.render,
        )
        .await
        {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(url = %image.source_url, error = %e, "render failed");
                None
            }
        }
    }
}

fn default_address(policy: &str) -> String {
    match policy {
        "generic" => "Listing".into(),
        site => {
            let mut chars = site.chars();
            match chars.next() {
                Some(first) => format!("{}{} Listing", first.to_uppercase(), chars.as_str()),
                None => "Listing".into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticFetcher(&'static str);

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch_page(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct BlockedFetcher;

    #[async_trait]
    impl PageFetcher for BlockedFetcher {
        async fn fetch_page(&self, url: &str) -> Result<String> {
            Err(Error::Blocked { url: url.into() })
        }
    }

    const ZILLOW_PAGE: &str = r#"<html><body>
        <img src="https://photos.zillowstatic.com/fp/kitchen-1.jpg" alt="Kitchen">
        <img src="https://www.zillow.com/static/logo.png" alt="Zillow">
        </body></html>"#;

    fn engine(fetcher: Box<dyn PageFetcher>, output: &std::path::Path) -> Engine {
        let mut config = Config::default();
        config.run.output_dir = output.to_path_buf();
        Engine::with_fetcher(fetcher, config).unwrap()
    }

    #[tokio::test]
    async fn collect_picks_policy_from_url() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(Box::new(StaticFetcher(ZILLOW_PAGE)), dir.path());

        let zillow = engine
            .collect("https://www.zillow.com/homedetails/1_zpid/")
            .await
            .unwrap();
        assert_eq!(zillow.policy, "zillow");
        assert_eq!(zillow.images.len(), 1);
        assert_eq!(
            zillow.images[0].url(),
            "https://photos.zillowstatic.com/fp/kitchen-1.jpg"
        );

        let other = engine.collect("https://listings.example.com/9").await.unwrap();
        assert_eq!(other.policy, "generic");
    }

    #[tokio::test]
    async fn run_without_images_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(Box::new(StaticFetcher("<html></html>")), dir.path());
        let err = engine.run("https://www.zillow.com/homedetails/1_zpid/").await;
        assert!(matches!(err, Err(Error::NoImages(_))));
        assert!(!dir.path().join("report.html").exists());
    }

    #[tokio::test]
    async fn fetch_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(Box::new(BlockedFetcher), dir.path());
        let err = engine.collect("https://www.zillow.com/homedetails/1_zpid/").await;
        assert!(matches!(err, Err(Error::Blocked { .. })));
    }

    #[test]
    fn default_address_names_the_site() {
        assert_eq!(default_address("zillow"), "Zillow Listing");
        assert_eq!(default_address("generic"), "Listing");
    }
}
