use crate::services::filter::{CandidateFilter, ImageFetcher};
use crate::services::listing_source::ListingSource;
use crate::utils::copy_wallpaper;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Configuration for wallpaper selection.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    pub output_dir: PathBuf,
    pub min_width: u32,
    pub min_height: u32,
    pub screens: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            min_width: 1920,
            min_height: 1080,
            screens: 3,
        }
    }
}

/// One wallpaper that made it into the output directory.
#[derive(Debug, Clone)]
pub struct SelectedWallpaper {
    pub url: String,
    pub destination: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Report structure for a selection run.
#[derive(Debug, Clone)]
pub struct SelectionReport {
    pub requested: usize,
    pub wallpapers: Vec<SelectedWallpaper>,
}

impl SelectionReport {
    pub fn copied(&self) -> usize {
        self.wallpapers.len()
    }

    /// A finite listing may run out before every screen gets a wallpaper;
    /// that is a shortfall, not an error.
    pub fn is_complete(&self) -> bool {
        self.copied() >= self.requested
    }
}

/// Bounded take over the filtered candidate stream: pull candidates until
/// `screens` wallpapers are copied or the source runs dry, writing the i-th
/// one to `output_dir/reddit-<i>`.
pub async fn select_wallpapers<F: ImageFetcher>(
    source: ListingSource<'_>,
    fetcher: &F,
    config: &SelectionConfig,
) -> Result<SelectionReport> {
    let mut filter = CandidateFilter::new(source, fetcher, config.min_width, config.min_height);
    let mut wallpapers = Vec::new();

    while wallpapers.len() < config.screens {
        let Some(candidate) = filter.next().await? else {
            break;
        };

        let index = wallpapers.len();
        info!(
            "Using image from url {} for screen {} filename {}",
            candidate.url,
            index,
            candidate.path().display()
        );

        let destination = copy_wallpaper(candidate.path(), &config.output_dir, index)?;
        debug!(
            "Copied {} to {}",
            candidate.path().display(),
            destination.display()
        );

        wallpapers.push(SelectedWallpaper {
            url: candidate.url.clone(),
            destination,
            width: candidate.width,
            height: candidate.height,
        });
        // The candidate drops here: its temp file is removed only after the
        // copy has landed.
    }

    Ok(SelectionReport {
        requested: config.screens,
        wallpapers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{jpeg_bytes, png_bytes, post, MockFetcher};
    use std::fs;

    fn config(output_dir: PathBuf, screens: usize) -> SelectionConfig {
        SelectionConfig {
            output_dir,
            min_width: 1920,
            min_height: 1080,
            screens,
        }
    }

    #[tokio::test]
    async fn test_selection_scenario() {
        // min (1920, 1080), screens = 2:
        //   imgA 2000x1200 jpeg  -> kept as reddit-0
        //   linkB html           -> excluded, never fetched
        //   imgC 1800x1000 png   -> too small
        //   imgD 1920x1080 jpeg  -> kept as reddit-1
        let img_a = jpeg_bytes(2000, 1200);
        let img_d = jpeg_bytes(1920, 1080);
        let fetcher = MockFetcher::new()
            .with_body("https://i.example.com/a.jpg", img_a.clone())
            .with_body("https://i.example.com/c.png", png_bytes(1800, 1000))
            .with_body("https://i.example.com/d.jpg", img_d.clone());
        let source = ListingSource::from_posts(vec![
            post("https://i.example.com/a.jpg"),
            post("https://example.com/b.html"),
            post("https://i.example.com/c.png"),
            post("https://i.example.com/d.jpg"),
        ]);

        let out = tempfile::tempdir().unwrap();
        let report = select_wallpapers(source, &fetcher, &config(out.path().to_path_buf(), 2))
            .await
            .unwrap();

        assert_eq!(report.copied(), 2);
        assert!(report.is_complete());
        assert_eq!(report.wallpapers[0].url, "https://i.example.com/a.jpg");
        assert_eq!(report.wallpapers[1].url, "https://i.example.com/d.jpg");

        assert_eq!(fs::read(out.path().join("reddit-0")).unwrap(), img_a);
        assert_eq!(fs::read(out.path().join("reddit-1")).unwrap(), img_d);
        assert!(!out.path().join("reddit-2").exists());

        // The html link was excluded on the sniff alone.
        assert!(!fetcher.fetched().contains(&"https://example.com/b.html".to_string()));
    }

    #[tokio::test]
    async fn test_selection_stops_as_soon_as_enough_matches() {
        let fetcher = MockFetcher::new()
            .with_body("https://i.example.com/a.png", png_bytes(1920, 1080))
            .with_body("https://i.example.com/b.png", png_bytes(1920, 1080));
        let source = ListingSource::from_posts(vec![
            post("https://i.example.com/a.png"),
            post("https://i.example.com/b.png"),
        ]);

        let out = tempfile::tempdir().unwrap();
        let report = select_wallpapers(source, &fetcher, &config(out.path().to_path_buf(), 1))
            .await
            .unwrap();

        assert_eq!(report.copied(), 1);
        // The second candidate was never pulled, so never fetched.
        assert_eq!(fetcher.fetched(), vec!["https://i.example.com/a.png"]);
    }

    #[tokio::test]
    async fn test_exhausted_source_produces_fewer_wallpapers() {
        let fetcher = MockFetcher::new()
            .with_body("https://i.example.com/only.png", png_bytes(2560, 1440));
        let source = ListingSource::from_posts(vec![
            post("https://i.example.com/only.png"),
            post("https://example.com/page.html"),
        ]);

        let out = tempfile::tempdir().unwrap();
        let report = select_wallpapers(source, &fetcher, &config(out.path().to_path_buf(), 3))
            .await
            .unwrap();

        assert_eq!(report.copied(), 1);
        assert!(!report.is_complete());
        assert!(out.path().join("reddit-0").exists());
        assert!(!out.path().join("reddit-1").exists());
    }

    #[tokio::test]
    async fn test_no_temp_files_survive_the_run() {
        let fetcher = MockFetcher::new()
            .with_body("https://i.example.com/a.png", png_bytes(1920, 1080))
            .with_body("https://i.example.com/small.png", png_bytes(100, 100))
            .with_body("https://i.example.com/broken.jpg", b"garbage".to_vec());
        let source = ListingSource::from_posts(vec![
            post("https://i.example.com/small.png"),
            post("https://i.example.com/broken.jpg"),
            post("https://i.example.com/a.png"),
        ]);

        let out = tempfile::tempdir().unwrap();
        select_wallpapers(source, &fetcher, &config(out.path().to_path_buf(), 2))
            .await
            .unwrap();

        assert_eq!(fetcher.temp_paths().len(), 3);
        assert!(fetcher.temp_paths().iter().all(|p| !p.exists()));
    }

    #[tokio::test]
    async fn test_existing_output_files_are_overwritten() {
        let img = png_bytes(1920, 1080);
        let fetcher = MockFetcher::new().with_body("https://i.example.com/a.png", img.clone());
        let source = ListingSource::from_posts(vec![post("https://i.example.com/a.png")]);

        let out = tempfile::tempdir().unwrap();
        fs::write(out.path().join("reddit-0"), b"stale wallpaper").unwrap();

        select_wallpapers(source, &fetcher, &config(out.path().to_path_buf(), 1))
            .await
            .unwrap();

        assert_eq!(fs::read(out.path().join("reddit-0")).unwrap(), img);
    }
}
