//! Shared fixtures for the service tests: an in-memory image fetcher and
//! encoded image generators.

use crate::models::Post;
use crate::services::filter::ImageFetcher;
use anyhow::Result;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Serves canned bodies instead of the network and records every fetch, so
/// tests can assert which URLs were downloaded and that no temp file leaks.
pub struct MockFetcher {
    bodies: HashMap<String, Vec<u8>>,
    fetched: Mutex<Vec<String>>,
    temp_paths: Mutex<Vec<PathBuf>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            fetched: Mutex::new(Vec::new()),
            temp_paths: Mutex::new(Vec::new()),
        }
    }

    pub fn with_body(mut self, url: &str, body: Vec<u8>) -> Self {
        self.bodies.insert(url.to_string(), body);
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn temp_paths(&self) -> Vec<PathBuf> {
        self.temp_paths.lock().unwrap().clone()
    }
}

impl ImageFetcher for MockFetcher {
    async fn fetch_to_temp(&self, url: &str) -> Result<NamedTempFile> {
        self.fetched.lock().unwrap().push(url.to_string());
        let body = self
            .bodies
            .get(url)
            .ok_or_else(|| anyhow::anyhow!("no fixture registered for {url}"))?;

        let mut file = NamedTempFile::new()?;
        file.write_all(body)?;
        self.temp_paths.lock().unwrap().push(file.path().to_path_buf());
        Ok(file)
    }
}

pub fn post(url: &str) -> Post {
    Post {
        id: format!("id-{}", url.len()),
        url: url.to_string(),
        title: String::new(),
        created_utc: 1_700_000_000.0,
    }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, image::ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, image::ImageFormat::Jpeg)
}

fn encode(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([40, 90, 160]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, format)
        .unwrap();
    out.into_inner()
}
