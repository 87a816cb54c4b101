//! Blocking REST client for the Figma API.
//!
//! Two endpoints back the converter: the file endpoint returns the design
//! document tree, the images endpoint returns rendered PNG URLs for a batch
//! of node ids. Errors are wrapped with the failing operation's name.

use std::collections::HashMap;

use crate::{
    convert::{DesignProvider, ImageResolver},
    design::Node,
    error::{FigstackError, FigstackResult},
};

const API_BASE: &str = "https://api.figma.com/v1";

pub struct FigmaClient {
    token: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, serde::Deserialize)]
struct FileResponse {
    document: Node,
}

#[derive(Debug, serde::Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    err: Option<String>,
    #[serde(default)]
    images: HashMap<String, Option<String>>,
}

impl FigmaClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: API_BASE.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Point the client at a different API host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn get(&self, op: &str, url: &str) -> FigstackResult<reqwest::blocking::Response> {
        let response = self
            .client
            .get(url)
            .header("X-Figma-Token", &self.token)
            .send()
            .map_err(|e| FigstackError::upstream(format!("{op}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FigstackError::upstream(format!(
                "{op}: http {status}: {body}"
            )));
        }
        Ok(response)
    }
}

impl DesignProvider for FigmaClient {
    fn get_document(&self, file_key: &str) -> FigstackResult<Node> {
        let url = format!("{}/files/{file_key}", self.base_url);
        let response = self.get("get file", &url)?;
        let file: FileResponse = response
            .json()
            .map_err(|e| FigstackError::serde(format!("get file: {e}")))?;
        Ok(file.document)
    }
}

impl ImageResolver for FigmaClient {
    fn fetch_images(
        &self,
        file_key: &str,
        node_ids: &[String],
        format: &str,
        scale: f64,
    ) -> FigstackResult<HashMap<String, String>> {
        if node_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let url = format!(
            "{}/images/{file_key}?ids={}&format={format}&scale={scale}",
            self.base_url,
            node_ids.join(",")
        );
        let response = self.get("fetch images", &url)?;
        let body: ImagesResponse = response
            .json()
            .map_err(|e| FigstackError::serde(format!("fetch images: {e}")))?;

        if let Some(err) = body.err {
            return Err(FigstackError::upstream(format!("fetch images: {err}")));
        }

        // Nodes the renderer could not export come back null or blank.
        Ok(body
            .images
            .into_iter()
            .filter_map(|(id, url)| {
                url.filter(|u| !u.trim().is_empty()).map(|u| (id, u))
            })
            .collect())
    }
}
