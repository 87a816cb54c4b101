//! Conversion orchestration: page lookup, canvas selection, walk, order,
//! resolve, assemble.

use std::collections::{BTreeMap, HashMap};

use crate::{
    design::{Node, NodeKind},
    error::{FigstackError, FigstackResult},
    geometry::Canvas,
    merge,
    order::{self, FourFramePolicy, StackingPolicy},
    template::{self, AssembleOpts, Template},
    walk,
};

/// Source of design documents. The root node's children are the file's
/// top-level pages.
pub trait DesignProvider {
    fn get_document(&self, file_key: &str) -> FigstackResult<Node>;
}

/// Batched lookup of rendered-image URLs for design nodes. Implementations
/// filter out absent/empty entries before returning.
pub trait ImageResolver {
    fn fetch_images(
        &self,
        file_key: &str,
        node_ids: &[String],
        format: &str,
        scale: f64,
    ) -> FigstackResult<HashMap<String, String>>;
}

#[derive(Clone, Copy, Debug)]
pub struct ConvertOpts {
    pub output_width: u32,
    pub output_height: u32,
    /// Clip duration in seconds (video mode).
    pub duration: f64,
    /// Fetch rendered node images and substitute them for placeholders.
    pub populate_images: bool,
    /// Still-image output: no fps field, clip length 1.0.
    pub image_only: bool,
}

impl Default for ConvertOpts {
    fn default() -> Self {
        Self {
            output_width: 1200,
            output_height: 1200,
            duration: 5.0,
            populate_images: false,
            image_only: false,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct PageInfo {
    pub name: String,
    pub id: String,
}

/// One converted page in a whole-file batch.
#[derive(Clone, Debug, serde::Serialize)]
pub struct PageTemplate {
    pub original_name: String,
    pub template: Template,
}

pub struct Converter<P> {
    provider: P,
    policy: Box<dyn StackingPolicy>,
}

impl<P> Converter<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            policy: Box::new(FourFramePolicy),
        }
    }

    /// Replace the default 4-frame stacking policy.
    pub fn with_policy(mut self, policy: Box<dyn StackingPolicy>) -> Self {
        self.policy = policy;
        self
    }
}

impl<P: DesignProvider> Converter<P> {
    pub fn list_pages(&self, file_key: &str) -> FigstackResult<Vec<PageInfo>> {
        let document = self.provider.get_document(file_key)?;
        Ok(document
            .children
            .into_iter()
            .map(|page| PageInfo {
                name: page.name,
                id: page.id,
            })
            .collect())
    }

    fn extract_page(&self, file_key: &str, page_name: Option<&str>) -> FigstackResult<Node> {
        let document = self.provider.get_document(file_key)?;
        let pages = document.children;

        match page_name {
            None => pages
                .into_iter()
                .next()
                .ok_or_else(|| FigstackError::not_found("design file has no pages")),
            Some(name) => pages
                .into_iter()
                .find(|p| p.name == name)
                .ok_or_else(|| FigstackError::not_found(format!("page '{name}'"))),
        }
    }
}

impl<P: DesignProvider + ImageResolver> Converter<P> {
    /// Convert one page into a template document.
    ///
    /// The canvas comes from the page's first frame child when present, else
    /// from the requested output size. The main frame itself is skipped so it
    /// does not become a layer. Image-fetch failures degrade to unresolved
    /// placeholders; every other failure aborts the conversion.
    #[tracing::instrument(skip(self, opts))]
    pub fn convert(
        &self,
        file_key: &str,
        page_name: Option<&str>,
        opts: &ConvertOpts,
    ) -> FigstackResult<Template> {
        let page = self.extract_page(file_key, page_name)?;

        let main_frame = page.children.iter().find(|c| c.kind == NodeKind::Frame);

        let canvas = match main_frame {
            Some(frame) => {
                let bbox = frame.bbox();
                let w = if bbox.width > 0.0 {
                    bbox.width
                } else {
                    f64::from(opts.output_width)
                };
                let h = if bbox.height > 0.0 {
                    bbox.height
                } else {
                    f64::from(opts.output_height)
                };
                Canvas::new(w, h)?
            }
            None => Canvas::new(
                f64::from(opts.output_width),
                f64::from(opts.output_height),
            )?,
        };

        let mut layers = match main_frame {
            Some(frame) => walk::walk_children(frame, &canvas),
            None => page
                .children
                .iter()
                .flat_map(|child| walk::walk(child, &canvas))
                .collect(),
        };
        tracing::debug!(layers = layers.len(), "classified page layers");

        let resolved = if opts.populate_images {
            let node_ids = match main_frame {
                Some(frame) => walk::collect_render_node_ids(frame, true),
                None => page
                    .children
                    .iter()
                    .flat_map(|child| walk::collect_render_node_ids(child, false))
                    .collect(),
            };
            self.fetch_resolved_images(file_key, &node_ids)
        } else {
            HashMap::new()
        };

        order::sort_layers(&mut layers, self.policy.as_ref());
        let merge = merge::resolve_layers(&mut layers, &resolved);

        Ok(template::assemble(
            layers,
            merge,
            &AssembleOpts {
                output_width: opts.output_width,
                output_height: opts.output_height,
                duration: opts.duration,
                image_only: opts.image_only,
            },
        ))
    }

    /// Convert every page in a file. Keys are page names sanitized to
    /// `[A-Za-z0-9_-]`; the original name is preserved alongside each
    /// template. A failure on any page aborts the whole batch.
    pub fn convert_all_pages(
        &self,
        file_key: &str,
        opts: &ConvertOpts,
    ) -> FigstackResult<BTreeMap<String, PageTemplate>> {
        let pages = self.list_pages(file_key)?;
        let mut templates = BTreeMap::new();

        for page in pages {
            tracing::info!(page = %page.name, "converting page");
            let template = self.convert(file_key, Some(&page.name), opts)?;
            templates.insert(
                sanitize_page_name(&page.name),
                PageTemplate {
                    original_name: page.name,
                    template,
                },
            );
        }

        Ok(templates)
    }

    /// One batched fetch per conversion; failure is logged and degrades to
    /// an empty map so the template still comes out with placeholders.
    fn fetch_resolved_images(&self, file_key: &str, node_ids: &[String]) -> HashMap<String, String> {
        if node_ids.is_empty() {
            return HashMap::new();
        }
        tracing::debug!(nodes = node_ids.len(), "fetching rendered node images");
        match self.provider.fetch_images(file_key, node_ids, "png", 2.0) {
            Ok(images) => {
                tracing::debug!(resolved = images.len(), "fetched rendered node images");
                images
            }
            Err(err) => {
                tracing::warn!(error = %err, "image fetch failed; leaving placeholders unresolved");
                HashMap::new()
            }
        }
    }
}

/// Replace anything outside alphanumerics, underscore and hyphen with an
/// underscore, mirroring the keys' use as file names.
pub fn sanitize_page_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
