//! Fire-and-forget preview regeneration with last-writer-wins sequencing.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{mpsc, watch};

use super::{CompositeLayer, ImageCompositor};

/// Latest applied composite, tagged with the request token that produced it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Preview {
    pub token: u64,
    /// Flattened PNG, or `None` when nothing is composited.
    pub image: Option<Vec<u8>>,
}

struct CompositeJob {
    token: u64,
    layers: Vec<CompositeLayer>,
}

/// Bridges the synchronous editor with the async compositor.
///
/// Every history mutation queues a recomputation tagged with a monotonically
/// increasing token; a merge whose token is no longer the latest issued is
/// discarded when it completes, so the preview always reflects the newest
/// request regardless of completion order. In-flight merges are never
/// cancelled.
#[derive(Clone)]
pub struct PreviewGenerator {
    request_tx: mpsc::UnboundedSender<CompositeJob>,
    issued: Arc<AtomicU64>,
    preview_rx: watch::Receiver<Preview>,
}

impl PreviewGenerator {
    /// Creates a generator and spawns its worker on the given runtime.
    pub fn new(
        runtime_handle: &tokio::runtime::Handle,
        compositor: Arc<dyn ImageCompositor>,
    ) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<CompositeJob>();
        let (preview_tx, preview_rx) = watch::channel(Preview::default());
        let issued = Arc::new(AtomicU64::new(0));
        let issued_worker = issued.clone();

        runtime_handle.spawn(async move {
            while let Some(job) = request_rx.recv().await {
                let image = match compositor.merge(job.layers).await {
                    Ok(image) => image,
                    Err(err) => {
                        log::error!("composite request {} failed: {err}", job.token);
                        // Keep the previous preview but mark the request as
                        // handled so callers waiting on this token settle.
                        preview_tx.borrow().image.clone()
                    }
                };

                let latest = issued_worker.load(Ordering::Acquire);
                if job.token != latest {
                    log::debug!(
                        "discarding stale composite {} (latest issued {latest})",
                        job.token
                    );
                    continue;
                }

                let _ = preview_tx.send(Preview {
                    token: job.token,
                    image,
                });
            }
        });

        Self {
            request_tx,
            issued,
            preview_rx,
        }
    }

    /// Queues a recomputation of the preview; returns the sequence token.
    ///
    /// Non-blocking: the merge happens on the worker and the result is
    /// applied to the shared preview once available.
    pub fn regenerate(&self, layers: Vec<CompositeLayer>) -> u64 {
        let token = self.issued.fetch_add(1, Ordering::AcqRel) + 1;
        if self.request_tx.send(CompositeJob { token, layers }).is_err() {
            log::error!("preview worker is gone; composite request {token} dropped");
        }
        token
    }

    /// The latest applied preview image, if any.
    pub fn current(&self) -> Option<Vec<u8>> {
        self.preview_rx.borrow().image.clone()
    }

    /// Waits until the most recently issued request has been applied and
    /// returns the resulting preview.
    pub async fn settled(&self) -> Option<Vec<u8>> {
        let mut rx = self.preview_rx.clone();
        loop {
            let target = self.issued.load(Ordering::Acquire);
            if rx.borrow_and_update().token >= target {
                return rx.borrow().image.clone();
            }
            if rx.changed().await.is_err() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::{CairoCompositor, CompositeError};
    use crate::draw::{DrawingSurface, StrokeStyle, color::RED};
    use async_trait::async_trait;
    use std::time::Duration;

    fn sample_layer() -> CompositeLayer {
        let mut surface = DrawingSurface::new(20, 20).unwrap();
        surface
            .stroke_rect(
                (2, 2),
                (18, 18),
                &StrokeStyle {
                    color: RED,
                    width: 3.0,
                },
            )
            .unwrap();
        CompositeLayer {
            source: Some(surface.encode_png().unwrap()),
        }
    }

    #[tokio::test]
    async fn fresh_generator_settles_to_empty_preview() {
        let generator = PreviewGenerator::new(
            &tokio::runtime::Handle::current(),
            Arc::new(CairoCompositor),
        );
        assert!(generator.settled().await.is_none());
        assert!(generator.current().is_none());
    }

    #[tokio::test]
    async fn regenerate_applies_the_merge_result() {
        let generator = PreviewGenerator::new(
            &tokio::runtime::Handle::current(),
            Arc::new(CairoCompositor),
        );
        let token = generator.regenerate(vec![sample_layer()]);
        assert_eq!(token, 1);

        let preview = generator.settled().await;
        assert!(preview.is_some());
        assert_eq!(generator.current(), preview);
    }

    #[tokio::test]
    async fn empty_layers_clear_the_preview() {
        let generator = PreviewGenerator::new(
            &tokio::runtime::Handle::current(),
            Arc::new(CairoCompositor),
        );
        generator.regenerate(vec![sample_layer()]);
        assert!(generator.settled().await.is_some());

        generator.regenerate(Vec::new());
        assert!(generator.settled().await.is_none());
    }

    /// Compositor whose first merge is slow, so an older request completes
    /// after a newer one was issued.
    struct SlowFirstCompositor;

    #[async_trait]
    impl ImageCompositor for SlowFirstCompositor {
        async fn merge(
            &self,
            layers: Vec<CompositeLayer>,
        ) -> Result<Option<Vec<u8>>, CompositeError> {
            if layers.is_empty() {
                tokio::time::sleep(Duration::from_millis(30)).await;
                return Ok(Some(vec![0xde, 0xad]));
            }
            Ok(Some(vec![0xbe, 0xef]))
        }
    }

    #[tokio::test]
    async fn stale_results_are_discarded() {
        let generator = PreviewGenerator::new(
            &tokio::runtime::Handle::current(),
            Arc::new(SlowFirstCompositor),
        );
        // The slow request is immediately superseded.
        generator.regenerate(Vec::new());
        generator.regenerate(vec![sample_layer()]);

        let preview = generator.settled().await;
        assert_eq!(preview, Some(vec![0xbe, 0xef]));

        // Give the slow merge time to finish; it must not overwrite.
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(generator.current(), Some(vec![0xbe, 0xef]));
    }
}
