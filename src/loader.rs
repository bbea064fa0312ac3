//! Frame resource loading, caching and progress tracking.
//!
//! [`ResourceCache`] is a session-scoped service shared by every
//! [`SequencePlayer`](crate::SequencePlayer). It keeps decoded frames by
//! path and guarantees at most one fetch in flight per path: concurrent
//! requests for the same path wait on the same fetch.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`, no `Send` bounds),
//! so it runs unchanged in native and WASM hosts.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::{Rc, Weak};

use futures_util::future::{self, FutureExt, LocalBoxFuture, Shared};
use futures_util::stream::{FuturesUnordered, StreamExt};

use crate::{Catalog, ImageSequence};

/// Error type for frame fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The resource could not be retrieved
    NotFound { path: String },
    /// The resource was retrieved but couldn't be decoded
    Decode { path: String, reason: String },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::NotFound { path } => write!(f, "Failed to load frame: {}", path),
            FetchError::Decode { path, reason } => {
                write!(f, "Failed to decode frame {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Trait for async frame image sources.
///
/// Implement this for your I/O mechanism (browser image loading, HTTP,
/// filesystem, ...). No `Send` bounds, so it works in both native and
/// WASM (single-threaded) contexts.
pub trait FrameFetcher {
    /// Decoded bitmap handle. Cloning should be cheap (a reference or `Rc`).
    type Image: Clone;

    /// Fetch and decode the frame at `path`.
    fn fetch(&self, path: &str) -> impl Future<Output = Result<Self::Image, FetchError>>;
}

/// Progress information for loading one sequence.
///
/// A frame counts as settled whether it loaded or failed, so progress
/// always reaches 100% once every fetch has finished.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadingProgress {
    /// Frames that finished loading, successfully or not
    pub settled: usize,
    /// Frames that failed to load
    pub failed: usize,
    /// Total number of frames requested
    pub total: usize,
}

impl LoadingProgress {
    /// Create a tracker expecting `total` frames.
    pub fn new(total: usize) -> Self {
        Self {
            settled: 0,
            failed: 0,
            total,
        }
    }

    /// Record one settled frame. Never counts past `total`.
    pub fn record(&mut self, ok: bool) {
        if self.settled < self.total {
            self.settled += 1;
            if !ok {
                self.failed += 1;
            }
        }
    }

    /// Settled fraction in `[0.0, 1.0]`.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.settled as f64 / self.total as f64
        }
    }

    /// Loading percentage (0-100), rounded.
    pub fn percent(&self) -> u8 {
        (self.ratio() * 100.0).round() as u8
    }

    /// Whether every requested frame has settled.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.settled >= self.total
    }

    /// Format a loading message for the placeholder shown while loading.
    pub fn message(&self) -> String {
        format!("Loading Assets... {}%", self.percent())
    }
}

type SharedFetch<I> = Shared<LocalBoxFuture<'static, Option<I>>>;

struct CacheInner<F: FrameFetcher> {
    fetcher: F,
    images: RefCell<HashMap<String, F::Image>>,
    in_flight: RefCell<HashMap<String, SharedFetch<F::Image>>>,
    fetches: Cell<usize>,
}

/// Session-scoped frame cache with request deduplication.
///
/// Cloning the cache gives another handle to the same storage.
///
/// ## Example
///
/// ```rust
/// use showcase_core_view::{FetchError, FrameFetcher, ResourceCache};
///
/// struct Paths;
///
/// impl FrameFetcher for Paths {
///     type Image = String;
///     async fn fetch(&self, path: &str) -> Result<String, FetchError> {
///         Ok(path.to_uppercase())
///     }
/// }
///
/// let cache = ResourceCache::new(Paths);
/// let a = cache.load("/a/001.jpg");
/// let b = cache.load("/a/001.jpg");
/// let (a, b) = futures_util::FutureExt::now_or_never(futures_util::future::join(a, b)).unwrap();
/// assert_eq!(a.as_deref(), Some("/A/001.JPG"));
/// assert_eq!(a, b);
/// assert_eq!(cache.fetch_count(), 1);
/// ```
pub struct ResourceCache<F: FrameFetcher> {
    inner: Rc<CacheInner<F>>,
}

impl<F: FrameFetcher> Clone for ResourceCache<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<F> ResourceCache<F>
where
    F: FrameFetcher + 'static,
    F::Image: 'static,
{
    pub fn new(fetcher: F) -> Self {
        Self {
            inner: Rc::new(CacheInner {
                fetcher,
                images: RefCell::new(HashMap::new()),
                in_flight: RefCell::new(HashMap::new()),
                fetches: Cell::new(0),
            }),
        }
    }

    /// A previously loaded frame, without fetching.
    pub fn get(&self, path: &str) -> Option<F::Image> {
        self.inner.images.borrow().get(path).cloned()
    }

    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.inner.images.borrow().contains_key(path)
    }

    /// Whether a fetch for `path` is currently outstanding.
    #[inline]
    pub fn is_in_flight(&self, path: &str) -> bool {
        self.inner.in_flight.borrow().contains_key(path)
    }

    /// Number of cached frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.images.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of underlying fetches started over the cache's lifetime.
    #[inline]
    pub fn fetch_count(&self) -> usize {
        self.inner.fetches.get()
    }

    /// Load a frame, reusing the cache and any in-flight fetch for `path`.
    ///
    /// Resolves to `None` when the fetch fails. Failures aren't cached, so a
    /// later call fetches again.
    pub fn load(&self, path: &str) -> LocalBoxFuture<'static, Option<F::Image>> {
        if let Some(image) = self.get(path) {
            return future::ready(Some(image)).boxed_local();
        }
        self.in_flight(path).boxed_local()
    }

    fn in_flight(&self, path: &str) -> SharedFetch<F::Image> {
        if let Some(pending) = self.inner.in_flight.borrow().get(path) {
            log::trace!("joining in-flight fetch for {}", path);
            return pending.clone();
        }

        // The map owns the fetch, so it only holds the cache weakly.
        let weak: Weak<CacheInner<F>> = Rc::downgrade(&self.inner);
        let key = path.to_string();
        let fetch = async move {
            let inner = weak.upgrade()?;
            inner.fetches.set(inner.fetches.get() + 1);
            let result = inner.fetcher.fetch(&key).await;
            inner.in_flight.borrow_mut().remove(&key);
            match result {
                Ok(image) => {
                    inner.images.borrow_mut().insert(key, image.clone());
                    Some(image)
                }
                Err(err) => {
                    log::warn!("{}", err);
                    None
                }
            }
        }
        .boxed_local()
        .shared();

        self.inner
            .in_flight
            .borrow_mut()
            .insert(path.to_string(), fetch.clone());
        fetch
    }

    /// Load every frame of `sequence`, reporting each as it settles.
    ///
    /// Cached frames settle immediately, the rest in completion order.
    /// `on_settle(index, image)` receives `None` for failed frames. The
    /// returned vector is indexed by 0-based frame index.
    pub async fn load_sequence<P>(
        &self,
        sequence: &ImageSequence,
        mut on_settle: P,
    ) -> Vec<Option<F::Image>>
    where
        P: FnMut(usize, Option<&F::Image>),
    {
        let mut frames: Vec<Option<F::Image>> = vec![None; sequence.frame_count];
        let mut pending = FuturesUnordered::new();

        for (index, path) in sequence.frame_paths().iter().enumerate() {
            if let Some(image) = self.get(path) {
                on_settle(index, Some(&image));
                frames[index] = Some(image);
            } else {
                let load = self.load(path);
                pending.push(async move { (index, load.await) });
            }
        }

        while let Some((index, image)) = pending.next().await {
            on_settle(index, image.as_ref());
            frames[index] = image;
        }
        frames
    }

    /// Warm the cache for one sequence. Returns how many frames loaded.
    pub async fn preload_sequence(&self, sequence: &ImageSequence) -> usize {
        let loads = sequence.frame_paths().iter().map(|p| self.load(p)).collect::<Vec<_>>();
        future::join_all(loads)
            .await
            .iter()
            .filter(|image| image.is_some())
            .count()
    }

    /// Warm the cache for every item, one sequence at a time in catalog order.
    pub async fn preload_catalog(&self, catalog: &Catalog) {
        for item in catalog.items() {
            let loaded = self.preload_sequence(&item.image_sequence).await;
            log::debug!(
                "preloaded {}/{} frames for {}",
                loaded,
                item.image_sequence.frame_count,
                item.id
            );
        }
    }
}

/// Browser image fetching.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    /// Loads frames through `HtmlImageElement`, using the browser's own
    /// resource loading and decode.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct WebImageFetcher;

    impl FrameFetcher for WebImageFetcher {
        type Image = HtmlImageElement;

        async fn fetch(&self, path: &str) -> Result<HtmlImageElement, FetchError> {
            let not_found = || FetchError::NotFound {
                path: path.to_string(),
            };
            let img = HtmlImageElement::new().map_err(|_| not_found())?;

            let done = js_sys::Promise::new(&mut |resolve, reject| {
                img.set_onload(Some(&resolve));
                img.set_onerror(Some(&reject));
            });
            img.set_src(path);
            let result = JsFuture::from(done).await;

            img.set_onload(None);
            img.set_onerror(None);
            result.map(|_| img).map_err(|_| not_found())
        }
    }
}
