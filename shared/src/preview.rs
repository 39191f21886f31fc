/// Something that can turn a picked file into a locally renderable handle,
/// e.g. a blob object URL in the browser.
pub trait PreviewSource {
    type Media;
    type Handle;

    fn create(&mut self, media: &Self::Media) -> Self::Handle;
    fn revoke(&mut self, handle: Self::Handle);
}

/// Owns the single live preview of a detection session.
///
/// A new `acquire` revokes the previous handle before creating the next one,
/// `release` is idempotent, and dropping the manager releases whatever is
/// still live.
pub struct PreviewManager<S: PreviewSource> {
    source: S,
    live: Option<S::Handle>,
}

impl<S: PreviewSource> PreviewManager<S> {
    pub fn new(source: S) -> Self {
        Self { source, live: None }
    }

    pub fn acquire(&mut self, media: &S::Media) -> &S::Handle {
        self.release();
        let handle = self.source.create(media);
        self.live.insert(handle)
    }

    pub fn release(&mut self) {
        if let Some(handle) = self.live.take() {
            self.source.revoke(handle);
        }
    }

    pub fn current(&self) -> Option<&S::Handle> {
        self.live.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }
}

impl<S: PreviewSource> Drop for PreviewManager<S> {
    fn drop(&mut self) {
        self.release();
    }
}
