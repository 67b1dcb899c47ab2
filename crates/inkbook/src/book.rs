//! # Book
//!
//! [`Book`] is the notebook aggregate: metadata, the [`PageList`] with its
//! filtered view and cursor, the tag registry, and the mutation sink.
//!
//! ## High-level operations
//!
//! [`Book::insert_page`], [`Book::duplicate_page`], [`Book::delete_page`]
//! and [`Book::set_filter`] never touch the page list directly. They go
//! through `request_add` / `request_remove`, which either apply the
//! primitive or forward it to the attached [`MutationListener`]. Their
//! follow-up work (keeping the book and its view non-empty, dropping empty
//! pages) is written so it stays correct when a listener defers the request.
//!
//! ## Persistence
//!
//! Every constructor that reads storage funnels through one consistency
//! pass (see [`PageList::restore`]). Books built by a preview constructor
//! hold only the first pages and refuse to save.
//!
//! ```text
//! Book::open / open_directory / load_from   -> full book, may save
//! Book::preview / preview_directory         -> first N pages, read-only
//! Book::open_archive                        -> full book, may save
//! Book::preview_archive                     -> first N pages, read-only
//! ```

use crate::config::BookConfig;
use crate::error::Result;
use crate::index::{now, IndexRecord};
use crate::listener::{MutationListener, MutationSink};
use crate::model::Page;
use crate::pages::PageList;
use crate::store::{archive, DirectoryStore, FsBackend, StorageBackend, StoredBook};
use crate::tags::{TagRegistry, TagSet};
use chrono::{DateTime, Utc};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug)]
pub struct Book {
    id: Uuid,
    title: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    pages: PageList,
    registry: TagRegistry,
    sink: MutationSink,
    allow_save: bool,
}

impl Book {
    /// A fresh book with one blank page.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_pages(title, Vec::new())
    }

    /// A fresh book titled with the configured default title.
    pub fn create(config: &BookConfig) -> Self {
        Self::new(config.default_title.clone())
    }

    /// A fresh book holding `pages` in order. An empty vector gets one blank
    /// page.
    pub fn with_pages(title: impl Into<String>, pages: Vec<Page>) -> Self {
        let created = now();
        let mut registry = TagRegistry::new();
        for page in &pages {
            registry.register_all(page.tags());
        }
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            created_at: created,
            modified_at: created,
            pages: PageList::restore(pages, TagSet::new(), 0),
            registry,
            sink: MutationSink::Direct,
            allow_save: true,
        }
    }

    fn from_stored(stored: StoredBook, allow_save: bool) -> Self {
        let StoredBook { index, pages } = stored;
        let mut registry = TagRegistry::new();
        registry.register_all(&index.filter);
        for page in &pages {
            registry.register_all(page.tags());
        }
        log::debug!(
            "Restored book {} with {} of {} pages",
            index.book_id,
            pages.len(),
            index.page_count
        );
        Self {
            id: index.book_id,
            title: index.title,
            created_at: index.created_at,
            modified_at: index.modified_at,
            pages: PageList::restore(pages, index.filter, i64::from(index.current_page)),
            registry,
            sink: MutationSink::Direct,
            allow_save,
        }
    }

    // --- Listener ---

    pub fn with_listener(mut self, listener: impl MutationListener + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    pub fn set_listener(&mut self, listener: impl MutationListener + 'static) {
        self.sink = MutationSink::Forward(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.sink = MutationSink::Direct;
    }

    pub fn sink(&self) -> &MutationSink {
        &self.sink
    }

    // --- Metadata ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last save, or of creation if never saved.
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// False for previews.
    pub fn allow_save(&self) -> bool {
        self.allow_save
    }

    pub fn pages(&self) -> &PageList {
        &self.pages
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn tags_mut(&mut self) -> &mut TagRegistry {
        &mut self.registry
    }

    pub fn filter(&self) -> &TagSet {
        self.pages.filter()
    }

    pub fn current_page(&self) -> &Page {
        self.pages.current_page()
    }

    pub fn current_index(&self) -> usize {
        self.pages.current_index()
    }

    /// Makes the page with `id` current. Panics if it is not in the book.
    pub fn set_current_page(&mut self, id: Uuid) {
        self.pages.set_current_page(id);
    }

    /// Edits the page with `id`. Returns `None` if no such page exists.
    pub fn update_page<T>(&mut self, id: Uuid, f: impl FnOnce(&mut Page) -> T) -> Option<T> {
        let position = self.pages.position_of(id)?;
        let out = self.pages.update_page(position, f)?;
        if let Some(page) = self.pages.page(position) {
            self.registry.register_all(page.tags());
        }
        Some(out)
    }

    pub fn update_current_page<T>(&mut self, f: impl FnOnce(&mut Page) -> T) -> T {
        let out = self.pages.update_current_page(f);
        self.registry.register_all(self.pages.current_page().tags());
        out
    }

    // --- Primitives ---

    /// Inserts `page` at `position` without consulting the listener. This is
    /// the entry point listeners call back into.
    ///
    /// # Panics
    ///
    /// If the page is already in the book.
    pub fn add_page(&mut self, page: Page, position: usize) {
        self.registry.register_all(page.tags());
        self.pages.add_page(page, position);
    }

    /// Removes the page `page_id` at `position` without consulting the
    /// listener.
    ///
    /// # Panics
    ///
    /// If the page at `position` is not `page_id`, or it is the last page.
    pub fn remove_page(&mut self, page_id: Uuid, position: usize) {
        self.pages.remove_page(page_id, position);
    }

    fn request_add(&mut self, page: Page, position: usize) {
        self.registry.register_all(page.tags());
        self.sink.add(&mut self.pages, page, position);
    }

    fn request_remove(&mut self, page_id: Uuid, position: usize) {
        self.sink.remove(&mut self.pages, page_id, position);
    }

    // --- High-level operations ---

    /// Replaces the filter. The current page stays current; if nothing
    /// matches the new filter a page carrying its tags is appended.
    pub fn set_filter(&mut self, filter: TagSet) {
        self.registry.register_all(&filter);
        self.pages.set_filter(filter);
        self.ensure_non_empty();
    }

    /// Inserts a blank page at `position`, laid out like `template` if one is
    /// given, and tagged with the filter. Empty pages elsewhere are dropped,
    /// except the current one and the last one left in the view. Returns the
    /// id of the new page, which is current once the insert is applied.
    pub fn insert_page(&mut self, template: Option<&Page>, position: usize) -> Uuid {
        let page = template.map_or_else(Page::new, Page::from_template);
        self.insert_tagged(page, position)
    }

    pub fn insert_page_after_current(&mut self) -> Uuid {
        let page = Page::from_template(self.pages.current_page());
        let position = self.pages.current_index() + 1;
        self.insert_tagged(page, position)
    }

    pub fn insert_page_at_end(&mut self) -> Uuid {
        let page = Page::from_template(self.pages.current_page());
        let position = self.pages.len();
        self.insert_tagged(page, position)
    }

    fn insert_tagged(&mut self, mut page: Page, position: usize) -> Uuid {
        page.tags_mut().extend_from(self.pages.filter());
        let id = page.id();
        self.request_add(page, position);
        self.remove_empty_pages();
        if self.pages.contains(id) {
            assert_eq!(self.pages.current_page().id(), id, "inserted page must be current");
        }
        id
    }

    /// Copies the current page, body and tags included, right after it.
    pub fn duplicate_page(&mut self) -> Uuid {
        let mut page = self.pages.current_page().duplicate();
        page.tags_mut().extend_from(self.pages.filter());
        let id = page.id();
        let position = self.pages.current_index() + 1;
        self.request_add(page, position);
        id
    }

    /// Removes the current page.
    ///
    /// The only page of the book is first followed by a blank page laid
    /// out like it, so the book never becomes empty. Likewise the last page
    /// of the filtered view gets a replacement carrying the filter tags.
    /// Replacements are added behind the removed page, so its position
    /// stays valid for the removal.
    pub fn delete_page(&mut self) {
        let current = self.pages.current_page();
        let id = current.id();
        let position = self.pages.current_index();

        if self.pages.len() == 1 {
            let mut fresh = Page::from_template(current);
            fresh.tags_mut().extend_from(current.tags());
            fresh.tags_mut().extend_from(self.pages.filter());
            self.request_add(fresh, 1);
        } else if self.pages.filtered_len() == 1 && self.pages.is_in_view(id) {
            let mut fresh = Page::from_template(current);
            fresh.tags_mut().extend_from(self.pages.filter());
            let end = self.pages.len();
            self.request_add(fresh, end);
        }

        let position = self.pages.position_of(id).unwrap_or(position);
        self.request_remove(id, position);
    }

    fn ensure_non_empty(&mut self) {
        if self.pages.filtered_len() > 0 {
            return;
        }
        let current = self.pages.current_page().id();
        let mut page = Page::from_template(self.pages.current_page());
        page.tags_mut().extend_from(self.pages.filter());
        let end = self.pages.len();
        log::debug!("Filter matches no page, appending one");
        self.request_add(page, end);
        if self.pages.contains(current) {
            self.pages.set_current_page(current);
        }
    }

    fn remove_empty_pages(&mut self) {
        let current = self.pages.current_page().id();
        for id in self.pages.removable_empty_pages() {
            if let Some(position) = self.pages.position_of(id) {
                self.request_remove(id, position);
            }
        }
        if self.pages.contains(current) {
            self.pages.set_current_page(current);
        }
    }

    // --- Navigation ---

    pub fn next_page(&mut self) -> &Page {
        self.pages.next_page()
    }

    pub fn previous_page(&mut self) -> &Page {
        self.pages.previous_page()
    }

    pub fn next_page_unfiltered(&mut self) -> &Page {
        self.pages.next_page_unfiltered()
    }

    pub fn previous_page_unfiltered(&mut self) -> &Page {
        self.pages.previous_page_unfiltered()
    }

    pub fn last_page(&mut self) -> &Page {
        self.pages.last_page()
    }

    pub fn last_page_unfiltered(&mut self) -> &Page {
        self.pages.last_page_unfiltered()
    }

    pub fn is_first_page(&self) -> bool {
        self.pages.is_first_page()
    }

    pub fn is_last_page(&self) -> bool {
        self.pages.is_last_page()
    }

    pub fn is_first_page_unfiltered(&self) -> bool {
        self.pages.is_first_page_unfiltered()
    }

    pub fn is_last_page_unfiltered(&self) -> bool {
        self.pages.is_last_page_unfiltered()
    }

    // --- Persistence ---

    /// Opens the book `id` from the configured data directory.
    pub fn open(config: &BookConfig, id: Uuid) -> Result<Self> {
        Self::open_directory(&config.book_dir(&id)?)
    }

    /// Read-only book holding the first `config.preview_pages` pages.
    pub fn preview(config: &BookConfig, id: Uuid) -> Result<Self> {
        Self::preview_directory(&config.book_dir(&id)?, config.preview_pages)
    }

    /// Saves into `<data_dir>/notebook_<id>`.
    pub fn save(&mut self, config: &BookConfig) -> Result<()> {
        let dir = config.book_dir(&self.id)?;
        self.save_directory(&dir)
    }

    pub fn open_directory(dir: &Path) -> Result<Self> {
        Self::load_from(&DirectoryStore::with_backend(FsBackend::new(dir)), None)
    }

    pub fn preview_directory(dir: &Path, page_limit: usize) -> Result<Self> {
        Self::load_from(
            &DirectoryStore::with_backend(FsBackend::new(dir)),
            Some(page_limit),
        )
    }

    /// Loads from any directory-mode backend. A `page_limit` makes the book
    /// a read-only preview.
    pub fn load_from<B: StorageBackend>(
        store: &DirectoryStore<B>,
        page_limit: Option<usize>,
    ) -> Result<Self> {
        let stored = store.load(page_limit)?;
        Ok(Self::from_stored(stored, page_limit.is_none()))
    }

    pub fn save_directory(&mut self, dir: &Path) -> Result<()> {
        self.save_to(&DirectoryStore::with_backend(FsBackend::new(dir)))
    }

    /// Writes the index and every modified page, then marks all pages
    /// saved. On error some page files may already be written.
    ///
    /// # Panics
    ///
    /// If the book is a preview.
    pub fn save_to<B: StorageBackend>(&mut self, store: &DirectoryStore<B>) -> Result<()> {
        let index = self.prepare_save();
        let written = store.save(&index, self.pages.as_slice())?;
        self.pages.mark_all_saved();
        log::debug!(
            "Saved book {} to {} ({written} pages written)",
            self.id,
            store.backend().location()
        );
        Ok(())
    }

    pub fn open_archive(path: &Path) -> Result<Self> {
        Ok(Self::from_stored(archive::load_archive(path, None)?, true))
    }

    /// Read-only book holding the first `page_limit` pages of an archive,
    /// opened on its first page.
    pub fn preview_archive(path: &Path, page_limit: usize) -> Result<Self> {
        let mut stored = archive::load_archive(path, Some(page_limit))?;
        stored.index.current_page = 0;
        Ok(Self::from_stored(stored, false))
    }

    /// Writes a full snapshot to `path`. Dirty flags are left alone, they
    /// belong to the directory copy.
    ///
    /// # Panics
    ///
    /// If the book is a preview.
    pub fn save_archive(&mut self, path: &Path) -> Result<()> {
        let index = self.prepare_save();
        archive::save_archive(path, &index, self.pages.as_slice())?;
        log::debug!("Archived book {} to {}", self.id, path.display());
        Ok(())
    }

    fn prepare_save(&mut self) -> IndexRecord {
        assert!(self.allow_save, "preview of book {} cannot be saved", self.id);
        self.modified_at = now();
        self.index_record()
    }

    /// The index as it would be written now.
    pub fn index_record(&self) -> IndexRecord {
        IndexRecord {
            page_count: self.pages.len(),
            page_ids: self.pages.iter().map(Page::id).collect(),
            current_page: i32::try_from(self.pages.current_index()).unwrap_or(i32::MAX),
            title: self.title.clone(),
            created_at: self.created_at,
            modified_at: self.modified_at,
            book_id: self.id,
            filter: self.pages.filter().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paper;
    use crate::pages::PageList;
    use crate::store::MemBackend;
    use crate::test_utils::{tagged_page, TestEnv};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn filter(tags: &[&str]) -> TagSet {
        tags.iter().copied().collect()
    }

    fn ids(book: &Book) -> Vec<Uuid> {
        book.pages().iter().map(Page::id).collect()
    }

    fn assert_invariants(book: &Book) {
        let pages = book.pages();
        assert!(!pages.is_empty());
        assert!(book.current_index() < pages.len());
        for page in pages.iter() {
            assert_eq!(
                pages.is_in_view(page.id()),
                page.tags().is_superset_of(book.filter())
            );
        }
    }

    #[test]
    fn test_new_book_has_one_blank_page() {
        let book = Book::new("Journal");
        assert_eq!(book.pages().len(), 1);
        assert_eq!(book.title(), "Journal");
        assert!(book.allow_save());
        assert_eq!(book.created_at(), book.modified_at());
        assert_invariants(&book);
    }

    #[test]
    fn test_delete_sole_page_leaves_fresh_page() {
        let mut book = Book::new("Journal");
        book.update_current_page(|p| {
            p.set_content("only");
            p.set_paper(Paper::Ruled);
        });
        let original = book.current_page().id();

        book.delete_page();

        assert_eq!(book.pages().len(), 1);
        let left = book.current_page();
        assert_ne!(left.id(), original);
        assert_eq!(left.paper(), Paper::Ruled);
        assert!(left.is_empty());
    }

    #[test]
    fn test_delete_moves_to_next_in_view() {
        let pages = vec![
            tagged_page("a", &["x"]),
            tagged_page("b", &["y"]),
            tagged_page("c", &["x"]),
        ];
        let keys: Vec<Uuid> = pages.iter().map(Page::id).collect();
        let mut book = Book::with_pages("Work", pages);
        book.set_filter(filter(&["x"]));

        book.delete_page();

        assert_eq!(ids(&book), vec![keys[1], keys[2]]);
        assert_eq!(book.current_page().id(), keys[2]);
        assert_invariants(&book);
    }

    #[test]
    fn test_delete_last_page_in_view_adds_replacement() {
        let pages = vec![tagged_page("a", &["x"]), tagged_page("b", &["y"])];
        let mut book = Book::with_pages("Work", pages);
        book.set_filter(filter(&["x"]));

        book.delete_page();

        assert_eq!(book.pages().len(), 2);
        assert_eq!(book.pages().filtered_len(), 1);
        assert!(book.current_page().tags().contains("x"));
        assert_invariants(&book);
    }

    #[test]
    fn test_set_filter_without_match_appends_page() {
        let mut book = Book::with_pages("Work", vec![tagged_page("a", &["x"])]);
        let current = book.current_page().id();

        book.set_filter(filter(&["urgent"]));

        assert_eq!(book.pages().len(), 2);
        assert_eq!(book.pages().filtered_len(), 1);
        assert_eq!(book.current_page().id(), current);
        assert!(book.tags().contains("urgent"));
        assert_invariants(&book);
    }

    #[test]
    fn test_navigation_skips_pages_outside_filter() {
        let pages = vec![
            tagged_page("a", &["x"]),
            tagged_page("b", &["y"]),
            tagged_page("c", &["x"]),
        ];
        let keys: Vec<Uuid> = pages.iter().map(Page::id).collect();
        let mut book = Book::with_pages("Work", pages);
        book.set_filter(filter(&["x"]));

        assert_eq!(book.next_page().id(), keys[2]);
        assert_eq!(book.next_page().id(), keys[2]);
        assert!(book.is_last_page());
        assert_eq!(book.previous_page().id(), keys[0]);
        assert!(book.is_first_page());
    }

    #[test]
    fn test_insert_tags_page_and_drops_empty_pages() {
        let pages = vec![
            tagged_page("a", &["x"]),
            tagged_page("", &["x"]),
            tagged_page("", &[]),
        ];
        let keys: Vec<Uuid> = pages.iter().map(Page::id).collect();
        let mut book = Book::with_pages("Work", pages);
        book.set_filter(filter(&["x"]));

        let new_id = book.insert_page_after_current();

        assert_eq!(book.current_page().id(), new_id);
        assert!(book.current_page().tags().contains("x"));
        assert!(!book.pages().contains(keys[1]));
        assert!(!book.pages().contains(keys[2]));
        assert_eq!(ids(&book), vec![keys[0], new_id]);
        assert_invariants(&book);
    }

    #[test]
    fn test_insert_at_end_keeps_layout_of_current() {
        let mut book = Book::new("Sketches");
        book.update_current_page(|p| {
            p.set_content("first");
            p.set_paper(Paper::Quad);
        });

        let id = book.insert_page_at_end();

        assert_eq!(book.current_index(), 1);
        assert_eq!(book.current_page().id(), id);
        assert_eq!(book.current_page().paper(), Paper::Quad);
    }

    #[test]
    fn test_duplicate_copies_body_after_current() {
        let mut book = Book::with_pages("Work", vec![tagged_page("a", &["x"]), tagged_page("b", &[])]);
        let id = book.duplicate_page();

        assert_eq!(book.current_index(), 1);
        assert_eq!(book.current_page().id(), id);
        assert_eq!(book.current_page().content(), "a");
        assert!(book.current_page().tags().contains("x"));
    }

    #[derive(Default)]
    struct Requests {
        inserts: Vec<(Uuid, usize)>,
        removes: Vec<(Uuid, usize)>,
        pending: Vec<(Page, usize)>,
    }

    /// Records requests and applies nothing.
    #[derive(Clone, Default)]
    struct Deferring(Rc<RefCell<Requests>>);

    impl MutationListener for Deferring {
        fn insert_requested(&mut self, _pages: &mut PageList, page: Page, position: usize) {
            let mut log = self.0.borrow_mut();
            log.inserts.push((page.id(), position));
            log.pending.push((page, position));
        }

        fn remove_requested(&mut self, _pages: &mut PageList, page_id: Uuid, position: usize) {
            self.0.borrow_mut().removes.push((page_id, position));
        }
    }

    #[test]
    fn test_forwarded_requests_are_not_applied() {
        let listener = Deferring::default();
        let mut book = Book::new("Work").with_listener(listener.clone());
        let before = ids(&book);

        let id = book.insert_page_after_current();

        assert_eq!(ids(&book), before);
        assert_eq!(listener.0.borrow().inserts, vec![(id, 1)]);
    }

    #[test]
    fn test_deferred_delete_applies_through_primitives() {
        let listener = Deferring::default();
        let mut book = Book::new("Work").with_listener(listener.clone());
        let original = book.current_page().id();

        book.delete_page();
        assert_eq!(book.pages().len(), 1);
        assert_eq!(listener.0.borrow().removes, vec![(original, 0)]);

        let (page, position) = listener.0.borrow_mut().pending.remove(0);
        book.add_page(page, position);
        let pos = book.pages().position_of(original).unwrap();
        book.remove_page(original, pos);

        assert_eq!(book.pages().len(), 1);
        assert_ne!(book.current_page().id(), original);
        assert_invariants(&book);
    }

    #[test]
    fn test_clear_listener_restores_direct_mode() {
        let mut book = Book::new("Work").with_listener(Deferring::default());
        assert!(!book.sink().is_direct());
        book.clear_listener();
        book.update_current_page(|p| p.set_content("kept"));
        book.insert_page(None, 1);
        assert_eq!(book.pages().len(), 2);
    }

    #[test]
    fn test_save_and_reload_through_backend() {
        let store = DirectoryStore::with_backend(MemBackend::new());
        let mut book = Book::with_pages(
            "Trip",
            vec![tagged_page("day 1", &["travel"]), tagged_page("day 2", &[])],
        );
        book.set_filter(filter(&["travel"]));
        let before = book.modified_at();
        book.save_to(&store).unwrap();
        assert!(book.pages().iter().all(|p| !p.is_modified()));

        let loaded = Book::load_from(&store, None).unwrap();
        assert_eq!(loaded.id(), book.id());
        assert_eq!(loaded.title(), "Trip");
        assert_eq!(loaded.created_at(), book.created_at());
        assert!(loaded.modified_at() >= before);
        assert_eq!(ids(&loaded), ids(&book));
        assert_eq!(loaded.filter(), book.filter());
        assert!(loaded.tags().contains("travel"));
    }

    #[test]
    #[should_panic(expected = "cannot be saved")]
    fn test_preview_refuses_to_save() {
        let store = DirectoryStore::with_backend(MemBackend::new());
        let mut book = Book::with_pages("Trip", vec![Page::new(), Page::new(), Page::new()]);
        book.save_to(&store).unwrap();

        let mut preview = Book::load_from(&store, Some(1)).unwrap();
        assert!(!preview.allow_save());
        assert_eq!(preview.pages().len(), 1);
        let _ = preview.save_to(&store);
    }

    #[test]
    fn test_config_open_save_and_preview() {
        let env = TestEnv::new();
        let mut book = Book::create(&env.config);
        book.update_current_page(|p| p.set_content("p0"));
        for i in 1..5 {
            book.insert_page_at_end();
            book.update_current_page(|p| p.set_content(format!("p{i}")));
        }
        book.save(&env.config).unwrap();
        assert!(env.book_dir(&book.id()).join("index.inkbook").exists());

        let opened = Book::open(&env.config, book.id()).unwrap();
        assert_eq!(opened.title(), "Untitled notebook");
        assert_eq!(opened.current_index(), 4);

        let preview = Book::preview(&env.config, book.id()).unwrap();
        assert_eq!(preview.pages().len(), env.config.preview_pages);
        assert_eq!(preview.current_index(), env.config.preview_pages - 1);
        assert!(!preview.allow_save());
    }

    #[test]
    fn test_archive_preview_starts_on_first_page() {
        let env = TestEnv::new();
        let path = env.archive_path("trip");
        let pages = (0..4).map(|i| tagged_page(&format!("p{i}"), &[])).collect();
        let mut book = Book::with_pages("Trip", pages);
        book.last_page_unfiltered();
        book.save_archive(&path).unwrap();
        assert!(book.pages().iter().all(Page::is_modified));

        let full = Book::open_archive(&path).unwrap();
        assert_eq!(full.current_index(), 3);
        assert!(full.allow_save());

        let preview = Book::preview_archive(&path, 2).unwrap();
        assert_eq!(preview.pages().len(), 2);
        assert_eq!(preview.current_index(), 0);
    }

    #[test]
    fn test_create_uses_configured_title() {
        let mut config = BookConfig::default();
        config.default_title = "Inbox".to_string();
        let book = Book::create(&config);
        assert_eq!(book.title(), "Inbox");
        assert_eq!(book.pages().len(), 1);
        assert!(book.allow_save());
    }

    #[test]
    fn test_open_missing_book_fails() {
        let env = TestEnv::new();
        let err = Book::open(&env.config, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, crate::BookError::Load(_)));
    }
}
