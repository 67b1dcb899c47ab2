//! Books written by older releases, built byte by byte.

use inkbook::index::{IMPORTED_V1_TITLE, IMPORTED_V2_TITLE};
use inkbook::store::archive::read_archive;
use inkbook::store::{DirectoryStore, MemBackend};
use inkbook::wire::WriteExt;
use inkbook::{Book, BookError, Page, TagSet};
use std::io::Cursor;
use uuid::Uuid;

fn header(version: i32, page_count: i32, current: i32) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.write_i32_be(version).unwrap();
    buf.write_i32_be(page_count).unwrap();
    buf.write_i32_be(current).unwrap();
    buf
}

fn pages(n: usize) -> Vec<Page> {
    (0..n)
        .map(|i| {
            let mut p = Page::new();
            p.set_content(format!("old page {i}"));
            p
        })
        .collect()
}

fn archive_with(mut index: Vec<u8>, pages: &[Page]) -> Vec<u8> {
    for page in pages {
        page.write_to(&mut index).unwrap();
    }
    index
}

#[test]
fn test_v1_archive_gets_placeholders() {
    let old = pages(3);
    let bytes = archive_with(header(1, 3, 2), &old);

    let stored = read_archive(&mut Cursor::new(bytes), None).unwrap();
    assert_eq!(stored.index.title, IMPORTED_V1_TITLE);
    assert!(stored.index.filter.is_empty());
    assert!(stored.index.page_ids.is_empty());
    assert_eq!(stored.pages.len(), 3);
    assert_eq!(stored.pages[2].id(), old[2].id());
}

#[test]
fn test_v2_archive_keeps_filter() {
    let old = pages(2);
    let mut index = header(2, 2, 0);
    let filter: TagSet = ["ideas"].into_iter().collect();
    filter.write_to(&mut index).unwrap();

    let stored = read_archive(&mut Cursor::new(archive_with(index, &old)), None).unwrap();
    assert_eq!(stored.index.title, IMPORTED_V2_TITLE);
    assert_eq!(stored.index.filter, filter);
    assert_ne!(stored.index.book_id, Uuid::nil());
}

#[test]
fn test_v3_directory_index_loads_as_blank_book() {
    let backend = MemBackend::new();
    let id = Uuid::new_v4();
    let mut index = header(3, 5, 1);
    index.write_string("Sketchbook").unwrap();
    index.write_i64_be(1_500_000_000_000).unwrap();
    index.write_i64_be(1_600_000_000_000).unwrap();
    index.write_uuid(&id).unwrap();
    TagSet::new().write_to(&mut index).unwrap();
    backend.put_index(index);

    let book = Book::load_from(&DirectoryStore::with_backend(backend), None).unwrap();
    assert_eq!(book.id(), id);
    assert_eq!(book.title(), "Sketchbook");
    assert_eq!(book.created_at().timestamp_millis(), 1_500_000_000_000);
    assert_eq!(book.pages().len(), 1);
    assert_eq!(book.current_index(), 0);
}

#[test]
fn test_v1_directory_book_can_be_resaved_as_v4() {
    let backend = MemBackend::new();
    backend.put_index(header(1, 0, 0));
    let store = DirectoryStore::with_backend(backend);

    let mut book = Book::load_from(&store, None).unwrap();
    assert_eq!(book.title(), IMPORTED_V1_TITLE);
    book.set_title("Recovered");
    book.save_to(&store).unwrap();

    let again = Book::load_from(&store, None).unwrap();
    assert_eq!(again.title(), "Recovered");
    assert_eq!(again.id(), book.id());
    assert_eq!(again.pages().len(), 1);
}

#[test]
fn test_unknown_version_fails_loudly() {
    let backend = MemBackend::new();
    backend.put_index(header(5, 0, 0));
    let err = Book::load_from(&DirectoryStore::with_backend(backend), None).unwrap_err();
    assert!(matches!(err, BookError::UnknownVersion(5)));
}
