//! EPUB loading.
//!
//! Books live in a flat library directory as `<name>.epub`. Each spine
//! document becomes one [`TextBlock`] after a light HTML-to-text pass, so the
//! extraction stage sees the book in reading order.

use crate::source::{DocumentError, DocumentSource, TextBlock};
use epub::doc::EpubDoc;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Width handed to html2text; large enough that it never hard-wraps lines.
const RENDER_WIDTH: usize = 10_000;

#[derive(Debug, Clone)]
pub struct EpubLibrary {
    root: PathBuf,
}

impl EpubLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        EpubLibrary { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a book name to its file inside the library.
    pub fn resolve(&self, book: &str) -> Result<PathBuf, DocumentError> {
        validate_identifier(book)?;
        Ok(self.root.join(format!("{book}.epub")))
    }
}

impl DocumentSource for EpubLibrary {
    fn load_blocks(&self, book: &str) -> Result<Vec<TextBlock>, DocumentError> {
        let path = self.resolve(book)?;
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(DocumentError::NotFound {
                    name: book.to_string(),
                    path,
                });
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(DocumentError::NotFound {
                    name: book.to_string(),
                    path,
                });
            }
            Err(source) => {
                return Err(DocumentError::Io {
                    name: book.to_string(),
                    source,
                });
            }
        }
        load_epub_blocks(book, &path)
    }
}

fn validate_identifier(book: &str) -> Result<(), DocumentError> {
    let reason = if book.trim().is_empty() {
        Some("name is empty")
    } else if book.contains(['/', '\\']) {
        Some("path separators are not allowed")
    } else if book.contains("..") {
        Some("parent directory references are not allowed")
    } else if book.contains('\0') {
        Some("NUL bytes are not allowed")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DocumentError::InvalidIdentifier {
            name: book.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Open the EPUB at `path` and return one text block per spine document.
pub fn load_epub_blocks(book: &str, path: &Path) -> Result<Vec<TextBlock>, DocumentError> {
    info!(path = %path.display(), "Loading EPUB content");
    let mut doc = EpubDoc::new(path).map_err(|err| DocumentError::Malformed {
        name: book.to_string(),
        reason: err.to_string(),
    })?;

    let mut blocks = Vec::new();
    let mut documents = 0usize;

    loop {
        documents += 1;
        match doc.get_current_str() {
            Some((chapter, _mime)) => {
                let plain = match html2text::from_read(chapter.as_bytes(), RENDER_WIDTH) {
                    Ok(clean) => clean,
                    Err(err) => {
                        warn!(document = documents, "html2text failed: {err}");
                        chapter
                    }
                };
                debug!(
                    document = documents,
                    added_chars = plain.len(),
                    "Parsed spine document"
                );
                blocks.push(TextBlock::new(plain));
            }
            None => warn!(document = documents, "Spine document could not be read"),
        }

        if !doc.go_next() {
            break;
        }
    }

    info!(
        blocks = blocks.len(),
        total_chars = blocks.iter().map(|b| b.as_str().len()).sum::<usize>(),
        "Finished loading EPUB content"
    );
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

    fn opf(chapter_count: usize) -> String {
        let manifest: String = (1..=chapter_count)
            .map(|n| {
                format!(
                    r#"    <item id="ch{n}" href="ch{n}.xhtml" media-type="application/xhtml+xml"/>
"#
                )
            })
            .collect();
        let spine: String = (1..=chapter_count)
            .map(|n| format!("    <itemref idref=\"ch{n}\"/>\n"))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="bookid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>Test Book</dc:title>
    <dc:identifier id="bookid">urn:uuid:good-read-test</dc:identifier>
    <dc:language>en</dc:language>
  </metadata>
  <manifest>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
{manifest}  </manifest>
  <spine toc="ncx">
{spine}  </spine>
</package>"#
        )
    }

    const TOC_NCX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head><meta name="dtb:uid" content="urn:uuid:good-read-test"/></head>
  <docTitle><text>Test Book</text></docTitle>
  <navMap>
    <navPoint id="np1" playOrder="1">
      <navLabel><text>Start</text></navLabel>
      <content src="ch1.xhtml"/>
    </navPoint>
  </navMap>
</ncx>"#;

    fn xhtml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
  <head></head>
  <body>{body}</body>
</html>"#
        )
    }

    fn stored() -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
    }

    fn write_epub(path: &Path, chapters: &[&str]) {
        let file = fs::File::create(path).expect("create epub");
        let mut zip = ZipWriter::new(file);

        let mut entries = vec![
            ("META-INF/container.xml".to_string(), CONTAINER_XML.to_string()),
            ("OEBPS/content.opf".to_string(), opf(chapters.len())),
            ("OEBPS/toc.ncx".to_string(), TOC_NCX.to_string()),
        ];
        for (idx, body) in chapters.iter().enumerate() {
            entries.push((format!("OEBPS/ch{}.xhtml", idx + 1), xhtml(body)));
        }

        zip.start_file("mimetype", stored()).expect("mimetype entry");
        zip.write_all(b"application/epub+zip").expect("write mimetype");
        for (name, contents) in entries {
            zip.start_file(name, stored()).expect("zip entry");
            zip.write_all(contents.as_bytes()).expect("write entry");
        }
        zip.finish().expect("finish epub");
    }

    fn block_tokens(block: &TextBlock) -> Vec<&str> {
        block.as_str().split_whitespace().collect()
    }

    #[test]
    fn spine_documents_become_ordered_blocks() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_epub(
            &dir.path().join("poor_folk.epub"),
            &[
                "<p>My dear Barbara Alexievna,</p>",
                "<p>How happy I was last night.</p><p>Truly happy.</p>",
            ],
        );

        let library = EpubLibrary::new(dir.path());
        let blocks = library.load_blocks("poor_folk").expect("book should load");

        assert_eq!(blocks.len(), 2);
        assert_eq!(
            block_tokens(&blocks[0]),
            vec!["My", "dear", "Barbara", "Alexievna,"]
        );
        assert_eq!(
            block_tokens(&blocks[1]),
            vec!["How", "happy", "I", "was", "last", "night.", "Truly", "happy."]
        );
        assert!(blocks.iter().all(|b| !b.as_str().contains('<')));
    }

    #[test]
    fn missing_book_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let library = EpubLibrary::new(dir.path());
        let err = library.load_blocks("white_nights").unwrap_err();
        match err {
            DocumentError::NotFound { name, path } => {
                assert_eq!(name, "white_nights");
                assert_eq!(path, dir.path().join("white_nights.epub"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn directory_named_like_a_book_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::create_dir(dir.path().join("odd.epub")).expect("create dir");
        let library = EpubLibrary::new(dir.path());
        assert_eq!(library.load_blocks("odd").unwrap_err().kind(), "not_found");
    }

    #[test]
    fn non_epub_file_is_malformed() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("broken.epub"), b"this is not a zip archive")
            .expect("write file");
        let library = EpubLibrary::new(dir.path());
        let err = library.load_blocks("broken").unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn identifiers_cannot_escape_the_library() {
        let library = EpubLibrary::new("/srv/books");
        for name in ["", "  ", "../secret", "nested/book", "back\\slash", "a..b"] {
            let err = library.load_blocks(name).unwrap_err();
            assert_eq!(err.kind(), "invalid_identifier", "name {name:?}");
        }
        assert_eq!(
            library.resolve("poor_folk").expect("plain name"),
            PathBuf::from("/srv/books/poor_folk.epub")
        );
    }
}
