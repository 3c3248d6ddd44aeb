//! PDF fixtures generated at test time

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use qpdf::{EncryptionParams, EncryptionParamsR6, PrintPermission, QPdf};
use std::path::{Path, PathBuf};

/// Build an unencrypted PDF with one page per entry in `pages`.
///
/// Each line of a page's text becomes its own text object.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let mut operations = Vec::new();
        for (i, line) in text.lines().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new(
                "Td",
                vec![72.into(), (760 - 16 * i as i64).into()],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

/// Encrypt a PDF with AES-256 (R6) using qpdf.
pub fn encrypt_pdf(data: &[u8], user_password: &str, owner_password: &str) -> Vec<u8> {
    let qpdf = QPdf::read_from_memory(data).expect("read pdf");

    let encryption = EncryptionParams::R6(EncryptionParamsR6 {
        user_password: user_password.to_string(),
        owner_password: owner_password.to_string(),
        allow_accessibility: true,
        allow_extract: true,
        allow_assemble: false,
        allow_annotate_and_form: false,
        allow_form_filling: false,
        allow_modify_other: false,
        allow_print: PrintPermission::Full,
        encrypt_metadata: true,
    });

    let mut writer = qpdf.writer();
    writer
        .preserve_encryption(false)
        .encryption_params(encryption);
    writer.write_to_memory().expect("encrypt pdf")
}

/// Write `data` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).expect("write fixture");
    path
}

/// Text of `n` pages, each with a few lines
pub fn numbered_pages(n: usize) -> Vec<String> {
    (1..=n)
        .map(|i| format!("Page {} heading\nBody line one\nBody line two", i))
        .collect()
}
