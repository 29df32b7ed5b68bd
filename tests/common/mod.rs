#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Text fixture understood by `MockFileLoader`.
pub fn fake_pdf(text: &str) -> Vec<u8> {
    format!("%PDF-1.4\n{}", text).into_bytes()
}

pub fn zip_bytes(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub fn write_zip(dir: &Path, entries: &[(&str, Vec<u8>)]) -> PathBuf {
    let path = dir.join("invoices.zip");
    std::fs::write(&path, zip_bytes(entries)).unwrap();
    path
}

pub fn write_policy(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("policy.pdf");
    std::fs::write(&path, fake_pdf(text)).unwrap();
    path
}

pub fn decision_json(customer: &str, status: &str, invoice_id: &str) -> String {
    serde_json::json!({
        "customer_name": customer,
        "reimbursement_status": status,
        "reason": "Meal expenses are covered up to the daily limit",
        "date": "12-03-2024",
        "invoice_ID": invoice_id,
        "invoice_text": "invoice"
    })
    .to_string()
}
