use anyhow::Result;
use httpmock::prelude::*;
use std::io::Cursor;
use std::time::Duration;
use syllabus_compiler::adapters::http::{HttpOptions, HttpReferenceSource};
use syllabus_compiler::core::reference::{PromptSelector, ReferenceDownloader};
use syllabus_compiler::{LocalStorage, SyllabusError};
use tempfile::TempDir;
use url::Url;

fn options(retry_attempts: u32) -> HttpOptions {
    HttpOptions {
        timeout: Duration::from_secs(5),
        retry_attempts,
        retry_delay: Duration::from_millis(10),
    }
}

/// 模擬評議會頁面，透過提示選擇第二個檔案並寫入暫存目錄
#[tokio::test]
async fn test_download_selected_reference() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/updates/msr");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(
                r#"<ul>
<li><a href="/files/MSR-Template.docx">Template</a></li>
<li><a href="/files/MSR-Checklist.docx">Checklist</a></li>
<li><a href="/files/MSR-Template.docx">Template (again)</a></li>
</ul>"#,
            );
    });
    let file_mock = server.mock(|when, then| {
        when.method(GET).path("/files/MSR-Checklist.docx");
        then.status(200).body("PK-checklist");
    });

    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let source = HttpReferenceSource::new(options(1))?;
    let downloader = ReferenceDownloader::new(source, storage, Url::parse(&server.url("/updates/msr"))?);

    let mut prompt_output = Vec::new();
    let mut selector = PromptSelector::new(Cursor::new("0\n2\n"), &mut prompt_output);
    let saved = downloader.run(&mut selector, None).await?;

    page_mock.assert();
    file_mock.assert();
    assert_eq!(saved, "MSR-Checklist.docx");
    assert_eq!(std::fs::read(temp_dir.path().join(&saved))?, b"PK-checklist");

    let prompt = String::from_utf8(prompt_output)?;
    println!("{}", prompt);
    assert!(prompt.contains("[1] MSR-Template.docx\n[2] MSR-Checklist.docx\nDownload: "));
    assert!(!prompt.contains("[3]"));
    assert!(prompt.contains("Invalid input. Must be a number: 1-2"));
    Ok(())
}

#[tokio::test]
async fn test_missing_page_is_fetch_failure() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/updates/msr");
        then.status(404);
    });

    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let downloader = ReferenceDownloader::new(
        HttpReferenceSource::new(options(3))?,
        storage,
        Url::parse(&server.url("/updates/msr"))?,
    );

    let mut selector = PromptSelector::new(Cursor::new("1\n"), Vec::new());
    let err = downloader.run(&mut selector, None).await.unwrap_err();

    // 404 不重試
    page_mock.assert_hits(1);
    assert!(matches!(err, SyllabusError::FetchFailure { .. }));
    Ok(())
}

#[tokio::test]
async fn test_server_errors_are_retried() -> Result<()> {
    let server = MockServer::start();

    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/updates/msr");
        then.status(503);
    });

    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let downloader = ReferenceDownloader::new(
        HttpReferenceSource::new(options(2))?,
        storage,
        Url::parse(&server.url("/updates/msr"))?,
    );

    let result = downloader.discover().await;

    page_mock.assert_hits(2);
    match result {
        Err(SyllabusError::FetchFailure { message, .. }) => {
            assert!(message.contains("503"));
            assert!(message.contains("2 attempt(s)"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_cancel_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/updates/msr");
        then.status(200).body(r#"<a href="a.docx">A</a>"#);
    });

    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let downloader = ReferenceDownloader::new(
        HttpReferenceSource::new(options(1))?,
        storage,
        Url::parse(&server.url("/updates/msr"))?,
    );

    let mut selector = PromptSelector::new(Cursor::new(""), Vec::new());
    let err = downloader.run(&mut selector, Some("out.docx")).await.unwrap_err();

    assert!(matches!(err, SyllabusError::Cancelled));
    assert!(!temp_dir.path().join("out.docx").exists());
    Ok(())
}
