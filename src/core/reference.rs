use crate::domain::ports::{ReferenceSource, Selector, Storage};
use crate::utils::error::{Result, SyllabusError};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::future::Future;
use std::io::{BufRead, Write};
use url::Url;

/// 教務評議會「最低講義要求」頁面
pub const MSR_PAGE: &str =
    "https://facultysenate.tamu.edu/important-faculty-updates/minumum-syllabus-requirements";

/// 找出頁面中所有指向 .docx 的連結 (去重、保持出現順序)，並以頁面網址解析成絕對網址
pub fn extract_docx_links(html: &str, page_url: &Url) -> Result<Vec<Url>> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let mut hrefs = Vec::new();
    collect_anchor_hrefs(&dom.document, &mut hrefs);

    let mut links: Vec<Url> = Vec::new();
    for href in hrefs {
        let href = href.trim();
        if !href.ends_with("docx") {
            continue;
        }

        let link = page_url.join(href)?;
        if !links.contains(&link) {
            links.push(link);
        }
    }

    Ok(links)
}

// 註解節點不會被走訪；屬性值已由解析器解碼
fn collect_anchor_hrefs(handle: &Handle, hrefs: &mut Vec<String>) {
    if let NodeData::Element { name, attrs, .. } = &handle.data {
        if name.local.as_ref() == "a" {
            let href = attrs
                .borrow()
                .iter()
                .find(|attr| attr.name.local.as_ref() == "href")
                .map(|attr| attr.value.to_string());
            hrefs.extend(href);
        }
    }

    for child in handle.children.borrow().iter() {
        collect_anchor_hrefs(child, hrefs);
    }
}

/// 連結路徑的最後一段作為預設檔名
pub fn link_file_name(link: &Url) -> String {
    link.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .unwrap_or("reference.docx")
        .to_string()
}

/// 在終端機列出選項並讀取編號；輸入結束 (EOF) 視為取消
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Selector for PromptSelector<R, W> {
    fn select(&mut self, options: &[String]) -> Result<usize> {
        let listing = options
            .iter()
            .enumerate()
            .map(|(i, name)| format!("[{}] {}", i + 1, name))
            .collect::<Vec<_>>()
            .join("\n");
        let err = format!("Invalid input. Must be a number: 1-{}", options.len());

        loop {
            write!(
                self.output,
                "Select one of the following to download:\n{}\nDownload: ",
                listing
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(SyllabusError::Cancelled);
            }

            match line.trim().parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(choice - 1),
                _ => writeln!(self.output, "{}", err)?,
            }
        }
    }
}

/// 下載流程：抓取頁面 -> 找出連結 -> 讓使用者挑選 -> 下載並寫入
pub struct ReferenceDownloader<R: ReferenceSource, S: Storage> {
    source: R,
    storage: S,
    page_url: Url,
}

impl<R: ReferenceSource, S: Storage> ReferenceDownloader<R, S> {
    pub fn new(source: R, storage: S, page_url: Url) -> Self {
        Self {
            source,
            storage,
            page_url,
        }
    }

    pub async fn discover(&self) -> Result<Vec<Url>> {
        let html = self.source.fetch_page(&self.page_url).await?;
        let links = extract_docx_links(&html, &self.page_url)?;
        tracing::info!("🔗 Found {} .docx link(s) on {}", links.len(), self.page_url);

        if links.is_empty() {
            return Err(SyllabusError::NoReferenceLinks {
                url: self.page_url.to_string(),
            });
        }
        Ok(links)
    }

    /// 回傳寫入的檔名
    pub async fn run<T: Selector>(&self, selector: &mut T, filename: Option<&str>) -> Result<String> {
        let links = self.discover().await?;
        let names: Vec<String> = links.iter().map(link_file_name).collect();

        let index = selector.select(&names)?;
        self.download(&links, index, filename).await
    }

    /// 下載 `links` 中第 `index` 個 (0 起算) 連結並寫入 `filename` 或連結檔名
    pub async fn download(&self, links: &[Url], index: usize, filename: Option<&str>) -> Result<String> {
        let chosen = links.get(index).ok_or(SyllabusError::InvalidSelection {
            index: index + 1,
            count: links.len(),
        })?;
        let name = link_file_name(chosen);
        tracing::info!("⬇️ Downloading {}", chosen);

        let data = self.source.fetch_file(chosen).await?;
        let target = filename.map(str::to_string).unwrap_or_else(|| name.clone());
        self.storage.write_file(&target, &data).await?;

        tracing::info!("✅ Saved {} ({} bytes) to {}", name, data.len(), target);
        Ok(target)
    }
}

/// 在阻塞執行緒上執行互動選擇，並與取消訊號 (例如 Ctrl+C) 競速；取消訊號先到即為 `Cancelled`
pub async fn select_until_cancelled<F, T, C>(
    make_selector: F,
    options: Vec<String>,
    cancel: C,
) -> Result<usize>
where
    F: FnOnce() -> T + Send + 'static,
    T: Selector,
    C: Future<Output = std::io::Result<()>>,
{
    let prompt = tokio::task::spawn_blocking(move || make_selector().select(&options));

    tokio::select! {
        biased;
        signal = cancel => {
            signal?;
            tracing::debug!("🛑 Selection interrupted");
            Err(SyllabusError::Cancelled)
        }
        joined = prompt => joined.map_err(|e| SyllabusError::IoError(std::io::Error::other(e)))?,
    }
}
