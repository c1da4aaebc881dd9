// crawler/src/crawler.rs
//! 并发爬取
//!
//! 每页一个任务，由信号量限制同时运行的任务数。任务把 [`PageReport`]
//! 发到通道里，调用方汇总成一份 [`CrawlSummary`]。
//! 某页不足一整页后不再调度新的页，已经在跑的页照常完成。

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::future::join_all;
use rand::Rng;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, error, info, trace, warn};

use search_core::DocumentStore;

use crate::feed::{FeedClient, PAGE_SIZE};

/// 爬取配置
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// 要爬取的页数
    pub pages: usize,
    /// 第一页的偏移
    pub start_offset: usize,
    /// 同时进行的页任务上限
    pub max_concurrency: usize,
    /// 每页结束后的随机等待（毫秒）
    pub jitter_ms: RangeInclusive<u64>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            pages: 5,
            start_offset: 0,
            max_concurrency: 4,
            jitter_ms: 100..=200,
        }
    }
}

impl CrawlConfig {
    pub fn offset_of(&self, page: usize) -> usize {
        self.start_offset + page * PAGE_SIZE
    }
}

/// 单页的处理结果
#[derive(Debug, Clone, Default)]
pub struct PageReport {
    pub page: usize,
    pub offset: usize,
    pub stored: usize,
    pub skipped: usize,
    pub document_errors: usize,
    /// 不足一整页，推荐流已经到底
    pub short: bool,
    /// 整页失败的原因
    pub page_error: Option<String>,
    pub errors: Vec<String>,
}

impl PageReport {
    fn new(page: usize, offset: usize) -> Self {
        Self {
            page,
            offset,
            ..Default::default()
        }
    }

    fn document_error(&mut self, id: &str, err: impl std::fmt::Display) {
        self.document_errors += 1;
        self.errors.push(format!("offset {} doc {id}: {err}", self.offset));
    }
}

/// 一次爬取的汇总
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages_attempted: usize,
    pub pages_failed: usize,
    pub short_pages: usize,
    pub documents_stored: usize,
    pub documents_skipped: usize,
    pub document_errors: usize,
    pub errors: Vec<String>,
}

impl CrawlSummary {
    pub fn record(&mut self, report: PageReport) {
        self.pages_attempted += 1;
        self.documents_stored += report.stored;
        self.documents_skipped += report.skipped;
        self.document_errors += report.document_errors;
        if report.short {
            self.short_pages += 1;
        }
        if let Some(err) = report.page_error {
            self.pages_failed += 1;
            self.errors.push(err);
        }
        self.errors.extend(report.errors);
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct Crawler<S: ?Sized> {
    store: Arc<S>,
    feed: FeedClient,
    config: CrawlConfig,
}

impl<S> Crawler<S>
where
    S: DocumentStore + ?Sized + 'static,
{
    pub fn new(store: Arc<S>, feed: FeedClient, config: CrawlConfig) -> Self {
        Self { store, feed, config }
    }

    /// 爬取所有页，等待全部任务结束后返回汇总
    pub async fn run(&self) -> CrawlSummary {
        let concurrency = self.config.max_concurrency.max(1);
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let (tx, mut rx) = mpsc::unbounded_channel::<PageReport>();
        let feed_ended = Arc::new(AtomicBool::new(false));

        info!(
            feed = %self.feed.url(),
            pages = self.config.pages,
            concurrency,
            offset = self.config.start_offset,
            "Starting the crawl"
        );

        let mut handles = Vec::with_capacity(self.config.pages);
        for page in 0..self.config.pages {
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                error!("Semaphore closed unexpectedly");
                break;
            };
            if feed_ended.load(Ordering::SeqCst) {
                info!(remaining = self.config.pages - page, "Feed ended, not scheduling more pages");
                break;
            }

            let offset = self.config.offset_of(page);
            let store = Arc::clone(&self.store);
            let feed = self.feed.clone();
            let jitter = self.config.jitter_ms.clone();
            let tx = tx.clone();
            let feed_ended = Arc::clone(&feed_ended);

            handles.push(tokio::spawn(async move {
                let _permit = permit;

                let report = process_page(store.as_ref(), &feed, page, offset).await;
                // 必须在释放许可之前设置
                if report.short {
                    debug!(page = report.page + 1, offset, "Marking the feed as ended");
                    feed_ended.store(true, Ordering::SeqCst);
                }
                sleep_jitter(jitter).await;

                if tx.send(report).is_err() {
                    warn!(offset, "Crawl summary receiver dropped");
                }
            }));
        }
        drop(tx);

        let mut summary = CrawlSummary::default();
        while let Some(report) = rx.recv().await {
            summary.record(report);
        }

        for result in join_all(handles).await {
            if let Err(e) = result {
                error!(error = %e, "Page task panicked");
                summary.pages_attempted += 1;
                summary.pages_failed += 1;
                summary.errors.push(format!("page task panicked: {e}"));
            }
        }

        info!(
            pages = summary.pages_attempted,
            failed = summary.pages_failed,
            stored = summary.documents_stored,
            skipped = summary.documents_skipped,
            errors = summary.errors.len(),
            "Crawl finished"
        );

        summary
    }
}

/// 拉取一页，跳过已存在的文档，写入其余文档
pub async fn process_page<S>(store: &S, feed: &FeedClient, page: usize, offset: usize) -> PageReport
where
    S: DocumentStore + ?Sized,
{
    debug!(page = page + 1, offset, "Processing offset");
    let mut report = PageReport::new(page, offset);

    let feed_page = match feed.fetch_page(offset).await {
        Ok(p) => p,
        Err(e) => {
            error!(offset, error = %e, "Error fetching page");
            report.page_error = Some(e.to_string());
            return report;
        }
    };

    if feed_page.is_short() {
        report.short = true;
        info!(
            offset,
            items = feed_page.item_count,
            "Short page, reached the end of the feed"
        );
    }

    for doc in &feed_page.documents {
        match store.exists(&doc.id).await {
            Ok(true) => {
                info!(id = %doc.id, "Skipping existing doc");
                report.skipped += 1;
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                error!(id = %doc.id, error = %e, "Error checking doc");
                report.document_error(&doc.id, e);
                continue;
            }
        }

        match store.create(doc).await {
            Ok(()) => {
                info!(id = %doc.id, title = %doc.title, "Stored doc");
                if let Ok(json) = doc.to_json() {
                    trace!(%json, "Stored payload");
                }
                report.stored += 1;
            }
            Err(e) => {
                error!(offset, id = %doc.id, error = %e, "Error storing doc");
                report.document_error(&doc.id, e);
            }
        }
    }

    report
}

async fn sleep_jitter(range: RangeInclusive<u64>) {
    if range.is_empty() {
        return;
    }
    // ThreadRng 不能跨 await 持有
    let millis = rand::rng().random_range(range);
    if millis > 0 {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}
